//! Site configuration (config.md)
//!
//! The document is a list of sections. A line starting with `# ` opens a
//! section named by the rest of the line (lowercased); the lines after it,
//! up to the next header, form the section body.

use indexmap::IndexMap;

use crate::provider::{ContentEntry, ContentProvider, RepoId};

const HEADER: &str = "# ";

/// Parse a config document into `section name -> trimmed body`.
/// Lines before the first header are discarded. Never fails.
pub fn parse_sections(content: &str) -> IndexMap<String, String> {
    let mut sections: IndexMap<String, String> = IndexMap::new();
    let mut current: Option<String> = None;

    for line in content.lines() {
        if let Some(name) = line.strip_prefix(HEADER) {
            let name = name.trim().to_lowercase();
            // A repeated header starts the section over
            sections.insert(name.clone(), String::new());
            current = Some(name);
        } else if let Some(body) = current.as_ref().and_then(|name| sections.get_mut(name)) {
            body.push_str(line);
            body.push('\n');
        }
    }

    for body in sections.values_mut() {
        *body = body.trim().to_string();
    }

    sections
}

/// Site configuration: parsed sections laid over the defaults
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    sections: IndexMap<String, String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        let mut sections = IndexMap::new();
        sections.insert("title".to_string(), "My Blog".to_string());
        sections.insert("author".to_string(), "Anonymous".to_string());
        sections.insert("aboutme".to_string(), "Welcome to my blog!".to_string());
        Self { sections }
    }
}

impl SiteConfig {
    /// Parse a config document and overlay it onto the defaults
    pub fn parse(content: &str) -> Self {
        let mut config = Self::default();
        config.sections.extend(parse_sections(content));
        config
    }

    /// Load `config.md` from the repository, falling back to the defaults
    /// when it is missing or cannot be fetched
    pub async fn load(provider: &dyn ContentProvider, repo: &RepoId) -> Self {
        match provider.list_entries(repo).await {
            Ok(entries) => Self::load_from_listing(provider, repo, &entries).await,
            Err(e) => {
                tracing::warn!("Error fetching config for {}: {}", repo, e);
                Self::default()
            }
        }
    }

    /// Load `config.md` using a listing the caller already has
    pub async fn load_from_listing(
        provider: &dyn ContentProvider,
        repo: &RepoId,
        entries: &[ContentEntry],
    ) -> Self {
        let Some(entry) = entries.iter().find(|e| e.is_config()) else {
            tracing::debug!("{} has no config.md, using defaults", repo);
            return Self::default();
        };

        match provider.fetch_text(&entry.handle).await {
            Ok(content) => {
                let config = Self::parse(&content);
                tracing::debug!("Loaded {} config sections", config.sections.len());
                config
            }
            Err(e) => {
                tracing::warn!("Error fetching config for {}: {}", repo, e);
                Self::default()
            }
        }
    }

    pub fn get(&self, section: &str) -> Option<&str> {
        self.sections.get(section).map(String::as_str)
    }

    pub fn title(&self) -> &str {
        self.get("title").unwrap_or_default()
    }

    pub fn author(&self) -> &str {
        self.get("author").unwrap_or_default()
    }

    pub fn about_me(&self) -> &str {
        self.get("aboutme").unwrap_or_default()
    }

    pub fn sections(&self) -> &IndexMap<String, String> {
        &self.sections
    }
}
