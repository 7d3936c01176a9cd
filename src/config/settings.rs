//! Local settings (gitblog.yml)

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::provider::RepoId;

/// File looked up in the working directory when `--config` is not given
pub const SETTINGS_FILE: &str = "gitblog.yml";

/// Where to read the blog from and how to present it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Repository
    pub owner: String,
    pub repo: String,
    /// Branch to list; the repository's default branch when unset
    pub branch: Option<String>,
    pub api_url: String,

    /// Read posts from this directory instead of GitHub
    pub local_dir: Option<PathBuf>,

    // Listing
    pub per_page: usize,

    // Rendering
    pub highlight_theme: String,
    pub line_numbers: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            owner: String::new(),
            repo: String::new(),
            branch: None,
            api_url: "https://api.github.com".to_string(),
            local_dir: None,
            per_page: 5,
            highlight_theme: "base16-ocean.dark".to_string(),
            line_numbers: false,
        }
    }
}

impl Settings {
    /// Load settings from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        tracing::debug!("Loaded settings from {:?}", path.as_ref());
        Ok(settings)
    }

    /// Load from `path` if it exists, defaults otherwise
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn repo_id(&self) -> RepoId {
        RepoId::new(&self.owner, &self.repo)
    }

    /// Check the settings can address a blog
    pub fn validate(&self) -> Result<()> {
        if self.per_page == 0 {
            bail!("per_page must be at least 1");
        }
        if self.local_dir.is_none() && (self.owner.is_empty() || self.repo.is_empty()) {
            bail!("No blog source: set owner and repo, or local_dir");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.per_page, 5);
        assert!(settings.branch.is_none());
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_parse_settings() {
        let yaml = r#"
owner: alice
repo: notes
per_page: 10
"#;
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.repo_id(), RepoId::new("alice", "notes"));
        assert_eq!(settings.per_page, 10);
        assert_eq!(settings.api_url, "https://api.github.com");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_parse_branch() {
        let settings: Settings = serde_yaml::from_str("owner: a\nrepo: b\nbranch: gh-pages\n").unwrap();
        assert_eq!(settings.branch.as_deref(), Some("gh-pages"));
    }

    #[test]
    fn test_load_or_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        let settings = Settings::load_or_default(&path).unwrap();
        assert!(settings.local_dir.is_none());

        fs::write(&path, "local_dir: ./posts\nper_page: 0\n").unwrap();
        let settings = Settings::load_or_default(&path).unwrap();
        assert_eq!(settings.local_dir, Some(PathBuf::from("./posts")));
        assert!(settings.validate().is_err());
    }
}
