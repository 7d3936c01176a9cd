//! Content providers - where raw post documents come from
//!
//! A provider lists the entries of a repository and fetches the raw text
//! behind an entry's handle. It knows nothing about posts or Markdown.

mod github;
mod local;
mod memory;

use async_trait::async_trait;
use std::fmt;

use crate::error::ProviderError;

pub use github::GithubProvider;
pub use local::LocalProvider;
pub use memory::MemoryProvider;

/// Identifies the repository holding the blog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoId {
    pub owner: String,
    pub repo: String,
}

impl RepoId {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Opaque retrieval handle for an entry (a download URL, a path, a key)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHandle(String);

impl ContentHandle {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single file-like object in a repository listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentEntry {
    pub name: String,
    pub handle: ContentHandle,
}

impl ContentEntry {
    pub fn new(name: impl Into<String>, handle: ContentHandle) -> Self {
        Self {
            name: name.into(),
            handle,
        }
    }

    /// Markdown entries that are blog posts (not the readme or site config)
    pub fn is_post(&self) -> bool {
        let lower = self.name.to_lowercase();
        self.name.ends_with(".md") && lower != "readme.md" && lower != CONFIG_ENTRY
    }

    pub fn is_config(&self) -> bool {
        self.name.eq_ignore_ascii_case(CONFIG_ENTRY)
    }
}

/// Name of the site configuration document
pub const CONFIG_ENTRY: &str = "config.md";

/// Source of raw blog content
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// List the entries at the root of a repository, in listing order
    async fn list_entries(&self, repo: &RepoId) -> Result<Vec<ContentEntry>, ProviderError>;

    /// Fetch the raw text behind a handle
    async fn fetch_text(&self, handle: &ContentHandle) -> Result<String, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str) -> ContentEntry {
        ContentEntry::new(name, ContentHandle::new(name))
    }

    #[test]
    fn test_post_filter() {
        assert!(entry("hello.md").is_post());
        assert!(!entry("Notes.MD").is_post());
        assert!(!entry("README.md").is_post());
        assert!(!entry("Config.md").is_post());
        assert!(!entry("theme-dark.css").is_post());
        assert!(!entry("draft.markdown").is_post());
    }

    #[test]
    fn test_config_entry() {
        assert!(entry("CONFIG.md").is_config());
        assert!(!entry("config.txt").is_config());
    }

    #[test]
    fn test_repo_display() {
        assert_eq!(RepoId::new("alice", "blog").to_string(), "alice/blog");
    }
}
