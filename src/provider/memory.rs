//! In-memory provider for tests and embedding

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use super::{ContentEntry, ContentHandle, ContentProvider, RepoId};
use crate::error::ProviderError;

/// Serves documents from memory and counts every fetch
#[derive(Default)]
pub struct MemoryProvider {
    entries: Vec<(String, String)>,
    failing: Mutex<HashSet<String>>,
    list_error: Option<ProviderError>,
    fetch_delay: Option<Duration>,
    fetches: Mutex<HashMap<String, usize>>,
    lists: AtomicUsize,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document, listed after the ones already added
    pub fn with_entry(mut self, name: &str, text: &str) -> Self {
        self.entries.push((name.to_string(), text.to_string()));
        self
    }

    /// Make listing fail with the given error
    pub fn with_list_error(mut self, error: ProviderError) -> Self {
        self.list_error = Some(error);
        self
    }

    /// Delay every fetch, so overlapping requests can be observed
    pub fn with_fetch_delay(mut self, delay: Duration) -> Self {
        self.fetch_delay = Some(delay);
        self
    }

    /// Make fetches of `name` fail with a network error until [`recover`](Self::recover)
    pub fn fail(&self, name: &str) {
        if let Ok(mut failing) = self.failing.lock() {
            failing.insert(name.to_string());
        }
    }

    pub fn recover(&self, name: &str) {
        if let Ok(mut failing) = self.failing.lock() {
            failing.remove(name);
        }
    }

    /// Number of fetches issued for `name`, successful or not
    pub fn fetch_count(&self, name: &str) -> usize {
        self.fetches
            .lock()
            .map(|f| f.get(name).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    pub fn list_count(&self) -> usize {
        self.lists.load(Ordering::SeqCst)
    }

    fn handle_for(name: &str) -> ContentHandle {
        ContentHandle::new(format!("memory://{}", name))
    }
}

#[async_trait]
impl ContentProvider for MemoryProvider {
    async fn list_entries(&self, _repo: &RepoId) -> Result<Vec<ContentEntry>, ProviderError> {
        self.lists.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = &self.list_error {
            return Err(error.clone());
        }

        Ok(self
            .entries
            .iter()
            .map(|(name, _)| ContentEntry::new(name.clone(), Self::handle_for(name)))
            .collect())
    }

    async fn fetch_text(&self, handle: &ContentHandle) -> Result<String, ProviderError> {
        let name = handle
            .as_str()
            .strip_prefix("memory://")
            .ok_or_else(|| ProviderError::NotFound(handle.to_string()))?;

        if let Ok(mut fetches) = self.fetches.lock() {
            *fetches.entry(name.to_string()).or_insert(0) += 1;
        }

        if let Some(delay) = self.fetch_delay {
            tokio::time::sleep(delay).await;
        }

        let failing = self
            .failing
            .lock()
            .map(|f| f.contains(name))
            .unwrap_or(false);
        if failing {
            return Err(ProviderError::Network(format!("{} unavailable", name)));
        }

        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, text)| text.clone())
            .ok_or_else(|| ProviderError::NotFound(handle.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_counts_fetches_and_failures() {
        let provider = MemoryProvider::new().with_entry("a.md", "hello");
        let repo = RepoId::new("o", "r");
        let entries = provider.list_entries(&repo).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(provider.list_count(), 1);

        provider.fail("a.md");
        assert!(provider.fetch_text(&entries[0].handle).await.is_err());
        provider.recover("a.md");
        assert_eq!(provider.fetch_text(&entries[0].handle).await.unwrap(), "hello");
        assert_eq!(provider.fetch_count("a.md"), 2);
    }

    #[tokio::test]
    async fn test_list_error() {
        let provider =
            MemoryProvider::new().with_list_error(ProviderError::Network("offline".into()));
        let err = provider.list_entries(&RepoId::new("o", "r")).await.unwrap_err();
        assert_eq!(err, ProviderError::Network("offline".into()));
    }
}
