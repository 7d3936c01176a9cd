//! Local directory provider - serves a checked-out blog repository

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{ContentEntry, ContentHandle, ContentProvider, RepoId};
use crate::error::ProviderError;

/// Lists the top-level files of a directory; handles are file paths
pub struct LocalProvider {
    root: PathBuf,
}

impl LocalProvider {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

/// Top-level files of `root`, sorted by name. Blocking.
fn list_directory(root: &Path, repo: &RepoId) -> Result<Vec<ContentEntry>, ProviderError> {
    if !root.is_dir() {
        return Err(ProviderError::NotFound(format!(
            "{} ({})",
            repo,
            root.display()
        )));
    }

    let mut entries = Vec::new();
    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| ProviderError::Network(e.to_string()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        let handle = ContentHandle::new(entry.path().to_string_lossy());
        entries.push(ContentEntry::new(name, handle));
    }

    Ok(entries)
}

#[async_trait]
impl ContentProvider for LocalProvider {
    async fn list_entries(&self, repo: &RepoId) -> Result<Vec<ContentEntry>, ProviderError> {
        let root = self.root.clone();
        let repo = repo.clone();
        tokio::task::spawn_blocking(move || list_directory(&root, &repo))
            .await
            .map_err(|e| ProviderError::Network(format!("directory listing aborted: {}", e)))?
    }

    async fn fetch_text(&self, handle: &ContentHandle) -> Result<String, ProviderError> {
        tokio::fs::read_to_string(handle.as_str())
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => ProviderError::NotFound(handle.to_string()),
                _ => ProviderError::Network(format!("{}: {}", handle, e)),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[tokio::test]
    async fn test_lists_top_level_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.md"), "b").unwrap();
        fs::write(dir.path().join("a.md"), "a").unwrap();
        fs::create_dir(dir.path().join("drafts")).unwrap();
        fs::write(dir.path().join("drafts").join("c.md"), "c").unwrap();

        let provider = LocalProvider::new(dir.path());
        let entries = provider
            .list_entries(&RepoId::new("me", "blog"))
            .await
            .unwrap();

        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a.md", "b.md"]);

        let text = provider.fetch_text(&entries[1].handle).await.unwrap();
        assert_eq!(text, "b");
    }

    #[tokio::test]
    async fn test_missing_directory_is_not_found() {
        let provider = LocalProvider::new("/definitely/not/here");
        let err = provider
            .list_entries(&RepoId::new("me", "blog"))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::NotFound(_)));
    }

    #[test]
    fn test_list_directory_skips_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("images")).unwrap();
        fs::write(dir.path().join("post.md"), "p").unwrap();

        let entries = list_directory(dir.path(), &RepoId::new("me", "blog")).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "post.md");
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let provider = LocalProvider::new(dir.path());
        let handle = ContentHandle::new(dir.path().join("gone.md").to_string_lossy());
        let err = provider.fetch_text(&handle).await.unwrap_err();
        assert!(matches!(err, ProviderError::NotFound(_)));
    }
}
