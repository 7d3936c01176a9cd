//! Error types
//!
//! Two layers: [`ProviderError`] is what a content source reports, and
//! [`BlogError`] is what the store surfaces to its callers.

use thiserror::Error;

/// Failure reported by a [`ContentProvider`](crate::provider::ContentProvider)
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    /// Repository or file does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Transport failure, unexpected status or undecodable response
    #[error("network error: {0}")]
    Network(String),
}

/// Errors surfaced by the post store
#[derive(Debug, Error)]
pub enum BlogError {
    /// Entry listing is unavailable; the store cannot be used
    #[error("failed to load blog posts: {0}")]
    LoadFailed(#[source] ProviderError),

    /// A post document could not be split into its segments
    #[error("malformed document {filename}: {reason}")]
    MalformedDocument { filename: String, reason: String },

    /// Requested post or tag is absent
    #[error("{kind} \"{name}\" not found")]
    NotFound { kind: &'static str, name: String },

    /// Lazy content retrieval failed; the post stays uncached
    #[error("failed to fetch {filename}: {source}")]
    FetchError {
        filename: String,
        #[source]
        source: ProviderError,
    },
}

impl BlogError {
    pub fn post_not_found(filename: &str) -> Self {
        Self::NotFound {
            kind: "Post",
            name: filename.to_string(),
        }
    }

    pub fn tag_not_found(tag: &str) -> Self {
        Self::NotFound {
            kind: "Tag",
            name: tag.to_string(),
        }
    }

    /// Whether retrying the same operation may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::FetchError { .. })
    }
}

pub type Result<T> = std::result::Result<T, BlogError>;
