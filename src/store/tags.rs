//! Tag index - tag to posts, in discovery order

use indexmap::IndexMap;
use std::sync::Arc;

use crate::content::Post;

/// Derived view from tag to the posts carrying it. Tags keep first-seen
/// order; each tag's posts keep discovery order.
#[derive(Debug, Default)]
pub struct TagIndex {
    tags: IndexMap<String, Vec<Arc<Post>>>,
}

impl TagIndex {
    /// Build the index in one pass over the collection
    pub fn build(posts: &[Arc<Post>]) -> Self {
        let mut tags: IndexMap<String, Vec<Arc<Post>>> = IndexMap::new();
        for post in posts {
            for tag in &post.tags {
                tags.entry(tag.clone()).or_default().push(Arc::clone(post));
            }
        }
        Self { tags }
    }

    pub fn get(&self, tag: &str) -> Option<&[Arc<Post>]> {
        self.tags.get(tag).map(Vec::as_slice)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains_key(tag)
    }

    /// Tag names in first-seen order
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.keys().map(String::as_str)
    }

    /// (tag, post count) pairs in first-seen order
    pub fn counts(&self) -> impl Iterator<Item = (&str, usize)> {
        self.tags.iter().map(|(tag, posts)| (tag.as_str(), posts.len()))
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}
