//! Post model

use chrono::{Local, NaiveDateTime};
use indexmap::IndexMap;
use std::fmt;
use tokio::sync::OnceCell;

use super::frontmatter::{FieldValue, FrontMatter};
use crate::helpers::parse_date;
use crate::provider::ContentHandle;

/// Tag given to posts that failed to load
pub const ERROR_TAG: &str = "error";

/// A blog post. Metadata is known after loading; the rendered content is
/// filled in at most once, on first view.
#[derive(Debug)]
pub struct Post {
    /// Entry name, unique across the collection
    pub filename: String,

    /// Post title
    pub title: String,

    /// Date as written in the front-matter
    pub raw_date: Option<String>,

    /// Parsed date; `None` when missing or invalid
    pub date: Option<NaiveDateTime>,

    /// Post tags, in declaration order without duplicates
    pub tags: Vec<String>,

    /// Short summary shown in listings
    pub description: Option<String>,

    /// Where the raw document is fetched from
    pub handle: ContentHandle,

    /// Custom front-matter fields
    pub extra: IndexMap<String, FieldValue>,

    /// Rendered HTML, set once
    content: OnceCell<String>,

    /// Set only by [`Post::error`]
    failed: bool,
}

impl Post {
    /// Build a post from its parsed front-matter. The body is not rendered.
    pub fn from_front_matter(filename: &str, handle: ContentHandle, fm: &FrontMatter) -> Self {
        let title = fm
            .title()
            .map(str::to_string)
            .unwrap_or_else(|| title_from_filename(filename));
        let raw_date = fm.date().map(str::to_string);
        let date = raw_date.as_deref().and_then(parse_date);

        Self {
            filename: filename.to_string(),
            title,
            raw_date,
            date,
            tags: fm.tags().to_vec(),
            description: fm.description().map(str::to_string),
            handle,
            extra: fm
                .extra()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
            content: OnceCell::new(),
            failed: false,
        }
    }

    /// Stand-in for a post that could not be loaded. Its content is
    /// pre-rendered, so viewing it never touches the provider.
    pub fn error(filename: &str, handle: ContentHandle, error: &dyn fmt::Display) -> Self {
        let today = Local::now().date_naive();
        let html = format!(
            "<p>An error occurred while trying to parse this post: {}</p>\n",
            escape_html(&error.to_string())
        );

        Self {
            filename: filename.to_string(),
            title: format!("Error in {}", filename),
            raw_date: Some(today.format("%Y-%m-%d").to_string()),
            date: today.and_hms_opt(0, 0, 0),
            tags: vec![ERROR_TAG.to_string()],
            description: Some("This post could not be parsed due to an error.".to_string()),
            handle,
            extra: IndexMap::new(),
            content: OnceCell::new_with(Some(html)),
            failed: true,
        }
    }

    /// Rendered HTML, if it has been resolved
    pub fn content(&self) -> Option<&str> {
        self.content.get().map(String::as_str)
    }

    /// True for stand-ins built by [`Post::error`]
    pub fn is_error(&self) -> bool {
        self.failed
    }

    pub(crate) fn content_cell(&self) -> &OnceCell<String> {
        &self.content
    }
}

/// "my-first-post.md" -> "my-first-post"
fn title_from_filename(filename: &str) -> String {
    let stem = filename.strip_suffix(".md").unwrap_or(filename);
    if stem.is_empty() {
        "Untitled".to_string()
    } else {
        stem.to_string()
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_from_front_matter() {
        let fm = FrontMatter::parse_block(
            "title: Hello\ndate: 2024-02-01\ntags: a, b\ndescription: hi\nmood: happy",
        );
        let post = Post::from_front_matter("hello.md", ContentHandle::new("h"), &fm);

        assert_eq!(post.title, "Hello");
        assert_eq!(post.raw_date.as_deref(), Some("2024-02-01"));
        assert!(post.date.is_some());
        assert_eq!(post.tags, vec!["a", "b"]);
        assert_eq!(post.description.as_deref(), Some("hi"));
        assert_eq!(
            post.extra.get("mood"),
            Some(&FieldValue::Text("happy".to_string()))
        );
        assert!(post.content().is_none());
        assert!(!post.is_error());
    }

    #[test]
    fn test_title_falls_back_to_filename() {
        let fm = FrontMatter::parse_block("date: not a date");
        let post = Post::from_front_matter("notes.md", ContentHandle::new("h"), &fm);
        assert_eq!(post.title, "notes");
        assert_eq!(post.raw_date.as_deref(), Some("not a date"));
        assert!(post.date.is_none());
    }

    #[test]
    fn test_error_post() {
        let post = Post::error("bad.md", ContentHandle::new("h"), &"missing <delimiter>");
        assert_eq!(post.title, "Error in bad.md");
        assert_eq!(post.tags, vec![ERROR_TAG]);
        assert!(post.is_error());
        assert!(post.date.is_some());
        let html = post.content().unwrap();
        assert!(html.contains("missing &lt;delimiter&gt;"));
    }

    #[test]
    fn test_post_looking_like_an_error_is_not_one() {
        let fm = FrontMatter::parse_block("title: Error in prod.md
tags: error");
        let post = Post::from_front_matter("prod.md", ContentHandle::new("h"), &fm);
        assert_eq!(post.tags, vec![ERROR_TAG]);
        assert!(!post.is_error());
        assert!(post.content().is_none());
    }
}
