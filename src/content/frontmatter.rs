//! Front-matter parsing
//!
//! A post document has three segments separated by `---` lines: a preamble
//! (ignored), the front-matter block of `key: value` lines, and the Markdown
//! body.

use indexmap::IndexMap;
use thiserror::Error;

/// Line separating the segments of a post document
pub const DELIMITER: &str = "---";

/// Key whose value is a comma-separated list
const TAGS_KEY: &str = "tags";

/// Why a document could not be split
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DocumentError {
    #[error("expected 3 segments separated by `---` lines, found {found}")]
    MissingSegments { found: usize },
}

/// A front-matter value; only `tags` produces a list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::List(_) => None,
        }
    }
}

/// Front-matter data from a post, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    fields: IndexMap<String, FieldValue>,
}

impl FrontMatter {
    /// Parse a full post document.
    /// Returns (front_matter, body)
    pub fn parse(document: &str) -> Result<(Self, &str), DocumentError> {
        let (block, body) = split_document(document)?;
        Ok((Self::parse_block(block), body))
    }

    /// Parse the `key: value` lines of a front-matter block.
    /// Lines without a colon are skipped.
    pub fn parse_block(block: &str) -> Self {
        let mut fields = IndexMap::new();

        for line in block.lines() {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();

            let value = if key == TAGS_KEY {
                FieldValue::List(split_tags(value))
            } else {
                FieldValue::Text(value.to_string())
            };
            fields.insert(key.to_string(), value);
        }

        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn title(&self) -> Option<&str> {
        self.text("title")
    }

    pub fn date(&self) -> Option<&str> {
        self.text("date")
    }

    pub fn description(&self) -> Option<&str> {
        self.text("description")
    }

    pub fn tags(&self) -> &[String] {
        match self.fields.get(TAGS_KEY) {
            Some(FieldValue::List(tags)) => tags,
            _ => &[],
        }
    }

    /// Fields other than the ones a post models directly
    pub fn extra(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields
            .iter()
            .filter(|(k, _)| !matches!(k.as_str(), "title" | "date" | "description" | TAGS_KEY))
            .map(|(k, v)| (k.as_str(), v))
    }

    fn text(&self, key: &str) -> Option<&str> {
        self.fields
            .get(key)
            .and_then(FieldValue::as_text)
            .filter(|s| !s.is_empty())
    }
}

/// Split a document into its front-matter block and body.
///
/// Everything after the second delimiter line is body, including any
/// further `---` lines.
pub fn split_document(document: &str) -> Result<(&str, &str), DocumentError> {
    let mut bounds: Vec<(usize, usize)> = Vec::with_capacity(2);
    let mut offset = 0;

    for line in document.split_inclusive('\n') {
        if line.trim() == DELIMITER {
            bounds.push((offset, offset + line.len()));
            if bounds.len() == 2 {
                break;
            }
        }
        offset += line.len();
    }

    match bounds.as_slice() {
        [(_, block_start), (block_end, body_start)] => Ok((
            &document[*block_start..*block_end],
            &document[*body_start..],
        )),
        _ => Err(DocumentError::MissingSegments {
            found: bounds.len() + 1,
        }),
    }
}

fn split_tags(value: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in value.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_post_document() {
        let content = r#"---
title: Hello World
date: 2024-01-15
tags: rust, blog , notes
description: First post
---

This is the content.
"#;

        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title(), Some("Hello World"));
        assert_eq!(fm.date(), Some("2024-01-15"));
        assert_eq!(fm.tags(), ["rust", "blog", "notes"]);
        assert_eq!(fm.description(), Some("First post"));
        assert_eq!(body, "\nThis is the content.\n");
    }

    #[test]
    fn test_preamble_is_ignored() {
        let content = "generated by hand\n---\ntitle: Pre\n---\nbody";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title(), Some("Pre"));
        assert_eq!(body, "body");
    }

    #[test]
    fn test_missing_third_segment() {
        let content = "---\ntitle: Broken\n";
        assert_eq!(
            FrontMatter::parse(content),
            Err(DocumentError::MissingSegments { found: 2 })
        );
        assert_eq!(
            FrontMatter::parse("just text"),
            Err(DocumentError::MissingSegments { found: 1 })
        );
    }

    #[test]
    fn test_lines_without_colon_are_skipped() {
        let fm = FrontMatter::parse_block("title: Ok\nnot a field\n\nauthor: me");
        assert_eq!(fm.title(), Some("Ok"));
        assert_eq!(
            fm.get("author"),
            Some(&FieldValue::Text("me".to_string()))
        );
        assert!(fm.get("not a field").is_none());
    }

    #[test]
    fn test_empty_front_matter() {
        let (fm, body) = FrontMatter::parse("---\n---\nBody only").unwrap();
        assert!(fm.is_empty());
        assert!(fm.tags().is_empty());
        assert_eq!(body, "Body only");
    }

    #[test]
    fn test_value_keeps_later_colons() {
        let fm = FrontMatter::parse_block("title: Rust: the good parts");
        assert_eq!(fm.title(), Some("Rust: the good parts"));
    }

    #[test]
    fn test_tags_are_deduplicated_and_non_empty() {
        let fm = FrontMatter::parse_block("tags: a, , b, a");
        assert_eq!(fm.tags(), ["a", "b"]);

        let fm = FrontMatter::parse_block("tags:");
        assert!(fm.tags().is_empty());
    }

    #[test]
    fn test_body_keeps_horizontal_rules() {
        let content = "---\ntitle: Rules\n---\nabove\n\n---\n\nbelow\n";
        let (_, body) = FrontMatter::parse(content).unwrap();
        assert!(body.contains("above"));
        assert!(body.contains("below"));
        assert!(body.contains("---"));
    }

    #[test]
    fn test_crlf_delimiters() {
        let content = "---\r\ntitle: Windows\r\n---\r\nbody\r\n";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title(), Some("Windows"));
        assert_eq!(body, "body\r\n");
    }

    #[test]
    fn test_extra_fields() {
        let fm = FrontMatter::parse_block("title: T\nlayout: wide\ntags: x");
        let extra: Vec<_> = fm.extra().collect();
        assert_eq!(extra, vec![("layout", &FieldValue::Text("wide".into()))]);
    }
}
