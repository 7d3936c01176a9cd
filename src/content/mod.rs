//! Content module - post documents, their front-matter and rendering

mod frontmatter;
mod markdown;
mod post;

pub use frontmatter::{split_document, DocumentError, FieldValue, FrontMatter, DELIMITER};
pub use markdown::MarkdownRenderer;
pub use post::{Post, ERROR_TAG};
