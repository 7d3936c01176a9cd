//! Show a single post

use anyhow::Result;
use std::fmt::Write;

use crate::content::Post;
use crate::helpers::full_date;
use crate::Blog;

/// Print a post's header and rendered HTML
pub async fn run(blog: &Blog, filename: &str) -> Result<()> {
    let post = blog.store.post(filename)?;
    let html = blog.store.resolve_content(filename).await?;
    println!("{}", render(post, blog.config.author(), html));
    Ok(())
}

/// Post header followed by its HTML
pub fn render(post: &Post, author: &str, html: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", post.title);
    let _ = writeln!(out, "Date: {}", full_date(post.date.as_ref()));
    let _ = writeln!(out, "Author: {}", author);
    if !post.tags.is_empty() {
        let _ = writeln!(out, "Tags: {}", post.tags.join(", "));
    }
    let _ = writeln!(out);
    out.push_str(html);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::provider::MemoryProvider;
    use std::sync::Arc;

    async fn blog() -> Blog {
        let provider = Arc::new(
            MemoryProvider::new()
                .with_entry("config.md", "# author\nAlice\n")
                .with_entry(
                    "hello.md",
                    "---\ntitle: Hello\ndate: 2024-03-05\ntags: rust, cli\n---\n# Hi\n",
                )
                .with_entry("plain.md", "---\ntitle: Plain\ndate: soon\n---\ntext\n"),
        );
        let settings = Settings {
            owner: "alice".to_string(),
            repo: "blog".to_string(),
            ..Default::default()
        };
        Blog::open_with(settings, provider).await.unwrap()
    }

    #[tokio::test]
    async fn test_render_post() {
        let blog = blog().await;
        let html = blog.store.resolve_content("hello.md").await.unwrap();
        let post = blog.store.post("hello.md").unwrap();
        let text = render(post, blog.config.author(), html);

        assert!(text.starts_with("Hello\nDate: March 5, 2024\nAuthor: Alice\nTags: rust, cli\n\n"));
        assert!(text.contains("<h1>Hi</h1>"));
    }

    #[tokio::test]
    async fn test_render_untagged_undated_post() {
        let blog = blog().await;
        let post = blog.store.post("plain.md").unwrap();
        let text = render(post, "Alice", "<p>text</p>\n");

        assert!(text.contains("Date: Undated\n"));
        assert!(!text.contains("Tags:"));
    }

    #[tokio::test]
    async fn test_run_unknown_post() {
        let blog = blog().await;
        let err = run(&blog, "missing.md").await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<crate::error::BlogError>(),
            Some(crate::error::BlogError::NotFound { kind: "Post", .. })
        ));
    }
}
