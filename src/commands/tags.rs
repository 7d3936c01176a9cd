//! Tag listings

use anyhow::Result;
use std::fmt::Write;
use std::sync::Arc;

use crate::content::Post;
use crate::helpers::full_date;
use crate::store::TagIndex;
use crate::Blog;

/// Print every tag with its post count, in first-seen order
pub fn run(blog: &Blog) -> Result<()> {
    print!("{}", render_index(blog.store.tag_index()));
    Ok(())
}

/// Print the posts tagged with `tag`
pub fn show(blog: &Blog, tag: &str) -> Result<()> {
    let posts = blog.store.posts_tagged(tag)?;
    print!("{}", render_tagged(tag, posts));
    Ok(())
}

pub fn render_index(index: &TagIndex) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Tags ({}):", index.len());
    for (tag, count) in index.counts() {
        let _ = writeln!(out, "  {} ({})", tag, count);
    }
    out
}

pub fn render_tagged(tag: &str, posts: &[Arc<Post>]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Posts tagged with {} ({}):", tag, posts.len());
    for post in posts {
        let _ = writeln!(
            out,
            "  {} - {} [{}]",
            full_date(post.date.as_ref()),
            post.title,
            post.filename
        );
    }
    out
}
