//! List one page of posts

use anyhow::Result;
use std::fmt::Write;

use crate::helpers::full_date;
use crate::store::{GroupMode, PageView, SortMode};
use crate::Blog;

/// Print the requested page of the posts listing
pub fn run(blog: &Blog, page: usize, sort: SortMode, group: GroupMode) -> Result<()> {
    let store = &blog.store;
    let state = store.reset_view();
    let state = store.change_sort(&state, sort);
    let state = store.change_group(&state, group);
    let state = store.change_page(&state, page);

    let view = store.get_page(&state);
    print!("{}", render(blog.config.title(), &view));
    Ok(())
}

/// Plain-text rendering of a page view
pub fn render(title: &str, view: &PageView<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "Posts ({}):", view.total_posts);

    if view.is_empty() {
        let _ = writeln!(out, "  No posts yet.");
        return out;
    }

    for (group, posts) in &view.groups {
        let _ = writeln!(out);
        let _ = writeln!(out, "## {}", group);
        for post in posts {
            let _ = writeln!(
                out,
                "  {} - {} [{}]",
                full_date(post.date.as_ref()),
                post.title,
                post.filename
            );
            if let Some(description) = &post.description {
                let _ = writeln!(out, "      {}", description);
            }
            if !post.tags.is_empty() {
                let _ = writeln!(out, "      tags: {}", post.tags.join(", "));
            }
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Page {} of {}", view.page, view.total_pages);
    out
}
