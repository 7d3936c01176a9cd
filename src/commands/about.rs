//! Site information

use anyhow::Result;
use std::fmt::Write;

use crate::config::SiteConfig;
use crate::Blog;

pub fn run(blog: &Blog) -> Result<()> {
    print!("{}", render(&blog.config));
    Ok(())
}

pub fn render(config: &SiteConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", config.title());
    let _ = writeln!(out, "By {}", config.author());
    let _ = writeln!(out);
    let _ = writeln!(out, "About Me");
    let _ = writeln!(out, "{}", config.about_me());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_defaults() {
        let text = render(&SiteConfig::default());
        assert_eq!(text, "My Blog\nBy Anonymous\n\nAbout Me\nWelcome to my blog!\n");
    }

    #[test]
    fn test_render_multiline_about() {
        let config = SiteConfig::parse("# aboutme\nI write.\n\nMostly Rust.\n# author\nJane\n");
        let text = render(&config);
        assert!(text.starts_with("My Blog\nBy Jane\n"));
        assert!(text.ends_with("About Me\nI write.\n\nMostly Rust.\n"));
    }
}
