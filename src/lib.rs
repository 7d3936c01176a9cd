//! gitblog-rs: browse a Markdown blog straight from its repository
//!
//! Posts are Markdown files with a small front-matter block, stored at the
//! root of a GitHub repository (or a local checkout). The [`store`] loads
//! their metadata once, derives sorted, grouped and paginated views from it,
//! and renders a post's body only when it is first viewed.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod helpers;
pub mod provider;
pub mod store;

use std::sync::Arc;

use config::{Settings, SiteConfig};
use content::MarkdownRenderer;
use error::Result;
use provider::{ContentProvider, GithubProvider, LocalProvider};
use store::PostStore;

/// The browsing session: settings, site configuration and loaded posts
pub struct Blog {
    /// Local settings
    pub settings: Settings,
    /// Site configuration from the repository's config.md
    pub config: SiteConfig,
    /// Loaded posts
    pub store: PostStore,
}

impl Blog {
    /// Load a blog with the provider the settings call for
    pub async fn open(settings: Settings) -> Result<Self> {
        let provider = provider_for(&settings);
        Self::open_with(settings, provider).await
    }

    /// Load a blog from an explicit provider.
    ///
    /// A config failure falls back to the default config; a listing failure
    /// is fatal.
    pub async fn open_with(settings: Settings, provider: Arc<dyn ContentProvider>) -> Result<Self> {
        let repo = settings.repo_id();
        let renderer =
            MarkdownRenderer::with_options(&settings.highlight_theme, settings.line_numbers);
        let mut store = PostStore::new(Arc::clone(&provider), repo.clone())
            .with_per_page(settings.per_page)
            .with_renderer(renderer);

        // One listing serves both the config lookup and the post load
        let listing = store.list_entries().await?;
        let (config, ()) = tokio::join!(
            SiteConfig::load_from_listing(provider.as_ref(), &repo, &listing),
            store.load_entries(listing.clone())
        );

        Ok(Self {
            settings,
            config,
            store,
        })
    }
}

/// Pick the content source: a local directory if configured, GitHub otherwise
pub fn provider_for(settings: &Settings) -> Arc<dyn ContentProvider> {
    match &settings.local_dir {
        Some(dir) => Arc::new(LocalProvider::new(dir)),
        None => Arc::new(github_provider(settings)),
    }
}

/// GitHub provider for the settings; lists the default branch unless one is set
fn github_provider(settings: &Settings) -> GithubProvider {
    let provider = GithubProvider::with_api_url(&settings.api_url);
    match &settings.branch {
        Some(branch) => provider.with_branch(branch),
        None => provider,
    }
}
