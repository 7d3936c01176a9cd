//! Post store - the post collection and the views derived from it
//!
//! Loading happens once through [`PostStore::initialize`]. Everything the
//! listing shows is then derived from the loaded metadata by
//! [`PostStore::get_page`] without I/O. Rendered content is fetched lazily,
//! at most once per post, by [`PostStore::resolve_content`].

mod tags;
mod view;

use icu_collator::{Collator, CollatorBorrowed};
use indexmap::IndexMap;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::task::JoinSet;

use crate::content::{split_document, FrontMatter, MarkdownRenderer, Post};
use crate::error::{BlogError, ProviderError, Result};
use crate::helpers::{month_key, year_key};
use crate::provider::{ContentEntry, ContentProvider, RepoId};

pub use tags::TagIndex;
pub use view::{GroupMode, PageView, ParseModeError, SortMode, ViewState, ALL_POSTS};

/// Posts per page unless configured otherwise
pub const DEFAULT_PER_PAGE: usize = 5;

/// Holds every discovered post and derives pages from it
pub struct PostStore {
    provider: Arc<dyn ContentProvider>,
    repo: RepoId,
    renderer: MarkdownRenderer,
    per_page: usize,
    posts: Vec<Arc<Post>>,
    by_filename: HashMap<String, usize>,
    tags: TagIndex,
}

impl PostStore {
    /// Create an empty store; call [`initialize`](Self::initialize) to load it
    pub fn new(provider: Arc<dyn ContentProvider>, repo: RepoId) -> Self {
        Self {
            provider,
            repo,
            renderer: MarkdownRenderer::new(),
            per_page: DEFAULT_PER_PAGE,
            posts: Vec::new(),
            by_filename: HashMap::new(),
            tags: TagIndex::default(),
        }
    }

    /// Set the page size (at least 1)
    pub fn with_per_page(mut self, per_page: usize) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    pub fn with_renderer(mut self, renderer: MarkdownRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// Discover and load post metadata.
    ///
    /// Posts are fetched concurrently. A post that cannot be fetched or split
    /// becomes an error post; only a failure to list the repository fails
    /// the whole load.
    pub async fn initialize(&mut self) -> Result<()> {
        let listing = self.list_entries().await?;
        self.load_entries(listing).await;
        Ok(())
    }

    /// List the repository; a failure here is [`BlogError::LoadFailed`]
    pub async fn list_entries(&self) -> Result<Vec<ContentEntry>> {
        self.provider.list_entries(&self.repo).await.map_err(|e| {
            tracing::error!("Error fetching files from {}: {}", self.repo, e);
            BlogError::LoadFailed(e)
        })
    }

    /// Load the posts of an existing listing, replacing the collection.
    /// Entries that are not posts are skipped.
    pub async fn load_entries(&mut self, listing: Vec<ContentEntry>) {
        let mut seen = HashSet::new();
        let entries: Vec<ContentEntry> = listing
            .into_iter()
            .filter(ContentEntry::is_post)
            .filter(|entry| {
                let fresh = seen.insert(entry.name.clone());
                if !fresh {
                    tracing::warn!("Skipping duplicate entry {}", entry.name);
                }
                fresh
            })
            .collect();

        let mut tasks = JoinSet::new();
        for (index, entry) in entries.iter().enumerate() {
            let provider = Arc::clone(&self.provider);
            let handle = entry.handle.clone();
            tasks.spawn(async move { (index, provider.fetch_text(&handle).await) });
        }

        let mut fetched: Vec<Option<std::result::Result<String, ProviderError>>> =
            (0..entries.len()).map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, result)) => fetched[index] = Some(result),
                Err(e) => tracing::error!("Fetch task failed: {}", e),
            }
        }

        let posts: Vec<Arc<Post>> = entries
            .into_iter()
            .zip(fetched)
            .map(|(entry, result)| Arc::new(load_post(entry, result)))
            .collect();

        self.replace_posts(posts);

        let failed = self.posts.iter().filter(|p| p.is_error()).count();
        tracing::info!(
            "Loaded {} posts ({} failed) and {} tags from {}",
            self.posts.len(),
            failed,
            self.tags.len(),
            self.repo
        );
    }

    /// Swap in a new collection and rebuild everything derived from it
    fn replace_posts(&mut self, posts: Vec<Arc<Post>>) {
        self.by_filename = posts
            .iter()
            .enumerate()
            .map(|(i, p)| (p.filename.clone(), i))
            .collect();
        self.tags = TagIndex::build(&posts);
        self.posts = posts;
    }

    /// Derive one grouped page of the listing. Pure; no I/O.
    pub fn get_page(&self, state: &ViewState) -> PageView<'_> {
        let sorted = self.sorted(state.sort());
        let total_posts = sorted.len();

        // Group order is fixed by the whole sorted sequence, not the page
        let mut groups: IndexMap<String, Vec<&Post>> = IndexMap::new();
        for post in &sorted {
            for key in group_keys(post, state.group()) {
                groups.entry(key).or_default();
            }
        }

        let start = state.page().saturating_sub(1).saturating_mul(self.per_page);
        let end = start.saturating_add(self.per_page).min(total_posts);
        let slice = sorted.get(start..end).unwrap_or_default();

        for post in slice {
            for key in group_keys(post, state.group()) {
                groups.entry(key).or_default().push(*post);
            }
        }
        groups.retain(|_, posts| !posts.is_empty());

        PageView {
            groups,
            page: state.page(),
            total_pages: self.total_pages(),
            total_posts,
        }
    }

    /// All posts in the given order; ties keep discovery order
    pub fn sorted(&self, sort: SortMode) -> Vec<&Post> {
        let mut sorted: Vec<&Post> = self.posts.iter().map(Arc::as_ref).collect();
        match sort {
            SortMode::Date => sorted.sort_by(|a, b| compare_dates(a, b)),
            SortMode::Title => {
                let collator = title_collator();
                sorted.sort_by(|a, b| compare_titles(collator.as_ref(), &a.title, &b.title))
            }
        }
        sorted
    }

    /// Rendered HTML for a post, fetched and rendered on first call.
    ///
    /// Concurrent calls for the same post share one fetch. A failed fetch
    /// leaves the post uncached so a later call retries.
    pub async fn resolve_content(&self, filename: &str) -> Result<&str> {
        let post = self.post(filename)?;

        if let Some(content) = post.content() {
            tracing::debug!("Content cache hit for {}", filename);
            return Ok(content);
        }

        let content = post
            .content_cell()
            .get_or_try_init(|| async {
                tracing::debug!("Fetching content for {}", filename);
                let raw = self.provider.fetch_text(&post.handle).await.map_err(|source| {
                    tracing::warn!("Failed to fetch {}: {}", filename, source);
                    BlogError::FetchError {
                        filename: filename.to_string(),
                        source,
                    }
                })?;
                let (_, body) =
                    split_document(&raw).map_err(|e| BlogError::MalformedDocument {
                        filename: filename.to_string(),
                        reason: e.to_string(),
                    })?;
                Ok::<_, BlogError>(self.renderer.render(body))
            })
            .await?;

        Ok(content)
    }

    /// A fresh view: first page, newest first, ungrouped
    pub fn reset_view(&self) -> ViewState {
        ViewState::default()
    }

    /// Switch ordering; returns to the first page
    pub fn change_sort(&self, state: &ViewState, sort: SortMode) -> ViewState {
        ViewState::new(1, sort, state.group())
    }

    /// Switch grouping; returns to the first page
    pub fn change_group(&self, state: &ViewState, group: GroupMode) -> ViewState {
        ViewState::new(1, state.sort(), group)
    }

    /// Go to page `page`, clamped into the available range
    pub fn change_page(&self, state: &ViewState, page: usize) -> ViewState {
        let last = self.total_pages().max(1);
        ViewState::new(page.clamp(1, last), state.sort(), state.group())
    }

    /// `ceil(posts / per_page)`; grouping never changes it
    pub fn total_pages(&self) -> usize {
        self.posts.len().div_ceil(self.per_page)
    }

    pub fn post(&self, filename: &str) -> Result<&Post> {
        self.by_filename
            .get(filename)
            .map(|&i| self.posts[i].as_ref())
            .ok_or_else(|| BlogError::post_not_found(filename))
    }

    /// Posts carrying `tag`, in discovery order
    pub fn posts_tagged(&self, tag: &str) -> Result<&[Arc<Post>]> {
        self.tags
            .get(tag)
            .ok_or_else(|| BlogError::tag_not_found(tag))
    }

    /// Posts in discovery order
    pub fn posts(&self) -> impl Iterator<Item = &Post> {
        self.posts.iter().map(Arc::as_ref)
    }

    pub fn tag_index(&self) -> &TagIndex {
        &self.tags
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    pub fn repo(&self) -> &RepoId {
        &self.repo
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

/// Turn a fetched document into a post, or an error post
fn load_post(entry: ContentEntry, fetched: Option<std::result::Result<String, ProviderError>>) -> Post {
    let text = match fetched {
        Some(Ok(text)) => text,
        Some(Err(e)) => {
            tracing::warn!("Error processing file {}: {}", entry.name, e);
            return Post::error(&entry.name, entry.handle, &e);
        }
        None => {
            tracing::warn!("Error processing file {}: fetch aborted", entry.name);
            return Post::error(&entry.name, entry.handle, &"fetch aborted");
        }
    };

    match FrontMatter::parse(&text) {
        Ok((fm, _)) => Post::from_front_matter(&entry.name, entry.handle, &fm),
        Err(e) => {
            let error = BlogError::MalformedDocument {
                filename: entry.name.clone(),
                reason: e.to_string(),
            };
            tracing::warn!("Error parsing markdown: {}", error);
            Post::error(&entry.name, entry.handle, &error)
        }
    }
}

/// Newest first; posts without a valid date sort as the oldest
fn compare_dates(a: &Post, b: &Post) -> Ordering {
    b.date.cmp(&a.date)
}

/// Root-locale collator for titles, `None` if its data fails to load
fn title_collator() -> Option<CollatorBorrowed<'static>> {
    Collator::try_new(Default::default(), Default::default())
        .map_err(|e| tracing::warn!("Title collation unavailable, comparing lowercase text: {}", e))
        .ok()
}

/// Locale-aware title order ("apple" < "Émile" < "Zebra")
fn compare_titles(collator: Option<&CollatorBorrowed<'_>>, a: &str, b: &str) -> Ordering {
    match collator {
        Some(collator) => collator.compare(a, b),
        None => a.to_lowercase().cmp(&b.to_lowercase()),
    }
}

fn group_keys(post: &Post, group: GroupMode) -> Vec<String> {
    match group {
        GroupMode::None => vec![ALL_POSTS.to_string()],
        GroupMode::Tags => post.tags.clone(),
        GroupMode::Month => vec![month_key(post.date.as_ref())],
        GroupMode::Year => vec![year_key(post.date.as_ref())],
    }
}
