//! GitHub contents API provider

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::StatusCode;
use serde::Deserialize;

use super::{ContentEntry, ContentHandle, ContentProvider, RepoId};
use crate::error::ProviderError;

/// Characters escaped in a single URL path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

const USER_AGENT: &str = concat!("gitblog-rs/", env!("CARGO_PKG_VERSION"));

/// One item of the `GET /repos/{owner}/{repo}/contents` response
#[derive(Debug, Deserialize)]
struct ApiEntry {
    name: String,
    #[serde(rename = "type", default)]
    kind: String,
    download_url: Option<String>,
}

/// Lists entries through the GitHub REST API and downloads raw files
pub struct GithubProvider {
    client: reqwest::Client,
    api_url: String,
    branch: Option<String>,
}

impl GithubProvider {
    /// Create a provider against `https://api.github.com`
    pub fn new() -> Self {
        Self::with_api_url("https://api.github.com")
    }

    /// Create a provider against a custom API root (GitHub Enterprise, mocks)
    pub fn with_api_url(api_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            branch: None,
        }
    }

    /// List a branch other than the repository default
    pub fn with_branch(mut self, branch: &str) -> Self {
        self.branch = Some(branch.to_string()).filter(|b| !b.is_empty());
        self
    }

    pub(crate) fn contents_url(&self, repo: &RepoId) -> String {
        let mut url = format!(
            "{}/repos/{}/{}/contents",
            self.api_url,
            utf8_percent_encode(&repo.owner, SEGMENT),
            utf8_percent_encode(&repo.repo, SEGMENT)
        );
        if let Some(branch) = &self.branch {
            url.push_str("?ref=");
            url.extend(utf8_percent_encode(branch, SEGMENT));
        }
        url
    }

    async fn get_text(&self, url: &str) -> Result<String, ProviderError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ProviderError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            return Err(ProviderError::Network(format!(
                "HTTP error! status: {} ({})",
                status.as_u16(),
                url
            )));
        }

        response
            .text()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))
    }
}

impl Default for GithubProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentProvider for GithubProvider {
    async fn list_entries(&self, repo: &RepoId) -> Result<Vec<ContentEntry>, ProviderError> {
        let url = self.contents_url(repo);
        tracing::debug!("Listing {} via {}", repo, url);

        let body = self.get_text(&url).await?;
        let entries = parse_listing(&body)?;

        tracing::debug!("{} lists {} files", repo, entries.len());
        Ok(entries)
    }

    async fn fetch_text(&self, handle: &ContentHandle) -> Result<String, ProviderError> {
        self.get_text(handle.as_str()).await
    }
}

/// Decode a contents listing, keeping downloadable files only
fn parse_listing(body: &str) -> Result<Vec<ContentEntry>, ProviderError> {
    let items: Vec<ApiEntry> = serde_json::from_str(body)
        .map_err(|e| ProviderError::Network(format!("unexpected listing response: {}", e)))?;

    Ok(items
        .into_iter()
        .filter(|item| item.kind.is_empty() || item.kind == "file")
        .filter_map(|item| {
            let url = item.download_url?;
            Some(ContentEntry::new(item.name, ContentHandle::new(url)))
        })
        .collect())
}
