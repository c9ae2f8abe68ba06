// src/github/fetch.rs
// =============================================================================
// This module fetches content from GitHub through the REST API.
//
// Strategy:
// - One reqwest Client per run, built from Config (base URL, token, timeout)
// - Every call is a GET against {api_base}/repos/{owner}/{repo}/...
// - 404 becomes FetchError::NotFound with a message naming what was missing
// - Other non-2xx responses become FetchError::Api with GitHub's "message"
// - File bodies arrive base64-encoded inside JSON and are decoded here
//
// Why a configurable base URL?
// - A proxy that mirrors the API paths can inject credentials server-side
// - Tests point the client at a local mockito server
//
// Rust concepts:
// - async functions: For network I/O
// - Result: For error handling
// - Traits: GitHubClient implements ContentProvider
// =============================================================================

use std::path::Path;

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::provider::ContentProvider;
use super::types::{
    DirectoryEntry, FileBody, FileContent, Issue, IssueComment, PullRequest, RepoInfo,
};
use crate::config::Config;
use crate::error::FetchError;
use crate::input::RepoCoordinate;

// Files bigger than this are replaced by a placeholder
pub const MAX_FILE_SIZE: u64 = 1_000_000;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp"];
const DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "xls", "xlsx"];

const JSON_MEDIA_TYPE: &str = "application/vnd.github+json";
const DIFF_MEDIA_TYPE: &str = "application/vnd.github.v3.diff";

// Comments are fetched as a single page
const COMMENTS_PER_PAGE: &str = "100";

// Error bodies look like {"message": "Not Found", "documentation_url": "..."}
#[derive(Debug, Deserialize)]
struct ApiMessage {
    message: Option<String>,
}

// The real ContentProvider
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    base: Url,
}

impl GitHubClient {
    // Builds a client from the run configuration
    //
    // Fails if the base URL is unusable or a header value is malformed
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let base = Url::parse(&config.api_base)
            .with_context(|| format!("Invalid API base URL '{}'", config.api_base))?;
        if base.cannot_be_a_base() {
            return Err(anyhow!("API base URL '{}' cannot hold a path", config.api_base));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_MEDIA_TYPE));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent).context("Invalid user agent")?,
        );
        if let Some(token) = &config.token {
            let mut value = HeaderValue::from_str(&format!("token {}", token.trim()))
                .context("GitHub token contains characters not allowed in a header")?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, base })
    }

    // {base}/repos/{owner}/{repo}/{extra...}, each segment percent-encoded
    fn repo_url(&self, repo: &RepoCoordinate, extra: &[&str]) -> Url {
        let mut url = self.base.clone();
        // Checked in new(): the base can always hold path segments
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["repos", repo.owner.as_str(), repo.name.as_str()])
                .extend(extra.iter().flat_map(|part| part.split('/')).filter(|s| !s.is_empty()));
        }
        url
    }

    // {base}/repos/{owner}/{repo}/contents/{path}?ref={branch}
    fn contents_url(&self, repo: &RepoCoordinate, branch: &str, path: &str) -> Url {
        let mut url = self.repo_url(repo, &["contents", path]);
        url.query_pairs_mut().append_pair("ref", branch);
        url
    }

    // Sends a GET and maps error statuses
    //
    // Parameters:
    //   url: the full request URL
    //   accept: overrides the default JSON Accept header when set
    //   not_found: message used when GitHub answers 404
    async fn get(
        &self,
        url: Url,
        accept: Option<&'static str>,
        not_found: &str,
    ) -> Result<Response, FetchError> {
        debug!(url = %url, "GET");
        let mut request = self.client.get(url);
        if let Some(accept) = accept {
            request = request.header(ACCEPT, accept);
        }
        let response = request.send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(not_found.to_string()));
        }
        if !status.is_success() {
            // The body may not even be JSON; fall back to a generic message
            let message = response
                .json::<ApiMessage>()
                .await
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| "Unknown error".to_string());
            return Err(FetchError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl ContentProvider for GitHubClient {
    async fn get_repository(&self, repo: &RepoCoordinate) -> Result<RepoInfo, FetchError> {
        let url = self.repo_url(repo, &[]);
        let response = self.get(url, None, "Repository not found").await?;
        Ok(response.json().await?)
    }

    async fn list_directory(
        &self,
        repo: &RepoCoordinate,
        branch: &str,
        path: &str,
    ) -> Result<Vec<DirectoryEntry>, FetchError> {
        let url = self.contents_url(repo, branch, path);
        let response = self
            .get(url, None, "Repository, branch, or path not found")
            .await?;
        let body: serde_json::Value = response.json().await?;

        // Asking for a file path returns a single object instead of a list
        if body.is_object() {
            return Ok(vec![serde_json::from_value(body)?]);
        }
        Ok(serde_json::from_value(body)?)
    }

    async fn get_file(
        &self,
        repo: &RepoCoordinate,
        branch: &str,
        path: &str,
    ) -> Result<FileBody, FetchError> {
        let url = self.contents_url(repo, branch, path);
        let response = self.get(url, None, "File or branch not found").await?;
        let body: serde_json::Value = response.json().await?;

        if body.is_array() {
            return Err(FetchError::NotAFile(path.to_string()));
        }
        let file: FileContent = serde_json::from_value(body)?;

        if let Some(placeholder) = placeholder_for(path, file.size) {
            return Ok(FileBody::Placeholder(placeholder));
        }
        decode_content(file.content.as_deref().unwrap_or_default()).map(FileBody::Text)
    }

    async fn get_pull_request(
        &self,
        repo: &RepoCoordinate,
        number: &str,
    ) -> Result<PullRequest, FetchError> {
        let url = self.repo_url(repo, &["pulls", number]);
        let response = self.get(url, None, "Pull request not found").await?;
        Ok(response.json().await?)
    }

    async fn get_pull_request_diff(
        &self,
        repo: &RepoCoordinate,
        number: &str,
    ) -> Result<String, FetchError> {
        let url = self.repo_url(repo, &["pulls", number]);
        let response = self
            .get(url, Some(DIFF_MEDIA_TYPE), "Pull request not found")
            .await?;
        Ok(response.text().await?)
    }

    async fn get_issue(&self, repo: &RepoCoordinate, number: &str) -> Result<Issue, FetchError> {
        let url = self.repo_url(repo, &["issues", number]);
        let response = self.get(url, None, "Issue not found").await?;
        Ok(response.json().await?)
    }

    async fn list_issue_comments(
        &self,
        repo: &RepoCoordinate,
        number: &str,
    ) -> Result<Vec<IssueComment>, FetchError> {
        let mut url = self.repo_url(repo, &["issues", number, "comments"]);
        url.query_pairs_mut().append_pair("per_page", COMMENTS_PER_PAGE);
        let response = self.get(url, None, "Issue not found").await?;
        Ok(response.json().await?)
    }
}

// Returns a placeholder for files we don't inline (too big, or binary by
// extension), or None when the file should be decoded
pub fn placeholder_for(path: &str, size: u64) -> Option<String> {
    if size > MAX_FILE_SIZE {
        return Some(format!("File is too large to display (size: {} bytes)", size));
    }

    let extension = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    if IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        Some(format!("[Binary image file: {}]", path))
    } else if DOCUMENT_EXTENSIONS.contains(&extension.as_str()) {
        Some(format!("[Binary document file: {}]", path))
    } else {
        None
    }
}

// Decodes GitHub's base64 payload (which is wrapped with newlines) to UTF-8
fn decode_content(encoded: &str) -> Result<String, FetchError> {
    let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| FetchError::Decode(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| FetchError::Decode(e.to_string()))
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why percent-encode path segments one by one?
//    - A file called "a b#1.md" must reach GitHub as "a%20b%231.md"
//    - Encoding the whole path would also encode the "/" separators
//    - url's path_segments_mut().extend() encodes each segment for us
//
// 2. Why HeaderValue::set_sensitive?
//    - It keeps the token out of Debug output of the request
//
// 3. Why does list_directory accept a single object?
//    - GitHub answers a "contents" request for a file with that file's object
//    - Wrapping it in a Vec lets the walker treat it like a one-entry listing
// -----------------------------------------------------------------------------
