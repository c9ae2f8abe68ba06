// src/github/provider.rs
// =============================================================================
// The content-fetch boundary.
//
// The stitching pipeline never talks HTTP itself. It asks a ContentProvider
// for repository metadata, directory listings, files, pull requests and
// issues. GitHubClient is the real implementation; tests plug in an
// in-memory one.
// =============================================================================

use async_trait::async_trait;

use super::types::{DirectoryEntry, FileBody, Issue, IssueComment, PullRequest, RepoInfo};
use crate::error::FetchError;
use crate::input::RepoCoordinate;

#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Repository metadata (we only need the default branch)
    async fn get_repository(&self, repo: &RepoCoordinate) -> Result<RepoInfo, FetchError>;

    /// One level of a directory; an empty path means the repository root
    async fn list_directory(
        &self,
        repo: &RepoCoordinate,
        branch: &str,
        path: &str,
    ) -> Result<Vec<DirectoryEntry>, FetchError>;

    /// A single file, decoded to text or replaced by a placeholder
    async fn get_file(
        &self,
        repo: &RepoCoordinate,
        branch: &str,
        path: &str,
    ) -> Result<FileBody, FetchError>;

    async fn get_pull_request(
        &self,
        repo: &RepoCoordinate,
        number: &str,
    ) -> Result<PullRequest, FetchError>;

    /// The pull request as a unified diff
    async fn get_pull_request_diff(
        &self,
        repo: &RepoCoordinate,
        number: &str,
    ) -> Result<String, FetchError>;

    async fn get_issue(&self, repo: &RepoCoordinate, number: &str) -> Result<Issue, FetchError>;

    /// First page of comments only
    async fn list_issue_comments(
        &self,
        repo: &RepoCoordinate,
        number: &str,
    ) -> Result<Vec<IssueComment>, FetchError>;
}
