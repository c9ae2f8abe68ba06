// src/github/mod.rs
// =============================================================================
// This module is the content-fetch boundary: everything that talks to GitHub.
//
// Submodules:
// - provider: the ContentProvider trait the pipeline depends on
// - fetch: GitHubClient, the REST API implementation of that trait
// - types: API response shapes and the FileBody / DirectoryEntry types
//
// Rust concepts:
// - Modules: Organizing related functionality
// - Public API: What other parts of the app can use
// =============================================================================

mod fetch;
mod provider;
mod types;

// Re-export so callers can write `github::GitHubClient`
pub use fetch::{placeholder_for, GitHubClient, MAX_FILE_SIZE};
pub use provider::ContentProvider;
pub use types::{
    DirectoryEntry, EntryKind, FileBody, GitRef, Issue, IssueComment, PullRequest, RepoInfo,
    User,
};
