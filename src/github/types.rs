// src/github/types.rs
// =============================================================================
// Shapes of the GitHub REST API responses we read, plus the provider-level
// types the rest of the pipeline sees.
//
// Only the fields we actually render are declared; serde ignores the rest.
// =============================================================================

use serde::{Deserialize, Serialize};

// GET /repos/{owner}/{repo}
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RepoInfo {
    pub default_branch: String,
}

// What kind of thing a directory entry is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Dir,
    /// Symlinks and submodules; the walker skips these
    #[serde(other)]
    Other,
}

// One item of GET /repos/{owner}/{repo}/contents/{path}
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DirectoryEntry {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

impl DirectoryEntry {
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::File,
        }
    }

    pub fn dir(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Dir,
        }
    }
}

// The contents endpoint for a single file
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct FileContent {
    pub size: u64,
    #[serde(default)]
    pub content: Option<String>,
}

// A decoded file, or a placeholder standing in for one we won't show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileBody {
    Text(String),
    Placeholder(String),
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct User {
    pub login: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GitRef {
    #[serde(rename = "ref")]
    pub name: String,
}

// GET /repos/{owner}/{repo}/pulls/{n}
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PullRequest {
    pub title: String,
    pub user: User,
    pub created_at: String,
    pub state: String,
    pub base: GitRef,
    pub head: GitRef,
    #[serde(default)]
    pub body: Option<String>,
}

// GET /repos/{owner}/{repo}/issues/{n}
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Issue {
    pub title: String,
    pub user: User,
    pub created_at: String,
    pub state: String,
    #[serde(default)]
    pub body: Option<String>,
}

// One item of GET /repos/{owner}/{repo}/issues/{n}/comments
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IssueComment {
    pub user: User,
    pub created_at: String,
    #[serde(default)]
    pub body: Option<String>,
}
