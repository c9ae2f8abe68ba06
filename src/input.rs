// src/input.rs
// =============================================================================
// This module classifies one line of user input into a typed reference.
//
// Supported shapes:
//   regex:<pattern>
//   github.com/<owner>/<repo>
//   github.com/<owner>/<repo>/pull/<n>
//   github.com/<owner>/<repo>/issues/<n>
//   github.com/<owner>/<repo>/tree/<branch>[/<path>]
//   github.com/<owner>/<repo>/blob/<branch>/<path>
//
// Anything else is Reference::Invalid. Parsing never fails and never does I/O.
//
// Branch names: the first segment after /tree/ or /blob/ is the whole branch.
// A branch like "feature/x" therefore parses as branch "feature", path "x/...".
//
// Rust concepts:
// - Enums with data: each reference kind carries exactly the fields it needs
// - String slicing: strip_prefix / split_once instead of a regex
// =============================================================================

use serde::Serialize;
use std::fmt;

// An (owner, repo) pair, e.g. ("rust-lang", "rust")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RepoCoordinate {
    pub owner: String,
    pub name: String,
}

impl RepoCoordinate {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RepoCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

// A branch plus a path inside the repository ("" = repository root)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchPath {
    pub branch: String,
    pub path: String,
}

// The flat "kind" view of a reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    Repo,
    Path,
    File,
    PullRequest,
    Issue,
    Regex,
    Invalid,
}

// The "extra" information attached to a reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extra<'a> {
    Text(&'a str),
    Location(&'a BranchPath),
}

// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference {
    /// A whole repository on its default branch
    Repo { repo: RepoCoordinate },
    /// A directory subtree (path may be empty for the root)
    Path { repo: RepoCoordinate, location: BranchPath },
    /// A single file
    File { repo: RepoCoordinate, location: BranchPath },
    /// A pull request; the number is kept as text
    PullRequest { repo: RepoCoordinate, number: String },
    /// An issue; the number is kept as text
    Issue { repo: RepoCoordinate, number: String },
    /// A free-form regex pattern (recognized but not resolved)
    Regex { pattern: String },
    /// The line matched no known shape
    Invalid,
}

impl Reference {
    pub fn kind(&self) -> ReferenceKind {
        match self {
            Reference::Repo { .. } => ReferenceKind::Repo,
            Reference::Path { .. } => ReferenceKind::Path,
            Reference::File { .. } => ReferenceKind::File,
            Reference::PullRequest { .. } => ReferenceKind::PullRequest,
            Reference::Issue { .. } => ReferenceKind::Issue,
            Reference::Regex { .. } => ReferenceKind::Regex,
            Reference::Invalid => ReferenceKind::Invalid,
        }
    }

    pub fn repo(&self) -> Option<&RepoCoordinate> {
        match self {
            Reference::Repo { repo }
            | Reference::Path { repo, .. }
            | Reference::File { repo, .. }
            | Reference::PullRequest { repo, .. }
            | Reference::Issue { repo, .. } => Some(repo),
            Reference::Regex { .. } | Reference::Invalid => None,
        }
    }

    pub fn extra(&self) -> Option<Extra<'_>> {
        match self {
            Reference::Path { location, .. } | Reference::File { location, .. } => {
                Some(Extra::Location(location))
            }
            Reference::PullRequest { number, .. } | Reference::Issue { number, .. } => {
                Some(Extra::Text(number))
            }
            Reference::Regex { pattern } => Some(Extra::Text(pattern)),
            Reference::Repo { .. } | Reference::Invalid => None,
        }
    }
}

const REGEX_PREFIX: &str = "regex:";

// Parses one input line into a Reference
//
// Example:
//   "github.com/o/r/tree/main/sub/dir"
//     -> Reference::Path { repo: o/r, location: { branch: "main", path: "sub/dir" } }
pub fn parse_reference(line: &str) -> Reference {
    let line = line.trim();

    if let Some(pattern) = line.strip_prefix(REGEX_PREFIX) {
        return Reference::Regex {
            pattern: pattern.trim().to_string(),
        };
    }

    // Remove common prefixes, same as a bare "github.com/..." line
    let url = line
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_start_matches("www.");

    let Some(rest) = url.strip_prefix("github.com/") else {
        return Reference::Invalid;
    };

    // owner and repo are the first two segments
    let mut parts = rest.splitn(3, '/');
    let owner = parts.next().unwrap_or_default();
    let name = parts.next().unwrap_or_default();
    let name = strip_query(name);
    let name = name.strip_suffix(".git").unwrap_or(name);
    if owner.is_empty() || name.is_empty() {
        return Reference::Invalid;
    }
    let repo = RepoCoordinate::new(owner, name);

    // Whatever follows "<owner>/<repo>/"; None means nothing followed at all
    let remaining = match parts.next() {
        None => return Reference::Repo { repo },
        Some(remaining) => remaining,
    };
    if strip_query(remaining).is_empty() {
        return Reference::Repo { repo };
    }

    if let Some(tail) = remaining.strip_prefix("pull/") {
        return match parse_number(tail) {
            Some(number) => Reference::PullRequest { repo, number },
            None => Reference::Invalid,
        };
    }
    if let Some(tail) = remaining.strip_prefix("issues/") {
        return match parse_number(tail) {
            Some(number) => Reference::Issue { repo, number },
            None => Reference::Invalid,
        };
    }
    if let Some(tail) = remaining.strip_prefix("tree/") {
        return match split_branch_path(tail) {
            Some(location) => Reference::Path { repo, location },
            None => Reference::Invalid,
        };
    }
    if let Some(tail) = remaining.strip_prefix("blob/") {
        return match split_branch_path(tail) {
            Some(location) if !location.path.is_empty() => Reference::File { repo, location },
            _ => Reference::Invalid,
        };
    }

    Reference::Invalid
}

// Splits a block of pasted text into input lines (trimmed, blanks dropped)
pub fn split_input_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

// Drops a "?query" or "#fragment" suffix
fn strip_query(s: &str) -> &str {
    match s.find(['?', '#']) {
        Some(idx) => &s[..idx],
        None => s,
    }
}

// "42/files" -> Some("42"); "abc" -> None
fn parse_number(tail: &str) -> Option<String> {
    let number = strip_query(tail).split('/').next().unwrap_or_default();
    if !number.is_empty() && number.bytes().all(|b| b.is_ascii_digit()) {
        Some(number.to_string())
    } else {
        None
    }
}

// "main/sub/dir/" -> { branch: "main", path: "sub/dir" }
fn split_branch_path(tail: &str) -> Option<BranchPath> {
    let tail = strip_query(tail);
    let (branch, path) = tail.split_once('/').unwrap_or((tail, ""));
    if branch.is_empty() {
        return None;
    }
    Some(BranchPath {
        branch: branch.to_string(),
        path: path.trim_matches('/').to_string(),
    })
}
