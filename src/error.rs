// src/error.rs
// =============================================================================
// Typed errors for the stitching pipeline.
//
// Two families:
// - FetchError: anything the content provider can fail with (404s, API
//   errors, undecodable files, timeouts, transport problems)
// - FilterError: a filter pattern that is not a valid regex
//
// The application edge (main.rs, cli.rs) still uses anyhow::Result; these
// enums exist so resolvers can tell a "not found" apart from other failures
// and render the right inline message.
//
// Rust concepts:
// - thiserror: derive Display and Error for enums
// - #[from]: automatic conversion so the ? operator works
// =============================================================================

use thiserror::Error;

// Everything a ContentProvider call can fail with
#[derive(Debug, Error)]
pub enum FetchError {
    /// The repository, branch, path, file, PR or issue does not exist (HTTP 404)
    #[error("{0}")]
    NotFound(String),

    /// Any other non-2xx response from the API
    #[error("GitHub API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// File bytes could not be turned into text
    #[error("{0}")]
    Decode(String),

    /// A directory listing came back where a single file was expected
    #[error("'{0}' is not a file")]
    NotAFile(String),

    /// The request took longer than the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// The run was cancelled before this fetch was issued
    #[error("Cancelled")]
    Cancelled,

    /// Connection, TLS or other transport failure
    #[error("Request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The response body was not the JSON shape we expected
    #[error("Unexpected response body: {0}")]
    Json(#[from] serde_json::Error),
}

impl FetchError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::NotFound(_))
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        // Timeouts are reported separately so they read as transient
        if error.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Transport(error)
        }
    }
}

// A filter pattern failed to compile
#[derive(Debug, Error)]
#[error("Invalid filter pattern '{pattern}': {source}")]
pub struct FilterError {
    pub pattern: String,
    #[source]
    pub source: regex::Error,
}
