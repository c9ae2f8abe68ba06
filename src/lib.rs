// src/lib.rs
// =============================================================================
// codestitch: turn a list of GitHub references into one filtered document.
//
// Data flow:
//   input lines -> input::parse_reference -> stitch::Stitcher
//     -> resolvers (+ github::ContentProvider, filter::PatternFilter, walker)
//     -> AggregationResult { document, had_errors, cancelled }
//
// The binary (src/main.rs) is a thin wrapper around this library.
// =============================================================================

pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod github;
pub mod input;
pub mod output;
pub mod stitch;

pub use config::Config;
pub use error::{FetchError, FilterError};
pub use filter::{FilterMode, FilterSpec, PatternFilter};
pub use github::{ContentProvider, GitHubClient};
pub use input::{parse_reference, Reference, ReferenceKind, RepoCoordinate};
pub use stitch::{AggregationResult, Stitcher};
