// src/stitch/mod.rs
// =============================================================================
// This module turns parsed references into one stitched text document.
//
// Submodules:
// - fragment: a piece of output text plus "did anything fail" flag
// - walker: depth-first traversal of a directory listing
// - resolve: one resolver per reference kind (repo, path, file, PR, issue)
// - aggregate: Stitcher, which runs every input line and concatenates results
//
// Errors never escape a resolver. They are written into the document inline
// and flip the fragment's had_errors flag instead.
//
// Rust concepts:
// - Borrowed trait objects: &dyn ContentProvider lets tests swap the backend
// - Copy structs of references: StitchContext is passed by value everywhere
// =============================================================================

mod aggregate;
mod fragment;
mod resolve;
mod walker;

pub use aggregate::{AggregationResult, Stitcher, CANCELLED_MARKER};
pub use fragment::Fragment;
pub use resolve::{resolve_file, resolve_issue, resolve_path, resolve_pull_request, resolve_repo};
pub use walker::walk;

use tokio_util::sync::CancellationToken;

use crate::error::FetchError;
use crate::filter::PatternFilter;
use crate::github::ContentProvider;

// Everything a resolver needs for one run
#[derive(Clone, Copy)]
pub struct StitchContext<'a> {
    pub provider: &'a dyn ContentProvider,
    pub file_filter: &'a PatternFilter,
    pub line_filter: &'a PatternFilter,
    pub cancel: &'a CancellationToken,
}

impl StitchContext<'_> {
    // Call before issuing a fetch; once cancelled no new request goes out
    pub fn ensure_active(&self) -> Result<(), FetchError> {
        if self.cancel.is_cancelled() {
            Err(FetchError::Cancelled)
        } else {
            Ok(())
        }
    }
}
