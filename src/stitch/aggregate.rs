// src/stitch/aggregate.rs
// =============================================================================
// The Stitcher: runs every input line and concatenates the results.
//
// For each line, in input order:
// - Invalid -> "\nInvalid input: <line>\n" (counts as an error)
// - otherwise "\n--- Content from <line> ---\n" followed by the resolver's
//   fragment
//
// Lines are independent, so several are resolved at once (up to
// `concurrency`). The stream is buffered in order, so the document always
// lists sections in the order the lines were given.
//
// Cancellation: once the token fires no new fetch starts, lines that never
// started are dropped, and the document ends with CANCELLED_MARKER.
//
// Rust concepts:
// - Streams: futures::stream::iter + buffered(n) for bounded, ordered concurrency
// - Builder-style methods: with_filters / with_concurrency / with_cancellation
// =============================================================================

use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::resolve::{resolve_file, resolve_issue, resolve_path, resolve_pull_request, resolve_repo};
use super::{Fragment, StitchContext};
use crate::config::DEFAULT_CONCURRENCY;
use crate::filter::PatternFilter;
use crate::github::ContentProvider;
use crate::input::{parse_reference, Reference};

pub const CANCELLED_MARKER: &str = "\n--- Cancelled: output is incomplete ---\n";

// The final output handed back to the caller
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationResult {
    /// Every section, concatenated in input order
    pub document: String,
    /// True if any line was invalid or any fetch was replaced by an error
    pub had_errors: bool,
    /// True if the run was stopped before every line finished
    pub cancelled: bool,
}

pub struct Stitcher<'a> {
    provider: &'a dyn ContentProvider,
    file_filter: PatternFilter,
    line_filter: PatternFilter,
    concurrency: usize,
    cancel: CancellationToken,
}

impl<'a> Stitcher<'a> {
    pub fn new(provider: &'a dyn ContentProvider) -> Self {
        Self {
            provider,
            file_filter: PatternFilter::allow_all(),
            line_filter: PatternFilter::allow_all(),
            concurrency: DEFAULT_CONCURRENCY,
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_filters(mut self, file_filter: PatternFilter, line_filter: PatternFilter) -> Self {
        self.file_filter = file_filter;
        self.line_filter = line_filter;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    fn context(&self) -> StitchContext<'_> {
        StitchContext {
            provider: self.provider,
            file_filter: &self.file_filter,
            line_filter: &self.line_filter,
            cancel: &self.cancel,
        }
    }

    // Resolves every line and stitches the sections together
    //
    // Lines are trimmed; blank lines are ignored.
    pub async fn process<S: AsRef<str>>(&self, lines: &[S]) -> AggregationResult {
        let lines: Vec<&str> = lines
            .iter()
            .map(|line| line.as_ref().trim())
            .filter(|line| !line.is_empty())
            .collect();

        let sections: Vec<Option<Fragment>> = stream::iter(lines.iter().copied())
            .map(|line| self.process_line(line))
            .buffered(self.concurrency)
            .collect()
            .await;

        let mut result = AggregationResult::default();
        for section in sections.into_iter().flatten() {
            result.document.push_str(&section.text);
            result.had_errors |= section.had_errors;
        }

        if self.cancel.is_cancelled() {
            warn!("run cancelled; output is incomplete");
            result.cancelled = true;
            result.document.push_str(CANCELLED_MARKER);
        }

        result
    }

    // One line -> one section; None if the run was cancelled before it started
    async fn process_line(&self, line: &str) -> Option<Fragment> {
        if self.cancel.is_cancelled() {
            return None;
        }

        let ctx = self.context();
        let reference = parse_reference(line);
        info!(line, kind = ?reference.kind(), "resolving input");

        let body = match &reference {
            Reference::Invalid => {
                warn!(line, "invalid input");
                return Some(Fragment::error(format!("\nInvalid input: {}\n", line)));
            }
            Reference::Regex { pattern } => Fragment::ok(format!(
                "Regex search is not implemented; pattern '{}' was not resolved.\n",
                pattern
            )),
            Reference::Repo { repo } => resolve_repo(ctx, repo).await,
            Reference::Path { repo, location } => resolve_path(ctx, repo, location).await,
            Reference::File { repo, location } => resolve_file(ctx, repo, location).await,
            Reference::PullRequest { repo, number } => {
                resolve_pull_request(ctx, repo, number).await
            }
            Reference::Issue { repo, number } => resolve_issue(ctx, repo, number).await,
        };

        let mut section = Fragment::ok(format!("\n--- Content from {} ---\n", line));
        section.append(body);
        Some(section)
    }
}
