// src/stitch/walker.rs
// =============================================================================
// Depth-first walk over a directory listing.
//
// How it works:
// 1. Push the listing onto a stack in reverse, so the first entry is on top
// 2. Pop an entry
//    - directory: list it and push its children (again reversed)
//    - file: apply the file filter, fetch it, apply the line filter, render
// 3. Repeat until the stack is empty or the run is cancelled
//
// The result is the same pre-order a recursive walk would give, in exactly
// the order the provider listed things, without growing the call stack on
// deep trees.
//
// A failing file or directory only replaces its own output with an inline
// error; its siblings are still processed.
// =============================================================================

use tracing::{debug, warn};

use super::{Fragment, StitchContext};
use crate::error::FetchError;
use crate::filter::PatternFilter;
use crate::github::{DirectoryEntry, EntryKind, FileBody};
use crate::input::RepoCoordinate;

// Walks `entries` (and everything below them) on `branch`
pub async fn walk(
    ctx: StitchContext<'_>,
    repo: &RepoCoordinate,
    branch: &str,
    entries: Vec<DirectoryEntry>,
) -> Fragment {
    let mut output = Fragment::new();

    // Top of the stack = next entry in listing order
    let mut pending: Vec<DirectoryEntry> = entries.into_iter().rev().collect();

    while let Some(entry) = pending.pop() {
        if ctx.cancel.is_cancelled() {
            debug!(remaining = pending.len() + 1, "walk cancelled");
            break;
        }

        match entry.kind {
            EntryKind::Dir => match ctx.provider.list_directory(repo, branch, &entry.path).await {
                Ok(children) => pending.extend(children.into_iter().rev()),
                Err(FetchError::Cancelled) => break,
                Err(e) => {
                    warn!(path = %entry.path, error = %e, "directory listing failed");
                    output.push_error(&format!(
                        "\nError processing directory {}: {}\n",
                        entry.path, e
                    ));
                }
            },
            EntryKind::File => {
                if !ctx.file_filter.keeps(&entry.path) {
                    debug!(path = %entry.path, "excluded by file filter");
                    continue;
                }
                match file_fragment(ctx, repo, branch, &entry.path).await {
                    Ok(fragment) => output.append(fragment),
                    Err(FetchError::Cancelled) => break,
                    Err(e) => {
                        warn!(path = %entry.path, error = %e, "file fetch failed");
                        output.push_error(&format!("\nError processing {}: {}\n", entry.path, e));
                    }
                }
            }
            EntryKind::Other => debug!(path = %entry.path, "skipping symlink or submodule"),
        }
    }

    output
}

// Fetches one file and renders it as "\n--- <path> ---\n\n<lines>\n"
//
// Undecodable files are rendered with an explanatory body instead of failing;
// that counts as content, not as an error.
pub(crate) async fn file_fragment(
    ctx: StitchContext<'_>,
    repo: &RepoCoordinate,
    branch: &str,
    path: &str,
) -> Result<Fragment, FetchError> {
    ctx.ensure_active()?;

    let body = match ctx.provider.get_file(repo, branch, path).await {
        Ok(FileBody::Text(text)) => filter_lines(&text, ctx.line_filter),
        Ok(FileBody::Placeholder(placeholder)) => placeholder,
        Err(FetchError::Decode(message)) => {
            warn!(path, %message, "file is not valid text");
            format!("Error decoding content: {}", message)
        }
        Err(e) => return Err(e),
    };

    Ok(Fragment::ok(format!("\n--- {} ---\n\n{}\n", path, body)))
}

// Keeps the lines the line filter lets through, joined back with '\n'
fn filter_lines(text: &str, filter: &PatternFilter) -> String {
    if filter.is_empty() {
        return text.to_string();
    }
    text.split('\n')
        .filter(|line| filter.keeps(line))
        .collect::<Vec<_>>()
        .join("\n")
}
