// src/stitch/resolve.rs
// =============================================================================
// One resolver per reference kind.
//
// Every resolver returns a Fragment and never an Err: failures are caught at
// this boundary and rendered as a one-line message in the document.
// Cancellation is not a failure: a resolver stopped by it returns what it
// had built so far, without an error message or the error flag.
//
// - repository: default branch -> root listing -> walker
// - path: listing of {branch, path} -> walker (no default-branch lookup)
// - file: one file, line-filtered, same layout as a walked file
// - pull request: metadata + unified diff as Markdown
// - issue: metadata + first page of comments as Markdown
// =============================================================================

use tracing::{debug, warn};

use super::walker::{file_fragment, walk};
use super::{Fragment, StitchContext};
use crate::error::FetchError;
use crate::github::{Issue, IssueComment, PullRequest};
use crate::input::{BranchPath, RepoCoordinate};

const NO_DESCRIPTION: &str = "*No description provided*";

pub async fn resolve_repo(ctx: StitchContext<'_>, repo: &RepoCoordinate) -> Fragment {
    match walk_repo(ctx, repo).await {
        Ok(fragment) => fragment,
        Err(FetchError::Cancelled) => cancelled(repo),
        Err(e) => {
            warn!(%repo, error = %e, "repository failed");
            Fragment::error(format!("Error processing repository: {}\n", e))
        }
    }
}

async fn walk_repo(ctx: StitchContext<'_>, repo: &RepoCoordinate) -> Result<Fragment, FetchError> {
    ctx.ensure_active()?;
    let info = ctx.provider.get_repository(repo).await?;
    ctx.ensure_active()?;
    let entries = ctx
        .provider
        .list_directory(repo, &info.default_branch, "")
        .await?;
    Ok(walk(ctx, repo, &info.default_branch, entries).await)
}

pub async fn resolve_path(
    ctx: StitchContext<'_>,
    repo: &RepoCoordinate,
    location: &BranchPath,
) -> Fragment {
    let BranchPath { branch, path } = location;
    let listing = match ctx.ensure_active() {
        Ok(()) => ctx.provider.list_directory(repo, branch, path).await,
        Err(e) => Err(e),
    };

    match listing {
        Ok(entries) => walk(ctx, repo, branch, entries).await,
        Err(FetchError::Cancelled) => cancelled(repo),
        Err(e) if e.is_not_found() => Fragment::error(format!(
            "Error: Path '{}' not found in branch '{}'. Please check the path and branch name are correct.\n",
            path, branch
        )),
        Err(e) => {
            warn!(%repo, branch = %branch, path = %path, error = %e, "path failed");
            Fragment::error(format!(
                "Error processing path '{}' on branch '{}': {}\n",
                path, branch, e
            ))
        }
    }
}

pub async fn resolve_file(
    ctx: StitchContext<'_>,
    repo: &RepoCoordinate,
    location: &BranchPath,
) -> Fragment {
    match file_fragment(ctx, repo, &location.branch, &location.path).await {
        Ok(fragment) => fragment,
        Err(FetchError::Cancelled) => cancelled(repo),
        Err(e) => {
            warn!(%repo, path = %location.path, error = %e, "file failed");
            Fragment::error(format!(
                "Error processing file '{}': {}\n",
                location.path, e
            ))
        }
    }
}

pub async fn resolve_pull_request(
    ctx: StitchContext<'_>,
    repo: &RepoCoordinate,
    number: &str,
) -> Fragment {
    let fetched = async {
        ctx.ensure_active()?;
        let pr = ctx.provider.get_pull_request(repo, number).await?;
        ctx.ensure_active()?;
        let diff = ctx.provider.get_pull_request_diff(repo, number).await?;
        Ok::<_, FetchError>((pr, diff))
    }
    .await;

    match fetched {
        Ok((pr, diff)) => Fragment::ok(format_pull_request(number, &pr, &diff)),
        // Half a pull request (metadata without its diff) is not rendered
        Err(FetchError::Cancelled) => cancelled(repo),
        Err(e) => {
            warn!(%repo, number, error = %e, "pull request failed");
            Fragment::error(format!("Error processing pull request: {}\n", e))
        }
    }
}

pub async fn resolve_issue(ctx: StitchContext<'_>, repo: &RepoCoordinate, number: &str) -> Fragment {
    let issue = match ctx.ensure_active() {
        Ok(()) => ctx.provider.get_issue(repo, number).await,
        Err(e) => Err(e),
    };
    let issue = match issue {
        Ok(issue) => issue,
        Err(FetchError::Cancelled) => return cancelled(repo),
        Err(e) => {
            warn!(%repo, number, error = %e, "issue failed");
            return Fragment::error(format!("Error processing issue: {}\n", e));
        }
    };

    let mut fragment = Fragment::ok(format_issue_header(&issue));

    let comments = match ctx.ensure_active() {
        Ok(()) => ctx.provider.list_issue_comments(repo, number).await,
        Err(e) => Err(e),
    };
    match comments {
        Ok(comments) => fragment.push_str(&format_comments(&comments)),
        Err(FetchError::Cancelled) => {
            debug!(%repo, number, "cancelled before comments; keeping the issue");
        }
        Err(e) => {
            // The issue itself is still worth keeping
            warn!(%repo, number, error = %e, "issue comments failed");
            fragment.push_error(&format!("*Comments could not be loaded: {}*\n\n", e));
        }
    }

    fragment
}

fn cancelled(repo: &RepoCoordinate) -> Fragment {
    debug!(%repo, "resolver cancelled");
    Fragment::new()
}

// None, empty or whitespace-only bodies read as "no description"
fn body_or_placeholder(body: Option<&str>) -> &str {
    match body {
        Some(body) if !body.trim().is_empty() => body,
        _ => NO_DESCRIPTION,
    }
}

fn format_pull_request(number: &str, pr: &PullRequest, diff: &str) -> String {
    format!(
        "# Pull Request #{number}: {title}\n\
         **Author:** {author}  \n\
         **Created:** {created}  \n\
         **State:** {state}  \n\
         **Base:** {base} ← **Head:** {head}  \n\n\
         ## Description\n\n\
         {body}\n\n\
         ## Changes\n\n\
         ```diff\n\
         {diff}\n\
         ```\n",
        title = pr.title,
        author = pr.user.login,
        created = pr.created_at,
        state = pr.state,
        base = pr.base.name,
        head = pr.head.name,
        body = body_or_placeholder(pr.body.as_deref()),
        diff = diff.trim_end_matches('\n'),
    )
}

fn format_issue_header(issue: &Issue) -> String {
    format!(
        "# {title}\n\
         **Author:** {author}  \n\
         **Created:** {created}  \n\
         **State:** {state}  \n\n\
         ## Original Post\n\n\
         {body}\n\n\
         ---\n\n\
         ## Comments\n\n",
        title = issue.title,
        author = issue.user.login,
        created = issue.created_at,
        state = issue.state,
        body = body_or_placeholder(issue.body.as_deref()),
    )
}

fn format_comments(comments: &[IssueComment]) -> String {
    comments
        .iter()
        .map(|comment| {
            format!(
                "### {} - {}\n\n{}\n\n---\n\n",
                comment.user.login,
                comment.created_at,
                comment.body.as_deref().unwrap_or_default()
            )
        })
        .collect()
}
