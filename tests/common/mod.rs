// tests/common/mod.rs
// An in-memory ContentProvider with canned responses, failures and delays.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use codestitch::github::{
    DirectoryEntry, FileBody, GitRef, Issue, IssueComment, PullRequest, RepoInfo, User,
};
use codestitch::{ContentProvider, FetchError, RepoCoordinate};
use tokio_util::sync::CancellationToken;

// FetchError is not Clone, so canned failures are stored in this form
#[derive(Debug, Clone)]
pub enum Failure {
    NotFound(&'static str),
    Api(u16, &'static str),
    Decode(&'static str),
    Timeout,
}

impl Failure {
    fn to_error(&self) -> FetchError {
        match self {
            Failure::NotFound(message) => FetchError::NotFound(message.to_string()),
            Failure::Api(status, message) => FetchError::Api {
                status: *status,
                message: message.to_string(),
            },
            Failure::Decode(message) => FetchError::Decode(message.to_string()),
            Failure::Timeout => FetchError::Timeout,
        }
    }
}

type Key = (String, String, String);

fn key(repo: &RepoCoordinate, branch: &str, path: &str) -> Key {
    (repo.to_string(), branch.to_string(), path.to_string())
}

#[derive(Default)]
pub struct FakeProvider {
    repos: HashMap<String, String>,
    dirs: HashMap<Key, Result<Vec<DirectoryEntry>, Failure>>,
    files: HashMap<Key, Result<FileBody, Failure>>,
    file_delays: HashMap<String, Duration>,
    pulls: HashMap<(String, String), (PullRequest, String)>,
    issues: HashMap<(String, String), Issue>,
    comments: HashMap<(String, String), Result<Vec<IssueComment>, Failure>>,
    cancel_on_file: Option<(String, CancellationToken)>,
    cancel_on_call: Option<(String, CancellationToken)>,
    calls: Mutex<Vec<String>>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_repo(mut self, repo: &str, default_branch: &str) -> Self {
        self.repos.insert(repo.to_string(), default_branch.to_string());
        self
    }

    pub fn with_dir(mut self, repo: &str, branch: &str, path: &str, entries: Vec<DirectoryEntry>) -> Self {
        self.dirs.insert(
            (repo.to_string(), branch.to_string(), path.to_string()),
            Ok(entries),
        );
        self
    }

    pub fn with_dir_failure(mut self, repo: &str, branch: &str, path: &str, failure: Failure) -> Self {
        self.dirs.insert(
            (repo.to_string(), branch.to_string(), path.to_string()),
            Err(failure),
        );
        self
    }

    pub fn with_file(mut self, repo: &str, branch: &str, path: &str, text: &str) -> Self {
        self.files.insert(
            (repo.to_string(), branch.to_string(), path.to_string()),
            Ok(FileBody::Text(text.to_string())),
        );
        self
    }

    pub fn with_placeholder(mut self, repo: &str, branch: &str, path: &str, text: &str) -> Self {
        self.files.insert(
            (repo.to_string(), branch.to_string(), path.to_string()),
            Ok(FileBody::Placeholder(text.to_string())),
        );
        self
    }

    pub fn with_file_failure(mut self, repo: &str, branch: &str, path: &str, failure: Failure) -> Self {
        self.files.insert(
            (repo.to_string(), branch.to_string(), path.to_string()),
            Err(failure),
        );
        self
    }

    // Delays every get_file for `path`, to shuffle completion order
    pub fn with_file_delay(mut self, path: &str, delay: Duration) -> Self {
        self.file_delays.insert(path.to_string(), delay);
        self
    }

    // Fires `token` when `path` is fetched, simulating Ctrl-C mid-walk
    pub fn cancel_when_fetching(mut self, path: &str, token: CancellationToken) -> Self {
        self.cancel_on_file = Some((path.to_string(), token));
        self
    }

    // Fires `token` inside the named provider method, which still succeeds
    pub fn cancel_during(mut self, method: &str, token: CancellationToken) -> Self {
        self.cancel_on_call = Some((method.to_string(), token));
        self
    }

    pub fn with_pull_request(mut self, repo: &str, number: &str, pr: PullRequest, diff: &str) -> Self {
        self.pulls
            .insert((repo.to_string(), number.to_string()), (pr, diff.to_string()));
        self
    }

    pub fn with_issue(mut self, repo: &str, number: &str, issue: Issue, comments: Vec<IssueComment>) -> Self {
        self.issues.insert((repo.to_string(), number.to_string()), issue);
        self.comments
            .insert((repo.to_string(), number.to_string()), Ok(comments));
        self
    }

    pub fn with_comments_failure(mut self, repo: &str, number: &str, failure: Failure) -> Self {
        self.comments
            .insert((repo.to_string(), number.to_string()), Err(failure));
        self
    }

    // Every call made so far, e.g. "get_file acme/widgets main a.txt"
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        if let Some((method, token)) = &self.cancel_on_call {
            if call.split_whitespace().next() == Some(method.as_str()) {
                token.cancel();
            }
        }
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ContentProvider for FakeProvider {
    async fn get_repository(&self, repo: &RepoCoordinate) -> Result<RepoInfo, FetchError> {
        self.record(format!("get_repository {}", repo));
        match self.repos.get(&repo.to_string()) {
            Some(branch) => Ok(RepoInfo {
                default_branch: branch.clone(),
            }),
            None => Err(FetchError::NotFound("Repository not found".to_string())),
        }
    }

    async fn list_directory(
        &self,
        repo: &RepoCoordinate,
        branch: &str,
        path: &str,
    ) -> Result<Vec<DirectoryEntry>, FetchError> {
        self.record(format!("list_directory {} {} {}", repo, branch, path));
        match self.dirs.get(&key(repo, branch, path)) {
            Some(Ok(entries)) => Ok(entries.clone()),
            Some(Err(failure)) => Err(failure.to_error()),
            None => Err(FetchError::NotFound(
                "Repository, branch, or path not found".to_string(),
            )),
        }
    }

    async fn get_file(
        &self,
        repo: &RepoCoordinate,
        branch: &str,
        path: &str,
    ) -> Result<FileBody, FetchError> {
        self.record(format!("get_file {} {} {}", repo, branch, path));
        if let Some((cancel_path, token)) = &self.cancel_on_file {
            if cancel_path == path {
                token.cancel();
            }
        }
        if let Some(delay) = self.file_delays.get(path) {
            tokio::time::sleep(*delay).await;
        }
        match self.files.get(&key(repo, branch, path)) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(failure)) => Err(failure.to_error()),
            None => Err(FetchError::NotFound("File or branch not found".to_string())),
        }
    }

    async fn get_pull_request(
        &self,
        repo: &RepoCoordinate,
        number: &str,
    ) -> Result<PullRequest, FetchError> {
        self.record(format!("get_pull_request {} {}", repo, number));
        self.pulls
            .get(&(repo.to_string(), number.to_string()))
            .map(|(pr, _)| pr.clone())
            .ok_or_else(|| FetchError::NotFound("Pull request not found".to_string()))
    }

    async fn get_pull_request_diff(
        &self,
        repo: &RepoCoordinate,
        number: &str,
    ) -> Result<String, FetchError> {
        self.record(format!("get_pull_request_diff {} {}", repo, number));
        self.pulls
            .get(&(repo.to_string(), number.to_string()))
            .map(|(_, diff)| diff.clone())
            .ok_or_else(|| FetchError::NotFound("Pull request not found".to_string()))
    }

    async fn get_issue(&self, repo: &RepoCoordinate, number: &str) -> Result<Issue, FetchError> {
        self.record(format!("get_issue {} {}", repo, number));
        self.issues
            .get(&(repo.to_string(), number.to_string()))
            .cloned()
            .ok_or_else(|| FetchError::NotFound("Issue not found".to_string()))
    }

    async fn list_issue_comments(
        &self,
        repo: &RepoCoordinate,
        number: &str,
    ) -> Result<Vec<IssueComment>, FetchError> {
        self.record(format!("list_issue_comments {} {}", repo, number));
        match self.comments.get(&(repo.to_string(), number.to_string())) {
            Some(Ok(comments)) => Ok(comments.clone()),
            Some(Err(failure)) => Err(failure.to_error()),
            None => Ok(Vec::new()),
        }
    }
}

pub fn user(login: &str) -> User {
    User {
        login: login.to_string(),
    }
}

pub fn pull_request(title: &str, body: Option<&str>) -> PullRequest {
    PullRequest {
        title: title.to_string(),
        user: user("octocat"),
        created_at: "2024-03-01T12:00:00Z".to_string(),
        state: "open".to_string(),
        base: GitRef {
            name: "main".to_string(),
        },
        head: GitRef {
            name: "feature".to_string(),
        },
        body: body.map(str::to_string),
    }
}

pub fn issue(title: &str, body: Option<&str>) -> Issue {
    Issue {
        title: title.to_string(),
        user: user("reporter"),
        created_at: "2024-02-01T08:00:00Z".to_string(),
        state: "closed".to_string(),
        body: body.map(str::to_string),
    }
}

pub fn comment(login: &str, created_at: &str, body: &str) -> IssueComment {
    IssueComment {
        user: user(login),
        created_at: created_at.to_string(),
        body: Some(body.to_string()),
    }
}
