// src/config.rs
// =============================================================================
// Runtime configuration for one stitching run.
//
// The CLI builds a Config from flags (with environment fallbacks handled by
// clap) and hands it to GitHubClient::new. Nothing in the pipeline reads the
// environment on its own, so the token only ever travels through here.
// =============================================================================

use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_CONCURRENCY: usize = 4;

#[derive(Clone)]
pub struct Config {
    /// Base URL of the GitHub REST API (or a proxy mirroring its paths)
    pub api_base: String,
    /// Optional personal access token, sent as "Authorization: token ..."
    pub token: Option<String>,
    /// GitHub rejects requests without a User-Agent
    pub user_agent: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// How many input lines are resolved at the same time
    pub concurrency: usize,
}

impl Config {
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            token: None,
            user_agent: format!("codestitch/{}", env!("CARGO_PKG_VERSION")),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

// Hand-written so the token never ends up in logs
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_base", &self.api_base)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .field("concurrency", &self.concurrency)
            .finish()
    }
}
