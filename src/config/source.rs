//! Upstream endpoint settings.

use serde::Deserialize;

use crate::fetcher::parallel::DEFAULT_WORKERS;

pub const DEFAULT_BASE_URL: &str = "https://hacker-news.firebaseio.com/v0";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Root of the API, without the trailing `/topstories.json`
    pub base_url: String,

    /// Per-request timeout in seconds (default: 10)
    pub timeout_secs: u64,

    pub user_agent: String,

    /// Maximum concurrent item requests per page (default: 10)
    pub workers: usize,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
            user_agent: concat!("hnfeed/", env!("CARGO_PKG_VERSION")).to_string(),
            workers: DEFAULT_WORKERS,
        }
    }
}
