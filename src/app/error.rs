use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    /// The upstream source could not be reached, answered with a non-success
    /// status, or sent a body that is not the expected JSON.
    #[error("Source unavailable ({context}): {reason}")]
    SourceUnavailable { context: String, reason: String },

    #[error("Invalid page size: {0} (expected 1..=50)")]
    InvalidLimit(usize),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl FeedError {
    pub fn source_unavailable(context: impl Into<String>, reason: impl ToString) -> Self {
        Self::SourceUnavailable {
            context: context.into(),
            reason: reason.to_string(),
        }
    }

    pub fn is_source_unavailable(&self) -> bool {
        matches!(self, Self::SourceUnavailable { .. })
    }
}

impl From<reqwest::Error> for FeedError {
    fn from(e: reqwest::Error) -> Self {
        let context = e
            .url()
            .map(|u| u.to_string())
            .unwrap_or_else(|| "request".to_string());
        Self::source_unavailable(context, e)
    }
}

pub type Result<T> = std::result::Result<T, FeedError>;
