use serde::{Deserialize, Serialize};

use crate::app::{FeedError, Result};
use crate::domain::Item;

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const MAX_PAGE_SIZE: usize = 50;

/// A request for one page of the ranked feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub cursor: Option<usize>,
}

fn default_limit() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_SIZE,
            cursor: None,
        }
    }
}

impl PageRequest {
    pub fn new(limit: usize, cursor: Option<usize>) -> Result<Self> {
        let request = Self { limit, cursor };
        request.validate()?;
        Ok(request)
    }

    pub fn validate(&self) -> Result<()> {
        if (1..=MAX_PAGE_SIZE).contains(&self.limit) {
            Ok(())
        } else {
            Err(FeedError::InvalidLimit(self.limit))
        }
    }

    pub fn skip(&self) -> usize {
        self.cursor.unwrap_or(0)
    }
}

/// One assembled page. `next_cursor` is the only signal of exhaustion; a short
/// page can still be followed by more data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub stories: Vec<Item>,
    pub next_cursor: Option<usize>,
}

impl Page {
    pub fn empty() -> Self {
        Self {
            stories: Vec::new(),
            next_cursor: None,
        }
    }

    pub fn is_last(&self) -> bool {
        self.next_cursor.is_none()
    }
}
