use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of record published by the upstream source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Job,
    Story,
    Comment,
    Poll,
    #[serde(rename = "pollopt")]
    PollOption,
}

/// One upstream record, in the permissive shape the feed understands.
///
/// Field names on the wire are the provider's; unknown fields are ignored and
/// absent ones stay `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<ItemType>,
    #[serde(rename = "by", default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(rename = "time", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(rename = "dead", default, skip_serializing_if = "Option::is_none")]
    pub is_dead: Option<bool>,
    #[serde(rename = "deleted", default, skip_serializing_if = "Option::is_none")]
    pub is_deleted: Option<bool>,
    #[serde(rename = "parent", default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<u64>,
    #[serde(rename = "poll", default, skip_serializing_if = "Option::is_none")]
    pub poll_id: Option<u64>,
    #[serde(rename = "kids", default, skip_serializing_if = "Option::is_none")]
    pub child_ids: Option<Vec<u64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "parts", default, skip_serializing_if = "Option::is_none")]
    pub part_ids: Option<Vec<u64>>,
    #[serde(rename = "descendants", default, skip_serializing_if = "Option::is_none")]
    pub descendant_count: Option<u64>,
}

impl Item {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            item_type: None,
            author: None,
            created_at: None,
            text: None,
            is_dead: None,
            is_deleted: None,
            parent_id: None,
            poll_id: None,
            child_ids: None,
            url: None,
            score: None,
            title: None,
            part_ids: None,
            descendant_count: None,
        }
    }

    /// Parse an untyped upstream record. `None` when the value does not match
    /// the item schema (including a JSON `null` for unknown ids).
    pub fn parse(raw: &serde_json::Value) -> Option<Self> {
        match Self::deserialize(raw) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::debug!("Dropping malformed item: {}", e);
                None
            }
        }
    }

    /// A story with a non-empty title that has not been killed or deleted.
    pub fn is_displayable_story(&self) -> bool {
        self.item_type == Some(ItemType::Story)
            && self.title.as_deref().is_some_and(|t| !t.is_empty())
            && !self.is_dead.unwrap_or(false)
            && !self.is_deleted.unwrap_or(false)
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("(Untitled)")
    }

    /// Host of the linked URL without a leading `www.`
    pub fn domain(&self) -> Option<String> {
        let url = url::Url::parse(self.url.as_deref()?).ok()?;
        let host = url.host_str()?;
        Some(host.strip_prefix("www.").unwrap_or(host).to_string())
    }

    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.created_at?, 0)
    }

    /// Relative age such as "3 hours ago", empty when the time is unknown.
    pub fn age(&self, now: DateTime<Utc>) -> String {
        match self.published_at() {
            Some(published) => format_age(now.signed_duration_since(published).num_seconds()),
            None => String::new(),
        }
    }

    pub fn score_or_zero(&self) -> u64 {
        self.score.unwrap_or(0)
    }

    pub fn comment_count(&self) -> u64 {
        self.descendant_count.unwrap_or(0)
    }
}

/// Units are rounded to the nearest whole value, so 3h50m reads "4 hours ago"
/// and 45 minutes already counts as an hour.
fn format_age(secs: i64) -> String {
    // in minutes
    const HOUR: i64 = 60;
    const DAY: i64 = 24 * HOUR;
    const MONTH: i64 = 30 * DAY;
    const YEAR: i64 = 365 * DAY;

    let secs = secs.max(0);
    if secs < 30 {
        return "less than a minute ago".to_string();
    }

    let minutes = round_div(secs, 60);
    let (n, unit) = if minutes < 45 {
        (minutes, "minute")
    } else if minutes < 90 {
        (1, "hour")
    } else if minutes < DAY {
        (round_div(minutes, HOUR), "hour")
    } else if minutes < 42 * HOUR {
        (1, "day")
    } else if minutes < MONTH {
        (round_div(minutes, DAY), "day")
    } else if round_div(minutes, MONTH) < 12 {
        (round_div(minutes, MONTH), "month")
    } else {
        (round_div(minutes, YEAR).max(1), "year")
    };

    if n == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", n, unit)
    }
}

fn round_div(n: i64, d: i64) -> i64 {
    (n + d / 2) / d
}
