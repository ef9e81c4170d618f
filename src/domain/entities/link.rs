//! Link entity representing a short code mapped to a target URL.

use chrono::{DateTime, Utc};

/// A stored short link with click accounting.
///
/// `code` and `target_url` never change after insertion. The only mutation a
/// link sees is [`Link::record_click`], applied by the store as part of an
/// atomic increment-and-touch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: i64,
    pub code: String,
    pub target_url: String,
    pub click_count: i64,
    pub last_clicked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        code: String,
        target_url: String,
        click_count: i64,
        last_clicked_at: Option<DateTime<Utc>>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            code,
            target_url,
            click_count,
            last_clicked_at,
            created_at,
        }
    }

    /// Applies one click at `at`.
    ///
    /// `last_clicked_at` never moves backwards and never precedes `created_at`,
    /// so a click stamped with a skewed or stale clock only bumps the counter.
    pub fn record_click(&mut self, at: DateTime<Utc>) {
        self.click_count += 1;

        let floor = self.last_clicked_at.map_or(self.created_at, |last| {
            last.max(self.created_at)
        });
        self.last_clicked_at = Some(at.max(floor));
    }

    /// Returns true once the link has been resolved at least once.
    pub fn has_been_clicked(&self) -> bool {
        self.last_clicked_at.is_some()
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub code: String,
    pub target_url: String,
}

impl NewLink {
    pub fn new(code: impl Into<String>, target_url: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            target_url: target_url.into(),
        }
    }
}
