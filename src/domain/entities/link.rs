//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A short code mapped to its destination, with click tracking fields.
///
/// `code`, `destination` and `created_at` never change after creation.
/// `clicks` and `last_clicked_at` are only touched by a redirect.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Link {
    pub code: String,
    pub destination: String,
    pub clicks: i64,
    pub last_clicked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a Link instance.
    pub fn new(
        code: String,
        destination: String,
        clicks: i64,
        last_clicked_at: Option<DateTime<Utc>>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            code,
            destination,
            clicks,
            last_clicked_at,
            created_at,
        }
    }

    /// Returns true if the link has been followed at least once.
    pub fn was_clicked(&self) -> bool {
        self.last_clicked_at.is_some()
    }

    /// Records one click at `at`.
    ///
    /// The stamp never precedes `created_at`, so a clock step backwards cannot
    /// produce a click older than the link itself.
    pub fn record_click(&mut self, at: DateTime<Utc>) {
        self.clicks += 1;
        self.last_clicked_at = Some(at.max(self.created_at));
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub code: String,
    pub destination: String,
}

impl NewLink {
    /// Materializes the link as it looks right after insertion.
    pub fn into_link(self, created_at: DateTime<Utc>) -> Link {
        Link::new(self.code, self.destination, 0, None, created_at)
    }
}
