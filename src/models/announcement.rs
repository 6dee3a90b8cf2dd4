//! Announcement model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Display priority of an announcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Low priority.
    Low,
    /// Normal priority.
    Normal,
    /// High priority.
    High,
}

/// A company announcement. Read-only to employees; admins have full CRUD.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    /// Unique identifier.
    pub id: Uuid,
    /// Title.
    pub title: String,
    /// Body text.
    pub body: String,
    /// Display priority.
    pub priority: Priority,
    /// Optional date after which the announcement is no longer shown.
    #[serde(default)]
    pub expires_on: Option<NaiveDate>,
    /// Username of the author.
    pub author: String,
    /// When the announcement was published.
    pub published_at: DateTime<Utc>,
}

impl Announcement {
    /// Returns true if the announcement has expired as of `today`.
    ///
    /// The expiry date itself is still visible; only later days hide it.
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.expires_on.is_some_and(|expiry| today > expiry)
    }
}
