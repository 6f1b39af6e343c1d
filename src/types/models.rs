use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    #[serde(skip)]
    pub password_digest: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub owner_id: i64,
    pub text: String,
    pub created_on: NaiveDate,
}

impl Note {
    /// Date as shown on the home page, e.g. "October 19, 2026".
    #[must_use]
    pub fn display_date(&self) -> String {
        self.created_on.format("%B %d, %Y").to_string()
    }
}

/// A note that has not been persisted yet.
#[derive(Debug, Clone)]
pub struct NewNote {
    pub owner_id: i64,
    pub text: String,
    pub created_on: NaiveDate,
}
