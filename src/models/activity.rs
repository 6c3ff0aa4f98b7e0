use super::status::Status;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Note shown when a record was saved without one.
pub const EMPTY_NOTE: &str = "-";

/// Identity of a stored record: one document per (user, day).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordKey {
    pub user_id: String,
    pub date: NaiveDate,
}

impl RecordKey {
    pub fn new(user_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            user_id: user_id.into(),
            date,
        }
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Document path inside the record store.
    pub fn path(&self) -> String {
        format!("activities/{}/hari/{}", self.user_id, self.date_str())
    }
}

/// Document written by the submission form (whole-document upsert).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityDoc {
    pub email: String,
    #[serde(rename = "jamMasuk")]
    pub clock_in: String,
    #[serde(rename = "jamPulang")]
    pub clock_out: String,
    pub status: Status,
    #[serde(rename = "catatan")]
    pub note: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

impl ActivityDoc {
    pub fn new(
        email: impl Into<String>,
        clock_in: impl Into<String>,
        clock_out: impl Into<String>,
        status: Status,
        note: Option<String>,
    ) -> Self {
        Self {
            email: email.into(),
            clock_in: clock_in.into(),
            clock_out: clock_out.into(),
            status,
            note,
            created_at: Local::now().to_rfc3339(),
        }
    }

    /// Read-side view of this document once stored under `key`.
    pub fn into_record(self, key: &RecordKey) -> ActivityRecord {
        ActivityRecord {
            email: self.email,
            clock_in: self.clock_in,
            clock_out: self.clock_out,
            status: self.status,
            note: self.note.unwrap_or_else(|| EMPTY_NOTE.to_string()),
            date: key.date,
        }
    }
}

/// One employee's daily activity as seen by the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    pub email: String,
    pub clock_in: String,
    pub clock_out: String,
    pub status: Status,
    pub note: String,
    pub date: NaiveDate,
}

impl ActivityRecord {
    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}
