//! Reader-book association domain model

use crate::types::{BookId, ReaderId, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reading progress state of one copy in a reader's collection
///
/// Input is accepted case-insensitively ("read", "READ", "Read" are all
/// valid) and stored in the canonical uppercase form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReadingStatus {
    Unread,
    Reading,
    Read,
}

impl ReadingStatus {
    /// Returns the canonical storage form
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unread => "UNREAD",
            Self::Reading => "READING",
            Self::Read => "READ",
        }
    }
}

impl Default for ReadingStatus {
    fn default() -> Self {
        Self::Unread
    }
}

impl fmt::Display for ReadingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReadingStatus {
    type Err = ();

    /// Case-insensitive parse; the caller converts a failure into its own
    /// invalid-input error
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "UNREAD" => Ok(Self::Unread),
            "READING" => Ok(Self::Reading),
            "READ" => Ok(Self::Read),
            _ => Err(()),
        }
    }
}

/// The per-reader ownership record for a specific catalog book
///
/// Composite identity: (reader_id, book_id) — at most one association exists
/// per pair. `adding_date` is set at creation and never overwritten. Words
/// and quotes are owned by this association and fetched by the same composite
/// key; deleting the association cascades to them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReaderBook {
    pub reader_id: ReaderId,
    pub book_id: BookId,
    pub status: ReadingStatus,
    pub adding_date: Timestamp,
    pub left_off_page: Option<i64>,
}

impl ReaderBook {
    /// Creates a fresh association with the default status and the current
    /// adding date
    pub fn new(reader_id: ReaderId, book_id: BookId) -> Self {
        Self {
            reader_id,
            book_id,
            status: ReadingStatus::default(),
            adding_date: Timestamp::now(),
            left_off_page: None,
        }
    }
}
