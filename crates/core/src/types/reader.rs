//! Reader account domain model

use crate::types::Timestamp;
use serde::{Deserialize, Serialize};

/// Unique identifier for a reader, assigned by storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReaderId(i64);

impl ReaderId {
    /// Wraps a storage-assigned row id
    pub fn from_i64(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw numeric id
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ReaderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An account holder tracking their reading
///
/// Registration, email verification, and credential checks are handled by an
/// external collaborator; this crate only carries the persisted row. The
/// `enabled` flag is flipped by that collaborator once the reader verifies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reader {
    pub id: ReaderId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub enabled: bool,
    pub created_at: Timestamp,
}
