//! Error types for ReaderShelf
//!
//! All domain failures are expressed through [`AppError`] and classified into
//! one of four [`ErrorKind`]s:
//! - **NotFound**: a referenced reader, book, association, or child row does
//!   not exist at the point of lookup
//! - **Conflict**: an add operation collides with the uniqueness rule for
//!   that entity (association composite key, word content)
//! - **InvalidInput**: a supplied value fails domain validation
//! - **Internal**: storage or migration failure
//!
//! The HTTP layer (out of scope for this workspace) maps kinds to status
//! codes; nothing in here knows about status codes.

use std::fmt;
use thiserror::Error;

/// Abstract failure classification consumed by the response-translation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Referenced row missing at the point of lookup
    NotFound,
    /// Uniqueness rule violated by an add operation
    Conflict,
    /// Supplied value failed domain validation
    InvalidInput,
    /// Storage-level failure, not attributable to the request
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "Not found"),
            Self::Conflict => write!(f, "Conflict"),
            Self::InvalidInput => write!(f, "Invalid input"),
            Self::Internal => write!(f, "Internal error"),
        }
    }
}

/// Main error type for ReaderShelf
#[derive(Error, Debug)]
pub enum AppError {
    /// Database operation failed
    #[error("Database error: {message}")]
    DatabaseError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Database migration failed
    #[error("Migration failed: {version} - {reason}")]
    MigrationFailed { version: i64, reason: String },

    /// Record not found in storage
    #[error("{entity} not found: {identifier}")]
    RecordNotFound { entity: String, identifier: String },

    /// Record already exists under the uniqueness rule for its entity
    #[error("{entity} already exists: {detail}")]
    AlreadyExists { entity: String, detail: String },

    /// A supplied value failed domain validation
    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: String, reason: String },
}

impl AppError {
    /// Returns the abstract kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::RecordNotFound { .. } => ErrorKind::NotFound,
            Self::AlreadyExists { .. } => ErrorKind::Conflict,
            Self::InvalidInput { .. } => ErrorKind::InvalidInput,
            Self::DatabaseError { .. } | Self::MigrationFailed { .. } => ErrorKind::Internal,
        }
    }

    /// Returns true if this error is attributable to the request rather
    /// than to storage
    pub fn is_client_error(&self) -> bool {
        self.kind() != ErrorKind::Internal
    }

    /// Helper to create a database error from any error type
    pub fn database<E: std::error::Error + Send + Sync + 'static>(
        message: impl Into<String>,
        source: E,
    ) -> Self {
        Self::DatabaseError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Helper to create a not-found error
    pub fn not_found(entity: impl Into<String>, identifier: impl fmt::Display) -> Self {
        Self::RecordNotFound {
            entity: entity.into(),
            identifier: identifier.to_string(),
        }
    }

    /// Helper to create an already-exists error
    pub fn already_exists(entity: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::AlreadyExists {
            entity: entity.into(),
            detail: detail.into(),
        }
    }

    /// Helper to create an invalid-input error
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Convenience type alias for Results using AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;
    use std::io;

    #[test]
    fn test_error_kind_display() {
        assert_eq!(ErrorKind::NotFound.to_string(), "Not found");
        assert_eq!(ErrorKind::Conflict.to_string(), "Conflict");
        assert_eq!(ErrorKind::InvalidInput.to_string(), "Invalid input");
        assert_eq!(ErrorKind::Internal.to_string(), "Internal error");
    }

    #[test]
    fn test_not_found_kind() {
        let err = AppError::not_found("Book", 42);
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.is_client_error());
    }

    #[test]
    fn test_already_exists_kind() {
        let err = AppError::already_exists("Word", "duplicate content");
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert!(err.is_client_error());
    }

    #[test]
    fn test_invalid_input_kind() {
        let err = AppError::invalid_input("status", "unknown value");
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(err.is_client_error());
    }

    #[test]
    fn test_database_error_kind() {
        let inner = io::Error::other("disk on fire");
        let err = AppError::database("Query failed", inner);
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_migration_failed_kind() {
        let err = AppError::MigrationFailed {
            version: 2,
            reason: "syntax error".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_error_display() {
        let err = AppError::not_found("Reader", 7);
        let display = format!("{}", err);
        assert!(display.contains("Reader"));
        assert!(display.contains("7"));
    }

    #[test]
    fn test_error_source_chain() {
        let inner = io::Error::other("inner");
        let outer = AppError::database("outer", inner);
        assert!(outer.source().is_some());
    }

    #[test]
    fn test_result_type_alias() {
        fn test_function() -> Result<i32> {
            Ok(42)
        }
        assert_eq!(test_function().unwrap(), 42);
    }
}
