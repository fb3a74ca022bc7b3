//! Custom error types for Pennywise
//!
//! Every failure a command can hit is recoverable: the session catches it,
//! prints the message and keeps going.

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

/// The main error type for Pennywise operations
#[derive(Error, Debug)]
pub enum PennywiseError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Undo/redo requested with an empty stack
    #[error("No more commands to {0}")]
    NoHistory(&'static str),

    /// Date range whose end precedes its start
    #[error("Invalid date range: end {end} is before start {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// Expense dated after the current time
    #[error("Expense cannot be in the future: {0}")]
    FutureTimestamp(NaiveDateTime),

    /// History stacks or journal in an inconsistent state
    #[error("History error: {0}")]
    History(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl PennywiseError {
    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for events
    pub fn event_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Event",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for budgets
    pub fn budget_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Budget",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for menu items
    pub fn menu_item_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Menu item",
            identifier: identifier.into(),
        }
    }

    /// Create a "duplicate" error for expenses
    pub fn duplicate_expense(identifier: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Create a "duplicate" error for events
    pub fn duplicate_event(identifier: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type: "Event",
            identifier: identifier.into(),
        }
    }

    /// Create a "duplicate" error for budgets
    pub fn duplicate_budget(identifier: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type: "Budget",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a "duplicate" error
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }

    /// Check if this is an empty-history error
    pub fn is_no_history(&self) -> bool {
        matches!(self, Self::NoHistory(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for PennywiseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for PennywiseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for Pennywise operations
pub type PennywiseResult<T> = Result<T, PennywiseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let err = PennywiseError::budget_not_found("Food");
        assert_eq!(err.to_string(), "Budget not found: Food");
        assert!(err.is_not_found());
        assert!(!err.is_duplicate());
    }

    #[test]
    fn test_duplicate_error() {
        let err = PennywiseError::duplicate_expense("chicken rice");
        assert_eq!(err.to_string(), "Expense already exists: chicken rice");
        assert!(err.is_duplicate());
    }

    #[test]
    fn test_no_history_error() {
        let err = PennywiseError::NoHistory("undo");
        assert_eq!(err.to_string(), "No more commands to undo");
        assert!(err.is_no_history());
    }

    #[test]
    fn test_invalid_range_display() {
        let err = PennywiseError::InvalidRange {
            start: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid date range: end 2024-02-01 is before start 2024-03-01"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: PennywiseError = io_err.into();
        assert!(matches!(err, PennywiseError::Io(_)));
    }
}
