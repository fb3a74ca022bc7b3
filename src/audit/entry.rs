//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What happened to the history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// A command's edits were recorded
    Commit,
    /// A recorded change was undone
    Rollback,
    /// An undone change was redone
    Migrate,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Commit => write!(f, "COMMIT"),
            Operation::Rollback => write!(f, "ROLLBACK"),
            Operation::Migrate => write!(f, "MIGRATE"),
        }
    }
}

/// A single audit log line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    /// Description of the command the change belongs to
    pub description: String,

    /// One summary line per edit, in the order the edits were made
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub changes: Vec<String>,
}

impl AuditEntry {
    pub fn new(operation: Operation, description: impl Into<String>, changes: Vec<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            description: description.into(),
            changes,
        }
    }

    /// Format the entry for display
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.description
        );
        for change in &self.changes {
            output.push_str("\n  ");
            output.push_str(change);
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Commit.to_string(), "COMMIT");
        assert_eq!(Operation::Rollback.to_string(), "ROLLBACK");
        assert_eq!(Operation::Migrate.to_string(), "MIGRATE");
    }

    #[test]
    fn test_serialization_omits_empty_changes() {
        let entry = AuditEntry::new(Operation::Rollback, "Add Expense", Vec::new());
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"operation\":\"rollback\""));
        assert!(!json.contains("changes"));

        let parsed: AuditEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, entry);
    }

    #[test]
    fn test_human_readable_format() {
        let entry = AuditEntry::new(
            Operation::Commit,
            "Switch Budget",
            vec!["changed budget Food: is_primary: true -> false".into()],
        );
        let text = entry.format_human_readable();
        assert!(text.contains("COMMIT Switch Budget"));
        assert!(text.contains("\n  changed budget Food"));
    }
}
