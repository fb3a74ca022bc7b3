//! Audit log of history operations
//!
//! Every commit, rollback and migrate is appended to a line-delimited JSON
//! file together with a summary of the edits involved.
//!
//! - `AuditEntry`: one log line (timestamp, operation, command description,
//!   per-edit change summaries).
//! - `AuditLogger`: appends entries to the log file and reads them back.
//! - `field_changes`: field-by-field difference of two serialized records,
//!   used to summarize replacements.

mod diff;
mod entry;
mod logger;

pub use diff::field_changes;
pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
