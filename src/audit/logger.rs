//! Append-only JSONL audit log

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::error::{PennywiseError, PennywiseResult};

use super::entry::AuditEntry;

/// Writes audit entries, one JSON object per line
#[derive(Debug, Clone)]
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append an entry and flush it
    pub fn log(&self, entry: &AuditEntry) -> PennywiseResult<()> {
        if let Some(parent) = self.log_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| PennywiseError::Io(format!("Failed to open audit log: {}", e)))?;

        let json = serde_json::to_string(entry)
            .map_err(|e| PennywiseError::Json(format!("Failed to serialize audit entry: {}", e)))?;
        writeln!(file, "{}", json)
            .map_err(|e| PennywiseError::Io(format!("Failed to write audit entry: {}", e)))?;
        file.flush()
            .map_err(|e| PennywiseError::Io(format!("Failed to flush audit log: {}", e)))?;
        Ok(())
    }

    /// Read all entries, oldest first
    pub fn read_all(&self) -> PennywiseResult<Vec<AuditEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }
        let file = File::open(&self.log_path)
            .map_err(|e| PennywiseError::Io(format!("Failed to open audit log: {}", e)))?;

        let mut entries = Vec::new();
        for (line_num, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let entry = serde_json::from_str(&line).map_err(|e| {
                PennywiseError::Json(format!(
                    "Failed to parse audit entry at line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;
            entries.push(entry);
        }
        Ok(entries)
    }

    /// The last `count` entries, oldest first
    pub fn read_recent(&self, count: usize) -> PennywiseResult<Vec<AuditEntry>> {
        let mut entries = self.read_all()?;
        let start = entries.len().saturating_sub(count);
        Ok(entries.split_off(start))
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use tempfile::TempDir;

    fn create_test_logger() -> (TempDir, AuditLogger) {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("logs").join("audit.log"));
        (temp_dir, logger)
    }

    #[test]
    fn test_missing_log_reads_empty() {
        let (_dir, logger) = create_test_logger();
        assert!(logger.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_log_and_read_back_in_order() {
        let (_dir, logger) = create_test_logger();
        logger
            .log(&AuditEntry::new(Operation::Commit, "Add Expense", vec!["added expense".into()]))
            .unwrap();
        logger
            .log(&AuditEntry::new(Operation::Rollback, "Add Expense", Vec::new()))
            .unwrap();

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].operation, Operation::Commit);
        assert_eq!(entries[1].operation, Operation::Rollback);
    }

    #[test]
    fn test_read_recent() {
        let (_dir, logger) = create_test_logger();
        for i in 0..5 {
            logger
                .log(&AuditEntry::new(Operation::Commit, format!("Command {}", i), Vec::new()))
                .unwrap();
        }
        let recent = logger.read_recent(2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].description, "Command 3");
        assert_eq!(recent[1].description, "Command 4");
    }
}
