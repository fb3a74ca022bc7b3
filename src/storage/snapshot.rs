//! Snapshot persistence

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::file_io::{read_json, write_json_atomic};
use crate::error::PennywiseResult;
use crate::store::ModelSnapshot;

/// Loads and saves the whole model as one JSON document
#[derive(Debug, Clone)]
pub struct SnapshotRepository {
    path: PathBuf,
}

impl SnapshotRepository {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved snapshot; an absent file is an empty model
    ///
    /// Fails with a `Storage` error when the file is unreadable or breaks a
    /// model invariant (duplicate budget names, several primary budgets).
    pub fn load(&self) -> PennywiseResult<ModelSnapshot> {
        let snapshot: ModelSnapshot = read_json(&self.path)?;
        snapshot.validate()?;
        info!(
            path = %self.path.display(),
            expenses = snapshot.expenses.len(),
            events = snapshot.events.len(),
            budgets = snapshot.budgets.len(),
            "Loaded snapshot"
        );
        Ok(snapshot)
    }

    pub fn save(&self, snapshot: &ModelSnapshot) -> PennywiseResult<()> {
        write_json_atomic(&self.path, snapshot)?;
        debug!(path = %self.path.display(), "Saved snapshot");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PennywiseError;
    use crate::models::{Budget, BudgetPeriod, Category, Expense, Money};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, SnapshotRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = SnapshotRepository::new(temp_dir.path().join("data").join("pennywise.json"));
        (temp_dir, repo)
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let (_dir, repo) = create_test_repo();
        assert_eq!(repo.load().unwrap(), ModelSnapshot::default());
    }

    #[test]
    fn test_save_and_load() {
        let (_dir, repo) = create_test_repo();
        let when = NaiveDate::from_ymd_opt(2024, 2, 3)
            .unwrap()
            .and_hms_opt(8, 15, 0)
            .unwrap();
        let snapshot = ModelSnapshot {
            expenses: vec![Expense::new("Kopi", Money::from_cents(140), Category::Food, when)
                .unwrap()
                .with_budget(Some("Food".into()))],
            events: Vec::new(),
            budgets: vec![Budget::new(
                "Food",
                Money::from_cents(30000),
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                BudgetPeriod::Month,
            )
            .unwrap()
            .primary()],
        };

        repo.save(&snapshot).unwrap();
        assert_eq!(repo.load().unwrap(), snapshot);
    }

    #[test]
    fn test_invalid_snapshot_rejected() {
        let (_dir, repo) = create_test_repo();
        let budget = Budget::new(
            "Food",
            Money::from_cents(100),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            BudgetPeriod::Week,
        )
        .unwrap();
        let snapshot = ModelSnapshot {
            budgets: vec![budget.clone(), budget],
            ..Default::default()
        };
        repo.save(&snapshot).unwrap();

        assert!(matches!(repo.load().unwrap_err(), PennywiseError::Storage(_)));
    }
}
