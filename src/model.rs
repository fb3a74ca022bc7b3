//! The application model
//!
//! Owns the domain store, its undo history and the timekeeper. Commands
//! mutate the store through `store_mut` and then call `commit`; the model
//! records every history operation in the audit log when one is attached.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{info, warn};

use crate::audit::{AuditEntry, AuditLogger, Operation};
use crate::error::PennywiseResult;
use crate::history::{Change, ModelHistory};
use crate::models::{Budget, BudgetStatus, Event, Expense};
use crate::reports::Statistics;
use crate::store::{DomainStore, ModelSnapshot};
use crate::timekeeper::Timekeeper;

/// Description of the change that turns due events into expenses
pub const TRANSPIRED_EVENTS: &str = "Transpired events";

#[derive(Debug)]
pub struct Model {
    store: DomainStore,
    history: ModelHistory,
    timekeeper: Timekeeper,
    audit: Option<AuditLogger>,
}

impl Model {
    pub fn new(store: DomainStore, history: ModelHistory, timekeeper: Timekeeper) -> Self {
        Self {
            store,
            history,
            timekeeper,
            audit: None,
        }
    }

    /// Restore a model from a saved snapshot with empty history
    pub fn from_snapshot(
        snapshot: ModelSnapshot,
        history_capacity: usize,
        timekeeper: Timekeeper,
    ) -> PennywiseResult<Self> {
        Ok(Self::new(
            DomainStore::from_snapshot(snapshot)?,
            ModelHistory::new(history_capacity),
            timekeeper,
        ))
    }

    /// Record history operations in `logger`
    pub fn with_audit(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    pub fn store(&self) -> &DomainStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut DomainStore {
        &mut self.store
    }

    pub fn history(&self) -> &ModelHistory {
        &self.history
    }

    pub fn timekeeper(&self) -> &Timekeeper {
        &self.timekeeper
    }

    pub fn now(&self) -> NaiveDateTime {
        self.timekeeper.now()
    }

    pub fn today(&self) -> NaiveDate {
        self.timekeeper.today()
    }

    pub fn snapshot(&self) -> ModelSnapshot {
        self.store.snapshot()
    }

    // === History ===

    /// Seal the edits made since the last commit under `description`
    pub fn commit(&mut self, description: &str) {
        let change = self.history.commit(&mut self.store, description);
        audit(self.audit.as_ref(), Operation::Commit, change);
    }

    pub fn can_rollback(&self) -> bool {
        self.history.can_rollback()
    }

    pub fn can_migrate(&self) -> bool {
        self.history.can_migrate()
    }

    /// Undo the last command; returns its description
    pub fn rollback(&mut self) -> PennywiseResult<String> {
        let change = self.history.rollback(&mut self.store)?;
        audit(self.audit.as_ref(), Operation::Rollback, change);
        Ok(change.description().to_string())
    }

    /// Redo the last undone command; returns its description
    pub fn migrate(&mut self) -> PennywiseResult<String> {
        let change = self.history.migrate(&mut self.store)?;
        audit(self.audit.as_ref(), Operation::Migrate, change);
        Ok(change.description().to_string())
    }

    // === Time ===

    /// Turn every due event into an expense, as one committed change
    ///
    /// An event whose expense already exists is only removed. Returns the
    /// events that were converted; nothing is committed when none were due.
    pub fn process_transpired_events(&mut self) -> PennywiseResult<Vec<Event>> {
        let due: Vec<Event> = self
            .timekeeper
            .transpired_events(&self.store)
            .into_iter()
            .cloned()
            .collect();
        if due.is_empty() {
            return Ok(due);
        }

        for event in &due {
            self.store.delete_event(event)?;
            let expense = event.to_expense();
            if !self.store.has_expense(&expense) {
                self.store.add_expense(expense)?;
            }
        }
        info!(count = due.len(), "Converted transpired events");
        self.commit(TRANSPIRED_EVENTS);
        Ok(due)
    }

    /// Events due within the next `days` days
    pub fn upcoming_events(&self, days: u32) -> Vec<&Event> {
        self.timekeeper.upcoming_events(&self.store, days)
    }

    // === Queries ===

    pub fn primary_budget(&self) -> Budget {
        self.store.primary_budget()
    }

    /// Expenses of the primary budget in the period being viewed
    pub fn primary_period_expenses(&self) -> Vec<&Expense> {
        let primary = self.store.primary_budget();
        self.store.current_period_expenses(&primary, self.now())
    }

    pub fn primary_budget_status(&self) -> BudgetStatus {
        let primary = self.store.primary_budget();
        self.store.budget_status(&primary, self.now())
    }

    /// Statistics over every expense in `[start, end]`
    pub fn compute_statistics(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> PennywiseResult<Statistics> {
        Statistics::compute(self.store.expenses(), start, end, self.today())
    }

    /// Statistics over the primary budget's expenses in its current window
    pub fn basic_statistics(&self) -> PennywiseResult<Statistics> {
        let primary = self.store.primary_budget();
        let (start, end) = if primary.is_default() {
            (None, self.today())
        } else {
            let window = primary.current_window(self.today());
            (Some(window.start), window.last_day())
        };
        Statistics::compute(self.primary_period_expenses(), start, Some(end), self.today())
    }
}

fn audit(logger: Option<&AuditLogger>, operation: Operation, change: &Change) {
    let Some(logger) = logger else {
        return;
    };
    let entry = AuditEntry::new(operation, change.description(), change.summaries());
    if let Err(e) = logger.log(&entry) {
        warn!(error = %e, "Failed to write audit entry");
    }
}
