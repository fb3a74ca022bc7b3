//! Serializable image of the domain store

use serde::{Deserialize, Serialize};

use crate::error::{PennywiseError, PennywiseResult};
use crate::models::{Budget, Event, Expense};

/// Everything the store holds, in list order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelSnapshot {
    #[serde(default)]
    pub expenses: Vec<Expense>,

    #[serde(default)]
    pub events: Vec<Event>,

    #[serde(default)]
    pub budgets: Vec<Budget>,
}

impl ModelSnapshot {
    /// Check the invariants a loaded snapshot must satisfy
    pub fn validate(&self) -> PennywiseResult<()> {
        let mut primaries = 0;
        for (i, budget) in self.budgets.iter().enumerate() {
            if budget.has_name(Budget::DEFAULT_NAME) {
                return Err(PennywiseError::Storage(format!(
                    "Budget name '{}' is reserved",
                    budget.name
                )));
            }
            if self.budgets[..i].iter().any(|b| b.has_name(&budget.name)) {
                return Err(PennywiseError::Storage(format!(
                    "Budget '{}' appears more than once",
                    budget.name
                )));
            }
            if budget.is_primary {
                primaries += 1;
            }
        }
        if primaries > 1 {
            return Err(PennywiseError::Storage(format!(
                "{} budgets are marked primary",
                primaries
            )));
        }

        for (i, expense) in self.expenses.iter().enumerate() {
            if self.expenses[..i].iter().any(|e| e.id == expense.id) {
                return Err(PennywiseError::Storage(format!(
                    "Expense id {} appears more than once",
                    expense.id
                )));
            }
        }
        for (i, event) in self.events.iter().enumerate() {
            if self.events[..i].iter().any(|e| e.id == event.id) {
                return Err(PennywiseError::Storage(format!(
                    "Event id {} appears more than once",
                    event.id
                )));
            }
        }
        Ok(())
    }
}
