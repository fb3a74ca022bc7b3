//! Scheduled events
//!
//! An event is an expense planned for a future date. Once its time has
//! passed it is turned into a regular expense.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::expense::{validate_description, validate_price, Expense};
use super::ids::{EventId, ExpenseId};
use super::money::Money;
use crate::error::{PennywiseError, PennywiseResult};

/// A future expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub description: String,
    pub price: Money,
    pub category: Category,
    pub timestamp: NaiveDateTime,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_name: Option<String>,
}

impl Event {
    /// Create a new event; `timestamp` must be strictly after `now`
    pub fn new(
        description: impl Into<String>,
        price: Money,
        category: Category,
        timestamp: NaiveDateTime,
        now: NaiveDateTime,
    ) -> PennywiseResult<Self> {
        if timestamp <= now {
            return Err(PennywiseError::Validation(format!(
                "Event must be scheduled in the future: {}",
                timestamp.format("%Y-%m-%d %H:%M")
            )));
        }
        let description = validate_description(description.into())?;
        validate_price(price)?;

        Ok(Self {
            id: EventId::new(),
            description,
            price,
            category,
            timestamp,
            budget_name: None,
        })
    }

    pub fn with_budget(mut self, budget_name: Option<String>) -> Self {
        self.budget_name = budget_name;
        self
    }

    /// Same-event check, mirroring `Expense::is_same_expense`
    pub fn is_same_event(&self, other: &Event) -> bool {
        self.description == other.description
            && self.price == other.price
            && self.category == other.category
            && self.timestamp == other.timestamp
    }

    /// Whether the event is due at `now`
    pub fn is_due(&self, now: NaiveDateTime) -> bool {
        self.timestamp <= now
    }

    /// The expense this event becomes once it has transpired
    pub fn to_expense(&self) -> Expense {
        Expense {
            id: ExpenseId::new(),
            description: self.description.clone(),
            price: self.price,
            category: self.category,
            timestamp: self.timestamp,
            budget_name: self.budget_name.clone(),
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({}) due {}",
            self.description,
            self.price,
            self.category,
            self.timestamp.format("%Y-%m-%d %H:%M")
        )
    }
}
