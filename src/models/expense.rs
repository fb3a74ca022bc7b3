//! Expense model
//!
//! An expense is a past purchase. Its `id` never changes; edits replace the
//! whole record. Two expenses with the same description, price, category and
//! timestamp are treated as the same purchase entered twice.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::ids::ExpenseId;
use super::menu::MenuItem;
use super::money::Money;
use crate::error::{PennywiseError, PennywiseResult};

/// Longest description accepted for expenses, events and budgets
pub const MAX_DESCRIPTION_LEN: usize = 100;

/// A recorded purchase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub description: String,
    pub price: Money,
    pub category: Category,
    pub timestamp: NaiveDateTime,

    /// Name of the budget this expense was filed under, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_name: Option<String>,
}

impl Expense {
    /// Create a new expense with a fresh id
    ///
    /// Fails with `Validation` for an empty description or negative price.
    /// Whether the timestamp lies in the future is the caller's check,
    /// made against the timekeeper.
    pub fn new(
        description: impl Into<String>,
        price: Money,
        category: Category,
        timestamp: NaiveDateTime,
    ) -> PennywiseResult<Self> {
        let description = validate_description(description.into())?;
        validate_price(price)?;

        Ok(Self {
            id: ExpenseId::new(),
            description,
            price,
            category,
            timestamp,
            budget_name: None,
        })
    }

    /// Create an expense from a menu catalog item
    pub fn from_menu_item(item: &MenuItem, timestamp: NaiveDateTime) -> PennywiseResult<Self> {
        Self::new(item.description, item.price, item.category, timestamp)
    }

    /// File this expense under a budget
    pub fn with_budget(mut self, budget_name: Option<String>) -> Self {
        self.budget_name = budget_name;
        self
    }

    /// Whether `other` records the same purchase, ignoring ids
    pub fn is_same_expense(&self, other: &Expense) -> bool {
        self.description == other.description
            && self.price == other.price
            && self.category == other.category
            && self.timestamp == other.timestamp
    }

    /// Whether this expense is filed under the budget named `name`
    pub fn belongs_to(&self, name: Option<&str>) -> bool {
        self.budget_name.as_deref() == name
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({}) on {}",
            self.description,
            self.price,
            self.category,
            self.timestamp.format("%Y-%m-%d %H:%M")
        )
    }
}

pub(crate) fn validate_description(description: String) -> PennywiseResult<String> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Err(PennywiseError::Validation(
            "Description cannot be empty".into(),
        ));
    }
    if trimmed.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(PennywiseError::Validation(format!(
            "Description is too long (max {} characters)",
            MAX_DESCRIPTION_LEN
        )));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn validate_price(price: Money) -> PennywiseResult<()> {
    if price.is_negative() {
        return Err(PennywiseError::Validation(format!(
            "Price cannot be negative: {}",
            price
        )));
    }
    Ok(())
}
