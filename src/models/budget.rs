//! Budget model
//!
//! A budget is a spending cap that renews every period from a fixed start
//! date. Expenses are linked to it by name only, so the set of expenses in a
//! budget is always derived at query time.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::expense::{validate_description, validate_price};
use super::money::Money;
use super::period::{BudgetPeriod, BudgetWindow};
use crate::error::PennywiseResult;

/// Fraction of the cap at which a budget counts as nearly spent
pub const NEAR_THRESHOLD_PERCENT: f64 = 90.0;

/// A recurring budget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    /// Unique among budgets
    pub name: String,

    /// Spending cap per period
    pub cap: Money,

    /// Phase of the period windows; fixed once created
    pub start_date: NaiveDate,

    pub period: BudgetPeriod,

    #[serde(default)]
    pub is_primary: bool,

    /// Date used instead of "now" while browsing a past period
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_date: Option<NaiveDate>,
}

impl Budget {
    /// Name of the stand-in budget used when no budget is primary
    pub const DEFAULT_NAME: &'static str = "Default Budget";

    /// Create a new, non-primary budget
    pub fn new(
        name: impl Into<String>,
        cap: Money,
        start_date: NaiveDate,
        period: BudgetPeriod,
    ) -> PennywiseResult<Self> {
        let name = validate_description(name.into())?;
        validate_price(cap)?;

        Ok(Self {
            name,
            cap,
            start_date,
            period,
            is_primary: false,
            view_date: None,
        })
    }

    /// The sentinel budget: unbounded cap, never rolls over
    pub fn default_budget() -> Self {
        Self {
            name: Self::DEFAULT_NAME.to_string(),
            cap: Money::unbounded(),
            start_date: NaiveDate::MIN,
            period: BudgetPeriod::Infinite,
            is_primary: true,
            view_date: None,
        }
    }

    pub fn is_default(&self) -> bool {
        self.name == Self::DEFAULT_NAME && self.period == BudgetPeriod::Infinite
    }

    /// Mark this budget as primary (builder style)
    pub fn primary(mut self) -> Self {
        self.is_primary = true;
        self
    }

    /// Budget name matching ignores case
    pub fn has_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.trim())
    }

    /// Name expenses carry to belong to this budget
    ///
    /// The default budget collects expenses that carry no budget name.
    pub fn member_tag(&self) -> Option<&str> {
        if self.is_default() {
            None
        } else {
            Some(&self.name)
        }
    }

    /// The window containing `reference`
    pub fn window_for(&self, reference: NaiveDate) -> BudgetWindow {
        self.period.window_for(self.start_date, reference)
    }

    /// The window currently in view
    ///
    /// Uses the browsing date set by `change_window` when there is one.
    pub fn current_window(&self, today: NaiveDate) -> BudgetWindow {
        self.window_for(self.view_date.unwrap_or(today))
    }

    /// Copy of this budget looking at the period containing `past_date`
    pub fn with_view_date(&self, past_date: Option<NaiveDate>) -> Self {
        let mut budget = self.clone();
        budget.view_date = past_date;
        budget
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (cap {} per {}, from {})",
            self.name,
            self.cap,
            self.period,
            self.start_date.format("%Y-%m-%d")
        )
    }
}

/// Spending position of a budget within one window
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetStatus {
    pub window: BudgetWindow,
    pub spent: Money,
    pub remaining: Money,
    pub percent_used: f64,
}

impl BudgetStatus {
    pub fn new(cap: Money, window: BudgetWindow, spent: Money) -> Self {
        Self {
            window,
            spent,
            remaining: cap - spent,
            percent_used: spent.percent_of(cap),
        }
    }

    pub fn is_exceeded(&self) -> bool {
        self.remaining.is_negative()
    }

    pub fn is_near(&self) -> bool {
        !self.is_exceeded() && self.percent_used >= NEAR_THRESHOLD_PERCENT
    }
}
