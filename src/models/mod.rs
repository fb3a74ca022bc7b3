//! Core data models for Pennywise
//!
//! Expenses, scheduled events, budgets with their period windows, and the
//! static menu catalog.

pub mod budget;
pub mod category;
pub mod event;
pub mod expense;
pub mod ids;
pub mod menu;
pub mod money;
pub mod period;

pub use budget::{Budget, BudgetStatus};
pub use category::Category;
pub use event::Event;
pub use expense::Expense;
pub use ids::{EventId, ExpenseId};
pub use menu::{MenuCatalog, MenuItem};
pub use money::Money;
pub use period::{BudgetPeriod, BudgetWindow};
