//! Display formatting for terminal output
//!
//! Every formatter returns a `String`; printing is left to the caller.

pub mod budget;
pub mod expense;
pub mod history;

pub use budget::{format_budget_list, format_budget_status};
pub use expense::{format_event_list, format_expense_list, format_menu};
pub use history::format_history;

/// Fit `s` into `width` characters, padding or cutting with "..."
pub fn fit(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        format!("{:width$}", s, width = width)
    } else if width <= 3 {
        ".".repeat(width)
    } else {
        let cut: String = s.chars().take(width - 3).collect();
        format!("{}...", cut)
    }
}
