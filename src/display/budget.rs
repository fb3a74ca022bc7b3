//! Budget display formatting

use super::fit;
use crate::models::{Budget, BudgetStatus};

const NAME_WIDTH: usize = 20;

/// Format budgets as a table; the primary budget is starred
pub fn format_budget_list(budgets: &[&Budget]) -> String {
    if budgets.is_empty() {
        return "No budgets found. Expenses are tracked against the default budget.\n"
            .to_string();
    }

    let mut output = format!(
        "  {:<width$} {:>12} {:<7} {}\n",
        "Name",
        "Cap",
        "Period",
        "Start",
        width = NAME_WIDTH
    );
    output.push_str(&"-".repeat(56));
    output.push('\n');

    for budget in budgets {
        let marker = if budget.is_primary { "*" } else { " " };
        output.push_str(&format!(
            "{} {} {:>12} {:<7} {}\n",
            marker,
            fit(&budget.name, NAME_WIDTH),
            budget.cap,
            budget.period,
            budget.start_date.format("%Y-%m-%d")
        ));
    }
    output
}

/// Format the spending position of one budget
pub fn format_budget_status(budget: &Budget, status: &BudgetStatus) -> String {
    let mut output = String::new();
    output.push_str(&format!("Budget:    {}\n", budget.name));
    output.push_str(&format!("Period:    {}\n", status.window));
    output.push_str(&format!("Cap:       {}\n", budget.cap));
    output.push_str(&format!("Spent:     {}\n", status.spent));
    output.push_str(&format!("Remaining: {}\n", status.remaining));

    if !budget.cap.is_unbounded() {
        output.push_str(&format!("Used:      {:.1}%\n", status.percent_used));
    }
    if status.is_exceeded() {
        output.push_str("Warning: budget exceeded!\n");
    } else if status.is_near() {
        output.push_str("Warning: budget nearly spent.\n");
    }
    if budget.view_date.is_some() {
        output.push_str("(viewing a past period; use 'budget reset' to return)\n");
    }
    output
}
