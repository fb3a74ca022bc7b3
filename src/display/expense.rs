//! Expense, event and menu listings

use super::fit;
use crate::models::{Event, Expense, MenuItem};

const DESCRIPTION_WIDTH: usize = 24;

/// Format expenses as a table, one row per expense
pub fn format_expense_list(expenses: &[&Expense], date_format: &str) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let mut output = format!(
        "{:<12} {:<16} {:<width$} {:>10}  {:<13} {}\n",
        "ID",
        "Date",
        "Description",
        "Price",
        "Category",
        "Budget",
        width = DESCRIPTION_WIDTH
    );
    output.push_str(&"-".repeat(90));
    output.push('\n');

    for expense in expenses {
        output.push_str(&format!(
            "{:<12} {:<16} {} {:>10}  {:<13} {}\n",
            expense.id.to_string(),
            expense.timestamp.format(date_format).to_string(),
            fit(&expense.description, DESCRIPTION_WIDTH),
            expense.price,
            expense.category,
            expense.budget_name.as_deref().unwrap_or("-")
        ));
    }
    output
}

/// Format scheduled events, soonest listed as given
pub fn format_event_list(events: &[&Event], date_format: &str) -> String {
    if events.is_empty() {
        return "No events scheduled.\n".to_string();
    }

    let mut output = format!(
        "{:<12} {:<16} {:<width$} {:>10}  {}\n",
        "ID",
        "Due",
        "Description",
        "Price",
        "Category",
        width = DESCRIPTION_WIDTH
    );
    output.push_str(&"-".repeat(76));
    output.push('\n');

    for event in events {
        output.push_str(&format!(
            "{:<12} {:<16} {} {:>10}  {}\n",
            event.id.to_string(),
            event.timestamp.format(date_format).to_string(),
            fit(&event.description, DESCRIPTION_WIDTH),
            event.price,
            event.category
        ));
    }
    output
}

pub fn format_menu(items: &[MenuItem]) -> String {
    let mut output = String::from("Menu:\n");
    for item in items {
        output.push_str(&format!(
            "  {} {:>8}\n",
            fit(item.description, DESCRIPTION_WIDTH),
            item.price
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, MenuCatalog, Money};
    use chrono::NaiveDate;

    #[test]
    fn test_empty_lists() {
        assert_eq!(format_expense_list(&[], "%Y-%m-%d"), "No expenses found.\n");
        assert_eq!(format_event_list(&[], "%Y-%m-%d"), "No events scheduled.\n");
    }

    #[test]
    fn test_expense_row() {
        let when = NaiveDate::from_ymd_opt(2024, 4, 1)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap();
        let expense = Expense::new("Laksa", Money::from_cents(500), Category::Food, when)
            .unwrap()
            .with_budget(Some("Food".into()));

        let output = format_expense_list(&[&expense], "%Y-%m-%d %H:%M");
        let row = output.lines().nth(2).unwrap();
        assert!(row.starts_with(&expense.id.to_string()));
        assert!(row.contains("2024-04-01 12:30"));
        assert!(row.contains("$5.00"));
        assert!(row.ends_with("Food"));
    }

    #[test]
    fn test_menu_lists_every_item() {
        let output = format_menu(MenuCatalog::items());
        assert_eq!(output.lines().count(), MenuCatalog::items().len() + 1);
        assert!(output.contains("Chicken Rice"));
    }
}
