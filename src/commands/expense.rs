//! Expense commands

use chrono::NaiveDateTime;

use super::{CommandResult, ExpenseEdit};
use crate::error::{PennywiseError, PennywiseResult};
use crate::model::Model;
use crate::models::expense::{validate_description, validate_price};
use crate::models::{Category, Expense, MenuCatalog, Money};

pub(super) fn add(
    model: &mut Model,
    description: String,
    price: Money,
    category: Category,
    timestamp: Option<NaiveDateTime>,
) -> PennywiseResult<CommandResult> {
    let timestamp = checked_timestamp(model, timestamp)?;
    let expense = Expense::new(description, price, category, timestamp)?;
    record(model, expense)
}

pub(super) fn add_from_menu(
    model: &mut Model,
    item: &str,
    timestamp: Option<NaiveDateTime>,
) -> PennywiseResult<CommandResult> {
    let item = MenuCatalog::find(item)?;
    let timestamp = checked_timestamp(model, timestamp)?;
    let expense = Expense::from_menu_item(&item, timestamp)?;
    record(model, expense)
}

/// The given time, or now; expenses cannot be dated in the future
fn checked_timestamp(model: &Model, timestamp: Option<NaiveDateTime>) -> PennywiseResult<NaiveDateTime> {
    match timestamp {
        Some(timestamp) if model.timekeeper().is_future(timestamp) => {
            Err(PennywiseError::FutureTimestamp(timestamp))
        }
        Some(timestamp) => Ok(timestamp),
        None => Ok(model.now()),
    }
}

/// File the expense under the primary budget and add it
fn record(model: &mut Model, expense: Expense) -> PennywiseResult<CommandResult> {
    let primary = model.primary_budget();
    let expense = expense.with_budget(primary.member_tag().map(str::to_string));
    let feedback = format!("New expense added: {}", expense);
    model.store_mut().add_expense(expense)?;

    let status = model.primary_budget_status();
    let warning = if status.is_exceeded() {
        format!("\nWarning: budget '{}' exceeded by {}", primary.name, Money::zero() - status.remaining)
    } else if status.is_near() {
        format!(
            "\nWarning: budget '{}' is {:.0}% spent",
            primary.name, status.percent_used
        )
    } else {
        String::new()
    };
    Ok(CommandResult::changed(feedback + &warning))
}

pub(super) fn edit(model: &mut Model, reference: &str, edit: ExpenseEdit) -> PennywiseResult<CommandResult> {
    let target = model.store().find_expense(reference)?.clone();

    let mut edited = target.clone();
    if let Some(description) = edit.description {
        edited.description = validate_description(description)?;
    }
    if let Some(price) = edit.price {
        validate_price(price)?;
        edited.price = price;
    }
    if let Some(category) = edit.category {
        edited.category = category;
    }
    if edit.timestamp.is_some() {
        edited.timestamp = checked_timestamp(model, edit.timestamp)?;
    }

    let feedback = format!("Edited expense: {}", edited);
    model.store_mut().set_expense(&target, edited)?;
    Ok(CommandResult::changed(feedback))
}

pub(super) fn delete(model: &mut Model, reference: &str) -> PennywiseResult<CommandResult> {
    let target = model.store().find_expense(reference)?.clone();
    model.store_mut().delete_expense(&target)?;
    Ok(CommandResult::changed(format!("Deleted expense: {}", target)))
}
