//! Budget commands

use chrono::NaiveDate;

use super::{BudgetEdit, CommandResult};
use crate::error::{PennywiseError, PennywiseResult};
use crate::model::Model;
use crate::models::expense::{validate_description, validate_price};
use crate::models::{Budget, BudgetPeriod, Money};

pub(super) fn add(
    model: &mut Model,
    name: String,
    cap: Money,
    period: BudgetPeriod,
    start_date: Option<NaiveDate>,
    make_primary: bool,
) -> PennywiseResult<CommandResult> {
    let mut budget = Budget::new(name, cap, start_date.unwrap_or_else(|| model.today()), period)?;
    if make_primary {
        budget = budget.primary();
    }

    let mut feedback = format!("New budget added: {}", budget);
    if make_primary {
        feedback.push_str("\nIt is now the primary budget.");
    }
    model.store_mut().add_budget(budget)?;
    Ok(CommandResult::changed(feedback))
}

pub(super) fn edit(model: &mut Model, name: &str, edit: BudgetEdit) -> PennywiseResult<CommandResult> {
    let target = model.store().find_budget(name)?.clone();

    let mut edited = target.clone();
    if let Some(new_name) = edit.name {
        edited.name = validate_description(new_name)?;
    }
    if let Some(cap) = edit.cap {
        validate_price(cap)?;
        edited.cap = cap;
    }
    if let Some(period) = edit.period {
        edited.period = period;
    }

    let feedback = format!("Edited budget: {}", edited);
    model.store_mut().set_budget(&target.name, edited)?;
    Ok(CommandResult::changed(feedback))
}

pub(super) fn delete(model: &mut Model, name: &str) -> PennywiseResult<CommandResult> {
    let target = model.store().find_budget(name)?.clone();
    model.store_mut().delete_budget(&target.name)?;

    let mut feedback = format!("Deleted budget: {}", target.name);
    if target.is_primary {
        feedback.push_str(&format!("\nExpenses are now tracked against the {}.", Budget::DEFAULT_NAME));
    }
    Ok(CommandResult::changed(feedback))
}

pub(super) fn switch(model: &mut Model, name: &str) -> PennywiseResult<CommandResult> {
    model.store_mut().switch_primary_to(name)?;
    Ok(CommandResult::changed(format!(
        "Primary budget is now: {}",
        model.primary_budget().name
    )))
}

pub(super) fn past_period(model: &mut Model, date: NaiveDate) -> PennywiseResult<CommandResult> {
    if date > model.today() {
        return Err(PennywiseError::Validation(format!(
            "Cannot view a future period: {}",
            date.format("%Y-%m-%d")
        )));
    }
    model.store_mut().change_primary_window(date)?;

    let primary = model.primary_budget();
    Ok(CommandResult::changed(format!(
        "Viewing {} for period {}",
        primary.name,
        primary.current_window(model.today())
    )))
}

pub(super) fn reset_period(model: &mut Model) -> PennywiseResult<CommandResult> {
    model.store_mut().reset_primary_window()?;

    let primary = model.primary_budget();
    Ok(CommandResult::changed(format!(
        "Viewing {} for the current period {}",
        primary.name,
        primary.current_window(model.today())
    )))
}
