//! Scheduled event commands

use chrono::NaiveDateTime;

use super::{CommandResult, ExpenseEdit};
use crate::error::{PennywiseError, PennywiseResult};
use crate::model::Model;
use crate::models::expense::{validate_description, validate_price};
use crate::models::{Category, Event, Money};

/// Schedule an event, filed under the primary budget like an expense
pub(super) fn add(
    model: &mut Model,
    description: String,
    price: Money,
    category: Category,
    timestamp: NaiveDateTime,
) -> PennywiseResult<CommandResult> {
    let now = model.now();
    let tag = model.primary_budget().member_tag().map(str::to_string);
    let event = Event::new(description, price, category, timestamp, now)?.with_budget(tag);

    let feedback = format!("New event scheduled: {}", event);
    model.store_mut().add_event(event)?;
    Ok(CommandResult::changed(feedback))
}

pub(super) fn edit(model: &mut Model, reference: &str, edit: ExpenseEdit) -> PennywiseResult<CommandResult> {
    let target = model.store().find_event(reference)?.clone();

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
    if let Some(timestamp) = edit.timestamp {
        if !model.timekeeper().is_future(timestamp) {
            return Err(PennywiseError::Validation(format!(
                "Event must be scheduled in the future: {}",
                timestamp.format("%Y-%m-%d %H:%M")
            )));
        }
        edited.timestamp = timestamp;
    }

    let feedback = format!("Edited event: {}", edited);
    model.store_mut().set_event(&target, edited)?;
    Ok(CommandResult::changed(feedback))
}

pub(super) fn delete(model: &mut Model, reference: &str) -> PennywiseResult<CommandResult> {
    let target = model.store().find_event(reference)?.clone();
    model.store_mut().delete_event(&target)?;
    Ok(CommandResult::changed(format!("Deleted event: {}", target)))
}
