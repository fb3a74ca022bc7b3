//! Command execution
//!
//! A `Command` is a validated request from the user. `execute` applies it
//! to the model: mutating commands change the store and commit one change
//! under their description, `Undo`/`Redo` walk the history, and `Stats`
//! only reads.

mod budget;
mod event;
mod expense;

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, info};

use crate::error::PennywiseResult;
use crate::model::Model;
use crate::models::{BudgetPeriod, Category, Money};

/// Fields to change on an existing expense or event; `None` keeps the old value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseEdit {
    pub description: Option<String>,
    pub price: Option<Money>,
    pub category: Option<Category>,
    pub timestamp: Option<NaiveDateTime>,
}

/// Fields to change on an existing budget; `None` keeps the old value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BudgetEdit {
    pub name: Option<String>,
    pub cap: Option<Money>,
    pub period: Option<BudgetPeriod>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Record an expense; the time defaults to now
    AddExpense {
        description: String,
        price: Money,
        category: Category,
        timestamp: Option<NaiveDateTime>,
    },
    /// Record an expense from the menu catalog
    AddMenuExpense {
        item: String,
        timestamp: Option<NaiveDateTime>,
    },
    EditExpense {
        reference: String,
        edit: ExpenseEdit,
    },
    DeleteExpense {
        reference: String,
    },
    /// Create a budget; the start date defaults to today
    AddBudget {
        name: String,
        cap: Money,
        period: BudgetPeriod,
        start_date: Option<NaiveDate>,
        make_primary: bool,
    },
    EditBudget {
        name: String,
        edit: BudgetEdit,
    },
    DeleteBudget {
        name: String,
    },
    SwitchBudget {
        name: String,
    },
    /// Browse the primary budget's period containing a past date
    PastPeriod {
        date: NaiveDate,
    },
    ResetPeriod,
    AddEvent {
        description: String,
        price: Money,
        category: Category,
        timestamp: NaiveDateTime,
    },
    EditEvent {
        reference: String,
        edit: ExpenseEdit,
    },
    DeleteEvent {
        reference: String,
    },
    Stats {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
    Undo,
    Redo,
}

impl Command {
    /// Description recorded in the history for mutating commands
    pub fn description(&self) -> &'static str {
        match self {
            Command::AddExpense { .. } => "Add Expense",
            Command::AddMenuExpense { .. } => "Add Menu Expense",
            Command::EditExpense { .. } => "Edit Expense",
            Command::DeleteExpense { .. } => "Delete Expense",
            Command::AddBudget { .. } => "Add Budget",
            Command::EditBudget { .. } => "Edit Budget",
            Command::DeleteBudget { .. } => "Delete Budget",
            Command::SwitchBudget { .. } => "Switch Budget",
            Command::PastPeriod { .. } => "Past Period",
            Command::ResetPeriod => "Reset Period",
            Command::AddEvent { .. } => "Add Event",
            Command::EditEvent { .. } => "Edit Event",
            Command::DeleteEvent { .. } => "Delete Event",
            Command::Stats { .. } => "Stats",
            Command::Undo => "Undo",
            Command::Redo => "Redo",
        }
    }

    /// Whether the command changes the store and commits a change
    pub fn is_mutating(&self) -> bool {
        !matches!(self, Command::Stats { .. } | Command::Undo | Command::Redo)
    }

    /// Undo and redo must see the history exactly as the user left it
    pub fn is_history_command(&self) -> bool {
        matches!(self, Command::Undo | Command::Redo)
    }
}

/// Outcome of a successfully executed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    /// Message for the user
    pub feedback: String,
    /// Whether the store changed and should be saved
    pub mutated: bool,
}

impl CommandResult {
    fn changed(feedback: impl Into<String>) -> Self {
        Self {
            feedback: feedback.into(),
            mutated: true,
        }
    }

    fn unchanged(feedback: impl Into<String>) -> Self {
        Self {
            feedback: feedback.into(),
            mutated: false,
        }
    }
}

/// Run one command against the model
///
/// Due events are first turned into expenses, except before undo and redo.
/// On error nothing has been changed or committed by the command itself.
pub fn execute(model: &mut Model, command: Command) -> PennywiseResult<CommandResult> {
    debug!(command = command.description(), "Executing command");

    let mut notes = Vec::new();
    if !command.is_history_command() {
        let converted = model.process_transpired_events()?;
        if !converted.is_empty() {
            notes.push(format!(
                "{} scheduled event(s) became expenses.",
                converted.len()
            ));
        }
    }
    let events_converted = !notes.is_empty();

    let description = command.description();
    let mutating = command.is_mutating();
    let mut result = match command {
        Command::AddExpense {
            description,
            price,
            category,
            timestamp,
        } => expense::add(model, description, price, category, timestamp)?,
        Command::AddMenuExpense { item, timestamp } => expense::add_from_menu(model, &item, timestamp)?,
        Command::EditExpense { reference, edit } => expense::edit(model, &reference, edit)?,
        Command::DeleteExpense { reference } => expense::delete(model, &reference)?,
        Command::AddBudget {
            name,
            cap,
            period,
            start_date,
            make_primary,
        } => budget::add(model, name, cap, period, start_date, make_primary)?,
        Command::EditBudget { name, edit } => budget::edit(model, &name, edit)?,
        Command::DeleteBudget { name } => budget::delete(model, &name)?,
        Command::SwitchBudget { name } => budget::switch(model, &name)?,
        Command::PastPeriod { date } => budget::past_period(model, date)?,
        Command::ResetPeriod => budget::reset_period(model)?,
        Command::AddEvent {
            description,
            price,
            category,
            timestamp,
        } => event::add(model, description, price, category, timestamp)?,
        Command::EditEvent { reference, edit } => event::edit(model, &reference, edit)?,
        Command::DeleteEvent { reference } => event::delete(model, &reference)?,
        Command::Stats { start, end } => stats(model, start, end)?,
        Command::Undo => CommandResult::changed(format!("Undid: {}", model.rollback()?)),
        Command::Redo => CommandResult::changed(format!("Redid: {}", model.migrate()?)),
    };

    if mutating {
        model.commit(description);
        info!(command = description, "Command committed");
    }
    if events_converted {
        notes.push(result.feedback);
        result.feedback = notes.join("\n");
        result.mutated = true;
    }
    Ok(result)
}

fn stats(
    model: &Model,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> PennywiseResult<CommandResult> {
    let statistics = if start.is_none() && end.is_none() {
        model.basic_statistics()?
    } else {
        model.compute_statistics(start, end)?
    };
    Ok(CommandResult::unchanged(statistics.summary()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::ModelHistory;
    use crate::store::DomainStore;
    use crate::timekeeper::{FixedClock, Timekeeper};
    use chrono::Duration;

    fn at(m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn model_at(now: NaiveDateTime) -> (FixedClock, Model) {
        let clock = FixedClock::new(now);
        let model = Model::new(
            DomainStore::new(),
            ModelHistory::default(),
            Timekeeper::new(clock.clone()),
        );
        (clock, model)
    }

    fn add_expense(description: &str, cents: i64) -> Command {
        Command::AddExpense {
            description: description.to_string(),
            price: Money::from_cents(cents),
            category: Category::Food,
            timestamp: None,
        }
    }

    fn add_budget(name: &str, cents: i64, make_primary: bool) -> Command {
        Command::AddBudget {
            name: name.to_string(),
            cap: Money::from_cents(cents),
            period: BudgetPeriod::Month,
            start_date: Some(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()),
            make_primary,
        }
    }

    #[test]
    fn test_add_expense_tags_primary_budget() {
        let (_clock, mut model) = model_at(at(3, 10, 12));
        execute(&mut model, add_expense("Before", 100)).unwrap();
        execute(&mut model, add_budget("Food", 10000, true)).unwrap();
        let result = execute(&mut model, add_expense("Lunch", 500)).unwrap();

        assert!(result.mutated);
        assert!(result.feedback.starts_with("New expense added: Lunch"));
        let expenses = model.store().expenses();
        assert_eq!(expenses[0].budget_name, None);
        assert_eq!(expenses[1].budget_name.as_deref(), Some("Food"));
    }

    #[test]
    fn test_add_expense_warns_when_budget_exceeded() {
        let (_clock, mut model) = model_at(at(3, 10, 12));
        execute(&mut model, add_budget("Food", 1000, true)).unwrap();
        let result = execute(&mut model, add_expense("Feast", 1500)).unwrap();
        assert!(result.feedback.contains("exceeded by $5.00"));
    }

    #[test]
    fn test_future_expense_rejected_without_commit() {
        let (_clock, mut model) = model_at(at(3, 10, 12));
        let err = execute(
            &mut model,
            Command::AddExpense {
                description: "Later".into(),
                price: Money::from_cents(100),
                category: Category::Food,
                timestamp: Some(at(3, 11, 12)),
            },
        )
        .unwrap_err();

        assert!(matches!(err, crate::error::PennywiseError::FutureTimestamp(_)));
        assert!(!model.can_rollback());
    }

    #[test]
    fn test_undo_redo_feedback() {
        let (_clock, mut model) = model_at(at(3, 10, 12));
        execute(&mut model, add_expense("Lunch", 500)).unwrap();

        let undo = execute(&mut model, Command::Undo).unwrap();
        assert_eq!(undo.feedback, "Undid: Add Expense");
        assert!(model.store().expenses().is_empty());

        let redo = execute(&mut model, Command::Redo).unwrap();
        assert_eq!(redo.feedback, "Redid: Add Expense");
        assert_eq!(model.store().expenses().len(), 1);

        let err = execute(&mut model, Command::Redo).unwrap_err();
        assert!(err.is_no_history());
    }

    #[test]
    fn test_menu_expense() {
        let (_clock, mut model) = model_at(at(3, 10, 12));
        execute(
            &mut model,
            Command::AddMenuExpense {
                item: "kopi".into(),
                timestamp: None,
            },
        )
        .unwrap();
        assert_eq!(model.store().expenses()[0].description, "Kopi");
        assert_eq!(model.store().expenses()[0].price, Money::from_cents(140));

        let err = execute(
            &mut model,
            Command::AddMenuExpense {
                item: "bla".into(),
                timestamp: None,
            },
        )
        .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_edit_expense_keeps_id() {
        let (_clock, mut model) = model_at(at(3, 10, 12));
        execute(&mut model, add_expense("Lunch", 500)).unwrap();
        let id = model.store().expenses()[0].id;

        execute(
            &mut model,
            Command::EditExpense {
                reference: id.to_string(),
                edit: ExpenseEdit {
                    price: Some(Money::from_cents(650)),
                    category: Some(Category::Entertainment),
                    ..Default::default()
                },
            },
        )
        .unwrap();

        let edited = &model.store().expenses()[0];
        assert_eq!(edited.id, id);
        assert_eq!(edited.price, Money::from_cents(650));
        assert_eq!(edited.category, Category::Entertainment);

        execute(&mut model, Command::Undo).unwrap();
        assert_eq!(model.store().expenses()[0].price, Money::from_cents(500));
    }

    #[test]
    fn test_edit_expense_into_future_rejected() {
        let (_clock, mut model) = model_at(at(3, 10, 12));
        execute(&mut model, add_expense("Lunch", 500)).unwrap();
        let id = model.store().expenses()[0].id;

        let err = execute(
            &mut model,
            Command::EditExpense {
                reference: id.to_string(),
                edit: ExpenseEdit {
                    timestamp: Some(at(3, 10, 13)),
                    ..Default::default()
                },
            },
        )
        .unwrap_err();
        assert!(matches!(err, crate::error::PennywiseError::FutureTimestamp(_)));
        assert_eq!(model.store().expenses()[0].timestamp, at(3, 10, 12));
        assert_eq!(model.history().past_descriptions().count(), 1);
    }

    #[test]
    fn test_edit_event_and_undo() {
        let (_clock, mut model) = model_at(at(3, 10, 12));
        execute(
            &mut model,
            Command::AddEvent {
                description: "Rent".into(),
                price: Money::from_cents(120000),
                category: Category::Utilities,
                timestamp: at(4, 1, 9),
            },
        )
        .unwrap();
        let id = model.store().events()[0].id;

        let edit = |edit: ExpenseEdit| Command::EditEvent {
            reference: id.to_string(),
            edit,
        };
        let result = execute(
            &mut model,
            edit(ExpenseEdit {
                price: Some(Money::from_cents(125000)),
                timestamp: Some(at(4, 2, 9)),
                ..Default::default()
            }),
        )
        .unwrap();
        assert!(result.feedback.starts_with("Edited event: Rent $1250.00"));
        assert_eq!(model.store().events()[0].id, id);
        assert_eq!(model.store().events()[0].timestamp, at(4, 2, 9));

        let err = execute(
            &mut model,
            edit(ExpenseEdit {
                timestamp: Some(at(3, 9, 9)),
                ..Default::default()
            }),
        )
        .unwrap_err();
        assert!(err.is_validation());

        let undo = execute(&mut model, Command::Undo).unwrap();
        assert_eq!(undo.feedback, "Undid: Edit Event");
        assert_eq!(model.store().events()[0].price, Money::from_cents(120000));
        assert_eq!(model.store().events()[0].timestamp, at(4, 1, 9));
    }

    #[test]
    fn test_switch_budget_undo_restores_primary() {
        let (_clock, mut model) = model_at(at(3, 10, 12));
        execute(&mut model, add_budget("Food", 10000, true)).unwrap();
        execute(&mut model, add_budget("Fun", 5000, false)).unwrap();
        execute(&mut model, Command::SwitchBudget { name: "fun".into() }).unwrap();
        assert_eq!(model.primary_budget().name, "Fun");

        execute(&mut model, Command::Undo).unwrap();
        assert_eq!(model.primary_budget().name, "Food");

        let err = execute(&mut model, Command::SwitchBudget { name: "Travel".into() }).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(model.primary_budget().name, "Food");
    }

    #[test]
    fn test_past_period_and_reset() {
        let (_clock, mut model) = model_at(at(3, 10, 12));
        execute(&mut model, add_budget("Food", 10000, true)).unwrap();

        let result = execute(
            &mut model,
            Command::PastPeriod {
                date: NaiveDate::from_ymd_opt(2024, 1, 20).unwrap(),
            },
        )
        .unwrap();
        assert!(result.feedback.contains("2024-01-15 to 2024-02-14"));

        let result = execute(&mut model, Command::ResetPeriod).unwrap();
        assert!(result.feedback.contains("2024-02-15 to 2024-03-14"));

        let err = execute(
            &mut model,
            Command::PastPeriod {
                date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            },
        )
        .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_stats_does_not_commit() {
        let (_clock, mut model) = model_at(at(3, 10, 12));
        execute(&mut model, add_expense("Lunch", 500)).unwrap();
        let result = execute(&mut model, Command::Stats { start: None, end: None }).unwrap();

        assert!(!result.mutated);
        assert!(result.feedback.contains("$5.00"));
        assert_eq!(model.history().past_descriptions().count(), 1);

        let err = execute(
            &mut model,
            Command::Stats {
                start: Some(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()),
                end: Some(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()),
            },
        )
        .unwrap_err();
        assert!(matches!(err, crate::error::PennywiseError::InvalidRange { .. }));
    }

    #[test]
    fn test_transpired_events_converted_before_command_but_not_before_undo() {
        let (clock, mut model) = model_at(at(3, 10, 12));
        execute(
            &mut model,
            Command::AddEvent {
                description: "Concert".into(),
                price: Money::from_cents(8000),
                category: Category::Entertainment,
                timestamp: at(3, 12, 20),
            },
        )
        .unwrap();

        clock.advance(Duration::days(3));

        // Undo must not convert first, or it would undo the conversion
        let undo = execute(&mut model, Command::Undo).unwrap();
        assert_eq!(undo.feedback, "Undid: Add Event");
        assert!(model.store().events().is_empty());

        execute(&mut model, Command::Redo).unwrap();
        let result = execute(&mut model, Command::Stats { start: None, end: None }).unwrap();
        assert!(result.mutated);
        assert!(result.feedback.starts_with("1 scheduled event(s) became expenses."));
        assert!(model.store().events().is_empty());
        assert_eq!(model.store().expenses()[0].description, "Concert");

        let undo = execute(&mut model, Command::Undo).unwrap();
        assert_eq!(undo.feedback, "Undid: Transpired events");
        assert_eq!(model.store().events().len(), 1);
    }

    #[test]
    fn test_command_descriptions() {
        assert_eq!(add_expense("x", 1).description(), "Add Expense");
        assert!(add_expense("x", 1).is_mutating());
        assert!(!Command::Undo.is_mutating());
        assert!(Command::Redo.is_history_command());
    }
}
