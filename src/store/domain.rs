//! In-memory domain store
//!
//! Owns the expense, event and budget lists. Every mutating operation checks
//! all of its preconditions first, then records one or more `Edit`s. Recorded
//! edits are applied immediately and kept in a journal until the history
//! engine seals them into a change.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

use super::edit::{Edit, ListEdit};
use super::snapshot::ModelSnapshot;
use crate::error::{PennywiseError, PennywiseResult};
use crate::models::{Budget, BudgetStatus, Event, Expense, Money};

/// The authoritative collections of the application
#[derive(Debug, Default)]
pub struct DomainStore {
    expenses: Vec<Expense>,
    events: Vec<Event>,
    budgets: Vec<Budget>,
    journal: Vec<Edit>,
}

impl DomainStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a previously saved snapshot
    pub fn from_snapshot(snapshot: ModelSnapshot) -> PennywiseResult<Self> {
        snapshot.validate()?;
        Ok(Self {
            expenses: snapshot.expenses,
            events: snapshot.events,
            budgets: snapshot.budgets,
            journal: Vec::new(),
        })
    }

    pub fn snapshot(&self) -> ModelSnapshot {
        ModelSnapshot {
            expenses: self.expenses.clone(),
            events: self.events.clone(),
            budgets: self.budgets.clone(),
        }
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    // === Expenses ===

    pub fn has_expense(&self, expense: &Expense) -> bool {
        self.expenses.iter().any(|e| e.is_same_expense(expense))
    }

    pub fn add_expense(&mut self, expense: Expense) -> PennywiseResult<()> {
        if self.has_expense(&expense) {
            return Err(PennywiseError::duplicate_expense(expense.to_string()));
        }
        let index = self.expenses.len();
        self.record(Edit::Expense(ListEdit::Insert {
            index,
            item: expense,
        }))
    }

    /// Replace `target` with `edited`, keeping its position
    pub fn set_expense(&mut self, target: &Expense, edited: Expense) -> PennywiseResult<()> {
        let index = self.expense_index(target)?;
        let collides = self
            .expenses
            .iter()
            .enumerate()
            .any(|(i, e)| i != index && e.is_same_expense(&edited));
        if collides {
            return Err(PennywiseError::duplicate_expense(edited.to_string()));
        }
        let before = self.expenses[index].clone();
        self.record(Edit::Expense(ListEdit::Replace {
            index,
            before,
            after: edited,
        }))
    }

    pub fn delete_expense(&mut self, target: &Expense) -> PennywiseResult<()> {
        let index = self.expense_index(target)?;
        let item = self.expenses[index].clone();
        self.record(Edit::Expense(ListEdit::Remove { index, item }))
    }

    /// Find an expense by id or id prefix
    pub fn find_expense(&self, reference: &str) -> PennywiseResult<&Expense> {
        find_unique(&self.expenses, |e| e.id.matches_ref(reference))
            .map_err(|found_many| {
                if found_many {
                    ambiguous("expense", reference)
                } else {
                    PennywiseError::expense_not_found(reference)
                }
            })
    }

    fn expense_index(&self, target: &Expense) -> PennywiseResult<usize> {
        self.expenses
            .iter()
            .position(|e| e.id == target.id)
            .ok_or_else(|| PennywiseError::expense_not_found(target.id.to_string()))
    }

    // === Events ===

    pub fn has_event(&self, event: &Event) -> bool {
        self.events.iter().any(|e| e.is_same_event(event))
    }

    pub fn add_event(&mut self, event: Event) -> PennywiseResult<()> {
        if self.has_event(&event) {
            return Err(PennywiseError::duplicate_event(event.to_string()));
        }
        let index = self.events.len();
        self.record(Edit::Event(ListEdit::Insert { index, item: event }))
    }

    pub fn set_event(&mut self, target: &Event, edited: Event) -> PennywiseResult<()> {
        let index = self.event_index(target)?;
        let collides = self
            .events
            .iter()
            .enumerate()
            .any(|(i, e)| i != index && e.is_same_event(&edited));
        if collides {
            return Err(PennywiseError::duplicate_event(edited.to_string()));
        }
        let before = self.events[index].clone();
        self.record(Edit::Event(ListEdit::Replace {
            index,
            before,
            after: edited,
        }))
    }

    pub fn delete_event(&mut self, target: &Event) -> PennywiseResult<()> {
        let index = self.event_index(target)?;
        let item = self.events[index].clone();
        self.record(Edit::Event(ListEdit::Remove { index, item }))
    }

    pub fn find_event(&self, reference: &str) -> PennywiseResult<&Event> {
        find_unique(&self.events, |e| e.id.matches_ref(reference)).map_err(
            |found_many| {
                if found_many {
                    ambiguous("event", reference)
                } else {
                    PennywiseError::event_not_found(reference)
                }
            },
        )
    }

    fn event_index(&self, target: &Event) -> PennywiseResult<usize> {
        self.events
            .iter()
            .position(|e| e.id == target.id)
            .ok_or_else(|| PennywiseError::event_not_found(target.id.to_string()))
    }

    // === Budgets ===

    /// Look up a budget by name, ignoring case
    pub fn budget(&self, name: &str) -> Option<&Budget> {
        self.budgets.iter().find(|b| b.has_name(name))
    }

    pub fn find_budget(&self, name: &str) -> PennywiseResult<&Budget> {
        self.budget(name)
            .ok_or_else(|| PennywiseError::budget_not_found(name.trim()))
    }

    pub fn has_primary_budget(&self) -> bool {
        self.budgets.iter().any(|b| b.is_primary)
    }

    /// The primary budget, or the default budget when none is marked
    pub fn primary_budget(&self) -> Budget {
        self.budgets
            .iter()
            .find(|b| b.is_primary)
            .cloned()
            .unwrap_or_else(Budget::default_budget)
    }

    pub fn add_budget(&mut self, budget: Budget) -> PennywiseResult<()> {
        if budget.has_name(Budget::DEFAULT_NAME) || self.budget(&budget.name).is_some() {
            return Err(PennywiseError::duplicate_budget(&budget.name));
        }

        let mut edits = Vec::new();
        if budget.is_primary {
            edits.extend(self.unmark_primary());
        }
        edits.push(Edit::Budget(ListEdit::Insert {
            index: self.budgets.len(),
            item: budget,
        }));
        self.record_all(edits)
    }

    /// Replace the budget named `target` with `edited`
    ///
    /// The start date and primary flag of the old budget are kept. Renaming
    /// moves every expense and event filed under the old name to the new one.
    pub fn set_budget(&mut self, target: &str, mut edited: Budget) -> PennywiseResult<()> {
        let index = self.budget_index(target)?;
        let before = self.budgets[index].clone();

        if edited.start_date != before.start_date {
            return Err(PennywiseError::Validation(format!(
                "Start date of budget '{}' cannot be changed",
                before.name
            )));
        }
        let renamed = edited.name != before.name;
        if renamed {
            let taken = edited.has_name(Budget::DEFAULT_NAME)
                || self
                    .budgets
                    .iter()
                    .enumerate()
                    .any(|(i, b)| i != index && b.has_name(&edited.name));
            if taken {
                return Err(PennywiseError::duplicate_budget(&edited.name));
            }
        }
        edited.is_primary = before.is_primary;
        edited.view_date = before.view_date;

        let mut edits = Vec::new();
        if renamed {
            edits.extend(self.retag_edits(&before.name, &edited.name));
        }
        edits.push(Edit::Budget(ListEdit::Replace {
            index,
            before,
            after: edited,
        }));
        self.record_all(edits)
    }

    /// Remove a budget; its expenses keep their tag
    pub fn delete_budget(&mut self, name: &str) -> PennywiseResult<()> {
        let index = self.budget_index(name)?;
        let item = self.budgets[index].clone();
        self.record(Edit::Budget(ListEdit::Remove { index, item }))
    }

    pub fn switch_primary_to(&mut self, name: &str) -> PennywiseResult<()> {
        let index = self.budget_index(name)?;
        if self.budgets[index].is_primary {
            return Ok(());
        }

        let mut edits: Vec<Edit> = self.unmark_primary().into_iter().collect();
        let before = self.budgets[index].clone();
        let after = before.clone().primary();
        edits.push(Edit::Budget(ListEdit::Replace {
            index,
            before,
            after,
        }));
        self.record_all(edits)
    }

    /// Browse the primary budget's period containing `past_date`
    pub fn change_primary_window(&mut self, past_date: NaiveDate) -> PennywiseResult<()> {
        self.set_primary_view_date(Some(past_date))
    }

    /// Return the primary budget to the period containing today
    pub fn reset_primary_window(&mut self) -> PennywiseResult<()> {
        self.set_primary_view_date(None)
    }

    fn set_primary_view_date(&mut self, view_date: Option<NaiveDate>) -> PennywiseResult<()> {
        let index = self
            .budgets
            .iter()
            .position(|b| b.is_primary)
            .ok_or_else(|| PennywiseError::Validation("No primary budget is set".into()))?;
        let before = self.budgets[index].clone();
        if before.view_date == view_date {
            return Ok(());
        }
        let after = before.with_view_date(view_date);
        self.record(Edit::Budget(ListEdit::Replace {
            index,
            before,
            after,
        }))
    }

    fn budget_index(&self, name: &str) -> PennywiseResult<usize> {
        self.budgets
            .iter()
            .position(|b| b.has_name(name))
            .ok_or_else(|| PennywiseError::budget_not_found(name.trim()))
    }

    fn unmark_primary(&self) -> Option<Edit> {
        let index = self.budgets.iter().position(|b| b.is_primary)?;
        let before = self.budgets[index].clone();
        let mut after = before.clone();
        after.is_primary = false;
        Some(Edit::Budget(ListEdit::Replace {
            index,
            before,
            after,
        }))
    }

    fn retag_edits(&self, old_name: &str, new_name: &str) -> Vec<Edit> {
        let expenses = self
            .expenses
            .iter()
            .enumerate()
            .filter(|(_, e)| e.belongs_to(Some(old_name)))
            .map(|(index, e)| {
                Edit::Expense(ListEdit::Replace {
                    index,
                    before: e.clone(),
                    after: e.clone().with_budget(Some(new_name.to_string())),
                })
            });
        let events = self
            .events
            .iter()
            .enumerate()
            .filter(|(_, e)| e.budget_name.as_deref() == Some(old_name))
            .map(|(index, e)| {
                Edit::Event(ListEdit::Replace {
                    index,
                    before: e.clone(),
                    after: e.clone().with_budget(Some(new_name.to_string())),
                })
            });
        expenses.chain(events).collect()
    }

    // === Queries ===

    /// Expenses filed under `budget` that fall in its current window
    pub fn current_period_expenses(&self, budget: &Budget, now: NaiveDateTime) -> Vec<&Expense> {
        let window = budget.current_window(now.date());
        let tag = budget.member_tag();
        self.expenses
            .iter()
            .filter(|e| e.belongs_to(tag) && window.contains(e.timestamp.date()))
            .collect()
    }

    pub fn budget_status(&self, budget: &Budget, now: NaiveDateTime) -> BudgetStatus {
        let spent: Money = self
            .current_period_expenses(budget, now)
            .into_iter()
            .map(|e| e.price)
            .sum();
        BudgetStatus::new(budget.cap, budget.current_window(now.date()), spent)
    }

    pub fn filtered_expenses<P>(&self, predicate: P) -> Vec<&Expense>
    where
        P: Fn(&Expense) -> bool,
    {
        self.expenses.iter().filter(|e| predicate(e)).collect()
    }

    pub fn filtered_events<P>(&self, predicate: P) -> Vec<&Event>
    where
        P: Fn(&Event) -> bool,
    {
        self.events.iter().filter(|e| predicate(e)).collect()
    }

    pub fn filtered_budgets<P>(&self, predicate: P) -> Vec<&Budget>
    where
        P: Fn(&Budget) -> bool,
    {
        self.budgets.iter().filter(|b| predicate(b)).collect()
    }

    // === Journal ===

    /// Whether edits have been made since the last commit
    pub fn has_pending_edits(&self) -> bool {
        !self.journal.is_empty()
    }

    /// Hand the pending edits over to the caller, in the order made
    pub(crate) fn take_journal(&mut self) -> Vec<Edit> {
        std::mem::take(&mut self.journal)
    }

    /// Apply an edit without journaling it
    pub(crate) fn apply(&mut self, edit: &Edit) -> PennywiseResult<()> {
        match edit {
            Edit::Expense(e) => e.apply_to(&mut self.expenses, "expense"),
            Edit::Event(e) => e.apply_to(&mut self.events, "event"),
            Edit::Budget(e) => e.apply_to(&mut self.budgets, "budget"),
        }
    }

    fn record(&mut self, edit: Edit) -> PennywiseResult<()> {
        self.apply(&edit)?;
        debug!(edit = %edit.summary(), "Recorded edit");
        self.journal.push(edit);
        Ok(())
    }

    fn record_all(&mut self, edits: Vec<Edit>) -> PennywiseResult<()> {
        for edit in edits {
            self.record(edit)?;
        }
        Ok(())
    }
}

/// Exactly one match, or `Err(true)` for several and `Err(false)` for none
fn find_unique<'a, T>(
    items: &'a [T],
    matches: impl Fn(&T) -> bool,
) -> Result<&'a T, bool> {
    let mut found = items.iter().filter(|item| matches(item));
    match (found.next(), found.next()) {
        (Some(item), None) => Ok(item),
        (Some(_), Some(_)) => Err(true),
        (None, _) => Err(false),
    }
}

fn ambiguous(kind: &str, reference: &str) -> PennywiseError {
    PennywiseError::Validation(format!(
        "'{}' matches more than one {}; use a longer id",
        reference, kind
    ))
}
