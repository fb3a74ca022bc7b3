//! Undo/redo stacks

use std::collections::VecDeque;

use tracing::{debug, info};

use super::change::Change;
use crate::error::{PennywiseError, PennywiseResult};
use crate::store::{DomainStore, Edit};

/// Default number of changes kept in each direction
pub const DEFAULT_CAPACITY: usize = 100;

/// Bounded past and future stacks of changes
///
/// The newest change sits at the back of each deque. When a stack is full
/// the oldest change is dropped.
#[derive(Debug)]
pub struct ModelHistory {
    past: VecDeque<Change>,
    future: VecDeque<Change>,
    capacity: usize,
}

impl Default for ModelHistory {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl ModelHistory {
    /// Create empty history; a capacity of zero is treated as one
    pub fn new(capacity: usize) -> Self {
        Self {
            past: VecDeque::new(),
            future: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Seal the store's pending edits into a change and clear the future
    pub fn commit(&mut self, store: &mut DomainStore, description: &str) -> &Change {
        let change = Change::new(description, store.take_journal());
        info!(
            description,
            edits = change.edits().len(),
            "Committed change"
        );
        self.future.clear();
        push_bounded(&mut self.past, change, self.capacity)
    }

    pub fn can_rollback(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_migrate(&self) -> bool {
        !self.future.is_empty()
    }

    /// Undo the most recent change
    pub fn rollback(&mut self, store: &mut DomainStore) -> PennywiseResult<&Change> {
        ensure_no_pending(store)?;
        let change = self
            .past
            .pop_back()
            .ok_or(PennywiseError::NoHistory("undo"))?;

        let edits: Vec<Edit> = change.inverse_edits().collect();
        if let Err(e) = apply_all(store, &edits) {
            self.past.push_back(change);
            return Err(e);
        }
        info!(description = change.description(), "Rolled back change");
        Ok(push_bounded(&mut self.future, change, self.capacity))
    }

    /// Redo the most recently undone change
    pub fn migrate(&mut self, store: &mut DomainStore) -> PennywiseResult<&Change> {
        ensure_no_pending(store)?;
        let change = self
            .future
            .pop_back()
            .ok_or(PennywiseError::NoHistory("redo"))?;

        if let Err(e) = apply_all(store, change.edits()) {
            self.future.push_back(change);
            return Err(e);
        }
        info!(description = change.description(), "Migrated change");
        Ok(push_bounded(&mut self.past, change, self.capacity))
    }

    /// Descriptions of undoable changes, most recent first
    pub fn past_descriptions(&self) -> impl Iterator<Item = &str> {
        self.past.iter().rev().map(Change::description)
    }

    /// Descriptions of redoable changes, next redo first
    pub fn future_descriptions(&self) -> impl Iterator<Item = &str> {
        self.future.iter().rev().map(Change::description)
    }
}

fn ensure_no_pending(store: &DomainStore) -> PennywiseResult<()> {
    if store.has_pending_edits() {
        return Err(PennywiseError::History(
            "Store has uncommitted edits".into(),
        ));
    }
    Ok(())
}

/// Apply `edits` in order; on failure, put back the ones already applied
fn apply_all(store: &mut DomainStore, edits: &[Edit]) -> PennywiseResult<()> {
    for (applied, edit) in edits.iter().enumerate() {
        if let Err(e) = store.apply(edit) {
            for done in edits[..applied].iter().rev() {
                if let Err(restore) = store.apply(&done.inverse()) {
                    debug!(error = %restore, "Could not restore edit");
                }
            }
            return Err(e);
        }
    }
    Ok(())
}

fn push_bounded(stack: &mut VecDeque<Change>, change: Change, capacity: usize) -> &Change {
    if stack.len() == capacity {
        stack.pop_front();
    }
    stack.push_back(change);
    &stack[stack.len() - 1]
}
