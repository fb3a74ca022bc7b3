//! A sealed group of edits belonging to one command

use crate::store::Edit;

/// Everything needed to undo and redo one command
#[derive(Debug, Clone, PartialEq)]
pub struct Change {
    description: String,
    edits: Vec<Edit>,
}

impl Change {
    pub fn new(description: impl Into<String>, edits: Vec<Edit>) -> Self {
        Self {
            description: description.into(),
            edits,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Edits in the order they were made
    pub fn edits(&self) -> &[Edit] {
        &self.edits
    }

    /// A command that validated but changed nothing still yields a change
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Edits that undo this change, in the order they must be applied
    pub fn inverse_edits(&self) -> impl Iterator<Item = Edit> + '_ {
        self.edits.iter().rev().map(Edit::inverse)
    }

    /// One summary line per edit
    pub fn summaries(&self) -> Vec<String> {
        self.edits.iter().map(Edit::summary).collect()
    }
}
