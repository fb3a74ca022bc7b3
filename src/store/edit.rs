//! Reversible edits
//!
//! Every change the domain store makes is one of three list operations on
//! one of its three collections. Each operation carries the full values on
//! both sides, so its inverse can be derived without looking at the store.

use serde::Serialize;

use crate::audit::field_changes;
use crate::error::{PennywiseError, PennywiseResult};
use crate::models::{Budget, Event, Expense};

/// A positional change to an ordered list
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ListEdit<T> {
    Insert { index: usize, item: T },
    Remove { index: usize, item: T },
    Replace { index: usize, before: T, after: T },
}

impl<T: Clone + PartialEq> ListEdit<T> {
    /// The edit that undoes this one
    pub fn inverse(&self) -> Self {
        match self {
            Self::Insert { index, item } => Self::Remove {
                index: *index,
                item: item.clone(),
            },
            Self::Remove { index, item } => Self::Insert {
                index: *index,
                item: item.clone(),
            },
            Self::Replace {
                index,
                before,
                after,
            } => Self::Replace {
                index: *index,
                before: after.clone(),
                after: before.clone(),
            },
        }
    }

    /// Apply to `list`, checking that the list is in the expected state
    pub fn apply_to(&self, list: &mut Vec<T>, kind: &str) -> PennywiseResult<()> {
        let mismatch = |index: usize| {
            PennywiseError::History(format!(
                "{} list does not match recorded state at position {}",
                kind, index
            ))
        };

        match self {
            Self::Insert { index, item } => {
                if *index > list.len() {
                    return Err(mismatch(*index));
                }
                list.insert(*index, item.clone());
            }
            Self::Remove { index, item } => {
                if list.get(*index) != Some(item) {
                    return Err(mismatch(*index));
                }
                list.remove(*index);
            }
            Self::Replace {
                index,
                before,
                after,
            } => match list.get_mut(*index) {
                Some(current) if current == before => *current = after.clone(),
                _ => return Err(mismatch(*index)),
            },
        }
        Ok(())
    }
}

/// One primitive change to the domain store
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "collection", content = "edit", rename_all = "snake_case")]
pub enum Edit {
    Expense(ListEdit<Expense>),
    Event(ListEdit<Event>),
    Budget(ListEdit<Budget>),
}

impl Edit {
    pub fn inverse(&self) -> Self {
        match self {
            Self::Expense(edit) => Self::Expense(edit.inverse()),
            Self::Event(edit) => Self::Event(edit.inverse()),
            Self::Budget(edit) => Self::Budget(edit.inverse()),
        }
    }

    /// One-line, human-readable account of the edit
    pub fn summary(&self) -> String {
        match self {
            Self::Expense(edit) => summarize(edit, "expense", |e| e.to_string()),
            Self::Event(edit) => summarize(edit, "event", |e| e.to_string()),
            Self::Budget(edit) => summarize(edit, "budget", |b| b.name.clone()),
        }
    }
}

fn summarize<T: Serialize>(edit: &ListEdit<T>, kind: &str, label: impl Fn(&T) -> String) -> String {
    match edit {
        ListEdit::Insert { item, .. } => format!("added {} {}", kind, label(item)),
        ListEdit::Remove { item, .. } => format!("removed {} {}", kind, label(item)),
        ListEdit::Replace { before, after, .. } => {
            let before_json = serde_json::to_value(before).unwrap_or_default();
            let after_json = serde_json::to_value(after).unwrap_or_default();
            let changes = field_changes(&before_json, &after_json);
            if changes.is_empty() {
                format!("kept {} {}", kind, label(after))
            } else {
                format!("changed {} {}: {}", kind, label(before), changes.join(", "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_then_inverse_restores_list() {
        let mut list = vec![1, 2, 3];
        let edit = ListEdit::Insert { index: 1, item: 9 };

        edit.apply_to(&mut list, "number").unwrap();
        assert_eq!(list, vec![1, 9, 2, 3]);

        edit.inverse().apply_to(&mut list, "number").unwrap();
        assert_eq!(list, vec![1, 2, 3]);
    }

    #[test]
    fn test_replace_inverse_swaps_sides() {
        let edit = ListEdit::Replace {
            index: 0,
            before: 'a',
            after: 'b',
        };
        assert_eq!(
            edit.inverse(),
            ListEdit::Replace {
                index: 0,
                before: 'b',
                after: 'a'
            }
        );
    }

    #[test]
    fn test_apply_detects_mismatch() {
        let mut list = vec![1, 2, 3];
        let edit = ListEdit::Remove { index: 0, item: 5 };
        let err = edit.apply_to(&mut list, "number").unwrap_err();
        assert!(matches!(err, PennywiseError::History(_)));
        assert_eq!(list, vec![1, 2, 3]);

        let out_of_range = ListEdit::Insert { index: 7, item: 4 };
        assert!(out_of_range.apply_to(&mut list, "number").is_err());
    }
}
