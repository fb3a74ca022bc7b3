//! Undo/redo history
//!
//! A `Change` is the journal of edits one command made to the domain store.
//! `ModelHistory` keeps committed changes on a past stack and undone ones on
//! a future stack; rolling back applies a change's inverse edits in reverse
//! order, migrating re-applies its edits forward.

mod change;
mod engine;

pub use change::Change;
pub use engine::{ModelHistory, DEFAULT_CAPACITY};
