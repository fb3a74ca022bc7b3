//! Pennywise - personal expense tracking with recurring budgets
//!
//! Expenses are recorded against budgets whose caps reset every period.
//! Future payments can be scheduled as events and turn into expenses once
//! their time has passed. Every change to the data is one undoable step.
//!
//! # Architecture
//!
//! - `models`: expenses, events, budgets, periods and the menu catalog
//! - `store`: the domain store and the reversible edits it journals
//! - `history`: undo/redo stacks over committed changes
//! - `timekeeper`: the clock and due-event queries
//! - `model`: store, history and clock together
//! - `commands`: validated user commands and their execution
//! - `reports`: spending statistics
//! - `storage`, `config`, `audit`, `logging`: persistence and ambient services
//! - `cli`, `display`: the interactive session and its output
//!
//! # Example
//!
//! ```rust,ignore
//! use pennywise::config::PennywisePaths;
//! use pennywise::cli::Session;
//!
//! let paths = PennywisePaths::new()?;
//! let mut session = Session::open(&paths)?;
//! session.handle_line("add Kopi 1.40 -c food");
//! ```

pub mod audit;
pub mod cli;
pub mod commands;
pub mod config;
pub mod display;
pub mod error;
pub mod history;
pub mod logging;
pub mod model;
pub mod models;
pub mod reports;
pub mod storage;
pub mod store;
pub mod timekeeper;

pub use error::{PennywiseError, PennywiseResult};
