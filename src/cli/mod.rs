//! Command-line session
//!
//! `line` turns one input line into an [`Action`], `parse` holds the value
//! parsers it uses, and `session` drives the read-execute-save loop.

pub mod line;
pub mod parse;
pub mod session;

pub use line::{parse_line, Action, ExpenseFilter};
pub use session::{Reply, Session};
