//! Reports over recorded expenses

pub mod statistics;

pub use statistics::Statistics;
