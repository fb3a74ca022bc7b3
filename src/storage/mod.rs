//! Storage layer
//!
//! The model is persisted as a single JSON snapshot written atomically.

pub mod file_io;
pub mod snapshot;

pub use file_io::{read_json, write_json_atomic};
pub use snapshot::SnapshotRepository;
