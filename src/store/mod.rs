//! Domain store and its edit journal

pub mod domain;
pub mod edit;
pub mod snapshot;

pub use domain::DomainStore;
pub use edit::{Edit, ListEdit};
pub use snapshot::ModelSnapshot;
