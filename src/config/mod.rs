//! Configuration: path resolution and user settings

pub mod paths;
pub mod settings;

pub use paths::PennywisePaths;
pub use settings::Settings;
