//! Path management for Pennywise
//!
//! ## Path Resolution Order
//!
//! 1. `PENNYWISE_DATA_DIR` environment variable (if set)
//! 2. The platform configuration directory from `directories`
//!    (`~/.config/pennywise` on Linux, `%APPDATA%\pennywise\config` on Windows)

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::{PennywiseError, PennywiseResult};

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "PENNYWISE_DATA_DIR";

/// Locations of every file Pennywise reads or writes
#[derive(Debug, Clone)]
pub struct PennywisePaths {
    base_dir: PathBuf,
}

impl PennywisePaths {
    /// Resolve the base directory from the environment or the platform
    ///
    /// # Errors
    ///
    /// Returns a `Config` error if no home directory can be determined.
    pub fn new() -> PennywiseResult<Self> {
        let base_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };
        Ok(Self { base_dir })
    }

    /// Use an explicit base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// The saved model snapshot
    pub fn snapshot_file(&self) -> PathBuf {
        self.data_dir().join("pennywise.json")
    }

    /// Create the base and data directories if missing
    pub fn ensure_directories(&self) -> PennywiseResult<()> {
        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| PennywiseError::Io(format!("Failed to create data directory: {}", e)))
    }
}

fn resolve_default_path() -> PennywiseResult<PathBuf> {
    ProjectDirs::from("", "", "pennywise")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| PennywiseError::Config("Could not determine home directory".into()))
}
