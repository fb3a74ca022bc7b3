//! User settings for Pennywise

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use super::paths::PennywisePaths;
use crate::error::{PennywiseError, PennywiseResult};
use crate::history::DEFAULT_CAPACITY;

/// User settings, stored as `config.json` in the base directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Number of commands that can be undone
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,

    /// Whether history operations are written to the audit log
    #[serde(default = "default_true")]
    pub audit_enabled: bool,

    /// Date format for listings (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// How many days ahead scheduled events are shown as reminders
    #[serde(default = "default_upcoming_days")]
    pub upcoming_days: u32,
}

fn default_schema_version() -> u32 {
    1
}

fn default_history_capacity() -> usize {
    DEFAULT_CAPACITY
}

fn default_true() -> bool {
    true
}

fn default_date_format() -> String {
    "%Y-%m-%d %H:%M".to_string()
}

fn default_upcoming_days() -> u32 {
    7
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            history_capacity: default_history_capacity(),
            audit_enabled: true,
            date_format: default_date_format(),
            upcoming_days: default_upcoming_days(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or the defaults if the file doesn't exist
    pub fn load_or_create(paths: &PennywisePaths) -> PennywiseResult<Self> {
        let settings_path = paths.settings_file();
        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| PennywiseError::Io(format!("Failed to read settings file: {}", e)))?;
        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| PennywiseError::Config(format!("Failed to parse settings file: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values that would fail later, at display time
    pub fn validate(&self) -> PennywiseResult<()> {
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(PennywiseError::Config(format!(
                "Invalid date_format '{}'",
                self.date_format
            )));
        }
        Ok(())
    }

    /// Save settings to disk
    pub fn save(&self, paths: &PennywisePaths) -> PennywiseResult<()> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| PennywiseError::Config(format!("Failed to serialize settings: {}", e)))?;
        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| PennywiseError::Io(format!("Failed to write settings file: {}", e)))
    }
}
