//! Settings Management
//!
//! Reads and writes the settings file that remembers the ROUGE home
//! directory. Settings are loaded explicitly and handed to the evaluation
//! code; nothing here is global.

use std::fs;
use std::path::{Path, PathBuf};

use crate::models::settings::RougeSettings;
use crate::utils::error::{AppError, AppResult};
use crate::utils::paths::{ensure_dir, settings_path};

/// Settings store bound to one settings file
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Store at the platform default location
    pub fn new() -> AppResult<Self> {
        Ok(Self {
            path: settings_path()?,
        })
    }

    /// Store at an explicit path
    pub fn at(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the settings file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the settings, failing if none have been saved yet
    pub fn load(&self) -> AppResult<RougeSettings> {
        if !self.path.exists() {
            return Err(AppError::config(format!(
                "No ROUGE settings at {}. Run rouge-harness set-rouge-path /path/to/rouge/home first",
                self.path.display()
            )));
        }
        Self::load_from_file(&self.path)
    }

    /// Validate and persist the settings
    pub fn save(&self, settings: &RougeSettings) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        Self::save_to_file(&self.path, settings)?;
        tracing::info!(
            "[Settings] Set ROUGE home directory to {}.",
            settings.home_dir.display()
        );
        Ok(())
    }

    /// Load settings from a file
    fn load_from_file(path: &Path) -> AppResult<RougeSettings> {
        let content = fs::read_to_string(path)?;
        let settings: RougeSettings = serde_json::from_str(&content)?;
        settings.validate().map_err(AppError::config)?;
        Ok(settings)
    }

    /// Save settings to a file
    fn save_to_file(path: &Path, settings: &RougeSettings) -> AppResult<()> {
        settings.validate().map_err(AppError::config)?;
        let content = serde_json::to_string_pretty(settings)?;
        fs::write(path, content)?;
        Ok(())
    }
}
