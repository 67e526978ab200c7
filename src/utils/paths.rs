//! Cross-Platform Path Utilities
//!
//! Resolves where rouge-harness keeps its settings, and small directory
//! checks shared by the settings and evaluation code.

use std::path::{Path, PathBuf};

use crate::utils::error::{AppError, AppResult};

/// Directory name under the platform config dir
pub const APP_DIR_NAME: &str = "rouge-harness";

/// Settings file name
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Get the platform configuration directory
pub fn config_dir() -> AppResult<PathBuf> {
    dirs::config_dir().ok_or_else(|| AppError::config("Could not determine configuration directory"))
}

/// Get the rouge-harness directory (e.g. ~/.config/rouge-harness/)
pub fn rouge_harness_dir() -> AppResult<PathBuf> {
    Ok(config_dir()?.join(APP_DIR_NAME))
}

/// Get the settings file path
pub fn settings_path() -> AppResult<PathBuf> {
    Ok(rouge_harness_dir()?.join(SETTINGS_FILE_NAME))
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> AppResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Fail unless `path` is an existing directory. `role` names the directory
/// in the error message.
pub fn verify_dir(path: &Path, role: &str) -> AppResult<()> {
    if !path.is_dir() {
        return Err(AppError::config(format!(
            "Cannot set {} directory because the path {} does not exist or is not a directory",
            role,
            path.display()
        )));
    }
    Ok(())
}
