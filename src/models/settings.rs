//! Settings Models
//!
//! Persisted settings: where the ROUGE-1.5.5 installation lives.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// File name of the ROUGE script inside the home directory
pub const ROUGE_SCRIPT_NAME: &str = "ROUGE-1.5.5.pl";

/// Name of ROUGE's data directory inside the home directory
pub const ROUGE_DATA_DIR_NAME: &str = "data";

/// Settings stored in settings.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RougeSettings {
    /// ROUGE home directory, containing ROUGE-1.5.5.pl and data/
    pub home_dir: PathBuf,
}

impl RougeSettings {
    pub fn new(home_dir: impl AsRef<Path>) -> Self {
        Self {
            home_dir: home_dir.as_ref().to_path_buf(),
        }
    }

    /// Path of the ROUGE script
    pub fn bin_path(&self) -> PathBuf {
        self.home_dir.join(ROUGE_SCRIPT_NAME)
    }

    /// Path of ROUGE's data directory
    pub fn data_dir(&self) -> PathBuf {
        self.home_dir.join(ROUGE_DATA_DIR_NAME)
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<(), String> {
        if self.home_dir.as_os_str().is_empty() {
            return Err("ROUGE home directory is empty".to_string());
        }
        if !self.bin_path().is_file() {
            return Err(format!(
                "ROUGE binary not found at {}. Please set the correct path by running \
                 rouge-harness set-rouge-path /path/to/rouge/home",
                self.bin_path().display()
            ));
        }
        Ok(())
    }
}
