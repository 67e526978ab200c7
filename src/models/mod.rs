//! Data Models
//!
//! Structures persisted by the application.

pub mod settings;

pub use settings::{RougeSettings, ROUGE_DATA_DIR_NAME, ROUGE_SCRIPT_NAME};
