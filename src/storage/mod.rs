//! Storage Layer
//!
//! Settings file persistence.

pub mod config;

pub use config::SettingsStore;
