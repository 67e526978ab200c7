//! Rouge Harness Core
//!
//! Foundational error types and data models for the rouge-harness workspace.
//! This crate has no dependencies on the filesystem scanning, subprocess, or
//! CLI code.
//!
//! ## Module Organization
//!
//! - `error` - Core error types (`CoreError`, `CoreResult`)
//! - `models` - Matched files, peer entries and evaluation tasks

pub mod error;
pub mod models;

// ── Error Types ────────────────────────────────────────────────────────
pub use error::{CoreError, CoreResult};

// ── Models ─────────────────────────────────────────────────────────────
pub use models::{EvalTask, MatchedFile, PeerEntry};
