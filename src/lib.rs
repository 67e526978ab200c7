//! Rouge Harness
//!
//! Prepares ROUGE-1.5.5 evaluations and runs them:
//! - Settings persistence for the ROUGE installation path
//! - Conversion of plain-text summaries into ROUGE's HTML format
//! - The evaluation pipeline (association, configuration document, invocation, parsing)
//!
//! The matching and runner logic lives in the `rouge-harness-matching` and
//! `rouge-harness-runner` workspace crates and is re-exported here.

pub mod models;
pub mod services;
pub mod storage;
pub mod utils;

pub use models::RougeSettings;
pub use services::{Evaluation, EvaluationConfig, EvaluationConfigBuilder, WrittenConfig};
pub use storage::SettingsStore;
pub use utils::error::{AppError, AppResult};

pub use rouge_harness_core::{CoreError, CoreResult, EvalTask, MatchedFile, PeerEntry};
pub use rouge_harness_matching::{AssociationRequest, FilenamePattern, ReferencePattern, VariantAlignment};
pub use rouge_harness_runner::{Measure, ProcessInvoker, ResultSet, RougeArgs, RougeCommand, RougeOptions};
