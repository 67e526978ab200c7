//! Services
//!
//! Business logic: summary conversion and the evaluation pipeline.

pub mod convert;
pub mod evaluation;

pub use convert::{convert_summaries_to_rouge_format, convert_text_to_rouge_format};
pub use evaluation::{Evaluation, EvaluationConfig, EvaluationConfigBuilder, WrittenConfig};
