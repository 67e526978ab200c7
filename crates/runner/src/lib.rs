//! Rouge Harness Runner
//!
//! Everything between a resolved task list and a parsed score table:
//!
//! - `document` - ROUGE-EVAL configuration document generation
//! - `invoker` - ROUGE command line builder and subprocess execution
//! - `output` - Parsing of ROUGE's textual report into a `ResultSet`

pub mod document;
pub mod invoker;
pub mod output;

// Re-export document generation
pub use document::{generate, reference_letter, write_document, DEFAULT_PEER_ID, ROUGE_EVAL_VERSION};

// Re-export invocation types
pub use invoker::{invoke, ProcessInvoker, RougeArgs, RougeCommand, RougeOptions, DEFAULT_INTERPRETER};

// Re-export report parsing
pub use output::{metric_key, parse, Measure, ResultSet};
