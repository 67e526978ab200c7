//! Rouge Harness Matching
//!
//! Discovers system and model summary files on disk and groups them into
//! evaluation tasks:
//!
//! - `pattern` - Start-anchored filename patterns and directory scanning
//! - `placeholder` - Model patterns with an `#ID#` placeholder
//! - `association` - Single-system and multi-variant task resolution

pub mod association;
pub mod pattern;
pub mod placeholder;

pub use association::{resolve, resolve_listings, variant_pattern, AssociationRequest, VariantAlignment};
pub use pattern::{list_filenames, match_candidates, match_filenames, FilenamePattern};
pub use placeholder::{resolve_references, ReferencePattern, DEFAULT_PLACEHOLDER};
