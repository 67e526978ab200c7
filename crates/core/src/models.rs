//! Evaluation Models
//!
//! Data structures passed between the matching and runner crates: files
//! picked out of a directory listing, and the candidate/reference groups
//! ("tasks") that end up in the ROUGE configuration document.

use serde::{Deserialize, Serialize};

/// A directory entry whose name matched a candidate pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedFile {
    /// Document identifier captured by the pattern's first group
    pub identifier: String,
    /// File name within the scanned directory
    pub filename: String,
}

impl MatchedFile {
    pub fn new(identifier: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            filename: filename.into(),
        }
    }
}

/// One system summary listed under a task's `<PEERS>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerEntry {
    /// Variant label, `None` when a single system is evaluated
    pub variant: Option<String>,
    /// File name relative to the system root
    pub filename: String,
}

impl PeerEntry {
    /// Peer of a single-system evaluation
    pub fn single(filename: impl Into<String>) -> Self {
        Self {
            variant: None,
            filename: filename.into(),
        }
    }

    /// Peer belonging to a labelled variant
    pub fn variant(label: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            variant: Some(label.into()),
            filename: filename.into(),
        }
    }
}

/// A resolved association: the candidates for one document identifier and
/// the full set of references they are scored against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalTask {
    /// Identifier shared by the peers (the first variant's, in multi-variant mode)
    pub identifier: String,
    /// System summaries, in variant order
    pub peers: Vec<PeerEntry>,
    /// Model summaries, sorted by file name; never empty
    pub references: Vec<String>,
}

impl EvalTask {
    pub fn new(identifier: impl Into<String>, peers: Vec<PeerEntry>, references: Vec<String>) -> Self {
        Self {
            identifier: identifier.into(),
            peers,
            references,
        }
    }
}
