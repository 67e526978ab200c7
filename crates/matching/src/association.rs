//! System/Model Association
//!
//! Turns a system directory, a model directory and their filename patterns
//! into the ordered list of evaluation tasks. Two modes are supported:
//!
//! - single system: one task per matching system file
//! - multiple variants: every variant label narrows the system pattern to
//!   files ending in `.<label>`, and the per-variant lists are combined so
//!   that each task holds one peer per variant
//!
//! Resolution is all-or-nothing. Any candidate without model summaries
//! aborts the whole run.

use std::path::{Path, PathBuf};

use rouge_harness_core::{CoreError, CoreResult, EvalTask, MatchedFile, PeerEntry};
use serde::{Deserialize, Serialize};

use crate::pattern::{list_filenames, match_filenames, FilenamePattern};
use crate::placeholder::ReferencePattern;

/// How per-variant candidate lists are combined into tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantAlignment {
    /// Every position must carry the same identifier in every variant
    #[default]
    ByIdentifier,
    /// Zip lists by index; identifiers are not compared (legacy behaviour)
    Positional,
}

/// Inputs for association resolution.
#[derive(Debug, Clone)]
pub struct AssociationRequest {
    /// Directory holding system summaries
    pub system_dir: PathBuf,
    /// Candidate pattern; its first group captures the document ID
    pub system_pattern: String,
    /// Directory holding model summaries
    pub model_dir: PathBuf,
    /// Model pattern containing the placeholder
    pub model_pattern: ReferencePattern,
    /// Variant labels; empty for single-system evaluation
    pub variants: Vec<String>,
    /// Alignment policy for multi-variant mode
    pub alignment: VariantAlignment,
}

impl AssociationRequest {
    /// Create a single-system request with the default placeholder
    pub fn new(
        system_dir: impl AsRef<Path>,
        system_pattern: impl Into<String>,
        model_dir: impl AsRef<Path>,
        model_pattern: impl Into<String>,
    ) -> Self {
        Self {
            system_dir: system_dir.as_ref().to_path_buf(),
            system_pattern: system_pattern.into(),
            model_dir: model_dir.as_ref().to_path_buf(),
            model_pattern: ReferencePattern::new(model_pattern),
            variants: Vec::new(),
            alignment: VariantAlignment::default(),
        }
    }

    /// Use a custom model pattern placeholder
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.model_pattern =
            ReferencePattern::with_placeholder(self.model_pattern.template().to_string(), placeholder);
        self
    }

    /// Evaluate several labelled system variants
    pub fn with_variants(mut self, variants: Vec<String>) -> Self {
        self.variants = variants;
        self
    }

    /// Set the alignment policy
    pub fn with_alignment(mut self, alignment: VariantAlignment) -> Self {
        self.alignment = alignment;
        self
    }
}

/// Resolve a request into tasks, reading each directory once.
pub fn resolve(request: &AssociationRequest) -> CoreResult<Vec<EvalTask>> {
    let system_files = list_filenames(&request.system_dir)?;
    let model_files = list_filenames(&request.model_dir)?;
    resolve_listings(request, &system_files, &model_files)
}

/// Resolve a request against pre-read directory listings.
pub fn resolve_listings(
    request: &AssociationRequest,
    system_files: &[String],
    model_files: &[String],
) -> CoreResult<Vec<EvalTask>> {
    let tasks = if request.variants.is_empty() {
        resolve_single(request, system_files, model_files)?
    } else {
        resolve_variants(request, system_files, model_files)?
    };

    tracing::info!(
        "[Resolver] Resolved {} tasks from {}",
        tasks.len(),
        request.system_dir.display()
    );
    Ok(tasks)
}

fn resolve_single(
    request: &AssociationRequest,
    system_files: &[String],
    model_files: &[String],
) -> CoreResult<Vec<EvalTask>> {
    let pattern = FilenamePattern::candidate(&request.system_pattern)?;
    let candidates = match_filenames(system_files, &pattern);
    ensure_candidates(request, &pattern, &candidates)?;

    candidates
        .into_iter()
        .map(|candidate| {
            let references = request.model_pattern.resolve(&candidate.identifier, model_files)?;
            tracing::debug!(
                "[Resolver] {} -> {} model summaries",
                candidate.filename,
                references.len()
            );
            Ok(EvalTask::new(
                candidate.identifier,
                vec![PeerEntry::single(candidate.filename)],
                references,
            ))
        })
        .collect()
}

/// Candidate pattern for one variant: the base pattern followed by
/// `.<label>` at the end of the file name. The base is grouped so the
/// suffix applies to every alternation branch.
pub fn variant_pattern(base: &str, label: &str) -> String {
    format!(r"(?:{})\.{}$", base, regex::escape(label))
}

fn resolve_variants(
    request: &AssociationRequest,
    system_files: &[String],
    model_files: &[String],
) -> CoreResult<Vec<EvalTask>> {
    let mut per_variant: Vec<(&str, Vec<MatchedFile>)> = Vec::with_capacity(request.variants.len());
    for label in &request.variants {
        let pattern = FilenamePattern::candidate(&variant_pattern(&request.system_pattern, label))?;
        let matched = match_filenames(system_files, &pattern);
        tracing::info!("[Resolver] Variant '{}': {} system summaries", label, matched.len());
        ensure_candidates(request, &pattern, &matched)?;
        per_variant.push((label.as_str(), matched));
    }

    let Some((first_label, first)) = per_variant.first() else {
        return Ok(Vec::new());
    };
    for (label, files) in per_variant.iter().skip(1) {
        if files.len() != first.len() {
            return Err(CoreError::variant_mismatch(format!(
                "variant '{}' has {} system summaries but variant '{}' has {}",
                label,
                files.len(),
                first_label,
                first.len()
            )));
        }
    }

    let mut tasks = Vec::with_capacity(first.len());
    for (position, anchor) in first.iter().enumerate() {
        let mut peers = Vec::with_capacity(per_variant.len());
        for (label, files) in &per_variant {
            let file = &files[position];
            if request.alignment == VariantAlignment::ByIdentifier && file.identifier != anchor.identifier {
                return Err(CoreError::variant_mismatch(format!(
                    "position {} holds ID {} for variant '{}' but ID {} for variant '{}'",
                    position + 1,
                    file.identifier,
                    label,
                    anchor.identifier,
                    first_label
                )));
            }
            peers.push(PeerEntry::variant(*label, file.filename.clone()));
        }

        let references = request.model_pattern.resolve(&anchor.identifier, model_files)?;
        tasks.push(EvalTask::new(anchor.identifier.clone(), peers, references));
    }

    Ok(tasks)
}

fn ensure_candidates(
    request: &AssociationRequest,
    pattern: &FilenamePattern,
    candidates: &[MatchedFile],
) -> CoreResult<()> {
    if candidates.is_empty() {
        return Err(CoreError::NoCandidates {
            pattern: pattern.as_str().to_string(),
            directory: request.system_dir.display().to_string(),
        });
    }
    Ok(())
}
