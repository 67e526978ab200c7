//! Filename Pattern Matching
//!
//! Compiles caller-supplied filename regexes and runs them against a
//! directory listing. Patterns are anchored at the start of the file name
//! only, so `sys-(\d+)` matches `sys-001.html`.

use std::path::Path;

use regex::Regex;
use rouge_harness_core::{CoreError, CoreResult, MatchedFile};

/// A compiled, start-anchored filename pattern.
#[derive(Debug, Clone)]
pub struct FilenamePattern {
    /// The pattern as written by the caller
    source: String,
    /// Compiled form, wrapped in `^(?:...)`
    regex: Regex,
}

impl FilenamePattern {
    /// Compile a pattern with prefix-match semantics.
    pub fn new(pattern: &str) -> CoreResult<Self> {
        let regex = Regex::new(&format!("^(?:{})", pattern))
            .map_err(|e| CoreError::pattern(format!("Invalid filename pattern '{}': {}", pattern, e)))?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// Compile a candidate pattern, which must capture the document identifier.
    pub fn candidate(pattern: &str) -> CoreResult<Self> {
        let compiled = Self::new(pattern)?;
        // captures_len counts the implicit whole-match group
        if compiled.regex.captures_len() < 2 {
            return Err(CoreError::pattern(format!(
                "System filename pattern '{}' needs a capturing group for the document ID",
                pattern
            )));
        }
        Ok(compiled)
    }

    /// The pattern text as supplied
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether the file name starts with a match
    pub fn is_match(&self, filename: &str) -> bool {
        self.regex.is_match(filename)
    }

    /// Extract the first capturing group from a matching file name.
    pub fn identifier(&self, filename: &str) -> Option<String> {
        let caps = self.regex.captures(filename)?;
        caps.get(1).map(|m| m.as_str().to_string())
    }
}

/// List the entry names of a directory.
///
/// Names that are not valid UTF-8 cannot be matched by a pattern and are
/// skipped.
pub fn list_filenames(directory: &Path) -> CoreResult<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(directory)? {
        let entry = entry?;
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => {
                tracing::warn!("[Matcher] Skipping non UTF-8 file name {:?}", raw);
            }
        }
    }
    Ok(names)
}

/// Match a pattern against file names, returning `(identifier, filename)`
/// pairs sorted by file name.
pub fn match_filenames(filenames: &[String], pattern: &FilenamePattern) -> Vec<MatchedFile> {
    let mut sorted: Vec<&String> = filenames.iter().collect();
    sorted.sort();

    sorted
        .into_iter()
        .filter_map(|name| {
            if !pattern.is_match(name) {
                return None;
            }
            match pattern.identifier(name) {
                Some(identifier) => Some(MatchedFile::new(identifier, name.clone())),
                None => {
                    tracing::warn!(
                        "[Matcher] '{}' matched '{}' without capturing an ID",
                        name,
                        pattern.as_str()
                    );
                    None
                }
            }
        })
        .collect()
}

/// Scan a directory for candidate files. An empty result is not an error
/// here; callers decide whether zero candidates is fatal.
pub fn match_candidates(directory: &Path, pattern: &FilenamePattern) -> CoreResult<Vec<MatchedFile>> {
    let filenames = list_filenames(directory)?;
    let matched = match_filenames(&filenames, pattern);
    tracing::debug!(
        "[Matcher] {} of {} files in {} match '{}'",
        matched.len(),
        filenames.len(),
        directory.display(),
        pattern.as_str()
    );
    Ok(matched)
}
