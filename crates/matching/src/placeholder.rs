//! Reference Pattern Resolution
//!
//! Model summary patterns carry a placeholder (by default `#ID#`) where the
//! document identifier goes. Resolution substitutes the identifier, compiles
//! the result and collects every model file it matches.

use std::path::Path;

use rouge_harness_core::{CoreError, CoreResult};

use crate::pattern::{list_filenames, FilenamePattern};

/// Placeholder used when none is configured
pub const DEFAULT_PLACEHOLDER: &str = "#ID#";

/// A model filename pattern with an identifier placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferencePattern {
    template: String,
    placeholder: String,
}

impl ReferencePattern {
    /// Pattern using the default `#ID#` placeholder
    pub fn new(template: impl Into<String>) -> Self {
        Self::with_placeholder(template, DEFAULT_PLACEHOLDER)
    }

    pub fn with_placeholder(template: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            placeholder: placeholder.into(),
        }
    }

    /// The unsubstituted pattern text
    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Whether the template mentions the placeholder at all
    pub fn has_placeholder(&self) -> bool {
        !self.placeholder.is_empty() && self.template.contains(&self.placeholder)
    }

    /// Substitute an identifier and compile the pattern for it.
    ///
    /// The identifier is inserted literally: regex metacharacters in it are
    /// escaped. Older ROUGE wrappers substituted it as raw regex text, so an
    /// identifier like `1.2` there also matched `1x2`.
    pub fn compile_for(&self, identifier: &str) -> CoreResult<FilenamePattern> {
        let source = if self.placeholder.is_empty() {
            self.template.clone()
        } else {
            self.template
                .replace(&self.placeholder, &regex::escape(identifier))
        };
        FilenamePattern::new(&source)
    }

    /// Select the model files for an identifier out of a directory listing.
    ///
    /// Results are sorted lexicographically. An empty selection fails with
    /// `MissingReferences`.
    pub fn resolve(&self, identifier: &str, filenames: &[String]) -> CoreResult<Vec<String>> {
        let pattern = self.compile_for(identifier)?;
        let mut matched: Vec<String> = filenames
            .iter()
            .filter(|name| pattern.is_match(name))
            .cloned()
            .collect();

        if matched.is_empty() {
            if !self.has_placeholder() {
                tracing::warn!(
                    "[Resolver] Model pattern '{}' has no '{}' placeholder",
                    self.template,
                    self.placeholder
                );
            }
            return Err(CoreError::missing_references(identifier, &self.template));
        }

        matched.sort();
        Ok(matched)
    }
}

/// Find all model files in `directory` for one document identifier.
pub fn resolve_references(
    identifier: &str,
    directory: &Path,
    pattern: &str,
    placeholder: &str,
) -> CoreResult<Vec<String>> {
    let filenames = list_filenames(directory)?;
    ReferencePattern::with_placeholder(pattern, placeholder).resolve(identifier, &filenames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn listing() -> Vec<String> {
        ["ref-002-A.html", "ref-001-B.html", "ref-001-A.html", "readme.txt"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_resolve_sorted() {
        let pattern = ReferencePattern::new(r"ref-#ID#-[A-Z]\.html");
        let refs = pattern.resolve("001", &listing()).unwrap();
        assert_eq!(refs, vec!["ref-001-A.html", "ref-001-B.html"]);
    }

    #[test]
    fn test_resolve_missing_references() {
        let pattern = ReferencePattern::new(r"ref-#ID#-[A-Z]\.html");
        let err = pattern.resolve("003", &listing()).unwrap_err();
        match err {
            CoreError::MissingReferences { identifier, pattern } => {
                assert_eq!(identifier, "003");
                assert_eq!(pattern, r"ref-#ID#-[A-Z]\.html");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_every_placeholder_occurrence_replaced() {
        let pattern = ReferencePattern::new(r"#ID#/ref-#ID#\.html");
        let names = vec!["7/ref-7.html".to_string(), "7/ref-8.html".to_string()];
        assert_eq!(pattern.resolve("7", &names).unwrap(), vec!["7/ref-7.html"]);
    }

    #[test]
    fn test_identifier_is_literal() {
        let pattern = ReferencePattern::new(r"ref-#ID#\.html");
        let names = vec!["ref-1x2.html".to_string(), "ref-1.2.html".to_string()];
        assert_eq!(pattern.resolve("1.2", &names).unwrap(), vec!["ref-1.2.html"]);
    }

    #[test]
    fn test_custom_placeholder() {
        let pattern = ReferencePattern::with_placeholder(r"ref-{doc}-[A-Z]\.html", "{doc}");
        assert_eq!(pattern.resolve("002", &listing()).unwrap(), vec!["ref-002-A.html"]);
    }

    #[test]
    fn test_pattern_without_placeholder() {
        let pattern = ReferencePattern::new(r"ref-001-A\.html");
        assert!(!pattern.has_placeholder());
        // Matches the same file for every identifier
        assert_eq!(pattern.resolve("999", &listing()).unwrap(), vec!["ref-001-A.html"]);
    }

    #[test]
    fn test_resolve_references_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        for name in listing() {
            fs::write(dir.path().join(name), "x").unwrap();
        }
        let refs = resolve_references("002", dir.path(), r"ref-#ID#-[A-Z]\.html", "#ID#").unwrap();
        assert_eq!(refs, vec!["ref-002-A.html"]);
    }
}
