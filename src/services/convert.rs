//! Summary Conversion
//!
//! ROUGE reads summaries in its SEE HTML format: one anchor per sentence.
//! These helpers turn plain text (one sentence per line) into that format.

use std::path::Path;

use crate::utils::error::AppResult;
use crate::utils::paths::{ensure_dir, verify_dir};

/// Title used when none is given; ROUGE ignores it
pub const DEFAULT_TITLE: &str = "dummy title";

/// Convert one-sentence-per-line text into ROUGE's HTML format.
pub fn convert_text_to_rouge_format(text: &str, title: Option<&str>) -> String {
    let sentences: Vec<String> = text
        .lines()
        .enumerate()
        .map(|(index, sentence)| {
            let i = index + 1;
            format!("<a name=\"{i}\">[{i}]</a> <a href=\"#{i}\" id={i}>{sentence}</a>")
        })
        .collect();

    format!(
        "<html>\n<head>\n<title>{}</title>\n</head>\n<body bgcolor=\"white\">\n{}\n</body>\n</html>",
        title.unwrap_or(DEFAULT_TITLE),
        sentences.join("\n")
    )
}

/// Convert every regular file in `input_dir` and write the result under the
/// same name in `output_dir`. Returns the number of files converted.
pub fn convert_summaries_to_rouge_format(input_dir: &Path, output_dir: &Path) -> AppResult<usize> {
    verify_dir(input_dir, "input")?;
    ensure_dir(output_dir)?;

    let mut entries = Vec::new();
    for entry in std::fs::read_dir(input_dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            entries.push(entry.path());
        }
    }
    entries.sort();

    for path in &entries {
        let text = std::fs::read_to_string(path)?;
        let html = convert_text_to_rouge_format(&text, None);
        if let Some(name) = path.file_name() {
            std::fs::write(output_dir.join(name), html)?;
        }
    }

    tracing::info!(
        "[Convert] Converted {} summaries from {} to {}",
        entries.len(),
        input_dir.display(),
        output_dir.display()
    );
    Ok(entries.len())
}
