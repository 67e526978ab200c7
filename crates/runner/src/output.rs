//! ROUGE Report Parsing
//!
//! Extracts scores from ROUGE-1.5.5 output lines such as
//!
//! ```text
//! 1 ROUGE-1 Average_F: 0.95652 (95%-conf.int. 0.94000 - 0.97000)
//! ```
//!
//! Every such line yields three entries: the score, and its lower (`_cb`)
//! and upper (`_ce`) confidence bounds. Other lines are ignored.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// The measure reported on an `Average_*` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
    Recall,
    Precision,
    FScore,
}

impl Measure {
    /// Map ROUGE's `Average_R`/`Average_P`/`Average_F` labels
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Average_R" => Some(Measure::Recall),
            "Average_P" => Some(Measure::Precision),
            "Average_F" => Some(Measure::FScore),
            _ => None,
        }
    }

    /// Key suffix used in the result set
    pub fn key(&self) -> &'static str {
        match self {
            Measure::Recall => "recall",
            Measure::Precision => "precision",
            Measure::FScore => "f_score",
        }
    }
}

impl std::fmt::Display for Measure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Parsed ROUGE scores keyed like `rouge_1_f_score`, `rouge_1_f_score_cb`,
/// `rouge_1_f_score_ce`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultSet {
    scores: BTreeMap<String, f64>,
}

impl ResultSet {
    /// Look up a score by its full key
    pub fn get(&self, key: &str) -> Option<f64> {
        self.scores.get(key).copied()
    }

    /// Look up a score by metric name (`ROUGE-L` or `rouge_l`) and measure
    pub fn score(&self, metric: &str, measure: Measure) -> Option<f64> {
        self.get(&format!("{}_{}", metric_key(metric), measure.key()))
    }

    /// Confidence interval `(lower, upper)` for a metric and measure
    pub fn interval(&self, metric: &str, measure: Measure) -> Option<(f64, f64)> {
        let key = format!("{}_{}", metric_key(metric), measure.key());
        Some((self.get(&format!("{}_cb", key))?, self.get(&format!("{}_ce", key))?))
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.scores.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// Normalize a metric name: lowercase, hyphens to underscores.
pub fn metric_key(metric: &str) -> String {
    metric.to_lowercase().replace('-', "_")
}

fn line_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            Regex::new(
                r"^(\d+) (ROUGE-\S+) (Average_\w): (\d+\.\d+) \(95%-conf\.int\. (\d+\.\d+) - (\d+\.\d+)\)",
            )
            .ok()
        })
        .as_ref()
}

/// Parse a ROUGE report. Lines that do not match the score format are
/// skipped, so an empty result is possible.
pub fn parse(output: &str) -> ResultSet {
    let mut scores = BTreeMap::new();
    let Some(pattern) = line_pattern() else {
        return ResultSet { scores };
    };

    for line in output.lines() {
        let Some(caps) = pattern.captures(line.trim_end()) else {
            continue;
        };
        let Some(measure) = Measure::from_label(&caps[3]) else {
            tracing::debug!("[Parser] Unknown measure in line: {}", line);
            continue;
        };
        let (Ok(value), Ok(low), Ok(high)) = (
            caps[4].parse::<f64>(),
            caps[5].parse::<f64>(),
            caps[6].parse::<f64>(),
        ) else {
            continue;
        };

        let key = format!("{}_{}", metric_key(&caps[2]), measure.key());
        scores.insert(format!("{}_cb", key), low);
        scores.insert(format!("{}_ce", key), high);
        scores.insert(key, value);
    }

    tracing::debug!("[Parser] Parsed {} score entries", scores.len());
    ResultSet { scores }
}
