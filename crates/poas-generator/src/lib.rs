//! POAS Generator - Turtle generation pipelines
//!
//! Three independent generators turn text inputs into Turtle fragments of
//! the POAS vocabulary:
//! - [`rules::RuleGenerator`]: pattern rules -> symmetric `RuleResult` pairs
//! - [`tree::TreeEncoder`]: dependency-parsed word records -> `TreeWord`s
//! - [`sentence::SentenceEncoder`]: plain sentences -> `SentenceWord`s
//!
//! The [`jobs`] module wraps them into file-level batch jobs.

use serde::{Deserialize, Serialize};

use poas_core::Result;

pub mod jobs;
pub mod rules;
pub mod sentence;
pub mod tree;

pub use jobs::{BatchReport, FileOutcome, FileStatus};
pub use rules::{LeftWord, PatternRule, Position, RuleBlock, RuleGenerator};
pub use sentence::SentenceEncoder;
pub use tree::{TreeEncoder, TreeWordRecord};

/// Input line that produced no output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedLine {
    /// 1-based line number
    pub line: usize,
    /// Why the line was skipped
    pub reason: String,
}

/// Summary of a single generator run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobReport {
    /// Non-blank input lines (or words, for sentences) processed
    pub records_read: usize,
    /// Individuals written
    pub blocks_written: usize,
    /// Lines skipped as malformed
    pub skipped: Vec<SkippedLine>,
}

impl JobReport {
    /// Record a skipped line
    pub fn skip(&mut self, line: usize, reason: impl Into<String>) {
        self.skipped.push(SkippedLine {
            line,
            reason: reason.into(),
        });
    }

    /// Whether every record produced output
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Generated Turtle text plus its report
#[derive(Debug, Clone)]
pub struct Generated {
    pub text: String,
    pub report: JobReport,
}

/// Trait for generators turning one text input into Turtle text
pub trait TurtleGenerator {
    /// Generate the complete output for `input`
    fn generate(&self, input: &str) -> Result<Generated>;

    /// Get generator name for logging
    fn name(&self) -> &str;
}
