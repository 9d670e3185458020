//! Dependency tree encoding
//!
//! Each input line is one word of a parsed sentence:
//!
//! ```text
//! <word_id>\t<word>\t<head_id>\t<dependency_label>
//! ```
//!
//! A head id of `0` marks the root. Every other word gets a dependency
//! individual linking its classified relation to its head, plus a
//! `TreeWord` pointing at both.

use poas_core::{DependencyTable, Individual, Result, PREAMBLE};

use crate::{Generated, JobReport, TurtleGenerator};

/// Head id marking the sentence root
pub const ROOT_HEAD: &str = "0";

/// Minimum number of tab-separated fields on a word line
pub const MIN_FIELDS: usize = 4;

/// One word of a dependency tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeWordRecord {
    pub word_id: String,
    pub word: String,
    pub head_id: String,
    pub label: String,
}

impl TreeWordRecord {
    /// Parse a tab-separated word line; `None` when it has too few fields
    pub fn parse(line: &str) -> Option<Self> {
        let fields: Vec<&str> = line.trim().split('\t').collect();
        if fields.len() < MIN_FIELDS {
            return None;
        }

        Some(Self {
            word_id: fields[0].to_string(),
            word: fields[1].to_string(),
            head_id: fields[2].to_string(),
            label: fields[3].to_string(),
        })
    }

    pub fn is_root(&self) -> bool {
        self.head_id == ROOT_HEAD
    }

    pub fn node_name(&self) -> String {
        format!("treeword_{}", self.word_id)
    }

    pub fn dependency_name(&self) -> String {
        format!("dep_treeword_{}", self.word_id)
    }

    fn head_node_name(&self) -> String {
        format!("treeword_{}", self.head_id)
    }
}

/// Individuals produced for one word
#[derive(Debug, Clone)]
pub struct EncodedWord {
    /// Dependency edge, absent for the root
    pub dependency: Option<Individual>,
    pub word: Individual,
}

impl EncodedWord {
    pub fn block_count(&self) -> usize {
        1 + usize::from(self.dependency.is_some())
    }
}

/// Encoder for tab-separated dependency tree files
#[derive(Debug, Clone, Copy)]
pub struct TreeEncoder<'a> {
    table: &'a DependencyTable,
}

impl<'a> TreeEncoder<'a> {
    pub fn new(table: &'a DependencyTable) -> Self {
        Self { table }
    }

    /// Encode a single record
    pub fn encode(&self, record: &TreeWordRecord) -> EncodedWord {
        if record.is_root() {
            let word = Individual::new(record.node_name())
                .with_class("TreeWord")
                .with_string("word", &record.word);
            return EncodedWord {
                dependency: None,
                word,
            };
        }

        let class = self.table.classify(&record.label);

        let dependency = Individual::new(record.dependency_name())
            .with_reference("isDependant_obj_0", class.node_name())
            .with_reference("isDependant_obj_1", record.head_node_name());

        let word = Individual::new(record.node_name())
            .with_class("TreeWord")
            .with_reference("isChild", record.head_node_name())
            .with_reference("isDependant_subj", record.dependency_name())
            .with_string("word", &record.word);

        EncodedWord {
            dependency: Some(dependency),
            word,
        }
    }

    /// Encode a single line; `None` for lines with too few fields
    pub fn encode_line(&self, line: &str) -> Option<EncodedWord> {
        TreeWordRecord::parse(line).map(|record| self.encode(&record))
    }
}

impl TurtleGenerator for TreeEncoder<'_> {
    fn generate(&self, input: &str) -> Result<Generated> {
        let mut dependencies = String::new();
        let mut words = String::new();
        let mut report = JobReport::default();

        for (idx, line) in input.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            report.records_read += 1;

            let Some(encoded) = self.encode_line(line) else {
                tracing::debug!("Skipping tree line {}: fewer than {} fields", idx + 1, MIN_FIELDS);
                report.skip(idx + 1, format!("fewer than {MIN_FIELDS} tab-separated fields"));
                continue;
            };

            report.blocks_written += encoded.block_count();
            if let Some(dependency) = &encoded.dependency {
                dependency.write_to(&mut dependencies);
            }
            encoded.word.write_to(&mut words);
        }

        let mut text = String::with_capacity(PREAMBLE.len() + dependencies.len() + words.len() + 1);
        text.push_str(PREAMBLE);
        text.push_str(&dependencies);
        text.push('\n');
        text.push_str(&words);

        Ok(Generated { text, report })
    }

    fn name(&self) -> &str {
        "tree"
    }
}

// ============================================================================
// Tests
// ============================================================================
