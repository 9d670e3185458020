//! File-level batch jobs
//!
//! Every job reads its inputs fully, assembles the complete output in
//! memory and only then writes it, via a temporary file renamed into place.
//! A failed job never leaves a truncated output behind. Batch jobs report
//! one [`FileOutcome`] per file and keep going after a failure.

use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use poas_core::{DependencyTable, PoasError, Result};

use crate::{JobReport, RuleGenerator, SentenceEncoder, TreeEncoder, TurtleGenerator};

/// Extension of tree input files
pub const TREE_INPUT_EXTENSION: &str = ".txt";

// ============================================================================
// Reports
// ============================================================================

/// Result of one file within a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileStatus {
    Succeeded { report: JobReport },
    Failed { error: String },
}

/// Outcome for a single input/output pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileOutcome {
    pub input: PathBuf,
    pub output: PathBuf,
    #[serde(flatten)]
    pub status: FileStatus,
}

impl FileOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self.status, FileStatus::Succeeded { .. })
    }
}

/// Per-file outcomes of a batch job
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the result of one file, logging failures
    pub fn record(&mut self, input: &Path, output: &Path, result: Result<JobReport>) {
        let status = match result {
            Ok(report) => FileStatus::Succeeded { report },
            Err(e) => {
                tracing::warn!("Failed {} -> {}: {}", input.display(), output.display(), e);
                FileStatus::Failed {
                    error: e.to_string(),
                }
            }
        };

        self.outcomes.push(FileOutcome {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            status,
        });
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// True when no file failed
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    /// Append another batch's outcomes
    pub fn extend(&mut self, other: BatchReport) {
        self.outcomes.extend(other.outcomes);
    }
}

// ============================================================================
// File helpers
// ============================================================================

/// Read an input file, reporting a missing file as `MissingInputFile`
pub fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| PoasError::from_input(path, e))
}

/// Write `content` to `path` through a temporary sibling file
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent).map_err(|e| PoasError::from_output(&parent, e))?;

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            PoasError::from_output(
                path,
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "invalid output file name"),
            )
        })?;
    let tmp_path = parent.join(format!(".{file_name}.poas.tmp.{}", uuid::Uuid::new_v4().simple()));

    {
        let mut tmp = fs::OpenOptions::new()
            .create_new(true)
            .write(true)
            .open(&tmp_path)
            .map_err(|e| PoasError::from_output(&tmp_path, e))?;
        tmp.write_all(content.as_bytes())
            .and_then(|_| tmp.sync_all())
            .map_err(|e| {
                let _ = fs::remove_file(&tmp_path);
                PoasError::from_output(&tmp_path, e)
            })?;
    }

    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(PoasError::from_output(path, e));
    }

    Ok(())
}

// ============================================================================
// Jobs
// ============================================================================

/// Run a generator over one input file and write its output
pub fn run_file_job(
    generator: &dyn TurtleGenerator,
    input: &Path,
    output: &Path,
) -> Result<JobReport> {
    let content = read_input(input)?;
    let generated = generator.generate(&content)?;
    write_atomic(output, &generated.text)?;

    tracing::info!(
        "{}: {} -> {} ({} blocks, {} skipped)",
        generator.name(),
        input.display(),
        output.display(),
        generated.report.blocks_written,
        generated.report.skipped.len()
    );

    Ok(generated.report)
}

/// Generate rule blocks from a pattern file
pub fn generate_rules_file(input: &Path, output: &Path) -> Result<JobReport> {
    run_file_job(&RuleGenerator::new(), input, output)
}

/// Encode one tree file
pub fn encode_tree_file(table: &DependencyTable, input: &Path, output: &Path) -> Result<JobReport> {
    run_file_job(&TreeEncoder::new(table), input, output)
}

/// Output file name for the entry at sorted position `index`
pub fn tree_output_name(index: usize) -> String {
    format!("output{:02}.ttl", index + 1)
}

/// Encode every `.txt` file of `input_dir` into `output_dir`.
///
/// Entries are sorted by file name and numbered by their position among all
/// entries, so `outputNN.ttl` stays stable when non-tree files sit alongside.
pub fn encode_tree_dir(
    table: &DependencyTable,
    input_dir: &Path,
    output_dir: &Path,
) -> Result<BatchReport> {
    fs::create_dir_all(output_dir).map_err(|e| PoasError::from_output(output_dir, e))?;

    let mut names: Vec<OsString> = Vec::new();
    for entry in fs::read_dir(input_dir).map_err(|e| PoasError::from_input(input_dir, e))? {
        match entry {
            Ok(entry) => names.push(entry.file_name()),
            Err(e) => tracing::warn!("Unreadable entry in {}: {}", input_dir.display(), e),
        }
    }
    names.sort();

    let mut batch = BatchReport::new();
    for (index, name) in names.iter().enumerate() {
        // Names are matched lossily but joined as-is, so non-UTF-8 names still resolve
        if !name.to_string_lossy().ends_with(TREE_INPUT_EXTENSION) {
            continue;
        }

        let input = input_dir.join(name);
        let output = output_dir.join(tree_output_name(index));
        let result = encode_tree_file(table, &input, &output);
        batch.record(&input, &output, result);
    }

    tracing::info!(
        "Tree batch {}: {} succeeded, {} failed",
        input_dir.display(),
        batch.succeeded(),
        batch.failed()
    );

    Ok(batch)
}

/// Concatenate two files with a newline separator into `output`
pub fn merge_files(first: &Path, second: &Path, output: &Path) -> Result<()> {
    let first_content = read_input(first)?;
    let second_content = read_input(second)?;

    let mut merged = String::with_capacity(first_content.len() + second_content.len() + 1);
    merged.push_str(&first_content);
    merged.push('\n');
    merged.push_str(&second_content);

    write_atomic(output, &merged)?;
    tracing::info!("Merged {} + {} -> {}", first.display(), second.display(), output.display());
    Ok(())
}

/// Append sentence words to an existing Turtle file, writing each output.
///
/// A missing base file fails the whole job; a failing output only fails
/// its own entry.
pub fn append_sentence(base: &Path, sentence: &str, outputs: &[PathBuf]) -> Result<BatchReport> {
    let existing = read_input(base)?;
    let generated = SentenceEncoder::new().generate(sentence)?;

    let mut combined = String::with_capacity(existing.len() + generated.text.len() + 2);
    combined.push_str(&existing);
    combined.push_str("\n\n");
    combined.push_str(&generated.text);

    let mut batch = BatchReport::new();
    for output in outputs {
        let result = write_atomic(output, &combined).map(|_| generated.report.clone());
        if result.is_ok() {
            tracing::info!("Sentence appended to {}", output.display());
        }
        batch.record(base, output, result);
    }

    Ok(batch)
}

/// Generate the rules file and merge it after the dependency individuals
/// into each domain output
pub fn build_domain(
    patterns: &Path,
    rules_output: &Path,
    dependencies: &Path,
    domain_outputs: &[PathBuf],
) -> Result<BatchReport> {
    let report = generate_rules_file(patterns, rules_output)?;

    let mut batch = BatchReport::new();
    batch.record(patterns, rules_output, Ok(report));

    for output in domain_outputs {
        let result = merge_files(dependencies, rules_output, output).map(|_| JobReport::default());
        batch.record(dependencies, output, result);
    }

    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_output_name() {
        assert_eq!(tree_output_name(0), "output01.ttl");
        assert_eq!(tree_output_name(9), "output10.ttl");
        assert_eq!(tree_output_name(99), "output100.ttl");
    }

    #[test]
    fn test_batch_report_counts() {
        let mut batch = BatchReport::new();
        batch.record(Path::new("a"), Path::new("b"), Ok(JobReport::default()));
        batch.record(
            Path::new("c"),
            Path::new("d"),
            Err(PoasError::MissingInputFile {
                path: PathBuf::from("c"),
            }),
        );

        assert_eq!(batch.succeeded(), 1);
        assert_eq!(batch.failed(), 1);
        assert!(!batch.is_success());
    }

    #[test]
    fn test_file_outcome_json_shape() {
        let mut batch = BatchReport::new();
        batch.record(
            Path::new("in.txt"),
            Path::new("out.ttl"),
            Err(PoasError::MissingInputFile {
                path: PathBuf::from("in.txt"),
            }),
        );

        let json = serde_json::to_value(&batch).unwrap();
        assert_eq!(json["outcomes"][0]["status"], "failed");
        assert_eq!(json["outcomes"][0]["input"], "in.txt");
        assert_eq!(json["outcomes"][0]["error"], "Input file not found: in.txt");
    }
}
