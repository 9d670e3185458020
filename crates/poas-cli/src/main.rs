//! POAS CLI - Command-line interface
//!
//! Usage:
//!   poas rules [--input <patterns>] [--output <rules>]
//!   poas domain [--patterns <p>] [--dependencies <d>] [--output <ttl>]...
//!   poas tree <input> <output>
//!   poas tree-dir [--input-dir <dir>] [--output-dir <dir>]
//!   poas sentence <sentence> [--base <ttl>] [--output <ttl>]...
//!   poas merge <first> <second> <output>
//!   poas classify <label>...

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use poas_core::{AppConfig, DependencyTable, LoggingConfig};
use poas_generator::jobs;
use poas_generator::{BatchReport, JobReport};

#[derive(Parser)]
#[command(name = "poas")]
#[command(about = "Generate POAS ontology individuals in Turtle")]
#[command(version)]
struct Cli {
    /// TOML configuration file (environment variables still override it)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print job reports as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate rule individuals from a pattern file
    Rules {
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Generate rules and merge them after the dependency individuals
    Domain {
        #[arg(long)]
        patterns: Option<PathBuf>,
        #[arg(long)]
        rules_output: Option<PathBuf>,
        #[arg(long)]
        dependencies: Option<PathBuf>,
        /// Merged output file (repeatable)
        #[arg(long = "output")]
        outputs: Vec<PathBuf>,
    },
    /// Encode one dependency tree file
    Tree { input: PathBuf, output: PathBuf },
    /// Encode every .txt tree file of a directory
    TreeDir {
        #[arg(long)]
        input_dir: Option<PathBuf>,
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Append sentence words to an existing Turtle file
    Sentence {
        sentence: String,
        #[arg(long)]
        base: Option<PathBuf>,
        /// Output file (repeatable)
        #[arg(long = "output")]
        outputs: Vec<PathBuf>,
    },
    /// Concatenate two files with a blank-line separator
    Merge {
        first: PathBuf,
        second: PathBuf,
        output: PathBuf,
    },
    /// Show how dependency labels are classified
    Classify {
        #[arg(required = true)]
        labels: Vec<String>,
    },
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Self::Rules { .. } => "rules",
            Self::Domain { .. } => "domain",
            Self::Tree { .. } => "tree",
            Self::TreeDir { .. } => "tree-dir",
            Self::Sentence { .. } => "sentence",
            Self::Merge { .. } => "merge",
            Self::Classify { .. } => "classify",
        }
    }
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("poas={0},poas_generator={0}", logging.level)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(logging.include_location)
        .with_line_number(logging.include_location)
        .with_writer(std::io::stderr);

    if logging.json_format {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn print_report<T: Serialize + std::fmt::Debug>(report: &T, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("{report:#?}");
    }
    Ok(())
}

fn print_job(report: &JobReport, json: bool) -> anyhow::Result<()> {
    if json {
        return print_report(report, true);
    }
    println!(
        "{} records, {} blocks written, {} skipped",
        report.records_read,
        report.blocks_written,
        report.skipped.len()
    );
    for skipped in &report.skipped {
        println!("  line {}: {}", skipped.line, skipped.reason);
    }
    Ok(())
}

fn finish_batch(batch: &BatchReport, json: bool) -> anyhow::Result<()> {
    if json {
        print_report(batch, true)?;
    } else {
        for outcome in &batch.outcomes {
            let status = if outcome.is_success() { "ok" } else { "FAILED" };
            println!(
                "[{status}] {} -> {}",
                outcome.input.display(),
                outcome.output.display()
            );
        }
    }

    if !batch.is_success() {
        tracing::error!(
            "{} of {} files failed",
            batch.failed(),
            batch.outcomes.len()
        );
        anyhow::bail!("{} of {} files failed", batch.failed(), batch.outcomes.len());
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;
    init_tracing(&config.logging);
    tracing::info!("Running {}", cli.command.name());

    let paths = config.paths;
    let table = DependencyTable::standard();

    match cli.command {
        Commands::Rules { input, output } => {
            let input = input.unwrap_or(paths.patterns);
            let output = output.unwrap_or(paths.rules_output);
            let report = jobs::generate_rules_file(&input, &output)?;
            print_job(&report, cli.json)?;
        }
        Commands::Domain {
            patterns,
            rules_output,
            dependencies,
            outputs,
        } => {
            let outputs = if outputs.is_empty() {
                paths.domain_outputs
            } else {
                outputs
            };
            let batch = jobs::build_domain(
                &patterns.unwrap_or(paths.patterns),
                &rules_output.unwrap_or(paths.rules_output),
                &dependencies.unwrap_or(paths.dependencies),
                &outputs,
            )?;
            finish_batch(&batch, cli.json)?;
        }
        Commands::Tree { input, output } => {
            let report = jobs::encode_tree_file(&table, &input, &output)?;
            print_job(&report, cli.json)?;
        }
        Commands::TreeDir {
            input_dir,
            output_dir,
        } => {
            let batch = jobs::encode_tree_dir(
                &table,
                &input_dir.unwrap_or(paths.tree_input_dir),
                &output_dir.unwrap_or(paths.tree_output_dir),
            )?;
            finish_batch(&batch, cli.json)?;
        }
        Commands::Sentence {
            sentence,
            base,
            outputs,
        } => {
            let outputs = if outputs.is_empty() {
                paths.sentence_outputs
            } else {
                outputs
            };
            let batch =
                jobs::append_sentence(&base.unwrap_or(paths.base_ttl), &sentence, &outputs)?;
            finish_batch(&batch, cli.json)?;
        }
        Commands::Merge {
            first,
            second,
            output,
        } => {
            jobs::merge_files(&first, &second, &output)?;
            println!("Files merged successfully into {}", output.display());
        }
        Commands::Classify { labels } => {
            let classes: Vec<_> = labels
                .iter()
                .map(|label| (label.as_str(), table.classify(label)))
                .collect();
            if cli.json {
                print_report(&classes, true)?;
            } else {
                for (label, class) in &classes {
                    let marker = if table.contains(label) { "" } else { " (unknown)" };
                    println!("{label} -> {class}{marker}");
                }
            }
        }
    }

    Ok(())
}
