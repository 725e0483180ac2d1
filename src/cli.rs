use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::analysis::Weighting;

/// Shared application context for global flags
#[derive(Clone, Debug)]
pub struct AppContext {
    pub quiet: bool,    // global --quiet
    pub no_color: bool, // global --no-color
    pub verbose: u8,    // global -v count
}

#[derive(Parser)]
#[command(name = "plag")]
#[command(about = "Compare two documents and report how similar they are")]
#[command(version, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Suppress progress bars and non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compare two documents
    Compare(CompareArgs),

    /// Compare many document pairs from a JSONL file
    Batch(BatchArgs),

    /// Initialize a plagcheck.toml config file
    Init(InitArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable summary
    #[default]
    Text,
    /// Metric table
    Table,
    /// Single JSON object
    Json,
}

#[derive(Parser, Debug)]
pub struct CompareArgs {
    /// First document (file path, or - for stdin)
    pub first: String,

    /// Second document (file path, or - for stdin)
    pub second: String,

    /// Treat both arguments as literal text instead of paths
    #[arg(long)]
    pub inline: bool,

    /// Output format (defaults to the config file, then text)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Shingle width for n-gram overlap
    #[arg(long)]
    pub ngram_size: Option<usize>,

    /// Reject documents with more tokens than this (0 = unlimited)
    #[arg(long)]
    pub max_tokens: Option<usize>,

    /// Term weighting for cosine similarity
    #[arg(long, value_enum)]
    pub weighting: Option<Weighting>,

    /// Exit with an error when the overall score is above this value (0-100)
    #[arg(long, value_name = "SCORE", value_parser = parse_score)]
    pub fail_above: Option<f64>,
}

/// Accept a percentage in [0, 100]; NaN and out-of-range values are rejected
pub fn parse_score(s: &str) -> Result<f64, String> {
    let value: f64 = s.trim().parse().map_err(|e| format!("`{s}` is not a number: {e}"))?;
    if !(0.0..=100.0).contains(&value) {
        return Err(format!("`{s}` must be between 0 and 100"));
    }
    Ok(value)
}

#[derive(Parser, Debug)]
pub struct BatchArgs {
    /// JSONL file of {"text1": ..., "text2": ...} records (or - for stdin)
    pub input: PathBuf,

    /// Write results here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Shingle width for n-gram overlap
    #[arg(long)]
    pub ngram_size: Option<usize>,

    /// Reject documents with more tokens than this (0 = unlimited)
    #[arg(long)]
    pub max_tokens: Option<usize>,

    /// Term weighting for cosine similarity
    #[arg(long, value_enum)]
    pub weighting: Option<Weighting>,
}

#[derive(Parser)]
pub struct InitArgs {
    /// Directory to initialize config in
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing config file
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Parser)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,

    /// Output directory; if omitted and --stdout not set, prints error
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Print completion script to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,
}
