//! `plag batch`: compare many pairs from a JSONL file in parallel.
//!
//! Each input line is `{"text1": "...", "text2": "..."}` with an optional
//! `"id"` echoed back. Each output line is a success or failure envelope, in
//! input order. A bad record fails alone; the rest of the batch still runs.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use rayon::prelude::*;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::analysis::{AnalysisError, Comparator, Side, SimilarityReport};
use crate::cli::{AppContext, BatchArgs};
use crate::core::compare::apply_overrides;
use crate::core::render::Envelope;
use crate::infra::cache::TokenCache;
use crate::infra::config::load_config;
use crate::infra::io::STDIN_MARKER;

/// One pair to compare
#[derive(Debug, Clone, Deserialize)]
pub struct BatchRecord
{
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub text1: Option<String>,
    #[serde(default)]
    pub text2: Option<String>,
}

/// Counts reported after a batch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary
{
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

pub fn run(
    args: BatchArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let config = load_config().unwrap_or_default();
    let analysis = apply_overrides(
        config
            .analysis
            .clone(),
        args.ngram_size,
        args.max_tokens,
        args.weighting,
    );
    let comparator = Comparator::new(analysis)?;
    let cache = TokenCache::new(
        config
            .batch
            .cache_entries,
    );

    let input = read_input(&args.input)?;
    // Keep physical line numbers for error messages
    let lines: Vec<(usize, &str)> = input
        .lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty())
        .map(|(idx, l)| (idx + 1, l))
        .collect();

    // Set up progress bar (unless quiet mode)
    let progress = if ctx.quiet
    {
        ProgressBar::hidden()
    }
    else
    {
        let pb = ProgressBar::new(lines.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .context("Invalid progress template")?
                .progress_chars("#>-"),
        );
        pb
    };

    let envelopes = process_lines(&lines, &comparator, &cache, &progress);
    progress.finish_and_clear();

    let summary = write_envelopes(&envelopes, args.output.as_deref())?;
    info!(total = summary.total, failed = summary.failed, "batch complete");

    if !ctx.quiet
    {
        let failed = if summary.failed > 0 && !ctx.no_color
        {
            summary
                .failed
                .red()
                .to_string()
        }
        else
        {
            summary
                .failed
                .to_string()
        };
        eprintln!("Compared {} pairs: {} ok, {} failed", summary.total, summary.succeeded, failed);
    }

    Ok(())
}

/// Compare every line in parallel; output order matches input order
pub fn process_lines(
    lines: &[(usize, &str)],
    comparator: &Comparator,
    cache: &TokenCache,
    progress: &ProgressBar,
) -> Vec<Envelope>
{
    lines
        .par_iter()
        .map(|&(line_no, line)| {
            let envelope = match serde_json::from_str::<BatchRecord>(line)
            {
                Ok(record) =>
                {
                    let id = record
                        .id
                        .clone();
                    match compare_record(&record, comparator, cache)
                    {
                        Ok(report) => Envelope::ok(&report, id),
                        Err(e) =>
                        {
                            debug!(line = line_no, error = %e, "pair rejected");
                            Envelope::err(e, id)
                        }
                    }
                }
                Err(e) =>
                {
                    warn!(line = line_no, error = %e, "malformed batch record");
                    Envelope::err(format!("line {line_no}: malformed record: {e}"), None)
                }
            };
            progress.inc(1);
            envelope
        })
        .collect()
}

/// Compare one record; a missing side is invalid input
pub fn compare_record(
    record: &BatchRecord,
    comparator: &Comparator,
    cache: &TokenCache,
) -> Result<SimilarityReport, AnalysisError>
{
    let text1 = record
        .text1
        .as_deref()
        .ok_or_else(|| AnalysisError::invalid_input(Side::First, "missing field `text1`"))?;
    let text2 = record
        .text2
        .as_deref()
        .ok_or_else(|| AnalysisError::invalid_input(Side::Second, "missing field `text2`"))?;

    let seq1 = cache.tokens(text1);
    let seq2 = cache.tokens(text2);
    comparator.compare_tokens(&seq1, &seq2)
}

fn read_input(path: &Path) -> Result<String>
{
    if path.as_os_str() == STDIN_MARKER
    {
        let mut buf = String::new();
        std::io::stdin()
            .lock()
            .read_to_string(&mut buf)
            .context("Failed to read batch input from standard input")?;
        return Ok(buf);
    }

    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read batch file {}", path.display()))
}

fn write_envelopes(
    envelopes: &[Envelope],
    output: Option<&Path>,
) -> Result<BatchSummary>
{
    let mut sink: Box<dyn Write> = match output
    {
        Some(p) => Box::new(BufWriter::new(
            File::create(p).with_context(|| format!("Failed to create {}", p.display()))?,
        )),
        None => Box::new(BufWriter::new(std::io::stdout().lock())),
    };

    let mut summary = BatchSummary { total: envelopes.len(), ..Default::default() };
    for env in envelopes
    {
        serde_json::to_writer(&mut sink, env).context("Failed to serialize result")?;
        sink.write_all(b"\n")
            .context("Failed to write result")?;
        if env.is_success()
        {
            summary.succeeded += 1;
        }
        else
        {
            summary.failed += 1;
        }
    }
    sink.flush()
        .context("Failed to flush results")?;

    Ok(summary)
}

#[cfg(test)]
mod tests
{
    use super::*;

    fn run_lines(lines: &[&str]) -> Vec<serde_json::Value>
    {
        let comparator = Comparator::default();
        let cache = TokenCache::new(64);
        let numbered: Vec<(usize, &str)> = lines
            .iter()
            .enumerate()
            .map(|(idx, l)| (idx + 1, *l))
            .collect();
        process_lines(&numbered, &comparator, &cache, &ProgressBar::hidden())
            .iter()
            .map(|e| serde_json::to_value(e).unwrap())
            .collect()
    }

    #[test]
    fn results_keep_input_order_and_ids()
    {
        let out = run_lines(&[
            r#"{"id": "a", "text1": "the cat sat on the mat", "text2": "the cat sat on the mat"}"#,
            r#"{"id": 2, "text1": "the cat sat on the mat", "text2": "a dog ran in the park"}"#,
        ]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0]["id"], "a");
        assert_eq!(out[0]["results"]["overallScore"], 100.0);
        assert_eq!(out[1]["id"], 2);
        assert_eq!(out[1]["results"]["verdict"], "Low Similarity");
    }

    #[test]
    fn missing_text_fails_only_that_record()
    {
        let out = run_lines(&[
            r#"{"text1": "only one side"}"#,
            r#"{"text1": "", "text2": ""}"#,
        ]);
        assert_eq!(out[0]["success"], false);
        assert!(
            out[0]["error"]
                .as_str()
                .unwrap()
                .contains("text2")
        );
        assert!(out[0].get("results").is_none());
        assert_eq!(out[1]["success"], true);
        assert_eq!(out[1]["results"]["overallScore"], 0.0);
    }

    #[test]
    fn malformed_json_is_reported_with_line_number()
    {
        let out = run_lines(&[r#"{"text1": "a""#]);
        assert_eq!(out[0]["success"], false);
        assert!(
            out[0]["error"]
                .as_str()
                .unwrap()
                .starts_with("line 1: malformed record")
        );
    }

    #[test]
    fn compare_record_reuses_cached_tokens()
    {
        let comparator = Comparator::default();
        let cache = TokenCache::new(8);
        let record = BatchRecord {
            id: None,
            text1: Some("shared document text".into()),
            text2: Some("shared document text".into()),
        };
        let report = compare_record(&record, &comparator, &cache).unwrap();
        assert_eq!(report.longest_common_words, 3);
        assert_eq!(cache.entry_count(), 1);
    }
}
