//! `plag compare`: one pair of documents, one report.

use anyhow::{Context, Result, bail};
use tracing::info;

use crate::analysis::{AnalysisConfig, Comparator, Side};
use crate::cli::{AppContext, CompareArgs};
use crate::core::render::{RenderOptions, render};
use crate::infra::config::{Config, load_config};
use crate::infra::io::{FileContent, STDIN_MARKER, read_document};

pub fn run(
    args: CompareArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let config = load_config().unwrap_or_default();
    let comparator = build_comparator(&config, &args)?;

    let (first, second) = load_pair(&args)?;
    let report = comparator
        .compare(first.as_ref(), second.as_ref())
        .context("Comparison failed")?;

    info!(overall = report.overall_score, verdict = %report.verdict, "compared documents");

    let format = args
        .format
        .unwrap_or(config.output.format);
    let opts = RenderOptions { color: !ctx.no_color, snippet_chars: config.output.snippet_chars };
    let rendered = render(&report, format, &opts)?;

    // The report is the command's output, so --quiet does not hide it
    print!("{rendered}");
    if !rendered.ends_with('\n')
    {
        println!();
    }

    if let Some(limit) = args.fail_above
        && report.overall_score > limit
    {
        bail!(
            "overall similarity {:.2}% is above the allowed {:.2}% ({})",
            report.overall_score,
            limit,
            report.verdict
        );
    }

    Ok(())
}

/// Merge config-file settings with command-line overrides
pub fn build_comparator(
    config: &Config,
    args: &CompareArgs,
) -> Result<Comparator>
{
    let analysis = apply_overrides(
        config
            .analysis
            .clone(),
        args.ngram_size,
        args.max_tokens,
        args.weighting,
    );
    Ok(Comparator::new(analysis)?)
}

pub(crate) fn apply_overrides(
    mut analysis: AnalysisConfig,
    ngram_size: Option<usize>,
    max_tokens: Option<usize>,
    weighting: Option<crate::analysis::Weighting>,
) -> AnalysisConfig
{
    if let Some(n) = ngram_size
    {
        analysis.ngram_size = n;
    }
    if let Some(cap) = max_tokens
    {
        analysis.max_tokens = cap;
    }
    if let Some(w) = weighting
    {
        analysis.weighting = w;
    }
    analysis
}

fn load_pair(args: &CompareArgs) -> Result<(FileContent, FileContent)>
{
    if args.inline
    {
        return Ok((
            FileContent::Buffered(args.first.clone()),
            FileContent::Buffered(args.second.clone()),
        ));
    }

    if args.first == STDIN_MARKER && args.second == STDIN_MARKER
    {
        return Err(crate::analysis::AnalysisError::invalid_input(
            Side::Second,
            "standard input can supply only one document",
        )
        .into());
    }

    let first = read_document(args.first.as_ref(), Side::First)?;
    let second = read_document(args.second.as_ref(), Side::Second)?;
    Ok((first, second))
}
