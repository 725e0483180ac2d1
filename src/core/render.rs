//! Report rendering for the terminal and for machine consumers.
//!
//! JSON output wraps results in the `{success, results}` / `{success, error}`
//! envelope and rounds percentages to two decimals. Text and table output
//! shorten the longest-common snippet and show a placeholder when empty.

use anyhow::Result;
use owo_colors::OwoColorize;
use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};

use crate::analysis::{SimilarityReport, Verdict};
use crate::cli::OutputFormat;

/// Shown in place of an empty longest-common snippet
pub const NO_COMMON_TEXT: &str = "No common text found";

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions
{
    pub color: bool,
    pub snippet_chars: usize,
}

impl Default for RenderOptions
{
    fn default() -> Self
    {
        Self { color: false, snippet_chars: 240 }
    }
}

/// Report with percentages rounded for display and transport
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundedReport
{
    pub ngram_similarity: f64,
    pub fingerprint_similarity: f64,
    pub cosine_similarity: f64,
    pub longest_common_words: usize,
    pub longest_common_text: String,
    pub overall_score: f64,
    pub verdict: Verdict,
}

impl From<&SimilarityReport> for RoundedReport
{
    fn from(r: &SimilarityReport) -> Self
    {
        Self {
            ngram_similarity: round2(r.ngram_similarity),
            fingerprint_similarity: round2(r.fingerprint_similarity),
            cosine_similarity: round2(r.cosine_similarity),
            longest_common_words: r.longest_common_words,
            longest_common_text: r
                .longest_common_text
                .clone(),
            overall_score: round2(r.overall_score),
            verdict: r.verdict,
        }
    }
}

/// Transport envelope: a full report or an error, never both.
///
/// Fields are private so `success` always agrees with the outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope
{
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<serde_json::Value>,
    #[serde(flatten)]
    outcome: Outcome,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
enum Outcome
{
    Results(RoundedReport),
    Error(String),
}

impl Envelope
{
    pub fn ok(
        report: &SimilarityReport,
        id: Option<serde_json::Value>,
    ) -> Self
    {
        Self { success: true, id, outcome: Outcome::Results(report.into()) }
    }

    pub fn err(
        error: impl std::fmt::Display,
        id: Option<serde_json::Value>,
    ) -> Self
    {
        Self { success: false, id, outcome: Outcome::Error(error.to_string()) }
    }

    pub fn is_success(&self) -> bool
    {
        self.success
    }

    pub fn id(&self) -> Option<&serde_json::Value>
    {
        self.id
            .as_ref()
    }

    /// Rounded report for a success, `None` for a failure
    pub fn results(&self) -> Option<&RoundedReport>
    {
        match &self.outcome
        {
            Outcome::Results(r) => Some(r),
            Outcome::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str>
    {
        match &self.outcome
        {
            Outcome::Results(_) => None,
            Outcome::Error(e) => Some(e.as_str()),
        }
    }
}

pub fn round2(x: f64) -> f64
{
    (x * 100.0).round() / 100.0
}

/// Render a report in the requested format
pub fn render(
    report: &SimilarityReport,
    format: OutputFormat,
    opts: &RenderOptions,
) -> Result<String>
{
    match format
    {
        OutputFormat::Json => Ok(serde_json::to_string(&Envelope::ok(report, None))?),
        OutputFormat::Table => Ok(render_table(report, opts)),
        OutputFormat::Text => Ok(render_text(report, opts)),
    }
}

fn render_text(
    report: &SimilarityReport,
    opts: &RenderOptions,
) -> String
{
    let verdict = format!("{} ({})", report.verdict, report.verdict.severity());
    let verdict = if opts.color { paint(report.verdict, &verdict) } else { verdict };

    let mut out = String::new();
    out.push_str(&format!("Overall similarity: {:.2}%  {}\n", report.overall_score, verdict));
    out.push_str(&format!("  N-gram overlap:       {:>6.2}%\n", report.ngram_similarity));
    out.push_str(&format!("  Fingerprint overlap:  {:>6.2}%\n", report.fingerprint_similarity));
    out.push_str(&format!("  Cosine similarity:    {:>6.2}%\n", report.cosine_similarity));
    out.push_str(&format!("  Longest common run:   {} words\n", report.longest_common_words));
    out.push_str(&format!("  \"{}\"\n", snippet(&report.longest_common_text, opts.snippet_chars)));
    out
}

fn render_table(
    report: &SimilarityReport,
    opts: &RenderOptions,
) -> String
{
    #[derive(Tabled)]
    struct Row
    {
        metric: &'static str,
        value: String,
    }

    let verdict = if opts.color
    {
        paint(report.verdict, report.verdict.label())
    }
    else
    {
        report
            .verdict
            .label()
            .to_string()
    };

    let rows = vec![
        Row { metric: "Overall", value: format!("{:.2}%", report.overall_score) },
        Row { metric: "N-gram", value: format!("{:.2}%", report.ngram_similarity) },
        Row { metric: "Fingerprint", value: format!("{:.2}%", report.fingerprint_similarity) },
        Row { metric: "Cosine", value: format!("{:.2}%", report.cosine_similarity) },
        Row { metric: "Longest common words", value: report.longest_common_words.to_string() },
        Row {
            metric: "Longest common text",
            value: snippet(&report.longest_common_text, opts.snippet_chars),
        },
        Row { metric: "Verdict", value: verdict },
    ];

    let mut table = Table::new(rows);
    table.with(Style::modern());
    format!("{table}\n")
}

fn paint(
    verdict: Verdict,
    s: &str,
) -> String
{
    match verdict
    {
        Verdict::High => s
            .red()
            .bold()
            .to_string(),
        Verdict::Moderate => s
            .yellow()
            .bold()
            .to_string(),
        Verdict::Low => s
            .green()
            .to_string(),
    }
}

/// Cut to `max_chars` characters with an ellipsis; placeholder when empty
fn snippet(
    text: &str,
    max_chars: usize,
) -> String
{
    if text.is_empty()
    {
        return NO_COMMON_TEXT.to_string();
    }
    if max_chars == 0 || text.chars().count() <= max_chars
    {
        return text.to_string();
    }
    let mut cut: String = text
        .chars()
        .take(max_chars.saturating_sub(1))
        .collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::analysis::compare;

    #[test]
    fn rounds_to_two_decimals()
    {
        assert_eq!(round2(28.867513459481287), 28.87);
        assert_eq!(round2(100.0), 100.0);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn json_uses_success_envelope()
    {
        let report = compare("the cat sat on the mat", "a dog ran in the park").unwrap();
        let json = render(&report, OutputFormat::Json, &RenderOptions::default()).unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v["success"], true);
        assert!(v.get("id").is_none());
        assert_eq!(v["results"]["cosineSimilarity"], 28.87);
        assert_eq!(v["results"]["overallScore"], 14.43);
        assert_eq!(v["results"]["longestCommonText"], "the");
        assert_eq!(v["results"]["verdict"], "Low Similarity");
    }

    #[test]
    fn failure_envelope_carries_only_the_error()
    {
        let env = Envelope::err("boom", Some(serde_json::json!(7)));
        assert!(!env.is_success());
        let v = serde_json::to_value(&env).unwrap();
        assert_eq!(v, serde_json::json!({ "success": false, "id": 7, "error": "boom" }));
    }

    #[test]
    fn success_flag_follows_the_outcome()
    {
        let report = compare("alpha beta gamma", "alpha beta gamma").unwrap();
        let ok = Envelope::ok(&report, None);
        assert!(ok.is_success());
        assert!(ok.results().is_some());
        assert!(ok.error().is_none());

        let v = serde_json::to_value(&ok).unwrap();
        assert_eq!(v["success"], true);
        assert!(v.get("error").is_none());
        assert_eq!(v.as_object().unwrap().len(), 2);

        let failed = Envelope::err("bad record", Some(serde_json::json!("x")));
        assert!(!failed.is_success());
        assert!(failed.results().is_none());
        assert_eq!(failed.error(), Some("bad record"));
        assert_eq!(failed.id(), Some(&serde_json::json!("x")));
    }

    #[test]
    fn text_output_lists_every_metric()
    {
        let doc = "same words appear in both documents";
        let report = compare(doc, doc).unwrap();
        let text = render(&report, OutputFormat::Text, &RenderOptions::default()).unwrap();
        assert!(text.starts_with("Overall similarity: 100.00%  High Similarity (severe)"));
        assert!(text.contains("N-gram overlap:"));
        assert!(text.contains("Fingerprint overlap:"));
        assert!(text.contains("Cosine similarity:"));
        assert!(text.contains("Longest common run:   6 words"));
        assert!(text.contains("\"same words appear in both documents\""));
    }

    #[test]
    fn empty_snippet_uses_placeholder()
    {
        let report = compare("", "").unwrap();
        let table = render(&report, OutputFormat::Table, &RenderOptions::default()).unwrap();
        assert!(table.contains(NO_COMMON_TEXT));
        assert!(table.contains("Low Similarity"));
    }

    #[test]
    fn long_snippets_are_shortened()
    {
        assert_eq!(snippet("abcdefgh", 4), "abc…");
        assert_eq!(snippet("abc", 4), "abc");
        assert_eq!(snippet("abcdefgh", 0), "abcdefgh");
    }
}
