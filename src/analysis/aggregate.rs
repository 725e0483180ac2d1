//! Combine metric scores into an overall score and a verdict band.

use serde::{Deserialize, Serialize};

use super::{error::AnalysisError, longest::CommonRun};

/// Integer percentage weights for the overall score.
///
/// The overall score is `(ngram·wn + fingerprint·wf + cosine·wc) / (wn + wf + wc)`.
/// Integer weights keep `100` on every metric mapping to exactly `100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights
{
    pub ngram: u32,
    pub fingerprint: u32,
    pub cosine: u32,
}

impl Default for Weights
{
    fn default() -> Self
    {
        Self { ngram: 30, fingerprint: 20, cosine: 50 }
    }
}

impl Weights
{
    /// Sum in `u64` so three `u32` weights cannot overflow
    pub fn total(&self) -> u64
    {
        u64::from(self.ngram) + u64::from(self.fingerprint) + u64::from(self.cosine)
    }

    pub fn validate(&self) -> Result<(), AnalysisError>
    {
        if self.total() == 0
        {
            return Err(AnalysisError::InvalidConfig(
                "metric weights must not all be zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Weighted mean of the three percentage metrics, clamped to [0, 100]
    pub fn combine(
        &self,
        ngram: f64,
        fingerprint: f64,
        cosine: f64,
    ) -> f64
    {
        let total = self.total();
        if total == 0
        {
            return 0.0;
        }
        let sum = ngram * f64::from(self.ngram)
            + fingerprint * f64::from(self.fingerprint)
            + cosine * f64::from(self.cosine);
        // Exact: total < 2^34
        (sum / total as f64).clamp(0.0, 100.0)
    }
}

/// Verdict thresholds: above `high` is severe, above `moderate` is caution.
///
/// Bands are half-open on the left so every score falls in exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bands
{
    pub moderate: f64,
    pub high: f64,
}

impl Default for Bands
{
    fn default() -> Self
    {
        Self { moderate: 30.0, high: 70.0 }
    }
}

impl Bands
{
    pub fn validate(&self) -> Result<(), AnalysisError>
    {
        let in_range = |x: f64| (0.0..=100.0).contains(&x);
        if !in_range(self.moderate) || !in_range(self.high) || self.moderate >= self.high
        {
            return Err(AnalysisError::InvalidConfig(format!(
                "verdict bands must satisfy 0 <= moderate < high <= 100 (got moderate={}, high={})",
                self.moderate, self.high
            )));
        }
        Ok(())
    }

    pub fn classify(
        &self,
        overall: f64,
    ) -> Verdict
    {
        if overall > self.high
        {
            Verdict::High
        }
        else if overall > self.moderate
        {
            Verdict::Moderate
        }
        else
        {
            Verdict::Low
        }
    }
}

/// Qualitative band derived from the overall score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict
{
    #[serde(rename = "High Similarity")]
    High,
    #[serde(rename = "Moderate Similarity")]
    Moderate,
    #[serde(rename = "Low Similarity")]
    Low,
}

impl Verdict
{
    pub fn label(&self) -> &'static str
    {
        match self
        {
            Verdict::High => "High Similarity",
            Verdict::Moderate => "Moderate Similarity",
            Verdict::Low => "Low Similarity",
        }
    }

    /// Severity keyword: severe, caution, pass
    pub fn severity(&self) -> &'static str
    {
        match self
        {
            Verdict::High => "severe",
            Verdict::Moderate => "caution",
            Verdict::Low => "pass",
        }
    }
}

impl std::fmt::Display for Verdict
{
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result
    {
        f.write_str(self.label())
    }
}

/// Result of one comparison. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityReport
{
    pub overall_score: f64,
    pub ngram_similarity: f64,
    pub fingerprint_similarity: f64,
    pub cosine_similarity: f64,
    pub longest_common_words: usize,
    pub longest_common_text: String,
    pub verdict: Verdict,
}

/// Build the report from the four metrics
pub fn aggregate(
    ngram: f64,
    fingerprint: f64,
    cosine: f64,
    longest: CommonRun,
    weights: &Weights,
    bands: &Bands,
) -> SimilarityReport
{
    let overall = weights.combine(ngram, fingerprint, cosine);

    SimilarityReport {
        overall_score: overall,
        ngram_similarity: ngram,
        fingerprint_similarity: fingerprint,
        cosine_similarity: cosine,
        longest_common_words: longest.count,
        longest_common_text: longest.text,
        verdict: bands.classify(overall),
    }
}
