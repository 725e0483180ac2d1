//! Comparison facade: two texts in, one [`SimilarityReport`] out.
//!
//! A [`Comparator`] holds only immutable settings, so one instance can serve
//! any number of threads. Each call is a pure function of its two inputs.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::{
    aggregate::{Bands, SimilarityReport, Weights, aggregate},
    cosine::{Weighting, cosine_similarity},
    error::{AnalysisError, Side},
    fingerprint::{DEFAULT_KGRAM, DEFAULT_WINDOW, fingerprint_similarity},
    longest::longest_common,
    shingle::{DEFAULT_NGRAM_SIZE, ngram_similarity},
    tokenize::{TokenSequence, tokenize},
};

/// Default per-document token cap for the quadratic longest-common pass
pub const DEFAULT_MAX_TOKENS: usize = 20_000;

/// Tunable analysis constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig
{
    /// Shingle width for n-gram overlap
    pub ngram_size: usize,
    /// Shingle width for fingerprint hashing
    pub fingerprint_kgram: usize,
    /// Winnowing window, in hashes
    pub winnow_window: usize,
    /// Reject documents with more tokens than this; 0 disables the cap
    pub max_tokens: usize,
    /// Term weighting for cosine similarity
    pub weighting: Weighting,
    /// Overall-score weights
    pub weights: Weights,
    /// Verdict thresholds
    pub bands: Bands,
}

impl Default for AnalysisConfig
{
    fn default() -> Self
    {
        Self {
            ngram_size: DEFAULT_NGRAM_SIZE,
            fingerprint_kgram: DEFAULT_KGRAM,
            winnow_window: DEFAULT_WINDOW,
            max_tokens: DEFAULT_MAX_TOKENS,
            weighting: Weighting::default(),
            weights: Weights::default(),
            bands: Bands::default(),
        }
    }
}

/// Stateless two-document comparator
#[derive(Debug, Clone, Default)]
pub struct Comparator
{
    config: AnalysisConfig,
}

impl Comparator
{
    /// Validate settings once so every later comparison is infallible apart from input checks
    pub fn new(config: AnalysisConfig) -> Result<Self, AnalysisError>
    {
        config
            .weights
            .validate()?;
        config
            .bands
            .validate()?;

        if config.ngram_size == 0 || config.fingerprint_kgram == 0 || config.winnow_window == 0
        {
            return Err(AnalysisError::InvalidConfig(
                "ngram_size, fingerprint_kgram and winnow_window must be at least 1".to_string(),
            ));
        }

        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalysisConfig
    {
        &self.config
    }

    /// Compare two raw texts
    #[instrument(level = "debug", skip_all, fields(left_bytes = text1.len(), right_bytes = text2.len()))]
    pub fn compare(
        &self,
        text1: &str,
        text2: &str,
    ) -> Result<SimilarityReport, AnalysisError>
    {
        let seq1 = tokenize(text1);
        let seq2 = tokenize(text2);
        self.compare_tokens(&seq1, &seq2)
    }

    /// Compare texts that may be absent; an absent side is invalid input
    pub fn compare_opt(
        &self,
        text1: Option<&str>,
        text2: Option<&str>,
    ) -> Result<SimilarityReport, AnalysisError>
    {
        let text1 = text1.ok_or_else(|| AnalysisError::invalid_input(Side::First, "text is missing"))?;
        let text2 =
            text2.ok_or_else(|| AnalysisError::invalid_input(Side::Second, "text is missing"))?;
        self.compare(text1, text2)
    }

    /// Compare two already-tokenized documents
    pub fn compare_tokens(
        &self,
        seq1: &TokenSequence,
        seq2: &TokenSequence,
    ) -> Result<SimilarityReport, AnalysisError>
    {
        self.check_size(Side::First, seq1)?;
        self.check_size(Side::Second, seq2)?;

        let cfg = &self.config;
        let ngram = ngram_similarity(seq1, seq2, cfg.ngram_size);
        let fingerprint =
            fingerprint_similarity(seq1, seq2, cfg.fingerprint_kgram, cfg.winnow_window);
        let cosine = cosine_similarity(seq1, seq2, cfg.weighting);
        let longest = longest_common(seq1, seq2);

        let report = aggregate(ngram, fingerprint, cosine, longest, &cfg.weights, &cfg.bands);
        debug!(overall = report.overall_score, verdict = %report.verdict, "comparison complete");
        Ok(report)
    }

    fn check_size(
        &self,
        which: Side,
        seq: &TokenSequence,
    ) -> Result<(), AnalysisError>
    {
        let limit = self
            .config
            .max_tokens;
        if limit > 0 && seq.len() > limit
        {
            return Err(AnalysisError::ComputationOverflow { which, tokens: seq.len(), limit });
        }
        Ok(())
    }
}

/// Compare two texts with default settings
pub fn compare(
    text1: &str,
    text2: &str,
) -> Result<SimilarityReport, AnalysisError>
{
    Comparator::default().compare(text1, text2)
}
