//! Term vectors and cosine similarity.
//!
//! Vectors are keyed by an ordered map so the dot product and norms are
//! summed in the same order regardless of argument order, keeping the score
//! bit-identical under swapping.

use std::collections::BTreeMap;

use itertools::{EitherOrBoth, Itertools};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::tokenize::TokenSequence;

/// How term counts are weighted before taking the cosine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Weighting
{
    /// Raw term frequency
    #[default]
    Tf,
    /// Term frequency scaled by smoothed inverse document frequency
    Tfidf,
}

/// Per-document term counts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermVector<'a>
{
    counts: BTreeMap<&'a str, usize>,
    total: usize,
}

impl<'a> TermVector<'a>
{
    pub fn from_tokens(seq: &'a TokenSequence) -> Self
    {
        let mut counts = BTreeMap::new();
        for tok in seq.iter()
        {
            *counts
                .entry(tok.as_str())
                .or_insert(0) += 1;
        }
        Self { counts, total: seq.len() }
    }

    pub fn get(
        &self,
        term: &str,
    ) -> usize
    {
        self.counts
            .get(term)
            .copied()
            .unwrap_or(0)
    }

    /// Sum of all counts; equals the source sequence length
    pub fn total(&self) -> usize
    {
        self.total
    }

    /// Number of distinct terms
    pub fn vocabulary(&self) -> usize
    {
        self.counts
            .len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.counts
            .is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, usize)> + '_
    {
        self.counts
            .iter()
            .map(|(k, v)| (*k, *v))
    }
}

/// Smoothed idf over a two-document collection: `ln((1 + N) / (1 + df)) + 1`
fn idf(df: usize) -> f64
{
    const DOCS: f64 = 2.0;
    ((1.0 + DOCS) / (1.0 + df as f64)).ln() + 1.0
}

/// Cosine of the angle between two weighted term vectors, as a percentage
pub fn cosine_of(
    v1: &TermVector<'_>,
    v2: &TermVector<'_>,
    weighting: Weighting,
) -> f64
{
    if v1.is_empty() || v2.is_empty()
    {
        return 0.0;
    }

    let mut dot = 0.0_f64;
    let mut sq1 = 0.0_f64;
    let mut sq2 = 0.0_f64;

    // Walk the union vocabulary in key order; missing terms are zero
    for pair in v1
        .iter()
        .merge_join_by(v2.iter(), |a, b| a.0.cmp(b.0))
    {
        match pair
        {
            EitherOrBoth::Both((_, c1), (_, c2)) =>
            {
                let w1 = weight(c1, 2, weighting);
                let w2 = weight(c2, 2, weighting);
                dot += w1 * w2;
                sq1 += w1 * w1;
                sq2 += w2 * w2;
            }
            EitherOrBoth::Left((_, c1)) =>
            {
                let w1 = weight(c1, 1, weighting);
                sq1 += w1 * w1;
            }
            EitherOrBoth::Right((_, c2)) =>
            {
                let w2 = weight(c2, 1, weighting);
                sq2 += w2 * w2;
            }
        }
    }

    // sqrt(x * x) == x exactly and x / x == 1, so identical vectors land on 100
    let denom = (sq1 * sq2).sqrt();
    if denom == 0.0 || !denom.is_finite()
    {
        return 0.0;
    }

    (dot / denom * 100.0).clamp(0.0, 100.0)
}

fn weight(
    count: usize,
    df: usize,
    weighting: Weighting,
) -> f64
{
    match weighting
    {
        Weighting::Tf => count as f64,
        Weighting::Tfidf => count as f64 * idf(df),
    }
}

/// Cosine similarity of two token sequences as a percentage in [0, 100]
#[instrument(level = "debug", skip_all, fields(weighting = ?weighting))]
pub fn cosine_similarity(
    seq1: &TokenSequence,
    seq2: &TokenSequence,
    weighting: Weighting,
) -> f64
{
    let v1 = TermVector::from_tokens(seq1);
    let v2 = TermVector::from_tokens(seq2);
    let score = cosine_of(&v1, &v2, weighting);

    debug!(left_terms = v1.vocabulary(), right_terms = v2.vocabulary(), score, "cosine similarity");
    score
}
