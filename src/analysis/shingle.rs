//! Word n-gram (shingle) sets and their Jaccard overlap.

use std::{collections::HashSet, hash::Hash};

use tracing::{debug, instrument};

use super::tokenize::TokenSequence;

/// Default shingle width in tokens
pub const DEFAULT_NGRAM_SIZE: usize = 3;

/// Set of contiguous n-token windows borrowed from a token sequence.
///
/// Empty when the sequence holds fewer than `n` tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShingleSet<'a>
{
    n: usize,
    shingles: HashSet<&'a [String]>,
}

impl<'a> ShingleSet<'a>
{
    pub fn build(
        seq: &'a TokenSequence,
        n: usize,
    ) -> Self
    {
        let n = n.max(1);
        Self { n, shingles: windows(seq, n).collect() }
    }

    pub fn len(&self) -> usize
    {
        self.shingles
            .len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.shingles
            .is_empty()
    }

    pub fn width(&self) -> usize
    {
        self.n
    }

    pub fn contains(
        &self,
        shingle: &[String],
    ) -> bool
    {
        self.shingles
            .contains(shingle)
    }

    pub fn jaccard(
        &self,
        other: &ShingleSet<'_>,
    ) -> f64
    {
        if self.is_empty() || other.is_empty()
        {
            return 0.0;
        }
        let inter = self
            .shingles
            .iter()
            .filter(|s| other.contains(s))
            .count();
        ratio_percent(inter, self.len() + other.len() - inter)
    }
}

/// Sliding windows of `n` tokens with stride 1; nothing when `n` exceeds the length
pub fn windows(
    seq: &TokenSequence,
    n: usize,
) -> impl Iterator<Item = &[String]>
{
    let n = n.max(1);
    seq.as_slice()
        .windows(n)
}

/// Jaccard index of two sets scaled to a percentage.
///
/// Either set empty means there is nothing to compare, which scores 0.
pub fn jaccard_percent<T>(
    a: &HashSet<T>,
    b: &HashSet<T>,
) -> f64
where
    T: Eq + Hash,
{
    if a.is_empty() || b.is_empty()
    {
        return 0.0;
    }

    // Probe the smaller set so the count is independent of argument order
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let inter = small
        .iter()
        .filter(|x| large.contains(*x))
        .count();

    ratio_percent(inter, a.len() + b.len() - inter)
}

fn ratio_percent(
    part: usize,
    whole: usize,
) -> f64
{
    if whole == 0
    {
        return 0.0;
    }
    (100.0 * part as f64 / whole as f64).clamp(0.0, 100.0)
}

/// N-gram overlap of two token sequences as a percentage in [0, 100]
#[instrument(level = "debug", skip_all, fields(n = n, left = seq1.len(), right = seq2.len()))]
pub fn ngram_similarity(
    seq1: &TokenSequence,
    seq2: &TokenSequence,
    n: usize,
) -> f64
{
    let a = ShingleSet::build(seq1, n);
    let b = ShingleSet::build(seq2, n);
    let score = jaccard_percent(&a.shingles, &b.shingles);

    debug!(left_shingles = a.len(), right_shingles = b.len(), score, "ngram similarity");
    score
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::analysis::tokenize::tokenize;

    #[test]
    fn builds_stride_one_windows()
    {
        let seq = tokenize("a b c d");
        let set = ShingleSet::build(&seq, 3);
        assert_eq!(set.len(), 2);
        assert!(set.contains(&["a".to_string(), "b".to_string(), "c".to_string()]));
        assert!(set.contains(&["b".to_string(), "c".to_string(), "d".to_string()]));
    }

    #[test]
    fn short_sequences_have_no_shingles()
    {
        let seq = tokenize("only two");
        assert!(ShingleSet::build(&seq, 3).is_empty());
    }

    #[test]
    fn repeated_windows_collapse()
    {
        let seq = tokenize("la la la la la");
        assert_eq!(ShingleSet::build(&seq, 3).len(), 1);
    }

    #[test]
    fn identical_sequences_score_full()
    {
        let seq = tokenize("the cat sat on the mat");
        assert_eq!(ngram_similarity(&seq, &seq, 3), 100.0);
    }

    #[test]
    fn partial_overlap_is_jaccard()
    {
        // {abc, bcd} vs {bcd, cde}: 1 shared of 3
        let a = tokenize("a b c d");
        let b = tokenize("b c d e");
        let score = ngram_similarity(&a, &b, 3);
        assert!((score - 100.0 / 3.0).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn nothing_to_compare_scores_zero()
    {
        let empty = tokenize("");
        let short = tokenize("hi there");
        let long = tokenize("one two three four");
        assert_eq!(ngram_similarity(&empty, &empty, 3), 0.0);
        assert_eq!(ngram_similarity(&short, &short, 3), 0.0);
        assert_eq!(ngram_similarity(&long, &empty, 3), 0.0);
    }

    #[test]
    fn zero_width_acts_as_unigrams()
    {
        let a = tokenize("x y");
        let b = tokenize("y z");
        let score = ngram_similarity(&a, &b, 0);
        assert!((score - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn shingle_set_jaccard_matches_free_function()
    {
        let a = tokenize("a b c d e");
        let b = tokenize("c d e f g");
        let sa = ShingleSet::build(&a, 3);
        let sb = ShingleSet::build(&b, 3);
        assert_eq!(sa.jaccard(&sb), ngram_similarity(&a, &b, 3));
        assert_eq!(sa.width(), 3);
    }
}
