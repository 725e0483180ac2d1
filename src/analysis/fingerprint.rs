//! Winnowed shingle fingerprints.
//!
//! Each k-token shingle is hashed with xxHash64 (seed 0) over its tokens
//! joined by single spaces. A window of `w` consecutive hashes then keeps its
//! minimum (rightmost on ties). Fixing the hash, seed, `k` and `w` makes
//! fingerprint membership reproducible across runs and implementations.

use std::collections::{HashSet, VecDeque};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use xxhash_rust::xxh64::Xxh64;

use super::{
    shingle::{jaccard_percent, windows},
    tokenize::TokenSequence,
};

/// Default shingle width for fingerprinting, in tokens
pub const DEFAULT_KGRAM: usize = 5;

/// Default winnowing window, in hashes
pub const DEFAULT_WINDOW: usize = 4;

/// Seed for shingle hashing; part of the fingerprint contract
pub const HASH_SEED: u64 = 0;

/// A selected shingle hash and the token index its shingle starts at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinnowedShingle
{
    pub hash: u64,
    pub start_idx: usize,
}

/// Fingerprint of one document: the winnowed subset of its shingle hashes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FingerprintSet
{
    selected: Vec<WinnowedShingle>,
    hashes: HashSet<u64>,
}

impl FingerprintSet
{
    pub fn build(
        seq: &TokenSequence,
        kgram: usize,
        window: usize,
    ) -> Self
    {
        let raw: Vec<u64> = windows(seq, kgram)
            .map(shingle_hash)
            .collect();
        let selected = winnow(&raw, window);
        let hashes = selected
            .iter()
            .map(|s| s.hash)
            .collect();

        Self { selected, hashes }
    }

    /// Selected shingles in document order
    pub fn selected(&self) -> &[WinnowedShingle]
    {
        &self.selected
    }

    pub fn hashes(&self) -> &HashSet<u64>
    {
        &self.hashes
    }

    pub fn len(&self) -> usize
    {
        self.hashes
            .len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.hashes
            .is_empty()
    }
}

/// xxHash64 of the shingle's tokens joined by single spaces
pub fn shingle_hash(shingle: &[String]) -> u64
{
    let mut hasher = Xxh64::new(HASH_SEED);

    for (i, tok) in shingle
        .iter()
        .enumerate()
    {
        if i > 0
        {
            hasher.update(b" ");
        }
        hasher.update(tok.as_bytes());
    }

    hasher.digest()
}

/// Select the minimum hash of every `window`-wide run of hashes.
///
/// Ties go to the rightmost occurrence. A hash sequence shorter than the
/// window is treated as a single window. Consecutive windows that agree on
/// the same position record it once.
pub fn winnow(
    hashes: &[u64],
    window: usize,
) -> Vec<WinnowedShingle>
{
    if hashes.is_empty()
    {
        return Vec::new();
    }

    let w = window
        .max(1)
        .min(hashes.len());
    let mut out: Vec<WinnowedShingle> = Vec::new();

    // Indices with strictly increasing hashes; front is the window minimum
    let mut deque: VecDeque<usize> = VecDeque::with_capacity(w);

    for (i, &h) in hashes
        .iter()
        .enumerate()
    {
        while deque
            .back()
            .is_some_and(|&j| hashes[j] >= h)
        {
            deque.pop_back();
        }
        deque.push_back(i);

        if deque
            .front()
            .is_some_and(|&j| j + w <= i)
        {
            deque.pop_front();
        }

        if i + 1 < w
        {
            continue;
        }

        if let Some(&min_idx) = deque.front()
            && out
                .last()
                .is_none_or(|last| last.start_idx != min_idx)
        {
            out.push(WinnowedShingle { hash: hashes[min_idx], start_idx: min_idx });
        }
    }

    out
}

/// Fingerprint overlap of two token sequences as a percentage in [0, 100]
#[instrument(level = "debug", skip_all, fields(kgram = kgram, window = window))]
pub fn fingerprint_similarity(
    seq1: &TokenSequence,
    seq2: &TokenSequence,
    kgram: usize,
    window: usize,
) -> f64
{
    let a = FingerprintSet::build(seq1, kgram, window);
    let b = FingerprintSet::build(seq2, kgram, window);
    let score = jaccard_percent(a.hashes(), b.hashes());

    debug!(left_fingerprints = a.len(), right_fingerprints = b.len(), score, "fingerprint similarity");
    score
}

#[cfg(test)]
mod tests
{
    use xxhash_rust::xxh64::xxh64;

    use super::*;
    use crate::analysis::tokenize::tokenize;

    #[test]
    fn shingle_hash_is_xxh64_of_space_joined_text()
    {
        let shingle = vec!["the".to_string(), "cat".to_string(), "sat".to_string()];
        assert_eq!(shingle_hash(&shingle), xxh64(b"the cat sat", 0));
    }

    #[test]
    fn winnow_picks_window_minimum()
    {
        let hashes = [77, 74, 42, 17, 98, 50, 17, 98, 8, 88];
        let picked: Vec<u64> = winnow(&hashes, 4)
            .iter()
            .map(|s| s.hash)
            .collect();
        // Windows: [77,74,42,17] [74,42,17,98] [42,17,98,50] [17,98,50,17]
        // [98,50,17,98] [50,17,98,8] [17,98,8,88]
        assert_eq!(picked, vec![17, 17, 8]);
    }

    #[test]
    fn winnow_prefers_rightmost_on_ties()
    {
        let picked = winnow(&[5, 5, 5], 2);
        let positions: Vec<usize> = picked
            .iter()
            .map(|s| s.start_idx)
            .collect();
        assert_eq!(positions, vec![1, 2]);
    }

    #[test]
    fn short_hash_runs_form_one_window()
    {
        let picked = winnow(&[9, 3], 4);
        assert_eq!(picked, vec![WinnowedShingle { hash: 3, start_idx: 1 }]);
        assert!(winnow(&[], 4).is_empty());
    }

    #[test]
    fn build_is_deterministic()
    {
        let seq = tokenize("a quick brown fox jumps over the lazy dog near the river bank");
        let a = FingerprintSet::build(&seq, 5, 4);
        let b = FingerprintSet::build(&seq, 5, 4);
        assert_eq!(a, b);
        assert!(!a.is_empty());
        assert!(
            a.selected()
                .windows(2)
                .all(|w| w[0].start_idx < w[1].start_idx)
        );
    }

    #[test]
    fn identical_documents_score_full()
    {
        let seq = tokenize("the cat sat on the mat");
        assert_eq!(fingerprint_similarity(&seq, &seq, 5, 4), 100.0);
    }

    #[test]
    fn documents_shorter_than_kgram_score_zero()
    {
        let seq = tokenize("four little words here");
        assert_eq!(fingerprint_similarity(&seq, &seq, 5, 4), 0.0);
    }

    #[test]
    fn disjoint_documents_score_zero()
    {
        let a = tokenize("alpha beta gamma delta epsilon zeta eta theta");
        let b = tokenize("one two three four five six seven eight");
        assert_eq!(fingerprint_similarity(&a, &b, 5, 4), 0.0);
    }

    #[test]
    fn shared_passage_gives_partial_overlap()
    {
        let shared = "it was the best of times it was the worst of times";
        let a = tokenize(&format!("{shared} and then the story went on"));
        let b = tokenize(&format!("completely unrelated opening words {shared}"));
        let score = fingerprint_similarity(&a, &b, 5, 4);
        assert!(score > 0.0 && score < 100.0, "got {score}");
    }
}
