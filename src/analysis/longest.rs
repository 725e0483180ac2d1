//! Longest common contiguous run of tokens between two documents.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::tokenize::TokenSequence;

/// Longest shared run of words
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonRun
{
    /// Number of tokens in the run (0 when nothing is shared)
    pub count: usize,
    /// Matched tokens joined with single spaces (empty when nothing is shared)
    pub text: String,
    /// Token index in the first document where the run starts
    pub start_first: usize,
    /// Token index in the second document where the run starts
    pub start_second: usize,
}

/// Longest common substring over tokens.
///
/// Dynamic programming with two rolling rows: `cur[j]` is the length of the
/// common run ending at `seq1[i - 1]` and `seq2[j - 1]`. Only a strictly
/// longer run replaces the best, so ties resolve to the first found scanning
/// `seq1` in order, then `seq2` in order.
#[instrument(level = "debug", skip_all, fields(left = seq1.len(), right = seq2.len()))]
pub fn longest_common(
    seq1: &TokenSequence,
    seq2: &TokenSequence,
) -> CommonRun
{
    let (m, n) = (seq1.len(), seq2.len());
    if m == 0 || n == 0
    {
        return CommonRun::default();
    }

    let mut prev = vec![0usize; n + 1];
    let mut cur = vec![0usize; n + 1];
    let mut best = 0usize;
    let mut end_first = 0usize;
    let mut end_second = 0usize;

    for i in 1..=m
    {
        let a = &seq1[i - 1];
        for j in 1..=n
        {
            cur[j] = if *a == seq2[j - 1] { prev[j - 1] + 1 } else { 0 };
            if cur[j] > best
            {
                best = cur[j];
                end_first = i;
                end_second = j;
            }
        }
        std::mem::swap(&mut prev, &mut cur);
    }

    if best == 0
    {
        return CommonRun::default();
    }

    let run = CommonRun {
        count: best,
        text: seq1.join_range(end_first - best, end_first),
        start_first: end_first - best,
        start_second: end_second - best,
    };

    debug!(count = run.count, "longest common run");
    run
}
