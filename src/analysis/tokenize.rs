//! Text normalization: lowercase, strip punctuation, split on whitespace.

use std::ops::Deref;

/// Ordered sequence of normalized word tokens.
///
/// Token order follows the source text. Empty or whitespace-only text
/// yields an empty sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TokenSequence
{
    tokens: Vec<String>,
}

impl TokenSequence
{
    pub fn len(&self) -> usize
    {
        self.tokens
            .len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.tokens
            .is_empty()
    }

    pub fn as_slice(&self) -> &[String]
    {
        &self.tokens
    }

    /// Join a token range back into text with single spaces
    pub fn join_range(
        &self,
        start: usize,
        end: usize,
    ) -> String
    {
        self.tokens[start..end].join(" ")
    }
}

impl Deref for TokenSequence
{
    type Target = [String];

    fn deref(&self) -> &Self::Target
    {
        &self.tokens
    }
}

impl From<Vec<String>> for TokenSequence
{
    fn from(tokens: Vec<String>) -> Self
    {
        Self { tokens }
    }
}

/// Normalize raw text into a token sequence.
///
/// Characters that are neither alphanumeric nor whitespace are removed
/// outright rather than treated as separators, so `"AI."` and `"ai"`
/// normalize identically and `"don't"` becomes `dont`.
pub fn tokenize(text: &str) -> TokenSequence
{
    let mut tokens = Vec::new();
    let mut current = String::new();

    for ch in text.chars()
    {
        if ch.is_whitespace()
        {
            if !current.is_empty()
            {
                tokens.push(std::mem::take(&mut current));
            }
            continue;
        }

        if ch.is_alphanumeric()
        {
            // Some code points lowercase to several chars (e.g. 'İ')
            current.extend(ch.to_lowercase());
        }
    }

    if !current.is_empty()
    {
        tokens.push(current);
    }

    TokenSequence { tokens }
}

/// Number of tokens `text` normalizes to
pub fn token_count(text: &str) -> usize
{
    tokenize(text).len()
}
