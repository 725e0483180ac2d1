//! Token-sequence cache shared by batch workers.
//!
//! Batch files often compare one suspect document against many sources, so
//! tokenizing each distinct text once pays off. Keys are xxh64 digests of
//! the raw text; entries are shared behind `Arc`.

use std::sync::Arc;

use moka::sync::Cache;
use xxhash_rust::xxh64::xxh64;

use crate::analysis::{TokenSequence, tokenize};

pub struct TokenCache
{
    cache: Cache<u64, Arc<TokenSequence>>,
}

impl TokenCache
{
    pub fn new(max_entries: u64) -> Self
    {
        Self { cache: Cache::new(max_entries) }
    }

    /// Tokenize `text`, reusing a previous result for identical text
    pub fn tokens(
        &self,
        text: &str,
    ) -> Arc<TokenSequence>
    {
        let key = xxh64(text.as_bytes(), 0);
        self.cache
            .get_with(key, || Arc::new(tokenize(text)))
    }

    pub fn entry_count(&self) -> u64
    {
        self.cache
            .run_pending_tasks();
        self.cache
            .entry_count()
    }
}
