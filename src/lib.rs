//! **plagcheck** - Document similarity scoring for plagiarism screening
//!
//! Four independent measures (n-gram overlap, winnowed fingerprints, cosine
//! similarity, longest common run) blended into one weighted score and a
//! three-band verdict. Deterministic and symmetric for a fixed configuration.

/// Command-line interface with clap integration
pub mod cli;

/// Shell completion generation
pub mod completion;

/// Similarity engine - pure, synchronous, no I/O
pub mod analysis {
    /// Typed failures with miette diagnostics
    pub mod error;
    pub use error::{AnalysisError, Side};

    /// Normalization into lowercase word tokens
    pub mod tokenize;
    pub use tokenize::{TokenSequence, token_count, tokenize};

    /// Word n-gram sets and Jaccard overlap
    pub mod shingle;
    pub use shingle::{ShingleSet, jaccard_percent, ngram_similarity};

    /// xxHash64 shingle hashing and winnowing
    pub mod fingerprint;
    pub use fingerprint::{FingerprintSet, WinnowedShingle, fingerprint_similarity, winnow};

    /// Term-frequency vectors and cosine similarity
    pub mod cosine;
    pub use cosine::{TermVector, Weighting, cosine_similarity};

    /// Longest contiguous common token run
    pub mod longest;
    pub use longest::{CommonRun, longest_common};

    /// Weighted blend and verdict bands
    pub mod aggregate;
    pub use aggregate::{Bands, SimilarityReport, Verdict, Weights, aggregate};

    /// Configured comparator tying the metrics together
    pub mod engine;
    pub use engine::{AnalysisConfig, Comparator, compare};
}

/// Command pipelines - compare, batch, rendering
pub mod core {
    /// Single pair comparison
    pub mod compare;
    pub use compare::run as compare_run;

    /// Parallel JSONL batch comparison
    pub mod batch;
    pub use batch::run as batch_run;

    /// Text, table and JSON report output
    pub mod render;
    pub use render::{Envelope, RenderOptions, render};
}

/// Infrastructure - Configuration, I/O, logging and caching
pub mod infra {
    /// Layered configuration (file + environment)
    pub mod config;
    pub use config::{Config, init as config_init, load_config};

    /// Document loading with memory mapping for large files
    pub mod io;
    pub use io::{FileContent, read_document};

    /// tracing subscriber setup
    pub mod logging;

    /// Token cache for batch runs
    pub mod cache;
    pub use cache::TokenCache;
}

// Strategic re-exports for clean CLI interface
pub use cli::{AppContext, Cli, Commands};
pub use core::{batch_run, compare_run};
pub use infra::{Config, load_config};

// Core types for library consumers
pub use analysis::{
    AnalysisConfig, AnalysisError, Comparator, SimilarityReport, Verdict, Weighting, compare,
};
