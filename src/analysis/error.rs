//! Error taxonomy for the similarity engine.
//!
//! Empty text is valid input; only absent/undecodable text and inputs over
//! the configured token cap are rejected. A failed comparison never yields a
//! partial report.

use miette::Diagnostic;

/// Which side of a comparison an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side
{
    First,
    Second,
}

impl std::fmt::Display for Side
{
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result
    {
        match self
        {
            Side::First => write!(f, "first document"),
            Side::Second => write!(f, "second document"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Diagnostic, thiserror::Error)]
pub enum AnalysisError
{
    /// Input is missing or is not valid text
    #[error("invalid input in {which}: {reason}")]
    #[diagnostic(
        code(plagcheck::invalid_input),
        help("both documents must be present and UTF-8 encoded; empty text is allowed")
    )]
    InvalidInput
    {
        which: Side,
        reason: String,
    },

    /// Input exceeds the token cap that bounds the longest-common pass
    #[error("{which} has {tokens} tokens, exceeding the limit of {limit}")]
    #[diagnostic(
        code(plagcheck::computation_overflow),
        help("raise `analysis.max_tokens` or pass --max-tokens to compare larger documents")
    )]
    ComputationOverflow
    {
        which: Side,
        tokens: usize,
        limit: usize,
    },

    /// Weights or verdict bands cannot produce a valid report
    #[error("invalid analysis settings: {0}")]
    #[diagnostic(code(plagcheck::invalid_config))]
    InvalidConfig(String),
}

impl AnalysisError
{
    /// Convenience constructor used by the I/O and batch layers
    pub fn invalid_input(
        which: Side,
        reason: impl Into<String>,
    ) -> Self
    {
        Self::InvalidInput { which, reason: reason.into() }
    }
}
