//! Error types for semchunk.

use thiserror::Error;

/// Main error type for segmentation and minting operations.
///
/// All variants are raised synchronously to the immediate caller; nothing is
/// retried internally. Post-processing size violations are logged warnings,
/// not errors, so edge documents (a single giant code block) stay
/// processable.
#[derive(Error, Debug)]
pub enum ChunkError {
    /// Input had the wrong shape for the requested strategy
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Content was empty or whitespace-only
    #[error("content is empty")]
    EmptyContent,

    /// Strategy name is not in the registered set
    #[error("unknown strategy: {0}")]
    UnknownStrategy(String),

    /// Token-aware strategy invoked without an injected counter
    #[error("token-aware strategy requires a token counter")]
    MissingTokenCounter,

    /// The injected token counter failed
    #[error("token counting failed: {0}")]
    TokenCount(#[from] TokenCountError),

    /// Record serialization failed
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Catch-all wrapper for strategy-internal failures
    #[error("chunking failed: {0}")]
    Failed(String),
}

/// Errors surfaced by an injected [`TokenCounter`](crate::traits::TokenCounter).
#[derive(Error, Debug)]
pub enum TokenCountError {
    #[error("tokenizer {tokenizer} rejected input: {message}")]
    Rejected { tokenizer: String, message: String },

    #[error("token counting backend unavailable: {0}")]
    Unavailable(String),
}

/// Result type alias for chunking operations.
pub type Result<T> = std::result::Result<T, ChunkError>;
