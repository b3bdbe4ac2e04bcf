//! Trait seams for injected collaborators.

use async_trait::async_trait;

use crate::error::TokenCountError;

/// Counts tokens for the token-aware strategy.
///
/// Implementations may be remote or I/O-bound; the engine awaits them
/// sequentially, one candidate buffer at a time, with no speculative
/// counting. Counts must be deterministic for a given `(text, tokenizer)`
/// pair so that re-chunking the same content is idempotent.
#[async_trait]
pub trait TokenCounter: Send + Sync {
    /// Name of the tokenizer this counter represents.
    fn tokenizer(&self) -> &str;

    /// Count the tokens in `text`.
    async fn count_tokens(&self, text: &str) -> Result<usize, TokenCountError>;
}
