//! Token-aware chunking: semantic control flow with a token budget.
//!
//! The flush decision asks the injected [`TokenCounter`] for the candidate
//! buffer's token count instead of comparing byte lengths. Counter calls are
//! awaited sequentially, one candidate at a time.

use semchunk_core::{Boundary, Chunk, ChunkError, ChunkExtra, ChunkKind, ChunkOptions, TokenCounter};

use crate::semantic::segments;

/// Token budget used when a counter is injected without `max_tokens`.
pub const DEFAULT_MAX_TOKENS: usize = 512;

/// Accumulate boundary-delimited segments into chunks of at most
/// `max_tokens` tokens. A buffer is never flushed while empty, so a single
/// over-budget segment becomes its own over-budget chunk. Each finalized
/// chunk records its measured token count.
pub async fn chunk(
    text: &str,
    boundaries: &[Boundary],
    counter: &dyn TokenCounter,
    options: &ChunkOptions,
) -> Result<Vec<Chunk>, ChunkError> {
    let max_tokens = options.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS);
    let mut chunks = Vec::new();
    let mut buffer: Option<(usize, usize)> = None;
    let mut buffer_tokens = 0usize;

    for (start, end, _) in segments(text, boundaries) {
        if start == end {
            continue;
        }
        let (candidate_start, candidate_end) = match buffer {
            Some((buf_start, _)) => (buf_start, end),
            None => (start, end),
        };
        let count = counter
            .count_tokens(&text[candidate_start..candidate_end])
            .await?;

        if count > max_tokens {
            if let Some((buf_start, buf_end)) = buffer.take() {
                // the previously accepted candidate is the buffer, so its
                // count is already known
                push(text, buf_start..buf_end, buffer_tokens, &mut chunks);
                buffer_tokens = counter.count_tokens(&text[start..end]).await?;
                buffer = Some((start, end));
                continue;
            }
        }

        buffer = Some((candidate_start, candidate_end));
        buffer_tokens = count;
    }

    if let Some((buf_start, buf_end)) = buffer {
        push(text, buf_start..buf_end, buffer_tokens, &mut chunks);
    }

    Ok(chunks)
}

fn push(
    text: &str,
    span: std::ops::Range<usize>,
    token_count: usize,
    chunks: &mut Vec<Chunk>,
) {
    let content = &text[span.clone()];
    let index = chunks.len();
    chunks.push(Chunk {
        id: format!("chunk-{index}"),
        content: content.to_string(),
        size: content.len(),
        span,
        kind: ChunkKind::TokenAware,
        extra: ChunkExtra::TokenAware { token_count },
        needs_merging: false,
        relationships: None,
    });
}
