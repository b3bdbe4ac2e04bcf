//! Adaptive chunking: boundary runs grouped by estimated segment size.

use semchunk_core::{Boundary, Chunk, ChunkExtra, ChunkKind, ChunkOptions};

/// Group boundaries into runs whose cumulative estimated `segment_size`
/// stays within `max_chunk_size`; each run becomes one chunk spanning from
/// the run's first position to its last.
///
/// The estimates are distances between boundaries, not measured text
/// lengths, so run sizes are approximate by design; the post-processor
/// trues them up.
pub fn chunk(text: &str, boundaries: &[Boundary], options: &ChunkOptions) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut start = 0usize;
    let mut grouped = 0usize;
    let mut estimated = 0usize;

    for b in boundaries {
        if grouped > 0 && estimated + b.segment_size > options.max_chunk_size && b.position > start
        {
            push(text, start..b.position, grouped, &mut chunks);
            start = b.position;
            grouped = 0;
            estimated = 0;
        }
        estimated += b.segment_size;
        grouped += 1;
    }

    if start < text.len() {
        push(text, start..text.len(), grouped, &mut chunks);
    }

    chunks
}

fn push(
    text: &str,
    span: std::ops::Range<usize>,
    boundaries: usize,
    chunks: &mut Vec<Chunk>,
) {
    let content = &text[span.clone()];
    let index = chunks.len();
    chunks.push(Chunk {
        id: format!("chunk-{index}"),
        content: content.to_string(),
        size: content.len(),
        span,
        kind: ChunkKind::Adaptive,
        extra: ChunkExtra::Adaptive { boundaries },
        needs_merging: false,
        relationships: None,
    });
}
