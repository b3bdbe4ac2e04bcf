//! Chunk post-processing: balance, overlap injection, small-chunk merging,
//! and relationship linking, applied in that fixed order.

use semchunk_core::{Chunk, ChunkExtra, ChunkKind, ChunkOptions, ChunkRelationships};
use tracing::warn;

use crate::fixed::{ceil_char_boundary, floor_char_boundary};

/// Oversize factor: chunks above `chunk_size * BALANCE_UPPER` get split.
const BALANCE_UPPER: f64 = 1.2;
/// Undersize factor: chunks below `chunk_size * BALANCE_LOWER` get flagged.
const BALANCE_LOWER: f64 = 0.8;

/// Refine raw strategy output. Each step is gated by options; relationship
/// linking always runs. Size violations that survive post-processing are
/// logged, never fatal.
pub fn process(mut chunks: Vec<Chunk>, options: &ChunkOptions) -> Vec<Chunk> {
    if options.balance_chunks {
        chunks = balance(chunks, options);
    }
    if options.add_overlap && options.overlap_size > 0 {
        inject_overlap(&mut chunks, options.overlap_size);
    }
    if options.merge_small_chunks {
        chunks = merge_small(chunks, options);
    }
    link(&mut chunks);
    validate(&chunks, options);
    chunks
}

/// Split chunks above the upper threshold with fixed-size sub-windows; flag
/// chunks below the lower threshold for merging.
fn balance(chunks: Vec<Chunk>, options: &ChunkOptions) -> Vec<Chunk> {
    let upper = options.chunk_size as f64 * BALANCE_UPPER;
    let lower = options.chunk_size as f64 * BALANCE_LOWER;
    let mut out = Vec::with_capacity(chunks.len());

    for mut chunk in chunks {
        if (chunk.size as f64) > upper {
            split_oversized(chunk, options.chunk_size, &mut out);
        } else {
            if (chunk.size as f64) < lower {
                chunk.needs_merging = true;
            }
            out.push(chunk);
        }
    }
    out
}

fn split_oversized(chunk: Chunk, window: usize, out: &mut Vec<Chunk>) {
    let text = &chunk.content;
    let window = window.max(1);
    let mut pos = 0;
    let mut part = 0;

    while pos < text.len() {
        let mut end = floor_char_boundary(text, (pos + window).min(text.len()));
        if end <= pos {
            end = ceil_char_boundary(text, pos + 1);
        }
        let content = text[pos..end].to_string();
        out.push(Chunk {
            id: format!("{}-s{part}", chunk.id),
            span: chunk.span.start + pos..chunk.span.start + end,
            size: content.len(),
            content,
            kind: chunk.kind,
            extra: chunk.extra.clone(),
            needs_merging: false,
            relationships: None,
        });
        pos = end;
        part += 1;
    }
}

/// Prepend the trailing `overlap` bytes of each chunk's predecessor. The
/// first chunk is left untouched; spans are not widened, so overlapped
/// chunks intentionally report `size > span` length.
fn inject_overlap(chunks: &mut [Chunk], overlap: usize) {
    for i in 1..chunks.len() {
        let previous = &chunks[i - 1].content;
        let cut = floor_char_boundary(previous, previous.len().saturating_sub(overlap));
        let tail = previous[cut..].to_string();
        if tail.is_empty() {
            continue;
        }
        let chunk = &mut chunks[i];
        chunk.content = format!("{tail}{}", chunk.content);
        chunk.size = chunk.content.len();
    }
}

/// Coalesce consecutive runs of two or more flagged/undersized chunks.
/// An isolated small chunk stays as-is and is reported by validation.
fn merge_small(chunks: Vec<Chunk>, options: &ChunkOptions) -> Vec<Chunk> {
    let is_small = |c: &Chunk| c.needs_merging || c.size < options.min_chunk_size;
    let mut out = Vec::with_capacity(chunks.len());
    let mut run: Vec<Chunk> = Vec::new();

    for chunk in chunks {
        if is_small(&chunk) {
            run.push(chunk);
            continue;
        }
        flush_run(&mut run, &mut out);
        out.push(chunk);
    }
    flush_run(&mut run, &mut out);
    out
}

fn flush_run(run: &mut Vec<Chunk>, out: &mut Vec<Chunk>) {
    if run.len() < 2 {
        out.append(run);
        return;
    }
    let merged_from = run.len();
    let id = run
        .iter()
        .map(|c| c.id.as_str())
        .collect::<Vec<_>>()
        .join("_");
    let content = run
        .iter()
        .map(|c| c.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");
    let span = run[0].span.start..run[run.len() - 1].span.end;
    out.push(Chunk {
        id,
        size: content.len(),
        content,
        span,
        kind: ChunkKind::Merged,
        extra: ChunkExtra::Merged { merged_from },
        needs_merging: false,
        relationships: None,
    });
    run.clear();
}

/// Assign previous/next ids and sequence position to every chunk.
fn link(chunks: &mut [Chunk]) {
    let total = chunks.len();
    let ids: Vec<String> = chunks.iter().map(|c| c.id.clone()).collect();
    for (i, chunk) in chunks.iter_mut().enumerate() {
        chunk.relationships = Some(ChunkRelationships {
            previous: (i > 0).then(|| ids[i - 1].clone()),
            next: (i + 1 < total).then(|| ids[i + 1].clone()),
            sequence: i,
            total,
        });
    }
}

/// Warn about residual size violations when more than one chunk exists.
fn validate(chunks: &[Chunk], options: &ChunkOptions) {
    if chunks.len() <= 1 {
        return;
    }
    for chunk in chunks {
        if chunk.size > options.max_chunk_size {
            warn!(
                id = %chunk.id,
                size = chunk.size,
                max = options.max_chunk_size,
                "chunk exceeds maximum size"
            );
        } else if chunk.size < options.min_chunk_size {
            warn!(
                id = %chunk.id,
                size = chunk.size,
                min = options.min_chunk_size,
                "chunk below minimum size"
            );
        }
    }
}
