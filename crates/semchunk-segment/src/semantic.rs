//! Semantic chunking: greedy accumulation of boundary-delimited segments.

use semchunk_core::{Boundary, BoundaryKind, Chunk, ChunkExtra, ChunkKind, ChunkOptions};

/// Accumulate boundary-delimited segments into chunks of roughly
/// `chunk_size` bytes.
///
/// The buffer is flushed only when appending the next segment would exceed
/// `chunk_size` *and* the buffer is non-empty, so no chunk is ever empty; a
/// single oversized segment becomes its own oversized chunk instead. The
/// final non-empty buffer is flushed unconditionally.
pub fn chunk(text: &str, boundaries: &[Boundary], options: &ChunkOptions) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    // buffer is the contiguous slice [start, end) plus the kind of the
    // boundary that opened it
    let mut buffer: Option<(usize, usize, Option<BoundaryKind>)> = None;

    for (start, end, kind) in segments(text, boundaries) {
        if start == end {
            continue;
        }
        buffer = Some(match buffer {
            Some((buf_start, buf_end, opened))
                if (buf_end - buf_start) + (end - start) > options.chunk_size =>
            {
                push(text, buf_start..buf_end, opened, &mut chunks);
                (start, end, kind)
            }
            Some((buf_start, _, opened)) => (buf_start, end, opened),
            None => (start, end, kind),
        });
    }

    if let Some((buf_start, buf_end, opened)) = buffer {
        push(text, buf_start..buf_end, opened, &mut chunks);
    }

    chunks
}

/// Contiguous segments between consecutive boundaries, each tagged with the
/// kind of the boundary that starts it (`None` for the leading segment).
pub(crate) fn segments(
    text: &str,
    boundaries: &[Boundary],
) -> Vec<(usize, usize, Option<BoundaryKind>)> {
    let mut out = Vec::with_capacity(boundaries.len() + 1);
    let mut prev = 0usize;
    let mut prev_kind: Option<BoundaryKind> = None;

    for b in boundaries {
        if b.position > prev {
            out.push((prev, b.position, prev_kind));
            prev = b.position;
        }
        // a boundary at the current cursor (position 0) only retags the
        // upcoming segment
        prev_kind = Some(b.kind);
    }
    if prev < text.len() {
        out.push((prev, text.len(), prev_kind));
    }

    out
}

fn push(
    text: &str,
    span: std::ops::Range<usize>,
    opened: Option<BoundaryKind>,
    chunks: &mut Vec<Chunk>,
) {
    let content = &text[span.clone()];
    let index = chunks.len();
    chunks.push(Chunk {
        id: format!("chunk-{index}"),
        content: content.to_string(),
        size: content.len(),
        span,
        kind: ChunkKind::Semantic,
        extra: ChunkExtra::Semantic { boundary: opened },
        needs_merging: false,
        relationships: None,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::BoundaryDetector;

    fn run(text: &str, chunk_size: usize) -> Vec<Chunk> {
        let boundaries = BoundaryDetector::new().detect(text);
        let options = ChunkOptions {
            chunk_size,
            ..Default::default()
        };
        chunk(text, &boundaries, &options)
    }

    #[test]
    fn test_no_boundaries_single_chunk() {
        let chunks = run("plain text with no delimiters at all", 10);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, "plain text with no delimiters at all");
        assert_eq!(chunks[0].extra, ChunkExtra::Semantic { boundary: None });
    }

    #[test]
    fn test_flushes_before_overflow() {
        let text = "First sentence here. Second sentence here. Third sentence here.";
        let chunks = run(text, 30);
        assert!(chunks.len() > 1);
        // chunks are contiguous slices of the source
        for c in &chunks {
            assert_eq!(&text[c.span.clone()], c.content);
            assert_eq!(c.size, c.content.len());
        }
        let rebuilt: String = chunks.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn test_no_empty_chunks() {
        let text = "A. B. C. D. E. F. G. H.";
        let chunks = run(text, 4);
        assert!(!chunks.is_empty());
        assert!(chunks.iter().all(|c| !c.content.is_empty()));
    }

    #[test]
    fn test_oversized_segment_kept_whole() {
        // one segment longer than chunk_size is never split here; the
        // post-processor handles balancing
        let text = "short. averyveryverylongsegmentwithoutanyboundarymarks";
        let chunks = run(text, 10);
        assert_eq!(chunks.len(), 2);
        assert!(chunks[1].size > 10);
    }

    #[test]
    fn test_paragraph_accumulation() {
        let text = "Para one.\n\nPara two.\n\nPara three.";
        let chunks = run(text, 25);
        assert!(chunks.len() >= 2);
        let rebuilt: String = chunks.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn test_flush_records_opening_boundary() {
        let text = "Para one.\n\nPara two.\n\nPara three.";
        let chunks = run(text, 12);
        // every chunk after the first opens at a boundary
        for c in &chunks[1..] {
            assert!(matches!(
                c.extra,
                ChunkExtra::Semantic { boundary: Some(_) }
            ));
        }
    }

    #[test]
    fn test_segments_are_contiguous() {
        let text = "One. Two. Three.\n\nFour.";
        let boundaries = BoundaryDetector::new().detect(text);
        let segs = segments(text, &boundaries);
        assert_eq!(segs.first().unwrap().0, 0);
        assert_eq!(segs.last().unwrap().1, text.len());
        for pair in segs.windows(2) {
            assert_eq!(pair[0].1, pair[1].0);
        }
    }

    #[test]
    fn test_boundary_at_position_zero_retags_first_segment() {
        let text = "# Title\nBody text";
        let boundaries = BoundaryDetector::new().detect(text);
        let segs = segments(text, &boundaries);
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].2, Some(BoundaryKind::Section));
    }
}
