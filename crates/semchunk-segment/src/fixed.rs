//! Fixed-size chunking: a sliding window with configurable overlap.

use semchunk_core::{Chunk, ChunkExtra, ChunkKind, ChunkOptions};

/// Split `text` into windows of `chunk_size` bytes, advancing by
/// `chunk_size - overlap_size` but never less than one character.
///
/// Window cuts snap down to the nearest char boundary, so multi-byte text
/// never splits mid-character. With zero overlap the windows tile the input
/// exactly: concatenating the chunks reproduces the original text.
pub fn chunk(text: &str, options: &ChunkOptions) -> Vec<Chunk> {
    let size = options.chunk_size.max(1);
    let overlap = options.overlap_size;
    let mut chunks = Vec::new();
    let mut pos = 0;

    while pos < text.len() {
        let mut end = floor_char_boundary(text, (pos + size).min(text.len()));
        if end <= pos {
            end = ceil_char_boundary(text, pos + 1);
        }

        let content = &text[pos..end];
        let index = chunks.len();
        chunks.push(Chunk {
            id: format!("chunk-{index}"),
            content: content.to_string(),
            span: pos..end,
            size: content.len(),
            kind: ChunkKind::Fixed,
            extra: ChunkExtra::Fixed {
                overlap: if index == 0 { 0 } else { overlap },
            },
            needs_merging: false,
            relationships: None,
        });

        if end >= text.len() {
            break;
        }
        let step = size.saturating_sub(overlap).max(1);
        let mut next = floor_char_boundary(text, pos + step);
        if next <= pos {
            next = ceil_char_boundary(text, pos + 1);
        }
        pos = next;
    }

    chunks
}

/// Largest char boundary at or below `index`.
pub(crate) fn floor_char_boundary(text: &str, index: usize) -> usize {
    let mut index = index.min(text.len());
    while index > 0 && !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Smallest char boundary at or above `index`.
pub(crate) fn ceil_char_boundary(text: &str, index: usize) -> usize {
    let mut index = index.min(text.len());
    while index < text.len() && !text.is_char_boundary(index) {
        index += 1;
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(chunk_size: usize, overlap_size: usize) -> ChunkOptions {
        ChunkOptions {
            chunk_size,
            overlap_size,
            ..Default::default()
        }
    }

    #[test]
    fn test_exact_windows_without_overlap() {
        let chunks = chunk("abcdefghij", &options(4, 0));
        let contents: Vec<&str> = chunks.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(contents, vec!["abcd", "efgh", "ij"]);
        assert_eq!(chunks[0].span, 0..4);
        assert_eq!(chunks[1].span, 4..8);
        assert_eq!(chunks[2].span, 8..10);
    }

    #[test]
    fn test_size_matches_content_and_span() {
        let chunks = chunk("abcdefghij", &options(3, 0));
        for c in &chunks {
            assert_eq!(c.size, c.content.len());
            assert_eq!(c.span.end - c.span.start, c.size);
        }
    }

    #[test]
    fn test_concatenation_reproduces_input() {
        let text = "The quick brown fox jumps over the lazy dog. Again and again.";
        let chunks = chunk(text, &options(7, 0));
        let rebuilt: String = chunks.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn test_overlap_metadata() {
        let chunks = chunk("abcdefghij", &options(4, 2));
        assert!(chunks.len() >= 2);
        assert_eq!(chunks[0].extra, ChunkExtra::Fixed { overlap: 0 });
        for c in &chunks[1..] {
            assert_eq!(c.extra, ChunkExtra::Fixed { overlap: 2 });
        }
    }

    #[test]
    fn test_overlapping_windows_share_content() {
        let chunks = chunk("abcdefghij", &options(4, 2));
        // step of 2: windows start at 0, 2, 4, ...
        assert_eq!(chunks[0].content, "abcd");
        assert_eq!(chunks[1].content, "cdef");
    }

    #[test]
    fn test_overlap_at_least_window_still_progresses() {
        // overlap >= size would give a zero/negative step; the guard forces
        // one character of progress
        let chunks = chunk("abcdef", &options(2, 5));
        assert!(chunks.len() <= 6);
        assert!(chunks.windows(2).all(|w| w[1].span.start > w[0].span.start));
        assert!(chunks.iter().all(|c| !c.content.is_empty()));
    }

    #[test]
    fn test_short_input_single_chunk() {
        let chunks = chunk("short", &options(1000, 100));
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, "short");
        assert_eq!(chunks[0].kind, ChunkKind::Fixed);
    }

    #[test]
    fn test_unicode_never_splits_mid_character() {
        let text = "héllo wörld 世界 🌍 end";
        let chunks = chunk(text, &options(5, 0));
        let rebuilt: String = chunks.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(rebuilt, text);
        for c in &chunks {
            assert!(!c.content.is_empty());
        }
    }

    #[test]
    fn test_ids_are_sequential() {
        let chunks = chunk("abcdefghij", &options(4, 0));
        let ids: Vec<&str> = chunks.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["chunk-0", "chunk-1", "chunk-2"]);
    }
}
