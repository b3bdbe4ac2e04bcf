//! Boundary detection: candidate segmentation points in text.
//!
//! A single line walk finds block-start boundaries (sections, lists, quotes,
//! fenced code) and paragraph separators; one additional pass finds sentence
//! terminators. Matches are merged into one list sorted ascending by
//! position; at an identical position only the highest-priority boundary
//! survives, the rest are dropped, never combined.

use semchunk_core::{Boundary, BoundaryKind};

/// Scans text for candidate segmentation points.
pub struct BoundaryDetector;

impl BoundaryDetector {
    pub fn new() -> Self {
        Self
    }

    /// Detect all boundaries in `text`, sorted ascending by position with
    /// same-position collisions resolved by priority.
    ///
    /// Each boundary's `segment_size` estimates the distance to the nearest
    /// subsequent boundary of any kind, or to end of text.
    pub fn detect(&self, text: &str) -> Vec<Boundary> {
        let mut found = Vec::new();
        scan_lines(text, &mut found);
        scan_paragraphs(text, &mut found);
        scan_sentences(text, &mut found);

        found.sort_by(|a, b| {
            a.position
                .cmp(&b.position)
                .then(b.priority.cmp(&a.priority))
        });
        found.dedup_by(|current, previous| current.position == previous.position);

        estimate_segments(text.len(), &mut found);
        found
    }
}

impl Default for BoundaryDetector {
    fn default() -> Self {
        Self::new()
    }
}

fn boundary(kind: BoundaryKind, position: usize, length: usize) -> Boundary {
    Boundary {
        position,
        kind,
        priority: kind.priority(),
        length,
        segment_size: 0,
    }
}

/// Block-start boundaries anchored at line starts, plus paired code fences.
fn scan_lines(text: &str, out: &mut Vec<Boundary>) {
    let mut offset = 0;
    let mut open_fence: Option<usize> = None;

    for line in text.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();
        let stripped = line.trim_end_matches(['\n', '\r']);

        if stripped.trim_start().starts_with("```") {
            let indent = stripped.len() - stripped.trim_start().len();
            match open_fence {
                // fences pair up: one boundary per closed block, anchored at
                // the opening fence; an unclosed trailing fence yields none
                None => open_fence = Some(line_start + indent),
                Some(open) => {
                    let close_end = line_start + indent + 3;
                    out.push(boundary(BoundaryKind::Code, open, close_end - open));
                    open_fence = None;
                }
            }
            continue;
        }

        if let Some(length) = match_header(stripped) {
            out.push(boundary(BoundaryKind::Section, line_start, length));
        } else if let Some(length) = match_quote(stripped) {
            out.push(boundary(BoundaryKind::Quote, line_start, length));
        } else if let Some(length) = match_list_marker(stripped) {
            out.push(boundary(BoundaryKind::List, line_start, length));
        }
    }
}

/// Paragraph separators: a newline, optional whitespace, and another
/// newline. The boundary sits after the last newline of the run, so the
/// blank lines belong to the preceding segment.
fn scan_paragraphs(text: &str, out: &mut Vec<Boundary>) {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\n' {
            let mut j = i + 1;
            let mut last_newline = None;
            while j < bytes.len() && matches!(bytes[j], b' ' | b'\t' | b'\r' | b'\n') {
                if bytes[j] == b'\n' {
                    last_newline = Some(j);
                }
                j += 1;
            }
            if let Some(newline) = last_newline {
                let end = newline + 1;
                out.push(boundary(BoundaryKind::Paragraph, end, end - i));
                i = end;
                continue;
            }
        }
        i += 1;
    }
}

/// Sentence terminators: a run of `.`/`!`/`?` followed by whitespace. The
/// boundary sits at the start of the next sentence.
fn scan_sentences(text: &str, out: &mut Vec<Boundary>) {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if matches!(bytes[i], b'.' | b'!' | b'?') {
            let start = i;
            while i < bytes.len() && matches!(bytes[i], b'.' | b'!' | b'?') {
                i += 1;
            }
            let ws_start = i;
            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            if i > ws_start {
                out.push(boundary(BoundaryKind::Sentence, i, i - start));
            }
            continue;
        }
        i += 1;
    }
}

/// An ATX header: 1-6 `#`, whitespace, and non-empty text.
pub(crate) fn match_header(line: &str) -> Option<usize> {
    if !line.starts_with('#') {
        return None;
    }
    let hashes = line.chars().take_while(|c| *c == '#').count();
    if hashes > 6 {
        return None;
    }
    let rest = &line[hashes..];
    if !rest.starts_with(char::is_whitespace) || rest.trim().is_empty() {
        return None;
    }
    Some(line.len())
}

/// A blockquote marker: `>` followed by whitespace.
pub(crate) fn match_quote(line: &str) -> Option<usize> {
    let rest = line.strip_prefix('>')?;
    let ws = rest.len() - rest.trim_start().len();
    if ws == 0 {
        return None;
    }
    Some(1 + ws)
}

/// A list marker: optional indentation, a bullet (`-`/`*`/`+`/`•`) or a
/// number and dot, then whitespace. Returns the matched marker length.
pub(crate) fn match_list_marker(line: &str) -> Option<usize> {
    let indent = line.len() - line.trim_start().len();
    let rest = line.trim_start();

    if let Some(after) = rest
        .strip_prefix(['-', '*', '+'])
        .or_else(|| rest.strip_prefix('•'))
    {
        let ws = after.len() - after.trim_start().len();
        if ws == 0 {
            return None;
        }
        return Some(indent + (rest.len() - after.len()) + ws);
    }

    let digits = rest.chars().take_while(char::is_ascii_digit).count();
    if digits > 0 {
        if let Some(after) = rest[digits..].strip_prefix('.') {
            let ws = after.len() - after.trim_start().len();
            if ws > 0 {
                return Some(indent + digits + 1 + ws);
            }
        }
    }

    None
}

fn estimate_segments(text_len: usize, boundaries: &mut [Boundary]) {
    let n = boundaries.len();
    for i in 0..n {
        let next = if i + 1 < n {
            boundaries[i + 1].position
        } else {
            text_len
        };
        boundaries[i].segment_size = next.saturating_sub(boundaries[i].position);
    }
}
