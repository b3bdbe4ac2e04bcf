//! Hierarchical chunking: header-delimited sections for text, type-grouped
//! packing for record collections.

use semchunk_core::{
    Chunk, ChunkError, ChunkExtra, ChunkKind, ChunkOptions, Record,
};

use crate::boundary::{self, BoundaryDetector};
use crate::semantic;

/// A header-delimited section of the document.
#[derive(Debug, Clone)]
struct Section {
    heading: Option<String>,
    level: u8,
    span: std::ops::Range<usize>,
}

/// Split markdown-ish text into header-delimited sections. A section that
/// fits within `max_chunk_size` becomes one chunk; an oversized section is
/// split with the semantic strategy and its sub-chunks are tagged with their
/// parent section.
pub fn chunk_text(text: &str, options: &ChunkOptions) -> Result<Vec<Chunk>, ChunkError> {
    let mut chunks = Vec::new();

    for section in parse_sections(text) {
        let body = &text[section.span.clone()];
        if body.trim().is_empty() {
            continue;
        }

        if body.len() <= options.max_chunk_size {
            chunks.push(Chunk {
                id: String::new(),
                content: body.to_string(),
                size: body.len(),
                span: section.span.clone(),
                kind: ChunkKind::HierarchicalSection,
                extra: ChunkExtra::Section {
                    level: section.level,
                    heading: section.heading.clone().unwrap_or_default(),
                },
                needs_merging: false,
                relationships: None,
            });
            continue;
        }

        // oversized section: recurse with the semantic strategy and rebase
        // the sub-chunk spans onto the full document
        let boundaries = BoundaryDetector::new().detect(body);
        let subs = semantic::chunk(body, &boundaries, options);
        for (subsection_index, mut sub) in subs.into_iter().enumerate() {
            sub.span = section.span.start + sub.span.start..section.span.start + sub.span.end;
            sub.kind = ChunkKind::HierarchicalSubsection;
            sub.extra = ChunkExtra::Subsection {
                parent_section: section.heading.clone().unwrap_or_default(),
                parent_level: section.level,
                subsection_index,
            };
            chunks.push(sub);
        }
    }

    renumber(&mut chunks);
    Ok(chunks)
}

/// Group records by type (stable first-seen order), then greedily pack the
/// grouped stream into chunks bounded by `chunk_size` of serialized length.
/// Each chunk's content is the JSON array of its member records; its
/// dominant type is the mode of the member types.
pub fn chunk_records(
    records: &[Record],
    options: &ChunkOptions,
) -> Result<Vec<Chunk>, ChunkError> {
    let mut groups: Vec<(&str, Vec<&Record>)> = Vec::new();
    for record in records {
        match groups.iter_mut().find(|(kind, _)| *kind == record.kind) {
            Some((_, members)) => members.push(record),
            None => groups.push((record.kind.as_str(), vec![record])),
        }
    }

    let mut chunks = Vec::new();
    let mut pack: Vec<&Record> = Vec::new();
    let mut pack_len = 0usize;
    let mut offset = 0usize;

    for record in groups.iter().flat_map(|(_, members)| members.iter().copied()) {
        let serialized_len = serde_json::to_string(record)?.len();
        if !pack.is_empty() && pack_len + serialized_len > options.chunk_size {
            offset = flush_pack(&mut pack, offset, &mut chunks)?;
            pack_len = 0;
        }
        pack.push(record);
        pack_len += serialized_len;
    }
    if !pack.is_empty() {
        flush_pack(&mut pack, offset, &mut chunks)?;
    }

    renumber(&mut chunks);
    Ok(chunks)
}

fn flush_pack(
    pack: &mut Vec<&Record>,
    offset: usize,
    chunks: &mut Vec<Chunk>,
) -> Result<usize, ChunkError> {
    let content = serde_json::to_string(&pack)?;
    let size = content.len();
    let group = dominant_kind(pack);
    chunks.push(Chunk {
        id: String::new(),
        content,
        size,
        span: offset..offset + size,
        kind: ChunkKind::HierarchicalCorpuscles,
        extra: ChunkExtra::Corpuscles {
            group,
            records: pack.len(),
        },
        needs_merging: false,
        relationships: None,
    });
    pack.clear();
    Ok(offset + size)
}

/// Mode of the member record types; first-seen wins ties.
fn dominant_kind(pack: &[&Record]) -> String {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for record in pack {
        match counts.iter_mut().find(|(kind, _)| *kind == record.kind) {
            Some((_, count)) => *count += 1,
            None => counts.push((record.kind.as_str(), 1)),
        }
    }
    let mut best: (&str, usize) = ("", 0);
    for (kind, count) in counts {
        if count > best.1 {
            best = (kind, count);
        }
    }
    best.0.to_string()
}

/// Split text into sections at ATX header lines. Content before the first
/// header becomes a headingless preamble section.
fn parse_sections(text: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current = Section {
        heading: None,
        level: 0,
        span: 0..0,
    };
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();
        let stripped = line.trim_end_matches(['\n', '\r']);

        if boundary::match_header(stripped).is_some() {
            let hashes = stripped.chars().take_while(|c| *c == '#').count();
            let heading = stripped[hashes..].trim().to_string();

            if line_start > current.span.start || current.heading.is_some() {
                current.span.end = line_start;
                sections.push(current);
            }
            current = Section {
                heading: Some(heading),
                level: hashes as u8,
                span: line_start..line_start,
            };
        }
    }

    current.span.end = text.len();
    if current.span.end > current.span.start || current.heading.is_some() {
        sections.push(current);
    }

    sections
}

fn renumber(chunks: &mut [Chunk]) {
    for (index, chunk) in chunks.iter_mut().enumerate() {
        chunk.id = format!("chunk-{index}");
    }
}
