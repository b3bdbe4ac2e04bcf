//! Core types for semchunk.
//!
//! This module contains the shared data structures used across the pipeline:
//!
//! ## Segmentation
//! - [`Chunk`]: a contiguous or grouped unit of segmented content
//! - [`ChunkKind`]: which strategy shape produced a chunk
//! - [`ChunkExtra`]: strategy-specific chunk details
//! - [`ChunkRelationships`]: sequence links assigned during post-processing
//!
//! ## Boundaries
//! - [`Boundary`]: a candidate split point in text
//! - [`BoundaryKind`]: classification with a fixed tie-break priority
//!
//! ## Input
//! - [`ChunkInput`]: text or an ordered collection of typed records
//! - [`Record`]: a typed record for the hierarchical strategy
//! - [`Strategy`]: the closed set of segmentation algorithms

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use crate::error::ChunkError;

// ============================================================================
// Strategies
// ============================================================================

/// Segmentation strategy.
///
/// The set is closed: the engine dispatches on this enum with an exhaustive
/// `match`, so adding a strategy is a compile-time affair. Unrecognized names
/// only exist at the string edge and are rejected by [`Strategy::from_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Sliding window of a fixed byte size
    Fixed,
    /// Greedy accumulation of boundary-delimited segments
    Semantic,
    /// Boundary runs grouped by estimated segment size
    Adaptive,
    /// Header-delimited sections, or type-grouped record packing
    Hierarchical,
    /// Semantic control flow with a token budget
    TokenAware,
}

impl Strategy {
    /// Stable string name, matching the serialized form.
    pub fn name(self) -> &'static str {
        match self {
            Strategy::Fixed => "fixed",
            Strategy::Semantic => "semantic",
            Strategy::Adaptive => "adaptive",
            Strategy::Hierarchical => "hierarchical",
            Strategy::TokenAware => "token_aware",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = ChunkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fixed" => Ok(Strategy::Fixed),
            "semantic" => Ok(Strategy::Semantic),
            "adaptive" => Ok(Strategy::Adaptive),
            "hierarchical" => Ok(Strategy::Hierarchical),
            "token_aware" => Ok(Strategy::TokenAware),
            other => Err(ChunkError::UnknownStrategy(other.to_string())),
        }
    }
}

// ============================================================================
// Chunks
// ============================================================================

/// A contiguous or grouped unit of segmented content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Sequence-local identifier (not globally unique)
    pub id: String,
    /// The chunk text, or the serialized record group
    pub content: String,
    /// Byte range in the source text
    pub span: Range<usize>,
    /// Content length in bytes
    pub size: usize,
    /// Which strategy shape produced this chunk
    pub kind: ChunkKind,
    /// Strategy-specific details
    #[serde(default)]
    pub extra: ChunkExtra,
    /// Flagged by size balancing when below the merge threshold
    #[serde(default)]
    pub needs_merging: bool,
    /// Sequence links assigned during post-processing
    #[serde(default)]
    pub relationships: Option<ChunkRelationships>,
}

/// Which strategy shape produced a chunk.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ChunkKind {
    Fixed,
    Semantic,
    Adaptive,
    HierarchicalSection,
    HierarchicalSubsection,
    HierarchicalCorpuscles,
    TokenAware,
    Merged,
}

impl ChunkKind {
    /// Stable string name, matching the serialized form.
    pub fn name(self) -> &'static str {
        match self {
            ChunkKind::Fixed => "fixed",
            ChunkKind::Semantic => "semantic",
            ChunkKind::Adaptive => "adaptive",
            ChunkKind::HierarchicalSection => "hierarchical_section",
            ChunkKind::HierarchicalSubsection => "hierarchical_subsection",
            ChunkKind::HierarchicalCorpuscles => "hierarchical_corpuscles",
            ChunkKind::TokenAware => "token_aware",
            ChunkKind::Merged => "merged",
        }
    }
}

impl fmt::Display for ChunkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Strategy-specific chunk details.
///
/// One variant per shape the strategies actually produce; the untyped
/// metadata map this replaces only ever held these fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkExtra {
    #[default]
    None,
    /// Fixed window: overlap with the previous window (0 for the first)
    Fixed { overlap: usize },
    /// Semantic flush: the boundary kind that opened this chunk
    Semantic { boundary: Option<BoundaryKind> },
    /// Adaptive run: number of boundaries grouped into this chunk
    Adaptive { boundaries: usize },
    /// Corpuscle group: dominant record type and member count
    Corpuscles { group: String, records: usize },
    /// Header-delimited section
    Section { level: u8, heading: String },
    /// Sub-chunk of an oversized section
    Subsection {
        parent_section: String,
        parent_level: u8,
        subsection_index: usize,
    },
    /// Token-aware flush: measured token count
    TokenAware { token_count: usize },
    /// Merged run of undersized chunks
    Merged { merged_from: usize },
}

/// Sequence links between chunks in final output order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkRelationships {
    /// Id of the preceding chunk
    pub previous: Option<String>,
    /// Id of the following chunk
    pub next: Option<String>,
    /// 0-based position in the final sequence
    pub sequence: usize,
    /// Total chunks in the sequence
    pub total: usize,
}

// ============================================================================
// Boundaries
// ============================================================================

/// Kind of candidate segmentation point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryKind {
    Paragraph,
    Sentence,
    Section,
    List,
    Code,
    Quote,
}

impl BoundaryKind {
    /// Fixed priority used to resolve same-position collisions (higher wins).
    pub fn priority(self) -> u8 {
        match self {
            BoundaryKind::Code => 9,
            BoundaryKind::Section => 8,
            BoundaryKind::Quote => 6,
            BoundaryKind::Paragraph => 5,
            BoundaryKind::List => 4,
            BoundaryKind::Sentence => 3,
        }
    }
}

/// A candidate split point in text.
///
/// Detector output is sorted ascending by `position`; at an identical
/// position only the highest-priority boundary is retained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Boundary {
    /// Byte offset of the split point
    pub position: usize,
    pub kind: BoundaryKind,
    /// Copy of `kind.priority()`, kept on the record for sorting
    pub priority: u8,
    /// Length of the matched delimiter in bytes
    pub length: usize,
    /// Estimated distance to the next boundary of any kind, or to end of text
    pub segment_size: usize,
}

// ============================================================================
// Input
// ============================================================================

/// A typed record in an ordered collection, the non-text input form.
///
/// The hierarchical strategy groups records by `kind` and packs them into
/// chunks bounded by the serialized length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Record type used for grouping
    #[serde(rename = "type")]
    pub kind: String,
    /// Arbitrary record body
    #[serde(default)]
    pub body: serde_json::Value,
}

impl Record {
    pub fn new(kind: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            kind: kind.into(),
            body,
        }
    }
}

/// Input accepted by the segmentation entry point.
#[derive(Debug, Clone, PartialEq)]
pub enum ChunkInput {
    /// Plain text or markdown
    Text(String),
    /// Ordered collection of typed records
    Records(Vec<Record>),
}

impl ChunkInput {
    /// `true` when there is nothing to segment: whitespace-only text or an
    /// empty record list.
    pub fn is_empty(&self) -> bool {
        match self {
            ChunkInput::Text(text) => text.trim().is_empty(),
            ChunkInput::Records(records) => records.is_empty(),
        }
    }

    /// Input size: text length in bytes, or the record count.
    pub fn size(&self) -> usize {
        match self {
            ChunkInput::Text(text) => text.len(),
            ChunkInput::Records(records) => records.len(),
        }
    }
}

impl From<String> for ChunkInput {
    fn from(text: String) -> Self {
        ChunkInput::Text(text)
    }
}

impl From<&str> for ChunkInput {
    fn from(text: &str) -> Self {
        ChunkInput::Text(text.to_string())
    }
}

impl From<Vec<Record>> for ChunkInput {
    fn from(records: Vec<Record>) -> Self {
        ChunkInput::Records(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Strategy Tests ====================

    #[test]
    fn test_strategy_round_trip() {
        for strategy in [
            Strategy::Fixed,
            Strategy::Semantic,
            Strategy::Adaptive,
            Strategy::Hierarchical,
            Strategy::TokenAware,
        ] {
            let parsed: Strategy = strategy.name().parse().unwrap();
            assert_eq!(parsed, strategy);
        }
    }

    #[test]
    fn test_strategy_unknown_name() {
        let err = "recursive".parse::<Strategy>().unwrap_err();
        assert!(matches!(err, ChunkError::UnknownStrategy(_)));
        assert!(err.to_string().contains("recursive"));
    }

    #[test]
    fn test_strategy_serialization() {
        assert_eq!(
            serde_json::to_string(&Strategy::TokenAware).unwrap(),
            "\"token_aware\""
        );
        assert_eq!(
            serde_json::to_string(&Strategy::Fixed).unwrap(),
            "\"fixed\""
        );
    }

    // ==================== Chunk Tests ====================

    #[test]
    fn test_chunk_serialization_round_trip() {
        let chunk = Chunk {
            id: "chunk-0".to_string(),
            content: "Some content.".to_string(),
            span: 0..13,
            size: 13,
            kind: ChunkKind::Semantic,
            extra: ChunkExtra::Semantic {
                boundary: Some(BoundaryKind::Paragraph),
            },
            needs_merging: false,
            relationships: Some(ChunkRelationships {
                previous: None,
                next: Some("chunk-1".to_string()),
                sequence: 0,
                total: 2,
            }),
        };

        let json = serde_json::to_string(&chunk).unwrap();
        let back: Chunk = serde_json::from_str(&json).unwrap();
        assert_eq!(chunk, back);
    }

    #[test]
    fn test_chunk_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&ChunkKind::HierarchicalCorpuscles).unwrap(),
            "\"hierarchical_corpuscles\""
        );
        assert_eq!(
            serde_json::to_string(&ChunkKind::Merged).unwrap(),
            "\"merged\""
        );
    }

    #[test]
    fn test_chunk_kind_display_matches_serialized_form() {
        assert_eq!(
            ChunkKind::HierarchicalSubsection.to_string(),
            "hierarchical_subsection"
        );
        assert_eq!(ChunkKind::TokenAware.to_string(), "token_aware");
    }

    #[test]
    fn test_chunk_extra_default_is_none() {
        assert_eq!(ChunkExtra::default(), ChunkExtra::None);
    }

    // ==================== Boundary Tests ====================

    #[test]
    fn test_boundary_priorities() {
        assert_eq!(BoundaryKind::Code.priority(), 9);
        assert_eq!(BoundaryKind::Section.priority(), 8);
        assert_eq!(BoundaryKind::Quote.priority(), 6);
        assert_eq!(BoundaryKind::Paragraph.priority(), 5);
        assert_eq!(BoundaryKind::List.priority(), 4);
        assert_eq!(BoundaryKind::Sentence.priority(), 3);
    }

    #[test]
    fn test_boundary_priority_ordering() {
        // code beats everything; sentence loses to everything
        for kind in [
            BoundaryKind::Section,
            BoundaryKind::Quote,
            BoundaryKind::Paragraph,
            BoundaryKind::List,
            BoundaryKind::Sentence,
        ] {
            assert!(BoundaryKind::Code.priority() > kind.priority());
            assert!(kind.priority() > BoundaryKind::Sentence.priority() || kind == BoundaryKind::Sentence);
        }
    }

    // ==================== Input Tests ====================

    #[test]
    fn test_input_text_is_empty() {
        assert!(ChunkInput::from("").is_empty());
        assert!(ChunkInput::from("   \n\t ").is_empty());
        assert!(!ChunkInput::from("content").is_empty());
    }

    #[test]
    fn test_input_records_is_empty() {
        assert!(ChunkInput::Records(vec![]).is_empty());
        let records = vec![Record::new("note", serde_json::json!({"text": "hi"}))];
        assert!(!ChunkInput::from(records).is_empty());
    }

    #[test]
    fn test_input_size() {
        assert_eq!(ChunkInput::from("abcd").size(), 4);
        let records = vec![
            Record::new("note", serde_json::Value::Null),
            Record::new("note", serde_json::Value::Null),
        ];
        assert_eq!(ChunkInput::from(records).size(), 2);
    }

    #[test]
    fn test_record_serialization_uses_type_key() {
        let record = Record::new("entity", serde_json::json!({"name": "Hinton"}));
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"type\":\"entity\""));
    }
}
