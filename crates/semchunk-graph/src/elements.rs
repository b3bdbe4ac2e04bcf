//! Knowledge-graph element types minted from refined chunks.
//!
//! Field names serialize in camelCase to stay aligned with the Ragno/PROV
//! vocabulary the downstream triple store expects (`partOf`, `hasElement`,
//! `wasGeneratedBy`, ...).

use chrono::{DateTime, Utc};
use semchunk_core::Strategy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::Range;

/// RDF class of a minted element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementType {
    TextElement,
    Corpus,
    Community,
}

/// How, when, and by what process an element was derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provenance {
    pub was_generated_by: String,
    pub was_derived_from: String,
    pub generated_at_time: DateTime<Utc>,
    pub was_attributed_to: String,
}

/// A content-addressed text element of the knowledge graph.
///
/// Immutable once minted; re-minting byte-identical `(content, source,
/// index)` yields the identical URI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphChunk {
    pub uri: String,
    #[serde(rename = "type")]
    pub element_type: ElementType,
    pub content: String,
    pub size: usize,
    pub title: String,
    /// 0-based position in the output sequence
    pub index: usize,
    /// Source document URI
    pub part_of: String,
    /// Byte range in the source text
    pub position: Range<usize>,
    pub metadata: GraphChunkMetadata,
    pub provenance: Provenance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphChunkMetadata {
    /// 16-hex-char truncated SHA-256 of the content
    pub hash: String,
    pub strategy: Strategy,
    pub source_format: Option<String>,
    pub processing_timestamp: DateTime<Utc>,
}

/// Ordered collection of chunk references derived from one source document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Corpus {
    pub uri: String,
    #[serde(rename = "type")]
    pub element_type: ElementType,
    pub label: String,
    /// Chunk URIs in index order
    pub has_element: Vec<String>,
    pub member_count: usize,
    pub was_derived_from: String,
    pub metadata: CorpusMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusMetadata {
    pub total_size: usize,
}

/// Cohesion-scored grouping of the same chunks, for downstream clustering.
///
/// References the same chunk URIs as the corpus under a different access
/// pattern; the dual indexing is deliberate denormalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Community {
    pub uri: String,
    #[serde(rename = "type")]
    pub element_type: ElementType,
    pub has_community_element: Vec<CommunityElement>,
    pub based_on: String,
    pub metadata: CommunityMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityElement {
    pub element: String,
    #[serde(rename = "type")]
    pub element_type: ElementType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityMetadata {
    /// Size-uniformity score in `[0, 1]`, rounded to two decimals
    pub cohesion: f64,
}

/// Metadata supplied by the document-conversion stage.
///
/// Only `source_file`, `conversion_id`, `title`, and `format` are read by
/// name; all other fields pass through into the result unchanged. `extra` is
/// ordered so the fallback identifier hash is stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SourceMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversion_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl SourceMetadata {
    pub fn with_source_file(file: impl Into<String>) -> Self {
        Self {
            source_file: Some(file.into()),
            ..Default::default()
        }
    }
}

/// Everything minted from one document: the chunk elements plus the corpus
/// and community containers referencing them, all in the same index order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentGraph {
    pub chunks: Vec<GraphChunk>,
    pub corpus: Corpus,
    pub community: Community,
    pub source_uri: String,
    pub metadata: IngestMetadata,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestMetadata {
    pub source: SourceMetadata,
    pub chunking: semchunk_segment::RunMetadata,
    pub generated_at: DateTime<Utc>,
}
