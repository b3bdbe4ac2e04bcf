//! Graph element minting over the segmentation engine.
//!
//! Wraps [`Chunker`] output into content-addressed chunk elements plus the
//! corpus and community containers that reference them, with provenance.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use semchunk_core::{Chunk, ChunkError, ChunkOptions, Strategy, TokenCounter};
use semchunk_segment::Chunker;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::elements::{
    Community, CommunityElement, CommunityMetadata, Corpus, CorpusMetadata, DocumentGraph,
    ElementType, GraphChunk, GraphChunkMetadata, IngestMetadata, Provenance, SourceMetadata,
};
use crate::title::extract_title;
use crate::uri;

/// Options for the graph-element minter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphOptions {
    /// Prefix for every minted URI. Changing it changes the URIs
    /// deterministically but not the underlying hashes.
    #[serde(default = "default_base_namespace")]
    pub base_namespace: String,

    /// Segmentation options forwarded to the engine
    #[serde(default)]
    pub chunking: ChunkOptions,
}

fn default_base_namespace() -> String {
    uri::DEFAULT_BASE_NAMESPACE.to_string()
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            base_namespace: default_base_namespace(),
            chunking: ChunkOptions::default(),
        }
    }
}

/// Converts raw documents into knowledge-graph elements.
///
/// Pure given its inputs and options: URIs derive from content, not process
/// state, so independent documents can be processed concurrently and
/// re-ingesting the same document maps onto the same graph nodes.
pub struct DocumentChunker {
    chunker: Chunker,
    base: String,
}

impl DocumentChunker {
    pub fn new() -> Self {
        Self::with_options(GraphOptions::default())
    }

    pub fn with_options(options: GraphOptions) -> Self {
        Self {
            chunker: Chunker::with_options(options.chunking),
            base: options.base_namespace,
        }
    }

    /// Inject the token counter dependency for the token-aware strategy.
    #[must_use]
    pub fn with_token_counter(mut self, counter: Arc<dyn TokenCounter>) -> Self {
        self.chunker = self.chunker.with_token_counter(counter);
        self
    }

    /// Segment a converted document and mint chunk, corpus, and community
    /// elements referencing it.
    ///
    /// The returned `chunks`, `corpus.has_element`, and
    /// `community.has_community_element` sequences share the same index
    /// order. Fails with [`ChunkError::EmptyContent`] when `markdown` is
    /// empty or whitespace-only.
    pub async fn chunk_document(
        &self,
        markdown: &str,
        metadata: &SourceMetadata,
    ) -> Result<DocumentGraph, ChunkError> {
        if markdown.trim().is_empty() {
            return Err(ChunkError::EmptyContent);
        }

        let result = self.chunker.chunk(markdown).await?;
        let source_uri = uri::document_uri(&self.base, metadata)?;
        let generated_at = Utc::now();
        debug!(%source_uri, chunks = result.chunks.len(), "minting graph elements");

        let chunks: Vec<GraphChunk> = result
            .chunks
            .iter()
            .enumerate()
            .map(|(index, chunk)| {
                self.mint_chunk(
                    chunk,
                    index,
                    &source_uri,
                    metadata,
                    result.metadata.strategy,
                    generated_at,
                )
            })
            .collect();

        let corpus = self.mint_corpus(&chunks, &source_uri, metadata);
        let community = self.mint_community(&chunks, &source_uri);

        Ok(DocumentGraph {
            chunks,
            corpus,
            community,
            source_uri,
            metadata: IngestMetadata {
                source: metadata.clone(),
                chunking: result.metadata,
                generated_at,
            },
        })
    }

    fn mint_chunk(
        &self,
        chunk: &Chunk,
        index: usize,
        source_uri: &str,
        metadata: &SourceMetadata,
        strategy: Strategy,
        generated_at: DateTime<Utc>,
    ) -> GraphChunk {
        GraphChunk {
            uri: uri::chunk_uri(&self.base, source_uri, index, &chunk.content),
            element_type: ElementType::TextElement,
            content: chunk.content.clone(),
            size: chunk.size,
            title: extract_title(&chunk.content)
                .unwrap_or_else(|| format!("Chunk {}", index + 1)),
            index,
            part_of: source_uri.to_string(),
            position: chunk.span.clone(),
            metadata: GraphChunkMetadata {
                hash: uri::short_hash(&chunk.content),
                strategy,
                source_format: metadata.format.clone(),
                processing_timestamp: generated_at,
            },
            provenance: Provenance {
                was_generated_by: uri::join(&self.base, "activity/chunking"),
                was_derived_from: source_uri.to_string(),
                generated_at_time: generated_at,
                was_attributed_to: uri::join(&self.base, "agent/semchunk"),
            },
        }
    }

    fn mint_corpus(
        &self,
        chunks: &[GraphChunk],
        source_uri: &str,
        metadata: &SourceMetadata,
    ) -> Corpus {
        let label = metadata
            .title
            .clone()
            .or_else(|| metadata.source_file.clone())
            .unwrap_or_else(|| format!("document {}", uri::short_hash(source_uri)));

        Corpus {
            uri: uri::corpus_uri(&self.base, source_uri),
            element_type: ElementType::Corpus,
            label,
            has_element: chunks.iter().map(|c| c.uri.clone()).collect(),
            member_count: chunks.len(),
            was_derived_from: source_uri.to_string(),
            metadata: CorpusMetadata {
                total_size: chunks.iter().map(|c| c.size).sum(),
            },
        }
    }

    fn mint_community(&self, chunks: &[GraphChunk], source_uri: &str) -> Community {
        let sizes: Vec<usize> = chunks.iter().map(|c| c.size).collect();
        Community {
            uri: uri::community_uri(&self.base, source_uri),
            element_type: ElementType::Community,
            has_community_element: chunks
                .iter()
                .map(|c| CommunityElement {
                    element: c.uri.clone(),
                    element_type: ElementType::TextElement,
                })
                .collect(),
            based_on: source_uri.to_string(),
            metadata: CommunityMetadata {
                cohesion: cohesion(&sizes),
            },
        }
    }
}

impl Default for DocumentChunker {
    fn default() -> Self {
        Self::new()
    }
}

/// `1 − stddev/mean` of chunk sizes, clamped to `[0, 1]` and rounded to two
/// decimals. A community of one (or zero) chunks is maximally cohesive.
fn cohesion(sizes: &[usize]) -> f64 {
    if sizes.len() <= 1 {
        return 1.0;
    }
    let n = sizes.len() as f64;
    let mean = sizes.iter().sum::<usize>() as f64 / n;
    let variance = sizes
        .iter()
        .map(|&size| {
            let delta = size as f64 - mean;
            delta * delta
        })
        .sum::<f64>()
        / n;
    let raw = 1.0 - variance.sqrt() / mean;
    (raw.clamp(0.0, 1.0) * 100.0).round() / 100.0
}
