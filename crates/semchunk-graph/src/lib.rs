//! # semchunk-graph
//!
//! Content-addressed knowledge-graph element minting for the semchunk
//! pipeline.
//!
//! [`DocumentChunker`] wraps the segmentation engine from
//! `semchunk-segment`: it chunks a converted document, mints a deterministic
//! URI for every chunk from truncated SHA-256 digests, and assembles the
//! corpus and community container elements that reference the chunks.
//!
//! ```text
//! markdown + source metadata
//!     → Chunker (segmentation)
//!     → GraphChunk elements (content-addressed URIs, titles, provenance)
//!     → Corpus + Community containers
//! ```
//!
//! Minting is idempotent: re-processing byte-identical content yields
//! byte-identical URIs, so re-ingesting a document never duplicates graph
//! nodes.
//!
//! ## Example
//!
//! ```rust,ignore
//! use semchunk_graph::{DocumentChunker, SourceMetadata};
//!
//! let chunker = DocumentChunker::new();
//! let metadata = SourceMetadata::with_source_file("doc.md");
//! let graph = chunker.chunk_document("# Title\n\nBody.", &metadata).await?;
//! println!("{} chunks under {}", graph.chunks.len(), graph.corpus.uri);
//! ```

pub mod elements;
pub mod minter;
pub mod title;
pub mod uri;

pub use elements::{
    Community, CommunityElement, CommunityMetadata, Corpus, CorpusMetadata, DocumentGraph,
    ElementType, GraphChunk, GraphChunkMetadata, IngestMetadata, Provenance, SourceMetadata,
};
pub use minter::{DocumentChunker, GraphOptions};
pub use title::extract_title;
pub use uri::DEFAULT_BASE_NAMESPACE;
