//! # semchunk-segment
//!
//! Strategy-driven text segmentation for the semchunk pipeline.
//!
//! The engine turns converted document text (or an ordered collection of
//! typed records) into a refined sequence of chunks:
//!
//! ```text
//! input → strategy selection → segmentation → post-processing → statistics
//! ```
//!
//! ## Components
//!
//! - [`BoundaryDetector`]: finds candidate split points (paragraph,
//!   sentence, section, list, code, quote) with priority-based tie-breaking
//! - [`fixed`], [`semantic`], [`adaptive`], [`hierarchical`],
//!   [`token_aware`]: the five segmentation strategies
//! - [`select`]: default strategy selection from content shape
//! - [`postprocess`]: size balancing, overlap injection, small-chunk
//!   merging, relationship linking
//! - [`ChunkStatistics`]: per-run size distribution
//! - [`Chunker`]: the entry point tying it all together
//!
//! ## Example
//!
//! ```rust,ignore
//! use semchunk_segment::Chunker;
//!
//! let result = Chunker::new().chunk("# Title\n\nBody text.").await?;
//! for chunk in &result.chunks {
//!     println!("{} {:?}", chunk.id, chunk.span);
//! }
//! ```

pub mod adaptive;
pub mod boundary;
pub mod engine;
pub mod fixed;
pub mod hierarchical;
pub mod postprocess;
pub mod select;
pub mod semantic;
pub mod stats;
pub mod token_aware;

pub use boundary::BoundaryDetector;
pub use engine::{Chunker, ChunkingResult, RunMetadata};
pub use stats::ChunkStatistics;
