//! # semchunk-core
//!
//! Core types and traits for semchunk, a deterministic chunking pipeline
//! that turns converted document text into content-addressed knowledge-graph
//! elements.
//!
//! This crate provides the foundational pieces shared by the rest of the
//! workspace:
//!
//! - **Data model**: [`Chunk`], [`Boundary`], [`Record`] and their enums
//! - **Configuration**: [`ChunkOptions`] with serde-defaulted fields
//! - **Errors**: the [`ChunkError`] taxonomy
//! - **Collaborator seams**: the [`TokenCounter`] trait for injected
//!   tokenizers
//!
//! ## Architecture
//!
//! The pipeline is organized around two stages:
//!
//! ```text
//! text/records → Chunker (semchunk-segment) → DocumentChunker (semchunk-graph)
//!                  raw chunks                   chunk/corpus/community elements
//! ```
//!
//! ## Related Crates
//!
//! - `semchunk-segment`: boundary detection, the five strategies, and
//!   post-processing
//! - `semchunk-graph`: deterministic URI minting and graph element assembly

pub mod error;
pub mod options;
pub mod traits;
pub mod types;

pub use error::{ChunkError, Result, TokenCountError};
pub use options::ChunkOptions;
pub use traits::TokenCounter;
pub use types::*;
