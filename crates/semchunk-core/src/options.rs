//! Chunking configuration.
//!
//! These structs are prepared for TOML/JSON config loading: every field has
//! a serde default, so partial configs deserialize cleanly and unknown keys
//! are unrepresentable.

use serde::{Deserialize, Serialize};

use crate::types::Strategy;

/// Configuration for a chunking run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkOptions {
    /// Target chunk size (bytes)
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Maximum chunk size (bytes)
    #[serde(default = "default_max_chunk_size")]
    pub max_chunk_size: usize,

    /// Minimum chunk size (bytes)
    #[serde(default = "default_min_chunk_size")]
    pub min_chunk_size: usize,

    /// Overlap between chunks (bytes)
    #[serde(default = "default_overlap_size")]
    pub overlap_size: usize,

    /// Prefer hierarchical segmentation for structured text
    #[serde(default = "default_preserve_structure")]
    pub preserve_structure: bool,

    /// Prefer semantic boundaries for plain text
    #[serde(default = "default_semantic_boundaries")]
    pub semantic_boundaries: bool,

    /// Split oversized chunks and flag undersized ones during post-processing
    #[serde(default = "default_balance_chunks")]
    pub balance_chunks: bool,

    /// Pinned strategy; auto-selected from content shape when `None`
    #[serde(default)]
    pub strategy: Option<Strategy>,

    /// Token budget for the token-aware strategy
    #[serde(default)]
    pub max_tokens: Option<usize>,

    /// Prepend trailing overlap from the previous chunk during post-processing
    #[serde(default)]
    pub add_overlap: bool,

    /// Coalesce consecutive undersized chunks during post-processing
    #[serde(default)]
    pub merge_small_chunks: bool,
}

fn default_chunk_size() -> usize {
    1000
}

fn default_max_chunk_size() -> usize {
    4000
}

fn default_min_chunk_size() -> usize {
    100
}

fn default_overlap_size() -> usize {
    100
}

fn default_preserve_structure() -> bool {
    true
}

fn default_semantic_boundaries() -> bool {
    true
}

fn default_balance_chunks() -> bool {
    true
}

impl Default for ChunkOptions {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            max_chunk_size: default_max_chunk_size(),
            min_chunk_size: default_min_chunk_size(),
            overlap_size: default_overlap_size(),
            preserve_structure: default_preserve_structure(),
            semantic_boundaries: default_semantic_boundaries(),
            balance_chunks: default_balance_chunks(),
            strategy: None,
            max_tokens: None,
            add_overlap: false,
            merge_small_chunks: false,
        }
    }
}
