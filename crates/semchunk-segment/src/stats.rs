//! Aggregate statistics over one chunking run.

use semchunk_core::{Chunk, ChunkKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Size distribution and kind counts for one run's output.
///
/// Computed per call: the engine holds no running accumulator, so concurrent
/// runs across documents need no synchronization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkStatistics {
    pub total_chunks: usize,
    pub total_size: usize,
    pub avg_size: f64,
    pub min_size: usize,
    pub max_size: usize,
    pub variance: f64,
    pub std_dev: f64,
    pub kind_counts: BTreeMap<ChunkKind, usize>,
}

impl ChunkStatistics {
    pub fn from_chunks(chunks: &[Chunk]) -> Self {
        let total_chunks = chunks.len();
        let total_size: usize = chunks.iter().map(|c| c.size).sum();
        let avg_size = if total_chunks == 0 {
            0.0
        } else {
            total_size as f64 / total_chunks as f64
        };
        let variance = if total_chunks == 0 {
            0.0
        } else {
            chunks
                .iter()
                .map(|c| {
                    let delta = c.size as f64 - avg_size;
                    delta * delta
                })
                .sum::<f64>()
                / total_chunks as f64
        };

        let mut kind_counts = BTreeMap::new();
        for chunk in chunks {
            *kind_counts.entry(chunk.kind).or_insert(0) += 1;
        }

        Self {
            total_chunks,
            total_size,
            avg_size,
            min_size: chunks.iter().map(|c| c.size).min().unwrap_or(0),
            max_size: chunks.iter().map(|c| c.size).max().unwrap_or(0),
            variance,
            std_dev: variance.sqrt(),
            kind_counts,
        }
    }
}
