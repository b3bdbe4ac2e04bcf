//! The segmentation entry point.

use std::sync::Arc;
use std::time::Instant;

use semchunk_core::{
    Chunk, ChunkError, ChunkInput, ChunkOptions, Strategy, TokenCounter,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::boundary::BoundaryDetector;
use crate::stats::ChunkStatistics;
use crate::{adaptive, fixed, hierarchical, postprocess, select, semantic, token_aware};

/// Result of one segmentation run.
#[derive(Debug, Clone, Serialize)]
pub struct ChunkingResult {
    pub chunks: Vec<Chunk>,
    pub metadata: RunMetadata,
    pub statistics: ChunkStatistics,
}

/// Run-level metadata echoed back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetadata {
    /// The strategy that actually ran (pinned or auto-selected)
    pub strategy: Strategy,
    pub total_chunks: usize,
    /// Input size: text bytes, or record count
    pub original_size: usize,
    pub avg_chunk_size: f64,
    pub processing_time_ms: u64,
    /// The effective options for the run
    pub options: ChunkOptions,
}

/// Strategy-driven text segmentation engine.
///
/// Each [`chunk`](Chunker::chunk) call is pure given its input and the
/// configured options: no state is shared across calls, so one `Chunker` may
/// serve concurrent runs over independent documents without coordination.
pub struct Chunker {
    options: ChunkOptions,
    token_counter: Option<Arc<dyn TokenCounter>>,
}

impl Chunker {
    pub fn new() -> Self {
        Self::with_options(ChunkOptions::default())
    }

    pub fn with_options(options: ChunkOptions) -> Self {
        Self {
            options,
            token_counter: None,
        }
    }

    /// Inject the token counter dependency for the token-aware strategy.
    #[must_use]
    pub fn with_token_counter(mut self, counter: Arc<dyn TokenCounter>) -> Self {
        self.token_counter = Some(counter);
        self
    }

    pub fn options(&self) -> &ChunkOptions {
        &self.options
    }

    /// Segment `input` into refined chunks.
    ///
    /// Picks a strategy when none is pinned, runs it, post-processes the raw
    /// chunks, and summarizes the run. Fails with
    /// [`ChunkError::EmptyContent`] on blank input and
    /// [`ChunkError::MissingTokenCounter`] when the token-aware strategy is
    /// requested without a counter.
    pub async fn chunk(
        &self,
        input: impl Into<ChunkInput>,
    ) -> Result<ChunkingResult, ChunkError> {
        let input = input.into();
        if input.is_empty() {
            return Err(ChunkError::EmptyContent);
        }

        let started = Instant::now();
        let strategy = self.options.strategy.unwrap_or_else(|| {
            select::select(&input, &self.options, self.token_counter.is_some())
        });
        debug!(%strategy, size = input.size(), "segmenting input");

        let raw = self.run_strategy(strategy, &input).await?;
        let chunks = postprocess::process(raw, &self.options);
        let statistics = ChunkStatistics::from_chunks(&chunks);

        Ok(ChunkingResult {
            metadata: RunMetadata {
                strategy,
                total_chunks: chunks.len(),
                original_size: input.size(),
                avg_chunk_size: statistics.avg_size,
                processing_time_ms: started.elapsed().as_millis() as u64,
                options: self.options.clone(),
            },
            statistics,
            chunks,
        })
    }

    async fn run_strategy(
        &self,
        strategy: Strategy,
        input: &ChunkInput,
    ) -> Result<Vec<Chunk>, ChunkError> {
        match (strategy, input) {
            (Strategy::Hierarchical, ChunkInput::Records(records)) => {
                hierarchical::chunk_records(records, &self.options)
            }
            (Strategy::Hierarchical, ChunkInput::Text(text)) => {
                hierarchical::chunk_text(text, &self.options)
            }
            (_, ChunkInput::Records(_)) => Err(ChunkError::InvalidInput(format!(
                "{strategy} strategy requires text input"
            ))),
            (Strategy::Fixed, ChunkInput::Text(text)) => Ok(fixed::chunk(text, &self.options)),
            (Strategy::Semantic, ChunkInput::Text(text)) => {
                let boundaries = BoundaryDetector::new().detect(text);
                Ok(semantic::chunk(text, &boundaries, &self.options))
            }
            (Strategy::Adaptive, ChunkInput::Text(text)) => {
                let boundaries = BoundaryDetector::new().detect(text);
                Ok(adaptive::chunk(text, &boundaries, &self.options))
            }
            (Strategy::TokenAware, ChunkInput::Text(text)) => {
                let counter = self
                    .token_counter
                    .as_deref()
                    .ok_or(ChunkError::MissingTokenCounter)?;
                let boundaries = BoundaryDetector::new().detect(text);
                token_aware::chunk(text, &boundaries, counter, &self.options).await
            }
        }
    }
}

impl Default for Chunker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use semchunk_core::{ChunkExtra, ChunkKind, Record, TokenCountError};

    struct WordCounter;

    #[async_trait]
    impl TokenCounter for WordCounter {
        fn tokenizer(&self) -> &str {
            "whitespace"
        }

        async fn count_tokens(&self, text: &str) -> Result<usize, TokenCountError> {
            Ok(text.split_whitespace().count())
        }
    }

    fn pinned(strategy: Strategy) -> ChunkOptions {
        ChunkOptions {
            strategy: Some(strategy),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_empty_text_rejected() {
        let result = Chunker::new().chunk("").await;
        assert!(matches!(result, Err(ChunkError::EmptyContent)));
    }

    #[tokio::test]
    async fn test_whitespace_only_rejected() {
        let result = Chunker::new().chunk("  \n\t  ").await;
        assert!(matches!(result, Err(ChunkError::EmptyContent)));
    }

    #[tokio::test]
    async fn test_empty_records_rejected() {
        let result = Chunker::new().chunk(Vec::<Record>::new()).await;
        assert!(matches!(result, Err(ChunkError::EmptyContent)));
    }

    #[tokio::test]
    async fn test_fixed_example() {
        let options = ChunkOptions {
            chunk_size: 4,
            overlap_size: 0,
            ..pinned(Strategy::Fixed)
        };
        let result = Chunker::with_options(options)
            .chunk("abcdefghij")
            .await
            .unwrap();
        let contents: Vec<&str> = result.chunks.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(contents, vec!["abcd", "efgh", "ij"]);
        assert_eq!(result.chunks[0].span, 0..4);
        assert_eq!(result.chunks[1].span, 4..8);
        assert_eq!(result.chunks[2].span, 8..10);
        assert_eq!(result.metadata.strategy, Strategy::Fixed);
        assert_eq!(result.metadata.total_chunks, 3);
        assert_eq!(result.metadata.original_size, 10);
    }

    #[tokio::test]
    async fn test_auto_selection_recorded_in_metadata() {
        let result = Chunker::new()
            .chunk("Plain prose here. More prose there.")
            .await
            .unwrap();
        assert_eq!(result.metadata.strategy, Strategy::Semantic);
    }

    #[tokio::test]
    async fn test_structured_text_auto_selects_hierarchical() {
        let result = Chunker::new()
            .chunk("# Title\n\nBody text under the title.")
            .await
            .unwrap();
        assert_eq!(result.metadata.strategy, Strategy::Hierarchical);
    }

    #[tokio::test]
    async fn test_records_auto_select_hierarchical() {
        let records = vec![
            Record::new("unit", serde_json::json!({"text": "alpha"})),
            Record::new("unit", serde_json::json!({"text": "beta"})),
        ];
        let result = Chunker::new().chunk(records).await.unwrap();
        assert_eq!(result.metadata.strategy, Strategy::Hierarchical);
        assert_eq!(result.metadata.original_size, 2);
        assert!(result
            .chunks
            .iter()
            .all(|c| c.kind == ChunkKind::HierarchicalCorpuscles));
    }

    #[tokio::test]
    async fn test_pinned_strategy_on_records_rejected() {
        let records = vec![Record::new("unit", serde_json::Value::Null)];
        let result = Chunker::with_options(pinned(Strategy::Fixed)).chunk(records).await;
        assert!(matches!(result, Err(ChunkError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_token_aware_without_counter_fails() {
        let options = ChunkOptions {
            max_tokens: Some(64),
            ..pinned(Strategy::TokenAware)
        };
        let result = Chunker::with_options(options).chunk("some text").await;
        assert!(matches!(result, Err(ChunkError::MissingTokenCounter)));
    }

    #[tokio::test]
    async fn test_token_aware_with_counter() {
        let options = ChunkOptions {
            max_tokens: Some(4),
            ..Default::default()
        };
        let result = Chunker::with_options(options)
            .with_token_counter(Arc::new(WordCounter))
            .chunk("One two three. Four five six. Seven eight nine.")
            .await
            .unwrap();
        assert_eq!(result.metadata.strategy, Strategy::TokenAware);
        assert!(result.chunks.len() > 1);
        for c in &result.chunks {
            assert!(matches!(c.extra, ChunkExtra::TokenAware { .. }));
        }
    }

    #[tokio::test]
    async fn test_no_empty_chunks_across_strategies() {
        let text = "# Header\n\nSome prose. More prose.\n\n- a list item\n\n```\ncode\n```\n";
        for strategy in [
            Strategy::Fixed,
            Strategy::Semantic,
            Strategy::Adaptive,
            Strategy::Hierarchical,
        ] {
            let result = Chunker::with_options(pinned(strategy)).chunk(text).await.unwrap();
            assert!(!result.chunks.is_empty(), "{strategy} returned no chunks");
            assert!(
                result.chunks.iter().all(|c| !c.content.is_empty()),
                "{strategy} returned an empty chunk"
            );
        }
    }

    #[tokio::test]
    async fn test_relationships_assigned_in_final_order() {
        let options = ChunkOptions {
            chunk_size: 10,
            ..pinned(Strategy::Semantic)
        };
        let result = Chunker::with_options(options)
            .chunk("One two. Three four. Five six. Seven eight.")
            .await
            .unwrap();
        let total = result.chunks.len();
        for (i, c) in result.chunks.iter().enumerate() {
            let rel = c.relationships.as_ref().unwrap();
            assert_eq!(rel.sequence, i);
            assert_eq!(rel.total, total);
        }
    }

    #[tokio::test]
    async fn test_statistics_match_chunks() {
        let result = Chunker::new()
            .chunk("Alpha beta. Gamma delta. Epsilon zeta.")
            .await
            .unwrap();
        assert_eq!(result.statistics.total_chunks, result.chunks.len());
        assert_eq!(
            result.statistics.total_size,
            result.chunks.iter().map(|c| c.size).sum::<usize>()
        );
        assert_eq!(result.metadata.avg_chunk_size, result.statistics.avg_size);
    }

    #[tokio::test]
    async fn test_options_echoed_in_metadata() {
        let options = ChunkOptions {
            chunk_size: 123,
            ..Default::default()
        };
        let result = Chunker::with_options(options.clone())
            .chunk("Prose without structure.")
            .await
            .unwrap();
        assert_eq!(result.metadata.options, options);
    }
}
