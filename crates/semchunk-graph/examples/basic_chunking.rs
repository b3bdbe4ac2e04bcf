//! Basic example: raw segmentation
//!
//! This example demonstrates the segmentation engine on its own, for
//! callers that only need size-bounded chunks (e.g. LLM prompting).
//!
//! Run with:
//! ```bash
//! cargo run --example basic_chunking -- /path/to/document.md
//! ```

use anyhow::{Context, Result};
use semchunk_core::ChunkOptions;
use semchunk_segment::Chunker;
use std::env;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <markdown-file>", args[0]);
        std::process::exit(1);
    }

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let text = std::fs::read_to_string(&args[1])
        .with_context(|| format!("reading {}", args[1]))?;

    let chunker = Chunker::with_options(ChunkOptions {
        chunk_size: 800,
        ..Default::default()
    });
    let result = chunker.chunk(text.as_str()).await?;

    info!(
        "strategy={} chunks={} avg_size={:.0} in {}ms",
        result.metadata.strategy,
        result.metadata.total_chunks,
        result.metadata.avg_chunk_size,
        result.metadata.processing_time_ms,
    );

    for chunk in &result.chunks {
        let preview: String = chunk.content.chars().take(60).collect();
        println!(
            "{:>10}  {:>5}B  {:?}  {}",
            chunk.id,
            chunk.size,
            chunk.span,
            preview.replace('\n', " ")
        );
    }

    println!("\nstatistics: {}", serde_json::to_string_pretty(&result.statistics)?);
    Ok(())
}
