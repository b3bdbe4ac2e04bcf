//! Basic example: knowledge-graph ingestion
//!
//! Chunks a markdown document and prints the minted graph elements (chunks,
//! corpus, community) as JSON, the same payload the triple-store ingestion
//! path consumes.
//!
//! Run with:
//! ```bash
//! cargo run --example basic_ingest -- /path/to/document.md
//! ```

use anyhow::{Context, Result};
use semchunk_graph::{DocumentChunker, SourceMetadata};
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

    let markdown = std::fs::read_to_string(&args[1])
        .with_context(|| format!("reading {}", args[1]))?;

    let metadata = SourceMetadata {
        source_file: Some(args[1].clone()),
        format: Some("markdown".to_string()),
        ..Default::default()
    };

    let graph = DocumentChunker::new()
        .chunk_document(&markdown, &metadata)
        .await
        .context("chunking document")?;

    info!(
        "minted {} chunks under {} (cohesion {:.2})",
        graph.chunks.len(),
        graph.corpus.uri,
        graph.community.metadata.cohesion,
    );

    println!("{}", serde_json::to_string_pretty(&graph)?);
    Ok(())
}
