//! Deterministic, content-addressed URI minting.
//!
//! All identifiers derive from truncated SHA-256 digests of content or
//! caller-supplied identifiers, never from process state, so re-minting the
//! same bytes always yields the same URI. Changing the base namespace
//! changes every URI but none of the underlying hashes.

use sha2::{Digest, Sha256};

use crate::elements::SourceMetadata;

/// Default base namespace for minted URIs.
pub const DEFAULT_BASE_NAMESPACE: &str = "http://example.org/semem/";

/// 16-hex-char truncated SHA-256.
///
/// The truncation length is load-bearing: chunk URIs embed these digests and
/// downstream stores assume their width. 64 bits keeps URIs short at a known
/// collision-risk tradeoff; do not widen without checking URI-length
/// assumptions downstream.
pub fn short_hash(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let hex = format!("{:x}", hasher.finalize());
    hex[..16].to_string()
}

/// Document URI from the strongest available identifier: `source_file`,
/// then `conversion_id`, then a hash of the serialized metadata.
pub fn document_uri(
    base: &str,
    metadata: &SourceMetadata,
) -> Result<String, serde_json::Error> {
    let identifier = match (&metadata.source_file, &metadata.conversion_id) {
        (Some(file), _) => file.clone(),
        (None, Some(id)) => id.clone(),
        (None, None) => serde_json::to_string(metadata)?,
    };
    Ok(join(base, &format!("document/{}", short_hash(&identifier))))
}

/// Chunk URI: source hash, sequence index, and content hash. The index keeps
/// identical-content chunks at different positions distinct.
pub fn chunk_uri(base: &str, source_uri: &str, index: usize, content: &str) -> String {
    join(
        base,
        &format!(
            "chunk/{}_{}_{}",
            short_hash(source_uri),
            index,
            short_hash(content)
        ),
    )
}

pub fn corpus_uri(base: &str, source_uri: &str) -> String {
    join(base, &format!("corpus/{}", short_hash(source_uri)))
}

pub fn community_uri(base: &str, source_uri: &str) -> String {
    join(base, &format!("community/{}", short_hash(source_uri)))
}

/// Join the base namespace and a path, normalizing the trailing slash.
pub(crate) fn join(base: &str, path: &str) -> String {
    if base.ends_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}
