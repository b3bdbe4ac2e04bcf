//! Default strategy selection from content shape and options.

use semchunk_core::{ChunkInput, ChunkOptions, Strategy};

use crate::boundary;

/// Pick a strategy when the caller has not pinned one.
///
/// Precedence chain, first match wins:
/// 1. token counter injected and `max_tokens` set → token-aware
/// 2. record input, or structured text (when structure is preserved) →
///    hierarchical
/// 3. semantic boundaries enabled on plain text → semantic
/// 4. balanced chunks enabled → adaptive
/// 5. fixed
pub fn select(input: &ChunkInput, options: &ChunkOptions, has_token_counter: bool) -> Strategy {
    if has_token_counter && options.max_tokens.is_some() {
        return Strategy::TokenAware;
    }
    match input {
        ChunkInput::Records(_) => Strategy::Hierarchical,
        ChunkInput::Text(text) => {
            if options.preserve_structure && has_structural_markers(text) {
                Strategy::Hierarchical
            } else if options.semantic_boundaries {
                Strategy::Semantic
            } else if options.balance_chunks {
                Strategy::Adaptive
            } else {
                Strategy::Fixed
            }
        }
    }
}

/// Headers, list markers, fenced code, or numbered lists.
pub fn has_structural_markers(text: &str) -> bool {
    text.lines().any(|line| {
        let stripped = line.trim_end_matches('\r');
        stripped.trim_start().starts_with("```")
            || boundary::match_header(stripped).is_some()
            || boundary::match_list_marker(stripped).is_some()
    })
}
