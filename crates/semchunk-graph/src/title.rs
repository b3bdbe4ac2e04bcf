//! Chunk title extraction heuristics.

/// Derive a title from the chunk's first non-empty line.
///
/// A markdown header contributes its text; failing that, a short line that
/// does not end like a sentence is used verbatim. Returns `None` when
/// neither applies, leaving the caller to fall back to an index-based name.
pub fn extract_title(content: &str) -> Option<String> {
    let line = content.lines().find(|l| !l.trim().is_empty())?.trim();

    if let Some(text) = header_text(line) {
        return Some(text.to_string());
    }
    if line.chars().count() < 100 && !line.ends_with(['.', '!', '?']) {
        return Some(line.to_string());
    }
    None
}

fn header_text(line: &str) -> Option<&str> {
    if !line.starts_with('#') {
        return None;
    }
    let hashes = line.chars().take_while(|c| *c == '#').count();
    if hashes > 6 {
        return None;
    }
    let rest = &line[hashes..];
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let text = rest.trim();
    (!text.is_empty()).then_some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_title() {
        assert_eq!(
            extract_title("# Introduction\n\nBody text."),
            Some("Introduction".to_string())
        );
        assert_eq!(
            extract_title("### Deep Section\ncontent"),
            Some("Deep Section".to_string())
        );
    }

    #[test]
    fn test_header_after_blank_lines() {
        assert_eq!(
            extract_title("\n\n## Found It\nbody"),
            Some("Found It".to_string())
        );
    }

    #[test]
    fn test_short_line_used_verbatim() {
        assert_eq!(
            extract_title("Release notes for v2\n\nDetails follow."),
            Some("Release notes for v2".to_string())
        );
    }

    #[test]
    fn test_sentence_like_line_rejected() {
        assert_eq!(extract_title("This is a full sentence.\nMore text."), None);
        assert_eq!(extract_title("Really? More text follows"), None);
    }

    #[test]
    fn test_long_line_rejected() {
        let long = "word ".repeat(30);
        assert_eq!(extract_title(&long), None);
    }

    #[test]
    fn test_empty_content() {
        assert_eq!(extract_title(""), None);
        assert_eq!(extract_title("   \n  \n"), None);
    }

    #[test]
    fn test_seven_hashes_not_a_header() {
        // too deep for a header, but short and unterminated, so the verbatim
        // heuristic picks it up
        assert_eq!(
            extract_title("####### seven"),
            Some("####### seven".to_string())
        );
    }

    #[test]
    fn test_hash_without_space_not_a_header() {
        assert_eq!(
            extract_title("#hashtag text"),
            Some("#hashtag text".to_string())
        );
    }
}
