//! Heuristic Markdown detection.

/// Markers that commonly appear in Markdown but rarely in plain prose.
const MARKDOWN_MARKERS: &[&str] = &[
    "# ", "## ", "### ", "**", "__", "*", "- ", "1. ", "```", "[", "![", "> ",
];

/// Guess whether `content` is Markdown rather than plain text.
///
/// Used by the admin editor to decide whether to show the rendered preview.
///
/// # Examples
///
/// ```
/// use vt_markdown::looks_like_markdown;
///
/// assert!(looks_like_markdown("## Subtitle"));
/// assert!(!looks_like_markdown(""));
/// ```
#[must_use]
pub fn looks_like_markdown(content: &str) -> bool {
    !content.is_empty() && MARKDOWN_MARKERS.iter().any(|m| content.contains(m))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_headers() {
        assert!(looks_like_markdown("# Titulo"));
        assert!(looks_like_markdown("### Secao"));
    }

    #[test]
    fn test_detect_emphasis() {
        assert!(looks_like_markdown("Texto **negrito**"));
        assert!(looks_like_markdown("Texto __negrito__"));
    }

    #[test]
    fn test_detect_lists() {
        assert!(looks_like_markdown("- Item"));
        assert!(looks_like_markdown("1. Item"));
    }

    #[test]
    fn test_detect_code_links_images_quotes() {
        assert!(looks_like_markdown("```code```"));
        assert!(looks_like_markdown("[texto](url)"));
        assert!(looks_like_markdown("![alt](url)"));
        assert!(looks_like_markdown("> citacao"));
    }

    #[test]
    fn test_plain_text_not_markdown() {
        assert!(!looks_like_markdown("Texto simples sem formatacao especial"));
    }

    #[test]
    fn test_empty_not_markdown() {
        assert!(!looks_like_markdown(""));
    }
}
