//! Utilities for cutting page body text down to a leading snippet.

/// Default number of characters of body text considered during extraction.
pub const DEFAULT_BODY_CHARS: usize = 500;

/// Truncates `text` to at most `max_chars` characters, always cutting on a
/// `char` boundary. Installment markers near the top of a page are all that
/// matter, and the further into a page the more likely an unrelated number
/// turns up.
///
/// # Examples
///
/// ```rust
/// use talenest_extract::safe_text_truncate;
/// assert_eq!(safe_text_truncate("Chapter 12: The Return", 10), "Chapter 12");
/// assert_eq!(safe_text_truncate("短い", 10), "短い");
/// ```
pub fn safe_text_truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_offset, _)) => &text[..byte_offset],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_truncation_needed() {
        assert_eq!(safe_text_truncate("Episode 4", 100), "Episode 4");
    }

    #[test]
    fn exact_length() {
        assert_eq!(safe_text_truncate("Episode 4", 9), "Episode 4");
    }

    #[test]
    fn truncates_on_char_boundary() {
        // Each of these is three bytes in UTF-8.
        let text = "第一話第二話";
        assert_eq!(safe_text_truncate(text, 3), "第一話");
    }

    #[test]
    fn empty_text() {
        assert_eq!(safe_text_truncate("", 100), "");
    }

    #[test]
    fn zero_max_chars() {
        assert!(safe_text_truncate("Chapter 1", 0).is_empty());
    }
}
