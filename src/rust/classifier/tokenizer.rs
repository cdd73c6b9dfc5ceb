//! Text normalisation shared by training, inference and stop-word loading.

/// Splits a raw line into normalised tokens.
///
/// Punctuation is removed, the text is lowercased and trimmed, and the rest is
/// split on runs of whitespace. Token order is preserved. Empty input yields an
/// empty vector.
///
/// # Example
/// ```
/// use spamnb::extract_words;
///
/// assert_eq!(extract_words("  Free MONEY, now!! "), vec!["free", "money", "now"]);
/// assert!(extract_words("").is_empty());
/// ```
pub fn extract_words(text: &str) -> Vec<String> {
    strip_punctuation(text)
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Normalises a single stop-word entry the same way tokens are normalised.
///
/// Returns `None` when nothing is left after normalisation.
pub(crate) fn normalize_word(word: &str) -> Option<String> {
    let word = strip_punctuation(word.trim()).to_lowercase();
    let word = word.trim();
    if word.is_empty() {
        None
    } else {
        Some(word.to_string())
    }
}

fn strip_punctuation(text: &str) -> String {
    text.chars().filter(|c| !c.is_ascii_punctuation()).collect()
}
