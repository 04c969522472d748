//! Text cleaning and tokenization.
//!
//! The cleaner is deliberately aggressive: profile fields are short,
//! list-like phrases ("AI/ML, Data-Science"), not prose. Everything that is
//! not a lowercase ASCII letter, a digit, whitespace, or a comma becomes a
//! separator, so `"AI/ML"` tokenizes the same as `"ai ml"`. Commas are kept
//! through cleaning because they separate list-like sub-phrases and only
//! disappear at the split stage.

/// Lowercase `input`, replace every character outside `[a-z0-9\s,]` with a
/// space, collapse whitespace runs, and trim.
pub fn clean_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_space = false;
    for ch in input.chars().flat_map(char::to_lowercase) {
        let kept = if ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == ',' {
            Some(ch)
        } else {
            // Whitespace and stripped punctuation both collapse into a
            // single separating space.
            None
        };
        match kept {
            Some(ch) => {
                if pending_space {
                    out.push(' ');
                    pending_space = false;
                }
                out.push(ch);
            }
            None => {
                if !out.is_empty() {
                    pending_space = true;
                }
            }
        }
    }
    out
}

/// Split cleaned text into tokens: commas first (list separators), then
/// whitespace, discarding empty segments. Empty input yields an empty
/// sequence, never an error.
///
/// Token order follows the input for test determinism; the downstream mean
/// is order-invariant either way.
pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned = clean_text(text);
    let mut tokens = Vec::new();
    for segment in cleaned.split(',') {
        for word in segment.split_whitespace() {
            tokens.push(word.to_string());
        }
    }
    tokens
}
