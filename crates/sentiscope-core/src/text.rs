//! Tokenization helpers for the scoring engine.

/// Punctuation characters stripped from tokens before lexicon lookup.
///
/// Stripped wherever they occur in a token, not just at the edges, so
/// `"good!"` and `"g-o-o-d"` both clean to `"good"`.
const STRIP_CHARS: &[char] = &[
    '.', ',', '/', '#', '!', '$', '%', '^', '&', '*', ';', ':', '{', '}', '=', '-', '_', '`', '~',
    '(', ')',
];

/// Lowercase the text and split it on runs of whitespace, cleaning each
/// token of punctuation.
///
/// Cleaning can leave a token empty (e.g. `"--"`); empty tokens are kept
/// so the returned length still reflects the whitespace-separated word
/// count, which the scorer uses for its "too short" check.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(clean_token)
        .collect()
}

/// Strip the fixed punctuation set from anywhere in a token.
fn clean_token(token: &str) -> String {
    token.chars().filter(|c| !STRIP_CHARS.contains(c)).collect()
}
