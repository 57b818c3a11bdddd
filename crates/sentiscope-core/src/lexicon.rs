//! Static sentiment lexicon and language markers.
//!
//! The positive/negative word sets are multilingual (English, Portuguese,
//! and Spanish entries mixed together, no per-language separation). The
//! marker lists hold short function words whose presence is weak evidence
//! for a particular language.
//!
//! All tables are process-wide constants, initialized once and never
//! mutated. Matching against them is case-insensitive; callers are
//! expected to lowercase before lookup.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Words counted as positive sentiment evidence.
pub static POSITIVE_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "good",
        "great",
        "excellent",
        "amazing",
        "wonderful",
        "fantastic",
        "terrific",
        "outstanding",
        "superb",
        "brilliant",
        "awesome",
        "happy",
        "joy",
        "love",
        "like",
        "beautiful",
        "best",
        "better",
        "perfect",
        "nice",
        "pleasant",
        "delightful",
        "bom",
        "ótimo",
        "excelente",
        "maravilhoso",
        "fantástico",
        "feliz",
        "alegria",
        "amor",
        "bonito",
        "perfeito",
        "agradável",
        "delicioso",
        "bueno",
        "genial",
        "maravilloso",
    ]
    .into_iter()
    .collect()
});

/// Words counted as negative sentiment evidence.
pub static NEGATIVE_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "bad",
        "terrible",
        "horrible",
        "awful",
        "poor",
        "disappointing",
        "sad",
        "hate",
        "dislike",
        "worst",
        "failure",
        "negative",
        "ugly",
        "wrong",
        "annoying",
        "angry",
        "ruim",
        "terrível",
        "horrível",
        "péssimo",
        "decepcionante",
        "triste",
        "ódio",
        "feio",
        "errado",
        "irritante",
        "raiva",
        "malo",
    ]
    .into_iter()
    .collect()
});

/// Portuguese marker words, matched by substring containment.
pub const PORTUGUESE_MARKERS: &[&str] = &[
    "não", "sim", "muito", "obrigado", "como", "está", "bem", "eu", "você", "para",
];

/// Spanish marker words, matched by substring containment.
pub const SPANISH_MARKERS: &[&str] = &[
    "no", "sí", "muy", "gracias", "cómo", "está", "bien", "yo", "tú", "para",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexicon_entries_are_lowercase() {
        for word in POSITIVE_WORDS.iter().chain(NEGATIVE_WORDS.iter()) {
            assert_eq!(*word, word.to_lowercase(), "lexicon entry not lowercase");
        }
    }

    #[test]
    fn no_word_appears_in_both_lists() {
        let overlap: Vec<_> = POSITIVE_WORDS.intersection(&NEGATIVE_WORDS).collect();
        assert!(overlap.is_empty(), "overlapping entries: {overlap:?}");
    }

    #[test]
    fn marker_lists_have_same_length() {
        assert_eq!(PORTUGUESE_MARKERS.len(), SPANISH_MARKERS.len());
    }
}
