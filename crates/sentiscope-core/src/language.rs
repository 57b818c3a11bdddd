//! Heuristic language identification.
//!
//! Counts Portuguese and Spanish marker words by substring containment in
//! the lowercased text. A marker inside a longer word still counts; that
//! crudeness is deliberate and kept because changing it changes observable
//! results. English is the default for ties and weak evidence.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::lexicon::{PORTUGUESE_MARKERS, SPANISH_MARKERS};

/// Detected language of a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Default when neither marker set wins.
    English,
    /// More than two Portuguese markers, strictly ahead of Spanish.
    Portuguese,
    /// More than two Spanish markers, strictly ahead of Portuguese.
    Spanish,
}

impl Language {
    /// Returns the language as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::English => "english",
            Self::Portuguese => "portuguese",
            Self::Spanish => "spanish",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "english" => Ok(Self::English),
            "portuguese" => Ok(Self::Portuguese),
            "spanish" => Ok(Self::Spanish),
            other => Err(UnknownLanguage(other.to_string())),
        }
    }
}

/// Error returned when parsing an unrecognized language tag.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown language tag: {0:?}")]
pub struct UnknownLanguage(pub String);

/// Count how many markers appear anywhere in `haystack`.
///
/// Each marker contributes at most 1 regardless of how often it occurs.
fn marker_hits(haystack: &str, markers: &[&str]) -> usize {
    markers.iter().filter(|m| haystack.contains(*m)).count()
}

/// Detect the probable language of a text.
///
/// Runs against the original text (lowercased), not the cleaned tokens
/// used for sentiment scoring.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn detect_language(text: &str) -> Language {
    let lower = text.to_lowercase();

    let portuguese = marker_hits(&lower, PORTUGUESE_MARKERS);
    let spanish = marker_hits(&lower, SPANISH_MARKERS);

    if portuguese > 2 && portuguese > spanish {
        Language::Portuguese
    } else if spanish > 2 && spanish > portuguese {
        Language::Spanish
    } else {
        Language::English
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_english_defaults() {
        assert_eq!(detect_language("The weather is lovely today"), Language::English);
    }

    #[test]
    fn empty_text_defaults_to_english() {
        assert_eq!(detect_language(""), Language::English);
    }

    #[test]
    fn three_portuguese_markers_win() {
        // "não", "muito", "obrigado" plus "você": clearly Portuguese.
        assert_eq!(
            detect_language("não muito obrigado você"),
            Language::Portuguese
        );
    }

    #[test]
    fn three_spanish_markers_win() {
        // "muy", "gracias", "bien"; "no" rides along inside nothing else.
        assert_eq!(detect_language("muy bien gracias señor"), Language::Spanish);
    }

    #[test]
    fn two_markers_is_below_threshold() {
        // Two Portuguese markers only; count must exceed 2 to win.
        assert_eq!(detect_language("obrigado você"), Language::English);
    }

    #[test]
    fn tie_defaults_to_english() {
        // "está" and "para" appear in both marker lists, so both sides
        // score 2 and neither is strictly ahead.
        assert_eq!(detect_language("está para"), Language::English);
    }

    #[test]
    fn markers_match_inside_longer_words() {
        // "como" is embedded in "comodidade"; substring matching counts it.
        let lower = "comodidade".to_lowercase();
        assert_eq!(marker_hits(&lower, PORTUGUESE_MARKERS), 1);
    }

    #[test]
    fn repeated_marker_counts_once() {
        let lower = "muito muito muito";
        assert_eq!(marker_hits(lower, PORTUGUESE_MARKERS), 1);
    }

    #[test]
    fn language_round_trips_through_str() {
        for l in [Language::English, Language::Portuguese, Language::Spanish] {
            assert_eq!(l.as_str().parse::<Language>().unwrap(), l);
        }
        assert!("klingon".parse::<Language>().is_err());
    }
}
