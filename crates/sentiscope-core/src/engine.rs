//! The combined analysis entry point.
//!
//! Composes lexicon scoring ([`crate::sentiment::score_tokens`]) and
//! language identification ([`crate::language::detect_language`]) into a
//! single infallible call.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::language::{self, Language};
use crate::sentiment::{self, Sentiment};
use crate::text;

/// Result of analyzing a text. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SentimentReport {
    /// Assigned sentiment category.
    pub sentiment: Sentiment,
    /// Confidence score in [0.0, 1.0].
    pub score: f64,
    /// Human-readable, count-based rationale.
    pub explanation: String,
    /// Detected probable language.
    pub language: Language,
}

/// Analyze a text: sentiment score plus language detection.
///
/// Never fails. Empty or degenerate input produces a well-formed neutral
/// report. Deterministic and side-effect-free; any number of calls may run
/// concurrently.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn analyze(text: &str) -> SentimentReport {
    let tokens = text::tokenize(text);
    let score = sentiment::score_tokens(&tokens);
    // Language detection looks at the original text, not the cleaned tokens.
    let language = language::detect_language(text);

    tracing::debug!(
        sentiment = score.sentiment.as_str(),
        score = score.score,
        positive = score.positive_count,
        negative = score.negative_count,
        language = language.as_str(),
        "analysis complete"
    );

    SentimentReport {
        sentiment: score.sentiment,
        score: score.score,
        explanation: score.explanation,
        language,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_is_neutral_and_english() {
        let report = analyze("");
        assert_eq!(report.sentiment, Sentiment::Neutral);
        assert!((report.score - 0.5).abs() < f64::EPSILON);
        assert!(report.explanation.contains("too short"));
        assert_eq!(report.language, Language::English);
    }

    #[test]
    fn whitespace_only_behaves_like_empty() {
        let report = analyze("   \n\t  ");
        assert_eq!(report.sentiment, Sentiment::Neutral);
        assert!(report.explanation.contains("too short"));
    }

    #[test]
    fn mostly_positive_text() {
        let report = analyze("good good good bad");
        assert_eq!(report.sentiment, Sentiment::Positive);
        assert!((report.score - 0.75).abs() < f64::EPSILON);
        assert!(report.explanation.contains("3 positive"));
        assert!(report.explanation.contains("1 negative"));
    }

    #[test]
    fn score_always_in_unit_interval() {
        let inputs = [
            "",
            "good",
            "terrible",
            "good bad good bad",
            "não muito obrigado",
            "!!! --- ###",
            "a b c d e f g",
        ];
        for input in inputs {
            let report = analyze(input);
            assert!((0.0..=1.0).contains(&report.score), "input {input:?}");
        }
    }

    #[test]
    fn analyze_is_idempotent() {
        let text = "muito obrigado, este foi um dia ótimo, não tenho reclamações";
        assert_eq!(analyze(text), analyze(text));
    }

    #[test]
    fn portuguese_text_detected_and_scored() {
        let report = analyze("muito obrigado você, não foi ruim");
        assert_eq!(report.language, Language::Portuguese);
        assert_eq!(report.sentiment, Sentiment::Negative);
    }

    #[test]
    fn serializes_with_lowercase_tags() {
        let report = analyze("good great wonderful");
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["sentiment"], "positive");
        assert_eq!(json["language"], "english");
        assert!(json["score"].as_f64().is_some());
    }
}
