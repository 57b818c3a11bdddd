//! Lexicon-based sentiment scoring.
//!
//! Pure function over the static lexicon: counts positive and negative
//! word matches, derives a confidence score in [0.1, 0.9] (0.5 when no
//! sentiment words are present), and assigns a category with a
//! human-readable explanation.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::lexicon::{NEGATIVE_WORDS, POSITIVE_WORDS};

/// Sentiment category assigned to a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    /// Score above 0.6.
    Positive,
    /// Score in [0.4, 0.6], or no sentiment words found.
    Neutral,
    /// Score below 0.4.
    Negative,
}

impl Sentiment {
    /// Returns the category as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Sentiment {
    type Err = UnknownSentiment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "positive" => Ok(Self::Positive),
            "neutral" => Ok(Self::Neutral),
            "negative" => Ok(Self::Negative),
            other => Err(UnknownSentiment(other.to_string())),
        }
    }
}

/// Error returned when parsing an unrecognized sentiment label.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown sentiment label: {0:?}")]
pub struct UnknownSentiment(pub String);

/// Outcome of scoring a token sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct SentimentScore {
    /// Assigned category.
    pub sentiment: Sentiment,
    /// Confidence in [0.0, 1.0]; in practice 0.5 or within [0.1, 0.9].
    pub score: f64,
    /// Count-based rationale for the category.
    pub explanation: String,
    /// Number of positive lexicon matches.
    pub positive_count: usize,
    /// Number of negative lexicon matches.
    pub negative_count: usize,
}

/// Score a sequence of cleaned tokens against the sentiment lexicon.
///
/// Each token counts at most once per list; a token present in both lists
/// would count toward both. With no sentiment words at all the result is
/// neutral at 0.5, with the explanation depending on whether the text has
/// at least 3 tokens. Otherwise the raw ratio `pos / (pos + neg)` is
/// clamped into [0.1, 0.9] so the score never reports full certainty.
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn score_tokens(tokens: &[String]) -> SentimentScore {
    let mut positive_count = 0usize;
    let mut negative_count = 0usize;

    for token in tokens {
        if POSITIVE_WORDS.contains(token.as_str()) {
            positive_count += 1;
        }
        if NEGATIVE_WORDS.contains(token.as_str()) {
            negative_count += 1;
        }
    }

    let total = positive_count + negative_count;
    if total == 0 {
        let explanation = if tokens.len() < 3 {
            "The text is too short to analyze sentiment accurately.".to_string()
        } else {
            "The text appears to be neutral.".to_string()
        };
        return SentimentScore {
            sentiment: Sentiment::Neutral,
            score: 0.5,
            explanation,
            positive_count,
            negative_count,
        };
    }

    let score = (positive_count as f64 / total as f64).clamp(0.1, 0.9);

    let (sentiment, explanation) = if score > 0.6 {
        (
            Sentiment::Positive,
            format!(
                "The text contains {positive_count} positive words and {negative_count} negative \
                 words, indicating an overall positive sentiment."
            ),
        )
    } else if score < 0.4 {
        (
            Sentiment::Negative,
            format!(
                "The text contains {positive_count} positive words and {negative_count} negative \
                 words, indicating an overall negative sentiment."
            ),
        )
    } else {
        (
            Sentiment::Neutral,
            format!(
                "The text contains a balanced mix of {positive_count} positive words and \
                 {negative_count} negative words."
            ),
        )
    };

    SentimentScore {
        sentiment,
        score,
        explanation,
        positive_count,
        negative_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::tokenize;

    #[test]
    fn counts_positive_and_negative() {
        let score = score_tokens(&tokenize("good good good bad"));
        assert_eq!(score.positive_count, 3);
        assert_eq!(score.negative_count, 1);
        assert_eq!(score.sentiment, Sentiment::Positive);
        assert!((score.score - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn all_positive_clamps_to_upper_bound() {
        let score = score_tokens(&tokenize("good great excellent"));
        assert!((score.score - 0.9).abs() < f64::EPSILON);
        assert_eq!(score.sentiment, Sentiment::Positive);
    }

    #[test]
    fn single_negative_clamps_to_lower_bound() {
        let score = score_tokens(&tokenize("terrible"));
        assert!((score.score - 0.1).abs() < f64::EPSILON);
        assert_eq!(score.sentiment, Sentiment::Negative);
    }

    #[test]
    fn one_in_ten_sits_exactly_on_the_clamp_boundary() {
        let score = score_tokens(&tokenize("bad bad bad bad bad bad bad bad bad good"));
        assert!((score.score - 0.1).abs() < f64::EPSILON);
        assert_eq!(score.sentiment, Sentiment::Negative);
    }

    #[test]
    fn balanced_mix_is_neutral() {
        let score = score_tokens(&tokenize("good bad"));
        assert!((score.score - 0.5).abs() < f64::EPSILON);
        assert_eq!(score.sentiment, Sentiment::Neutral);
        assert!(score.explanation.contains("balanced mix"));
    }

    #[test]
    fn exact_threshold_scores_stay_neutral() {
        // 2/5 = 0.4 and 3/5 = 0.6 both land in the neutral band.
        let low = score_tokens(&tokenize("good good bad bad bad"));
        assert_eq!(low.sentiment, Sentiment::Neutral);
        let high = score_tokens(&tokenize("good good good bad bad"));
        assert_eq!(high.sentiment, Sentiment::Neutral);
    }

    #[test]
    fn no_sentiment_words_short_text() {
        let score = score_tokens(&tokenize("hello there"));
        assert_eq!(score.sentiment, Sentiment::Neutral);
        assert!((score.score - 0.5).abs() < f64::EPSILON);
        assert!(score.explanation.contains("too short"));
    }

    #[test]
    fn no_sentiment_words_long_text() {
        let score = score_tokens(&tokenize("the weather report mentioned rain today"));
        assert_eq!(score.sentiment, Sentiment::Neutral);
        assert!(score.explanation.contains("neutral"));
        assert!(!score.explanation.contains("too short"));
    }

    #[test]
    fn empty_input_is_too_short() {
        let score = score_tokens(&[]);
        assert_eq!(score.sentiment, Sentiment::Neutral);
        assert!(score.explanation.contains("too short"));
    }

    #[test]
    fn punctuated_tokens_match_after_cleaning() {
        let score = score_tokens(&tokenize("good! bad."));
        assert_eq!(score.positive_count, 1);
        assert_eq!(score.negative_count, 1);
    }

    #[test]
    fn portuguese_lexicon_entries_count() {
        let score = score_tokens(&tokenize("ótimo maravilhoso péssimo"));
        assert_eq!(score.positive_count, 2);
        assert_eq!(score.negative_count, 1);
    }

    #[test]
    fn sentiment_round_trips_through_str() {
        for s in [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative] {
            assert_eq!(s.as_str().parse::<Sentiment>().unwrap(), s);
        }
        assert!("cheerful".parse::<Sentiment>().is_err());
    }
}
