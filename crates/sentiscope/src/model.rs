//! External language-model client.
//!
//! Posts a chat-completion request asking for a structured JSON verdict
//! and maps it onto [`SentimentReport`]. Rate-limit responses are retried
//! with exponential backoff (1s, 2s, 4s), honoring a `retry-after` hint
//! when the server provides one; after the attempts are exhausted the
//! rate limit surfaces as its own error variant so the HTTP layer can
//! answer 429 instead of a generic 500.

use std::time::Duration;

use reqwest::{Client, StatusCode, header::RETRY_AFTER};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use sentiscope_core::config::ModelConfig;
use sentiscope_core::{Language, SentimentReport};

const SYSTEM_PROMPT: &str = "You are a sentiment analysis expert. Analyze the sentiment of the \
     text and respond with a JSON object containing: sentiment (positive, negative, or neutral), \
     score (a number between 0 and 1 representing confidence), and a brief explanation. Also \
     detect the language of the text.";

/// Errors from the model client.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Rate limit still in effect after all retries.
    #[error("model API rate limit exceeded")]
    RateLimited,

    /// Transport-level failure after all retries.
    #[error("model API request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response other than a rate limit.
    #[error("model API error ({status}): {body}")]
    Api {
        /// HTTP status returned by the API.
        status: StatusCode,
        /// Response body, for diagnostics.
        body: String,
    },

    /// The completion content was not the expected JSON shape.
    #[error("model response could not be parsed: {0}")]
    Parse(String),
}

/// Client for the hosted chat-completion API.
#[derive(Debug, Clone)]
pub struct ModelClient {
    http: Client,
    api_key: String,
    base_url: String,
    model: String,
    max_retries: u32,
}

#[derive(Debug, Clone, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

/// The structured verdict the model is asked to produce.
#[derive(Debug, Deserialize)]
struct ModelVerdict {
    sentiment: String,
    score: f64,
    explanation: String,
    language: Option<String>,
}

impl ModelClient {
    /// Build a client from config, reading the API key from the
    /// configured environment variable. Returns `None` (with a warning)
    /// when the key is not set, so callers fall back to the rule-based
    /// engine.
    pub fn from_config(config: &ModelConfig) -> Option<Self> {
        let api_key = match std::env::var(&config.api_key_env) {
            Ok(key) if !key.is_empty() => key,
            _ => {
                warn!(
                    env = %config.api_key_env,
                    "model API key not set, using the rule-based engine"
                );
                return None;
            }
        };

        let http = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .unwrap_or_default();

        Some(Self {
            http,
            api_key,
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            max_retries: config.max_retries.max(1),
        })
    }

    /// Analyze a text via the hosted model.
    #[tracing::instrument(skip_all, fields(text_len = text.len()))]
    pub async fn analyze(&self, text: &str) -> Result<SentimentReport, ModelError> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: text.to_string(),
                },
            ],
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        let response = self.send_with_retry(&request).await?;
        let content = response
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| ModelError::Parse("empty choices in completion".to_string()))?;

        let verdict: ModelVerdict =
            serde_json::from_str(content).map_err(|e| ModelError::Parse(e.to_string()))?;
        verdict_to_report(verdict)
    }

    /// Post the completion request, retrying rate limits and transport
    /// errors with doubling delays up to `max_retries` attempts.
    async fn send_with_retry(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ModelError> {
        let url = format!("{}/chat/completions", self.base_url);
        let mut delay = Duration::from_secs(1);

        for attempt in 1..=self.max_retries {
            let last_attempt = attempt == self.max_retries;

            match self
                .http
                .post(&url)
                .bearer_auth(&self.api_key)
                .json(request)
                .send()
                .await
            {
                Ok(response) if response.status() == StatusCode::TOO_MANY_REQUESTS => {
                    if last_attempt {
                        return Err(ModelError::RateLimited);
                    }
                    let wait = retry_after_hint(&response).unwrap_or(delay);
                    warn!(attempt, wait_ms = wait.as_millis() as u64, "rate limited, backing off");
                    tokio::time::sleep(wait).await;
                }
                Ok(response) if !response.status().is_success() => {
                    let status = response.status();
                    let body = response.text().await.unwrap_or_default();
                    return Err(ModelError::Api { status, body });
                }
                Ok(response) => return Ok(response.json().await?),
                Err(e) => {
                    if last_attempt {
                        return Err(e.into());
                    }
                    warn!(attempt, error = %e, wait_ms = delay.as_millis() as u64, "model request failed, retrying");
                    tokio::time::sleep(delay).await;
                }
            }

            delay *= 2;
        }

        // max_retries is clamped to at least 1, so the loop always returns.
        Err(ModelError::RateLimited)
    }
}

/// Parse a `retry-after` header as whole seconds.
fn retry_after_hint(response: &reqwest::Response) -> Option<Duration> {
    response
        .headers()
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

/// Map the model's free-form verdict onto the report type.
///
/// Unknown or missing language tags default to English, matching the
/// rule-based engine's default. An unknown sentiment label is a parse
/// error, since the caller cannot do anything sensible with it.
fn verdict_to_report(verdict: ModelVerdict) -> Result<SentimentReport, ModelError> {
    let sentiment = verdict
        .sentiment
        .parse()
        .map_err(|e: sentiscope_core::sentiment::UnknownSentiment| {
            ModelError::Parse(e.to_string())
        })?;
    let language = verdict
        .language
        .as_deref()
        .and_then(|l| l.parse().ok())
        .unwrap_or(Language::English);

    Ok(SentimentReport {
        sentiment,
        score: verdict.score.clamp(0.0, 1.0),
        explanation: verdict.explanation,
        language,
    })
}
