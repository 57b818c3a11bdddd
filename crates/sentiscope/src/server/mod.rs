//! The HTTP service.
//!
//! A thin presentation layer over the core engine: handlers validate the
//! request, pick the analyzer (hosted model when configured, rule-based
//! engine otherwise), and hand results to the history store. Persistence
//! failures degrade gracefully; the analysis is still returned.

pub mod auth;
pub mod error;

use std::collections::HashMap;
use std::sync::Arc;

use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::{Json, Router, extract::State};
use serde::Serialize;
use tracing::warn;

use sentiscope_core::{Config, SentimentReport, engine};

use crate::history::{HistoryEntry, HistoryStore, unix_now};
use crate::model::ModelClient;

pub use error::ApiError;

/// Shared state for all HTTP handlers.
pub struct AppState {
    /// Bearer token → user id map.
    pub tokens: HashMap<String, String>,
    /// History store; `None` disables persistence.
    pub history: Option<HistoryStore>,
    /// Hosted model client; `None` means the rule-based engine handles
    /// every request.
    pub model: Option<ModelClient>,
}

impl AppState {
    /// Build state from config: open the history database (disabled with
    /// a warning on failure) and set up the model client when configured.
    pub async fn from_config(config: &Config) -> Arc<Self> {
        let history = match &config.database_path {
            Some(path) => match HistoryStore::open(path, config.history_limit).await {
                Ok(store) => Some(store),
                Err(e) => {
                    warn!(error = %e, "history persistence disabled");
                    None
                }
            },
            None => None,
        };

        let model = config.model.as_ref().and_then(ModelClient::from_config);

        Arc::new(Self {
            tokens: config.auth_tokens.clone().unwrap_or_default(),
            history,
            model,
        })
    }
}

/// Build the service router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/sentiment", post(analyze_text))
        .route("/api/history", get(fetch_history))
        .with_state(state)
}

/// Response for `POST /api/sentiment`.
#[derive(Debug, Serialize)]
struct AnalyzeResponse {
    text: String,
    #[serde(flatten)]
    report: SentimentReport,
    timestamp: i64,
}

/// `POST /api/sentiment`: analyze a text.
///
/// Body: `{ "text": string }`. A missing or non-string `text` is rejected
/// with 400 before the engine runs. Authenticated callers get the result
/// persisted to their history.
#[tracing::instrument(skip_all)]
async fn analyze_text(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let text = body
        .get("text")
        .and_then(serde_json::Value::as_str)
        .ok_or(ApiError::MissingText)?;

    let user = auth::authenticate(&headers, &state.tokens);

    let report = match &state.model {
        Some(client) => client.analyze(text).await?,
        None => engine::analyze(text),
    };

    if let (Some(user), Some(store)) = (&user, &state.history)
        && let Err(e) = store.save(user, text, &report).await
    {
        // The analysis is still returned; only the history write is lost.
        warn!(error = %e, "failed to save analysis to history");
    }

    Ok(Json(AnalyzeResponse {
        text: text.to_string(),
        report,
        timestamp: unix_now(),
    }))
}

/// `GET /api/history`: the caller's 10 most recent analyses, newest
/// first. Requires authentication; storage failures degrade to an empty
/// list.
#[tracing::instrument(skip_all)]
async fn fetch_history(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<HistoryEntry>>, ApiError> {
    let user = auth::authenticate(&headers, &state.tokens).ok_or(ApiError::Unauthorized)?;

    let entries = match &state.history {
        Some(store) => store.recent(&user).await.unwrap_or_else(|e| {
            warn!(error = %e, "failed to fetch history");
            Vec::new()
        }),
        None => Vec::new(),
    };

    Ok(Json(entries))
}

/// `GET /health`: liveness probe.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
