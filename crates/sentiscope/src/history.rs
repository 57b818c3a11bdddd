//! SQLite-backed analysis history.
//!
//! One row per analysis, keyed by an opaque user identifier. Reads return
//! the most recent rows first, capped at the configured limit. Callers
//! treat failures here as degraded service, not fatal: a failed save is
//! logged and skipped, a failed read becomes an empty history.

use camino::Utf8Path;
use serde::Serialize;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use thiserror::Error;

use sentiscope_core::SentimentReport;

/// Errors from the history store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database open, write, or read failure.
    #[error("history database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// One persisted analysis record.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct HistoryEntry {
    /// The analyzed text.
    pub text: String,
    /// Assigned sentiment category.
    pub sentiment: String,
    /// Confidence score in [0.0, 1.0].
    pub score: f64,
    /// Detected language.
    pub language: String,
    /// Count-based rationale.
    pub explanation: String,
    /// Unix timestamp (seconds) of the analysis.
    pub created_at: i64,
}

/// Handle to the SQLite history database.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    pool: SqlitePool,
    limit: u32,
}

const SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS sentiment_history (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id     TEXT NOT NULL,
    text        TEXT NOT NULL,
    sentiment   TEXT NOT NULL,
    score       REAL NOT NULL,
    language    TEXT NOT NULL,
    explanation TEXT NOT NULL,
    created_at  INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_sentiment_history_user
    ON sentiment_history (user_id, created_at DESC);
";

impl HistoryStore {
    /// Open (creating if needed) the database at `path` and ensure the
    /// schema exists.
    #[tracing::instrument(skip_all, fields(path = %path))]
    pub async fn open(path: &Utf8Path, limit: u32) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::new()
            .filename(path.as_std_path())
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;
        sqlx::raw_sql(SCHEMA).execute(&pool).await?;
        Ok(Self { pool, limit })
    }

    /// Persist one analysis for a user.
    #[tracing::instrument(skip_all, fields(user_id))]
    pub async fn save(
        &self,
        user_id: &str,
        text: &str,
        report: &SentimentReport,
    ) -> Result<(), StorageError> {
        sqlx::query(
            "INSERT INTO sentiment_history \
             (user_id, text, sentiment, score, language, explanation, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .bind(user_id)
        .bind(text)
        .bind(report.sentiment.as_str())
        .bind(report.score)
        .bind(report.language.as_str())
        .bind(&report.explanation)
        .bind(unix_now())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Fetch a user's most recent analyses, newest first.
    #[tracing::instrument(skip_all, fields(user_id))]
    pub async fn recent(&self, user_id: &str) -> Result<Vec<HistoryEntry>, StorageError> {
        let entries = sqlx::query_as::<_, HistoryEntry>(
            "SELECT text, sentiment, score, language, explanation, created_at \
             FROM sentiment_history \
             WHERE user_id = ?1 \
             ORDER BY created_at DESC, id DESC \
             LIMIT ?2",
        )
        .bind(user_id)
        .bind(self.limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }
}

/// Current unix timestamp in seconds; 0 if the clock is before the epoch.
pub(crate) fn unix_now() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |d| d.as_secs() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use sentiscope_core::engine;

    async fn temp_store(limit: u32) -> (tempfile::TempDir, HistoryStore) {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("history.db")).unwrap();
        let store = HistoryStore::open(&path, limit).await.unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn save_and_fetch_round_trip() {
        let (_guard, store) = temp_store(10).await;
        let report = engine::analyze("good great wonderful");

        store.save("user-1", "good great wonderful", &report).await.unwrap();

        let entries = store.recent("user-1").await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text, "good great wonderful");
        assert_eq!(entries[0].sentiment, "positive");
        assert_eq!(entries[0].language, "english");
        assert!(entries[0].created_at > 0);
    }

    #[tokio::test]
    async fn recent_is_scoped_to_the_user() {
        let (_guard, store) = temp_store(10).await;
        let report = engine::analyze("bad");

        store.save("user-1", "bad", &report).await.unwrap();

        assert_eq!(store.recent("user-1").await.unwrap().len(), 1);
        assert!(store.recent("user-2").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn recent_caps_at_limit_newest_first() {
        let (_guard, store) = temp_store(10).await;

        for i in 0..12 {
            let text = format!("entry {i}");
            let report = engine::analyze(&text);
            store.save("user-1", &text, &report).await.unwrap();
        }

        let entries = store.recent("user-1").await.unwrap();
        assert_eq!(entries.len(), 10);
        // Same-second inserts fall back to id ordering, so the newest
        // insert is still first.
        assert_eq!(entries[0].text, "entry 11");
        assert_eq!(entries[9].text, "entry 2");
    }

    #[tokio::test]
    async fn unknown_user_gets_empty_history() {
        let (_guard, store) = temp_store(10).await;
        assert!(store.recent("nobody").await.unwrap().is_empty());
    }
}
