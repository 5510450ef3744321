//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the `FeedbackStore` port from the `core` crate. It handles all interactions
//! with the PostgreSQL database using `sqlx`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use feedback_core::domain::{FeedbackRecord, NewFeedback, Sentiment};
use feedback_core::ports::{FeedbackStore, PortError, PortResult};
use sqlx::{FromRow, PgPool};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `FeedbackStore` port.
#[derive(Clone)]
pub struct DbAdapter {
    pool: PgPool,
}

impl DbAdapter {
    /// Creates a new `DbAdapter`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::Error> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct FeedbackRow {
    id: i64,
    text: String,
    sentiment: String,
    timestamp: DateTime<Utc>,
}

impl FeedbackRow {
    /// Rows carrying a label outside the three accepted values are a hard
    /// error, never a silent default.
    fn to_domain(self) -> PortResult<FeedbackRecord> {
        let sentiment = Sentiment::from_label(&self.sentiment)
            .ok_or_else(|| PortError::InvalidLabel(self.sentiment.clone()))?;
        Ok(FeedbackRecord {
            id: self.id,
            text: self.text,
            sentiment,
            timestamp: self.timestamp,
        })
    }
}

//=========================================================================================
// `FeedbackStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl FeedbackStore for DbAdapter {
    /// Appends one record. The INSERT commits before this returns, so a
    /// caller's own `list_all` always sees its own write; each insert is a
    /// single atomic row, so concurrent submissions cannot interleave.
    async fn append(&self, feedback: NewFeedback) -> PortResult<FeedbackRecord> {
        let row = sqlx::query_as::<_, FeedbackRow>(
            "INSERT INTO feedback (text, sentiment, timestamp) VALUES ($1, $2, $3) \
             RETURNING id, text, sentiment, timestamp",
        )
        .bind(&feedback.text)
        .bind(feedback.sentiment.as_str())
        .bind(feedback.timestamp)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        row.to_domain()
    }

    async fn list_all(&self) -> PortResult<Vec<FeedbackRecord>> {
        let rows = sqlx::query_as::<_, FeedbackRow>(
            "SELECT id, text, sentiment, timestamp FROM feedback ORDER BY timestamp ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        rows.into_iter().map(FeedbackRow::to_domain).collect()
    }
}
