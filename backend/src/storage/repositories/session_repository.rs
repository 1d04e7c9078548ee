use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::Row;

use crate::domain::models::user::Session;
use crate::storage::connection::DbConnection;

/// Repository for login sessions keyed by an opaque session key
#[derive(Clone)]
pub struct SessionRepository {
    db: DbConnection,
}

impl SessionRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    pub async fn store_session(&self, session: &Session) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO sessions (session_key, user_id, created_at, expires_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&session.key)
        .bind(session.user_id)
        .bind(session.created_at.to_rfc3339())
        .bind(session.expires_at.to_rfc3339())
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    pub async fn get_session(&self, key: &str) -> Result<Option<Session>> {
        let row = sqlx::query(
            "SELECT session_key, user_id, created_at, expires_at FROM sessions WHERE session_key = ?",
        )
        .bind(key)
        .fetch_optional(self.db.pool())
        .await?;

        match row {
            Some(r) => {
                let created_at: String = r.get("created_at");
                let expires_at: String = r.get("expires_at");
                Ok(Some(Session {
                    key: r.get("session_key"),
                    user_id: r.get("user_id"),
                    created_at: parse_timestamp(&created_at)?,
                    expires_at: parse_timestamp(&expires_at)?,
                }))
            }
            None => Ok(None),
        }
    }

    /// Returns true if a session was removed
    pub async fn delete_session(&self, key: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM sessions WHERE session_key = ?")
            .bind(key)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Drop every session that expired before `now`; returns how many went.
    /// Timestamps are UTC RFC 3339 strings, which sort chronologically.
    pub async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at < ?")
            .bind(now.to_rfc3339())
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected())
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(raw)
        .with_context(|| format!("Corrupt session timestamp: {}", raw))?
        .with_timezone(&Utc))
}
