//! Domain models for teachers and their sessions.
use chrono::{DateTime, Utc};

/// A stored teacher account
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub username: String,
    /// argon2 PHC string
    pub password_hash: String,
}

/// The authenticated teacher acting on a request.
///
/// Every roster and attendance operation takes one explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: i64,
    pub username: String,
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub key: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}
