use anyhow::Result;
use sqlx::Row;

use crate::domain::models::user::User;
use crate::storage::connection::DbConnection;

/// Repository for teacher accounts
#[derive(Clone)]
pub struct UserRepository {
    db: DbConnection,
}

impl UserRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Insert a new user and return its generated ID
    pub async fn store_user(&self, username: &str, password_hash: &str) -> Result<i64> {
        let result = sqlx::query("INSERT INTO users (username, password_hash) VALUES (?, ?)")
            .bind(username)
            .bind(password_hash)
            .execute(self.db.pool())
            .await?;
        Ok(result.last_insert_rowid())
    }

    pub async fn get_user(&self, user_id: i64) -> Result<Option<User>> {
        let row = sqlx::query("SELECT id, username, password_hash FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_optional(self.db.pool())
            .await?;

        Ok(row.map(|r| User {
            id: r.get("id"),
            username: r.get("username"),
            password_hash: r.get("password_hash"),
        }))
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let row = sqlx::query("SELECT id, username, password_hash FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(self.db.pool())
            .await?;

        Ok(row.map(|r| User {
            id: r.get("id"),
            username: r.get("username"),
            password_hash: r.get("password_hash"),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_and_find_user() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let repo = UserRepository::new(db);

        let id = repo.store_user("mrs_okafor", "hash").await.expect("Failed to store user");

        let by_name = repo.find_by_username("mrs_okafor").await.expect("Query failed");
        assert_eq!(by_name.as_ref().map(|u| u.id), Some(id));

        let by_id = repo.get_user(id).await.expect("Query failed").expect("User missing");
        assert_eq!(by_id.username, "mrs_okafor");
        assert_eq!(by_id.password_hash, "hash");

        assert!(repo.find_by_username("nobody").await.expect("Query failed").is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let repo = UserRepository::new(db);

        repo.store_user("teacher", "a").await.expect("Failed to store user");
        assert!(repo.store_user("teacher", "b").await.is_err());
    }
}
