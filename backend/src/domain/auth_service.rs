use anyhow::anyhow;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::{Duration, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::commands::auth::LoginCommand;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::models::user::{Principal, Session, User};
use crate::storage::{DbConnection, SessionRepository, UserRepository};

/// Service for teacher accounts and session-based authentication
#[derive(Clone)]
pub struct AuthService {
    user_repository: UserRepository,
    session_repository: SessionRepository,
    session_ttl: Duration,
}

impl AuthService {
    pub fn new(db: DbConnection, session_ttl: Duration) -> Self {
        Self {
            user_repository: UserRepository::new(db.clone()),
            session_repository: SessionRepository::new(db),
            session_ttl,
        }
    }

    /// Create a teacher account with an argon2-hashed password
    pub async fn register_teacher(&self, username: &str, password: &str) -> DomainResult<User> {
        let username = username.trim();
        info!("Registering teacher: {}", username);

        if username.is_empty() || username.chars().count() > 150 {
            return Err(DomainError::validation("Username must be between 1 and 150 characters"));
        }
        if password.is_empty() {
            return Err(DomainError::validation("Password cannot be empty"));
        }
        if self.user_repository.find_by_username(username).await?.is_some() {
            return Err(DomainError::validation(format!("Username '{}' is already taken", username)));
        }

        let password_hash = hash_password(password)?;
        let id = self.user_repository.store_user(username, &password_hash).await?;

        Ok(User {
            id,
            username: username.to_string(),
            password_hash,
        })
    }

    /// Register the teacher unless the username already exists
    pub async fn ensure_teacher(&self, username: &str, password: &str) -> DomainResult<User> {
        if let Some(existing) = self.user_repository.find_by_username(username.trim()).await? {
            info!("Teacher {} already exists", existing.username);
            return Ok(existing);
        }
        self.register_teacher(username, password).await
    }

    /// Verify credentials and open a new session
    pub async fn login(&self, command: LoginCommand) -> DomainResult<(User, Session)> {
        info!("Login attempt for user: {}", command.username);

        let user = match self.user_repository.find_by_username(command.username.trim()).await? {
            Some(user) => user,
            None => {
                warn!("Login failed, unknown user: {}", command.username);
                return Err(DomainError::Authentication);
            }
        };

        if !verify_password(&command.password, &user.password_hash)? {
            warn!("Login failed, bad password for user: {}", user.username);
            return Err(DomainError::Authentication);
        }

        let now = Utc::now();
        let purged = self.session_repository.delete_expired(now).await?;
        if purged > 0 {
            info!("Purged {} expired sessions", purged);
        }

        let session = Session {
            key: Uuid::new_v4().simple().to_string(),
            user_id: user.id,
            created_at: now,
            expires_at: now + self.session_ttl,
        };
        self.session_repository.store_session(&session).await?;

        info!("User {} authenticated", user.username);
        Ok((user, session))
    }

    /// Drop a session. Unknown keys are not an error.
    pub async fn logout(&self, session_key: &str) -> DomainResult<()> {
        if self.session_repository.delete_session(session_key).await? {
            info!("Session closed");
        }
        Ok(())
    }

    /// Resolve a session key to the acting teacher
    pub async fn authenticate(&self, session_key: &str) -> DomainResult<Principal> {
        let session = self
            .session_repository
            .get_session(session_key)
            .await?
            .ok_or(DomainError::Authentication)?;

        if session.is_expired(Utc::now()) {
            warn!("Rejected expired session for user {}", session.user_id);
            self.session_repository.delete_session(session_key).await?;
            return Err(DomainError::Authentication);
        }

        let user = self
            .user_repository
            .get_user(session.user_id)
            .await?
            .ok_or(DomainError::Authentication)?;

        Ok(Principal::from(&user))
    }
}

fn hash_password(password: &str) -> DomainResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!("Failed to hash password: {}", e))?;
    Ok(hash.to_string())
}

fn verify_password(password: &str, stored_hash: &str) -> DomainResult<bool> {
    let parsed = PasswordHash::new(stored_hash).map_err(|e| anyhow!("Corrupt password hash: {}", e))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
