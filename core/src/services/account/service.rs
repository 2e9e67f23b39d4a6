//! Account service implementation

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::domain::entities::token::TokenPair;
use crate::domain::entities::user::UserRecord;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::UserRegistry;
use crate::services::session::{SessionManager, SessionStore};

use super::password::PasswordHasher;
use super::types::{LoginInput, LoginOutcome, RegisterInput};

/// Account flows for the HTTP layer
pub struct AccountService<S, U>
where
    S: SessionStore + ?Sized,
    U: UserRegistry + ?Sized,
{
    /// Session lifecycle
    sessions: Arc<SessionManager<S>>,
    /// User persistence
    users: Arc<U>,
    /// Password hashing, run off the async executor
    hasher: Arc<dyn PasswordHasher>,
}

impl<S, U> AccountService<S, U>
where
    S: SessionStore + ?Sized,
    U: UserRegistry + ?Sized,
{
    pub fn new(
        sessions: Arc<SessionManager<S>>,
        users: Arc<U>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            sessions,
            users,
            hasher,
        }
    }

    pub fn sessions(&self) -> &Arc<SessionManager<S>> {
        &self.sessions
    }

    pub fn users(&self) -> &Arc<U> {
        &self.users
    }

    /// Create a new account
    ///
    /// The email is stored lower-cased. Registration does not log the user
    /// in; the client follows up with [`login`](Self::login).
    ///
    /// # Errors
    ///
    /// * `AuthError::PasswordMismatch` - confirmation differs from password
    /// * `AuthError::EmailAlreadyExists` - email is taken
    pub async fn register(
        &self,
        input: RegisterInput,
        now: DateTime<Utc>,
    ) -> DomainResult<UserRecord> {
        if input.password != input.password_confirm {
            return Err(AuthError::PasswordMismatch.into());
        }

        let email = normalize_email(&input.email);
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailAlreadyExists.into());
        }

        let password_hash = self.hash_password(input.password).await?;
        let user = self
            .users
            .create(UserRecord::new(input.name.trim(), &email, password_hash, now))
            .await?;

        info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Check credentials and open a session pair
    ///
    /// Unknown email and wrong password are both `InvalidCredentials`.
    pub async fn login(&self, input: LoginInput, now: DateTime<Utc>) -> DomainResult<LoginOutcome> {
        let email = normalize_email(&input.email);
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self
            .verify_password(input.password, user.password_hash.clone())
            .await?
        {
            warn!(user_id = %user.id, "Login rejected: wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        let tokens = self.sessions.login(&user.id, now).await?;
        info!(user_id = %user.id, "User logged in");

        Ok(LoginOutcome { tokens, user })
    }

    /// Rotate a refresh token, provided its user still exists
    pub async fn refresh(&self, refresh_token: &str, now: DateTime<Utc>) -> DomainResult<TokenPair> {
        let session = self.sessions.validate_refresh(refresh_token, now).await?;

        if self.users.find_by_id(&session.subject_id).await?.is_none() {
            warn!(subject_id = %session.subject_id, "Refresh for a user that no longer exists");
            return Err(DomainError::unauthenticated());
        }

        self.sessions.rotate(&session, now).await
    }

    pub async fn logout(
        &self,
        access_token: Option<&str>,
        refresh_token: Option<&str>,
        now: DateTime<Utc>,
    ) -> DomainResult<u64> {
        self.sessions.logout(access_token, refresh_token, now).await
    }

    async fn hash_password(&self, password: String) -> DomainResult<String> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Password hashing task failed: {}", e),
            })?
    }

    async fn verify_password(&self, password: String, hash: String) -> DomainResult<bool> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Password verification task failed: {}", e),
            })?
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
