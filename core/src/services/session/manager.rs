//! Session manager: issues, validates, rotates and revokes token sessions

use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::entities::identity::ActiveSession;
use crate::domain::entities::token::{Claims, IssuedToken, TokenKind, TokenPair};
use crate::errors::{AuthError, DomainError, DomainResult, TokenError};
use crate::services::token::{Rs256KeyPair, TokenCodec};

use super::config::SessionConfig;
use super::store::SessionStore;

/// Couples the access and refresh codecs to a [`SessionStore`].
///
/// A token is accepted only if its signature verifies, it is unexpired at the
/// caller-supplied `now`, and its session identifier is still live in the
/// store. Every store round-trip is bounded by `SessionConfig::store_timeout`.
pub struct SessionManager<S: SessionStore + ?Sized> {
    store: Arc<S>,
    access_codec: TokenCodec,
    refresh_codec: TokenCodec,
    config: SessionConfig,
}

impl<S: SessionStore + ?Sized> SessionManager<S> {
    pub fn new(
        store: Arc<S>,
        access_keys: Rs256KeyPair,
        refresh_keys: Rs256KeyPair,
        config: SessionConfig,
    ) -> Self {
        let access_codec =
            TokenCodec::new(TokenKind::Access, access_keys, &config.issuer, &config.audience);
        let refresh_codec =
            TokenCodec::new(TokenKind::Refresh, refresh_keys, &config.issuer, &config.audience);

        Self {
            store,
            access_codec,
            refresh_codec,
            config,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Issues a fresh token pair for `subject_id` and registers both sessions.
    ///
    /// Both store writes run concurrently. If either fails, both session ids
    /// are deleted on a best-effort basis and no tokens are returned.
    pub async fn login(&self, subject_id: &str, now: DateTime<Utc>) -> DomainResult<TokenPair> {
        let access = self
            .access_codec
            .issue(subject_id, self.config.access_ttl, now)?;
        let refresh = self
            .refresh_codec
            .issue(subject_id, self.config.refresh_ttl, now)?;

        let access_ttl = remaining(&access, now)?;
        let refresh_ttl = remaining(&refresh, now)?;

        let writes = async {
            tokio::try_join!(
                self.store.put(access.session_id, subject_id, access_ttl),
                self.store.put(refresh.session_id, subject_id, refresh_ttl),
            )
        };

        if let Err(e) = self.bounded("put", writes).await {
            warn!(
                subject_id = %subject_id,
                error = %e,
                "Session registration failed, discarding issued tokens"
            );
            self.discard(&[access.session_id, refresh.session_id]).await;
            return Err(e);
        }

        debug!(
            subject_id = %subject_id,
            access_sid = %access.session_id,
            refresh_sid = %refresh.session_id,
            "Sessions registered"
        );

        Ok(TokenPair { access, refresh })
    }

    /// Verifies an access token and checks its session is still live.
    ///
    /// Any token or lookup failure collapses to `Unauthenticated`; a store
    /// outage is reported as `StoreUnavailable`.
    pub async fn authenticate(
        &self,
        access_token: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<ActiveSession> {
        let claims = self
            .access_codec
            .verify(access_token, now)
            .map_err(DomainError::into_unauthenticated)?;
        self.resolve(claims).await
    }

    /// Same checks as [`authenticate`](Self::authenticate) for a refresh token.
    pub async fn validate_refresh(
        &self,
        refresh_token: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<ActiveSession> {
        let claims = self
            .refresh_codec
            .verify(refresh_token, now)
            .map_err(DomainError::into_unauthenticated)?;
        self.resolve(claims).await
    }

    /// Issues a new pair for an already validated refresh session.
    ///
    /// With `revoke_on_refresh` the presented refresh session is deleted once
    /// the new pair is registered. A failed delete is logged, not returned:
    /// the caller already holds valid new tokens.
    pub async fn rotate(
        &self,
        session: &ActiveSession,
        now: DateTime<Utc>,
    ) -> DomainResult<TokenPair> {
        let pair = self.login(&session.subject_id, now).await?;

        if self.config.revoke_on_refresh {
            let ids = [session.session_id];
            if let Err(e) = self.bounded("delete", self.store.delete(&ids)).await {
                warn!(
                    subject_id = %session.subject_id,
                    session_id = %session.session_id,
                    error = %e,
                    "Failed to revoke rotated refresh session"
                );
            }
        }

        info!(
            subject_id = %session.subject_id,
            revoked = self.config.revoke_on_refresh,
            "Session rotated"
        );

        Ok(pair)
    }

    /// Validates `refresh_token` and rotates it into a new pair.
    pub async fn refresh(&self, refresh_token: &str, now: DateTime<Utc>) -> DomainResult<TokenPair> {
        let session = self.validate_refresh(refresh_token, now).await?;
        self.rotate(&session, now).await
    }

    /// Deletes the refresh session and, when supplied, the access session.
    ///
    /// The refresh token must verify; its session need not still be live, so
    /// a repeated logout succeeds. The access token only contributes its
    /// session id when it was signed by us for the same subject. Its expiry
    /// is not checked.
    ///
    /// Returns how many store entries were removed.
    pub async fn logout(
        &self,
        access_token: Option<&str>,
        refresh_token: Option<&str>,
        now: DateTime<Utc>,
    ) -> DomainResult<u64> {
        let refresh_token = refresh_token.ok_or_else(DomainError::unauthenticated)?;
        let refresh = self
            .refresh_codec
            .verify(refresh_token, now)
            .map_err(DomainError::into_unauthenticated)?;

        let mut session_ids = vec![refresh.sid];
        if let Some(token) = access_token {
            match self.access_codec.inspect(token) {
                Ok(access) if access.sub == refresh.sub => session_ids.push(access.sid),
                Ok(_) => debug!("Access token belongs to another subject, ignoring"),
                Err(e) => debug!(error = %e, "Access token unusable at logout, ignoring"),
            }
        }

        let removed = self
            .bounded("delete", self.store.delete(&session_ids))
            .await?;

        info!(subject_id = %refresh.sub, removed, "Sessions logged out");
        Ok(removed)
    }

    /// Forcibly revokes sessions by identifier
    pub async fn revoke_sessions(&self, session_ids: &[Uuid]) -> DomainResult<u64> {
        if session_ids.is_empty() {
            return Ok(0);
        }
        let removed = self.bounded("delete", self.store.delete(session_ids)).await?;
        info!(requested = session_ids.len(), removed, "Sessions revoked");
        Ok(removed)
    }

    pub async fn health_check(&self) -> DomainResult<bool> {
        self.bounded("health_check", self.store.health_check()).await
    }

    async fn resolve(&self, claims: Claims) -> DomainResult<ActiveSession> {
        match self.bounded("get", self.store.get(claims.sid)).await? {
            Some(subject_id) if subject_id == claims.sub => Ok(ActiveSession {
                subject_id,
                session_id: claims.sid,
            }),
            Some(_) => {
                warn!(session_id = %claims.sid, "Stored subject does not match token subject");
                Err(DomainError::unauthenticated())
            }
            None => {
                debug!(session_id = %claims.sid, kind = %claims.kind, "Session not found");
                Err(DomainError::unauthenticated())
            }
        }
    }

    async fn discard(&self, session_ids: &[Uuid]) {
        if let Err(e) = self.bounded("delete", self.store.delete(session_ids)).await {
            warn!(error = %e, "Best-effort session cleanup failed");
        }
    }

    async fn bounded<T, F>(&self, operation: &'static str, fut: F) -> DomainResult<T>
    where
        F: Future<Output = DomainResult<T>>,
    {
        match tokio::time::timeout(self.config.store_timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    operation,
                    timeout_ms = self.config.store_timeout.as_millis() as u64,
                    "Session store operation timed out"
                );
                Err(AuthError::StoreUnavailable {
                    message: format!("{} timed out", operation),
                }
                .into())
            }
        }
    }
}

fn remaining(token: &IssuedToken, now: DateTime<Utc>) -> DomainResult<std::time::Duration> {
    token
        .remaining_at(now)
        .ok_or_else(|| TokenError::GenerationFailed.into())
}
