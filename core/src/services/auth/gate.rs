//! Auth gate bridging request transport to the session manager

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::entities::identity::AuthenticatedIdentity;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::UserDirectory;
use crate::services::session::{SessionManager, SessionStore};

/// Authorization scheme accepted in the `Authorization` header
pub const BEARER_SCHEME: &str = "Bearer";

/// Turns a raw header or cookie value into an [`AuthenticatedIdentity`].
///
/// Transport-agnostic: the HTTP layer hands over the `Authorization` header
/// value and the access cookie value, and gets back an identity or an error.
pub struct AuthGate<S, U>
where
    S: SessionStore + ?Sized,
    U: UserDirectory + ?Sized,
{
    sessions: Arc<SessionManager<S>>,
    directory: Arc<U>,
}

impl<S, U> Clone for AuthGate<S, U>
where
    S: SessionStore + ?Sized,
    U: UserDirectory + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            sessions: self.sessions.clone(),
            directory: self.directory.clone(),
        }
    }
}

impl<S, U> AuthGate<S, U>
where
    S: SessionStore + ?Sized,
    U: UserDirectory + ?Sized,
{
    pub fn new(sessions: Arc<SessionManager<S>>, directory: Arc<U>) -> Self {
        Self {
            sessions,
            directory,
        }
    }

    /// Authenticates a request and resolves its user.
    ///
    /// Every failure except a store outage or directory error surfaces as
    /// `Unauthenticated`, including a live session whose user no longer
    /// exists.
    pub async fn authorize(
        &self,
        authorization: Option<&str>,
        cookie: Option<&str>,
        now: DateTime<Utc>,
    ) -> DomainResult<AuthenticatedIdentity> {
        let token = extract_token(authorization, cookie).ok_or_else(|| {
            debug!("No access token presented");
            DomainError::unauthenticated()
        })?;

        let session = self.sessions.authenticate(token, now).await?;

        let user = self
            .directory
            .find_by_id(&session.subject_id)
            .await?
            .ok_or_else(|| {
                debug!(subject_id = %session.subject_id, "Session subject no longer exists");
                DomainError::unauthenticated()
            })?;

        Ok(AuthenticatedIdentity {
            user,
            session_id: session.session_id,
        })
    }
}

/// Picks the candidate token.
///
/// A well-formed `Bearer <token>` header wins. A missing or malformed header
/// falls back to the cookie. Empty values count as absent.
pub fn extract_token<'a>(authorization: Option<&'a str>, cookie: Option<&'a str>) -> Option<&'a str> {
    authorization
        .and_then(parse_bearer)
        .or_else(|| cookie.map(str::trim).filter(|value| !value.is_empty()))
}

fn parse_bearer(header: &str) -> Option<&str> {
    let mut parts = header.split_whitespace();
    let scheme = parts.next()?;
    let token = parts.next()?;
    if parts.next().is_some() || !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return None;
    }
    Some(token)
}
