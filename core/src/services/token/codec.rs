//! Stateless issue/verify for one kind of token

use chrono::{DateTime, Duration, DurationRound, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, Header, Validation};
use tracing::debug;

use crate::domain::entities::token::{Claims, IssuedToken, TokenKind};
use crate::errors::{DomainError, TokenError};

use super::key_manager::Rs256KeyPair;

/// Issues and verifies RS256 tokens of a single [`TokenKind`].
///
/// A codec never consults the session store; it only answers whether a token
/// was signed by its key, is well formed for its kind, and is unexpired at a
/// given instant.
#[derive(Clone)]
pub struct TokenCodec {
    kind: TokenKind,
    keys: Rs256KeyPair,
    issuer: String,
    audience: String,
    header: Header,
    validation: Validation,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("kind", &self.kind)
            .field("keys", &self.keys)
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish()
    }
}

impl TokenCodec {
    pub fn new(
        kind: TokenKind,
        keys: Rs256KeyPair,
        issuer: impl Into<String>,
        audience: impl Into<String>,
    ) -> Self {
        let issuer = issuer.into();
        let audience = audience.into();

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[issuer.as_str()]);
        validation.set_audience(&[audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "iat", "sub", "iss", "aud"]);
        // Expiry is checked against the caller's clock in `verify`
        validation.validate_exp = false;
        validation.validate_nbf = false;

        Self {
            kind,
            keys,
            issuer,
            audience,
            header: Header::new(Algorithm::RS256),
            validation,
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Signs a new token for `subject` valid for `ttl` from `now`.
    ///
    /// Every call generates a fresh session identifier. The returned
    /// `expires_at` is exactly the `exp` claim, at second precision.
    pub fn issue(
        &self,
        subject: &str,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, DomainError> {
        if ttl <= Duration::zero() {
            return Err(TokenError::GenerationFailed.into());
        }

        let issued_at = now
            .duration_trunc(Duration::seconds(1))
            .map_err(|_| TokenError::GenerationFailed)?;
        let claims =
            Claims::new(subject, self.kind, issued_at, ttl, &self.issuer, &self.audience)?;

        let token = encode(&self.header, &claims, self.keys.encoding_key()).map_err(|e| {
            debug!(kind = %self.kind, error = %e, "Token signing failed");
            TokenError::GenerationFailed
        })?;

        Ok(IssuedToken {
            token,
            session_id: claims.sid,
            expires_at: claims.expires_at(),
        })
    }

    /// Verifies signature, algorithm, shape and expiry at `now`.
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, DomainError> {
        let claims = self.inspect(token)?;
        if claims.is_expired_at(now) {
            return Err(TokenError::Expired.into());
        }
        Ok(claims)
    }

    /// Like [`verify`](Self::verify) but accepts expired tokens.
    ///
    /// Only used where a token's session id is needed for revocation after
    /// the token itself may have lapsed.
    pub fn inspect(&self, token: &str) -> Result<Claims, DomainError> {
        let data = decode::<Claims>(token, self.keys.decoding_key(), &self.validation)
            .map_err(|e| {
                let mapped = match e.kind() {
                    ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                        TokenError::InvalidSignature
                    }
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    _ => TokenError::Malformed,
                };
                debug!(kind = %self.kind, error = %e, "Token rejected");
                DomainError::from(mapped)
            })?;

        if data.claims.kind != self.kind {
            debug!(expected = %self.kind, actual = %data.claims.kind, "Token kind mismatch");
            return Err(TokenError::Malformed.into());
        }

        Ok(data.claims)
    }
}
