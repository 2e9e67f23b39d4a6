//! Authentication route handlers
//!
//! - Registration and credential login
//! - Token refresh with rotation
//! - Logout

pub mod login;
pub mod logout;
pub mod refresh;
pub mod register;

use actix_web::HttpRequest;

use crate::dto::RefreshRequest;

/// Refresh token from its cookie, falling back to the JSON body
pub(crate) fn refresh_token_from(
    req: &HttpRequest,
    body: Option<&RefreshRequest>,
) -> Option<String> {
    req.cookie(crate::cookies::REFRESH_TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_owned())
        .filter(|value| !value.is_empty())
        .or_else(|| {
            body.and_then(|body| body.refresh_token.clone())
                .filter(|value| !value.trim().is_empty())
        })
}
