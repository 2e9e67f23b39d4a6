use actix_web::{web, HttpRequest, HttpResponse};
use chrono::Utc;
use kg_core::{repositories::UserRegistry, services::session::SessionStore};
use kg_shared::types::ApiResponse;

use super::refresh_token_from;
use crate::app::AppState;
use crate::dto::{RefreshRequest, TokenResponse};
use crate::handlers::ApiError;

/// Handler for POST /api/v1/auth/refresh
///
/// Reads the refresh token from the `refresh_token` cookie or the JSON body,
/// and answers with a fresh pair. The presented refresh session is revoked
/// when rotation revocation is enabled.
pub async fn refresh<S, U>(
    req: HttpRequest,
    state: web::Data<AppState<S, U>>,
    body: Option<web::Json<RefreshRequest>>,
) -> Result<HttpResponse, ApiError>
where
    S: SessionStore + ?Sized + 'static,
    U: UserRegistry + ?Sized + 'static,
{
    let token = refresh_token_from(&req, body.as_deref()).ok_or(ApiError::NotLoggedIn)?;

    let now = Utc::now();
    let tokens = state.accounts.refresh(&token, now).await?;

    let mut response = HttpResponse::Ok();
    for cookie in state.cookies.issue(&tokens, now) {
        response.cookie(cookie);
    }

    Ok(response.json(ApiResponse::success(TokenResponse::from(tokens))))
}
