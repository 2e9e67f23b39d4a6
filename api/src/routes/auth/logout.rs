use actix_web::{http::header::AUTHORIZATION, web, HttpRequest, HttpResponse};
use chrono::Utc;
use kg_core::{
    repositories::UserRegistry,
    services::{auth::extract_token, session::SessionStore},
};
use kg_shared::types::ApiResponse;

use super::refresh_token_from;
use crate::app::AppState;
use crate::cookies::ACCESS_TOKEN_COOKIE;
use crate::dto::{LogoutResponse, RefreshRequest};
use crate::handlers::ApiError;

/// Handler for POST /api/v1/auth/logout
///
/// Requires a valid refresh token. The access session is revoked too when
/// the presented access token belongs to the same user, even if it has
/// already expired. Session cookies are cleared on success.
pub async fn logout<S, U>(
    req: HttpRequest,
    state: web::Data<AppState<S, U>>,
    body: Option<web::Json<RefreshRequest>>,
) -> Result<HttpResponse, ApiError>
where
    S: SessionStore + ?Sized + 'static,
    U: UserRegistry + ?Sized + 'static,
{
    let refresh_token = refresh_token_from(&req, body.as_deref()).ok_or(ApiError::NotLoggedIn)?;

    let authorization = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    let access_cookie = req.cookie(ACCESS_TOKEN_COOKIE);
    let access_token = extract_token(authorization, access_cookie.as_ref().map(|c| c.value()));

    let removed = state
        .accounts
        .logout(access_token, Some(&refresh_token), Utc::now())
        .await?;

    let mut response = HttpResponse::Ok();
    for cookie in state.cookies.clear() {
        response.cookie(cookie);
    }

    Ok(response.json(ApiResponse::success(LogoutResponse {
        sessions_revoked: removed,
    })))
}
