use actix_web::{web, HttpResponse};
use chrono::Utc;
use kg_core::{repositories::UserRegistry, services::session::SessionStore};
use kg_shared::types::ApiResponse;
use validator::Validate;

use crate::app::AppState;
use crate::dto::{LoginRequest, LoginResponse};
use crate::handlers::ApiError;

/// Handler for POST /api/v1/auth/login
///
/// Checks credentials and opens a session. Tokens are returned both in the
/// body and as cookies.
///
/// # Errors
/// - 400 Bad Request: invalid email or password
/// - 503 Service Unavailable: session store unreachable
pub async fn login<S, U>(
    state: web::Data<AppState<S, U>>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError>
where
    S: SessionStore + ?Sized + 'static,
    U: UserRegistry + ?Sized + 'static,
{
    let request = body.into_inner();
    request.validate()?;

    let now = Utc::now();
    let outcome = state.accounts.login(request.into(), now).await?;

    let mut response = HttpResponse::Ok();
    for cookie in state.cookies.issue(&outcome.tokens, now) {
        response.cookie(cookie);
    }

    Ok(response.json(ApiResponse::success(LoginResponse {
        tokens: outcome.tokens.into(),
        user: outcome.user.profile(),
    })))
}
