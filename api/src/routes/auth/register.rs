use actix_web::{web, HttpResponse};
use chrono::Utc;
use kg_core::{repositories::UserRegistry, services::session::SessionStore};
use kg_shared::types::ApiResponse;
use validator::Validate;

use crate::app::AppState;
use crate::dto::{RegisterRequest, UserResponse};
use crate::handlers::ApiError;

/// Handler for POST /api/v1/auth/register
///
/// Creates an account. Does not start a session.
///
/// # Request Body
///
/// ```json
/// {
///     "name": "Ada",
///     "email": "ada@example.com",
///     "password": "password123",
///     "password_confirm": "password123"
/// }
/// ```
///
/// # Response
///
/// - 201 Created with the user profile
/// - 400 Bad Request: invalid fields or passwords differ
/// - 409 Conflict: email already registered
pub async fn register<S, U>(
    state: web::Data<AppState<S, U>>,
    body: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError>
where
    S: SessionStore + ?Sized + 'static,
    U: UserRegistry + ?Sized + 'static,
{
    let request = body.into_inner();
    request.validate()?;

    let user = state.accounts.register(request.into(), Utc::now()).await?;

    Ok(HttpResponse::Created().json(ApiResponse::success(UserResponse {
        user: user.profile(),
    })))
}
