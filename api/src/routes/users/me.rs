use actix_web::HttpResponse;
use kg_shared::types::ApiResponse;

use crate::dto::MeResponse;
use crate::middleware::AuthContext;

/// Handler for GET /api/v1/users/me, behind [`SessionAuth`](crate::middleware::SessionAuth)
///
/// Returns the caller's profile and the access session backing the request.
pub async fn me(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(MeResponse {
        user: auth.user.profile(),
        session_id: auth.session_id,
    }))
}
