use actix_web::{web, HttpResponse};
use kg_core::{repositories::UserRegistry, services::session::SessionStore};
use kg_shared::types::HealthResponse;

use crate::app::AppState;

/// Handler for GET /health
///
/// Probes the session store. Reports `degraded` with 503 when it is
/// unreachable, since no session can be issued or checked without it.
pub async fn health<S, U>(state: web::Data<AppState<S, U>>) -> HttpResponse
where
    S: SessionStore + ?Sized + 'static,
    U: UserRegistry + ?Sized + 'static,
{
    let store_ok = match state.accounts.sessions().health_check().await {
        Ok(ok) => ok,
        Err(error) => {
            tracing::warn!(%error, "Session store health check failed");
            false
        }
    };

    let body = HealthResponse::new("keygate", env!("CARGO_PKG_VERSION"), store_ok);
    if store_ok {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}
