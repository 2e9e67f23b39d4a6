//! CORS configuration for browser clients.
//!
//! Cookies carry the session, so credentials are always allowed. Production
//! only accepts the configured origins; other environments accept any origin
//! for local front-end work.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use kg_shared::config::{Environment, ServerConfig};

const MAX_AGE_SECS: usize = 3600;

pub fn create_cors(server: &ServerConfig, environment: Environment) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
        ])
        .supports_credentials()
        .max_age(MAX_AGE_SECS);

    if !environment.is_production() {
        tracing::debug!(environment = ?environment, "Configuring permissive CORS");
        return cors.allow_any_origin();
    }

    tracing::info!(origins = ?server.allowed_origins, "Configuring CORS for production");
    server
        .allowed_origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};

    use super::*;

    fn production_server() -> ServerConfig {
        ServerConfig {
            allowed_origins: vec!["https://app.example.com".to_string()],
            ..ServerConfig::default()
        }
    }

    #[actix_web::test]
    async fn test_production_reflects_allowed_origin_with_credentials() {
        let app = test::init_service(
            App::new()
                .wrap(create_cors(&production_server(), Environment::Production))
                .route("/ping", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/ping")
            .insert_header((header::ORIGIN, "https://app.example.com"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let headers = resp.headers();
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "https://app.example.com"
        );
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
            "true"
        );
    }
}
