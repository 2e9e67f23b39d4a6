//! Mapping of domain failures onto HTTP responses
//!
//! Every error leaves the API as an [`ErrorResponse`] body. Authentication
//! failures collapse into two messages so clients cannot tell a forged token
//! from an expired or revoked one.

use actix_web::{error::JsonPayloadError, http::StatusCode, web, HttpRequest, HttpResponse, ResponseError};
use kg_core::errors::{AuthError, DomainError, TokenError};
use kg_shared::errors::{error_codes, ErrorResponse};
use thiserror::Error;
use validator::ValidationErrors;

pub const NOT_LOGGED_IN_MESSAGE: &str = "You are not logged in";
pub const SESSION_INVALID_MESSAGE: &str = "Token is invalid or session has expired";

#[derive(Debug, Error)]
pub enum ApiError {
    /// No credential was presented at all
    #[error("{}", NOT_LOGGED_IN_MESSAGE)]
    NotLoggedIn,

    #[error("{}", SESSION_INVALID_MESSAGE)]
    Unauthenticated,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("User with that email already exists")]
    EmailAlreadyExists,

    #[error("{0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Service temporarily unavailable")]
    ServiceUnavailable,

    #[error("An internal error occurred")]
    Internal,
}

impl ApiError {
    fn code(&self) -> &'static str {
        match self {
            ApiError::NotLoggedIn | ApiError::Unauthenticated => error_codes::UNAUTHENTICATED,
            ApiError::InvalidCredentials => error_codes::INVALID_CREDENTIALS,
            ApiError::EmailAlreadyExists => error_codes::EMAIL_ALREADY_EXISTS,
            ApiError::Validation(_) => error_codes::VALIDATION_ERROR,
            ApiError::NotFound(_) => error_codes::NOT_FOUND,
            ApiError::ServiceUnavailable => error_codes::SERVICE_UNAVAILABLE,
            ApiError::Internal => error_codes::INTERNAL_ERROR,
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotLoggedIn | ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::InvalidCredentials | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::EmailAlreadyExists => StatusCode::CONFLICT,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse::new(self.code(), self.to_string()))
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::Auth(auth) => match auth {
                AuthError::Unauthenticated => ApiError::Unauthenticated,
                AuthError::InvalidCredentials => ApiError::InvalidCredentials,
                AuthError::EmailAlreadyExists => ApiError::EmailAlreadyExists,
                AuthError::PasswordMismatch => {
                    ApiError::Validation(AuthError::PasswordMismatch.to_string())
                }
                AuthError::StoreUnavailable { message } => {
                    tracing::warn!(%message, "Session store unavailable");
                    ApiError::ServiceUnavailable
                }
            },
            DomainError::Token(
                TokenError::Malformed | TokenError::InvalidSignature | TokenError::Expired,
            ) => ApiError::Unauthenticated,
            DomainError::Validation { message } => ApiError::Validation(message),
            DomainError::NotFound { resource } => ApiError::NotFound(resource),
            other => {
                tracing::error!(error = %other, "Unhandled domain error");
                ApiError::Internal
            }
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<&str> = errors.field_errors().keys().copied().collect();
        fields.sort_unstable();
        ApiError::Validation(format!("Invalid fields: {}", fields.join(", ")))
    }
}

/// JSON extractor settings that keep body errors in the standard shape
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(16 * 1024)
        .error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
            ApiError::Validation(format!("Invalid request body: {}", err)).into()
        })
}

/// Fallback for unmatched routes
pub async fn not_found() -> HttpResponse {
    ApiError::NotFound("Route".to_string()).error_response()
}
