//! Middleware for the HTTP surface

pub mod auth;
pub mod cors;

pub use auth::{AuthContext, RequestAuthorizer, SessionAuth};
pub use cors::create_cors;
