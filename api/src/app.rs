//! Application state and route table

use std::sync::Arc;

use actix_web::web;
use kg_core::{
    repositories::UserRegistry,
    services::{account::AccountService, session::SessionStore},
};

use crate::cookies::CookieSettings;
use crate::middleware::SessionAuth;
use crate::routes::{
    auth::{login::login, logout::logout, refresh::refresh, register::register},
    health::health,
    users::me::me,
};

/// Shared state for all handlers
pub struct AppState<S, U>
where
    S: SessionStore + ?Sized,
    U: UserRegistry + ?Sized,
{
    pub accounts: Arc<AccountService<S, U>>,
    pub cookies: CookieSettings,
}

impl<S, U> AppState<S, U>
where
    S: SessionStore + ?Sized,
    U: UserRegistry + ?Sized,
{
    pub fn new(accounts: Arc<AccountService<S, U>>, cookies: CookieSettings) -> Self {
        Self { accounts, cookies }
    }
}

/// Mounts every route.
///
/// Expects `web::Data<AppState<S, U>>` and `web::Data<dyn RequestAuthorizer>`
/// to be registered on the `App`.
pub fn configure<S, U>(cfg: &mut web::ServiceConfig)
where
    S: SessionStore + ?Sized + 'static,
    U: UserRegistry + ?Sized + 'static,
{
    cfg.route("/health", web::get().to(health::<S, U>)).service(
        web::scope("/api/v1")
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(register::<S, U>))
                    .route("/login", web::post().to(login::<S, U>))
                    .route("/refresh", web::post().to(refresh::<S, U>))
                    .route("/logout", web::post().to(logout::<S, U>)),
            )
            .service(
                web::scope("/users")
                    .wrap(SessionAuth)
                    .route("/me", web::get().to(me)),
            ),
    );
}
