//! Test application builder backed by in-memory adapters

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{
    cookie::Cookie,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error,
};
use kg_api::{
    configure,
    cookies::CookieSettings,
    handlers::{json_config, not_found},
    middleware::RequestAuthorizer,
    AppState,
};
use kg_core::{
    test_keys, AccountService, AuthGate, InMemorySessionStore, InMemoryUserDirectory,
    SessionConfig, SessionManager, TokenCodec, TokenKind,
};
use uuid::Uuid;
use kg_infra::BcryptPasswordHasher;

pub type Store = InMemorySessionStore;
pub type Users = InMemoryUserDirectory;

pub const PASSWORD: &str = "password123";

pub struct TestContext {
    pub state: web::Data<AppState<Store, Users>>,
    pub authorizer: web::Data<dyn RequestAuthorizer>,
    pub store: Arc<Store>,
    pub users: Arc<Users>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    pub fn with_config(config: SessionConfig) -> Self {
        let store = Arc::new(InMemorySessionStore::new());
        let users = Arc::new(InMemoryUserDirectory::new());
        let sessions = Arc::new(SessionManager::new(
            store.clone(),
            test_keys::access_keys().unwrap(),
            test_keys::refresh_keys().unwrap(),
            config,
        ));

        // Minimum bcrypt cost keeps the suite fast
        let accounts = Arc::new(AccountService::new(
            sessions.clone(),
            users.clone(),
            Arc::new(BcryptPasswordHasher::new(4)),
        ));
        let gate: Arc<dyn RequestAuthorizer> = Arc::new(AuthGate::new(sessions, users.clone()));

        Self {
            state: web::Data::new(AppState::new(accounts, CookieSettings::default())),
            authorizer: web::Data::from(gate),
            store,
            users,
        }
    }

    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(self.state.clone())
            .app_data(self.authorizer.clone())
            .app_data(json_config())
            .configure(configure::<Store, Users>)
            .default_service(web::route().to(not_found))
    }
}

pub fn register_body(email: &str) -> serde_json::Value {
    serde_json::json!({
        "name": "Ada Lovelace",
        "email": email,
        "password": PASSWORD,
        "password_confirm": PASSWORD,
    })
}

pub fn login_body(email: &str) -> serde_json::Value {
    serde_json::json!({ "email": email, "password": PASSWORD })
}

/// Value of a `Set-Cookie` named `name` on the response
pub fn response_cookie(resp: &ServiceResponse, name: &str) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|cookie| cookie.name() == name)
        .map(|cookie| cookie.into_owned())
}

/// Session id embedded in an access token issued by the test app
pub fn access_session_id(token: &str) -> Uuid {
    let config = SessionConfig::default();
    TokenCodec::new(
        TokenKind::Access,
        test_keys::access_keys().unwrap(),
        config.issuer,
        config.audience,
    )
    .inspect(token)
    .unwrap()
    .sid
}
