use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use kg_api::{
    configure,
    cookies::CookieSettings,
    handlers::{json_config, not_found},
    middleware::{create_cors, RequestAuthorizer},
    telemetry, AppState,
};
use kg_core::{
    AccountService, AuthGate, InMemorySessionStore, InMemoryUserDirectory, PasswordHasher,
    Rs256KeyPair, SessionConfig, SessionManager, SessionStore,
};
use kg_infra::{BcryptPasswordHasher, RedisSessionStore};
use kg_shared::config::{AppConfig, CacheBackend};
use tracing::{info, warn};
use tracing_actix_web::TracingLogger;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    telemetry::init_tracing(&config.logging)?;

    info!(environment = ?config.environment, "Starting KeyGate API server");

    let jwt = &config.auth.jwt;
    jwt.validate().map_err(anyhow::Error::msg)?;

    let access_keys =
        Rs256KeyPair::from_files(&jwt.access_private_key_path, &jwt.access_public_key_path)?;
    let refresh_keys =
        Rs256KeyPair::from_files(&jwt.refresh_private_key_path, &jwt.refresh_public_key_path)?;

    let store: Arc<dyn SessionStore> = match config.cache.backend {
        CacheBackend::Redis => Arc::new(RedisSessionStore::connect(&config.cache).await?),
        CacheBackend::Memory => {
            warn!("Using in-memory session store; sessions do not survive a restart");
            Arc::new(InMemorySessionStore::new())
        }
    };

    let sessions = Arc::new(SessionManager::new(
        store,
        access_keys,
        refresh_keys,
        SessionConfig::from_settings(jwt, &config.cache),
    ));
    let users = Arc::new(InMemoryUserDirectory::new());
    let hasher: Arc<dyn PasswordHasher> =
        Arc::new(BcryptPasswordHasher::new(config.auth.password_hash_cost));

    let accounts = Arc::new(AccountService::new(sessions.clone(), users.clone(), hasher));
    let gate: Arc<dyn RequestAuthorizer> = Arc::new(AuthGate::new(sessions, users));

    let state = web::Data::new(AppState::new(
        accounts,
        CookieSettings::from_config(&config.auth.cookies),
    ));
    let authorizer: web::Data<dyn RequestAuthorizer> = web::Data::from(gate);

    let server_config = config.server.clone();
    let environment = config.environment;
    let bind_address = config.server.bind_address();
    info!(%bind_address, "Server will bind");

    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(authorizer.clone())
            .app_data(json_config())
            .wrap(create_cors(&server_config, environment))
            .wrap(TracingLogger::default())
            .configure(configure::<dyn SessionStore, InMemoryUserDirectory>)
            .default_service(web::route().to(not_found))
    });

    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_address)?.run().await?;

    info!("Server stopped");
    Ok(())
}
