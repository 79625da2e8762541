use std::sync::Arc;

use actix_web::{web, HttpServer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use mc_api::app::create_app;
use mc_api::routes::AppState;
use mc_core::services::{AccountService, AuthService, TokenService, TokenServiceConfig};
use mc_infra::database::connection::DatabasePool;
use mc_infra::database::mysql::{
    MySqlAccountRepository, MySqlStoreRepository, MySqlTokenRepository,
};
use mc_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    init_tracing(&config);

    info!(environment = %config.environment, "starting mercadito account service");
    if config.environment.is_production() && config.auth.secrets.is_using_default_secrets() {
        warn!("development token secrets are in use in production");
    }

    let pool = DatabasePool::connect(&config.database)
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    pool.health_check()
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    let accounts = Arc::new(MySqlAccountRepository::new(pool.pool().clone()));
    let tokens = Arc::new(MySqlTokenRepository::new(pool.pool().clone()));
    let stores = Arc::new(MySqlStoreRepository::new(pool.pool().clone()));

    let token_service = Arc::new(TokenService::new(TokenServiceConfig::from(
        &config.auth.secrets,
    )));
    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&accounts),
        Arc::clone(&tokens),
        Arc::clone(&token_service),
    ));
    let account_service = Arc::new(AccountService::new(
        Arc::clone(&accounts),
        Arc::clone(&tokens),
        Arc::clone(&stores),
        Arc::clone(&token_service),
        config.auth.bcrypt_cost,
    ));

    let state = web::Data::new(AppState {
        account_service,
        auth_service,
        token_service,
        cookies: config.auth.cookies.clone(),
    });

    let bind_address = config.server.bind_address();
    info!(%bind_address, "binding HTTP server");

    let cors_config = config.cors.clone();
    let workers = config.server.workers;

    let mut server = HttpServer::new(move || create_app(state.clone(), &cors_config));
    if workers > 0 {
        server = server.workers(workers);
    }
    server.bind(&bind_address)?.run().await
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));

    if config.logging.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
