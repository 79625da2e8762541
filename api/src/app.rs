//! Application factory.
//!
//! `create_app` assembles the actix-web application from a prepared
//! `AppState`; `main` and the integration tests both go through it so the
//! routing table exists in exactly one place.

use std::sync::Arc;

use actix_web::{web, App, HttpResponse};
use tracing_actix_web::TracingLogger;

use mc_core::repositories::{AccountRepository, StoreRepository, TokenRepository};
use mc_shared::config::CorsConfig;
use mc_shared::types::response::ServiceResponse;

use crate::middleware::auth::JwtAuth;
use crate::middleware::cors::create_cors;
use crate::routes::account::{address, admin, close, info, register, store, update};
use crate::routes::auth::{login, logout, refresh};
use crate::routes::AppState;

/// Create and configure the application with all routes wired up
pub fn create_app<A, T, S>(
    app_state: web::Data<AppState<A, T, S>>,
    cors_config: &CorsConfig,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    A: AccountRepository + 'static,
    T: TokenRepository + 'static,
    S: StoreRepository + 'static,
{
    let cors = create_cors(cors_config);
    let token_service = Arc::clone(&app_state.token_service);
    let access_cookie = app_state.cookies.access_cookie_name.clone();
    let jwt = move || JwtAuth::new(Arc::clone(&token_service), access_cookie.clone());

    App::new()
        .app_data(app_state)
        .wrap(TracingLogger::default())
        .wrap(cors)
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/auth")
                        .route("/login", web::post().to(login::login::<A, T, S>))
                        .route("/refresh", web::post().to(refresh::refresh::<A, T, S>))
                        .route("/logout", web::post().to(logout::logout::<A, T, S>)),
                )
                .service(
                    web::scope("/account")
                        .service(
                            web::scope("/admin")
                                .route(
                                    "/list",
                                    web::get().to(admin::list::<A, T, S>).wrap(jwt()),
                                )
                                .route(
                                    "/banned-list",
                                    web::get().to(admin::banned_list::<A, T, S>).wrap(jwt()),
                                )
                                .route(
                                    "/ban-status/{username}",
                                    web::post().to(admin::ban_status::<A, T, S>).wrap(jwt()),
                                )
                                .route(
                                    "/search",
                                    web::get().to(admin::search::<A, T, S>).wrap(jwt()),
                                )
                                // Dual-gated: admin session or service token,
                                // resolved in the handler
                                .route(
                                    "/info/{username}",
                                    web::get().to(admin::admin_info::<A, T, S>),
                                )
                                .route(
                                    "/list-info",
                                    web::post().to(admin::list_info::<A, T, S>),
                                ),
                        )
                        .route("", web::post().to(register::register::<A, T, S>))
                        .route("", web::get().to(info::info::<A, T, S>).wrap(jwt()))
                        .route("", web::put().to(update::update::<A, T, S>).wrap(jwt()))
                        .route(
                            "/delete",
                            web::post().to(close::close::<A, T, S>).wrap(jwt()),
                        )
                        .route(
                            "/address",
                            web::post().to(address::add_address::<A, T, S>).wrap(jwt()),
                        )
                        .route(
                            "/address/{id}",
                            web::delete()
                                .to(address::delete_address::<A, T, S>)
                                .wrap(jwt()),
                        )
                        .route(
                            "/store",
                            web::post().to(store::add_store::<A, T, S>).wrap(jwt()),
                        )
                        .route(
                            "/store/{id}",
                            web::delete().to(store::delete_store::<A, T, S>).wrap(jwt()),
                        ),
                ),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "mercadito-account-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ServiceResponse::<()>::error(
        404,
        "Resource not found | Recurso no encontrado",
    ))
}
