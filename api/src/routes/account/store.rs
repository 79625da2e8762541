use actix_web::{web, HttpResponse};
use uuid::Uuid;

use mc_core::domain::value_objects::NewStore;
use mc_core::repositories::{AccountRepository, StoreRepository, TokenRepository};
use mc_shared::types::response::ServiceResponse;

use crate::handlers::error;
use crate::middleware::auth::AuthContext;
use crate::routes::AppState;

/// Handler for POST /api/v1/account/store
///
/// Creates a store with its address in one step. New stores start
/// unverified.
pub async fn add_store<A, T, S>(
    auth: AuthContext,
    state: web::Data<AppState<A, T, S>>,
    body: web::Json<NewStore>,
) -> HttpResponse
where
    A: AccountRepository + 'static,
    T: TokenRepository + 'static,
    S: StoreRepository + 'static,
{
    match state
        .account_service
        .add_store(auth.account_id, body.into_inner())
        .await
    {
        Ok(store) => HttpResponse::Created().json(ServiceResponse::ok(store)),
        Err(err) => error::respond(err),
    }
}

/// Handler for DELETE /api/v1/account/store/{id}
pub async fn delete_store<A, T, S>(
    auth: AuthContext,
    state: web::Data<AppState<A, T, S>>,
    path: web::Path<Uuid>,
) -> HttpResponse
where
    A: AccountRepository + 'static,
    T: TokenRepository + 'static,
    S: StoreRepository + 'static,
{
    match state
        .account_service
        .delete_store(auth.account_id, path.into_inner())
        .await
    {
        Ok(()) => HttpResponse::Ok().json(ServiceResponse::<()>::ok_message(
            "Store deleted | Tienda eliminada",
        )),
        Err(err) => error::respond(err),
    }
}
