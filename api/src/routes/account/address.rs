use actix_web::{web, HttpResponse};
use uuid::Uuid;

use mc_core::domain::value_objects::NewAddress;
use mc_core::repositories::{AccountRepository, StoreRepository, TokenRepository};
use mc_shared::types::response::ServiceResponse;

use crate::handlers::error;
use crate::middleware::auth::AuthContext;
use crate::routes::AppState;

/// Handler for POST /api/v1/account/address
pub async fn add_address<A, T, S>(
    auth: AuthContext,
    state: web::Data<AppState<A, T, S>>,
    body: web::Json<NewAddress>,
) -> HttpResponse
where
    A: AccountRepository + 'static,
    T: TokenRepository + 'static,
    S: StoreRepository + 'static,
{
    match state
        .account_service
        .add_address(auth.account_id, body.into_inner())
        .await
    {
        Ok(address) => HttpResponse::Created().json(ServiceResponse::ok(address)),
        Err(err) => error::respond(err),
    }
}

/// Handler for DELETE /api/v1/account/address/{id}
///
/// An address owned by another account answers 404, the same as a missing
/// one.
pub async fn delete_address<A, T, S>(
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
        .delete_address(auth.account_id, path.into_inner())
        .await
    {
        Ok(()) => HttpResponse::Ok().json(ServiceResponse::<()>::ok_message(
            "Address deleted | Dirección eliminada",
        )),
        Err(err) => error::respond(err),
    }
}
