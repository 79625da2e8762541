use actix_web::{web, HttpResponse};

use mc_core::repositories::{AccountRepository, StoreRepository, TokenRepository};
use mc_shared::types::response::ServiceResponse;

use crate::handlers::error;
use crate::middleware::auth::AuthContext;
use crate::routes::AppState;

/// Handler for GET /api/v1/account
///
/// Returns the caller's full aggregate: account, profile, addresses, and
/// stores.
pub async fn info<A, T, S>(
    auth: AuthContext,
    state: web::Data<AppState<A, T, S>>,
) -> HttpResponse
where
    A: AccountRepository + 'static,
    T: TokenRepository + 'static,
    S: StoreRepository + 'static,
{
    match state.account_service.get_info(auth.account_id).await {
        Ok(info) => HttpResponse::Ok().json(ServiceResponse::ok(info)),
        Err(err) => error::respond(err),
    }
}
