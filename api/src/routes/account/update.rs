use actix_web::{web, HttpResponse};

use mc_core::repositories::{AccountRepository, StoreRepository, TokenRepository};
use mc_shared::types::response::ServiceResponse;

use crate::dto::account_dto::UpdateAccountRequest;
use crate::handlers::error;
use crate::middleware::auth::AuthContext;
use crate::routes::AppState;

/// Handler for PUT /api/v1/account
///
/// Partial update of the caller's account and profile. Absent fields are
/// left alone; for the nullable birth date, an explicit `"birth": "clear"`
/// removes the value.
///
/// # Errors
/// - 400: empty patch, invalid field, or a profile patch for the wrong
///   role group
/// - 409: the account's profile row is missing (desync, contact support)
pub async fn update<A, T, S>(
    auth: AuthContext,
    state: web::Data<AppState<A, T, S>>,
    body: web::Json<UpdateAccountRequest>,
) -> HttpResponse
where
    A: AccountRepository + 'static,
    T: TokenRepository + 'static,
    S: StoreRepository + 'static,
{
    let (account_patch, profile_patch) = body.into_inner().into_patches();

    match state
        .account_service
        .update_account(auth.account_id, account_patch, profile_patch)
        .await
    {
        Ok(info) => HttpResponse::Ok().json(ServiceResponse::ok(info)),
        Err(err) => error::respond(err),
    }
}
