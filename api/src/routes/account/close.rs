use actix_web::{web, HttpResponse};
use validator::Validate;

use mc_core::repositories::{AccountRepository, StoreRepository, TokenRepository};
use mc_shared::types::response::ServiceResponse;

use crate::dto::account_dto::CloseAccountRequest;
use crate::handlers::{cookies, error};
use crate::middleware::auth::AuthContext;
use crate::routes::AppState;

/// Handler for POST /api/v1/account/delete
///
/// Closes the caller's account after re-confirming the password. The row is
/// kept with status `closed`; all sessions are revoked and the token
/// cookies are cleared.
///
/// # Errors
/// - 400: wrong password
pub async fn close<A, T, S>(
    auth: AuthContext,
    state: web::Data<AppState<A, T, S>>,
    body: web::Json<CloseAccountRequest>,
) -> HttpResponse
where
    A: AccountRepository + 'static,
    T: TokenRepository + 'static,
    S: StoreRepository + 'static,
{
    if let Err(errors) = body.validate() {
        return error::respond_validation(errors);
    }

    match state
        .account_service
        .close_account(auth.account_id, &body.password)
        .await
    {
        Ok(()) => {
            let (access, refresh) = cookies::removal_cookies(&state.cookies);
            HttpResponse::Ok()
                .cookie(access)
                .cookie(refresh)
                .json(ServiceResponse::<()>::ok_message(
                    "Account closed | Cuenta cerrada",
                ))
        }
        Err(err) => error::respond(err),
    }
}
