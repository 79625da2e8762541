use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use mc_core::repositories::{AccountRepository, StoreRepository, TokenRepository};
use mc_shared::types::response::ServiceResponse;

use crate::dto::account_dto::RegisterRequest;
use crate::dto::auth_dto::AuthResponse;
use crate::handlers::{cookies, error};
use crate::routes::{device_label, AppState};

/// Handler for POST /api/v1/account
///
/// Creates an account with its profile in one shot and signs the new
/// account in: the response carries a token pair and sets the token
/// cookies, so no separate login call is needed.
///
/// # Errors
/// - 400: invalid field, weak password, taken email/username/public name,
///   or a profile payload that does not match the role
pub async fn register<A, T, S>(
    req: HttpRequest,
    state: web::Data<AppState<A, T, S>>,
    body: web::Json<RegisterRequest>,
) -> HttpResponse
where
    A: AccountRepository + 'static,
    T: TokenRepository + 'static,
    S: StoreRepository + 'static,
{
    if let Err(errors) = body.validate() {
        return error::respond_validation(errors);
    }

    let device = device_label(&req);
    let request = body.into_inner().into_new_account(device);

    match state.account_service.register(request).await {
        Ok(auth) => {
            let (access, refresh) = cookies::token_cookies(&state.cookies, &auth.tokens);
            HttpResponse::Created()
                .cookie(access)
                .cookie(refresh)
                .json(ServiceResponse::ok(AuthResponse::from(auth)))
        }
        Err(err) => error::respond(err),
    }
}
