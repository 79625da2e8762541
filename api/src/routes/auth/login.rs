use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use mc_core::repositories::{AccountRepository, StoreRepository, TokenRepository};
use mc_shared::types::response::ServiceResponse;

use crate::dto::auth_dto::{AuthResponse, LoginRequest};
use crate::handlers::{cookies, error};
use crate::routes::{device_label, AppState};

/// Handler for POST /api/v1/auth/login
///
/// Authenticates with an email or username plus password. On success the
/// token pair is returned in the body and set as `accessToken` and
/// `refreshToken` cookies.
///
/// # Errors
/// - 400: unknown identifier, wrong password, or closed account (all the
///   same generic message)
/// - 403: banned account
pub async fn login<A, T, S>(
    req: HttpRequest,
    state: web::Data<AppState<A, T, S>>,
    body: web::Json<LoginRequest>,
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
    match state
        .auth_service
        .login(&body.identifier, &body.password, &device)
        .await
    {
        Ok(auth) => {
            let (access, refresh) = cookies::token_cookies(&state.cookies, &auth.tokens);
            HttpResponse::Ok()
                .cookie(access)
                .cookie(refresh)
                .json(ServiceResponse::ok(AuthResponse::from(auth)))
        }
        Err(err) => error::respond(err),
    }
}
