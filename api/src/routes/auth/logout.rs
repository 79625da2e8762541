use actix_web::{web, HttpMessage, HttpRequest, HttpResponse};
use tracing::debug;

use mc_core::repositories::{AccountRepository, StoreRepository, TokenRepository};
use mc_shared::types::response::ServiceResponse;

use crate::handlers::{cookies, error};
use crate::routes::AppState;

/// Handler for POST /api/v1/auth/logout
///
/// Revokes the caller's refresh tokens and clears both token cookies. The
/// account is identified by the refresh cookie; a request without a usable
/// cookie still clears the cookies and succeeds, so logout is idempotent.
pub async fn logout<A, T, S>(
    req: HttpRequest,
    state: web::Data<AppState<A, T, S>>,
) -> HttpResponse
where
    A: AccountRepository + 'static,
    T: TokenRepository + 'static,
    S: StoreRepository + 'static,
{
    let account_id = req
        .cookie(&state.cookies.refresh_cookie_name)
        .and_then(|cookie| {
            state
                .token_service
                .verify_refresh_token(cookie.value())
                .ok()
        })
        .and_then(|claims| claims.account_id().ok());

    if let Some(account_id) = account_id {
        if let Err(err) = state.auth_service.logout(account_id).await {
            return error::respond(err);
        }
    } else {
        debug!("logout without a verifiable refresh cookie");
    }

    let (access, refresh) = cookies::removal_cookies(&state.cookies);
    HttpResponse::Ok()
        .cookie(access)
        .cookie(refresh)
        .json(ServiceResponse::<()>::ok_message(
            "Logged out | Sesión cerrada",
        ))
}
