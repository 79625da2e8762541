use actix_web::{web, HttpMessage, HttpRequest, HttpResponse};

use mc_core::errors::TokenError;
use mc_core::repositories::{AccountRepository, StoreRepository, TokenRepository};
use mc_shared::types::response::ServiceResponse;

use crate::dto::auth_dto::AuthResponse;
use crate::handlers::{cookies, error};
use crate::routes::{device_label, AppState};

/// Handler for POST /api/v1/auth/refresh
///
/// Exchanges the refresh-token cookie for a fresh pair. Refresh tokens are
/// single-use; the presented one is consumed whether or not a new pair is
/// issued.
///
/// # Errors
/// - 400: missing, invalid, or expired refresh token
/// - 403: account banned since the token was issued
pub async fn refresh<A, T, S>(
    req: HttpRequest,
    state: web::Data<AppState<A, T, S>>,
) -> HttpResponse
where
    A: AccountRepository + 'static,
    T: TokenRepository + 'static,
    S: StoreRepository + 'static,
{
    let Some(cookie) = req.cookie(&state.cookies.refresh_cookie_name) else {
        return error::respond(TokenError::InvalidRefreshToken.into());
    };

    let device = device_label(&req);
    match state.auth_service.refresh(cookie.value(), &device).await {
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
