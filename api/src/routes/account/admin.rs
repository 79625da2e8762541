//! Moderation endpoints under /account/admin.
//!
//! All of them are admin-gated at the service layer; the gateway only
//! identifies the caller. The info endpoints additionally accept signed
//! service tokens so sibling services can resolve accounts without an
//! admin session.

use actix_web::{web, HttpRequest, HttpResponse};

use mc_core::domain::value_objects::Actor;
use mc_core::errors::{DomainError, TokenError};
use mc_core::repositories::{AccountRepository, StoreRepository, TokenRepository};
use mc_shared::types::pagination::Pagination;
use mc_shared::types::response::ServiceResponse;

use crate::dto::account_dto::{BannedListQuery, ListInfoRequest, ListQuery, SearchQuery};
use crate::handlers::error;
use crate::middleware::auth::{extract_access_token, AuthContext, ServiceToken};
use crate::routes::AppState;

/// Handler for GET /api/v1/account/admin/list
///
/// Paginated listing of non-banned accounts, oldest first.
pub async fn list<A, T, S>(
    auth: AuthContext,
    state: web::Data<AppState<A, T, S>>,
    query: web::Query<ListQuery>,
) -> HttpResponse
where
    A: AccountRepository + 'static,
    T: TokenRepository + 'static,
    S: StoreRepository + 'static,
{
    let page = Pagination::from_query(query.offset, query.limit);
    match state
        .account_service
        .account_list(auth.account_id, page)
        .await
    {
        Ok(accounts) => HttpResponse::Ok().json(ServiceResponse::ok(accounts)),
        Err(err) => error::respond(err),
    }
}

/// Handler for GET /api/v1/account/admin/banned-list
///
/// Banned accounts only, most recently suspended first.
pub async fn banned_list<A, T, S>(
    auth: AuthContext,
    state: web::Data<AppState<A, T, S>>,
    query: web::Query<BannedListQuery>,
) -> HttpResponse
where
    A: AccountRepository + 'static,
    T: TokenRepository + 'static,
    S: StoreRepository + 'static,
{
    match state
        .account_service
        .banned_list(auth.account_id, query.limit)
        .await
    {
        Ok(accounts) => HttpResponse::Ok().json(ServiceResponse::ok(accounts)),
        Err(err) => error::respond(err),
    }
}

/// Handler for POST /api/v1/account/admin/ban-status/{username}
///
/// Toggles the target between active and banned and answers with the new
/// status. Closed accounts are left untouched.
pub async fn ban_status<A, T, S>(
    auth: AuthContext,
    state: web::Data<AppState<A, T, S>>,
    path: web::Path<String>,
) -> HttpResponse
where
    A: AccountRepository + 'static,
    T: TokenRepository + 'static,
    S: StoreRepository + 'static,
{
    match state
        .account_service
        .set_banned(auth.account_id, &path.into_inner())
        .await
    {
        Ok(status) => HttpResponse::Ok().json(ServiceResponse::ok(status)),
        Err(err) => error::respond(err),
    }
}

/// Handler for GET /api/v1/account/admin/search?term=
///
/// Substring search over usernames, emails, and profile text. Unlike the
/// listing, results include banned accounts.
pub async fn search<A, T, S>(
    auth: AuthContext,
    state: web::Data<AppState<A, T, S>>,
    query: web::Query<SearchQuery>,
) -> HttpResponse
where
    A: AccountRepository + 'static,
    T: TokenRepository + 'static,
    S: StoreRepository + 'static,
{
    match state
        .account_service
        .search(auth.account_id, &query.term)
        .await
    {
        Ok(accounts) => HttpResponse::Ok().json(ServiceResponse::ok(accounts)),
        Err(err) => error::respond(err),
    }
}

/// Handler for GET /api/v1/account/admin/info/{username}
///
/// Full aggregate for another account. Accessible to admin sessions and to
/// sibling services presenting a signed service token.
pub async fn admin_info<A, T, S>(
    req: HttpRequest,
    service_token: ServiceToken,
    state: web::Data<AppState<A, T, S>>,
    path: web::Path<String>,
) -> HttpResponse
where
    A: AccountRepository + 'static,
    T: TokenRepository + 'static,
    S: StoreRepository + 'static,
{
    let actor = match resolve_actor(&req, &service_token, &state) {
        Ok(actor) => actor,
        Err(err) => return error::respond(err),
    };

    match state
        .account_service
        .get_account_info(actor, &path.into_inner())
        .await
    {
        Ok(info) => HttpResponse::Ok().json(ServiceResponse::ok(info)),
        Err(err) => error::respond(err),
    }
}

/// Handler for POST /api/v1/account/admin/list-info
///
/// Bulk partial views by ID; unknown IDs are skipped. Same dual gate as
/// the info endpoint.
pub async fn list_info<A, T, S>(
    req: HttpRequest,
    service_token: ServiceToken,
    state: web::Data<AppState<A, T, S>>,
    body: web::Json<ListInfoRequest>,
) -> HttpResponse
where
    A: AccountRepository + 'static,
    T: TokenRepository + 'static,
    S: StoreRepository + 'static,
{
    let actor = match resolve_actor(&req, &service_token, &state) {
        Ok(actor) => actor,
        Err(err) => return error::respond(err),
    };

    match state
        .account_service
        .get_account_list_info(actor, &body.ids)
        .await
    {
        Ok(accounts) => HttpResponse::Ok().json(ServiceResponse::ok(accounts)),
        Err(err) => error::respond(err),
    }
}

/// Identify the caller: a service token wins, otherwise the access token
fn resolve_actor<A, T, S>(
    req: &HttpRequest,
    service_token: &ServiceToken,
    state: &AppState<A, T, S>,
) -> Result<Actor, DomainError>
where
    A: AccountRepository,
    T: TokenRepository,
    S: StoreRepository,
{
    if let Some(raw) = &service_token.0 {
        let claims = state.token_service.verify_service_token(raw)?;
        return Ok(Actor::Service(claims.sub));
    }

    let token = extract_access_token(req, &state.cookies.access_cookie_name)
        .ok_or(TokenError::InvalidToken)?;
    let claims = state.token_service.verify_access_token(&token)?;
    let account_id = claims
        .account_id()
        .map_err(|_| TokenError::InvalidToken)?;
    Ok(Actor::Account(account_id))
}
