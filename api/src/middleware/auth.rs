//! JWT authentication middleware.
//!
//! Protected routes are wrapped with [`JwtAuth`], which accepts the access
//! token from either the `Authorization: Bearer` header or the access-token
//! cookie, verifies it, and injects an [`AuthContext`] into the request
//! extensions. Handlers pull the context back out with the `FromRequest`
//! extractor.
//!
//! Internal callers authenticate differently: they present a signed service
//! token in the `X-Service-Token` header, surfaced to handlers through the
//! [`ServiceToken`] extractor and verified against the service secret at
//! the handler level.

use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;
use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::error::InternalError;
use actix_web::http::header::AUTHORIZATION;
use actix_web::http::StatusCode;
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest, HttpResponse};
use futures_util::future::LocalBoxFuture;
use uuid::Uuid;

use mc_core::domain::entities::account::Role;
use mc_core::domain::entities::token::Claims;
use mc_core::errors::{DomainError, TokenError};
use mc_core::services::TokenService;
use mc_shared::types::response::ServiceResponse as Envelope;

/// Header carrying signed inter-service tokens
pub const SERVICE_TOKEN_HEADER: &str = "x-service-token";

/// Authenticated caller context injected by [`JwtAuth`]
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Account ID from the token subject
    pub account_id: Uuid,
    /// Role claim carried by the access token
    pub role: Role,
    /// JWT ID, for audit logging
    pub jti: String,
}

impl AuthContext {
    /// Build the context from verified access-token claims
    pub fn from_claims(claims: Claims) -> Result<Self, DomainError> {
        let account_id = claims
            .account_id()
            .map_err(|_| TokenError::InvalidToken)?;
        let role = claims.role.ok_or(TokenError::InvalidToken)?;
        Ok(Self {
            account_id,
            role,
            jti: claims.jti,
        })
    }
}

impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| unauthorized(TokenError::InvalidToken.into()));
        ready(result)
    }
}

/// Raw service token from the `X-Service-Token` header, if present.
///
/// Extraction never fails; verification happens in the handler where the
/// `TokenService` is at hand.
pub struct ServiceToken(pub Option<String>);

impl FromRequest for ServiceToken {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let token = req
            .headers()
            .get(SERVICE_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());
        ready(Ok(ServiceToken(token)))
    }
}

/// Pull the access token from the bearer header or the token cookie.
///
/// The header wins when both are present.
pub fn extract_access_token(msg: &HttpRequest, cookie_name: &str) -> Option<String> {
    let bearer = msg
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|s| s.to_string());

    bearer.or_else(|| msg.cookie(cookie_name).map(|c| c.value().to_string()))
}

/// JWT authentication middleware factory
pub struct JwtAuth {
    token_service: Arc<TokenService>,
    access_cookie: String,
}

impl JwtAuth {
    /// Create the middleware around the shared token service
    pub fn new(token_service: Arc<TokenService>, access_cookie: impl Into<String>) -> Self {
        Self {
            token_service,
            access_cookie: access_cookie.into(),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            token_service: Arc::clone(&self.token_service),
            access_cookie: self.access_cookie.clone(),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    token_service: Arc<TokenService>,
    access_cookie: String,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        let verified = extract_access_token(req.request(), &self.access_cookie)
            .ok_or_else(|| DomainError::from(TokenError::InvalidToken))
            .and_then(|token| self.token_service.verify_access_token(&token))
            .and_then(AuthContext::from_claims);

        Box::pin(async move {
            match verified {
                Ok(context) => {
                    req.extensions_mut().insert(context);
                    service
                        .call(req)
                        .await
                        .map(|res| res.map_into_left_body())
                }
                Err(err) => {
                    let response = HttpResponse::from_error(unauthorized(err));
                    Ok(req.into_response(response.map_into_right_body()))
                }
            }
        })
    }
}

/// Wrap an authentication failure in the uniform error envelope
fn unauthorized(err: DomainError) -> Error {
    let code = err.code();
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::UNAUTHORIZED);
    let envelope: Envelope<()> = Envelope::error(code, err.to_string());
    InternalError::from_response(err, HttpResponse::build(status).json(envelope)).into()
}
