//! Unit tests for the token service

use uuid::Uuid;

use crate::domain::entities::account::{Account, Role};
use crate::errors::{DomainError, TokenError};
use crate::repositories::token::{MockTokenRepository, TokenRepository};
use crate::services::token::{TokenService, TokenServiceConfig};

fn service() -> TokenService {
    TokenService::new(TokenServiceConfig::default())
}

fn account() -> Account {
    Account::new(
        "ana@x.com".to_string(),
        "ana".to_string(),
        "$2b$12$hash".to_string(),
        Role::User,
    )
}

#[test]
fn test_issue_and_verify_access_token() {
    let svc = service();
    let account_id = Uuid::new_v4();

    let pair = svc.issue_pair(account_id, Role::Business).unwrap();
    let claims = svc.verify_access_token(&pair.access_token).unwrap();

    assert_eq!(claims.account_id().unwrap(), account_id);
    assert_eq!(claims.role, Some(Role::Business));
}

#[test]
fn test_tokens_do_not_cross_verify() {
    let svc = service();
    let pair = svc.issue_pair(Uuid::new_v4(), Role::User).unwrap();

    // A refresh token must never pass as an access token or vice versa
    let err = svc.verify_access_token(&pair.refresh_token).unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::InvalidToken)));

    let err = svc.verify_refresh_token(&pair.access_token).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Token(TokenError::InvalidRefreshToken)
    ));
}

#[test]
fn test_service_token_round_trip() {
    let svc = service();
    let token = svc.issue_service_token("order").unwrap();
    let claims = svc.verify_service_token(&token).unwrap();

    assert_eq!(claims.sub, "order");
}

#[test]
fn test_service_token_rejected_as_access_token() {
    let svc = service();
    let token = svc.issue_service_token("order").unwrap();

    let err = svc.verify_access_token(&token).unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::InvalidToken)));
}

#[test]
fn test_tampered_token_is_rejected() {
    let svc = service();
    let pair = svc.issue_pair(Uuid::new_v4(), Role::User).unwrap();

    let mut tampered = pair.access_token.clone();
    tampered.push('x');

    assert!(svc.verify_access_token(&tampered).is_err());
}

#[test]
fn test_hash_token_is_deterministic() {
    let svc = service();
    let a = svc.hash_token("some-token");
    let b = svc.hash_token("some-token");
    let c = svc.hash_token("other-token");

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(a.len(), 64);
}

#[tokio::test]
async fn test_open_session_keeps_single_live_token() {
    let svc = service();
    let repo = MockTokenRepository::new();
    let account = account();

    svc.open_session(&repo, &account, "web").await.unwrap();
    svc.open_session(&repo, &account, "phone").await.unwrap();

    assert_eq!(repo.count_for_account(account.id).await, 1);
}

#[tokio::test]
async fn test_open_session_stores_hash_not_token() {
    let svc = service();
    let repo = MockTokenRepository::new();
    let account = account();

    let pair = svc.open_session(&repo, &account, "web").await.unwrap();
    let hash = svc.hash_token(&pair.refresh_token);

    let row = repo.find(account.id, &hash).await.unwrap();
    assert!(row.is_some());
    assert_ne!(row.unwrap().token_hash, pair.refresh_token);
}
