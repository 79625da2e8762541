//! Unit tests for the mock token repository

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::token::{RefreshToken, REFRESH_TOKEN_EXPIRY_SECS};
use crate::repositories::token::{MockTokenRepository, TokenRepository};

fn token_for(account_id: Uuid, hash: &str) -> RefreshToken {
    RefreshToken::new(
        account_id,
        hash.to_string(),
        "web".to_string(),
        REFRESH_TOKEN_EXPIRY_SECS,
    )
}

#[tokio::test]
async fn test_save_and_find() {
    let repo = MockTokenRepository::new();
    let account_id = Uuid::new_v4();

    repo.save(token_for(account_id, "hash_a")).await.unwrap();

    let found = repo.find(account_id, "hash_a").await.unwrap();
    assert!(found.is_some());
    assert_eq!(found.unwrap().account_id, account_id);
}

#[tokio::test]
async fn test_find_requires_matching_account() {
    let repo = MockTokenRepository::new();
    let account_id = Uuid::new_v4();

    repo.save(token_for(account_id, "hash_a")).await.unwrap();

    let other = Uuid::new_v4();
    assert!(repo.find(other, "hash_a").await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let repo = MockTokenRepository::new();
    let account_id = Uuid::new_v4();

    repo.save(token_for(account_id, "hash_a")).await.unwrap();

    assert!(repo.delete("hash_a").await.unwrap());
    assert!(!repo.delete("hash_a").await.unwrap());
}

#[tokio::test]
async fn test_delete_all_for_account_only_touches_that_account() {
    let repo = MockTokenRepository::new();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    repo.save(token_for(alice, "hash_a1")).await.unwrap();
    repo.save(token_for(alice, "hash_a2")).await.unwrap();
    repo.save(token_for(bob, "hash_b")).await.unwrap();

    let deleted = repo.delete_all_for_account(alice).await.unwrap();
    assert_eq!(deleted, 2);
    assert_eq!(repo.count_for_account(alice).await, 0);
    assert_eq!(repo.count_for_account(bob).await, 1);
}

#[tokio::test]
async fn test_expired_row_is_still_findable() {
    // Expiry handling is the service's job; the repository returns the row
    // so the service can delete it and report the expiry distinctly.
    let repo = MockTokenRepository::new();
    let account_id = Uuid::new_v4();

    let mut token = token_for(account_id, "hash_old");
    token.expires_at = Utc::now() - Duration::hours(1);
    repo.save(token).await.unwrap();

    let found = repo.find(account_id, "hash_old").await.unwrap().unwrap();
    assert!(found.is_expired());
}
