//! Gateway integration tests.
//!
//! The full application is assembled over in-memory repositories and
//! exercised with actix's test utilities, covering the HTTP concerns the
//! service-layer tests cannot see: cookies, status codes, the response
//! envelope, and the JWT middleware.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::RwLock;

use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::{test, web};
use async_trait::async_trait;
use uuid::Uuid;

use mc_api::app::create_app;
use mc_api::routes::AppState;
use mc_core::domain::entities::account::Account;
use mc_core::domain::entities::address::Address;
use mc_core::domain::entities::profile::Profile;
use mc_core::domain::entities::store::Store;
use mc_core::domain::entities::token::RefreshToken;
use mc_core::domain::value_objects::PartialAccount;
use mc_core::errors::{AccountError, DomainError};
use mc_core::repositories::{AccountRepository, StoreRepository, TokenRepository};
use mc_core::services::{AccountService, AuthService, TokenService, TokenServiceConfig};
use mc_shared::config::{CookieConfig, CorsConfig};
use mc_shared::types::pagination::Pagination;
use mc_shared::types::response::ServiceResponse as Envelope;

// ---------------------------------------------------------------------------
// In-memory repositories
// ---------------------------------------------------------------------------

#[derive(Default)]
struct InMemoryAccounts {
    accounts: RwLock<HashMap<Uuid, Account>>,
    profiles: RwLock<HashMap<Uuid, Profile>>,
    addresses: RwLock<HashMap<Uuid, Address>>,
}

#[async_trait]
impl AccountRepository for InMemoryAccounts {
    async fn create(&self, account: &Account, profile: &Profile) -> Result<(), DomainError> {
        let mut accounts = self.accounts.write().unwrap();
        if accounts.values().any(|a| a.email == account.email) {
            return Err(AccountError::EmailTaken.into());
        }
        if accounts.values().any(|a| a.username == account.username) {
            return Err(AccountError::UsernameTaken.into());
        }
        accounts.insert(account.id, account.clone());
        self.profiles
            .write()
            .unwrap()
            .insert(account.id, profile.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        Ok(self.accounts.read().unwrap().get(&id).cloned())
    }

    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().unwrap();
        let by_email = accounts.values().find(|a| a.email == identifier).cloned();
        Ok(by_email.or_else(|| accounts.values().find(|a| a.username == identifier).cloned()))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, DomainError> {
        Ok(self
            .accounts
            .read()
            .unwrap()
            .values()
            .find(|a| a.username == username)
            .cloned())
    }

    async fn update(
        &self,
        account: &Account,
        profile: Option<&Profile>,
    ) -> Result<(), DomainError> {
        self.accounts
            .write()
            .unwrap()
            .insert(account.id, account.clone());
        if let Some(profile) = profile {
            self.profiles
                .write()
                .unwrap()
                .insert(account.id, profile.clone());
        }
        Ok(())
    }

    async fn find_profile(&self, account_id: Uuid) -> Result<Option<Profile>, DomainError> {
        Ok(self.profiles.read().unwrap().get(&account_id).cloned())
    }

    async fn add_address(&self, address: &Address) -> Result<(), DomainError> {
        self.addresses
            .write()
            .unwrap()
            .insert(address.id, address.clone());
        Ok(())
    }

    async fn find_address(&self, address_id: Uuid) -> Result<Option<Address>, DomainError> {
        Ok(self.addresses.read().unwrap().get(&address_id).cloned())
    }

    async fn delete_address(&self, address_id: Uuid) -> Result<bool, DomainError> {
        Ok(self.addresses.write().unwrap().remove(&address_id).is_some())
    }

    async fn list_addresses(&self, account_id: Uuid) -> Result<Vec<Address>, DomainError> {
        Ok(self
            .addresses
            .read()
            .unwrap()
            .values()
            .filter(|a| a.belongs_to_account(account_id))
            .cloned()
            .collect())
    }

    async fn list_banned(&self, page: &Pagination) -> Result<Vec<PartialAccount>, DomainError> {
        Ok(self
            .accounts
            .read()
            .unwrap()
            .values()
            .filter(|a| a.is_banned())
            .take(page.limit as usize)
            .map(PartialAccount::from)
            .collect())
    }

    async fn list_accounts(&self, page: &Pagination) -> Result<Vec<PartialAccount>, DomainError> {
        Ok(self
            .accounts
            .read()
            .unwrap()
            .values()
            .filter(|a| !a.is_banned())
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .map(PartialAccount::from)
            .collect())
    }

    async fn search(
        &self,
        term: &str,
        page: &Pagination,
    ) -> Result<Vec<PartialAccount>, DomainError> {
        let needle = term.to_lowercase();
        Ok(self
            .accounts
            .read()
            .unwrap()
            .values()
            .filter(|a| {
                a.username.to_lowercase().contains(&needle)
                    || a.email.to_lowercase().contains(&needle)
            })
            .take(page.limit as usize)
            .map(PartialAccount::from)
            .collect())
    }

    async fn find_partials_by_ids(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<PartialAccount>, DomainError> {
        let accounts = self.accounts.read().unwrap();
        Ok(ids
            .iter()
            .filter_map(|id| accounts.get(id).map(PartialAccount::from))
            .collect())
    }
}

#[derive(Default)]
struct InMemoryTokens {
    rows: RwLock<HashMap<String, RefreshToken>>,
}

#[async_trait]
impl TokenRepository for InMemoryTokens {
    async fn save(&self, token: RefreshToken) -> Result<RefreshToken, DomainError> {
        self.rows
            .write()
            .unwrap()
            .insert(token.token_hash.clone(), token.clone());
        Ok(token)
    }

    async fn find(
        &self,
        account_id: Uuid,
        token_hash: &str,
    ) -> Result<Option<RefreshToken>, DomainError> {
        Ok(self
            .rows
            .read()
            .unwrap()
            .get(token_hash)
            .filter(|t| t.account_id == account_id)
            .cloned())
    }

    async fn delete(&self, token_hash: &str) -> Result<bool, DomainError> {
        Ok(self.rows.write().unwrap().remove(token_hash).is_some())
    }

    async fn delete_all_for_account(&self, account_id: Uuid) -> Result<usize, DomainError> {
        let mut rows = self.rows.write().unwrap();
        let before = rows.len();
        rows.retain(|_, t| t.account_id != account_id);
        Ok(before - rows.len())
    }
}

#[derive(Default)]
struct InMemoryStores {
    rows: RwLock<HashMap<Uuid, Store>>,
}

#[async_trait]
impl StoreRepository for InMemoryStores {
    async fn create(&self, store: &Store) -> Result<(), DomainError> {
        self.rows.write().unwrap().insert(store.id, store.clone());
        Ok(())
    }

    async fn find_by_id(&self, store_id: Uuid) -> Result<Option<Store>, DomainError> {
        Ok(self.rows.read().unwrap().get(&store_id).cloned())
    }

    async fn delete(&self, store_id: Uuid) -> Result<bool, DomainError> {
        Ok(self.rows.write().unwrap().remove(&store_id).is_some())
    }

    async fn list_by_account(&self, account_id: Uuid) -> Result<Vec<Store>, DomainError> {
        Ok(self
            .rows
            .read()
            .unwrap()
            .values()
            .filter(|s| s.account_id == account_id)
            .cloned()
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

type State = AppState<InMemoryAccounts, InMemoryTokens, InMemoryStores>;

// Low bcrypt cost keeps the tests fast
const BCRYPT_COST: u32 = 4;

fn build_state() -> web::Data<State> {
    let accounts = Arc::new(InMemoryAccounts::default());
    let tokens = Arc::new(InMemoryTokens::default());
    let stores = Arc::new(InMemoryStores::default());
    let token_service = Arc::new(TokenService::new(TokenServiceConfig::default()));

    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&accounts),
        Arc::clone(&tokens),
        Arc::clone(&token_service),
    ));
    let account_service = Arc::new(AccountService::new(
        accounts,
        tokens,
        stores,
        Arc::clone(&token_service),
        BCRYPT_COST,
    ));

    web::Data::new(AppState {
        account_service,
        auth_service,
        token_service,
        cookies: CookieConfig::default(),
    })
}

fn register_body(email: &str, username: &str) -> serde_json::Value {
    serde_json::json!({
        "email": email,
        "username": username,
        "password": "Secreta1!",
        "role": "user",
        "profile": {
            "kind": "user",
            "firstname": "Ana",
            "lastname": "Soto",
            "birth": null,
            "phone": null
        }
    })
}

fn admin_register_body(email: &str, username: &str) -> serde_json::Value {
    serde_json::json!({
        "email": email,
        "username": username,
        "password": "Secreta1!",
        "role": "admin",
        "profile": { "kind": "admin", "public_name": "mod-ana" }
    })
}

fn cookie_value<B>(resp: &actix_web::dev::ServiceResponse<B>, name: &str) -> Option<String> {
    resp.response()
        .cookies()
        .find(|c| c.name() == name)
        .map(|c| c.value().to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[actix_rt::test]
async fn test_health_endpoint() {
    let app = test::init_service(create_app(build_state(), &CorsConfig::default())).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
}

#[actix_rt::test]
async fn test_unknown_route_gets_envelope_404() {
    let app = test::init_service(create_app(build_state(), &CorsConfig::default())).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/nothing").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Envelope<serde_json::Value> = test::read_body_json(resp).await;
    assert!(!body.success);
    assert_eq!(body.code, Some(404));
}

#[actix_rt::test]
async fn test_register_sets_cookies_and_returns_tokens() {
    let app = test::init_service(create_app(build_state(), &CorsConfig::default())).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/account")
            .set_json(register_body("ana@mercadito.cl", "ana"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert!(cookie_value(&resp, "accessToken").is_some());
    assert!(cookie_value(&resp, "refreshToken").is_some());

    let body: Envelope<serde_json::Value> = test::read_body_json(resp).await;
    assert!(body.success);
    let data = body.data.unwrap();
    assert_eq!(data["account"]["username"], "ana");
    assert_eq!(data["account"]["role"], "user");
    assert!(!data["access_token"].as_str().unwrap().is_empty());
}

#[actix_rt::test]
async fn test_duplicate_email_is_field_specific_400() {
    let app = test::init_service(create_app(build_state(), &CorsConfig::default())).await;

    let first = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/account")
            .set_json(register_body("ana@mercadito.cl", "ana"))
            .to_request(),
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/account")
            .set_json(register_body("ana@mercadito.cl", "otra"))
            .to_request(),
    )
    .await;
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);

    let body: Envelope<serde_json::Value> = test::read_body_json(second).await;
    assert!(body.message.unwrap().to_lowercase().contains("email"));
}

#[actix_rt::test]
async fn test_login_wrong_password_is_generic_400() {
    let app = test::init_service(create_app(build_state(), &CorsConfig::default())).await;

    test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/account")
            .set_json(register_body("ana@mercadito.cl", "ana"))
            .to_request(),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(serde_json::json!({ "identifier": "ana", "password": "equivocada" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Unknown identifier answers identically
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(serde_json::json!({ "identifier": "nadie", "password": "equivocada" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_protected_route_requires_token() {
    let app = test::init_service(create_app(build_state(), &CorsConfig::default())).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/account").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_account_info_with_bearer_token() {
    let app = test::init_service(create_app(build_state(), &CorsConfig::default())).await;

    test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/account")
            .set_json(register_body("ana@mercadito.cl", "ana"))
            .to_request(),
    )
    .await;

    let login = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(serde_json::json!({ "identifier": "ana", "password": "Secreta1!" }))
            .to_request(),
    )
    .await;
    assert_eq!(login.status(), StatusCode::OK);
    let body: Envelope<serde_json::Value> = test::read_body_json(login).await;
    let access = body.data.unwrap()["access_token"]
        .as_str()
        .unwrap()
        .to_string();

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/account")
            .insert_header(("Authorization", format!("Bearer {access}")))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Envelope<serde_json::Value> = test::read_body_json(resp).await;
    let data = body.data.unwrap();
    assert_eq!(data["account"]["email"], "ana@mercadito.cl");
    assert_eq!(data["profile"]["kind"], "user");
}

#[actix_rt::test]
async fn test_refresh_rotates_and_rejects_reuse() {
    let app = test::init_service(create_app(build_state(), &CorsConfig::default())).await;

    let register = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/account")
            .set_json(register_body("ana@mercadito.cl", "ana"))
            .to_request(),
    )
    .await;
    let refresh_token = cookie_value(&register, "refreshToken").unwrap();

    let first = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/refresh")
            .cookie(Cookie::new("refreshToken", refresh_token.clone()))
            .to_request(),
    )
    .await;
    assert_eq!(first.status(), StatusCode::OK);
    let rotated = cookie_value(&first, "refreshToken").unwrap();
    assert_ne!(rotated, refresh_token);

    // The consumed token is dead
    let reuse = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/refresh")
            .cookie(Cookie::new("refreshToken", refresh_token))
            .to_request(),
    )
    .await;
    assert_eq!(reuse.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_refresh_without_cookie_is_rejected() {
    let app = test::init_service(create_app(build_state(), &CorsConfig::default())).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/refresh")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_logout_clears_cookies() {
    let app = test::init_service(create_app(build_state(), &CorsConfig::default())).await;

    let register = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/account")
            .set_json(register_body("ana@mercadito.cl", "ana"))
            .to_request(),
    )
    .await;
    let refresh_token = cookie_value(&register, "refreshToken").unwrap();

    let logout = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/logout")
            .cookie(Cookie::new("refreshToken", refresh_token.clone()))
            .to_request(),
    )
    .await;
    assert_eq!(logout.status(), StatusCode::OK);
    assert_eq!(cookie_value(&logout, "accessToken").as_deref(), Some(""));
    assert_eq!(cookie_value(&logout, "refreshToken").as_deref(), Some(""));

    // The revoked token no longer refreshes
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/refresh")
            .cookie(Cookie::new("refreshToken", refresh_token))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_admin_route_rejects_plain_user() {
    let app = test::init_service(create_app(build_state(), &CorsConfig::default())).await;

    let register = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/account")
            .set_json(register_body("ana@mercadito.cl", "ana"))
            .to_request(),
    )
    .await;
    let access = cookie_value(&register, "accessToken").unwrap();

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/account/admin/list")
            .cookie(Cookie::new("accessToken", access))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_admin_list_with_admin_session() {
    let app = test::init_service(create_app(build_state(), &CorsConfig::default())).await;

    test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/account")
            .set_json(register_body("ana@mercadito.cl", "ana"))
            .to_request(),
    )
    .await;
    let admin = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/account")
            .set_json(admin_register_body("mod@mercadito.cl", "moderadora"))
            .to_request(),
    )
    .await;
    let access = cookie_value(&admin, "accessToken").unwrap();

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/account/admin/list")
            .cookie(Cookie::new("accessToken", access))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Envelope<Vec<serde_json::Value>> = test::read_body_json(resp).await;
    assert_eq!(body.data.unwrap().len(), 2);
}

#[actix_rt::test]
async fn test_service_token_reaches_admin_info() {
    let state = build_state();
    let token_service = Arc::clone(&state.token_service);
    let app = test::init_service(create_app(state, &CorsConfig::default())).await;

    test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/account")
            .set_json(register_body("ana@mercadito.cl", "ana"))
            .to_request(),
    )
    .await;

    let service_token = token_service.issue_service_token("cart-service").unwrap();
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/account/admin/info/ana")
            .insert_header(("X-Service-Token", service_token))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Envelope<serde_json::Value> = test::read_body_json(resp).await;
    assert_eq!(body.data.unwrap()["account"]["username"], "ana");

    // A garbage service token is rejected
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/account/admin/info/ana")
            .insert_header(("X-Service-Token", "garbage"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
