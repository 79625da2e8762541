//! Token cookie construction.
//!
//! Login and refresh set both token cookies; logout replaces them with
//! removal cookies. Attributes come from `CookieConfig` so the secure flag
//! can differ between environments.

use actix_web::cookie::{time::Duration, Cookie, SameSite};

use mc_core::domain::entities::token::TokenPair;
use mc_shared::config::CookieConfig;

/// Build the access and refresh cookies for a freshly issued pair
pub fn token_cookies(
    config: &CookieConfig,
    tokens: &TokenPair,
) -> (Cookie<'static>, Cookie<'static>) {
    (
        build(
            config,
            config.access_cookie_name.clone(),
            tokens.access_token.clone(),
            tokens.access_expires_in,
        ),
        build(
            config,
            config.refresh_cookie_name.clone(),
            tokens.refresh_token.clone(),
            tokens.refresh_expires_in,
        ),
    )
}

/// Build expired cookies that clear both tokens on the client
pub fn removal_cookies(config: &CookieConfig) -> (Cookie<'static>, Cookie<'static>) {
    (
        removal(config.access_cookie_name.clone()),
        removal(config.refresh_cookie_name.clone()),
    )
}

fn build(
    config: &CookieConfig,
    name: String,
    value: String,
    max_age_secs: i64,
) -> Cookie<'static> {
    Cookie::build(name, value)
        .path("/")
        .http_only(config.http_only)
        .secure(config.secure)
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(max_age_secs))
        .finish()
}

fn removal(name: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(name, "");
    cookie.set_path("/");
    cookie.make_removal();
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> TokenPair {
        TokenPair::new("access".to_string(), "refresh".to_string(), 3600, 86400)
    }

    #[test]
    fn test_token_cookies_attributes() {
        let config = CookieConfig::default();
        let (access, refresh) = token_cookies(&config, &pair());

        assert_eq!(access.name(), "accessToken");
        assert_eq!(access.value(), "access");
        assert_eq!(access.http_only(), Some(true));
        assert_eq!(access.same_site(), Some(SameSite::Lax));
        assert_eq!(access.max_age(), Some(Duration::seconds(3600)));

        assert_eq!(refresh.name(), "refreshToken");
        assert_eq!(refresh.max_age(), Some(Duration::seconds(86400)));
    }

    #[test]
    fn test_removal_cookies_are_expired() {
        let config = CookieConfig::default();
        let (access, refresh) = removal_cookies(&config);

        assert!(access.value().is_empty());
        assert!(refresh.value().is_empty());
        assert_eq!(access.max_age(), Some(Duration::ZERO));
    }
}
