//! Configuration: defaults, timeout parsing and environment overrides.

use std::env;
use std::time::Duration;

use storefront_sdk::config::{self, BASE_URL_ENV, TIMEOUT_ENV};
use storefront_sdk::{StorefrontClient, StorefrontClientBuilder};

// ---------------------------------------------------------------------------
// Timeout parsing
// ---------------------------------------------------------------------------

#[test]
fn parse_timeout_accepts_positive_seconds() {
    assert_eq!(config::parse_timeout_secs("12"), Some(Duration::from_secs(12)));
    assert_eq!(config::parse_timeout_secs(" 5 "), Some(Duration::from_secs(5)));
}

#[test]
fn parse_timeout_rejects_zero() {
    assert_eq!(config::parse_timeout_secs("0"), None);
    assert_eq!(config::parse_timeout_secs(" 0"), None);
}

#[test]
fn parse_timeout_rejects_garbage() {
    assert_eq!(config::parse_timeout_secs("ten"), None);
    assert_eq!(config::parse_timeout_secs("-3"), None);
    assert_eq!(config::parse_timeout_secs("1.5"), None);
    assert_eq!(config::parse_timeout_secs(""), None);
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

#[test]
fn builder_defaults() {
    let client = StorefrontClient::builder().build().unwrap();
    assert_eq!(client.base_url(), config::DEFAULT_BASE_URL);
    assert_eq!(client.timeout(), config::DEFAULT_TIMEOUT);
    assert!(!client.includes_purchase_prices());
}

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

fn from_env() -> StorefrontClient {
    StorefrontClientBuilder::from_env().build().unwrap()
}

/// All environment mutation lives in this one test so nothing else in the
/// binary observes a half-set environment.
#[test]
fn from_env_overrides() {
    // Set
    env::set_var(BASE_URL_ENV, "http://shop.internal:8080/");
    env::set_var(TIMEOUT_ENV, "12");
    let client = from_env();
    assert_eq!(client.base_url(), "http://shop.internal:8080");
    assert_eq!(client.timeout(), Duration::from_secs(12));
    assert_eq!(config::base_url_from_env().as_deref(), Some("http://shop.internal:8080/"));

    // Blank URL and unparsable timeout fall back to defaults
    env::set_var(BASE_URL_ENV, "   ");
    env::set_var(TIMEOUT_ENV, "soon");
    let client = from_env();
    assert_eq!(config::base_url_from_env(), None);
    assert_eq!(config::timeout_from_env(), None);
    assert_eq!(client.base_url(), config::DEFAULT_BASE_URL);
    assert_eq!(client.timeout(), config::DEFAULT_TIMEOUT);

    // Zero timeout is treated as invalid
    env::set_var(TIMEOUT_ENV, "0");
    assert_eq!(config::timeout_from_env(), None);
    assert_eq!(from_env().timeout(), config::DEFAULT_TIMEOUT);

    // Explicit builder calls still win over the environment
    env::set_var(BASE_URL_ENV, "http://shop.internal:8080");
    env::set_var(TIMEOUT_ENV, "12");
    let client = StorefrontClientBuilder::from_env()
        .base_url("http://other:9000")
        .timeout(Duration::from_secs(3))
        .build()
        .unwrap();
    assert_eq!(client.base_url(), "http://other:9000");
    assert_eq!(client.timeout(), Duration::from_secs(3));

    // Unset
    env::remove_var(BASE_URL_ENV);
    env::remove_var(TIMEOUT_ENV);
    let client = from_env();
    assert_eq!(client.base_url(), config::DEFAULT_BASE_URL);
    assert_eq!(client.timeout(), config::DEFAULT_TIMEOUT);
}
