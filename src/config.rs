use std::env;
use std::time::Duration;

/// Reverse proxy origin used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const CUSTOMER_API: &str = "/customers/";
pub const PRODUCT_API: &str = "/products/";
pub const ORDER_API: &str = "/orders/";

pub const BASE_URL_ENV: &str = "STOREFRONT_BASE_URL";
pub const TIMEOUT_ENV: &str = "STOREFRONT_TIMEOUT_SECS";

/// Read the base URL from `STOREFRONT_BASE_URL`, if set and non-blank.
pub fn base_url_from_env() -> Option<String> {
    env::var(BASE_URL_ENV)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Read the request timeout (whole seconds) from `STOREFRONT_TIMEOUT_SECS`.
///
/// Unparsable or zero values are ignored so a typo falls back to the default.
pub fn timeout_from_env() -> Option<Duration> {
    let raw = env::var(TIMEOUT_ENV).ok()?;
    parse_timeout_secs(&raw)
}

/// Parse a whole-second timeout. `None`, with a warning, for anything that
/// is not a positive integer.
pub fn parse_timeout_secs(raw: &str) -> Option<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(0) => {
            tracing::warn!(value = %raw, "ignoring zero {}", TIMEOUT_ENV);
            None
        }
        Ok(secs) => Some(Duration::from_secs(secs)),
        Err(e) => {
            tracing::warn!(value = %raw, error = %e, "ignoring invalid {}", TIMEOUT_ENV);
            None
        }
    }
}

/// Path of a single record under a collection path, e.g. `/products/7`.
pub fn item_path(collection: &str, id: i64) -> String {
    format!("{}{}", collection, id)
}
