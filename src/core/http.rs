//! HTTP utilities for the league's hosted functions

use crate::Result;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION};

/// Header the hosted function gateway reads the anon key from.
pub const API_KEY_HEADER: &str = "apikey";

/// Build request headers, adding `Authorization` and `apikey` when a key is set.
///
/// Without a key only `Accept` is sent (local function emulator).
pub fn auth_header_map(api_key: Option<&str>) -> Result<HeaderMap> {
    let mut h = HeaderMap::new();
    h.insert(ACCEPT, HeaderValue::from_static("application/json"));
    if let Some(key) = api_key.map(str::trim).filter(|k| !k.is_empty()) {
        h.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", key))?,
        );
        h.insert(
            HeaderName::from_static(API_KEY_HEADER),
            HeaderValue::from_str(key)?,
        );
    }
    Ok(h)
}

/// True when a response declares a JSON body.
pub fn is_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_ascii_lowercase().contains("application/json"))
        .unwrap_or(false)
}
