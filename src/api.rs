//! Client for the item suggestion endpoint.

use crate::config::ITEM_SUGGEST_PATH;
use crate::item::{parse_suggestions, Item};
use gloo_net::http::Request;
use log::debug;
use std::fmt;
use url::form_urlencoded;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response.
    Network(String),
    /// The server answered with a non-2xx status.
    Status(u16),
    /// The body was not a list of item records.
    Decode(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "Could not reach the item search: {}", msg),
            ApiError::Status(code) => write!(f, "Item search failed with HTTP {}", code),
            ApiError::Decode(msg) => write!(f, "Item search returned malformed data: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// Query URL for items whose name matches `filter`.
pub fn suggest_url(filter: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(filter.as_bytes()).collect();
    format!("{}?filter={}", ITEM_SUGGEST_PATH, encoded)
}

/// Fetch items matching `filter`.
pub async fn suggest_items(filter: &str) -> Result<Vec<Item>, ApiError> {
    let url = suggest_url(filter);
    debug!("GET {}", url);

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    if !response.ok() {
        return Err(ApiError::Status(response.status()));
    }

    let body = response
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    parse_suggestions(&body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_filter_text() {
        assert_eq!(suggest_url("apple"), "/item-suggest/?filter=apple");
        assert_eq!(suggest_url("iron ingot&x=1"), "/item-suggest/?filter=iron+ingot%26x%3D1");
        assert_eq!(suggest_url(""), "/item-suggest/?filter=");
    }

    #[test]
    fn errors_read_well() {
        assert_eq!(ApiError::Status(502).to_string(), "Item search failed with HTTP 502");
    }
}
