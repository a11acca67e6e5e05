//! CORS layer.

use axum::http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, COOKIE};
use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};

const METHODS: [Method; 5] = [
    Method::GET,
    Method::POST,
    Method::PATCH,
    Method::DELETE,
    Method::OPTIONS,
];

/// Build the CORS layer for the configured origins.
///
/// With no usable origin every origin is allowed but credentials are not, so
/// the `remember_token` cookie only crosses origins that are listed.
pub fn create_cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if allowed.is_empty() {
        return CorsLayer::new()
            .allow_methods(METHODS)
            .allow_headers(Any)
            .allow_origin(Any);
    }

    CorsLayer::new()
        .allow_methods(METHODS)
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT, COOKIE])
        .allow_credentials(true)
        .allow_origin(allowed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_origin_layer() {
        let _layer = create_cors_layer(&[]);
    }

    #[test]
    fn test_listed_origins_layer() {
        let _layer = create_cors_layer(&["http://localhost:5173".to_string()]);
    }

    #[test]
    fn test_unparsable_origins_fall_back() {
        let _layer = create_cors_layer(&["bad\norigin".to_string()]);
    }
}
