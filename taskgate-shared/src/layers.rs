/// Tower layers shared by the service routers

use axum::http::{header, HeaderValue, Method};
use std::time::Duration;
use tower_http::cors::CorsLayer;

/// Builds the CORS layer from configured origins
///
/// `*` anywhere in the list switches to a permissive policy (development
/// mode). Otherwise only the listed origins are allowed; unparsable entries
/// are skipped.
///
/// # Example
///
/// ```
/// use taskgate_shared::layers::cors_layer;
///
/// let dev = cors_layer(&["*".to_string()]);
/// let prod = cors_layer(&["https://app.example.com".to_string()]);
/// ```
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}

/// Parses a comma separated `CORS_ORIGINS` value
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
