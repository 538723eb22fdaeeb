use http::{Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};
use vocalis_config::CorsConfig;

/// Build a Tower CORS layer for the browser client
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let layer = if config.allows_any_origin() {
        layer.allow_origin(AllowOrigin::any())
    } else {
        let origins: Vec<_> = config.origins.iter().filter_map(|o| o.parse().ok()).collect();
        layer.allow_origin(origins)
    };

    match config.max_age_duration() {
        Some(duration) => layer.max_age(duration),
        None => layer,
    }
}
