// edretain-backend/src/middleware/cors.rs
use axum::http::{header, HeaderValue, Method};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// CORS ミドルウェア設定
///
/// `*` を含む場合は全オリジンを許可する。解釈できないオリジンは警告して無視する。
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600));

    if allowed_origins.iter().any(|origin| origin == "*") {
        return base.allow_origin(Any);
    }

    base.allow_origin(AllowOrigin::list(parse_origins(allowed_origins)))
}

fn parse_origins(allowed_origins: &[String]) -> Vec<HeaderValue> {
    allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect()
}
