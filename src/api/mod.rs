//! REST API module using Axum
//!
//! Exposes the complaint pipeline over HTTP. Errors share the JSON envelope
//! in [`envelope`]; records are returned as-is.

pub mod envelope;
pub mod handlers;
mod routes;

pub use handlers::ApiState;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the CORS layer.
///
/// An empty `origins` list allows any origin. Entries that are not valid
/// header values are logged and skipped.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    if origins.is_empty() {
        return base.allow_origin(Any);
    }

    let mut allowed: Vec<HeaderValue> = Vec::with_capacity(origins.len());
    for origin in origins {
        match origin.trim().parse::<HeaderValue>() {
            Ok(value) => allowed.push(value),
            Err(e) => tracing::warn!(origin = %origin, error = %e, "CORS: ignoring invalid origin"),
        }
    }

    if allowed.is_empty() {
        tracing::warn!("CORS: no valid origins configured, cross-origin requests will be blocked");
    } else {
        tracing::info!(origins = ?origins, "CORS: allowing configured origins");
    }
    base.allow_origin(allowed)
}

/// Create the complete application router.
///
/// `cors_origins` comes from `ServerConfig::cors_origins`.
pub fn create_app(state: ApiState, cors_origins: &[String]) -> Router {
    Router::new()
        .nest("/api", routes::api_routes(state.clone()))
        .merge(routes::health_routes(state))
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(cors_origins))
}
