use std::sync::Arc;

use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{AppConfig, SecurityConfig, UpstreamConfig};
use crate::handlers;
use crate::track::{http_client, TrackError};

/// Immutable per-process state shared by every request
#[derive(Debug, Clone)]
pub struct AppState {
    pub upstream: UpstreamConfig,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> Result<Self, TrackError> {
        Ok(Self {
            upstream: config.upstream.clone(),
            http: http_client(&config.upstream)?,
        })
    }
}

pub fn router(config: &AppConfig, state: AppState) -> Router {
    let app = Router::new()
        // Public
        .route("/", get(handlers::public::root))
        .route("/health", get(handlers::public::health))
        // Track PMS proxy
        .merge(track_routes())
        .with_state(Arc::new(state));

    // Global middleware
    let app = match cors_layer(&config.security) {
        Some(cors) => app.layer(cors),
        None => app,
    };
    app.layer(TraceLayer::new_for_http())
}

fn track_routes() -> Router<Arc<AppState>> {
    use handlers::track;

    Router::new().route("/track/listings", post(track::listings_post))
}

fn cors_layer(security: &SecurityConfig) -> Option<CorsLayer> {
    if !security.enable_cors {
        return None;
    }

    if security.cors_origins.is_empty() {
        return Some(CorsLayer::permissive());
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any),
    )
}
