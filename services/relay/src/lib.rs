use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod validate;

use config::Config;
use shared::ClientRateLimiter;
use zoom_connector::ZoomClient;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub zoom: Arc<ZoomClient>,
    pub rate_limiter: ClientRateLimiter,
    pub started_at: Instant,
}

pub fn create_app(config: Config) -> Router {
    let state = AppState {
        zoom: Arc::new(ZoomClient::new(config.zoom_api_url.clone())),
        rate_limiter: ClientRateLimiter::new(
            config.rate_limit_max_requests,
            config.rate_limit_window,
        ),
        started_at: Instant::now(),
        config,
    };

    // Only the webhook is rate limited; health and root stay open.
    let webhook_routes = Router::new()
        .route("/", post(handlers::webhook::process_webhook))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::rate_limit,
        ));

    Router::new()
        .route("/health", get(handlers::health::get_health))
        .route("/", get(handlers::health::get_root))
        .nest("/webhook", webhook_routes)
        .fallback(handlers::health::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::catch_panic_layer())
                .layer(middleware::trace_layer())
                .layer(middleware::cors_layer()),
        )
        .with_state(state)
}
