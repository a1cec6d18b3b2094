//! HTTP routing for the user gateway.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_user_handler, delete_user_handler, get_user_handler, health_handler, metrics_handler,
    stats_handler, update_user_handler, AppState,
};
use super::middleware::track_responses;

/// Builds the gateway router.
///
/// User CRUD lives under `/user`; `/stats` reports cache accounting as JSON,
/// `/metrics` exposes the Prometheus registry and `/health` is a liveness
/// check. Every response is counted into `http_responses_total`, and every
/// request passes through a permissive CORS layer and `TraceLayer`.
pub fn create_router(state: AppState) -> Router {
    let metrics = state.metrics.clone();

    let user_routes = Router::new()
        .route("/user", post(create_user_handler))
        .route(
            "/user/:id",
            get(get_user_handler)
                .put(update_user_handler)
                .delete(delete_user_handler),
        );

    Router::new()
        .merge(user_routes)
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .layer(middleware::from_fn_with_state(metrics, track_responses))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
