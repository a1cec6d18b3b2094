//! API Handlers
//!
//! HTTP request handlers for each gateway endpoint.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::cache::{CacheDecorator, CacheSettings};
use crate::error::{GatewayError, Result};
use crate::metrics::{GatewayMetrics, METRICS_CONTENT_TYPE};
use crate::models::{
    CreateResponse, DeleteResponse, HealthResponse, StatsResponse, User, UserRequest,
};
use crate::provider::UserProvider;

/// Application state shared across all handlers.
///
/// Holds the caching decorator, through which every user operation goes,
/// and the Prometheus metrics for this gateway instance.
#[derive(Clone)]
pub struct AppState {
    /// Cached view of the user provider
    pub users: Arc<CacheDecorator>,
    /// Response counters and cache gauges
    pub metrics: Arc<GatewayMetrics>,
}

impl AppState {
    /// Creates a new AppState around an existing decorator.
    pub fn new(users: CacheDecorator) -> Result<Self> {
        Ok(Self {
            users: Arc::new(users),
            metrics: Arc::new(GatewayMetrics::new()?),
        })
    }

    /// Creates a new AppState from configuration.
    ///
    /// Wraps `provider` in a cache decorator using the configured timings.
    pub fn from_config(
        config: &crate::config::Config,
        provider: Arc<dyn UserProvider>,
    ) -> Result<Self> {
        Self::with_settings(provider, config.cache_settings())
    }

    /// Creates a new AppState wrapping `provider` with explicit cache settings.
    pub fn with_settings(provider: Arc<dyn UserProvider>, settings: CacheSettings) -> Result<Self> {
        Self::new(CacheDecorator::new(provider, settings))
    }
}

/// Handler for GET /user/:id
///
/// Returns the user, from cache when possible.
pub async fn get_user_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>> {
    let user = state.users.get_user(&id).await?;
    Ok(Json(user))
}

/// Handler for POST /user
///
/// Validates the payload and creates a new user.
pub async fn create_user_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<UserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateResponse>)> {
    let Json(req) = payload?;
    if let Some(error_msg) = req.validate() {
        return Err(GatewayError::Validation(error_msg));
    }

    let id = state.users.create_user(req).await?;
    Ok((StatusCode::CREATED, Json(CreateResponse::new(id))))
}

/// Handler for PUT /user/:id
///
/// Validates the payload and replaces the user.
pub async fn update_user_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<UserRequest>, JsonRejection>,
) -> Result<Json<User>> {
    let Json(req) = payload?;
    if let Some(error_msg) = req.validate() {
        return Err(GatewayError::Validation(error_msg));
    }

    let user = state.users.update_user(&id, req).await?;
    Ok(Json(user))
}

/// Handler for DELETE /user/:id
///
/// Deletes the user and drops it from the cache.
pub async fn delete_user_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    state.users.delete_user(&id).await?;
    Ok(Json(DeleteResponse::new(id)))
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.users.stats().await;
    Json(StatsResponse::from(stats))
}

/// Handler for GET /metrics
///
/// Renders the Prometheus registry in the text exposition format. The cache
/// gauges are as fresh as the last collector tick.
pub async fn metrics_handler(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let body = state.metrics.render()?;
    Ok(([(header::CONTENT_TYPE, METRICS_CONTENT_TYPE)], body))
}

/// Handler for GET /health
///
/// Returns health status of the gateway.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
