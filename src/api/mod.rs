//! API Module
//!
//! HTTP handlers and routing for the user gateway REST API.
//!
//! # Endpoints
//! - `GET /user/:id` - Fetch a user
//! - `POST /user` - Create a user
//! - `PUT /user/:id` - Replace a user
//! - `DELETE /user/:id` - Delete a user
//! - `GET /stats` - Get cache statistics
//! - `GET /metrics` - Prometheus metrics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
