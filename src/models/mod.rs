//! Request, response and entity models for the gateway API
//!
//! This module defines the domain user type and the DTOs (Data Transfer
//! Objects) used for serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;
pub mod user;

// Re-export commonly used types
pub use requests::UserRequest;
pub use responses::{
    CreateResponse, DeleteResponse, ErrorResponse, HealthResponse, StatsResponse,
};
pub use user::User;
