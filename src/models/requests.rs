//! Request DTOs for the gateway API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

/// Minimum accepted length of a user name, in characters
pub const MIN_NAME_LENGTH: usize = 2;

/// Request body for creating (POST /user) or replacing (PUT /user/:id) a user
///
/// # Fields
/// - `name`: Display name, at least two characters
/// - `age`: Age in years, required and non-negative
/// - `anonymous`: Optional flag, defaults to false
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserRequest {
    /// Display name
    pub name: String,
    /// Age in years
    pub age: i32,
    /// Whether the profile is hidden
    #[serde(default)]
    pub anonymous: bool,
}

impl UserRequest {
    /// Creates a new request
    pub fn new(name: impl Into<String>, age: i32, anonymous: bool) -> Self {
        Self {
            name: name.into(),
            age,
            anonymous,
        }
    }

    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.name.trim().is_empty() {
            return Some("Name cannot be empty".to_string());
        }
        if self.name.chars().count() < MIN_NAME_LENGTH {
            return Some(format!(
                "Name must be at least {} characters",
                MIN_NAME_LENGTH
            ));
        }
        if self.age == 0 {
            return Some("Age is required".to_string());
        }
        if self.age < 0 {
            return Some("Age cannot be negative".to_string());
        }
        None
    }
}
