//! User entity
//!
//! The domain value served by the gateway and held by the cache.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored user record.
///
/// Values are plain copies: the cache never edits a user in place, it swaps
/// the whole record when the provider returns a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Provider-assigned identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Age in years
    pub age: i32,
    /// Whether the user hides their profile
    pub anonymous: bool,
    /// Credential hash, never sent to clients
    #[serde(skip_serializing, default)]
    pub password_hash: String,
}

impl User {
    /// Creates a user without credentials.
    pub fn new(id: Uuid, name: impl Into<String>, age: i32, anonymous: bool) -> Self {
        Self {
            id,
            name: name.into(),
            age,
            anonymous,
            password_hash: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_not_serialized() {
        let mut user = User::new(Uuid::new_v4(), "Daniel", 30, false);
        user.password_hash = "s3cr3t-hash".to_string();

        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("Daniel"));
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("s3cr3t-hash"));
    }

    #[test]
    fn test_deserialize_without_password_hash() {
        let id = Uuid::new_v4();
        let json = format!(r#"{{"id":"{}","name":"Ann","age":41,"anonymous":true}}"#, id);
        let user: User = serde_json::from_str(&json).unwrap();
        assert_eq!(user, User::new(id, "Ann", 41, true));
    }
}
