//! In-memory user repository
//!
//! A [`UserProvider`] backed by a locked map. Stands in for the relational
//! store when running the gateway locally and in tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::UserProvider;
use crate::error::{GatewayError, Result};
use crate::models::{User, UserRequest};

/// User storage keyed by the textual form of each user's UUID.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored users.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// Returns true if no users are stored.
    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserProvider for InMemoryUserRepository {
    async fn get_user(&self, id: &str) -> Result<User> {
        self.users
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| GatewayError::NotFound(id.to_string()))
    }

    async fn create_user(&self, req: UserRequest) -> Result<Uuid> {
        if let Some(msg) = req.validate() {
            return Err(GatewayError::Validation(msg));
        }

        let id = Uuid::new_v4();
        let user = User::new(id, req.name, req.age, req.anonymous);
        self.users.write().await.insert(id.to_string(), user);
        debug!(%id, "user inserted");
        Ok(id)
    }

    async fn update_user(&self, id: &str, req: UserRequest) -> Result<User> {
        if let Some(msg) = req.validate() {
            return Err(GatewayError::Validation(msg));
        }

        let mut users = self.users.write().await;
        let user = users
            .get_mut(id)
            .ok_or_else(|| GatewayError::NotFound(id.to_string()))?;
        user.name = req.name;
        user.age = req.age;
        user.anonymous = req.anonymous;
        Ok(user.clone())
    }

    async fn delete_user(&self, id: &str) -> Result<()> {
        match self.users.write().await.remove(id) {
            Some(_) => Ok(()),
            None => Err(GatewayError::NotFound(id.to_string())),
        }
    }
}
