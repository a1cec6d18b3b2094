//! Provider Module
//!
//! The persistence contract the gateway is built on. Anything that can
//! create, read, update and delete users implements [`UserProvider`]; the
//! cache decorator implements it too so it can be stacked transparently.

mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{User, UserRequest};

pub use memory::InMemoryUserRepository;

/// Durable create/read/update/delete for user records.
///
/// Identifiers are opaque, case-sensitive strings. Errors are reported as
/// `NotFound`, `Validation` or `Provider`.
#[async_trait]
pub trait UserProvider: Send + Sync {
    /// Loads the user stored under `id`.
    async fn get_user(&self, id: &str) -> Result<User>;

    /// Stores a new user and returns its assigned identifier.
    async fn create_user(&self, req: UserRequest) -> Result<Uuid>;

    /// Replaces the user stored under `id` and returns the new record.
    async fn update_user(&self, id: &str, req: UserRequest) -> Result<User>;

    /// Removes the user stored under `id`.
    async fn delete_user(&self, id: &str) -> Result<()>;
}
