//! User service client trait.
//!
//! The contract consumers depend on. The gRPC client in this crate implements
//! it; tests can substitute their own implementation.

use async_trait::async_trait;
use bson::oid::ObjectId;

use crate::errors::UserServiceError;
use crate::models::{NewUser, User, UserListFilter, UserPatch};

#[async_trait]
pub trait UserClientV1: Send + Sync {
    /// Create a user and return the id assigned by the service.
    async fn create(&self, new_user: NewUser) -> Result<ObjectId, UserServiceError>;

    /// Fetch one user. `Ok(None)` when no user has this id.
    async fn get_one(&self, id: ObjectId) -> Result<Option<User>, UserServiceError>;

    /// List users ordered by id ascending.
    async fn get_list(&self, filter: UserListFilter) -> Result<Vec<User>, UserServiceError>;

    /// Overwrite the fields present in `patch`. Updating a missing user is not an error.
    async fn update(&self, id: ObjectId, patch: UserPatch) -> Result<(), UserServiceError>;

    /// Delete every listed user. An empty list is a no-op.
    async fn delete(&self, ids: Vec<ObjectId>) -> Result<(), UserServiceError>;
}
