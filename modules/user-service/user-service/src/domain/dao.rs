//! Storage contract for users.

use async_trait::async_trait;
use bson::oid::ObjectId;
use time::OffsetDateTime;
use user_service_sdk::{NewUser, User, UserListFilter, UserPatch};

use super::error::StorageError;

/// Data access for the user collection.
///
/// Implementations stamp `created_at`/`updated_at` themselves; callers never
/// supply timestamps.
#[async_trait]
pub trait UserDao: Send + Sync {
    /// Insert a user, returning its new id.
    async fn create(&self, new_user: NewUser) -> Result<ObjectId, StorageError>;

    /// Merge the fields set in `patch` and bump `updated_at`. A missing id is a no-op.
    async fn update(&self, id: ObjectId, patch: UserPatch) -> Result<(), StorageError>;

    /// Delete every matching row in one batch. An empty slice does nothing.
    async fn delete(&self, ids: &[ObjectId]) -> Result<(), StorageError>;

    async fn get_one(&self, id: ObjectId) -> Result<Option<User>, StorageError>;

    /// Rows ordered by id ascending, optionally restricted to `filter.ids`.
    async fn get_list(&self, filter: UserListFilter) -> Result<Vec<User>, StorageError>;
}

/// Current wall clock as Unix milliseconds.
pub fn now_millis() -> i64 {
    let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    i64::try_from(millis).unwrap_or(i64::MAX)
}

/// Next `updated_at` value: wall clock, but never equal to or behind `previous`.
pub fn next_updated_at(previous: i64, now: i64) -> i64 {
    now.max(previous.saturating_add(1))
}
