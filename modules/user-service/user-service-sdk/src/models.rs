//! Public models for the user service.
//!
//! Transport-agnostic data structures shared by the service, its gRPC client
//! and the gateway.

use bson::oid::ObjectId;

/// A stored user.
///
/// Timestamps are Unix milliseconds assigned by the storage layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: ObjectId,
    pub name: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Data for creating a new user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewUser {
    pub name: String,
}

impl NewUser {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Partial update data for a user. `None` fields are left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserPatch {
    pub name: Option<String>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
    }
}

/// Listing filter. An empty id set matches every user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserListFilter {
    pub ids: Vec<ObjectId>,
}

impl UserListFilter {
    pub fn by_ids(ids: impl IntoIterator<Item = ObjectId>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    pub fn is_unfiltered(&self) -> bool {
        self.ids.is_empty()
    }
}
