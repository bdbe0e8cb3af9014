//! Process-local `UserDao` used by `--mock` runs and tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use bson::oid::ObjectId;
use parking_lot::RwLock;
use user_service_sdk::{NewUser, User, UserListFilter, UserPatch};

use crate::domain::dao::{UserDao, next_updated_at, now_millis};
use crate::domain::error::StorageError;

/// Users kept in an ordered map so listing follows id order like the MongoDB sort.
#[derive(Default)]
pub struct InMemoryUserDao {
    rows: RwLock<BTreeMap<ObjectId, User>>,
}

impl InMemoryUserDao {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }
}

#[async_trait]
impl UserDao for InMemoryUserDao {
    async fn create(&self, new_user: NewUser) -> Result<ObjectId, StorageError> {
        let now = now_millis();
        let user = User {
            id: ObjectId::new(),
            name: new_user.name,
            created_at: now,
            updated_at: now,
        };
        let id = user.id;
        self.rows.write().insert(id, user);
        Ok(id)
    }

    async fn update(&self, id: ObjectId, patch: UserPatch) -> Result<(), StorageError> {
        let now = now_millis();
        let mut rows = self.rows.write();
        if let Some(user) = rows.get_mut(&id) {
            user.updated_at = next_updated_at(user.updated_at, now);
            if let Some(name) = patch.name {
                user.name = name;
            }
        }
        Ok(())
    }

    async fn delete(&self, ids: &[ObjectId]) -> Result<(), StorageError> {
        if ids.is_empty() {
            return Ok(());
        }
        let mut rows = self.rows.write();
        for id in ids {
            rows.remove(id);
        }
        Ok(())
    }

    async fn get_one(&self, id: ObjectId) -> Result<Option<User>, StorageError> {
        Ok(self.rows.read().get(&id).cloned())
    }

    async fn get_list(&self, filter: UserListFilter) -> Result<Vec<User>, StorageError> {
        let rows = self.rows.read();
        let list = if filter.is_unfiltered() {
            rows.values().cloned().collect()
        } else {
            rows.values()
                .filter(|u| filter.ids.contains(&u.id))
                .cloned()
                .collect()
        };
        Ok(list)
    }
}
