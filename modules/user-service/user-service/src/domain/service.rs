//! Domain service for users.
//!
//! Delegates to the `UserDao` and tags failures with the action being performed.

use std::sync::Arc;

use bson::oid::ObjectId;
use tracing::{debug, instrument};
use user_service_sdk::{NewUser, User, UserListFilter, UserPatch};

use super::dao::UserDao;
use super::error::DomainError;

#[derive(Clone)]
pub struct Service {
    dao: Arc<dyn UserDao>,
}

impl Service {
    pub fn new(dao: Arc<dyn UserDao>) -> Self {
        Self { dao }
    }

    #[instrument(skip_all, fields(name = %new_user.name))]
    pub async fn create(&self, new_user: NewUser) -> Result<ObjectId, DomainError> {
        let id = self
            .dao
            .create(new_user)
            .await
            .map_err(|e| DomainError::new("create user", e))?;
        debug!(%id, "user created");
        Ok(id)
    }

    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_by_id(&self, id: ObjectId) -> Result<Option<User>, DomainError> {
        self.dao
            .get_one(id)
            .await
            .map_err(|e| DomainError::new("get user", e))
    }

    #[instrument(skip_all, fields(ids = ids.len()))]
    pub async fn get_list(&self, ids: Vec<ObjectId>) -> Result<Vec<User>, DomainError> {
        self.dao
            .get_list(UserListFilter { ids })
            .await
            .map_err(|e| DomainError::new("get user list", e))
    }

    #[instrument(skip(self, patch), fields(id = %id))]
    pub async fn update(&self, id: ObjectId, patch: UserPatch) -> Result<(), DomainError> {
        self.dao
            .update(id, patch)
            .await
            .map_err(|e| DomainError::new("update user", e))
    }

    #[instrument(skip_all, fields(ids = ids.len()))]
    pub async fn delete_by_ids(&self, ids: &[ObjectId]) -> Result<(), DomainError> {
        self.dao
            .delete(ids)
            .await
            .map_err(|e| DomainError::new("delete user", e))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::domain::error::{StorageError, StorageOp};
    use crate::infra::storage::InMemoryUserDao;

    /// DAO whose every call fails with the matching storage op.
    struct BrokenDao;

    fn broken(op: StorageOp) -> StorageError {
        StorageError::new(op, "connection reset")
    }

    #[async_trait]
    impl UserDao for BrokenDao {
        async fn create(&self, _: NewUser) -> Result<ObjectId, StorageError> {
            Err(broken(StorageOp::Insert))
        }
        async fn update(&self, _: ObjectId, _: UserPatch) -> Result<(), StorageError> {
            Err(broken(StorageOp::Update))
        }
        async fn delete(&self, _: &[ObjectId]) -> Result<(), StorageError> {
            Err(broken(StorageOp::Delete))
        }
        async fn get_one(&self, _: ObjectId) -> Result<Option<User>, StorageError> {
            Err(broken(StorageOp::FindOne))
        }
        async fn get_list(&self, _: UserListFilter) -> Result<Vec<User>, StorageError> {
            Err(broken(StorageOp::Find))
        }
    }

    fn memory_service() -> Service {
        Service::new(Arc::new(InMemoryUserDao::new()))
    }

    #[tokio::test]
    async fn create_update_delete_scenario() {
        let svc = memory_service();

        let id = svc.create(NewUser::new("alice")).await.unwrap();
        let created = svc.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(created.name, "alice");
        assert_eq!(created.created_at, created.updated_at);

        svc.update(
            id,
            UserPatch {
                name: Some("bob".to_owned()),
            },
        )
        .await
        .unwrap();
        let updated = svc.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(updated.name, "bob");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);

        svc.delete_by_ids(&[id]).await.unwrap();
        assert!(svc.get_by_id(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn get_list_filters_by_ids() {
        let svc = memory_service();
        let a = svc.create(NewUser::new("a")).await.unwrap();
        let b = svc.create(NewUser::new("b")).await.unwrap();
        let c = svc.create(NewUser::new("c")).await.unwrap();

        let all = svc.get_list(Vec::new()).await.unwrap();
        assert_eq!(all.iter().map(|u| u.id).collect::<Vec<_>>(), vec![a, b, c]);

        let some = svc.get_list(vec![c, a]).await.unwrap();
        assert_eq!(some.iter().map(|u| u.id).collect::<Vec<_>>(), vec![a, c]);
    }

    #[tokio::test]
    async fn failures_are_tagged_with_the_action() {
        let svc = Service::new(Arc::new(BrokenDao));
        let id = ObjectId::new();

        let err = svc.create(NewUser::new("alice")).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "create user failed: insert user data failed: connection reset"
        );

        let err = svc.get_by_id(id).await.unwrap_err();
        assert_eq!(err.action, "get user");
        assert_eq!(err.source.op, StorageOp::FindOne);

        let err = svc.get_list(vec![id]).await.unwrap_err();
        assert_eq!(err.action, "get user list");

        let err = svc.update(id, UserPatch::default()).await.unwrap_err();
        assert_eq!(err.action, "update user");

        let err = svc.delete_by_ids(&[id]).await.unwrap_err();
        assert_eq!(err.to_string(), "delete user failed: delete user data failed: connection reset");
    }
}
