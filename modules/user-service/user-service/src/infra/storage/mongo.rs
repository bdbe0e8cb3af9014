//! MongoDB-backed `UserDao`.

use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{Document, doc};
use futures::TryStreamExt;
use mongodb::{Client, Collection};
use user_service_sdk::{NewUser, User, UserListFilter, UserPatch};

use super::document::UserDocument;
use crate::domain::dao::{UserDao, now_millis};
use crate::domain::error::{StorageError, StorageOp};

#[derive(Clone)]
pub struct MongoUserDao {
    collection: Collection<UserDocument>,
}

impl MongoUserDao {
    pub fn new(collection: Collection<UserDocument>) -> Self {
        Self { collection }
    }

    /// Connect to `uri`, ping `database` and bind to `collection`.
    ///
    /// # Errors
    /// Returns the driver error if the URI is invalid or the server does not answer the ping.
    pub async fn connect(uri: &str, database: &str, collection: &str) -> Result<Self, mongodb::error::Error> {
        let client = Client::with_uri_str(uri).await?;
        let db = client.database(database);
        db.run_command(doc! { "ping": 1 }).await?;
        tracing::info!(database, collection, "connected to MongoDB");
        Ok(Self::new(db.collection(collection)))
    }

    pub fn collection(&self) -> &Collection<UserDocument> {
        &self.collection
    }
}

fn id_filter(ids: &[ObjectId]) -> Document {
    doc! { "_id": { "$in": ids.to_vec() } }
}

/// Aggregation-pipeline update: `updated_at` becomes `max(now, stored + 1)` in the
/// same atomic write, and only fields present in `patch` are overwritten.
fn update_pipeline(patch: UserPatch, now: i64) -> Vec<Document> {
    let mut set = doc! {
        "updated_at": {
            "$max": [now, { "$add": [{ "$ifNull": ["$updated_at", 0_i64] }, 1_i64] }]
        }
    };
    if let Some(name) = patch.name {
        // $literal keeps values like "$name" from being read as field paths.
        set.insert("name", doc! { "$literal": name });
    }
    vec![doc! { "$set": set }]
}

#[async_trait]
impl UserDao for MongoUserDao {
    async fn create(&self, new_user: NewUser) -> Result<ObjectId, StorageError> {
        let now = now_millis();
        let doc = UserDocument {
            id: ObjectId::new(),
            name: new_user.name,
            created_at: now,
            updated_at: now,
        };

        let result = self
            .collection
            .insert_one(&doc)
            .await
            .map_err(|e| StorageError::new(StorageOp::Insert, e))?;

        Ok(result.inserted_id.as_object_id().unwrap_or(doc.id))
    }

    async fn update(&self, id: ObjectId, patch: UserPatch) -> Result<(), StorageError> {
        let result = self
            .collection
            .update_one(doc! { "_id": id }, update_pipeline(patch, now_millis()))
            .await
            .map_err(|e| StorageError::new(StorageOp::Update, e))?;

        tracing::trace!(%id, matched = result.matched_count, "user update applied");
        Ok(())
    }

    async fn delete(&self, ids: &[ObjectId]) -> Result<(), StorageError> {
        if ids.is_empty() {
            return Ok(());
        }

        let result = self
            .collection
            .delete_many(id_filter(ids))
            .await
            .map_err(|e| StorageError::new(StorageOp::Delete, e))?;

        tracing::trace!(requested = ids.len(), deleted = result.deleted_count, "users deleted");
        Ok(())
    }

    async fn get_one(&self, id: ObjectId) -> Result<Option<User>, StorageError> {
        let found = self
            .collection
            .find_one(doc! { "_id": id })
            .await
            .map_err(|e| StorageError::new(StorageOp::FindOne, e))?;

        Ok(found.map(User::from))
    }

    async fn get_list(&self, filter: UserListFilter) -> Result<Vec<User>, StorageError> {
        let query = if filter.is_unfiltered() {
            Document::new()
        } else {
            id_filter(&filter.ids)
        };

        let cursor = self
            .collection
            .find(query)
            .sort(doc! { "_id": 1 })
            .await
            .map_err(|e| StorageError::new(StorageOp::Find, e))?;

        let docs: Vec<UserDocument> = cursor
            .try_collect()
            .await
            .map_err(|e| StorageError::new(StorageOp::Scan, e))?;

        Ok(docs.into_iter().map(User::from).collect())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn pipeline_without_name_only_touches_updated_at() {
        let pipeline = update_pipeline(UserPatch::default(), 42);
        assert_eq!(pipeline.len(), 1);

        let set = pipeline[0].get_document("$set").unwrap();
        assert_eq!(set.keys().collect::<Vec<_>>(), vec!["updated_at"]);
        let max = set.get_document("updated_at").unwrap().get_array("$max").unwrap();
        assert_eq!(max[0].as_i64(), Some(42));
    }

    #[test]
    fn pipeline_sets_name_as_literal() {
        let patch = UserPatch {
            name: Some("$bob".to_owned()),
        };
        let pipeline = update_pipeline(patch, 1);
        let set = pipeline[0].get_document("$set").unwrap();
        let name = set.get_document("name").unwrap();
        assert_eq!(name.get_str("$literal").unwrap(), "$bob");
    }

    #[test]
    fn id_filter_uses_in() {
        let ids = [ObjectId::new(), ObjectId::new()];
        let filter = id_filter(&ids);
        let inner = filter.get_document("_id").unwrap().get_array("$in").unwrap();
        assert_eq!(inner.len(), 2);
        assert_eq!(inner[1].as_object_id(), Some(ids[1]));
    }
}
