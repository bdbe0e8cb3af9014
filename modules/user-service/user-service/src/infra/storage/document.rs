//! MongoDB document shape of a user.

use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use user_service_sdk::User;

/// One row of the `user` collection.
///
/// Rows written without a name or timestamps decode with empty/zero values.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

impl From<UserDocument> for User {
    fn from(doc: UserDocument) -> Self {
        Self {
            id: doc.id,
            name: doc.name,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}
