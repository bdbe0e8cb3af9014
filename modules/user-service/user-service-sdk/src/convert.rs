//! Conversions between the wire representation and the SDK models.

use bson::oid::ObjectId;

use crate::errors::InvalidIdError;
use crate::models::User;
use crate::proto::UserItem;

/// Parse a 24-character hex string into an object id.
///
/// # Errors
/// Returns [`InvalidIdError`] when `value` is not valid hex of the right length.
pub fn parse_id(value: &str) -> Result<ObjectId, InvalidIdError> {
    ObjectId::parse_str(value).map_err(|_| InvalidIdError {
        value: value.to_owned(),
    })
}

/// Parse every id, failing on the first malformed one.
///
/// # Errors
/// Returns [`InvalidIdError`] for the first value that does not parse.
pub fn parse_ids<I, S>(values: I) -> Result<Vec<ObjectId>, InvalidIdError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values.into_iter().map(|v| parse_id(v.as_ref())).collect()
}

pub fn ids_to_hex(ids: &[ObjectId]) -> Vec<String> {
    ids.iter().map(ObjectId::to_hex).collect()
}

impl From<User> for UserItem {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_hex(),
            name: user.name,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl TryFrom<UserItem> for User {
    type Error = InvalidIdError;

    fn try_from(item: UserItem) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_id(&item.id)?,
            name: item.name,
            created_at: item.created_at,
            updated_at: item.updated_at,
        })
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_hex_and_rejects_garbage() {
        let id = ObjectId::new();
        assert_eq!(parse_id(&id.to_hex()).ok(), Some(id));

        for bad in ["", "123", "zzzzzzzzzzzzzzzzzzzzzzzz", "0123456789abcdef012345678"] {
            let err = parse_id(bad).err();
            assert_eq!(err.map(|e| e.value), Some(bad.to_owned()));
        }
    }

    #[test]
    fn parse_ids_reports_first_bad_value() {
        let good = ObjectId::new().to_hex();
        let err = parse_ids([good.as_str(), "nope", "also-bad"]).err();
        assert_eq!(err.map(|e| e.value), Some("nope".to_owned()));
        assert_eq!(parse_ids(Vec::<String>::new()).ok(), Some(Vec::new()));
    }

    #[test]
    fn user_item_keeps_fields() {
        let user = User {
            id: ObjectId::new(),
            name: "alice".to_owned(),
            created_at: 10,
            updated_at: 11,
        };
        let item = UserItem::from(user.clone());
        assert_eq!(item.id, user.id.to_hex());
        assert_eq!(User::try_from(item).ok(), Some(user));
    }

    #[test]
    fn user_item_with_bad_id_is_rejected() {
        let item = UserItem {
            id: "not-an-id".to_owned(),
            ..UserItem::default()
        };
        assert!(User::try_from(item).is_err());
    }
}
