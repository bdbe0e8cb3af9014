use std::error::Error as StdError;

use thiserror::Error;

type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Storage operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageOp {
    Insert,
    Update,
    Delete,
    FindOne,
    Find,
    /// Decoding rows out of a list cursor.
    Scan,
}

impl std::fmt::Display for StorageOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::Insert => "insert user data failed",
            Self::Update => "update user data failed",
            Self::Delete => "delete user data failed",
            Self::FindOne => "find one user data failed",
            Self::Find => "search user list failed",
            Self::Scan => "scan user list failed",
        };
        f.write_str(text)
    }
}

/// Failure reported by a `UserDao`.
#[derive(Error, Debug)]
#[error("{op}: {source}")]
pub struct StorageError {
    pub op: StorageOp,
    #[source]
    pub source: BoxError,
}

impl StorageError {
    pub fn new(op: StorageOp, source: impl Into<BoxError>) -> Self {
        Self {
            op,
            source: source.into(),
        }
    }
}

/// Failure of a service call, tagged with the action being performed.
#[derive(Error, Debug)]
#[error("{action} failed: {source}")]
pub struct DomainError {
    pub action: &'static str,
    #[source]
    pub source: StorageError,
}

impl DomainError {
    pub fn new(action: &'static str, source: StorageError) -> Self {
        Self { action, source }
    }
}
