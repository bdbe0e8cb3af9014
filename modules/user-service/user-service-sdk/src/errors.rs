//! Public error types for the user service SDK.

use thiserror::Error;
use tonic::{Code, Status};

/// A string that is not a 24-character hex object id.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid user id '{value}': expected 24 hex characters")]
pub struct InvalidIdError {
    pub value: String,
}

/// Errors returned by [`crate::UserClientV1`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UserServiceError {
    /// The request was rejected as malformed.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// The service could not be reached or did not answer in time.
    #[error("gRPC transport error: {0}")]
    Transport(String),

    /// The service failed while handling the request.
    #[error("internal error: {message}")]
    Internal { message: String },
}

impl UserServiceError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl From<InvalidIdError> for UserServiceError {
    fn from(err: InvalidIdError) -> Self {
        Self::invalid_argument(err.to_string())
    }
}

impl From<Status> for UserServiceError {
    fn from(status: Status) -> Self {
        let message = status.message().to_owned();
        match status.code() {
            Code::InvalidArgument => Self::InvalidArgument { message },
            Code::Unavailable | Code::DeadlineExceeded | Code::Cancelled => Self::Transport(message),
            _ => Self::Internal { message },
        }
    }
}
