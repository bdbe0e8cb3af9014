use thiserror::Error;
use user_service_sdk::{InvalidIdError, UserServiceError};

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("invalid user id '{value}'")]
    InvalidId { value: String },

    /// The user service rejected or failed the call.
    #[error("{action} failed: {source}")]
    Upstream {
        action: &'static str,
        #[source]
        source: UserServiceError,
    },
}

impl GatewayError {
    pub fn upstream(action: &'static str) -> impl FnOnce(UserServiceError) -> Self {
        move |source| Self::Upstream { action, source }
    }
}

impl From<InvalidIdError> for GatewayError {
    fn from(err: InvalidIdError) -> Self {
        Self::InvalidId { value: err.value }
    }
}
