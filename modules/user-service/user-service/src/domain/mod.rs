pub mod dao;
pub mod error;
pub mod service;

pub use dao::UserDao;
pub use error::{DomainError, StorageError, StorageOp};
pub use service::Service;
