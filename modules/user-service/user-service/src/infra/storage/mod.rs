//! `UserDao` implementations.

pub mod document;
pub mod memory;
pub mod mongo;

pub use document::UserDocument;
pub use memory::InMemoryUserDao;
pub use mongo::MongoUserDao;
