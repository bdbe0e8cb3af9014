mod server;

pub use server::UserController;
