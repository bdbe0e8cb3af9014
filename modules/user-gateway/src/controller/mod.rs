mod user;

pub use user::ControllerV1;
