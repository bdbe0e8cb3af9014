//! Route registration for the user gateway.

use axum::routing::{get, post};
use axum::{Extension, Router};
use tower_http::trace::TraceLayer;

use super::handlers::{self, Api};

pub const USERS_PATH: &str = "/user/v1/users";
pub const USER_PATH: &str = "/user/v1/users/{id}";

/// Build the HTTP router serving `api`.
///
/// - `POST   /user/v1/users`          create
/// - `GET    /user/v1/users?ids=a,b`   list
/// - `DELETE /user/v1/users?ids=a,b`   batch delete
/// - `GET    /user/v1/users/{id}`      get one
/// - `PATCH  /user/v1/users/{id}`      partial update
pub fn router(api: Api) -> Router {
    Router::new()
        .route(
            USERS_PATH,
            post(handlers::create)
                .get(handlers::get_list)
                .delete(handlers::delete),
        )
        .route(USER_PATH, get(handlers::get_one).patch(handlers::update))
        .layer(Extension(api))
        .layer(TraceLayer::new_for_http())
}
