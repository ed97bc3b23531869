//! Route definitions for the current user's profile.

use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /me                         current profile
/// PATCH  /me                         update profile
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/me", get(users::me).patch(users::update_me))
}
