//! Route definitions for boards and board-scoped sub-resources.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{boards, columns, members};
use crate::state::AppState;

/// Routes mounted at `/boards`.
///
/// ```text
/// GET    /                           list
/// POST   /                           create
/// GET    /{id}                       get_detail
/// PATCH  /{id}                       update
/// DELETE /{id}                       delete
/// POST   /{id}/archive               set_archive
/// POST   /{id}/duplicate             duplicate
///
/// GET    /{id}/members               list members
/// POST   /{id}/members               add member
/// PATCH  /{id}/members/{user_id}     update member role
/// DELETE /{id}/members/{user_id}     remove member
///
/// GET    /{id}/columns               list columns
/// POST   /{id}/columns               always 405 (disabled by design)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(boards::list).post(boards::create))
        .route(
            "/{id}",
            get(boards::get_detail)
                .patch(boards::update)
                .delete(boards::delete),
        )
        .route("/{id}/archive", post(boards::set_archive))
        .route("/{id}/duplicate", post(boards::duplicate))
        .route("/{id}/members", get(members::list).post(members::add))
        .route(
            "/{id}/members/{user_id}",
            delete(members::remove).patch(members::update_role),
        )
        .route(
            "/{id}/columns",
            get(columns::list_by_board).post(columns::create_disabled),
        )
}
