pub mod boards;
pub mod cards;
pub mod columns;
pub mod health;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /boards                                     list, create
/// /boards/{id}                                detail, update, delete
/// /boards/{id}/archive                        archive/unarchive (POST)
/// /boards/{id}/duplicate                      deep copy (POST)
/// /boards/{id}/members                        list, add
/// /boards/{id}/members/{user_id}              update role, remove
/// /boards/{id}/columns                        list (POST always 405)
///
/// /columns/reorder                            reorder a board's columns
/// /columns/{id}                               rename (DELETE always 405)
/// /columns/{id}/collapse                      toggle collapse
/// /columns/{column_id}/cards                  list, create
///
/// /cards/reorder                              reorder within one column
/// /cards/{id}                                 detail, update, delete
/// /cards/{id}/move                            cross/same-column move
///
/// /users/me                                   profile read/update
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/boards", boards::router())
        .nest("/columns", columns::router())
        .nest("/cards", cards::router())
        .nest("/users", users::router())
}
