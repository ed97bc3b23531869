//! Route definitions for cards.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::cards;
use crate::state::AppState;

/// Routes mounted at `/cards`.
///
/// ```text
/// POST   /reorder                    reorder within one column
/// GET    /{id}                       get_detail
/// PATCH  /{id}                       update
/// DELETE /{id}                       delete
/// POST   /{id}/move                  move to a column at an index
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/reorder", post(cards::reorder))
        .route(
            "/{id}",
            get(cards::get_detail)
                .patch(cards::update)
                .delete(cards::delete),
        )
        .route("/{id}/move", post(cards::move_card))
}
