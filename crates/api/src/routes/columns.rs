//! Route definitions for columns and column-scoped cards.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::{cards, columns};
use crate::state::AppState;

/// Routes mounted at `/columns`.
///
/// ```text
/// POST   /reorder                    reorder a board's columns
/// PATCH  /{id}                       rename
/// DELETE /{id}                       always 405 (disabled by design)
/// POST   /{id}/collapse              toggle collapse
///
/// GET    /{column_id}/cards          list cards
/// POST   /{column_id}/cards          create card
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/reorder", post(columns::reorder))
        .route(
            "/{id}",
            patch(columns::rename).delete(columns::delete_disabled),
        )
        .route("/{id}/collapse", post(columns::toggle_collapse))
        .route(
            "/{column_id}/cards",
            get(cards::list_by_column).post(cards::create),
        )
}
