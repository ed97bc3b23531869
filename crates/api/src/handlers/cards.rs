//! Handlers for the `/cards` resource: CRUD, move, and reorder.
//!
//! Card mutation requires the `can_edit_columns` capability, resolved
//! through the card's column's board. Position maintenance follows the
//! full-rebalance policy: indexed moves rewrite the whole target sibling
//! set to canonical multiples of the gap.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use corkboard_core::cards::{normalize_card_description, normalize_card_title};
use corkboard_core::error::{ErrorCode, ServiceError};
use corkboard_core::position::{is_permutation_of, next_position, plan_insertion, plan_rebalance};
use corkboard_core::roles;
use corkboard_db::models::card::{Card, CreateCard, MoveCard, ReorderCards, UpdateCard};
use corkboard_db::models::column::Column;
use corkboard_db::repositories::{CardRepo, ColumnRepo};
use uuid::Uuid;

use crate::access::{assert_role, get_board_access};
use crate::error::{AppError, AppResult};
use crate::middleware::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

async fn get_column(pool: &sqlx::PgPool, column_id: Uuid) -> AppResult<Column> {
    ColumnRepo::find_by_id(pool, column_id)
        .await?
        .ok_or_else(|| ServiceError::new(ErrorCode::ColumnNotFound, "Column not found").into())
}

async fn get_card(pool: &sqlx::PgPool, card_id: Uuid) -> AppResult<Card> {
    CardRepo::find_by_id(pool, card_id)
        .await?
        .ok_or_else(|| ServiceError::new(ErrorCode::CardNotFound, "Card not found").into())
}

/// Resolve the board owning `column` and require the card-mutation
/// capability on it.
async fn require_card_editor(
    pool: &sqlx::PgPool,
    column: &Column,
    user_id: Uuid,
) -> AppResult<()> {
    let access = get_board_access(pool, column.board_id, user_id).await?;
    assert_role(
        access.membership.role,
        roles::can_edit_columns,
        "Insufficient permissions",
        ErrorCode::ColumnForbidden,
    )
}

/// GET /api/v1/columns/{column_id}/cards
///
/// A column's cards ordered by position. No filtering: search semantics
/// belong entirely to the caller.
pub async fn list_by_column(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(column_id): Path<Uuid>,
) -> AppResult<Json<DataResponse<Vec<Card>>>> {
    let cards = CardRepo::list_by_column(&state.pool, column_id).await?;
    Ok(Json(DataResponse { data: cards }))
}

/// POST /api/v1/columns/{column_id}/cards
///
/// Appends at `last position + gap` (or the gap itself for an empty
/// column) and records the caller as creator.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(column_id): Path<Uuid>,
    Json(input): Json<CreateCard>,
) -> AppResult<(StatusCode, Json<DataResponse<Card>>)> {
    let column = get_column(&state.pool, column_id).await?;
    require_card_editor(&state.pool, &column, user.user_id).await?;

    let title = normalize_card_title(&input.title).map_err(AppError::Service)?;
    let description = match &input.description {
        Some(description) => normalize_card_description(description).map_err(AppError::Service)?,
        None => None,
    };

    let max = CardRepo::max_position(&state.pool, column_id).await?;
    let position = next_position(max);

    let card = CardRepo::create(
        &state.pool,
        column_id,
        &title,
        description.as_deref(),
        position,
        user.user_id,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: card })))
}

/// GET /api/v1/cards/{id}
pub async fn get_detail(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(card_id): Path<Uuid>,
) -> AppResult<Json<DataResponse<Card>>> {
    let card = get_card(&state.pool, card_id).await?;
    Ok(Json(DataResponse { data: card }))
}

/// PATCH /api/v1/cards/{id}
///
/// Partial update; a request with no fields returns the card unchanged
/// without a write.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(card_id): Path<Uuid>,
    Json(input): Json<UpdateCard>,
) -> AppResult<Json<DataResponse<Card>>> {
    let card = get_card(&state.pool, card_id).await?;
    let column = get_column(&state.pool, card.column_id).await?;
    require_card_editor(&state.pool, &column, user.user_id).await?;

    if input.title.is_none() && input.description.is_none() {
        return Ok(Json(DataResponse { data: card }));
    }

    let title = match &input.title {
        Some(title) => normalize_card_title(title).map_err(AppError::Service)?,
        None => card.title.clone(),
    };
    let description = match &input.description {
        Some(description) => normalize_card_description(description).map_err(AppError::Service)?,
        None => card.description.clone(),
    };

    let updated = CardRepo::update(&state.pool, card_id, &title, description.as_deref())
        .await?
        .ok_or_else(|| ServiceError::new(ErrorCode::CardNotFound, "Card not found"))?;

    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/cards/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(card_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let card = get_card(&state.pool, card_id).await?;
    let column = get_column(&state.pool, card.column_id).await?;
    require_card_editor(&state.pool, &column, user.user_id).await?;

    CardRepo::delete(&state.pool, card_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/cards/{id}/move
///
/// Moves the card to `toColumnId` at the given drop index. Source and
/// target must belong to the same board. The target column's siblings are
/// rebalanced and the card's column and position change in one
/// transaction.
pub async fn move_card(
    State(state): State<AppState>,
    user: AuthUser,
    Path(card_id): Path<Uuid>,
    Json(input): Json<MoveCard>,
) -> AppResult<Json<DataResponse<Card>>> {
    let card = get_card(&state.pool, card_id).await?;
    let source_column = get_column(&state.pool, card.column_id).await?;
    let target_column = get_column(&state.pool, input.to_column_id).await?;

    if source_column.board_id != target_column.board_id {
        return Err(ServiceError::new(
            ErrorCode::CardCrossBoardMove,
            "Cannot move card across boards",
        )
        .into());
    }

    require_card_editor(&state.pool, &target_column, user.user_id).await?;

    // The moved card must not take part in the sibling rebalance; for a
    // same-column move it is already in the target set.
    let mut siblings = CardRepo::ids_by_position(&state.pool, target_column.id).await?;
    siblings.retain(|id| *id != card.id);

    let plan = plan_insertion(&siblings, input.index as usize);
    let moved = CardRepo::move_to_column(
        &state.pool,
        card.id,
        target_column.id,
        &plan.sibling_positions,
        plan.inserted_position,
    )
    .await?
    .ok_or_else(|| ServiceError::new(ErrorCode::CardNotFound, "Card not found"))?;

    Ok(Json(DataResponse { data: moved }))
}

/// POST /api/v1/cards/reorder
///
/// The supplied id list must be an exact permutation of the column's
/// current cards; positions are then rewritten to the canonical sequence
/// in one transaction.
pub async fn reorder(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<ReorderCards>,
) -> AppResult<Json<DataResponse<Vec<Card>>>> {
    if input.card_ids.is_empty() {
        return Err(ServiceError::new(ErrorCode::InvalidCardOrder, "No cards provided").into());
    }

    let column = get_column(&state.pool, input.column_id).await?;
    require_card_editor(&state.pool, &column, user.user_id).await?;

    let existing = CardRepo::ids_by_position(&state.pool, input.column_id).await?;
    if !is_permutation_of(&existing, &input.card_ids) {
        return Err(ServiceError::new(ErrorCode::InvalidCardOrder, "Card order mismatch").into());
    }

    let positions = plan_rebalance(&input.card_ids);
    CardRepo::apply_positions(&state.pool, input.column_id, &positions).await?;

    let cards = CardRepo::list_by_column(&state.pool, input.column_id).await?;
    Ok(Json(DataResponse { data: cards }))
}
