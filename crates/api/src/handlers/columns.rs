//! Handlers for the `/columns` resource.
//!
//! Columns exist only through board creation or duplication and disappear
//! only through board deletion; the standalone create/delete endpoints are
//! kept on the surface but always answer 405.

use axum::extract::{Path, State};
use axum::Json;
use corkboard_core::columns::normalize_column_name;
use corkboard_core::error::{ErrorCode, ServiceError};
use corkboard_core::position::{is_permutation_of, plan_rebalance};
use corkboard_core::roles;
use corkboard_db::models::column::{
    Column, ColumnWithMeta, RenameColumn, ReorderColumns, ToggleColumnCollapse,
};
use corkboard_db::repositories::ColumnRepo;
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

/// GET /api/v1/boards/{id}/columns
///
/// A board's columns ordered by position, each with its live card count.
pub async fn list_by_board(
    State(state): State<AppState>,
    user: AuthUser,
    Path(board_id): Path<Uuid>,
) -> AppResult<Json<DataResponse<Vec<ColumnWithMeta>>>> {
    let access = get_board_access(&state.pool, board_id, user.user_id).await?;
    assert_role(
        access.membership.role,
        roles::can_view_board,
        "Forbidden",
        ErrorCode::BoardForbidden,
    )?;

    let columns = ColumnRepo::list_with_meta(&state.pool, board_id).await?;
    Ok(Json(DataResponse { data: columns }))
}

/// POST /api/v1/boards/{id}/columns
///
/// Column creation after board bootstrap is disabled by design.
pub async fn create_disabled(
    State(_state): State<AppState>,
    _user: AuthUser,
    Path(_board_id): Path<Uuid>,
) -> AppResult<()> {
    Err(ServiceError::new(
        ErrorCode::ColumnCreateDisabled,
        "Column creation is not available",
    )
    .into())
}

/// DELETE /api/v1/columns/{id}
///
/// Standalone column deletion is disabled by design; columns vanish only
/// with their board.
pub async fn delete_disabled(
    State(_state): State<AppState>,
    _user: AuthUser,
    Path(_column_id): Path<Uuid>,
) -> AppResult<()> {
    Err(ServiceError::new(
        ErrorCode::ColumnDeleteDisabled,
        "Column deletion is not available",
    )
    .into())
}

/// PATCH /api/v1/columns/{id}
pub async fn rename(
    State(state): State<AppState>,
    user: AuthUser,
    Path(column_id): Path<Uuid>,
    Json(input): Json<RenameColumn>,
) -> AppResult<Json<DataResponse<ColumnWithMeta>>> {
    let column = get_column(&state.pool, column_id).await?;
    let name = normalize_column_name(&input.name).map_err(AppError::Service)?;

    let access = get_board_access(&state.pool, column.board_id, user.user_id).await?;
    assert_role(
        access.membership.role,
        roles::can_edit_columns,
        "Insufficient permissions",
        ErrorCode::ColumnForbidden,
    )?;

    let updated = ColumnRepo::rename(&state.pool, column_id, &name)
        .await?
        .ok_or_else(|| ServiceError::new(ErrorCode::ColumnNotFound, "Column not found"))?;
    let card_count = ColumnRepo::card_count(&state.pool, column_id).await?;

    Ok(Json(DataResponse {
        data: ColumnWithMeta::from_column(updated, card_count),
    }))
}

/// POST /api/v1/columns/{id}/collapse
///
/// A pure boolean flip with no position effect.
pub async fn toggle_collapse(
    State(state): State<AppState>,
    user: AuthUser,
    Path(column_id): Path<Uuid>,
    Json(input): Json<ToggleColumnCollapse>,
) -> AppResult<Json<DataResponse<ColumnWithMeta>>> {
    let column = get_column(&state.pool, column_id).await?;

    let access = get_board_access(&state.pool, column.board_id, user.user_id).await?;
    assert_role(
        access.membership.role,
        roles::can_edit_columns,
        "Insufficient permissions",
        ErrorCode::ColumnForbidden,
    )?;

    let updated = ColumnRepo::set_collapsed(&state.pool, column_id, input.is_collapsed)
        .await?
        .ok_or_else(|| ServiceError::new(ErrorCode::ColumnNotFound, "Column not found"))?;
    let card_count = ColumnRepo::card_count(&state.pool, column_id).await?;

    Ok(Json(DataResponse {
        data: ColumnWithMeta::from_column(updated, card_count),
    }))
}

/// POST /api/v1/columns/reorder
///
/// The supplied id list must be an exact permutation of the board's current
/// columns; positions are then rewritten to the canonical sequence in one
/// transaction.
pub async fn reorder(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<ReorderColumns>,
) -> AppResult<Json<DataResponse<Vec<ColumnWithMeta>>>> {
    if input.column_ids.is_empty() {
        return Err(
            ServiceError::new(ErrorCode::InvalidColumnOrder, "No columns provided").into(),
        );
    }

    let access = get_board_access(&state.pool, input.board_id, user.user_id).await?;
    assert_role(
        access.membership.role,
        roles::can_edit_columns,
        "Insufficient permissions",
        ErrorCode::ColumnForbidden,
    )?;

    let existing = ColumnRepo::ids_by_position(&state.pool, input.board_id).await?;
    if !is_permutation_of(&existing, &input.column_ids) {
        return Err(
            ServiceError::new(ErrorCode::InvalidColumnOrder, "Column order mismatch").into(),
        );
    }

    let positions = plan_rebalance(&input.column_ids);
    ColumnRepo::apply_positions(&state.pool, input.board_id, &positions).await?;

    let columns = ColumnRepo::list_with_meta(&state.pool, input.board_id).await?;
    Ok(Json(DataResponse { data: columns }))
}
