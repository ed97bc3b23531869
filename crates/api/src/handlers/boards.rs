//! Handlers for the `/boards` resource: board lifecycle and aggregate reads.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use corkboard_core::error::{ErrorCode, ServiceError};
use corkboard_core::roles::{self, BoardRole};
use corkboard_db::models::board::{
    Board, BoardSummary, CreateBoard, DuplicateBoard, SetBoardArchive, UpdateBoard,
};
use corkboard_db::models::card::Card;
use corkboard_db::models::column::ColumnWithMeta;
use corkboard_db::repositories::{BoardMemberRepo, BoardRepo, CardRepo, ColumnRepo};
use futures::future::try_join_all;
use serde::Serialize;
use uuid::Uuid;

use crate::access::{assert_role, get_board_access};
use crate::error::{AppError, AppResult};
use crate::middleware::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum board title length enforced at the request boundary.
const MAX_BOARD_TITLE_CHARS: usize = 255;
/// Maximum board description length enforced at the request boundary.
const MAX_BOARD_DESCRIPTION_CHARS: usize = 2000;

/// A column with its ordered cards, as embedded in [`BoardDetail`].
#[derive(Debug, Serialize)]
pub struct BoardColumnDetail {
    #[serde(flatten)]
    pub column: ColumnWithMeta,
    pub cards: Vec<Card>,
}

/// The full board aggregate: summary plus every column with its cards.
#[derive(Debug, Serialize)]
pub struct BoardDetail {
    pub board: BoardSummary,
    pub columns: Vec<BoardColumnDetail>,
}

fn validate_title(title: &str) -> AppResult<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() || trimmed.chars().count() > MAX_BOARD_TITLE_CHARS {
        return Err(AppError::BadRequest(format!(
            "title must be 1-{MAX_BOARD_TITLE_CHARS} characters"
        )));
    }
    Ok(trimmed.to_string())
}

fn validate_description(description: &str) -> AppResult<Option<String>> {
    if description.chars().count() > MAX_BOARD_DESCRIPTION_CHARS {
        return Err(AppError::BadRequest(format!(
            "description must be at most {MAX_BOARD_DESCRIPTION_CHARS} characters"
        )));
    }
    let trimmed = description.trim();
    if trimmed.is_empty() {
        Ok(None)
    } else {
        Ok(Some(trimmed.to_string()))
    }
}

/// Assemble the wire summary for one board the caller holds `role` on.
async fn summarize(pool: &sqlx::PgPool, board: Board, role: BoardRole) -> AppResult<BoardSummary> {
    let member_count = BoardMemberRepo::count_for_board(pool, board.id).await?;
    let column_count = ColumnRepo::count_for_board(pool, board.id).await?;
    Ok(BoardSummary::from_parts(board, role, member_count, column_count))
}

/// Assemble the full aggregate: summary plus every column populated with
/// its ordered cards. An aggregate read composing the column and card
/// listings, not a single query.
async fn board_detail(
    pool: &sqlx::PgPool,
    board: Board,
    role: BoardRole,
) -> AppResult<BoardDetail> {
    let columns = ColumnRepo::list_with_meta(pool, board.id).await?;

    let card_lists = try_join_all(
        columns
            .iter()
            .map(|column| CardRepo::list_by_column(pool, column.id)),
    )
    .await?;

    let member_count = BoardMemberRepo::count_for_board(pool, board.id).await?;
    let column_count = columns.len() as i64;
    let board = BoardSummary::from_parts(board, role, member_count, column_count);

    let columns = columns
        .into_iter()
        .zip(card_lists)
        .map(|(column, cards)| BoardColumnDetail { column, cards })
        .collect();

    Ok(BoardDetail { board, columns })
}

/// GET /api/v1/boards
///
/// Every board where the caller holds any membership, with role and live
/// counts, ordered by title.
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<BoardSummary>>>> {
    let boards = BoardRepo::list_for_user(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: boards }))
}

/// POST /api/v1/boards
///
/// One transaction: the board row, the caller's owner membership, and the
/// three default columns.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateBoard>,
) -> AppResult<(StatusCode, Json<DataResponse<BoardDetail>>)> {
    let title = validate_title(&input.title)?;
    let description = match &input.description {
        Some(description) => validate_description(description)?,
        None => None,
    };

    let (board, columns) = BoardRepo::create_with_defaults(
        &state.pool,
        user.user_id,
        &title,
        description.as_deref(),
    )
    .await?;

    tracing::info!(board_id = %board.id, owner = %user.user_id, "Board created");

    let column_count = columns.len() as i64;
    let board = BoardSummary::from_parts(board, BoardRole::Owner, 1, column_count);
    let columns = columns
        .into_iter()
        .map(|column| BoardColumnDetail {
            column: ColumnWithMeta::from_column(column, 0),
            cards: Vec::new(),
        })
        .collect();

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: BoardDetail { board, columns },
        }),
    ))
}

/// GET /api/v1/boards/{id}
pub async fn get_detail(
    State(state): State<AppState>,
    user: AuthUser,
    Path(board_id): Path<Uuid>,
) -> AppResult<Json<DataResponse<BoardDetail>>> {
    let access = get_board_access(&state.pool, board_id, user.user_id).await?;
    assert_role(
        access.membership.role,
        roles::can_view_board,
        "Forbidden",
        ErrorCode::BoardForbidden,
    )?;

    let detail = board_detail(&state.pool, access.board, access.membership.role).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// PATCH /api/v1/boards/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(board_id): Path<Uuid>,
    Json(input): Json<UpdateBoard>,
) -> AppResult<Json<DataResponse<BoardSummary>>> {
    let access = get_board_access(&state.pool, board_id, user.user_id).await?;
    assert_role(
        access.membership.role,
        roles::can_manage_board,
        "Insufficient permissions",
        ErrorCode::BoardUpdateForbidden,
    )?;

    let title = match &input.title {
        Some(title) => validate_title(title)?,
        None => access.board.title.clone(),
    };
    let description = match &input.description {
        Some(description) => validate_description(description)?,
        None => access.board.description.clone(),
    };

    let updated = BoardRepo::update(&state.pool, board_id, &title, description.as_deref())
        .await?
        .ok_or_else(|| ServiceError::new(ErrorCode::BoardNotFound, "Board not found"))?;

    let summary = summarize(&state.pool, updated, access.membership.role).await?;
    Ok(Json(DataResponse { data: summary }))
}

/// POST /api/v1/boards/{id}/archive
pub async fn set_archive(
    State(state): State<AppState>,
    user: AuthUser,
    Path(board_id): Path<Uuid>,
    Json(input): Json<SetBoardArchive>,
) -> AppResult<Json<DataResponse<BoardSummary>>> {
    let access = get_board_access(&state.pool, board_id, user.user_id).await?;
    assert_role(
        access.membership.role,
        roles::can_manage_board,
        "Insufficient permissions",
        ErrorCode::BoardArchiveForbidden,
    )?;

    let updated = BoardRepo::set_archived(&state.pool, board_id, input.is_archived)
        .await?
        .ok_or_else(|| ServiceError::new(ErrorCode::BoardNotFound, "Board not found"))?;

    let summary = summarize(&state.pool, updated, access.membership.role).await?;
    Ok(Json(DataResponse { data: summary }))
}

/// DELETE /api/v1/boards/{id}
///
/// Owner only. Columns, cards, and memberships go with the board via the
/// storage-level cascade.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(board_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let access = get_board_access(&state.pool, board_id, user.user_id).await?;
    assert_role(
        access.membership.role,
        roles::can_delete_board,
        "Only owners can delete boards",
        ErrorCode::BoardDeleteForbidden,
    )?;

    BoardRepo::delete(&state.pool, board_id).await?;
    tracing::info!(board_id = %board_id, actor = %user.user_id, "Board deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/boards/{id}/duplicate
///
/// Deep-copies columns and cards in one transaction. The duplicating user
/// becomes the sole owner of the copy; memberships are not carried over.
pub async fn duplicate(
    State(state): State<AppState>,
    user: AuthUser,
    Path(board_id): Path<Uuid>,
    Json(input): Json<DuplicateBoard>,
) -> AppResult<(StatusCode, Json<DataResponse<BoardDetail>>)> {
    let access = get_board_access(&state.pool, board_id, user.user_id).await?;
    assert_role(
        access.membership.role,
        roles::can_manage_board,
        "Insufficient permissions",
        ErrorCode::BoardDuplicateForbidden,
    )?;

    let title = match &input.title {
        Some(title) => validate_title(title)?,
        None => format!("{} (Copy)", access.board.title),
    };

    let board = BoardRepo::duplicate(&state.pool, &access.board, &title, user.user_id).await?;
    tracing::info!(source = %board_id, duplicate = %board.id, "Board duplicated");

    let detail = board_detail(&state.pool, board, BoardRole::Owner).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: detail })))
}
