//! Board access resolution and role assertion.
//!
//! Every board-scoped operation goes through [`get_board_access`] and one of
//! the capability predicates from `corkboard_core::roles`. Resolution is
//! evaluated fresh on every call so role changes take effect immediately.

use corkboard_core::error::{ErrorCode, ServiceError};
use corkboard_core::roles::BoardRole;
use corkboard_db::models::board::Board;
use corkboard_db::models::board_member::BoardMember;
use corkboard_db::repositories::{BoardMemberRepo, BoardRepo};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// A caller's resolved relationship to a board.
#[derive(Debug, Clone)]
pub struct BoardAccess {
    pub board: Board,
    pub membership: BoardMember,
}

/// Resolve the board and the caller's membership in it.
///
/// A missing membership is indistinguishable from a missing board: both
/// fail with `BOARD_NOT_FOUND`, so board existence never leaks to
/// non-members.
pub async fn get_board_access(
    pool: &PgPool,
    board_id: Uuid,
    user_id: Uuid,
) -> AppResult<BoardAccess> {
    let Some(membership) = BoardMemberRepo::find(pool, board_id, user_id).await? else {
        return Err(board_not_found());
    };
    let Some(board) = BoardRepo::find_by_id(pool, board_id).await? else {
        return Err(board_not_found());
    };
    Ok(BoardAccess { board, membership })
}

/// Fail with a 403 carrying `code` unless `predicate(role)` holds.
pub fn assert_role(
    role: BoardRole,
    predicate: fn(BoardRole) -> bool,
    message: &str,
    code: ErrorCode,
) -> AppResult<()> {
    if predicate(role) {
        Ok(())
    } else {
        Err(AppError::Service(ServiceError::new(code, message)))
    }
}

fn board_not_found() -> AppError {
    AppError::Service(ServiceError::new(ErrorCode::BoardNotFound, "Board not found"))
}
