//! Handlers for board membership management.
//!
//! All guards from the access-control contract live here: self-targeting,
//! duplicate membership, owner modification/removal protection, and the
//! sole-owner rule (a board must always keep at least one owner).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use corkboard_core::error::{ErrorCode, ServiceError};
use corkboard_core::roles::{self, BoardRole};
use corkboard_db::models::board_member::{
    AddBoardMember, BoardMember, BoardMemberInfo, UpdateBoardMemberRole,
};
use corkboard_db::models::user::User;
use corkboard_db::repositories::{BoardMemberRepo, UserRepo};
use uuid::Uuid;

use crate::access::{assert_role, get_board_access};
use crate::error::AppResult;
use crate::middleware::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

fn enrich(member: BoardMember, user: &User) -> BoardMemberInfo {
    BoardMemberInfo {
        id: member.id,
        board_id: member.board_id,
        user_id: member.user_id,
        role: member.role,
        name: user.name.clone(),
        email: user.email.clone(),
        image: user.image.clone(),
        joined_at: member.joined_at,
    }
}

/// GET /api/v1/boards/{id}/members
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Path(board_id): Path<Uuid>,
) -> AppResult<Json<DataResponse<Vec<BoardMemberInfo>>>> {
    let access = get_board_access(&state.pool, board_id, user.user_id).await?;
    assert_role(
        access.membership.role,
        roles::can_view_board,
        "Forbidden",
        ErrorCode::BoardMemberForbidden,
    )?;

    let members = BoardMemberRepo::list_info(&state.pool, board_id).await?;
    Ok(Json(DataResponse { data: members }))
}

/// POST /api/v1/boards/{id}/members
pub async fn add(
    State(state): State<AppState>,
    actor: AuthUser,
    Path(board_id): Path<Uuid>,
    Json(input): Json<AddBoardMember>,
) -> AppResult<(StatusCode, Json<DataResponse<BoardMemberInfo>>)> {
    let access = get_board_access(&state.pool, board_id, actor.user_id).await?;
    assert_role(
        access.membership.role,
        roles::can_manage_members,
        "Insufficient permissions",
        ErrorCode::BoardMemberForbidden,
    )?;

    let role = BoardRole::parse(&input.role)
        .ok_or_else(|| ServiceError::new(ErrorCode::InvalidRole, "Invalid role"))?;

    if input.user_id == actor.user_id {
        return Err(ServiceError::new(
            ErrorCode::BoardMemberSelf,
            "Cannot change your own membership",
        )
        .into());
    }

    let target_user = UserRepo::find_by_id(&state.pool, input.user_id)
        .await?
        .ok_or_else(|| ServiceError::new(ErrorCode::UserNotFound, "User not found"))?;

    if BoardMemberRepo::find(&state.pool, board_id, input.user_id)
        .await?
        .is_some()
    {
        return Err(ServiceError::new(
            ErrorCode::BoardMemberExists,
            "User is already a member",
        )
        .into());
    }

    let inserted = BoardMemberRepo::insert(&state.pool, board_id, input.user_id, role).await?;
    tracing::info!(board_id = %board_id, member = %input.user_id, role = %role, "Member added");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: enrich(inserted, &target_user),
        }),
    ))
}

/// PATCH /api/v1/boards/{id}/members/{user_id}
pub async fn update_role(
    State(state): State<AppState>,
    actor: AuthUser,
    Path((board_id, member_id)): Path<(Uuid, Uuid)>,
    Json(input): Json<UpdateBoardMemberRole>,
) -> AppResult<Json<DataResponse<BoardMemberInfo>>> {
    let role = BoardRole::parse(&input.role)
        .ok_or_else(|| ServiceError::new(ErrorCode::InvalidRole, "Invalid role"))?;

    let access = get_board_access(&state.pool, board_id, actor.user_id).await?;
    assert_role(
        access.membership.role,
        roles::can_manage_members,
        "Insufficient permissions",
        ErrorCode::BoardMemberForbidden,
    )?;

    let target = BoardMemberRepo::find(&state.pool, board_id, member_id)
        .await?
        .ok_or_else(|| ServiceError::new(ErrorCode::BoardMemberNotFound, "Member not found"))?;

    if roles::is_owner(target.role) {
        // Non-owners may never touch an owner; owners may change another
        // owner's role, but the last owner can never be demoted.
        if !roles::is_owner(access.membership.role) {
            return Err(ServiceError::new(
                ErrorCode::BoardOwnerModifyForbidden,
                "Cannot modify the owner",
            )
            .into());
        }
        if !roles::is_owner(role) {
            let owners = BoardMemberRepo::count_owners(&state.pool, board_id).await?;
            if owners <= 1 {
                return Err(ServiceError::new(
                    ErrorCode::BoardOwnerModifyForbidden,
                    "Cannot demote the sole owner",
                )
                .into());
            }
        }
    }

    let updated = BoardMemberRepo::update_role(&state.pool, board_id, member_id, role)
        .await?
        .ok_or_else(|| ServiceError::new(ErrorCode::BoardMemberNotFound, "Member not found"))?;

    let target_user = UserRepo::find_by_id(&state.pool, member_id)
        .await?
        .ok_or_else(|| ServiceError::new(ErrorCode::UserNotFound, "User not found"))?;

    Ok(Json(DataResponse {
        data: enrich(updated, &target_user),
    }))
}

/// DELETE /api/v1/boards/{id}/members/{user_id}
pub async fn remove(
    State(state): State<AppState>,
    actor: AuthUser,
    Path((board_id, member_id)): Path<(Uuid, Uuid)>,
) -> AppResult<StatusCode> {
    let access = get_board_access(&state.pool, board_id, actor.user_id).await?;
    assert_role(
        access.membership.role,
        roles::can_manage_members,
        "Insufficient permissions",
        ErrorCode::BoardMemberForbidden,
    )?;

    let target = BoardMemberRepo::find(&state.pool, board_id, member_id)
        .await?
        .ok_or_else(|| ServiceError::new(ErrorCode::BoardMemberNotFound, "Member not found"))?;

    if roles::is_owner(target.role) {
        return Err(ServiceError::new(
            ErrorCode::BoardOwnerRemoveForbidden,
            "Cannot remove the board owner",
        )
        .into());
    }

    BoardMemberRepo::remove(&state.pool, board_id, member_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
