//! Board membership model, DTOs, and the enriched member read model.

use corkboard_core::roles::BoardRole;
use corkboard_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A membership row from the `board_members` table: the unit of access
/// control binding a user to a board with a role.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardMember {
    pub id: Uuid,
    pub board_id: Uuid,
    pub user_id: Uuid,
    pub role: BoardRole,
    pub joined_at: Timestamp,
}

/// DTO for adding a member. The role arrives as a wire string so unknown
/// values can be rejected with `INVALID_ROLE` rather than a decode error.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddBoardMember {
    pub user_id: Uuid,
    pub role: String,
}

/// DTO for changing a member's role.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateBoardMemberRole {
    pub role: String,
}

/// A membership joined with the member's user display fields.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardMemberInfo {
    pub id: Uuid,
    pub board_id: Uuid,
    pub user_id: Uuid,
    pub role: BoardRole,
    pub name: Option<String>,
    pub email: String,
    pub image: Option<String>,
    pub joined_at: Timestamp,
}
