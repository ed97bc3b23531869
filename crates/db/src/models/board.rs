//! Board entity model, DTOs, and read models.

use corkboard_core::roles::BoardRole;
use corkboard_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A board row from the `boards` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub owner_user_id: Uuid,
    pub is_archived: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new board.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBoard {
    pub title: String,
    pub description: Option<String>,
}

/// DTO for a partial board update.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateBoard {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// DTO for archiving or unarchiving a board.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetBoardArchive {
    pub is_archived: bool,
}

/// DTO for duplicating a board.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DuplicateBoard {
    pub title: Option<String>,
}

/// A board enriched with the caller's role and live counts. This is both
/// the `list_for_user` query row and the wire `BoardSummary` shape.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSummary {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub is_archived: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub role: BoardRole,
    pub member_count: i64,
    pub column_count: i64,
}

impl BoardSummary {
    /// Assemble a summary from a board row plus derived fields.
    pub fn from_parts(board: Board, role: BoardRole, member_count: i64, column_count: i64) -> Self {
        Self {
            id: board.id,
            title: board.title,
            description: board.description,
            is_archived: board.is_archived,
            created_at: board.created_at,
            updated_at: board.updated_at,
            role,
            member_count,
            column_count,
        }
    }
}
