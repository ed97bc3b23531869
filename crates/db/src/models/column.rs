//! Column entity model, DTOs, and read models.

use corkboard_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A column row from the `columns` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: Uuid,
    pub board_id: Uuid,
    pub name: String,
    pub position: i64,
    pub is_collapsed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for renaming a column.
#[derive(Debug, Clone, Deserialize)]
pub struct RenameColumn {
    pub name: String,
}

/// DTO for collapsing or expanding a column.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleColumnCollapse {
    pub is_collapsed: bool,
}

/// DTO for an explicit column reorder: the full ordered id list.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderColumns {
    pub board_id: Uuid,
    pub column_ids: Vec<Uuid>,
}

/// A column annotated with its live card count. This is both the listing
/// query row and the wire `ColumnWithMeta` shape.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnWithMeta {
    pub id: Uuid,
    pub board_id: Uuid,
    pub name: String,
    pub position: i64,
    pub is_collapsed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub card_count: i64,
}

impl ColumnWithMeta {
    /// Annotate a column row with its card count.
    pub fn from_column(column: Column, card_count: i64) -> Self {
        Self {
            id: column.id,
            board_id: column.board_id,
            name: column.name,
            position: column.position,
            is_collapsed: column.is_collapsed,
            created_at: column.created_at,
            updated_at: column.updated_at,
            card_count,
        }
    }
}
