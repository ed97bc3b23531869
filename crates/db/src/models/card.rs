//! Card entity model and DTOs.

use corkboard_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A card row from the `cards` table. Serialized as-is for the wire
/// `CardSummary` shape.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: Uuid,
    pub column_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub position: i64,
    pub created_by: Uuid,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a card.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCard {
    pub title: String,
    pub description: Option<String>,
}

/// DTO for a partial card update. Absent fields are left untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCard {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// DTO for moving a card to a column at a drop index.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveCard {
    pub to_column_id: Uuid,
    pub index: u32,
}

/// DTO for an explicit card reorder within one column.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderCards {
    pub column_id: Uuid,
    pub card_ids: Vec<Uuid>,
}
