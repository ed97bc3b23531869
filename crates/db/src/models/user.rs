//! User entity model and DTOs.
//!
//! Users are owned by the external auth subsystem; this crate only reads
//! them for member enrichment and applies profile updates.

use corkboard_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A user row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub image: Option<String>,
    pub email_verified: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for a partial profile update. Only non-`None` fields are applied.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUserProfile {
    pub name: Option<String>,
    pub image: Option<String>,
}
