//! Column input limits, normalization, and board defaults.

use crate::error::{ErrorCode, ServiceError};

/// Maximum column name length in characters, after trimming.
pub const MAX_COLUMN_NAME_CHARS: usize = 100;

/// Columns every new board is seeded with, with their sparse positions.
pub const DEFAULT_COLUMNS: &[(&str, i64)] =
    &[("To Do", 1000), ("In Progress", 2000), ("Done", 3000)];

/// Trim a column name and enforce the length bounds.
///
/// Empty (or whitespace-only) and over-long names are rejected with
/// `INVALID_COLUMN_NAME`.
pub fn normalize_column_name(name: &str) -> Result<String, ServiceError> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed.chars().count() > MAX_COLUMN_NAME_CHARS {
        return Err(ServiceError::new(
            ErrorCode::InvalidColumnName,
            "Invalid column name",
        ));
    }
    Ok(trimmed.to_string())
}
