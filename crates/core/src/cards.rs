//! Card input limits and normalization.

use crate::error::{ErrorCode, ServiceError};

/// Maximum card title length in characters, after trimming.
pub const MAX_CARD_TITLE_CHARS: usize = 500;

/// Maximum card description length in characters, after trimming.
pub const MAX_CARD_DESCRIPTION_CHARS: usize = 10_000;

/// Trim a card title and enforce the length bounds.
///
/// Empty (or whitespace-only) and over-long titles are rejected with
/// `INVALID_CARD_TITLE`.
pub fn normalize_card_title(title: &str) -> Result<String, ServiceError> {
    let trimmed = title.trim();
    if trimmed.is_empty() || trimmed.chars().count() > MAX_CARD_TITLE_CHARS {
        return Err(ServiceError::new(
            ErrorCode::InvalidCardTitle,
            "Invalid card title",
        ));
    }
    Ok(trimmed.to_string())
}

/// Trim a card description and enforce the length bound.
///
/// An empty string after trimming normalizes to `None`; over-long input is
/// rejected with `INVALID_CARD_DESCRIPTION`.
pub fn normalize_card_description(description: &str) -> Result<Option<String>, ServiceError> {
    let trimmed = description.trim();
    if trimmed.chars().count() > MAX_CARD_DESCRIPTION_CHARS {
        return Err(ServiceError::new(
            ErrorCode::InvalidCardDescription,
            "Description too long",
        ));
    }
    if trimmed.is_empty() {
        Ok(None)
    } else {
        Ok(Some(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_is_trimmed() {
        assert_eq!(normalize_card_title("  Ship it  ").unwrap(), "Ship it");
    }

    #[test]
    fn whitespace_only_title_is_rejected() {
        let err = normalize_card_title("   ").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidCardTitle);
    }

    #[test]
    fn title_at_limit_is_accepted() {
        let title = "x".repeat(MAX_CARD_TITLE_CHARS);
        assert_eq!(normalize_card_title(&title).unwrap(), title);
    }

    #[test]
    fn title_over_limit_is_rejected() {
        let title = "x".repeat(MAX_CARD_TITLE_CHARS + 1);
        let err = normalize_card_title(&title).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidCardTitle);
    }

    #[test]
    fn empty_description_normalizes_to_none() {
        assert_eq!(normalize_card_description("").unwrap(), None);
        assert_eq!(normalize_card_description("   ").unwrap(), None);
    }

    #[test]
    fn description_is_trimmed() {
        assert_eq!(
            normalize_card_description(" details ").unwrap(),
            Some("details".to_string())
        );
    }

    #[test]
    fn description_over_limit_is_rejected() {
        let description = "x".repeat(MAX_CARD_DESCRIPTION_CHARS + 1);
        let err = normalize_card_description(&description).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidCardDescription);
    }
}
