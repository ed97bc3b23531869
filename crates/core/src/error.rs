//! Service error taxonomy.
//!
//! Every fallible domain operation surfaces a [`ServiceError`] carrying a
//! human-readable message and a machine [`ErrorCode`]. The code determines
//! the HTTP status; the API crate maps the pair into the JSON error envelope.

/// Machine-readable error codes surfaced to API clients.
///
/// Each code maps to exactly one HTTP status via [`ErrorCode::http_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // 404
    BoardNotFound,
    ColumnNotFound,
    CardNotFound,
    BoardMemberNotFound,
    UserNotFound,

    // 403
    BoardForbidden,
    BoardUpdateForbidden,
    BoardArchiveForbidden,
    BoardDeleteForbidden,
    BoardDuplicateForbidden,
    BoardMemberForbidden,
    BoardOwnerModifyForbidden,
    BoardOwnerRemoveForbidden,
    ColumnForbidden,

    // 400
    InvalidCardTitle,
    InvalidCardDescription,
    InvalidColumnName,
    InvalidColumnOrder,
    InvalidCardOrder,
    InvalidRole,
    BoardMemberSelf,
    CardCrossBoardMove,

    // 409
    BoardMemberExists,

    // 405 -- disabled by design
    ColumnCreateDisabled,
    ColumnDeleteDisabled,

    // 500
    BoardCreateFailed,
    BoardDuplicateFailed,
    CardCreateFailed,
}

impl ErrorCode {
    /// The HTTP status this code is reported with.
    pub fn http_status(self) -> u16 {
        use ErrorCode::*;
        match self {
            BoardNotFound | ColumnNotFound | CardNotFound | BoardMemberNotFound
            | UserNotFound => 404,
            BoardForbidden | BoardUpdateForbidden | BoardArchiveForbidden
            | BoardDeleteForbidden | BoardDuplicateForbidden | BoardMemberForbidden
            | BoardOwnerModifyForbidden | BoardOwnerRemoveForbidden | ColumnForbidden => 403,
            InvalidCardTitle | InvalidCardDescription | InvalidColumnName
            | InvalidColumnOrder | InvalidCardOrder | InvalidRole | BoardMemberSelf
            | CardCrossBoardMove => 400,
            BoardMemberExists => 409,
            ColumnCreateDisabled | ColumnDeleteDisabled => 405,
            BoardCreateFailed | BoardDuplicateFailed | CardCreateFailed => 500,
        }
    }

    /// The wire representation of this code (`SCREAMING_SNAKE_CASE`).
    pub fn as_str(self) -> &'static str {
        use ErrorCode::*;
        match self {
            BoardNotFound => "BOARD_NOT_FOUND",
            ColumnNotFound => "COLUMN_NOT_FOUND",
            CardNotFound => "CARD_NOT_FOUND",
            BoardMemberNotFound => "BOARD_MEMBER_NOT_FOUND",
            UserNotFound => "USER_NOT_FOUND",
            BoardForbidden => "BOARD_FORBIDDEN",
            BoardUpdateForbidden => "BOARD_UPDATE_FORBIDDEN",
            BoardArchiveForbidden => "BOARD_ARCHIVE_FORBIDDEN",
            BoardDeleteForbidden => "BOARD_DELETE_FORBIDDEN",
            BoardDuplicateForbidden => "BOARD_DUPLICATE_FORBIDDEN",
            BoardMemberForbidden => "BOARD_MEMBER_FORBIDDEN",
            BoardOwnerModifyForbidden => "BOARD_OWNER_MODIFY_FORBIDDEN",
            BoardOwnerRemoveForbidden => "BOARD_OWNER_REMOVE_FORBIDDEN",
            ColumnForbidden => "COLUMN_FORBIDDEN",
            InvalidCardTitle => "INVALID_CARD_TITLE",
            InvalidCardDescription => "INVALID_CARD_DESCRIPTION",
            InvalidColumnName => "INVALID_COLUMN_NAME",
            InvalidColumnOrder => "INVALID_COLUMN_ORDER",
            InvalidCardOrder => "INVALID_CARD_ORDER",
            InvalidRole => "INVALID_ROLE",
            BoardMemberSelf => "BOARD_MEMBER_SELF",
            CardCrossBoardMove => "CARD_CROSS_BOARD_MOVE",
            BoardMemberExists => "BOARD_MEMBER_EXISTS",
            ColumnCreateDisabled => "COLUMN_CREATE_DISABLED",
            ColumnDeleteDisabled => "COLUMN_DELETE_DISABLED",
            BoardCreateFailed => "BOARD_CREATE_FAILED",
            BoardDuplicateFailed => "BOARD_DUPLICATE_FAILED",
            CardCreateFailed => "CARD_CREATE_FAILED",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed service error: message + HTTP-style status + machine code.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct ServiceError {
    pub code: ErrorCode,
    pub message: String,
}

impl ServiceError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// The HTTP status this error is reported with.
    pub fn status(&self) -> u16 {
        self.code.http_status()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_per_category() {
        assert_eq!(ErrorCode::BoardNotFound.http_status(), 404);
        assert_eq!(ErrorCode::ColumnForbidden.http_status(), 403);
        assert_eq!(ErrorCode::InvalidCardTitle.http_status(), 400);
        assert_eq!(ErrorCode::BoardMemberExists.http_status(), 409);
        assert_eq!(ErrorCode::ColumnCreateDisabled.http_status(), 405);
        assert_eq!(ErrorCode::BoardCreateFailed.http_status(), 500);
    }

    #[test]
    fn wire_representation_is_screaming_snake_case() {
        assert_eq!(ErrorCode::BoardNotFound.as_str(), "BOARD_NOT_FOUND");
        assert_eq!(
            ErrorCode::BoardOwnerRemoveForbidden.as_str(),
            "BOARD_OWNER_REMOVE_FORBIDDEN"
        );
        assert_eq!(ErrorCode::CardCrossBoardMove.as_str(), "CARD_CROSS_BOARD_MOVE");
    }

    #[test]
    fn service_error_displays_message() {
        let err = ServiceError::new(ErrorCode::CardNotFound, "Card not found");
        assert_eq!(err.to_string(), "Card not found");
        assert_eq!(err.status(), 404);
    }
}
