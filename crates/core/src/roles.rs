//! Board roles and capability predicates.
//!
//! A membership row binds a user to a board with a [`BoardRole`]. Every
//! state-changing or state-reading operation is gated by one of the
//! capability predicates below; they are pure functions of the role and are
//! evaluated fresh on every request so role changes take effect immediately.

use serde::{Deserialize, Serialize};

/// Role a user holds on a board, ordered by privilege descending.
///
/// Stored as the Postgres enum `board_role`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "board_role", rename_all = "lowercase")]
pub enum BoardRole {
    Owner,
    Admin,
    Member,
    Viewer,
}

impl BoardRole {
    pub fn as_str(self) -> &'static str {
        match self {
            BoardRole::Owner => "owner",
            BoardRole::Admin => "admin",
            BoardRole::Member => "member",
            BoardRole::Viewer => "viewer",
        }
    }

    /// Parse a wire-format role name. Returns `None` for anything outside
    /// the four known roles; callers map that to `INVALID_ROLE`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "owner" => Some(BoardRole::Owner),
            "admin" => Some(BoardRole::Admin),
            "member" => Some(BoardRole::Member),
            "viewer" => Some(BoardRole::Viewer),
            _ => None,
        }
    }
}

impl std::fmt::Display for BoardRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Any membership may read the board and its contents.
pub fn can_view_board(role: BoardRole) -> bool {
    matches!(
        role,
        BoardRole::Owner | BoardRole::Admin | BoardRole::Member | BoardRole::Viewer
    )
}

/// Update, archive, and duplicate the board.
pub fn can_manage_board(role: BoardRole) -> bool {
    matches!(role, BoardRole::Owner | BoardRole::Admin)
}

/// Add members, change their roles, and remove them.
pub fn can_manage_members(role: BoardRole) -> bool {
    matches!(role, BoardRole::Owner | BoardRole::Admin)
}

/// Rename, collapse, and reorder columns; create, edit, move, and delete
/// cards.
pub fn can_edit_columns(role: BoardRole) -> bool {
    matches!(role, BoardRole::Owner | BoardRole::Admin | BoardRole::Member)
}

/// Delete the board outright.
pub fn can_delete_board(role: BoardRole) -> bool {
    matches!(role, BoardRole::Owner)
}

/// Used to block owner demotion and removal.
pub fn is_owner(role: BoardRole) -> bool {
    matches!(role, BoardRole::Owner)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [BoardRole; 4] = [
        BoardRole::Owner,
        BoardRole::Admin,
        BoardRole::Member,
        BoardRole::Viewer,
    ];

    #[test]
    fn every_role_can_view() {
        for role in ALL {
            assert!(can_view_board(role));
        }
    }

    #[test]
    fn only_owner_and_admin_manage_board_and_members() {
        assert!(can_manage_board(BoardRole::Owner));
        assert!(can_manage_board(BoardRole::Admin));
        assert!(!can_manage_board(BoardRole::Member));
        assert!(!can_manage_board(BoardRole::Viewer));

        assert!(can_manage_members(BoardRole::Admin));
        assert!(!can_manage_members(BoardRole::Viewer));
    }

    #[test]
    fn viewer_cannot_edit_columns() {
        assert!(can_edit_columns(BoardRole::Owner));
        assert!(can_edit_columns(BoardRole::Admin));
        assert!(can_edit_columns(BoardRole::Member));
        assert!(!can_edit_columns(BoardRole::Viewer));
    }

    #[test]
    fn only_owner_deletes() {
        assert!(can_delete_board(BoardRole::Owner));
        assert!(!can_delete_board(BoardRole::Admin));
        assert!(!can_delete_board(BoardRole::Member));
        assert!(!can_delete_board(BoardRole::Viewer));
    }

    #[test]
    fn role_round_trips_through_wire_format() {
        for role in ALL {
            assert_eq!(BoardRole::parse(role.as_str()), Some(role));
        }
        assert_eq!(BoardRole::parse("superuser"), None);
        assert_eq!(BoardRole::parse("Owner"), None);
        assert_eq!(BoardRole::parse(""), None);
    }
}
