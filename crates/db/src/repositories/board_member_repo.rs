//! Repository for the `board_members` table.

use corkboard_core::roles::BoardRole;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::board_member::{BoardMember, BoardMemberInfo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, board_id, user_id, role, joined_at";

/// Membership lookups and mutations. Owner-protection rules live in the
/// API layer; this repository is mechanical.
pub struct BoardMemberRepo;

impl BoardMemberRepo {
    /// Find the membership binding a user to a board.
    pub async fn find(
        pool: &PgPool,
        board_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<BoardMember>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM board_members WHERE board_id = $1 AND user_id = $2");
        sqlx::query_as::<_, BoardMember>(&query)
            .bind(board_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a membership, returning the created row.
    pub async fn insert(
        pool: &PgPool,
        board_id: Uuid,
        user_id: Uuid,
        role: BoardRole,
    ) -> Result<BoardMember, sqlx::Error> {
        let query = format!(
            "INSERT INTO board_members (board_id, user_id, role)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BoardMember>(&query)
            .bind(board_id)
            .bind(user_id)
            .bind(role)
            .fetch_one(pool)
            .await
    }

    /// List a board's members joined with user display fields, ordered by
    /// user name.
    pub async fn list_info(
        pool: &PgPool,
        board_id: Uuid,
    ) -> Result<Vec<BoardMemberInfo>, sqlx::Error> {
        sqlx::query_as::<_, BoardMemberInfo>(
            "SELECT m.id, m.board_id, m.user_id, m.role, u.name, u.email, u.image, m.joined_at
             FROM board_members m
             INNER JOIN users u ON u.id = m.user_id
             WHERE m.board_id = $1
             ORDER BY u.name ASC",
        )
        .bind(board_id)
        .fetch_all(pool)
        .await
    }

    /// Count a board's members.
    pub async fn count_for_board(pool: &PgPool, board_id: Uuid) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM board_members WHERE board_id = $1")
            .bind(board_id)
            .fetch_one(pool)
            .await
    }

    /// Count a board's owner memberships. Backs the sole-owner protection.
    pub async fn count_owners(pool: &PgPool, board_id: Uuid) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM board_members WHERE board_id = $1 AND role = 'owner'",
        )
        .bind(board_id)
        .fetch_one(pool)
        .await
    }

    /// Change a member's role. Returns `None` if no such membership exists.
    pub async fn update_role(
        pool: &PgPool,
        board_id: Uuid,
        user_id: Uuid,
        role: BoardRole,
    ) -> Result<Option<BoardMember>, sqlx::Error> {
        let query = format!(
            "UPDATE board_members SET role = $3
             WHERE board_id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BoardMember>(&query)
            .bind(board_id)
            .bind(user_id)
            .bind(role)
            .fetch_optional(pool)
            .await
    }

    /// Remove a membership. Returns `true` if a row was removed.
    pub async fn remove(
        pool: &PgPool,
        board_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM board_members WHERE board_id = $1 AND user_id = $2")
            .bind(board_id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
