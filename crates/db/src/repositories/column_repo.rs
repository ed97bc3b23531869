//! Repository for the `columns` table.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::column::{Column, ColumnWithMeta};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, board_id, name, position, is_collapsed, created_at, updated_at";

/// Reads and mutations for columns. Columns are only created through board
/// bootstrap or duplication and only deleted through board deletion, so
/// there are no standalone insert/delete methods here.
pub struct ColumnRepo;

impl ColumnRepo {
    /// Find a column by id.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Column>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM columns WHERE id = $1");
        sqlx::query_as::<_, Column>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a board's columns with live card counts, ordered by position.
    pub async fn list_with_meta(
        pool: &PgPool,
        board_id: Uuid,
    ) -> Result<Vec<ColumnWithMeta>, sqlx::Error> {
        sqlx::query_as::<_, ColumnWithMeta>(
            "SELECT c.id, c.board_id, c.name, c.position, c.is_collapsed,
                    c.created_at, c.updated_at,
                    (SELECT COUNT(*) FROM cards k WHERE k.column_id = c.id) AS card_count
             FROM columns c
             WHERE c.board_id = $1
             ORDER BY c.position ASC",
        )
        .bind(board_id)
        .fetch_all(pool)
        .await
    }

    /// A board's column ids in position order.
    pub async fn ids_by_position(pool: &PgPool, board_id: Uuid) -> Result<Vec<Uuid>, sqlx::Error> {
        sqlx::query_scalar("SELECT id FROM columns WHERE board_id = $1 ORDER BY position ASC")
            .bind(board_id)
            .fetch_all(pool)
            .await
    }

    /// Count a column's cards.
    pub async fn card_count(pool: &PgPool, column_id: Uuid) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM cards WHERE column_id = $1")
            .bind(column_id)
            .fetch_one(pool)
            .await
    }

    /// Count a board's columns.
    pub async fn count_for_board(pool: &PgPool, board_id: Uuid) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM columns WHERE board_id = $1")
            .bind(board_id)
            .fetch_one(pool)
            .await
    }

    /// Rename a column. Returns `None` if no row with the given `id` exists.
    pub async fn rename(
        pool: &PgPool,
        id: Uuid,
        name: &str,
    ) -> Result<Option<Column>, sqlx::Error> {
        let query = format!(
            "UPDATE columns SET name = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Column>(&query)
            .bind(id)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Collapse or expand a column.
    pub async fn set_collapsed(
        pool: &PgPool,
        id: Uuid,
        is_collapsed: bool,
    ) -> Result<Option<Column>, sqlx::Error> {
        let query = format!(
            "UPDATE columns SET is_collapsed = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Column>(&query)
            .bind(id)
            .bind(is_collapsed)
            .fetch_optional(pool)
            .await
    }

    /// Rewrite column positions in a single transaction. `positions` comes
    /// from the allocator and covers every column of the board.
    pub async fn apply_positions(
        pool: &PgPool,
        board_id: Uuid,
        positions: &[(Uuid, i64)],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;
        for &(id, position) in positions {
            sqlx::query(
                "UPDATE columns SET position = $3, updated_at = NOW()
                 WHERE id = $1 AND board_id = $2",
            )
            .bind(id)
            .bind(board_id)
            .bind(position)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }
}
