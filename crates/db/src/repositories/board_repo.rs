//! Repository for the `boards` table and board-level transactions.

use corkboard_core::columns::DEFAULT_COLUMNS;
use corkboard_core::roles::BoardRole;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::board::{Board, BoardSummary};
use crate::models::column::Column;
use crate::repositories::card_repo::CardRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, owner_user_id, is_archived, created_at, updated_at";

const COLUMN_COLUMNS: &str = "id, board_id, name, position, is_collapsed, created_at, updated_at";

/// CRUD and lifecycle transactions for boards.
pub struct BoardRepo;

impl BoardRepo {
    /// Find a board by id.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Board>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM boards WHERE id = $1");
        sqlx::query_as::<_, Board>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every board where the user holds any membership, with the
    /// user's role and live member/column counts, ordered by title.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<BoardSummary>, sqlx::Error> {
        sqlx::query_as::<_, BoardSummary>(
            "SELECT b.id, b.title, b.description, b.is_archived, b.created_at, b.updated_at,
                    m.role,
                    (SELECT COUNT(*) FROM board_members bm WHERE bm.board_id = b.id) AS member_count,
                    (SELECT COUNT(*) FROM columns c WHERE c.board_id = b.id) AS column_count
             FROM board_members m
             INNER JOIN boards b ON b.id = m.board_id
             WHERE m.user_id = $1
             ORDER BY b.title ASC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Create a board in a single transaction: the board row, an `owner`
    /// membership for `owner_id`, and the three default columns.
    pub async fn create_with_defaults(
        pool: &PgPool,
        owner_id: Uuid,
        title: &str,
        description: Option<&str>,
    ) -> Result<(Board, Vec<Column>), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_board = format!(
            "INSERT INTO boards (title, description, owner_user_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let board = sqlx::query_as::<_, Board>(&insert_board)
            .bind(title)
            .bind(description)
            .bind(owner_id)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO board_members (board_id, user_id, role) VALUES ($1, $2, $3)")
            .bind(board.id)
            .bind(owner_id)
            .bind(BoardRole::Owner)
            .execute(&mut *tx)
            .await?;

        let insert_column = format!(
            "INSERT INTO columns (board_id, name, position)
             VALUES ($1, $2, $3)
             RETURNING {COLUMN_COLUMNS}"
        );
        let mut columns = Vec::with_capacity(DEFAULT_COLUMNS.len());
        for &(name, position) in DEFAULT_COLUMNS {
            let column = sqlx::query_as::<_, Column>(&insert_column)
                .bind(board.id)
                .bind(name)
                .bind(position)
                .fetch_one(&mut *tx)
                .await?;
            columns.push(column);
        }

        tx.commit().await?;
        Ok((board, columns))
    }

    /// Update a board's title and description. The caller supplies the
    /// final values (partial-update resolution happens against the row it
    /// already holds).
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        title: &str,
        description: Option<&str>,
    ) -> Result<Option<Board>, sqlx::Error> {
        let query = format!(
            "UPDATE boards SET title = $2, description = $3, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Board>(&query)
            .bind(id)
            .bind(title)
            .bind(description)
            .fetch_optional(pool)
            .await
    }

    /// Archive or unarchive a board.
    pub async fn set_archived(
        pool: &PgPool,
        id: Uuid,
        is_archived: bool,
    ) -> Result<Option<Board>, sqlx::Error> {
        let query = format!(
            "UPDATE boards SET is_archived = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Board>(&query)
            .bind(id)
            .bind(is_archived)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a board. Columns, cards, and memberships go with it via
    /// the cascading foreign keys. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM boards WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Deep-copy a board in one transaction: a new board owned by
    /// `new_owner_id` (with a fresh `owner` membership), every column
    /// copied verbatim (name, position, collapsed state), and every card
    /// copied into the matching column. Memberships are not copied.
    pub async fn duplicate(
        pool: &PgPool,
        source: &Board,
        title: &str,
        new_owner_id: Uuid,
    ) -> Result<Board, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_board = format!(
            "INSERT INTO boards (title, description, owner_user_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let board = sqlx::query_as::<_, Board>(&insert_board)
            .bind(title)
            .bind(&source.description)
            .bind(new_owner_id)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO board_members (board_id, user_id, role) VALUES ($1, $2, $3)")
            .bind(board.id)
            .bind(new_owner_id)
            .bind(BoardRole::Owner)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO columns (board_id, name, position, is_collapsed, created_at, updated_at)
             SELECT $2, c.name, c.position, c.is_collapsed, c.created_at, c.updated_at
             FROM columns c
             WHERE c.board_id = $1
             ORDER BY c.position ASC",
        )
        .bind(source.id)
        .bind(board.id)
        .execute(&mut *tx)
        .await?;

        CardRepo::duplicate_cards(&mut tx, source.id, board.id).await?;

        tx.commit().await?;
        Ok(board)
    }
}
