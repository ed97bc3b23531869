//! Repository for the `cards` table.

use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::models::card::Card;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, column_id, title, description, position, created_by, created_at, updated_at";

/// CRUD, ordering, and duplication operations for cards.
pub struct CardRepo;

impl CardRepo {
    /// Find a card by id.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Card>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cards WHERE id = $1");
        sqlx::query_as::<_, Card>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a column's cards ordered by position.
    pub async fn list_by_column(pool: &PgPool, column_id: Uuid) -> Result<Vec<Card>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cards WHERE column_id = $1 ORDER BY position ASC");
        sqlx::query_as::<_, Card>(&query)
            .bind(column_id)
            .fetch_all(pool)
            .await
    }

    /// A column's card ids in position order.
    pub async fn ids_by_position(pool: &PgPool, column_id: Uuid) -> Result<Vec<Uuid>, sqlx::Error> {
        sqlx::query_scalar("SELECT id FROM cards WHERE column_id = $1 ORDER BY position ASC")
            .bind(column_id)
            .fetch_all(pool)
            .await
    }

    /// The highest position in a column, or `None` if the column is empty.
    pub async fn max_position(pool: &PgPool, column_id: Uuid) -> Result<Option<i64>, sqlx::Error> {
        sqlx::query_scalar("SELECT MAX(position) FROM cards WHERE column_id = $1")
            .bind(column_id)
            .fetch_one(pool)
            .await
    }

    /// Insert a new card, returning the created row.
    pub async fn create(
        pool: &PgPool,
        column_id: Uuid,
        title: &str,
        description: Option<&str>,
        position: i64,
        created_by: Uuid,
    ) -> Result<Card, sqlx::Error> {
        let query = format!(
            "INSERT INTO cards (column_id, title, description, position, created_by)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Card>(&query)
            .bind(column_id)
            .bind(title)
            .bind(description)
            .bind(position)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Update a card's title and description. The caller supplies the final
    /// values (partial-update resolution happens against the row it already
    /// holds). Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        title: &str,
        description: Option<&str>,
    ) -> Result<Option<Card>, sqlx::Error> {
        let query = format!(
            "UPDATE cards SET title = $2, description = $3, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Card>(&query)
            .bind(id)
            .bind(title)
            .bind(description)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a card. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cards WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Rewrite card positions within one column in a single transaction.
    /// `positions` comes from the allocator and covers every card of the
    /// column.
    pub async fn apply_positions(
        pool: &PgPool,
        column_id: Uuid,
        positions: &[(Uuid, i64)],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;
        for &(id, position) in positions {
            sqlx::query(
                "UPDATE cards SET position = $3, updated_at = NOW()
                 WHERE id = $1 AND column_id = $2",
            )
            .bind(id)
            .bind(column_id)
            .bind(position)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    /// Move a card into `target_column_id`, applying the allocator's
    /// positions for the target's existing cards and the card's new
    /// position in the same transaction so the column change and the
    /// rebalance are atomic.
    ///
    /// Returns `None` if the card vanished before the final update.
    pub async fn move_to_column(
        pool: &PgPool,
        card_id: Uuid,
        target_column_id: Uuid,
        sibling_positions: &[(Uuid, i64)],
        new_position: i64,
    ) -> Result<Option<Card>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        for &(id, position) in sibling_positions {
            sqlx::query(
                "UPDATE cards SET position = $3, updated_at = NOW()
                 WHERE id = $1 AND column_id = $2",
            )
            .bind(id)
            .bind(target_column_id)
            .bind(position)
            .execute(&mut *tx)
            .await?;
        }

        let query = format!(
            "UPDATE cards SET column_id = $2, position = $3, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let card = sqlx::query_as::<_, Card>(&query)
            .bind(card_id)
            .bind(target_column_id)
            .bind(new_position)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(card)
    }

    /// Copy every card of `source_board_id` into `target_board_id`,
    /// matching columns by position value and preserving title,
    /// description, position, creator, and timestamps verbatim. Runs on the
    /// caller's transaction as part of board duplication.
    pub async fn duplicate_cards(
        tx: &mut Transaction<'_, Postgres>,
        source_board_id: Uuid,
        target_board_id: Uuid,
    ) -> Result<(), sqlx::Error> {
        if source_board_id == target_board_id {
            return Ok(());
        }

        let source_columns: Vec<(Uuid, i64)> =
            sqlx::query_as("SELECT id, position FROM columns WHERE board_id = $1")
                .bind(source_board_id)
                .fetch_all(&mut **tx)
                .await?;
        if source_columns.is_empty() {
            return Ok(());
        }

        let target_columns: Vec<(Uuid, i64)> =
            sqlx::query_as("SELECT id, position FROM columns WHERE board_id = $1")
                .bind(target_board_id)
                .fetch_all(&mut **tx)
                .await?;

        for (source_id, source_position) in &source_columns {
            let Some((target_id, _)) = target_columns
                .iter()
                .find(|(_, position)| position == source_position)
            else {
                continue;
            };

            sqlx::query(
                "INSERT INTO cards (column_id, title, description, position,
                                    created_by, created_at, updated_at)
                 SELECT $2, k.title, k.description, k.position,
                        k.created_by, k.created_at, k.updated_at
                 FROM cards k
                 WHERE k.column_id = $1
                 ORDER BY k.position ASC",
            )
            .bind(source_id)
            .bind(target_id)
            .execute(&mut **tx)
            .await?;
        }

        Ok(())
    }
}
