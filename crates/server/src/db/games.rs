//! Game repository for catalog database operations.

use sqlx::SqlitePool;

use gamevault_core::GameId;

use super::{RepositoryError, map_unique_violation, parse_decimal};
use crate::models::{Game, NewGame};

/// Raw row shape; decimals come back as TEXT and are parsed into the model.
#[derive(sqlx::FromRow)]
struct GameRow {
    id: i64,
    title: String,
    description: String,
    price: String,
    genre: String,
    platform: String,
    image_path: Option<String>,
}

impl GameRow {
    fn into_game(self) -> Result<Game, RepositoryError> {
        Ok(Game {
            id: GameId::new(self.id),
            title: self.title,
            description: self.description,
            price: parse_decimal(&self.price, "games.price")?,
            genre: self.genre,
            platform: self.platform,
            image_path: self.image_path,
        })
    }
}

/// Repository for catalog database operations.
pub struct GameRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> GameRepository<'a> {
    /// Create a new game repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List the whole catalog.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Game>, RepositoryError> {
        let rows = sqlx::query_as::<_, GameRow>(
            r"
            SELECT id, title, description, price, genre, platform, image_path
            FROM games
            ORDER BY id ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(GameRow::into_game).collect()
    }

    /// Get a game by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: GameId) -> Result<Option<Game>, RepositoryError> {
        let row = sqlx::query_as::<_, GameRow>(
            r"
            SELECT id, title, description, price, genre, platform, image_path
            FROM games
            WHERE id = ?
            ",
        )
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        row.map(GameRow::into_game).transpose()
    }

    /// Create a catalog entry and its inventory row in one transaction.
    ///
    /// The duplicate-title check runs inside the transaction (case-sensitive
    /// exact match); the UNIQUE constraint on `title` is the backstop.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if a game with the same title exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, new: &NewGame) -> Result<Game, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM games WHERE title = ?")
            .bind(&new.title)
            .fetch_optional(&mut *tx)
            .await?;

        if existing.is_some() {
            return Err(RepositoryError::Conflict(
                "a game with this title already exists".to_owned(),
            ));
        }

        let id: i64 = sqlx::query_scalar(
            r"
            INSERT INTO games (title, description, price, genre, platform, image_path)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id
            ",
        )
        .bind(&new.title)
        .bind(&new.description)
        .bind(new.price.to_string())
        .bind(&new.genre)
        .bind(&new.platform)
        .bind(&new.image_path)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, "a game with this title already exists"))?;

        sqlx::query("INSERT INTO inventory (game_id, stock_quantity) VALUES (?, 0)")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Game {
            id: GameId::new(id),
            title: new.title.clone(),
            description: new.description.clone(),
            price: new.price,
            genre: new.genre.clone(),
            platform: new.platform.clone(),
            image_path: new.image_path.clone(),
        })
    }

    /// Update a game's title, price and description.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the game doesn't exist.
    /// Returns `RepositoryError::Conflict` if the new title collides.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: GameId,
        title: &str,
        price: rust_decimal::Decimal,
        description: &str,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE games
            SET title = ?, price = ?, description = ?
            WHERE id = ?
            ",
        )
        .bind(title)
        .bind(price.to_string())
        .bind(description)
        .bind(id.as_i64())
        .execute(self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "a game with this title already exists"))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Delete a game, cascading to its order items and inventory row.
    ///
    /// The cascade removes referencing rows, it does not null them; prior
    /// orders keep listing through the report's placeholder title.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the game doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: GameId) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM order_items WHERE game_id = ?")
            .bind(id.as_i64())
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM inventory WHERE game_id = ?")
            .bind(id.as_i64())
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM games WHERE id = ?")
            .bind(id.as_i64())
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    /// Filter a list of game IDs down to the ones that exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn existing_ids(&self, ids: &[GameId]) -> Result<Vec<GameId>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder = sqlx::QueryBuilder::new("SELECT id FROM games WHERE id IN (");
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(id.as_i64());
        }
        separated.push_unseparated(")");

        let found: Vec<i64> = builder.build_query_scalar().fetch_all(self.pool).await?;

        Ok(found.into_iter().map(GameId::new).collect())
    }

    /// Current stock for a game, if it has an inventory row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn stock(&self, id: GameId) -> Result<Option<i64>, RepositoryError> {
        let stock: Option<i64> =
            sqlx::query_scalar("SELECT stock_quantity FROM inventory WHERE game_id = ?")
                .bind(id.as_i64())
                .fetch_optional(self.pool)
                .await?;

        Ok(stock)
    }

    /// Set the stock for a game (seeding and admin adjustments).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the game has no inventory row.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn set_stock(&self, id: GameId, quantity: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE inventory SET stock_quantity = ? WHERE game_id = ?")
            .bind(quantity)
            .bind(id.as_i64())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
