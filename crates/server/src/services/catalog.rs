//! Catalog administration: create, update and delete games.

use rust_decimal::Decimal;
use sqlx::SqlitePool;
use thiserror::Error;

use gamevault_core::GameId;

use crate::db::{GameRepository, RepositoryError};
use crate::models::{Game, NewGame};

/// Errors that can occur during catalog administration.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A required field is absent or blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// The price field did not parse as a decimal.
    #[error("price must be a valid number")]
    InvalidPrice,

    /// The price is negative.
    #[error("price must not be negative")]
    NegativePrice,

    /// Another game already carries this title.
    #[error("a game with this title already exists")]
    DuplicateTitle,

    /// No game with the given id.
    #[error("game not found")]
    NotFound,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(RepositoryError),
}

impl From<RepositoryError> for CatalogError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::Conflict(_) => Self::DuplicateTitle,
            RepositoryError::NotFound => Self::NotFound,
            other => Self::Repository(other),
        }
    }
}

/// Raw catalog-entry fields as collected from a request.
#[derive(Debug, Clone, Default)]
pub struct GameInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub genre: Option<String>,
    pub platform: Option<String>,
    pub image_path: Option<String>,
}

/// Catalog administration service.
pub struct CatalogService<'a> {
    games: GameRepository<'a>,
}

impl<'a> CatalogService<'a> {
    /// Create a new catalog service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            games: GameRepository::new(pool),
        }
    }

    /// List the whole catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Repository` on database failure.
    pub async fn list(&self) -> Result<Vec<Game>, CatalogError> {
        Ok(self.games.list().await?)
    }

    /// Create a catalog entry; its inventory row starts at zero stock.
    ///
    /// # Errors
    ///
    /// Returns a validation variant for bad input and
    /// `CatalogError::DuplicateTitle` when the title is taken.
    pub async fn create(&self, input: GameInput) -> Result<Game, CatalogError> {
        let new = validate(input)?;
        Ok(self.games.create(&new).await?)
    }

    /// Update a game's title, price and description.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the game doesn't exist and
    /// `CatalogError::DuplicateTitle` when the new title collides.
    pub async fn update(&self, id: GameId, input: GameInput) -> Result<Game, CatalogError> {
        let title = required(input.title, "title")?;
        let description = required(input.description, "description")?;
        let price = parse_price(input.price)?;

        self.games.update(id, &title, price, &description).await?;

        self.games
            .get(id)
            .await?
            .ok_or(CatalogError::NotFound)
    }

    /// Delete a game, cascading to its order items and inventory row.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the game doesn't exist.
    pub async fn delete(&self, id: GameId) -> Result<(), CatalogError> {
        Ok(self.games.delete(id).await?)
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, CatalogError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(CatalogError::MissingField(field)),
    }
}

fn parse_price(raw: Option<String>) -> Result<Decimal, CatalogError> {
    let raw = required(raw, "price")?;
    let price: Decimal = raw.trim().parse().map_err(|_| CatalogError::InvalidPrice)?;
    if price.is_sign_negative() {
        return Err(CatalogError::NegativePrice);
    }
    Ok(price)
}

fn validate(input: GameInput) -> Result<NewGame, CatalogError> {
    // The image is part of the create contract, same as the text fields.
    let image_path = input
        .image_path
        .ok_or(CatalogError::MissingField("image"))?;

    Ok(NewGame {
        title: required(input.title, "title")?,
        description: required(input.description, "description")?,
        price: parse_price(input.price)?,
        genre: required(input.genre, "genre")?,
        platform: required(input.platform, "platform")?,
        image_path: Some(image_path),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn full_input() -> GameInput {
        GameInput {
            title: Some("Hollow Depths".to_owned()),
            description: Some("A descent into a ruined kingdom.".to_owned()),
            price: Some("29.99".to_owned()),
            genre: Some("Metroidvania".to_owned()),
            platform: Some("PC".to_owned()),
            image_path: Some("uploads/abc-cover.png".to_owned()),
        }
    }

    #[test]
    fn test_validate_accepts_full_input() {
        let new = validate(full_input()).unwrap();
        assert_eq!(new.title, "Hollow Depths");
        assert_eq!(new.price.to_string(), "29.99");
        assert_eq!(new.image_path.as_deref(), Some("uploads/abc-cover.png"));
    }

    #[test]
    fn test_validate_rejects_missing_image() {
        let mut input = full_input();
        input.image_path = None;
        assert!(matches!(
            validate(input),
            Err(CatalogError::MissingField("image"))
        ));
    }

    #[test]
    fn test_validate_rejects_blank_title() {
        let mut input = full_input();
        input.title = Some("   ".to_owned());
        assert!(matches!(
            validate(input),
            Err(CatalogError::MissingField("title"))
        ));
    }

    #[test]
    fn test_validate_rejects_missing_platform() {
        let mut input = full_input();
        input.platform = None;
        assert!(matches!(
            validate(input),
            Err(CatalogError::MissingField("platform"))
        ));
    }

    #[test]
    fn test_parse_price_rejects_garbage_and_negatives() {
        assert!(matches!(
            parse_price(Some("abc".to_owned())),
            Err(CatalogError::InvalidPrice)
        ));
        assert!(matches!(
            parse_price(Some("-5".to_owned())),
            Err(CatalogError::NegativePrice)
        ));
        assert_eq!(parse_price(Some(" 10.50 ".to_owned())).unwrap().to_string(), "10.50");
    }
}
