//! Catalog seeding command.

use rust_decimal::Decimal;

use gamevault_server::db::{GameRepository, RepositoryError};
use gamevault_server::models::NewGame;

use super::{CliError, connect};

struct Seed {
    title: &'static str,
    description: &'static str,
    price: &'static str,
    genre: &'static str,
    platform: &'static str,
    stock: i64,
}

const SEEDS: &[Seed] = &[
    Seed {
        title: "Starfall Drifters",
        description: "Open-galaxy trading and dogfighting with a living economy.",
        price: "59.99",
        genre: "Space Sim",
        platform: "PC",
        stock: 40,
    },
    Seed {
        title: "Hollow Depths",
        description: "A descent into a ruined kingdom full of secrets.",
        price: "29.99",
        genre: "Metroidvania",
        platform: "PC",
        stock: 120,
    },
    Seed {
        title: "Gridiron Tactics 26",
        description: "Turn-based football management with deep playbooks.",
        price: "49.99",
        genre: "Sports",
        platform: "PlayStation 5",
        stock: 75,
    },
    Seed {
        title: "Lanternfall",
        description: "Cozy village-building under an eternal night sky.",
        price: "19.99",
        genre: "Simulation",
        platform: "Switch",
        stock: 200,
    },
];

/// Insert sample catalog rows with stock. Already-present titles are skipped.
pub async fn run() -> Result<(), CliError> {
    let pool = connect().await?;
    let games = GameRepository::new(&pool);

    for seed in SEEDS {
        let price: Decimal = seed
            .price
            .parse()
            .map_err(|e| RepositoryError::DataCorruption(format!("bad seed price: {e}")))?;

        let new = NewGame {
            title: seed.title.to_owned(),
            description: seed.description.to_owned(),
            price,
            genre: seed.genre.to_owned(),
            platform: seed.platform.to_owned(),
            image_path: None,
        };

        match games.create(&new).await {
            Ok(game) => {
                games.set_stock(game.id, seed.stock).await?;
                tracing::info!("Seeded {} (stock {})", seed.title, seed.stock);
            }
            Err(RepositoryError::Conflict(_)) => {
                tracing::info!("Skipping {} (already present)", seed.title);
            }
            Err(e) => return Err(e.into()),
        }
    }

    tracing::info!("Seeding complete");
    Ok(())
}
