//! Text adventure played over framed messages.
//!
//! A [`WorldGenerator`] builds a grid of rooms with trophies scattered across it.
//! The [`CommandParser`] turns each player message into a reply, updating the
//! [`World`] as the player moves and picks things up.

mod generator;
mod parser;
mod world;

use thiserror::Error;

pub use generator::{GeneratorAssets, WorldAssets, WorldGenerator, GENERATOR_FILE, THINGS_FILE};
pub use parser::{Command, CommandParser};
pub use world::{Direction, Room, Thing, World};

/// Game-specific error type
#[derive(Debug, Error)]
pub enum GameError {
    #[error("Failed to read asset file {path}: {source}")]
    AssetsIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid asset JSON: {0}")]
    InvalidAssets(#[source] serde_json::Error),

    #[error("Asset list `{0}` is empty")]
    EmptyAssetList(&'static str),

    #[error("Grid size {size} is below the minimum of {min}")]
    GridTooSmall { size: usize, min: usize },
}

/// Result type for game operations
pub type GameResult<T> = Result<T, GameError>;
