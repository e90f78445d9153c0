//! Witching Hour: a cauldron-side rush
//!
//! A terminal game where you play a witch who gathers ingredients around the
//! countryside, brews them into remedies and curses, and sells them to
//! impatient townsfolk before the night runs out.
//!
//! # Game Mechanics
//!
//! - **Gathering**: Each location hides a handful of found ingredients
//! - **Brewing**: Two ingredients make one item, according to a recipe book
//!   that is shuffled every session
//! - **Customers**: Orders pay more the harder they are to brew, and nobody
//!   waits forever
//! - **Time Pressure**: The whole session runs against a wall clock
//!
//! # Architecture
//!
//! - `data` - Items, recipes, locations, customers and the player
//! - `game` - Session orchestration, configuration and the session clock
//! - `tui` - Terminal user interface with ratatui

pub mod data;
pub mod game;
pub mod tui;

pub use data::*;
pub use game::{ActionOutcome, Game, GameAction, GameConfig};

/// Game version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type for the binary and UI layer
pub type Result<T> = anyhow::Result<T>;

/// Result type for core game operations
pub type GameResult<T> = std::result::Result<T, GameError>;

/// Custom error types
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Recipe pool exhausted while writing a recipe for {item} ({tier}): {available} unused ingredient(s) left, 2 needed")]
    RecipePoolExhausted {
        item: String,
        tier: Tier,
        available: usize,
    },

    #[error("Location not found: {0}")]
    UnknownLocation(String),

    #[error("Item not found: {0}")]
    UnknownItem(String),

    #[error("Chapter not found: {0}")]
    UnknownChapter(String),

    #[error("Item not in inventory: {0}")]
    ItemNotInInventory(String),

    #[error("Recipe book has no craftable items to order")]
    NoCraftableItems,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid asset data: {0}")]
    InvalidAssets(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}
