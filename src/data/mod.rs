//! Data structures for the game world
//!
//! Defines items, recipes, locations, customers and the player.

pub mod assets;
pub mod customer;
pub mod item;
pub mod location;
pub mod player;

pub use assets::*;
pub use customer::*;
pub use item::*;
pub use location::*;
pub use player::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Digit keys 0-8 pick from a list; 9 is undo
pub const SELECTION_KEYS: usize = 9;

/// Difficulty tier of an item
///
/// Tiers are ordered: an item's recipe may only use ingredients from a
/// strictly lower tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    Found,
    Basic,
    Intermediate,
    Advanced,
}

impl Tier {
    /// All tiers in generation order
    pub const ALL: [Tier; 4] = [Tier::Found, Tier::Basic, Tier::Intermediate, Tier::Advanced];

    /// Whether items of this tier are brewed rather than found
    pub fn is_craftable(&self) -> bool {
        !matches!(self, Tier::Found)
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Tier::Found => "·",
            Tier::Basic => "◆",
            Tier::Intermediate => "▲",
            Tier::Advanced => "★",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tier::Found => write!(f, "FOUND"),
            Tier::Basic => write!(f, "BASIC"),
            Tier::Intermediate => write!(f, "INTERMEDIATE"),
            Tier::Advanced => write!(f, "ADVANCED"),
        }
    }
}

/// Compass direction between neighboring locations
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "N")]
    North,
    #[serde(rename = "S")]
    South,
    #[serde(rename = "E")]
    East,
    #[serde(rename = "W")]
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::North, Direction::South, Direction::East, Direction::West];

    /// Single-letter code used by the map tables
    pub fn code(&self) -> &'static str {
        match self {
            Direction::North => "N",
            Direction::South => "S",
            Direction::East => "E",
            Direction::West => "W",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "N" => Some(Direction::North),
            "S" => Some(Direction::South),
            "E" => Some(Direction::East),
            "W" => Some(Direction::West),
            _ => None,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A unique identifier wrapper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Id(pub Uuid);

impl Id {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for Id {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_order() {
        assert!(Tier::Found < Tier::Basic);
        assert!(Tier::Basic < Tier::Intermediate);
        assert!(Tier::Intermediate < Tier::Advanced);
        assert!(!Tier::Found.is_craftable());
        assert!(Tier::Advanced.is_craftable());
    }

    #[test]
    fn test_direction_codes() {
        for direction in Direction::ALL {
            assert_eq!(Direction::from_code(direction.code()), Some(direction));
        }
        assert_eq!(Direction::from_code("NE"), None);
    }
}
