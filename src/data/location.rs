//! Locations and the world map

use super::{AssetData, Direction, Item};
use crate::{GameError, GameResult};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::debug;

/// The six places the witch can be
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LocationName {
    Cauldron,
    Swamp,
    Forest,
    Town,
    Cave,
    Graveyard,
}

impl LocationName {
    pub const ALL: [LocationName; 6] = [
        LocationName::Cauldron,
        LocationName::Swamp,
        LocationName::Forest,
        LocationName::Town,
        LocationName::Cave,
        LocationName::Graveyard,
    ];

    /// Where the witch lives, brews, and starts
    pub const HOME: LocationName = LocationName::Cauldron;

    /// Where customers wait for their orders
    pub const MARKET: LocationName = LocationName::Town;

    pub fn as_str(&self) -> &'static str {
        match self {
            LocationName::Cauldron => "Cauldron",
            LocationName::Swamp => "Swamp",
            LocationName::Forest => "Forest",
            LocationName::Town => "Town",
            LocationName::Cave => "Cave",
            LocationName::Graveyard => "Graveyard",
        }
    }

    /// The home cannot hold found items
    pub fn holds_items(&self) -> bool {
        *self != Self::HOME
    }
}

impl FromStr for LocationName {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LocationName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| GameError::UnknownLocation(s.to_string()))
    }
}

impl std::fmt::Display for LocationName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A place on the map
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub name: LocationName,
    pub neighbors: BTreeMap<Direction, LocationName>,
    /// `None` where nothing can ever be found
    pub items: Option<Vec<Item>>,
    pub flavor: Vec<String>,
}

impl Location {
    pub fn neighbor(&self, direction: Direction) -> Option<LocationName> {
        self.neighbors.get(&direction).copied()
    }

    pub fn items(&self) -> &[Item] {
        self.items.as_deref().unwrap_or(&[])
    }

    /// Pick a line to show on arrival
    pub fn spooky<R: Rng>(&self, rng: &mut R) -> Option<&str> {
        self.flavor.choose(rng).map(String::as_str)
    }
}

/// All locations, built once per session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldMap {
    pub locations: Vec<Location>,
}

impl WorldMap {
    /// Build every location from the tables, with empty item lists
    pub fn build(assets: &AssetData) -> GameResult<Self> {
        let locations = LocationName::ALL
            .into_iter()
            .map(|name| {
                Ok(Location {
                    name,
                    neighbors: assets.neighbors_of(name)?,
                    items: name.holds_items().then(Vec::new),
                    flavor: assets.flavor_for(name).to_vec(),
                })
            })
            .collect::<GameResult<Vec<_>>>()?;
        Ok(Self { locations })
    }

    pub fn get(&self, name: LocationName) -> &Location {
        // Every LocationName is built by `build`
        &self.locations[name as usize]
    }

    pub fn get_mut(&mut self, name: LocationName) -> &mut Location {
        &mut self.locations[name as usize]
    }

    /// Look up a location by its display name
    pub fn by_name(&self, name: &str) -> GameResult<&Location> {
        let name: LocationName = name.parse()?;
        Ok(self.get(name))
    }

    /// Scatter found items across every location that can hold them
    ///
    /// Each location gets `F / L` items first; the `F % L` leftovers go to
    /// random locations one at a time. Every item lands exactly once.
    pub fn distribute_items<R: Rng>(&mut self, mut found: Vec<Item>, rng: &mut R) {
        let holders: Vec<usize> = self
            .locations
            .iter()
            .enumerate()
            .filter(|(_, loc)| loc.items.is_some())
            .map(|(i, _)| i)
            .collect();
        if holders.is_empty() {
            return;
        }

        let per_location = found.len() / holders.len();
        let leftover = found.len() % holders.len();

        for &index in &holders {
            for _ in 0..per_location {
                let item = found.swap_remove(rng.gen_range(0..found.len()));
                self.stock(index, item);
            }
        }
        for _ in 0..leftover {
            let index = holders[rng.gen_range(0..holders.len())];
            let item = found.swap_remove(rng.gen_range(0..found.len()));
            self.stock(index, item);
        }

        for location in &self.locations {
            debug!(location = %location.name, items = location.items().len(), "location stocked");
        }
    }

    fn stock(&mut self, index: usize, item: Item) {
        if let Some(items) = self.locations[index].items.as_mut() {
            items.push(item);
        }
    }
}
