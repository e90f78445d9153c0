//! The witch herself

use super::{Customer, Direction, Item, LocationName, WorldMap};
use crate::{GameError, GameResult};
use serde::{Deserialize, Serialize};

/// Default number of inventory slots
pub const INVENTORY_CAPACITY: usize = 9;

/// What happened to a delivered item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The customer got what they ordered
    Filled { points: u32 },
    /// Wrong item; it is gone and nothing is paid
    Mismatched,
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub location: LocationName,
    pub inventory: Vec<Item>,
    pub capacity: usize,
    /// Only ever goes up
    pub score: u32,
    /// Orders filled this session, oldest first
    pub completed: Vec<Item>,
}

impl Player {
    pub fn new(location: LocationName, capacity: usize) -> Self {
        Self {
            location,
            inventory: Vec::new(),
            capacity,
            score: 0,
            completed: Vec::new(),
        }
    }

    /// Walk to the neighbor in `direction`, if there is one
    pub fn move_to(&mut self, map: &WorldMap, direction: Direction) -> Option<LocationName> {
        let next = map.get(self.location).neighbor(direction)?;
        self.location = next;
        Some(next)
    }

    pub fn is_full(&self) -> bool {
        self.inventory.len() >= self.capacity
    }

    /// Put a copy of `item` in the inventory
    ///
    /// Capacity is the caller's business: check [`Player::is_full`] first.
    pub fn pickup(&mut self, item: &Item) {
        debug_assert!(!self.is_full(), "pickup into a full inventory");
        self.inventory.push(item.clone());
    }

    /// Throw away one item equal to `item`
    pub fn trash(&mut self, item: &Item) -> GameResult<Item> {
        let index = self
            .inventory
            .iter()
            .position(|i| i == item)
            .ok_or_else(|| GameError::ItemNotInInventory(item.name.clone()))?;
        Ok(self.inventory.remove(index))
    }

    /// Hand `item` to `customer`
    ///
    /// The item leaves the inventory whether or not it was what they wanted.
    pub fn deliver(&mut self, item: &Item, customer: &Customer) -> GameResult<Delivery> {
        let item = self.trash(item)?;
        if customer.wants(&item) {
            self.score += customer.points;
            self.completed.push(item);
            Ok(Delivery::Filled {
                points: customer.points,
            })
        } else {
            Ok(Delivery::Mismatched)
        }
    }

    /// The last `n` orders filled, newest first
    pub fn recent_orders(&self, n: usize) -> impl Iterator<Item = &Item> {
        self.completed.iter().rev().take(n)
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "You finished with ${}!", self.score)
    }
}
