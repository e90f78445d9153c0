//! Customers and their orders
//!
//! A fixed number of slots is kept filled. A slot's customer is replaced
//! outright when they are served or when they run out of patience.

use super::{Id, Item, RecipeBook, Tier};
use crate::{GameError, GameResult};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// How much an order of a given tier pays, and how long its customer waits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierRewards {
    pub points: RangeInclusive<u32>,
    /// Half-open `[start, end)` wait in seconds, sampled on `step` boundaries
    pub wait_start: u32,
    pub wait_end: u32,
    pub wait_step: u32,
}

impl TierRewards {
    pub fn for_tier(tier: Tier) -> Option<Self> {
        match tier {
            Tier::Found => None,
            Tier::Basic => Some(Self {
                points: 5..=10,
                wait_start: 45,
                wait_end: 75,
                wait_step: 5,
            }),
            Tier::Intermediate => Some(Self {
                points: 10..=30,
                wait_start: 60,
                wait_end: 120,
                wait_step: 5,
            }),
            Tier::Advanced => Some(Self {
                points: 30..=75,
                wait_start: 120,
                wait_end: 180,
                wait_step: 10,
            }),
        }
    }

    pub fn sample_points<R: Rng>(&self, rng: &mut R) -> u32 {
        rng.gen_range(self.points.clone())
    }

    pub fn sample_wait<R: Rng>(&self, rng: &mut R) -> u32 {
        let steps = (self.wait_end - self.wait_start).div_ceil(self.wait_step);
        self.wait_start + self.wait_step * rng.gen_range(0..steps)
    }
}

/// Somebody at the witch's door
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    /// Position in the customer list; reused by replacements
    pub slot: usize,
    /// Fresh for every customer, even in the same slot
    pub id: Id,
    pub order: Item,
    pub points: u32,
    pub wait_secs: u32,
    pub created_at: DateTime<Utc>,
}

impl Customer {
    /// Patience left at `now`; zero or negative once they have given up
    pub fn time_remaining(&self, now: DateTime<Utc>) -> Duration {
        Duration::seconds(i64::from(self.wait_secs)) - (now - self.created_at)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.time_remaining(now) <= Duration::zero()
    }

    /// Remaining patience as `m:ss`, floored at zero
    pub fn countdown(&self, now: DateTime<Utc>) -> String {
        let secs = self.time_remaining(now).num_seconds().max(0);
        format!("{}:{:02}", secs / 60, secs % 60)
    }

    /// Whether delivering `item` fills this order
    pub fn wants(&self, item: &Item) -> bool {
        self.order == *item
    }
}

impl std::fmt::Display for Customer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} ${}", self.slot, self.order, self.points)
    }
}

/// Draws new orders from the craftable part of the recipe book
#[derive(Debug, Clone)]
pub struct CustomerGenerator {
    orders: Vec<(Item, TierRewards)>,
}

impl CustomerGenerator {
    pub fn new(book: &RecipeBook) -> GameResult<Self> {
        let orders: Vec<(Item, TierRewards)> = book
            .craftable_items()
            .filter_map(|item| TierRewards::for_tier(item.tier).map(|rewards| (item.clone(), rewards)))
            .collect();
        if orders.is_empty() {
            return Err(GameError::NoCraftableItems);
        }
        Ok(Self { orders })
    }

    /// A brand new customer for `slot`, arriving at `now`
    pub fn spawn<R: Rng>(&self, slot: usize, now: DateTime<Utc>, rng: &mut R) -> Customer {
        // `new` refuses an empty order list
        let (order, rewards) = &self.orders[rng.gen_range(0..self.orders.len())];

        Customer {
            slot,
            id: Id::new(),
            order: order.clone(),
            points: rewards.sample_points(rng),
            wait_secs: rewards.sample_wait(rng),
            created_at: now,
        }
    }

    /// The next customer to occupy `customer`'s slot
    pub fn replace<R: Rng>(&self, customer: &Customer, now: DateTime<Utc>, rng: &mut R) -> Customer {
        self.spawn(customer.slot, now, rng)
    }

    pub fn spawn_all<R: Rng>(&self, slots: usize, now: DateTime<Utc>, rng: &mut R) -> Vec<Customer> {
        (0..slots).map(|slot| self.spawn(slot, now, rng)).collect()
    }
}
