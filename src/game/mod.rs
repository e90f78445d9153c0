//! Core game logic and state management

pub mod clock;
pub mod config;

pub use clock::SessionClock;
pub use config::GameConfig;

use crate::data::*;
use crate::GameResult;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

/// Lines kept in the message log
const MESSAGE_LOG_LIMIT: usize = 100;

/// The main game state
#[derive(Debug, Clone)]
pub struct Game {
    /// Current game phase
    pub phase: GamePhase,

    /// This session's recipes
    pub book: RecipeBook,

    /// Every location and what can be found there
    pub map: WorldMap,

    /// Player character
    pub player: Player,

    /// One customer per slot, indexed by slot
    pub customers: Vec<Customer>,

    /// Session time budget
    pub clock: SessionClock,

    /// Game statistics
    pub stats: GameStats,

    /// Message log (for UI display)
    pub message_log: Vec<GameMessage>,

    /// Line picked on arrival at the current location
    pub flavor: Option<String>,

    deplete_stock: bool,
    generator: CustomerGenerator,
    rng: StdRng,
}

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Playing,
    GameOver(GameOutcome),
}

/// How the game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    TimeExpired,
    Quit,
}

/// Actions the player can take
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    Move(Direction),
    ReturnHome,
    /// Index into the current location's items
    Pickup(usize),
    /// Index into the inventory
    Trash(usize),
    /// Two distinct inventory indices
    Mix(usize, usize),
    Deliver { item: usize, customer: usize },
    Quit,
}

impl GameAction {
    pub fn description(&self) -> String {
        match self {
            GameAction::Move(direction) => format!("Move {direction}"),
            GameAction::ReturnHome => "Return to the Cauldron".to_string(),
            GameAction::Pickup(_) => "Pick up an item".to_string(),
            GameAction::Trash(_) => "Trash an item".to_string(),
            GameAction::Mix(_, _) => "Mix two ingredients".to_string(),
            GameAction::Deliver { .. } => "Deliver an order".to_string(),
            GameAction::Quit => "Quit the game".to_string(),
        }
    }
}

/// What an action did
///
/// Only `Moved`, `PickedUp`, `Trashed`, `Mixed`, `MixFailed`, `Delivered`,
/// `WrongOrder` and `Quit` change any state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Moved(LocationName),
    NoPath(Direction),
    AlreadyHome,
    PickedUp(Item),
    InventoryFull,
    NothingHere,
    Trashed(Item),
    Mixed(Item),
    MixFailed,
    NeedTwoIngredients,
    Delivered { order: Item, points: u32 },
    WrongOrder { delivered: Item, wanted: Item },
    WrongLocation { required: LocationName, verb: &'static str },
    EmptyInventory { verb: &'static str },
    InvalidSelection,
    SessionOver,
    Quit,
}

impl ActionOutcome {
    pub fn message(&self) -> String {
        match self {
            ActionOutcome::Moved(location) => format!("You arrive at the {location}."),
            ActionOutcome::NoPath(direction) => format!("There is nothing to the {direction}."),
            ActionOutcome::AlreadyHome => "You are already here!".to_string(),
            ActionOutcome::PickedUp(item) => format!("You pick up a {item}."),
            ActionOutcome::InventoryFull => "Your inventory is full!!".to_string(),
            ActionOutcome::NothingHere => "There are no items to pickup here!".to_string(),
            ActionOutcome::Trashed(item) => format!("You toss the {item}."),
            ActionOutcome::Mixed(item) => format!("Congratulations! You made a {item}!"),
            ActionOutcome::MixFailed => "Those ingredients don't make anything! Tough luck!".to_string(),
            ActionOutcome::NeedTwoIngredients => "You need two ingredients to mix!".to_string(),
            ActionOutcome::Delivered { order, points } => {
                format!("The customer happily pays ${points} for the {order}.")
            }
            ActionOutcome::WrongOrder { delivered, wanted } => {
                format!("They wanted a {wanted}, not a {delivered}! They storm off without paying.")
            }
            ActionOutcome::WrongLocation { required, verb } => {
                format!("You need to be at the {required} to {verb}!")
            }
            ActionOutcome::EmptyInventory { verb } => format!("You have no items to {verb}!"),
            ActionOutcome::InvalidSelection => "That's not one of the options.".to_string(),
            ActionOutcome::SessionOver => "The night is over.".to_string(),
            ActionOutcome::Quit => "You hang up your hat for the night.".to_string(),
        }
    }

    pub fn kind(&self) -> MessageKind {
        match self {
            ActionOutcome::Moved(_) | ActionOutcome::PickedUp(_) | ActionOutcome::Trashed(_) => {
                MessageKind::Info
            }
            ActionOutcome::Mixed(_) | ActionOutcome::Delivered { .. } => MessageKind::Success,
            _ => MessageKind::Warning,
        }
    }
}

/// Game statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameStats {
    pub orders_filled: u32,
    pub wrong_deliveries: u32,
    pub customers_lost: u32,
    pub items_mixed: u32,
    pub failed_mixes: u32,
    pub items_picked_up: u32,
    pub items_trashed: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
}

/// A message to display to the player
#[derive(Debug, Clone)]
pub struct GameMessage {
    pub timestamp: DateTime<Utc>,
    pub kind: MessageKind,
    pub message: String,
}

/// Customers that gave up during a tick, and whether time ran out
#[derive(Debug, Clone, Default)]
pub struct TickReport {
    pub expired: Vec<Customer>,
    pub session_ended: bool,
}

impl Game {
    /// Set up a session starting now
    pub fn new(config: &GameConfig, assets: &AssetData) -> GameResult<Self> {
        Self::with_start(config, assets, Utc::now())
    }

    /// Set up a session whose clock starts at `now`
    ///
    /// Writes the recipe book, builds and stocks the map, puts the player at
    /// home with nothing in hand, and fills every customer slot.
    pub fn with_start(config: &GameConfig, assets: &AssetData, now: DateTime<Utc>) -> GameResult<Self> {
        config.validate()?;
        assets.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let book = RecipeBook::generate(assets, &mut rng)?;
        info!(
            items = book.items.len(),
            craftable = book.craftable_items().count(),
            "recipe book written"
        );

        let mut map = WorldMap::build(assets)?;
        map.distribute_items(book.found_items().cloned().collect(), &mut rng);
        info!(locations = map.locations.len(), "map built");

        let player = Player::new(LocationName::HOME, config.inventory_capacity);
        let generator = CustomerGenerator::new(&book)?;
        let customers = generator.spawn_all(config.customer_slots, now, &mut rng);
        info!(slots = customers.len(), "customers arrived");

        let mut game = Self {
            phase: GamePhase::Playing,
            book,
            map,
            player,
            customers,
            clock: SessionClock::new(now, config.session_secs),
            stats: GameStats::default(),
            message_log: Vec::new(),
            flavor: None,
            deplete_stock: config.deplete_location_stock,
            generator,
            rng,
        };
        game.pick_flavor();
        game.add_message(MessageKind::Info, "The moon rises. Customers are already waiting...", now);
        Ok(game)
    }

    /// Start the clock over at `now`, along with every customer's patience
    pub fn restart_clock(&mut self, now: DateTime<Utc>) {
        self.clock.started_at = now;
        for customer in &mut self.customers {
            customer.created_at = now;
        }
    }

    /// Add a message to the log
    pub fn add_message(&mut self, kind: MessageKind, message: &str, now: DateTime<Utc>) {
        self.message_log.push(GameMessage {
            timestamp: now,
            kind,
            message: message.to_string(),
        });
        if self.message_log.len() > MESSAGE_LOG_LIMIT {
            let excess = self.message_log.len() - MESSAGE_LOG_LIMIT;
            self.message_log.drain(..excess);
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver(_))
    }

    pub fn current_location(&self) -> &Location {
        self.map.get(self.player.location)
    }

    /// Look up a location by exact name
    pub fn location(&self, name: &str) -> GameResult<&Location> {
        self.map.by_name(name)
    }

    /// Look up an item definition by exact name
    pub fn item(&self, name: &str) -> GameResult<&Item> {
        self.book.item(name)
    }

    /// Execute a player action
    pub fn execute(&mut self, action: GameAction, now: DateTime<Utc>) -> ActionOutcome {
        let outcome = if self.is_over() {
            ActionOutcome::SessionOver
        } else {
            match action {
                GameAction::Move(direction) => self.move_player(direction),
                GameAction::ReturnHome => self.return_home(),
                GameAction::Pickup(index) => self.pickup(index),
                GameAction::Trash(index) => self.trash(index),
                GameAction::Mix(first, second) => self.mix(first, second),
                GameAction::Deliver { item, customer } => self.deliver(item, customer, now),
                GameAction::Quit => self.quit(),
            }
        };

        info!(action = %action.description(), outcome = ?outcome, "player action");
        let kind = outcome.kind();
        self.add_message(kind, &outcome.message(), now);
        outcome
    }

    pub fn move_player(&mut self, direction: Direction) -> ActionOutcome {
        match self.player.move_to(&self.map, direction) {
            Some(location) => {
                self.pick_flavor();
                ActionOutcome::Moved(location)
            }
            None => ActionOutcome::NoPath(direction),
        }
    }

    pub fn return_home(&mut self) -> ActionOutcome {
        if self.player.location == LocationName::HOME {
            return ActionOutcome::AlreadyHome;
        }
        self.player.location = LocationName::HOME;
        self.pick_flavor();
        ActionOutcome::Moved(LocationName::HOME)
    }

    /// Why a pickup can't start here, if it can't
    pub fn pickup_blocker(&self) -> Option<ActionOutcome> {
        if self.current_location().items().is_empty() {
            Some(ActionOutcome::NothingHere)
        } else if self.player.is_full() {
            Some(ActionOutcome::InventoryFull)
        } else {
            None
        }
    }

    pub fn pickup(&mut self, index: usize) -> ActionOutcome {
        if let Some(blocker) = self.pickup_blocker() {
            return blocker;
        }
        let location = self.map.get_mut(self.player.location);
        let Some(items) = location.items.as_mut() else {
            return ActionOutcome::NothingHere;
        };
        if index >= items.len() {
            return ActionOutcome::InvalidSelection;
        }
        let item = if self.deplete_stock {
            items.remove(index)
        } else {
            items[index].clone()
        };
        self.player.pickup(&item);
        self.stats.items_picked_up += 1;
        ActionOutcome::PickedUp(item)
    }

    pub fn trash_blocker(&self) -> Option<ActionOutcome> {
        self.player
            .inventory
            .is_empty()
            .then_some(ActionOutcome::EmptyInventory { verb: "trash" })
    }

    pub fn trash(&mut self, index: usize) -> ActionOutcome {
        if let Some(blocker) = self.trash_blocker() {
            return blocker;
        }
        let Some(item) = self.player.inventory.get(index).cloned() else {
            return ActionOutcome::InvalidSelection;
        };
        match self.player.trash(&item) {
            Ok(item) => {
                self.stats.items_trashed += 1;
                ActionOutcome::Trashed(item)
            }
            Err(_) => ActionOutcome::InvalidSelection,
        }
    }

    pub fn mix_blocker(&self) -> Option<ActionOutcome> {
        if self.player.inventory.is_empty() {
            Some(ActionOutcome::EmptyInventory { verb: "mix" })
        } else if self.player.location != LocationName::HOME {
            Some(ActionOutcome::WrongLocation {
                required: LocationName::HOME,
                verb: "mix",
            })
        } else if self.player.inventory.len() < 2 {
            Some(ActionOutcome::NeedTwoIngredients)
        } else {
            None
        }
    }

    /// Brew two inventory items together
    ///
    /// Nothing leaves the inventory unless both selections are valid; once
    /// they are, both ingredients are used up even if they make nothing.
    pub fn mix(&mut self, first: usize, second: usize) -> ActionOutcome {
        if let Some(blocker) = self.mix_blocker() {
            return blocker;
        }
        let len = self.player.inventory.len();
        if first == second || first >= len || second >= len {
            return ActionOutcome::InvalidSelection;
        }

        let (high, low) = if first > second { (first, second) } else { (second, first) };
        let a = self.player.inventory.remove(high);
        let b = self.player.inventory.remove(low);

        match self.book.mix([&a, &b]).cloned() {
            Some(product) => {
                debug!(first = %a, second = %b, product = %product, "mixed");
                self.player.pickup(&product);
                self.stats.items_mixed += 1;
                ActionOutcome::Mixed(product)
            }
            None => {
                debug!(first = %a, second = %b, "mix fizzled");
                self.stats.failed_mixes += 1;
                ActionOutcome::MixFailed
            }
        }
    }

    pub fn deliver_blocker(&self) -> Option<ActionOutcome> {
        if self.player.inventory.is_empty() {
            Some(ActionOutcome::EmptyInventory { verb: "deliver" })
        } else if self.player.location != LocationName::MARKET {
            Some(ActionOutcome::WrongLocation {
                required: LocationName::MARKET,
                verb: "deliver",
            })
        } else {
            None
        }
    }

    /// Hand an inventory item to the customer in `slot`
    ///
    /// The item is gone either way and the slot always gets a new customer;
    /// only a matching order pays.
    pub fn deliver(&mut self, item_index: usize, slot: usize, now: DateTime<Utc>) -> ActionOutcome {
        if let Some(blocker) = self.deliver_blocker() {
            return blocker;
        }
        let (Some(item), Some(customer)) = (
            self.player.inventory.get(item_index).cloned(),
            self.customers.get(slot).cloned(),
        ) else {
            return ActionOutcome::InvalidSelection;
        };

        let delivery = match self.player.deliver(&item, &customer) {
            Ok(delivery) => delivery,
            Err(_) => return ActionOutcome::InvalidSelection,
        };
        self.customers[slot] = self.generator.replace(&customer, now, &mut self.rng);

        match delivery {
            Delivery::Filled { points } => {
                self.stats.orders_filled += 1;
                ActionOutcome::Delivered {
                    order: item,
                    points,
                }
            }
            Delivery::Mismatched => {
                self.stats.wrong_deliveries += 1;
                ActionOutcome::WrongOrder {
                    delivered: item,
                    wanted: customer.order,
                }
            }
        }
    }

    pub fn quit(&mut self) -> ActionOutcome {
        self.phase = GamePhase::GameOver(GameOutcome::Quit);
        info!(score = self.player.score, "player quit");
        ActionOutcome::Quit
    }

    /// Advance wall-clock state: replace customers who gave up, end the
    /// session when its time is spent
    pub fn tick(&mut self, now: DateTime<Utc>) -> TickReport {
        let mut report = TickReport::default();
        if self.is_over() {
            return report;
        }

        for slot in 0..self.customers.len() {
            if self.customers[slot].is_expired(now) {
                let replacement = self.generator.replace(&self.customers[slot], now, &mut self.rng);
                let gone = std::mem::replace(&mut self.customers[slot], replacement);
                debug!(slot, order = %gone.order, "customer gave up");
                self.stats.customers_lost += 1;
                report.expired.push(gone);
            }
        }

        if self.clock.is_over(now) {
            self.phase = GamePhase::GameOver(GameOutcome::TimeExpired);
            report.session_ended = true;
            info!(score = self.player.score, stats = ?self.stats, "session over");
        }
        report
    }

    fn pick_flavor(&mut self) {
        let location = self.map.get(self.player.location);
        self.flavor = location.spooky(&mut self.rng).map(str::to_string);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn start() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn game() -> Game {
        let config = GameConfig {
            seed: Some(17),
            ..GameConfig::default()
        };
        Game::with_start(&config, &AssetData::default(), start()).unwrap()
    }

    fn give(game: &mut Game, name: &str) {
        let item = game.item(name).unwrap().clone();
        game.player.pickup(&item);
    }

    #[test]
    fn test_setup() {
        let game = game();
        assert_eq!(game.phase, GamePhase::Playing);
        assert_eq!(game.player.location, LocationName::Cauldron);
        assert!(game.player.inventory.is_empty());
        assert_eq!(game.player.score, 0);
        assert_eq!(game.customers.len(), 4);
        for (slot, customer) in game.customers.iter().enumerate() {
            assert_eq!(customer.slot, slot);
            assert_eq!(customer.created_at, start());
        }
        let stocked: usize = game.map.locations.iter().map(|l| l.items().len()).sum();
        assert_eq!(stocked, game.book.found_items().count());
        assert!(game.flavor.is_some());
    }

    #[test]
    fn test_setup_rejects_bad_config() {
        let config = GameConfig {
            customer_slots: 0,
            ..GameConfig::default()
        };
        assert!(Game::with_start(&config, &AssetData::default(), start()).is_err());
    }

    #[test]
    fn test_setup_fails_on_exhausted_pool() {
        let mut assets = AssetData::default();
        assets.tiers.found.truncate(3);
        assets.chapter_recipes.insert("0".to_string(), assets.tiers.found.clone());
        let result = Game::with_start(&GameConfig::default(), &assets, start());
        assert!(matches!(result, Err(crate::GameError::RecipePoolExhausted { .. })));
    }

    #[test]
    fn test_move_and_return_home() {
        let mut game = game();
        assert_eq!(game.move_player(Direction::South), ActionOutcome::NoPath(Direction::South));
        assert_eq!(game.move_player(Direction::North), ActionOutcome::Moved(LocationName::Forest));
        assert_eq!(game.move_player(Direction::East), ActionOutcome::Moved(LocationName::Town));
        assert_eq!(game.return_home(), ActionOutcome::Moved(LocationName::Cauldron));
        assert_eq!(game.return_home(), ActionOutcome::AlreadyHome);
    }

    #[test]
    fn test_nothing_to_pick_up_at_home() {
        let mut game = game();
        assert_eq!(game.pickup(0), ActionOutcome::NothingHere);
    }

    #[test]
    fn test_pickup_keeps_stock_by_default() {
        let mut game = game();
        game.player.location = LocationName::Cave;
        let before = game.current_location().items().to_vec();
        let outcome = game.pickup(0);
        assert_eq!(outcome, ActionOutcome::PickedUp(before[0].clone()));
        assert_eq!(game.current_location().items(), before.as_slice());
        assert_eq!(game.pickup(0), ActionOutcome::PickedUp(before[0].clone()));
        assert_eq!(game.player.inventory.len(), 2);
    }

    #[test]
    fn test_pickup_depletes_when_configured() {
        let config = GameConfig {
            seed: Some(17),
            deplete_location_stock: true,
            ..GameConfig::default()
        };
        let mut game = Game::with_start(&config, &AssetData::default(), start()).unwrap();
        game.player.location = LocationName::Cave;
        let before = game.current_location().items().len();
        assert!(matches!(game.pickup(0), ActionOutcome::PickedUp(_)));
        assert_eq!(game.current_location().items().len(), before - 1);
    }

    #[test]
    fn test_emptied_location_has_nothing_to_pick_up() {
        let config = GameConfig {
            seed: Some(17),
            deplete_location_stock: true,
            ..GameConfig::default()
        };
        let mut game = Game::with_start(&config, &AssetData::default(), start()).unwrap();
        game.player.location = LocationName::Cave;
        while !game.current_location().items().is_empty() {
            assert!(matches!(game.pickup(0), ActionOutcome::PickedUp(_)));
        }
        assert_eq!(game.pickup_blocker(), Some(ActionOutcome::NothingHere));
        assert_eq!(game.pickup(0), ActionOutcome::NothingHere);
    }

    #[test]
    fn test_pickup_respects_capacity() {
        let mut game = game();
        game.player.location = LocationName::Cave;
        for _ in 0..9 {
            assert!(matches!(game.pickup(0), ActionOutcome::PickedUp(_)));
        }
        assert_eq!(game.pickup(0), ActionOutcome::InventoryFull);
        assert_eq!(game.player.inventory.len(), 9);
    }

    #[test]
    fn test_pickup_invalid_index() {
        let mut game = game();
        game.player.location = LocationName::Cave;
        assert_eq!(game.pickup(8), ActionOutcome::InvalidSelection);
        assert!(game.player.inventory.is_empty());
    }

    #[test]
    fn test_trash() {
        let mut game = game();
        assert_eq!(game.trash(0), ActionOutcome::EmptyInventory { verb: "trash" });
        give(&mut game, "Skull");
        assert_eq!(game.trash(3), ActionOutcome::InvalidSelection);
        assert_eq!(game.trash(0), ActionOutcome::Trashed(Item::found("Skull")));
        assert!(game.player.inventory.is_empty());
    }

    #[test]
    fn test_mix_success() {
        let mut game = game();
        let amulet = game.item("Amulet").unwrap().clone();
        let recipe = amulet.recipe.clone().unwrap();
        give(&mut game, &recipe.ingredients[1]);
        give(&mut game, "Skull");
        give(&mut game, &recipe.ingredients[0]);

        assert_eq!(game.mix(2, 0), ActionOutcome::Mixed(amulet.clone()));
        let names: Vec<_> = game.player.inventory.iter().map(|i| i.name.clone()).collect();
        assert_eq!(names, vec!["Skull".to_string(), "Amulet".to_string()]);
    }

    #[test]
    fn test_mix_failure_consumes_ingredients() {
        let mut game = game();
        give(&mut game, "Skull");
        give(&mut game, "Skull");
        assert_eq!(game.mix(0, 1), ActionOutcome::MixFailed);
        assert!(game.player.inventory.is_empty());
        assert_eq!(game.stats.failed_mixes, 1);
    }

    #[test]
    fn test_mix_bad_selection_changes_nothing() {
        let mut game = game();
        give(&mut game, "Skull");
        give(&mut game, "Firefly");
        assert_eq!(game.mix(1, 1), ActionOutcome::InvalidSelection);
        assert_eq!(game.mix(0, 5), ActionOutcome::InvalidSelection);
        assert_eq!(game.player.inventory.len(), 2);
    }

    #[test]
    fn test_mix_only_at_home() {
        let mut game = game();
        give(&mut game, "Skull");
        give(&mut game, "Firefly");
        game.player.location = LocationName::Town;
        assert!(matches!(game.mix(0, 1), ActionOutcome::WrongLocation { required: LocationName::Cauldron, .. }));
        game.player.location = LocationName::Cauldron;
        game.player.inventory.pop();
        assert_eq!(game.mix(0, 1), ActionOutcome::NeedTwoIngredients);
    }

    #[test]
    fn test_deliver_only_in_town() {
        let mut game = game();
        give(&mut game, "Skull");
        assert!(matches!(
            game.deliver(0, 0, start()),
            ActionOutcome::WrongLocation { required: LocationName::Town, .. }
        ));
        assert_eq!(game.player.inventory.len(), 1);
    }

    #[test]
    fn test_deliver_matching_order() {
        let mut game = game();
        game.player.location = LocationName::Town;
        let order = game.customers[1].order.clone();
        let points = game.customers[1].points;
        let old_id = game.customers[1].id;
        game.player.pickup(&order);

        let later = start() + Duration::seconds(5);
        let outcome = game.deliver(0, 1, later);
        assert_eq!(outcome, ActionOutcome::Delivered { order: order.clone(), points });
        assert_eq!(game.player.score, points);
        assert!(game.player.inventory.is_empty());
        assert_ne!(game.customers[1].id, old_id);
        assert_eq!(game.customers[1].created_at, later);
        assert_eq!(game.customers[1].slot, 1);
        assert_eq!(game.stats.orders_filled, 1);
    }

    #[test]
    fn test_deliver_wrong_item() {
        let mut game = game();
        game.player.location = LocationName::Town;
        give(&mut game, "Skull");
        let wanted = game.customers[0].order.clone();

        let later = start() + Duration::seconds(5);
        let outcome = game.deliver(0, 0, later);
        assert_eq!(
            outcome,
            ActionOutcome::WrongOrder {
                delivered: Item::found("Skull"),
                wanted
            }
        );
        assert_eq!(game.player.score, 0);
        assert!(game.player.inventory.is_empty());
        assert_eq!(game.customers[0].created_at, later);
    }

    #[test]
    fn test_deliver_invalid_customer() {
        let mut game = game();
        game.player.location = LocationName::Town;
        give(&mut game, "Skull");
        assert_eq!(game.deliver(0, 7, start()), ActionOutcome::InvalidSelection);
        assert_eq!(game.player.inventory.len(), 1);
    }

    #[test]
    fn test_tick_replaces_expired_customers() {
        let mut game = game();
        game.customers[2].wait_secs = 10;
        let report = game.tick(start() + Duration::seconds(10));
        assert_eq!(report.expired.len(), 1);
        assert_eq!(report.expired[0].slot, 2);
        assert_eq!(game.customers[2].created_at, start() + Duration::seconds(10));
        assert_eq!(game.stats.customers_lost, 1);
        assert_eq!(game.player.score, 0);
        assert!(!report.session_ended);
    }

    #[test]
    fn test_session_ends_on_time() {
        let mut game = game();
        let report = game.tick(start() + Duration::seconds(600));
        assert!(report.session_ended);
        assert_eq!(game.phase, GamePhase::GameOver(GameOutcome::TimeExpired));
        assert_eq!(
            game.execute(GameAction::Move(Direction::North), start() + Duration::seconds(601)),
            ActionOutcome::SessionOver
        );
    }

    #[test]
    fn test_quit() {
        let mut game = game();
        assert_eq!(game.execute(GameAction::Quit, start()), ActionOutcome::Quit);
        assert!(game.is_over());
    }

    #[test]
    fn test_restart_clock() {
        let mut game = game();
        let later = start() + Duration::seconds(30);
        game.restart_clock(later);
        assert_eq!(game.clock.started_at, later);
        assert!(game.customers.iter().all(|c| c.created_at == later));
    }

    #[test]
    fn test_message_log_is_bounded() {
        let mut game = game();
        for _ in 0..150 {
            game.execute(GameAction::Move(Direction::South), start());
        }
        assert_eq!(game.message_log.len(), MESSAGE_LOG_LIMIT);
    }

    #[test]
    fn test_lookups() {
        let game = game();
        assert_eq!(game.location("Town").unwrap().name, LocationName::Town);
        assert!(game.location("Atlantis").is_err());
        assert!(game.item("Skull").is_ok());
        assert!(game.item("Frog").is_err());
    }
}
