//! Items, recipes and the recipe book
//!
//! The recipe book is written once per session: every craftable item gets
//! two ingredients drawn at random from the lower tiers, and no ingredient is
//! ever drawn twice.

use super::{AssetData, Tier};
use crate::{GameError, GameResult};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};
use tracing::debug;

/// Two ingredients, compared as an unordered pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub ingredients: [String; 2],
}

impl Recipe {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            ingredients: [first.into(), second.into()],
        }
    }

    /// Whether the two names make this recipe, in either order
    pub fn matches(&self, a: &str, b: &str) -> bool {
        let [x, y] = &self.ingredients;
        (x == a && y == b) || (x == b && y == a)
    }
}

/// Anything that can sit in an inventory
///
/// Identity is the name alone: two items are equal when their names match,
/// whatever their recipes say, and they sort by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub tier: Tier,
    /// `None` for items that can only be found
    pub recipe: Option<Recipe>,
}

impl Item {
    pub fn found(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tier: Tier::Found,
            recipe: None,
        }
    }

    pub fn crafted(name: impl Into<String>, tier: Tier, recipe: Recipe) -> Self {
        Self {
            name: name.into(),
            tier,
            recipe: Some(recipe),
        }
    }

    pub fn is_craftable(&self) -> bool {
        self.recipe.is_some()
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Item {}

impl PartialOrd for Item {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Item {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl Hash for Item {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Items still eligible to be drawn as an ingredient
///
/// Grows by a whole tier at a time, after that tier's recipes are written,
/// and shrinks by one item per draw.
#[derive(Debug, Clone, Default)]
pub struct IngredientPool {
    candidates: Vec<Item>,
}

impl IngredientPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.candidates.iter().any(|c| c.name == name)
    }

    /// Make a finished tier available to later tiers
    pub fn admit(mut self, items: &[Item]) -> Self {
        self.candidates.extend(items.iter().cloned());
        self
    }

    /// Remove two distinct candidates, chosen uniformly at random
    fn draw_pair<R: Rng>(&mut self, item: &str, tier: Tier, rng: &mut R) -> GameResult<[Item; 2]> {
        if self.candidates.len() < 2 {
            return Err(GameError::RecipePoolExhausted {
                item: item.to_string(),
                tier,
                available: self.candidates.len(),
            });
        }
        let first = self.candidates.swap_remove(rng.gen_range(0..self.candidates.len()));
        let second = self.candidates.swap_remove(rng.gen_range(0..self.candidates.len()));
        Ok([first, second])
    }
}

/// Write recipes for one craftable tier, drawing from the pool
///
/// Items of the tier being written are not in the pool, so every ingredient
/// comes from a strictly lower tier.
pub fn generate_tier<R: Rng>(
    mut pool: IngredientPool,
    tier: Tier,
    names: &[String],
    rng: &mut R,
) -> GameResult<(Vec<Item>, IngredientPool)> {
    let mut items = Vec::with_capacity(names.len());
    for name in names {
        let [a, b] = pool.draw_pair(name, tier, rng)?;
        debug!(item = %name, %tier, first = %a, second = %b, "recipe written");
        items.push(Item::crafted(name.clone(), tier, Recipe::new(a.name, b.name)));
    }
    Ok((items, pool))
}

/// The witch's recipe book, fixed for the whole session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeBook {
    /// Chapter id -> title
    pub chapters: BTreeMap<String, String>,
    /// Chapter id -> item names documented there
    pub contents: BTreeMap<String, Vec<String>>,
    /// Every item in the game, in tier order
    pub items: Vec<Item>,
}

impl RecipeBook {
    /// Generate a fresh book from the asset tables
    pub fn generate<R: Rng>(assets: &AssetData, rng: &mut R) -> GameResult<Self> {
        let found: Vec<Item> = assets.tiers.found.iter().map(Item::found).collect();
        let mut pool = IngredientPool::new().admit(&found);
        let mut items = found;

        for tier in [Tier::Basic, Tier::Intermediate, Tier::Advanced] {
            let (written, rest) = generate_tier(pool, tier, assets.tiers.names(tier), rng)?;
            pool = rest.admit(&written);
            items.extend(written);
        }
        if !pool.is_empty() {
            debug!(unused = pool.len(), "ingredients left out of the book");
        }

        Ok(Self {
            chapters: assets.chapter_titles.clone(),
            contents: assets.chapter_recipes.clone(),
            items,
        })
    }

    /// Look up an item definition by exact name
    pub fn item(&self, name: &str) -> GameResult<&Item> {
        let mut matches = self.items.iter().filter(|i| i.name == name);
        match (matches.next(), matches.next()) {
            (Some(item), None) => Ok(item),
            (Some(_), Some(_)) => Err(GameError::InvalidAssets(format!("item {name} is defined twice"))),
            (None, _) => Err(GameError::UnknownItem(name.to_string())),
        }
    }

    pub fn found_items(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(|i| !i.is_craftable())
    }

    pub fn craftable_items(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(|i| i.is_craftable())
    }

    /// What two ingredients brew into, if anything; order does not matter
    pub fn mix(&self, ingredients: [&Item; 2]) -> Option<&Item> {
        let [a, b] = ingredients;
        self.items
            .iter()
            .find(|item| item.recipe.as_ref().is_some_and(|r| r.matches(&a.name, &b.name)))
    }

    pub fn chapter_title(&self, id: &str) -> GameResult<&str> {
        self.chapters
            .get(id)
            .map(String::as_str)
            .ok_or_else(|| GameError::UnknownChapter(id.to_string()))
    }

    /// Items documented in a chapter, resolved against the book
    pub fn chapter(&self, id: &str) -> GameResult<Vec<&Item>> {
        let names = self
            .contents
            .get(id)
            .ok_or_else(|| GameError::UnknownChapter(id.to_string()))?;
        names.iter().map(|name| self.item(name)).collect()
    }

    /// Chapter ids in reading order
    pub fn chapter_ids(&self) -> impl Iterator<Item = &str> {
        self.chapters.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::TierLists;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn small_assets() -> AssetData {
        let mut assets = AssetData::default();
        assets.tiers = TierLists {
            found: names(&["A", "B", "C", "D"]),
            basic: names(&["E"]),
            intermediate: vec![],
            advanced: vec![],
        };
        assets
    }

    fn check_book(book: &RecipeBook) {
        let mut used = HashSet::new();
        for item in book.craftable_items() {
            let recipe = item.recipe.as_ref().unwrap();
            assert_ne!(recipe.ingredients[0], recipe.ingredients[1]);
            for ingredient in &recipe.ingredients {
                let source = book.item(ingredient).unwrap();
                assert!(source.tier < item.tier, "{} uses {}", item.name, source.name);
                assert!(used.insert(ingredient.clone()), "{ingredient} used twice");
            }
        }
    }

    #[test]
    fn test_item_equality_ignores_recipe() {
        let plain = Item::found("Skull");
        let crafted = Item::crafted("Skull", Tier::Basic, Recipe::new("A", "B"));
        assert_eq!(plain, crafted);
        assert_ne!(Item::found("Skull"), Item::found("Firefly"));
        assert!(Item::found("Antidote") < Item::found("Bat Wing"));
    }

    #[test]
    fn test_recipe_matches_either_order() {
        let recipe = Recipe::new("Skull", "Firefly");
        assert!(recipe.matches("Skull", "Firefly"));
        assert!(recipe.matches("Firefly", "Skull"));
        assert!(!recipe.matches("Skull", "Skull"));
    }

    #[test]
    fn test_small_book_scenario() {
        let mut rng = StdRng::seed_from_u64(7);
        let book = RecipeBook::generate(&small_assets(), &mut rng).unwrap();
        let e = book.item("E").unwrap();
        let recipe = e.recipe.as_ref().unwrap();
        for ingredient in &recipe.ingredients {
            assert!(["A", "B", "C", "D"].contains(&ingredient.as_str()));
        }
        check_book(&book);
    }

    #[test]
    fn test_bundled_book_is_valid() {
        let mut rng = StdRng::seed_from_u64(42);
        let book = RecipeBook::generate(&AssetData::default(), &mut rng).unwrap();
        assert_eq!(book.items.len(), 18);
        assert_eq!(book.craftable_items().count(), 8);
        check_book(&book);
    }

    #[test]
    fn test_same_seed_same_book() {
        let assets = AssetData::default();
        let a = RecipeBook::generate(&assets, &mut StdRng::seed_from_u64(3)).unwrap();
        let b = RecipeBook::generate(&assets, &mut StdRng::seed_from_u64(3)).unwrap();
        for (x, y) in a.items.iter().zip(&b.items) {
            assert_eq!(
                x.recipe.as_ref().map(|r| r.ingredients.clone()),
                y.recipe.as_ref().map(|r| r.ingredients.clone())
            );
        }
    }

    #[test]
    fn test_pool_exhaustion_fails_fast() {
        let mut assets = small_assets();
        assets.tiers.basic = names(&["E", "F", "G"]);
        let mut rng = StdRng::seed_from_u64(1);
        let err = RecipeBook::generate(&assets, &mut rng).unwrap_err();
        match err {
            GameError::RecipePoolExhausted { item, tier, available } => {
                assert_eq!(item, "G");
                assert_eq!(tier, Tier::Basic);
                assert_eq!(available, 0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_original_found_tier_is_too_small() {
        let mut assets = AssetData::default();
        assets.tiers.found.retain(|n| n != "Bat Wing");
        let mut rng = StdRng::seed_from_u64(1);
        let err = RecipeBook::generate(&assets, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            GameError::RecipePoolExhausted { tier: Tier::Advanced, available: 1, .. }
        ));
    }

    #[test]
    fn test_same_tier_items_never_ingredients() {
        let mut rng = StdRng::seed_from_u64(11);
        let (items, pool) = generate_tier(
            IngredientPool::new().admit(&[Item::found("A"), Item::found("B"), Item::found("C")]),
            Tier::Basic,
            &names(&["X"]),
            &mut rng,
        )
        .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(pool.len(), 1);
        assert!(!pool.contains("X"));
    }

    #[test]
    fn test_mix_lookup() {
        let mut rng = StdRng::seed_from_u64(5);
        let book = RecipeBook::generate(&AssetData::default(), &mut rng).unwrap();
        let antidote = book.item("Antidote").unwrap();
        let recipe = antidote.recipe.as_ref().unwrap();
        let a = book.item(&recipe.ingredients[0]).unwrap();
        let b = book.item(&recipe.ingredients[1]).unwrap();

        assert_eq!(book.mix([a, b]), Some(antidote));
        assert_eq!(book.mix([b, a]), Some(antidote));
        assert_eq!(book.mix([a, a]), None);
    }

    #[test]
    fn test_lookup_miss() {
        let mut rng = StdRng::seed_from_u64(5);
        let book = RecipeBook::generate(&AssetData::default(), &mut rng).unwrap();
        assert!(matches!(book.item("Frog"), Err(GameError::UnknownItem(_))));
        assert!(matches!(book.chapter("9"), Err(GameError::UnknownChapter(_))));
        assert_eq!(book.chapter_title("3").unwrap(), "Hauntings");
        assert_eq!(book.chapter("1").unwrap().len(), 3);
        assert_eq!(book.chapter_ids().collect::<Vec<_>>(), vec!["0", "1", "2", "3"]);
    }

    proptest! {
        #[test]
        fn generated_books_are_tiered_and_unique(seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let book = RecipeBook::generate(&AssetData::default(), &mut rng).unwrap();
            let mut used = HashSet::new();
            for item in book.craftable_items() {
                let recipe = item.recipe.as_ref().unwrap();
                prop_assert_ne!(&recipe.ingredients[0], &recipe.ingredients[1]);
                for ingredient in &recipe.ingredients {
                    prop_assert!(book.item(ingredient).unwrap().tier < item.tier);
                    prop_assert!(used.insert(ingredient.clone()));
                }
            }
        }

        #[test]
        fn mix_is_order_independent(seed in any::<u64>(), i in 0usize..18, j in 0usize..18) {
            let mut rng = StdRng::seed_from_u64(seed);
            let book = RecipeBook::generate(&AssetData::default(), &mut rng).unwrap();
            let x = &book.items[i];
            let y = &book.items[j];
            prop_assert_eq!(book.mix([x, y]), book.mix([y, x]));
        }

        #[test]
        fn equality_follows_name(a in "[a-c]{1,2}", b in "[a-c]{1,2}") {
            let x = Item::found(a.clone());
            let y = Item::crafted(b.clone(), Tier::Basic, Recipe::new("p", "q"));
            prop_assert_eq!(x == y, a == b);
        }
    }
}
