//! Static game tables
//!
//! The map layout, the tiered item lists, the recipe book chapters and the
//! flavor text. The bundled tables can be replaced wholesale by a TOML file.

use super::{Direction, LocationName, Tier, SELECTION_KEYS};
use crate::{GameError, GameResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

/// Item names grouped by difficulty tier, each in declaration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierLists {
    pub found: Vec<String>,
    pub basic: Vec<String>,
    pub intermediate: Vec<String>,
    pub advanced: Vec<String>,
}

impl TierLists {
    pub fn names(&self, tier: Tier) -> &[String] {
        match tier {
            Tier::Found => &self.found,
            Tier::Basic => &self.basic,
            Tier::Intermediate => &self.intermediate,
            Tier::Advanced => &self.advanced,
        }
    }
}

/// Everything the core reads from the outside world
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetData {
    /// Location name -> direction code -> neighbor name
    pub map: BTreeMap<String, BTreeMap<String, String>>,
    pub tiers: TierLists,
    /// Chapter id -> title
    pub chapter_titles: BTreeMap<String, String>,
    /// Chapter id -> item names documented in that chapter
    pub chapter_recipes: BTreeMap<String, Vec<String>>,
    /// Location name -> lines shown when the witch arrives
    #[serde(default)]
    pub flavor: BTreeMap<String, Vec<String>>,
}

impl Default for AssetData {
    fn default() -> Self {
        fn strings(items: &[&str]) -> Vec<String> {
            items.iter().map(|s| s.to_string()).collect()
        }
        fn edges(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
            pairs.iter().map(|(d, l)| (d.to_string(), l.to_string())).collect()
        }

        let tiers = TierLists {
            found: strings(&[
                "Purple Mushroom",
                "Forget-Me-Not",
                "Firefly",
                "Mandrake Root",
                "Green Mushroom",
                "Spring Water",
                "Red Mushroom",
                "Glow Worm",
                "Skull",
                "Bat Wing",
            ]),
            basic: strings(&["Goodberry", "Antidote", "Evil Eye"]),
            intermediate: strings(&["Health Potion", "Awakening", "Amulet"]),
            advanced: strings(&["Banishing Sigil", "Substitute Doll"]),
        };

        let mut map = BTreeMap::new();
        map.insert("Swamp".to_string(), edges(&[("E", "Forest")]));
        map.insert(
            "Forest".to_string(),
            edges(&[("W", "Swamp"), ("S", "Cauldron"), ("E", "Town")]),
        );
        map.insert("Cauldron".to_string(), edges(&[("N", "Forest")]));
        map.insert(
            "Town".to_string(),
            edges(&[("W", "Forest"), ("N", "Cave"), ("E", "Graveyard")]),
        );
        map.insert("Cave".to_string(), edges(&[("S", "Town")]));
        map.insert("Graveyard".to_string(), edges(&[("W", "Town")]));

        let chapter_titles = [("0", "Reagents"), ("1", "Ailments"), ("2", "Curses"), ("3", "Hauntings")]
            .iter()
            .map(|(id, title)| (id.to_string(), title.to_string()))
            .collect();

        let chapter_recipes = [
            ("0", tiers.found.clone()),
            ("1", tiers.basic.clone()),
            ("2", tiers.intermediate.clone()),
            ("3", tiers.advanced.clone()),
        ]
        .into_iter()
        .map(|(id, names)| (id.to_string(), names))
        .collect();

        let mut flavor = BTreeMap::new();
        flavor.insert(
            "Swamp".to_string(),
            strings(&[
                "Ew what's that smell?",
                "I'm sinking into the bog!",
                "This spooky Swamp sure is muddy!",
                "Gross...let's be quick!",
            ]),
        );
        flavor.insert(
            "Forest".to_string(),
            strings(&[
                "It's quiet here. Too quiet. Spooky quiet.",
                "These birds keep looking at me.",
                "Wait, those aren't birds!",
            ]),
        );
        flavor.insert(
            "Cauldron".to_string(),
            strings(&[
                "Home sweet home.",
                "Oops, I left the Cauldron on.",
                "Another day, another dollar.",
                "Ugh, who is it now?",
            ]),
        );
        flavor.insert(
            "Town".to_string(),
            strings(&[
                "I don't think these people like me.",
                "Where is everybody?",
                "'Everyone run; it's the witch!' Real original.",
            ]),
        );
        flavor.insert(
            "Cave".to_string(),
            strings(&[
                "It's too dark in here.",
                "What was that noise?!",
                "Whoops! Slipped on a rock!",
            ]),
        );
        flavor.insert(
            "Graveyard".to_string(),
            strings(&[
                "I think I heard a ghost calling my name!",
                "Whoops! Tripped over something. Don't look down.",
                "RIP everyone, I'll only be a minute, 'scuse me.",
            ]),
        );

        Self {
            map,
            tiers,
            chapter_titles,
            chapter_recipes,
            flavor,
        }
    }
}

impl AssetData {
    /// Load replacement tables from a TOML file and validate them
    pub fn load<P: AsRef<Path>>(path: P) -> GameResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| GameError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let assets: Self = toml::from_str(&contents).map_err(|source| GameError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        assets.validate()?;
        Ok(assets)
    }

    /// Check the tables against each other
    pub fn validate(&self) -> GameResult<()> {
        for name in LocationName::ALL {
            if !self.map.contains_key(name.as_str()) {
                return Err(GameError::InvalidAssets(format!("map has no entry for {name}")));
            }
        }
        for (location, neighbors) in &self.map {
            location.parse::<LocationName>()?;
            for (code, neighbor) in neighbors {
                if Direction::from_code(code).is_none() {
                    return Err(GameError::InvalidAssets(format!(
                        "{location} declares unknown direction {code:?}"
                    )));
                }
                neighbor.parse::<LocationName>()?;
            }
        }
        for location in self.flavor.keys() {
            location.parse::<LocationName>()?;
        }

        if self.tiers.found.is_empty() {
            return Err(GameError::InvalidAssets("found tier is empty".to_string()));
        }
        // Leftovers may all land on one location
        let holders = LocationName::ALL.iter().filter(|name| name.holds_items()).count();
        let found = self.tiers.found.len();
        let most_per_location = found / holders + found % holders;
        if most_per_location > SELECTION_KEYS {
            return Err(GameError::InvalidAssets(format!(
                "{found} found items could put {most_per_location} in one location, more than {SELECTION_KEYS} selectable"
            )));
        }
        let mut seen = BTreeSet::new();
        for tier in Tier::ALL {
            for name in self.tiers.names(tier) {
                if !seen.insert(name.as_str()) {
                    return Err(GameError::InvalidAssets(format!("item {name} is declared twice")));
                }
            }
        }

        // The book prompt keeps 8 for the contents page and 9 for undo
        for id in self.chapter_titles.keys() {
            if !id.parse::<usize>().is_ok_and(|n| n < SELECTION_KEYS - 1 && n.to_string() == *id) {
                return Err(GameError::InvalidAssets(format!(
                    "chapter id {id:?} must be a single digit from 0 to {}",
                    SELECTION_KEYS - 2
                )));
            }
        }
        let title_ids: BTreeSet<_> = self.chapter_titles.keys().collect();
        let recipe_ids: BTreeSet<_> = self.chapter_recipes.keys().collect();
        if title_ids != recipe_ids {
            return Err(GameError::InvalidAssets(
                "chapter titles and chapter recipes list different chapters".to_string(),
            ));
        }
        for (index, tier) in Tier::ALL.into_iter().enumerate() {
            let id = index.to_string();
            let Some(listed) = self.chapter_recipes.get(&id) else {
                return Err(GameError::InvalidAssets(format!("chapter {id} is missing")));
            };
            let listed: BTreeSet<_> = listed.iter().collect();
            let declared: BTreeSet<_> = self.tiers.names(tier).iter().collect();
            if listed != declared {
                return Err(GameError::InvalidAssets(format!(
                    "chapter {id} must list exactly the {tier} items"
                )));
            }
        }

        Ok(())
    }

    /// Neighbors of a location as typed values, in table order
    pub fn neighbors_of(&self, location: LocationName) -> GameResult<BTreeMap<Direction, LocationName>> {
        let mut neighbors = BTreeMap::new();
        if let Some(edges) = self.map.get(location.as_str()) {
            for (code, name) in edges {
                let direction = Direction::from_code(code).ok_or_else(|| {
                    GameError::InvalidAssets(format!("{location} declares unknown direction {code:?}"))
                })?;
                neighbors.insert(direction, name.parse()?);
            }
        }
        Ok(neighbors)
    }

    pub fn flavor_for(&self, location: LocationName) -> &[String] {
        self.flavor
            .get(location.as_str())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_assets_validate() {
        let assets = AssetData::default();
        assert!(assets.validate().is_ok());
        assert_eq!(assets.tiers.found.len(), 10);
        assert_eq!(assets.chapter_titles.len(), 4);
    }

    #[test]
    fn test_map_is_kept_asymmetric() {
        let assets = AssetData::default();
        let swamp = assets.neighbors_of(LocationName::Swamp).unwrap();
        assert_eq!(swamp.len(), 1);
        assert_eq!(swamp.get(&Direction::East), Some(&LocationName::Forest));
        assert_eq!(swamp.get(&Direction::North), None);
    }

    #[test]
    fn test_unknown_neighbor_rejected() {
        let mut assets = AssetData::default();
        assets
            .map
            .get_mut("Cave")
            .unwrap()
            .insert("N".to_string(), "Moon".to_string());
        assert!(matches!(assets.validate(), Err(GameError::UnknownLocation(name)) if name == "Moon"));
    }

    #[test]
    fn test_chapter_must_match_tier() {
        let mut assets = AssetData::default();
        assets.chapter_recipes.get_mut("2").unwrap().pop();
        assert!(matches!(assets.validate(), Err(GameError::InvalidAssets(_))));
    }

    #[test]
    fn test_duplicate_item_rejected() {
        let mut assets = AssetData::default();
        assets.tiers.basic.push("Skull".to_string());
        assets.chapter_recipes.get_mut("1").unwrap().push("Skull".to_string());
        assert!(matches!(assets.validate(), Err(GameError::InvalidAssets(_))));
    }

    fn with_found_items(count: usize) -> AssetData {
        let mut assets = AssetData::default();
        assets.tiers.found = (0..count).map(|i| format!("Reagent {i}")).collect();
        assets.chapter_recipes.insert("0".to_string(), assets.tiers.found.clone());
        assets
    }

    #[test]
    fn test_found_items_fit_pickup_keys() {
        // 45 over 5 locations is exactly 9 each
        assert!(with_found_items(45).validate().is_ok());
        // 8 each plus 4 leftovers that may all land together
        assert!(matches!(with_found_items(44).validate(), Err(GameError::InvalidAssets(_))));
        assert!(matches!(with_found_items(50).validate(), Err(GameError::InvalidAssets(_))));
    }

    #[test]
    fn test_chapter_ids_fit_book_keys() {
        for id in ["8", "9", "12", "03"] {
            let mut assets = AssetData::default();
            assets.chapter_titles.insert(id.to_string(), "Extras".to_string());
            assets.chapter_recipes.insert(id.to_string(), Vec::new());
            assert!(
                matches!(assets.validate(), Err(GameError::InvalidAssets(_))),
                "chapter {id} accepted"
            );
        }

        let mut assets = AssetData::default();
        assets.chapter_titles.insert("7".to_string(), "Extras".to_string());
        assets.chapter_recipes.insert("7".to_string(), Vec::new());
        assert!(assets.validate().is_ok());
    }

    #[test]
    fn test_load_from_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("assets.toml");
        let text = toml::to_string(&AssetData::default()).unwrap();
        std::fs::write(&path, text).unwrap();

        let loaded = AssetData::load(&path).unwrap();
        assert_eq!(loaded, AssetData::default());
    }

    #[test]
    fn test_load_missing_file() {
        let result = AssetData::load("/definitely/not/here.toml");
        assert!(matches!(result, Err(GameError::Io { .. })));
    }
}
