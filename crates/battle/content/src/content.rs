//! In-memory content bundle implementing the battle-core oracles.
//!
//! [`BattleContent`] is immutable once built. Share it behind an `Arc` to
//! hand the same data to several sessions (see [`BattleContent::into_env`]).

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use battle_core::{
    BattleConfig, BattleEnv, ClassDefinition, ClassOracle, EncounterOracle, EnemySpec,
    ItemDefinition, ItemId, ItemOracle, LearnedAbility,
};

/// Abilities keyed by name, across all four containers.
///
/// Names are unique catalog-wide so a class unlock list can refer to an
/// ability by name alone.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AbilityCatalog {
    entries: BTreeMap<String, LearnedAbility>,
}

impl AbilityCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry, returning the one it replaced, if any.
    pub fn insert(&mut self, entry: LearnedAbility) -> Option<LearnedAbility> {
        self.entries.insert(entry.name().to_owned(), entry)
    }

    pub fn get(&self, name: &str) -> Option<&LearnedAbility> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<LearnedAbility> for AbilityCatalog {
    fn from_iter<I: IntoIterator<Item = LearnedAbility>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for entry in iter {
            catalog.insert(entry);
        }
        catalog
    }
}

/// Cross-reference problems found by [`BattleContent::validate`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ContentIssue {
    #[error("class '{class}' unlocks unknown ability '{ability}'")]
    UnknownAbility { class: String, ability: String },

    #[error("class '{class}' unlocks '{ability}' at level {level}, above the level cap")]
    UnlockBeyondCap {
        class: String,
        ability: String,
        level: u32,
    },

    #[error("class '{0}' has no HP")]
    NoHp(String),

    #[error("encounter '{encounter}' references unknown class '{class}'")]
    UnknownClass { encounter: String, class: String },

    #[error("encounter '{encounter}' spawns '{class}' at invalid level {level}")]
    InvalidLevel {
        encounter: String,
        class: String,
        level: u32,
    },

    #[error("encounter '{0}' has no enemies")]
    EmptyEncounter(String),

    #[error("passive '{name}' has a {percent}% trigger chance")]
    ChanceOutOfRange { name: String, percent: u32 },
}

/// Every piece of content a battle can draw on.
#[derive(Clone, Debug, Default)]
pub struct BattleContent {
    config: BattleConfig,
    abilities: AbilityCatalog,
    classes: HashMap<String, ClassDefinition>,
    items: HashMap<ItemId, ItemDefinition>,
    encounters: BTreeMap<String, Vec<EnemySpec>>,
}

impl BattleContent {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(mut self, config: BattleConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_abilities(mut self, abilities: AbilityCatalog) -> Self {
        self.abilities = abilities;
        self
    }

    #[must_use]
    pub fn with_classes(mut self, classes: impl IntoIterator<Item = ClassDefinition>) -> Self {
        for class in classes {
            self.add_class(class);
        }
        self
    }

    #[must_use]
    pub fn with_items(mut self, items: impl IntoIterator<Item = ItemDefinition>) -> Self {
        for item in items {
            self.add_item(item);
        }
        self
    }

    #[must_use]
    pub fn with_encounters(
        mut self,
        encounters: impl IntoIterator<Item = (String, Vec<EnemySpec>)>,
    ) -> Self {
        self.encounters.extend(encounters);
        self
    }

    pub fn add_class(&mut self, class: ClassDefinition) {
        self.classes.insert(class.id.clone(), class);
    }

    pub fn add_item(&mut self, item: ItemDefinition) {
        self.items.insert(item.id.clone(), item);
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn abilities(&self) -> &AbilityCatalog {
        &self.abilities
    }

    /// Class ids in sorted order.
    pub fn class_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.classes.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn encounter_ids(&self) -> impl Iterator<Item = &str> {
        self.encounters.keys().map(String::as_str)
    }

    /// Checks every cross reference between catalogs.
    ///
    /// Issues are sorted by class and encounter so reports are stable.
    pub fn validate(&self) -> Vec<ContentIssue> {
        let mut issues = Vec::new();

        for name in self.abilities.names() {
            if let Some(LearnedAbility::Passive(passive)) = self.abilities.get(name) {
                let percent = passive.chance.as_percent();
                if percent > 100 {
                    issues.push(ContentIssue::ChanceOutOfRange {
                        name: passive.name.clone(),
                        percent,
                    });
                }
            }
        }

        for id in self.class_ids() {
            let Some(class) = self.classes.get(id) else {
                continue;
            };
            if class.max_hp == 0 {
                issues.push(ContentIssue::NoHp(class.id.clone()));
            }
            for unlock in &class.unlocks {
                if !self.abilities.contains(&unlock.ability) {
                    issues.push(ContentIssue::UnknownAbility {
                        class: class.id.clone(),
                        ability: unlock.ability.clone(),
                    });
                } else if unlock.level > BattleConfig::MAX_LEVEL {
                    issues.push(ContentIssue::UnlockBeyondCap {
                        class: class.id.clone(),
                        ability: unlock.ability.clone(),
                        level: unlock.level,
                    });
                }
            }
        }

        for (encounter, specs) in &self.encounters {
            if specs.is_empty() {
                issues.push(ContentIssue::EmptyEncounter(encounter.clone()));
            }
            for spec in specs {
                if !self.classes.contains_key(&spec.class_id) {
                    issues.push(ContentIssue::UnknownClass {
                        encounter: encounter.clone(),
                        class: spec.class_id.clone(),
                    });
                } else if spec.level == 0 || spec.level > BattleConfig::MAX_LEVEL {
                    issues.push(ContentIssue::InvalidLevel {
                        encounter: encounter.clone(),
                        class: spec.class_id.clone(),
                        level: spec.level,
                    });
                }
            }
        }

        issues
    }

    /// Wraps the content in a [`BattleEnv`] serving both classes and items.
    pub fn into_env(self) -> BattleEnv {
        let shared = Arc::new(self);
        BattleEnv::empty()
            .with_classes(shared.clone())
            .with_items(shared)
    }
}

impl ClassOracle for BattleContent {
    fn class(&self, id: &str) -> Option<&ClassDefinition> {
        self.classes.get(id)
    }

    fn ability(&self, name: &str) -> Option<LearnedAbility> {
        self.abilities.get(name).cloned()
    }
}

impl ItemOracle for BattleContent {
    fn definition(&self, id: &ItemId) -> Option<&ItemDefinition> {
        self.items.get(id)
    }
}

impl EncounterOracle for BattleContent {
    fn encounter(&self, id: &str) -> Option<&[EnemySpec]> {
        self.encounters.get(id).map(Vec::as_slice)
    }
}
