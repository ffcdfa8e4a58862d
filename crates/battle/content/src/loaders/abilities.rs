//! Ability catalog loader.

use std::path::Path;

use battle_core::{
    Ability, AbilityEffect, LearnedAbility, Passive, ResourceCost, TargetGroup,
};
use serde::{Deserialize, Serialize};

use crate::content::AbilityCatalog;
use crate::loaders::{LoadResult, parse_ron};

/// One active ability as written in RON.
///
/// `cost` defaults to free and `targets` to the effect's natural group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityEntry {
    pub name: String,
    #[serde(default)]
    pub cost: ResourceCost,
    pub effect: AbilityEffect,
    #[serde(default)]
    pub targets: Option<TargetGroup>,
}

impl AbilityEntry {
    fn into_ability(self) -> Ability {
        let ability = Ability::new(self.name, self.cost, self.effect);
        match self.targets {
            Some(targets) => ability.with_targets(targets),
            None => ability,
        }
    }
}

/// Ability catalog structure for RON files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AbilityCatalogFile {
    pub spells: Vec<AbilityEntry>,
    pub skills: Vec<AbilityEntry>,
    pub ultimates: Vec<AbilityEntry>,
    pub passives: Vec<Passive>,
}

impl AbilityCatalogFile {
    /// Flattens the four lists into one catalog.
    ///
    /// # Errors
    ///
    /// Fails if two entries share a name, even across lists.
    pub fn into_catalog(self) -> LoadResult<AbilityCatalog> {
        let entries = self
            .spells
            .into_iter()
            .map(|entry| LearnedAbility::Spell(entry.into_ability()))
            .chain(
                self.skills
                    .into_iter()
                    .map(|entry| LearnedAbility::Skill(entry.into_ability())),
            )
            .chain(
                self.ultimates
                    .into_iter()
                    .map(|entry| LearnedAbility::Ultimate(entry.into_ability())),
            )
            .chain(self.passives.into_iter().map(LearnedAbility::Passive));

        let mut catalog = AbilityCatalog::new();
        for entry in entries {
            let name = entry.name().to_owned();
            if catalog.insert(entry).is_some() {
                anyhow::bail!("Duplicate ability '{}' in ability catalog", name);
            }
        }
        Ok(catalog)
    }
}

/// Loader for the ability catalog from RON files.
pub struct AbilityLoader;

impl AbilityLoader {
    /// Load the ability catalog from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing an AbilityCatalogFile
    pub fn load(path: &Path) -> LoadResult<AbilityCatalog> {
        let file: AbilityCatalogFile = parse_ron(path, "ability catalog")?;
        file.into_catalog()
            .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }
}
