//! Encounter list loader.

use std::collections::HashSet;
use std::path::Path;

use battle_core::EnemySpec;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron};

/// A named group of enemies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncounterEntry {
    pub id: String,
    pub enemies: Vec<EnemySpec>,
}

/// Encounter catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncounterCatalog {
    pub encounters: Vec<EncounterEntry>,
}

/// Loader for encounter lists from RON files.
pub struct EncounterLoader;

impl EncounterLoader {
    /// Load encounters from a RON file as `(id, enemies)` pairs.
    pub fn load(path: &Path) -> LoadResult<Vec<(String, Vec<EnemySpec>)>> {
        let catalog: EncounterCatalog = parse_ron(path, "encounter catalog")?;

        let mut seen = HashSet::new();
        let mut encounters = Vec::with_capacity(catalog.encounters.len());
        for entry in catalog.encounters {
            if !seen.insert(entry.id.clone()) {
                anyhow::bail!(
                    "Duplicate encounter '{}' in encounter catalog {}",
                    entry.id,
                    path.display()
                );
            }
            encounters.push((entry.id, entry.enemies));
        }

        Ok(encounters)
    }
}
