//! Encounter specifications.
//!
//! Weighted random generation of encounters belongs to the world layer; the
//! battle only consumes the resulting (class id, level) list.

use std::collections::HashMap;

use super::classes::ClassOracle;
use super::error::OracleError;
use crate::state::Combatant;

/// One enemy to spawn: a class and a level.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemySpec {
    pub class_id: String,
    pub level: u32,
}

impl EnemySpec {
    pub fn new(class_id: impl Into<String>, level: u32) -> Self {
        Self {
            class_id: class_id.into(),
            level,
        }
    }
}

/// Oracle providing named encounter lists.
pub trait EncounterOracle: Send + Sync {
    fn encounter(&self, id: &str) -> Option<&[EnemySpec]>;
}

/// Builds a player character of `class_id` at `level`.
pub fn build_player<O>(
    oracle: &O,
    name: impl Into<String>,
    class_id: &str,
    level: u32,
) -> Result<Combatant, OracleError>
where
    O: ClassOracle + ?Sized,
{
    let class = oracle
        .class(class_id)
        .ok_or_else(|| OracleError::ClassNotFound(class_id.to_owned()))?;
    Ok(class.instantiate_player(name, level, oracle))
}

/// Builds the enemies of an encounter.
///
/// Enemies are named after their class. When a class appears more than once
/// the copies get letter suffixes ("Slime A", "Slime B") so messages stay
/// unambiguous.
pub fn build_enemies<O>(oracle: &O, specs: &[EnemySpec]) -> Result<Vec<Combatant>, OracleError>
where
    O: ClassOracle + ?Sized,
{
    let mut totals: HashMap<&str, usize> = HashMap::new();
    for spec in specs {
        *totals.entry(spec.class_id.as_str()).or_default() += 1;
    }

    let mut seen: HashMap<&str, usize> = HashMap::new();
    let mut enemies = Vec::with_capacity(specs.len());
    for spec in specs {
        let class = oracle
            .class(&spec.class_id)
            .ok_or_else(|| OracleError::ClassNotFound(spec.class_id.clone()))?;

        let ordinal = seen.entry(spec.class_id.as_str()).or_default();
        let name = if totals[spec.class_id.as_str()] > 1 {
            format!("{} {}", class.name, suffix(*ordinal))
        } else {
            class.name.clone()
        };
        *ordinal += 1;

        enemies.push(class.instantiate_enemy(name, spec.level, oracle));
    }
    Ok(enemies)
}

/// "A", "B", ..., "Z", "AA", "AB", ...
fn suffix(mut ordinal: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push(b'A' + (ordinal % 26) as u8);
        if ordinal < 26 {
            break;
        }
        ordinal = ordinal / 26 - 1;
    }
    letters.iter().rev().map(|&b| b as char).collect()
}
