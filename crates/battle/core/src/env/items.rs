//! Item definitions usable in battle.

use std::borrow::Borrow;
use std::fmt;

use crate::action::TargetGroup;

/// Catalog key of an item.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for ItemId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What an item does when used.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemEffect {
    RestoreHp(u32),
    RestoreSp(u32),
    /// Reveals the target's stats.
    Scan,
}

impl ItemEffect {
    pub const fn default_targets(&self) -> TargetGroup {
        match self {
            ItemEffect::RestoreHp(_) | ItemEffect::RestoreSp(_) => TargetGroup::Allies,
            ItemEffect::Scan => TargetGroup::Enemies,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub id: ItemId,
    pub name: String,
    pub effect: ItemEffect,
    pub targets: TargetGroup,
}

impl ItemDefinition {
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, effect: ItemEffect) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            targets: effect.default_targets(),
            effect,
        }
    }
}

/// Oracle providing item definitions.
pub trait ItemOracle: Send + Sync {
    fn definition(&self, id: &ItemId) -> Option<&ItemDefinition>;
}
