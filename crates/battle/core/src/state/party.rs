//! The player's party: members, the active line-up, the leader and the
//! shared inventory.

use std::collections::BTreeMap;

use arrayvec::ArrayVec;

use super::combatant::Combatant;
use crate::config::BattleConfig;
use crate::engine::SetupError;
use crate::env::ItemId;

/// Indices of the members fighting in battle.
pub type ActiveLineup = ArrayVec<u16, { BattleConfig::MAX_ACTIVE_PARTY }>;

/// Player characters available to the battle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Party {
    members: Vec<Combatant>,
    active: ActiveLineup,
    leader: u16,
    pub inventory: Inventory,
}

impl Party {
    /// Builds a party from player characters.
    ///
    /// The first (up to) [`BattleConfig::MAX_ACTIVE_PARTY`] members form the
    /// active line-up and the first member leads.
    pub fn new(members: Vec<Combatant>) -> Result<Self, SetupError> {
        if members.is_empty() {
            return Err(SetupError::EmptyParty);
        }
        if let Some(stray) = members.iter().find(|m| !m.is_player()) {
            return Err(SetupError::NotAPlayer(stray.name.clone()));
        }
        if members.len() > usize::from(u16::MAX) {
            return Err(SetupError::TooManyMembers(members.len()));
        }

        let active = (0..members.len() as u16)
            .take(BattleConfig::MAX_ACTIVE_PARTY)
            .collect();

        Ok(Self {
            members,
            active,
            leader: 0,
            inventory: Inventory::default(),
        })
    }

    /// Replaces the active line-up. Indices must be distinct and in range.
    pub fn set_active(&mut self, indices: &[u16]) -> Result<(), SetupError> {
        if indices.is_empty() {
            return Err(SetupError::EmptyParty);
        }
        if indices.len() > BattleConfig::MAX_ACTIVE_PARTY {
            return Err(SetupError::TooManyActive {
                requested: indices.len(),
                limit: BattleConfig::MAX_ACTIVE_PARTY,
            });
        }

        let mut lineup = ActiveLineup::new();
        for &index in indices {
            if usize::from(index) >= self.members.len() || lineup.contains(&index) {
                return Err(SetupError::InvalidMember(index));
            }
            lineup.push(index);
        }

        self.active = lineup;
        Ok(())
    }

    pub fn set_leader(&mut self, index: u16) -> Result<(), SetupError> {
        if usize::from(index) >= self.members.len() {
            return Err(SetupError::InvalidMember(index));
        }
        self.leader = index;
        Ok(())
    }

    #[must_use]
    pub fn with_inventory(mut self, inventory: Inventory) -> Self {
        self.inventory = inventory;
        self
    }

    pub fn members(&self) -> &[Combatant] {
        &self.members
    }

    pub fn member(&self, index: u16) -> Option<&Combatant> {
        self.members.get(usize::from(index))
    }

    pub fn member_mut(&mut self, index: u16) -> Option<&mut Combatant> {
        self.members.get_mut(usize::from(index))
    }

    pub fn active(&self) -> &[u16] {
        &self.active
    }

    pub fn is_active(&self, index: u16) -> bool {
        self.active.contains(&index)
    }

    pub fn leader(&self) -> &Combatant {
        &self.members[usize::from(self.leader)]
    }

    pub fn leader_index(&self) -> u16 {
        self.leader
    }

    /// Restores every member between battles.
    pub fn rest(&mut self) {
        for member in &mut self.members {
            member.rest();
        }
    }

    pub fn into_members(self) -> Vec<Combatant> {
        self.members
    }
}

/// Item counts held by the party.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inventory {
    items: BTreeMap<ItemId, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_item(mut self, id: impl Into<ItemId>, count: u32) -> Self {
        self.add(id, count);
        self
    }

    pub fn add(&mut self, id: impl Into<ItemId>, count: u32) {
        if count == 0 {
            return;
        }
        let entry = self.items.entry(id.into()).or_default();
        *entry = entry.saturating_add(count);
    }

    pub fn count(&self, id: &ItemId) -> u32 {
        self.items.get(id).copied().unwrap_or(0)
    }

    /// Removes one unit. Returns false (and changes nothing) if none are held.
    pub fn take(&mut self, id: &ItemId) -> bool {
        let Some(count) = self.items.get_mut(id) else {
            return false;
        };
        *count -= 1;
        if *count == 0 {
            self.items.remove(id);
        }
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ItemId, u32)> {
        self.items.iter().map(|(id, count)| (id, *count))
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
