//! Everyone taking part in one battle.

use super::combatant::Combatant;
use super::common::{CombatantId, Side};
use super::party::Party;
use crate::engine::SetupError;

/// The party and the enemies of a battle, addressed by [`CombatantId`].
///
/// Only the party's active line-up is "in battle"; benched members can be
/// looked up but never act or get targeted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Roster {
    party: Party,
    enemies: Vec<Combatant>,
}

impl Roster {
    pub fn new(party: Party, enemies: Vec<Combatant>) -> Result<Self, SetupError> {
        if enemies.is_empty() {
            return Err(SetupError::EmptyEncounter);
        }
        if let Some(stray) = enemies.iter().find(|e| e.is_player()) {
            return Err(SetupError::NotAnEnemy(stray.name.clone()));
        }
        if enemies.len() > usize::from(u16::MAX) {
            return Err(SetupError::TooManyMembers(enemies.len()));
        }
        Ok(Self { party, enemies })
    }

    pub fn get(&self, id: CombatantId) -> Option<&Combatant> {
        match id.side {
            Side::Party => self.party.member(id.index),
            Side::Enemy => self.enemies.get(usize::from(id.index)),
        }
    }

    pub fn get_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        match id.side {
            Side::Party => self.party.member_mut(id.index),
            Side::Enemy => self.enemies.get_mut(usize::from(id.index)),
        }
    }

    /// Returns true if the combatant takes part in this battle.
    pub fn is_in_battle(&self, id: CombatantId) -> bool {
        match id.side {
            Side::Party => self.party.is_active(id.index),
            Side::Enemy => usize::from(id.index) < self.enemies.len(),
        }
    }

    /// Returns true if the combatant is in battle and not defeated.
    pub fn is_alive(&self, id: CombatantId) -> bool {
        self.is_in_battle(id) && self.get(id).is_some_and(Combatant::is_alive)
    }

    /// Every combatant in battle, party line-up first, defeated included.
    pub fn participants(&self) -> impl Iterator<Item = CombatantId> + '_ {
        let party = self.party.active().iter().map(|&i| CombatantId::party(i));
        let enemies = (0..self.enemies.len() as u16).map(CombatantId::enemy);
        party.chain(enemies)
    }

    /// Living in-battle members of one side, in roster order.
    pub fn living(&self, side: Side) -> impl Iterator<Item = CombatantId> + '_ {
        self.participants()
            .filter(move |id| id.side == side)
            .filter(|&id| self.is_alive(id))
    }

    /// Returns true if no in-battle member of `side` is standing.
    pub fn is_side_defeated(&self, side: Side) -> bool {
        self.living(side).next().is_none()
    }

    pub fn name(&self, id: CombatantId) -> &str {
        self.get(id).map(|c| c.name.as_str()).unwrap_or("???")
    }

    pub fn party(&self) -> &Party {
        &self.party
    }

    pub fn party_mut(&mut self) -> &mut Party {
        &mut self.party
    }

    pub fn enemies(&self) -> &[Combatant] {
        &self.enemies
    }

    pub fn into_parts(self) -> (Party, Vec<Combatant>) {
        (self.party, self.enemies)
    }
}
