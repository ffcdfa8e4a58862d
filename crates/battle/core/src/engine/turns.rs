//! Turn queue management.
//!
//! The queue is rebuilt from the live roster: living combatants only, fastest
//! first, higher level breaking speed ties, and a random key (drawn once per
//! rebuild) breaking whatever remains. Removal keeps the current index
//! pointing at the same logical position so a defeat never skips or repeats
//! anyone's turn.

use std::cmp::Reverse;

use crate::rng::RngSource;
use crate::state::{CombatantId, Roster};

use super::errors::TurnError;

/// Ordered sequence of living combatants and the index of the one acting.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TurnOrder {
    queue: Vec<CombatantId>,
    current: usize,
    /// The entry at `current` was removed; `current` already points at its
    /// successor, so the next advance must not move again.
    current_removed: bool,
}

impl TurnOrder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the queue from the roster and resets the current index.
    ///
    /// # Errors
    ///
    /// Returns `TurnError::NoLivingCombatants` if nobody in battle is
    /// standing; the queue is left empty.
    pub fn regenerate<R>(&mut self, roster: &Roster, rng: &mut R) -> Result<(), TurnError>
    where
        R: RngSource + ?Sized,
    {
        let mut keyed: Vec<_> = roster
            .participants()
            .filter_map(|id| {
                let combatant = roster.get(id).filter(|c| c.is_alive())?;
                Some((id, combatant.stats.speed, combatant.level, rng.next_u32()))
            })
            .collect();

        keyed.sort_by_key(|&(_, speed, level, tiebreak)| (Reverse(speed), Reverse(level), tiebreak));

        self.queue = keyed.into_iter().map(|(id, ..)| id).collect();
        self.current = 0;
        self.current_removed = false;

        tracing::debug!(queue = ?self.queue, "turn queue regenerated");

        if self.queue.is_empty() {
            Err(TurnError::NoLivingCombatants)
        } else {
            Ok(())
        }
    }

    pub fn current(&self) -> Option<CombatantId> {
        self.queue.get(self.current).copied()
    }

    pub fn is_player_turn(&self) -> bool {
        self.current().is_some_and(CombatantId::is_party)
    }

    /// Moves to the next living combatant.
    ///
    /// Defeated entries are dropped first. If that empties the queue it is
    /// rebuilt from the roster; `None` means nobody is left standing.
    pub fn advance<R>(&mut self, roster: &Roster, rng: &mut R) -> Option<CombatantId>
    where
        R: RngSource + ?Sized,
    {
        let defeated: Vec<_> = self
            .queue
            .iter()
            .copied()
            .filter(|&id| !roster.is_alive(id))
            .collect();
        for id in defeated {
            self.remove(id);
        }

        if self.queue.is_empty() {
            self.regenerate(roster, rng).ok()?;
            return self.current();
        }

        if self.current_removed {
            self.current_removed = false;
        } else {
            self.current = (self.current + 1) % self.queue.len();
        }
        self.current()
    }

    /// Removes a combatant from the queue. Returns false if it was not queued.
    pub fn remove(&mut self, id: CombatantId) -> bool {
        let Some(position) = self.queue.iter().position(|&queued| queued == id) else {
            return false;
        };
        self.queue.remove(position);

        if position < self.current {
            self.current -= 1;
        } else if position == self.current {
            self.current_removed = true;
        }
        if self.current >= self.queue.len() {
            self.current = 0;
        }
        true
    }

    pub fn contains(&self, id: CombatantId) -> bool {
        self.queue.contains(&id)
    }

    pub fn entries(&self) -> &[CombatantId] {
        &self.queue
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
