//! Target selection session.
//!
//! The session stores only the acting character, the group and a cursor.
//! Candidate lists are recomputed from the roster on every query, so a target
//! that falls between two key presses simply disappears from the list and
//! the cursor is clamped back into range.

use crate::action::{TargetGroup, candidates};
use crate::state::{CombatantId, Roster};

use super::errors::TargetingError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TargetingSession {
    pub character: CombatantId,
    pub group: TargetGroup,
    cursor: usize,
}

impl TargetingSession {
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

/// Holds at most one open targeting session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TargetSelection {
    session: Option<TargetingSession>,
}

impl TargetSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a session, replacing any previous one.
    pub fn start(&mut self, character: CombatantId, group: TargetGroup) {
        self.session = Some(TargetingSession {
            character,
            group,
            cursor: 0,
        });
    }

    /// Closes the session and returns it.
    pub fn stop(&mut self) -> Option<TargetingSession> {
        self.session.take()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&TargetingSession> {
        self.session.as_ref()
    }

    /// Current candidates; empty when no session is open.
    pub fn valid_targets(&self, roster: &Roster) -> Vec<CombatantId> {
        match &self.session {
            Some(session) => candidates(roster, session.character, session.group),
            None => Vec::new(),
        }
    }

    pub fn next(&mut self, roster: &Roster) -> Result<(), TargetingError> {
        self.step(roster, |cursor, len| (cursor + 1) % len)
    }

    pub fn previous(&mut self, roster: &Roster) -> Result<(), TargetingError> {
        self.step(roster, |cursor, len| (cursor + len - 1) % len)
    }

    /// Toggles between enemies and allies and resets the cursor. Sessions on
    /// `All` or `SelfOnly` keep their group.
    pub fn switch_group(&mut self) -> Result<TargetGroup, TargetingError> {
        let session = self.session.as_mut().ok_or(TargetingError::Inactive)?;
        let switched = session.group.switched();
        if switched != session.group {
            session.group = switched;
            session.cursor = 0;
        }
        Ok(session.group)
    }

    /// The highlighted candidate, clamping the cursor if the list shrank.
    pub fn selected(&mut self, roster: &Roster) -> Option<CombatantId> {
        let targets = self.valid_targets(roster);
        let session = self.session.as_mut()?;
        if targets.is_empty() {
            return None;
        }
        session.cursor = session.cursor.min(targets.len() - 1);
        targets.get(session.cursor).copied()
    }

    fn step(
        &mut self,
        roster: &Roster,
        move_cursor: impl FnOnce(usize, usize) -> usize,
    ) -> Result<(), TargetingError> {
        let len = self.valid_targets(roster).len();
        let session = self.session.as_mut().ok_or(TargetingError::Inactive)?;
        if len == 0 {
            return Ok(());
        }
        session.cursor = move_cursor(session.cursor.min(len - 1), len);
        Ok(())
    }
}
