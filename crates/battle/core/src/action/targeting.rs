//! Target groups for actions.
//!
//! Groups are relative to the acting combatant: `Enemies` for a party member
//! are the encounter's enemies, and vice versa.

use crate::state::{CombatantId, Roster, Side};

/// Which combatants an action may be aimed at.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TargetGroup {
    /// Living members of the opposing side.
    #[default]
    Enemies,
    /// Living members of the actor's own side, the actor included.
    Allies,
    /// One living combatant picked from either side. The ability still
    /// hits a single target; this only widens who may be chosen.
    All,
    /// The actor only.
    SelfOnly,
}

impl TargetGroup {
    /// The group reached by the "switch side" control.
    ///
    /// Only `Enemies` and `Allies` toggle; `All` and `SelfOnly` are fixed.
    pub const fn switched(self) -> Self {
        match self {
            TargetGroup::Enemies => TargetGroup::Allies,
            TargetGroup::Allies => TargetGroup::Enemies,
            other => other,
        }
    }

    /// Returns true if the player picks a target from a list.
    pub const fn requires_choice(self) -> bool {
        !matches!(self, TargetGroup::SelfOnly)
    }
}

/// Living combatants `actor` may aim at within `group`, in roster order.
///
/// Always computed from the live roster; a combatant defeated since the last
/// call is simply absent.
pub fn candidates(roster: &Roster, actor: CombatantId, group: TargetGroup) -> Vec<CombatantId> {
    match group {
        TargetGroup::Enemies => roster.living(actor.side.opponent()).collect(),
        TargetGroup::Allies => roster.living(actor.side).collect(),
        TargetGroup::All => roster
            .living(Side::Party)
            .chain(roster.living(Side::Enemy))
            .collect(),
        TargetGroup::SelfOnly => {
            if roster.is_alive(actor) {
                vec![actor]
            } else {
                Vec::new()
            }
        }
    }
}
