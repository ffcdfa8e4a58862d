use std::fmt;

/// Which side of the battle a combatant fights for.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Side {
    /// Player-controlled party members.
    Party,
    /// Encounter enemies, driven by the session.
    Enemy,
}

impl Side {
    /// Returns the side this one fights against.
    #[inline]
    pub const fn opponent(self) -> Self {
        match self {
            Side::Party => Side::Enemy,
            Side::Enemy => Side::Party,
        }
    }
}

/// Stable identifier for a combatant for the lifetime of a battle.
///
/// The index refers to the party member list or to the enemy list, depending
/// on `side`. Combatants are never destroyed mid-battle, so ids stay valid
/// after defeat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantId {
    pub side: Side,
    pub index: u16,
}

impl CombatantId {
    pub const fn party(index: u16) -> Self {
        Self {
            side: Side::Party,
            index,
        }
    }

    pub const fn enemy(index: u16) -> Self {
        Self {
            side: Side::Enemy,
            index,
        }
    }

    #[inline]
    pub const fn is_party(self) -> bool {
        matches!(self.side, Side::Party)
    }

    #[inline]
    pub const fn is_enemy(self) -> bool {
        matches!(self.side, Side::Enemy)
    }
}

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.side, self.index)
    }
}

/// A bounded pool such as HP or SP.
///
/// Mutators never push `current` past `maximum`. A meter whose fields were
/// written directly with `current > maximum` is pulled back on the next
/// restore.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    pub current: u32,
    pub maximum: u32,
}

impl ResourceMeter {
    pub const fn new(current: u32, maximum: u32) -> Self {
        let current = if current > maximum { maximum } else { current };
        Self { current, maximum }
    }

    /// A meter filled to its maximum.
    pub const fn full(maximum: u32) -> Self {
        Self {
            current: maximum,
            maximum,
        }
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.current == 0
    }

    #[inline]
    pub const fn is_full(&self) -> bool {
        self.current == self.maximum
    }

    /// Removes up to `amount`, stopping at zero. Returns the amount removed.
    pub fn deplete(&mut self, amount: u32) -> u32 {
        let removed = amount.min(self.current);
        self.current -= removed;
        removed
    }

    /// Adds up to `amount`, stopping at the maximum. Returns the amount added.
    pub fn restore(&mut self, amount: u32) -> u32 {
        self.current = self.current.min(self.maximum);
        let added = amount.min(self.maximum.saturating_sub(self.current));
        self.current += added;
        added
    }

    pub fn refill(&mut self) {
        self.current = self.maximum;
    }

    /// Raises the maximum and refills the meter.
    pub fn grow(&mut self, amount: u32) {
        self.maximum = self.maximum.saturating_add(amount);
        self.refill();
    }
}

impl fmt::Display for ResourceMeter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.current, self.maximum)
    }
}
