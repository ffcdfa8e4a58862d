/// Battle configuration constants and tunable parameters.
///
/// Durations are counted in ticks; the reference cadence is
/// [`BattleConfig::TICKS_PER_SECOND`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// How long each animation phase holds its outcome.
    pub durations: PhaseDurations,

    /// Number of recent messages kept in the battle log.
    pub message_log_capacity: usize,

    /// Typewriter speed in characters revealed per tick. 0 shows text at once.
    pub text_speed: u32,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of party members fighting at once.
    pub const MAX_ACTIVE_PARTY: usize = 4;
    /// Level cap for player characters.
    pub const MAX_LEVEL: u32 = 50;

    // ===== runtime-tunable defaults =====
    pub const TICKS_PER_SECOND: u32 = 60;
    pub const DEFAULT_MESSAGE_LOG_CAPACITY: usize = 3;
    pub const DEFAULT_TEXT_SPEED: u32 = 2;

    pub fn new() -> Self {
        Self {
            durations: PhaseDurations::default(),
            message_log_capacity: Self::DEFAULT_MESSAGE_LOG_CAPACITY,
            text_speed: Self::DEFAULT_TEXT_SPEED,
        }
    }

    /// Instant text, for headless drivers and tests.
    pub fn headless() -> Self {
        Self::new().with_text_speed(0)
    }

    #[must_use]
    pub fn with_text_speed(mut self, text_speed: u32) -> Self {
        self.text_speed = text_speed;
        self
    }

    #[must_use]
    pub fn with_durations(mut self, durations: PhaseDurations) -> Self {
        self.durations = durations;
        self
    }

    #[must_use]
    pub fn with_message_log_capacity(mut self, capacity: usize) -> Self {
        self.message_log_capacity = capacity.max(1);
        self
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Animation lengths, in ticks, per kind of action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PhaseDurations {
    /// Shared by attacks, skills, ultimates and enemy attacks.
    pub strike: u32,
    /// Pacing delay after DEFEND.
    pub defend: u32,
    pub cast: u32,
    pub flee: u32,
    pub item: u32,
    pub counter: u32,
}

impl PhaseDurations {
    pub const DEFAULT_STRIKE: u32 = 30;
    pub const DEFAULT_DEFEND: u32 = 45;
    pub const DEFAULT_CAST: u32 = 40;
    pub const DEFAULT_FLEE: u32 = 90;
    pub const DEFAULT_ITEM: u32 = 40;
    pub const DEFAULT_COUNTER: u32 = 30;

    /// Every phase lasts `ticks` ticks.
    pub const fn uniform(ticks: u32) -> Self {
        Self {
            strike: ticks,
            defend: ticks,
            cast: ticks,
            flee: ticks,
            item: ticks,
            counter: ticks,
        }
    }
}

impl Default for PhaseDurations {
    fn default() -> Self {
        Self {
            strike: Self::DEFAULT_STRIKE,
            defend: Self::DEFAULT_DEFEND,
            cast: Self::DEFAULT_CAST,
            flee: Self::DEFAULT_FLEE,
            item: Self::DEFAULT_ITEM,
            counter: Self::DEFAULT_COUNTER,
        }
    }
}
