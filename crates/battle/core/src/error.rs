//! Common error infrastructure for battle-core.
//!
//! Domain-specific errors (`ActionError`, `SubmitError`, `SetupError`, ...)
//! live next to the code that raises them. They all implement
//! [`BattleError`] so callers can classify failures uniformly.
//!
//! Nothing in the battle core is fatal to the process: a battle that cannot
//! proceed is forced to a terminal state rather than left hung.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// The same request may succeed later or an alternative action can be
    /// chosen (not enough SP, item out of stock).
    Recoverable,

    /// The request was invalid and should not be retried unchanged
    /// (wrong turn-holder, action already in progress).
    Validation,

    /// Unexpected state inconsistency; the engine self-heals but the cause
    /// should be investigated.
    Internal,

    /// The battle cannot be set up or continued.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all battle-core errors.
pub trait BattleError: std::fmt::Display + std::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Static identifier for this error variant, for logs and tests.
    fn error_code(&self) -> &'static str;
}
