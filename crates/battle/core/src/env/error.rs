//! Oracle access errors.

use crate::error::{BattleError, ErrorSeverity};

/// Errors that occur when looking up collaborator data.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    #[error("ClassOracle not available")]
    ClassesNotAvailable,

    #[error("ItemOracle not available")]
    ItemsNotAvailable,

    #[error("class '{0}' not found")]
    ClassNotFound(String),

    #[error("item '{0}' not found")]
    ItemNotFound(String),

    #[error("encounter '{0}' not found")]
    EncounterNotFound(String),
}

impl BattleError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        use OracleError::*;
        match self {
            ClassesNotAvailable | ItemsNotAvailable => ErrorSeverity::Fatal,
            ClassNotFound(_) | ItemNotFound(_) | EncounterNotFound(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            ClassesNotAvailable => "ORACLE_CLASSES_NOT_AVAILABLE",
            ItemsNotAvailable => "ORACLE_ITEMS_NOT_AVAILABLE",
            ClassNotFound(_) => "ORACLE_CLASS_NOT_FOUND",
            ItemNotFound(_) => "ORACLE_ITEM_NOT_FOUND",
            EncounterNotFound(_) => "ORACLE_ENCOUNTER_NOT_FOUND",
        }
    }
}
