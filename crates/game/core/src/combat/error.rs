//! Errors for combat actions.

use crate::effects::EffectError;
use crate::error::{ErrorSeverity, GameError};

/// Errors surfaced when an entity tries to act.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ActionError {
    #[error("{name} is dead and cannot act")]
    NotAlive { name: String },

    #[error("{name} is already dead")]
    TargetNotAlive { name: String },

    #[error(transparent)]
    Effect(#[from] EffectError),
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotAlive { .. } | Self::TargetNotAlive { .. } => ErrorSeverity::Validation,
            Self::Effect(inner) => inner.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotAlive { .. } => "ACTOR_NOT_ALIVE",
            Self::TargetNotAlive { .. } => "TARGET_NOT_ALIVE",
            Self::Effect(inner) => inner.error_code(),
        }
    }
}
