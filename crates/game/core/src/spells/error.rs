use crate::effects::EffectError;
use crate::error::{ErrorSeverity, GameError};

/// Reasons a cast is rejected. A rejected cast changes nothing.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CastError {
    #[error("unknown spell '{spell}'")]
    UnknownSpell { spell: String },

    #[error("{spell} is on cooldown for {remaining} more turns")]
    OnCooldown { spell: String, remaining: u32 },

    #[error("{spell} costs {required} mana, only {available} available")]
    NotEnoughMana {
        spell: String,
        required: f64,
        available: f64,
    },

    #[error("{caster} is dead and cannot cast")]
    CasterDead { caster: String },

    #[error("{target} is already dead")]
    TargetDead { target: String },

    #[error(transparent)]
    Effect(#[from] EffectError),
}

impl GameError for CastError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::OnCooldown { .. } | Self::NotEnoughMana { .. } => ErrorSeverity::Recoverable,
            Self::UnknownSpell { .. } | Self::CasterDead { .. } | Self::TargetDead { .. } => {
                ErrorSeverity::Validation
            }
            Self::Effect(inner) => inner.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownSpell { .. } => "CAST_UNKNOWN_SPELL",
            Self::OnCooldown { .. } => "CAST_ON_COOLDOWN",
            Self::NotEnoughMana { .. } => "CAST_NOT_ENOUGH_MANA",
            Self::CasterDead { .. } => "CAST_CASTER_DEAD",
            Self::TargetDead { .. } => "CAST_TARGET_DEAD",
            Self::Effect(inner) => inner.error_code(),
        }
    }
}
