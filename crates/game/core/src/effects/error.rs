//! Errors raised while building, applying or removing status effects.

use crate::error::{ErrorSeverity, GameError};

/// Errors surfaced by the status effect engine.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum EffectError {
    #[error("{holder} does not have the effect {effect}")]
    NoSuchEffect { effect: String, holder: String },

    #[error("effect {effect} has invalid duration {duration} (must be at least one turn)")]
    InvalidDuration { effect: String, duration: i64 },

    #[error("effect {effect} references unknown stat '{stat}'")]
    UnknownStat { effect: String, stat: String },

    #[error("effect {effect} has negative amount {amount} for {stat}")]
    NegativeAmount {
        effect: String,
        stat: String,
        amount: i64,
    },

    #[error("{holder} already holds the maximum of {limit} status effects")]
    CapacityReached { holder: String, limit: usize },
}

impl GameError for EffectError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoSuchEffect { .. } => ErrorSeverity::Internal,
            Self::InvalidDuration { .. }
            | Self::UnknownStat { .. }
            | Self::NegativeAmount { .. } => ErrorSeverity::Validation,
            Self::CapacityReached { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoSuchEffect { .. } => "EFFECT_NOT_FOUND",
            Self::InvalidDuration { .. } => "EFFECT_INVALID_DURATION",
            Self::UnknownStat { .. } => "EFFECT_UNKNOWN_STAT",
            Self::NegativeAmount { .. } => "EFFECT_NEGATIVE_AMOUNT",
            Self::CapacityReached { .. } => "EFFECT_CAPACITY_REACHED",
        }
    }
}
