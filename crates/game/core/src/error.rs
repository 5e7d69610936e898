//! Error classification shared by every combat-core error.
//!
//! Each subsystem keeps its own `thiserror` enum next to the operations it
//! guards (`EffectError` in `effects`, `CastError` in `spells`, ...). They all
//! implement [`GameError`] so a caller driving the turn loop can tell a
//! rejected action apart from bad data or a broken table without matching on
//! every variant.
//!
//! A failed operation leaves the entity untouched. Broken resource invariants
//! are not errors at all; they panic.

use strum::{Display, IntoStaticStr};

/// How a caller should react to an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ErrorSeverity {
    /// The action was refused this turn but may succeed later
    /// (cooldown, mana, a full effect table).
    Recoverable,

    /// The request itself is malformed: zero durations, unknown spells,
    /// acting while dead.
    Validation,

    /// Bookkeeping disagrees with itself, e.g. removing an effect that was
    /// never applied.
    Internal,
}

impl ErrorSeverity {
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Whether trying another action this turn makes sense.
    pub const fn is_recoverable(self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Implemented by every error enum in the crate.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier of the variant, suitable for logs and metrics.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
