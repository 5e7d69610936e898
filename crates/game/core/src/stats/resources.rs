//! Resource meters (health, mana) and the max-change policy.
//!
//! When a maximum moves, the current value follows these rules:
//!
//! | change   | state                         | current value              |
//! |----------|-------------------------------|----------------------------|
//! | increase | out of combat                 | `+delta` (free heal-up)    |
//! | increase | in combat                     | untouched                  |
//! | decrease | current above the new cap     | `-delta`, must land on cap |
//! | decrease | out of combat, within the cap | `-delta` (gap preserved)   |
//! | decrease | in combat, within the cap     | untouched                  |

use strum::{Display, IntoStaticStr};

/// Tolerance used when comparing fractional resource values.
const EPSILON: f64 = 1e-9;

/// Enum representing individual resource types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResourceKind {
    /// Health points.
    Health,
    /// Mana points.
    Mana,
}

/// A current/maximum pair.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    pub kind: ResourceKind,
    pub current: f64,
    pub max: f64,
}

impl ResourceMeter {
    /// A full meter.
    pub fn full(kind: ResourceKind, max: f64) -> Self {
        let max = max.max(0.0);
        Self {
            kind,
            current: max,
            max,
        }
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }

    pub fn is_empty(&self) -> bool {
        self.current <= 0.0
    }

    /// Missing amount up to the maximum.
    pub fn missing(&self) -> f64 {
        (self.max - self.current).max(0.0)
    }

    /// Restore up to the maximum; returns `(restored, overflow)`.
    pub fn restore(&mut self, amount: f64) -> (f64, f64) {
        let amount = amount.max(0.0);
        self.current += amount;
        let overflow = (self.current - self.max).max(0.0);
        if overflow > 0.0 {
            self.current = self.max;
        }
        (amount - overflow, overflow)
    }

    /// Reduce by `amount`, flooring at zero. Returns the amount actually removed.
    pub fn drain(&mut self, amount: f64) -> f64 {
        let removed = amount.max(0.0).min(self.current);
        self.current -= removed;
        removed
    }

    /// Spend exactly `amount` if available.
    pub fn try_spend(&mut self, amount: f64) -> bool {
        if self.current + EPSILON < amount {
            return false;
        }
        self.current = (self.current - amount).max(0.0);
        true
    }

    pub fn refill(&mut self) {
        self.current = self.max;
    }

    /// Move the maximum to `new_max`, adjusting the current value by the
    /// policy in the module docs.
    ///
    /// # Panics
    ///
    /// Panics if an overcapped value, reduced by the decrease, does not land
    /// exactly on the new cap. `owner` names the entity in the panic message.
    pub fn change_max(&mut self, new_max: f64, in_combat: bool, owner: &str) {
        let new_max = new_max.max(0.0);
        let delta = new_max - self.max;
        self.max = new_max;

        if delta > 0.0 {
            if !in_combat {
                self.current += delta;
            }
            return;
        }
        if delta == 0.0 {
            return;
        }

        let reduction = -delta;
        if self.current > new_max + EPSILON {
            self.current = self.floor_after(self.current - reduction);
            if (self.current - new_max).abs() > EPSILON {
                panic!(
                    "{owner}: {} {} missed its new maximum {} after a decrease of {}",
                    self.kind, self.current, new_max, reduction
                );
            }
        } else if !in_combat {
            self.current = self.floor_after(self.current - reduction);
        }
    }

    /// A max decrease never kills: health bottoms out at 1 while positive.
    fn floor_after(&self, value: f64) -> f64 {
        match self.kind {
            ResourceKind::Health if self.current > 0.0 => value.max(1.0_f64.min(self.current)),
            _ => value.max(0.0),
        }
    }
}
