//! Auto attacks between combatants.

use core::fmt;

use tracing::debug;

use super::{ActionError, Damage};
use crate::entity::LivingEntity;
use crate::env::RngOracle;

/// Outcome of one auto attack.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackReport {
    pub attacker: String,
    pub target: String,
    /// Damage rolled by the attacker, before the target's armor and shield.
    pub rolled: Damage,
    /// Damage the target actually took.
    pub dealt: Damage,
    pub target_died: bool,
}

impl fmt::Display for AttackReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} hits {} for {}", self.attacker, self.target, self.dealt)?;
        if self.target_died {
            write!(f, ", killing it")?;
        }
        Ok(())
    }
}

/// Anything that can trade blows: characters and monsters.
pub trait Combatant {
    fn entity(&self) -> &LivingEntity;

    fn entity_mut(&mut self) -> &mut LivingEntity;

    /// Extra damage added to every auto attack (auras, weapon procs).
    fn swing_bonus(&self) -> Damage {
        Damage::zero()
    }

    /// Called once when an attack or spell of another combatant kills this one.
    fn on_death(&mut self, _rng: &mut dyn RngOracle) {}

    fn is_alive(&self) -> bool {
        self.entity().is_alive()
    }

    fn is_in_combat(&self) -> bool {
        self.entity().is_in_combat()
    }

    /// Roll an auto attack and land it on `target`.
    ///
    /// Both sides must be alive; a rejected attack changes nothing.
    fn attack(
        &mut self,
        target: &mut dyn Combatant,
        rng: &mut dyn RngOracle,
    ) -> Result<AttackReport, ActionError> {
        let attacker = self.entity();
        attacker.ensure_alive()?;
        if !target.is_alive() {
            return Err(ActionError::TargetNotAlive {
                name: target.entity().name().to_string(),
            });
        }

        let rolled = attacker.get_auto_attack_damage(target.entity().level(), rng) + self.swing_bonus();
        let attacker_level = attacker.level();
        let attacker_name = attacker.name().to_string();

        let dealt = target.entity_mut().take_attack(rolled, attacker_level);
        let target_died = !target.is_alive();
        if target_died {
            target.on_death(rng);
        }

        let report = AttackReport {
            attacker: attacker_name,
            target: target.entity().name().to_string(),
            rolled,
            dealt,
            target_died,
        };
        debug!(%report, "auto attack");
        Ok(report)
    }
}
