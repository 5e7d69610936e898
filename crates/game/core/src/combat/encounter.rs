//! One-on-one encounter between a character and a monster.
//!
//! Each turn runs in a fixed order:
//!
//! ```text
//! start-of-turn (DoT ticks, both sides)
//!      ↓
//! character action (attack or spell)
//!      ↓
//! monster auto attack, if it is still alive
//!      ↓
//! end-of-turn (buffs, cooldowns, auras, both sides)
//! ```
//!
//! When either side dies the encounter settles: a victory awards the kill and
//! the loot, and both sides leave combat.

use core::fmt;

use tracing::{debug, info};

use super::{ActionError, AttackReport, Combatant};
use crate::entity::{Character, KillReward, Loot, Monster, TickReport};
use crate::env::RngOracle;
use crate::error::{ErrorSeverity, GameError};
use crate::spells::{CastError, CastOutcome};

/// What the character does this turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CombatAction {
    Attack,
    Cast(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncounterOutcome {
    Ongoing,
    /// The monster died.
    Victory,
    /// The character died.
    Defeat,
}

impl EncounterOutcome {
    pub fn is_over(self) -> bool {
        self != EncounterOutcome::Ongoing
    }
}

/// Errors that reject a turn before anything happens.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum EncounterError {
    #[error("the encounter is already over ({0:?})")]
    Finished(EncounterOutcome),

    #[error(transparent)]
    Action(#[from] ActionError),

    #[error(transparent)]
    Cast(#[from] CastError),
}

impl GameError for EncounterError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Finished(_) => ErrorSeverity::Validation,
            Self::Action(inner) => inner.severity(),
            Self::Cast(inner) => inner.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Finished(_) => "ENCOUNTER_FINISHED",
            Self::Action(inner) => inner.error_code(),
            Self::Cast(inner) => inner.error_code(),
        }
    }
}

/// Result of the character's action.
#[derive(Clone, Debug, PartialEq)]
pub enum ActionOutcome {
    Attack(AttackReport),
    Cast(CastOutcome),
}

impl fmt::Display for ActionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attack(report) => fmt::Display::fmt(report, f),
            Self::Cast(outcome) => fmt::Display::fmt(outcome, f),
        }
    }
}

/// Everything that happened in one turn.
#[derive(Clone, Debug, PartialEq)]
pub struct TurnReport {
    pub turn: u32,
    pub character_ticks: TickReport,
    pub monster_ticks: TickReport,
    /// `None` when the character could not act (dead, or the monster died first).
    pub action: Option<ActionOutcome>,
    pub monster_attack: Option<AttackReport>,
    pub character_expired: Vec<String>,
    pub monster_expired: Vec<String>,
    /// Filled in on the turn the monster dies.
    pub kill: Option<(KillReward, Loot)>,
    pub outcome: EncounterOutcome,
}

/// Drives a duel between `character` and `monster`.
#[derive(Debug)]
pub struct Encounter<'a> {
    character: &'a mut Character,
    monster: &'a mut Monster,
    turn: u32,
    outcome: EncounterOutcome,
}

impl<'a> Encounter<'a> {
    /// Put both sides into combat.
    pub fn begin(character: &'a mut Character, monster: &'a mut Monster) -> Self {
        character.enter_combat();
        monster.entity_mut().enter_combat();
        info!(character = %character.name(), monster = %monster.name(), "encounter started");
        Self {
            character,
            monster,
            turn: 0,
            outcome: EncounterOutcome::Ongoing,
        }
    }

    pub fn character(&self) -> &Character {
        &*self.character
    }

    pub fn monster(&self) -> &Monster {
        &*self.monster
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn outcome(&self) -> EncounterOutcome {
        self.outcome
    }

    /// Reject an action that could not start, before any state changes.
    fn precheck(&self, action: &CombatAction) -> Result<(), EncounterError> {
        if self.outcome.is_over() {
            return Err(EncounterError::Finished(self.outcome));
        }
        if let CombatAction::Cast(name) = action {
            self.character.class().validate_cast(
                name,
                self.character.entity(),
                &*self.monster,
            )?;
        }
        Ok(())
    }

    /// Run one full turn.
    ///
    /// Fails without changing anything when the encounter is over or the
    /// cast would be rejected (unknown spell, cooldown, mana, a full effect
    /// table).
    pub fn run_turn(
        &mut self,
        action: CombatAction,
        rng: &mut dyn RngOracle,
    ) -> Result<TurnReport, EncounterError> {
        self.precheck(&action)?;
        self.turn += 1;

        let character_ticks = self.character.start_turn_update();
        let monster_ticks = self.monster.entity_mut().start_turn_update();
        if monster_ticks.died {
            self.monster.on_death(rng);
        }

        let mut action_outcome = None;
        if self.character.is_alive() && self.monster.is_alive() {
            action_outcome = Some(match action {
                CombatAction::Attack => {
                    ActionOutcome::Attack(self.character.attack(&mut *self.monster, rng)?)
                }
                CombatAction::Cast(name) => ActionOutcome::Cast(self.character.cast_spell(
                    &name,
                    &mut *self.monster,
                    rng,
                )?),
            });
        }

        let mut monster_attack = None;
        if self.monster.is_alive() && self.character.is_alive() {
            monster_attack = Some(self.monster.attack(&mut *self.character, rng)?);
        }

        let character_expired = self.character.end_turn_update();
        let monster_expired = self.monster.entity_mut().end_turn_update();

        let kill = self.settle();
        let report = TurnReport {
            turn: self.turn,
            character_ticks,
            monster_ticks,
            action: action_outcome,
            monster_attack,
            character_expired,
            monster_expired,
            kill,
            outcome: self.outcome,
        };
        debug!(turn = report.turn, outcome = ?report.outcome, "turn finished");
        Ok(report)
    }

    /// Decide the outcome after a turn; on a finish both sides leave combat.
    fn settle(&mut self) -> Option<(KillReward, Loot)> {
        let mut kill = None;
        if !self.monster.is_alive() {
            self.outcome = EncounterOutcome::Victory;
            let reward = self.character.award_monster_kill(&*self.monster);
            let loot = self.character.take_loot(&mut *self.monster);
            kill = Some((reward, loot));
        } else if !self.character.is_alive() {
            self.outcome = EncounterOutcome::Defeat;
        } else {
            return None;
        }

        self.character.leave_combat();
        self.monster.entity_mut().leave_combat();
        info!(
            character = %self.character.name(),
            monster = %self.monster.name(),
            outcome = ?self.outcome,
            turns = self.turn,
            "encounter over"
        );
        kill
    }
}
