use std::sync::Arc;

use combat_core::{
    ActionOutcome, BeneficialBuff, BuffStat, CastError, CastOutcome, Character, CharacterClass,
    CombatAction, CombatConfig, CombatEnv, Combatant, Damage, DamageOverTime, EffectError,
    Encounter, EncounterError, EncounterOutcome, EntityTemplate, Item, ItemKind, LootEntry, Monster,
    MonsterTemplate, PcgRng, ProgressionTable, RngOracle, SpellCatalog, SpellEffect,
    SpellTemplate,
};

/// Replays fixed values, then zeros.
struct Scripted(Vec<u32>);

impl RngOracle for Scripted {
    fn next_u32(&mut self) -> u32 {
        if self.0.is_empty() { 0 } else { self.0.remove(0) }
    }
}

fn spell(name: &str, cost: f64, cooldown: u32, effect: SpellEffect) -> SpellTemplate {
    SpellTemplate {
        name: name.into(),
        class: CharacterClass::Paladin,
        rank: 1,
        level_required: 1,
        mana_cost: cost,
        cooldown,
        effect,
    }
}

fn env() -> Arc<CombatEnv> {
    let catalog = SpellCatalog::new([
        spell(
            "Melting Strike",
            10.0,
            2,
            SpellEffect::Strike {
                magical_damage: 8.0,
                dot: Some(DamageOverTime::new("Melting", Damage::magical(2.0), 3, 1).unwrap()),
            },
        ),
        spell("Flash of Light", 15.0, 1, SpellEffect::Heal { amount: 20.0 }),
        spell(
            "Seal of Righteousness",
            5.0,
            0,
            SpellEffect::Seal {
                damage_per_swing: 3.0,
                duration: 2,
            },
        ),
        spell(
            "Devotion Aura",
            5.0,
            0,
            SpellEffect::Buff {
                buff: BeneficialBuff::new("Devotion Aura", [(BuffStat::Armor, 20)], 3).unwrap(),
            },
        ),
    ]);
    Arc::new(CombatEnv::new(
        CombatConfig::default(),
        ProgressionTable::default(),
        catalog,
    ))
}

fn hero() -> Character {
    let template = EntityTemplate::new("Arthas", 1, 100.0, 50.0).with_damage(10.0, 10.0);
    Character::new(&template, CharacterClass::Paladin, env()).unwrap()
}

fn kobold(health: f64, loot_table: Vec<LootEntry>) -> Monster {
    let template = MonsterTemplate {
        id: "kobold".into(),
        entity: EntityTemplate::new("Kobold", 1, health, 0.0).with_damage(4.0, 4.0),
        xp_reward: 100,
        gold_reward: 5,
        respawnable: true,
        quest_relevant: false,
        loot_table,
    };
    Monster::from_template(&template, 1, CombatConfig::default()).unwrap()
}

#[test]
fn auto_attack_duel_ends_in_victory() {
    let mut hero = hero();
    let candle = Item::new("Candle", ItemKind::Misc);
    let mut kobold = kobold(
        25.0,
        vec![
            LootEntry {
                item: candle,
                drop_percent: 50.0,
            },
            LootEntry {
                item: Item::new("Ear", ItemKind::Misc),
                drop_percent: 50.0,
            },
        ],
    );
    // d100 rolls: 50 (drops), 51 (misses)
    let mut rng = Scripted(vec![49, 50]);

    let mut encounter = Encounter::begin(&mut hero, &mut kobold);
    assert!(encounter.character().entity().is_in_combat());

    let first = encounter.run_turn(CombatAction::Attack, &mut rng).unwrap();
    assert_eq!(first.turn, 1);
    assert_eq!(first.outcome, EncounterOutcome::Ongoing);
    assert_eq!(first.monster_attack.unwrap().dealt, Damage::physical(4.0));

    encounter.run_turn(CombatAction::Attack, &mut rng).unwrap();
    let last = encounter.run_turn(CombatAction::Attack, &mut rng).unwrap();
    assert_eq!(last.outcome, EncounterOutcome::Victory);
    assert!(last.monster_attack.is_none());

    let (reward, loot) = last.kill.unwrap();
    assert_eq!(reward.xp, 100);
    assert_eq!(loot.gold, 5);
    assert_eq!(loot.items.len(), 1);
    assert_eq!(loot.items[0].name, "Candle");

    assert_eq!(
        encounter.run_turn(CombatAction::Attack, &mut rng).unwrap_err(),
        EncounterError::Finished(EncounterOutcome::Victory)
    );
    drop(encounter);

    assert_eq!(hero.entity().health(), 92.0);
    assert_eq!(hero.experience(), 100);
    assert_eq!(hero.gold(), 5);
    assert_eq!(hero.inventory().count("Candle"), 1);
    assert!(!hero.entity().is_in_combat());
    assert!(!kobold.is_alive());
}

#[test]
fn rejected_cast_leaves_the_turn_untouched() {
    let mut hero = hero();
    let mut kobold = kobold(30.0, Vec::new());
    let mut rng = Scripted(vec![]);
    let mut encounter = Encounter::begin(&mut hero, &mut kobold);

    let first = encounter
        .run_turn(CombatAction::Cast("Melting Strike".into()), &mut rng)
        .unwrap();
    assert!(matches!(
        first.action,
        Some(ActionOutcome::Cast(CastOutcome::Struck { .. }))
    ));
    assert_eq!(encounter.monster().entity().health(), 22.0);

    let err = encounter
        .run_turn(CombatAction::Cast("Melting Strike".into()), &mut rng)
        .unwrap_err();
    assert_eq!(
        err,
        EncounterError::Cast(CastError::OnCooldown {
            spell: "Melting Strike".into(),
            remaining: 1
        })
    );
    // no DoT tick, no monster swing
    assert_eq!(encounter.turn(), 1);
    assert_eq!(encounter.monster().entity().health(), 22.0);
    assert_eq!(encounter.character().entity().health(), 96.0);

    assert!(matches!(
        encounter.run_turn(CombatAction::Cast("Fireball".into()), &mut rng),
        Err(EncounterError::Cast(CastError::UnknownSpell { .. }))
    ));
}

#[test]
fn cast_into_a_full_effect_table_is_rejected_before_the_turn() {
    let mut hero = hero();
    let mut kobold = kobold(500.0, Vec::new());
    for i in 0..CombatConfig::MAX_STATUS_EFFECTS {
        let dot = DamageOverTime::new(format!("Rot {i}"), Damage::magical(1.0), 5, 1).unwrap();
        kobold.entity_mut().add_dot(&dot, 1).unwrap();
    }
    let mut rng = Scripted(vec![]);
    let mut encounter = Encounter::begin(&mut hero, &mut kobold);

    let err = encounter
        .run_turn(CombatAction::Cast("Melting Strike".into()), &mut rng)
        .unwrap_err();
    assert_eq!(
        err,
        EncounterError::Cast(CastError::Effect(EffectError::CapacityReached {
            holder: "Kobold".into(),
            limit: CombatConfig::MAX_STATUS_EFFECTS,
        }))
    );
    assert_eq!(encounter.turn(), 0);
    assert_eq!(encounter.monster().entity().health(), 500.0);
    assert_eq!(encounter.character().entity().mana(), 50.0);
    assert_eq!(encounter.monster().entity().remaining_turns("Rot 0"), Some(5));

    // a plain swing still goes through and the rot ticks
    let report = encounter.run_turn(CombatAction::Attack, &mut rng).unwrap();
    assert_eq!(report.monster_ticks.ticks.len(), CombatConfig::MAX_STATUS_EFFECTS);
}

#[test]
fn dot_ticks_then_expires() {
    let mut hero = hero();
    let mut kobold = kobold(30.0, Vec::new());
    let mut rng = Scripted(vec![]);
    let mut encounter = Encounter::begin(&mut hero, &mut kobold);

    encounter
        .run_turn(CombatAction::Cast("Melting Strike".into()), &mut rng)
        .unwrap();
    assert_eq!(
        encounter.monster().entity().remaining_turns("Melting"),
        Some(3)
    );

    // tick 2, swing 10
    let second = encounter.run_turn(CombatAction::Attack, &mut rng).unwrap();
    assert_eq!(second.monster_ticks.total_damage(), 2.0);
    assert_eq!(encounter.monster().entity().health(), 10.0);
    assert_eq!(
        encounter.monster().entity().remaining_turns("Melting"),
        Some(2)
    );

    // tick 2, then the strike is off cooldown and finishes it
    let third = encounter
        .run_turn(CombatAction::Cast("Melting Strike".into()), &mut rng)
        .unwrap();
    assert_eq!(third.monster_ticks.total_damage(), 2.0);
    assert_eq!(third.outcome, EncounterOutcome::Victory);
    assert!(matches!(
        third.action,
        Some(ActionOutcome::Cast(CastOutcome::Struck {
            target_died: true,
            dot: None,
            ..
        }))
    ));
    assert_eq!(encounter.character().entity().mana(), 30.0);
}

#[test]
fn seal_adds_magical_damage_to_swings() {
    let mut hero = hero();
    let mut kobold = kobold(30.0, Vec::new());
    let mut rng = Scripted(vec![]);
    let mut encounter = Encounter::begin(&mut hero, &mut kobold);

    encounter
        .run_turn(CombatAction::Cast("Seal of Righteousness".into()), &mut rng)
        .unwrap();
    let sealed = encounter.run_turn(CombatAction::Attack, &mut rng).unwrap();
    let swing = match sealed.action {
        Some(ActionOutcome::Attack(report)) => report,
        other => panic!("expected an attack, got {other:?}"),
    };
    assert_eq!(swing.dealt, Damage::new(10.0, 3.0));

    // the seal lasted two turns
    let plain = encounter.run_turn(CombatAction::Attack, &mut rng).unwrap();
    let Some(ActionOutcome::Attack(report)) = plain.action else {
        panic!("expected an attack");
    };
    assert_eq!(report.dealt, Damage::physical(10.0));
    assert_eq!(encounter.monster().entity().health(), 7.0);
}

#[test]
fn defeat_when_the_character_dies() {
    let template = EntityTemplate::new("Squire", 1, 8.0, 0.0).with_damage(1.0, 1.0);
    let mut squire = Character::new(&template, CharacterClass::Paladin, env()).unwrap();
    let mut kobold = kobold(100.0, Vec::new());
    let mut rng = Scripted(vec![]);
    let mut encounter = Encounter::begin(&mut squire, &mut kobold);

    encounter.run_turn(CombatAction::Attack, &mut rng).unwrap();
    let report = encounter.run_turn(CombatAction::Attack, &mut rng).unwrap();
    assert_eq!(report.outcome, EncounterOutcome::Defeat);
    assert!(report.kill.is_none());
    drop(encounter);

    assert!(!squire.is_alive());
    assert_eq!(squire.entity().health(), 0.0);
    assert_eq!(squire.experience(), 0);
    assert!(kobold.is_alive());
}

#[test]
fn buff_spell_lasts_its_duration() {
    let mut hero = hero();
    let mut kobold = kobold(100.0, Vec::new());
    let mut rng = Scripted(vec![]);
    let mut encounter = Encounter::begin(&mut hero, &mut kobold);

    encounter
        .run_turn(CombatAction::Cast("Devotion Aura".into()), &mut rng)
        .unwrap();
    assert_eq!(
        encounter.character().entity().remaining_turns("Devotion Aura"),
        Some(2)
    );
    encounter.run_turn(CombatAction::Attack, &mut rng).unwrap();
    let report = encounter.run_turn(CombatAction::Attack, &mut rng).unwrap();
    assert_eq!(report.character_expired, vec!["Devotion Aura".to_string()]);
    assert!(!encounter.character().entity().has_effect("Devotion Aura"));
}

#[test]
fn seeded_duels_replay_identically() {
    let duel = |seed: u64| {
        let template = EntityTemplate::new("Arthas", 1, 100.0, 50.0).with_damage(3.0, 9.0);
        let mut hero = Character::new(&template, CharacterClass::Paladin, env()).unwrap();
        let mut kobold = kobold(60.0, Vec::new());
        let mut rng = PcgRng::seeded(seed);
        let mut encounter = Encounter::begin(&mut hero, &mut kobold);

        let mut log = Vec::new();
        while !encounter.outcome().is_over() && encounter.turn() < 100 {
            let report = encounter.run_turn(CombatAction::Attack, &mut rng).unwrap();
            log.push(report);
        }
        log
    };

    let first = duel(42);
    assert_eq!(first, duel(42));
    assert!(first.last().unwrap().outcome.is_over());
}
