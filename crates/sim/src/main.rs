//! Headless duel runner.
//!
//! Loads content from `SIM_DATA_DIR`, spawns the configured character and
//! fights the configured monster until one side dies, logging every turn.
mod config;
mod tactics;

use std::sync::Arc;

use anyhow::{Context, Result};
use combat_content::ContentFactory;
use combat_core::{
    Character, CombatEnv, Combatant, Encounter, EncounterOutcome, Monster, MonsterTemplate,
    PcgRng, TurnReport,
};
use tracing::{info, warn};

use config::SimConfig;

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = SimConfig::from_env();
    info!(?config, "starting simulation");

    let factory = ContentFactory::new(&config.data_dir);
    let env = Arc::new(factory.load_env().context("Failed to load combat environment")?);
    let items = factory.load_items()?;
    let monsters = factory.load_monsters(&items)?;
    let characters = factory.load_characters(&items)?;

    let hero_template = characters
        .get(&config.hero)
        .with_context(|| format!("Unknown character '{}'", config.hero))?;
    let monster_template = monsters
        .get(&config.monster)
        .with_context(|| format!("Unknown monster '{}'", config.monster))?;

    let mut hero = hero_template.spawn(env.clone())?;
    let mut rng = PcgRng::seeded(config.seed);

    for fight in 1..=config.fights {
        let outcome = fight_once(&mut hero, monster_template, fight, &config, &env, &mut rng)?;
        match outcome {
            EncounterOutcome::Victory => rest(&mut hero),
            EncounterOutcome::Defeat => {
                warn!(fight, hero = %hero.name(), "hero fell, stopping");
                break;
            }
            EncounterOutcome::Ongoing => {
                warn!(fight, limit = config.turn_limit, "turn limit reached, stopping");
                break;
            }
        }
    }

    info!(
        hero = %hero.name(),
        level = hero.level(),
        experience = hero.experience(),
        gold = hero.gold(),
        "simulation finished"
    );
    Ok(())
}

fn fight_once(
    hero: &mut Character,
    template: &MonsterTemplate,
    guid: u32,
    config: &SimConfig,
    env: &CombatEnv,
    rng: &mut PcgRng,
) -> Result<EncounterOutcome> {
    let mut monster = Monster::from_template(template, guid, env.config)?;
    let mut encounter = Encounter::begin(hero, &mut monster);

    while !encounter.outcome().is_over() && encounter.turn() < config.turn_limit {
        let action = tactics::choose_action(encounter.character());
        let report = encounter
            .run_turn(action, rng)
            .with_context(|| format!("Turn {} failed", encounter.turn() + 1))?;
        log_turn(&report);
    }
    Ok(encounter.outcome())
}

fn log_turn(report: &TurnReport) {
    for tick in report
        .character_ticks
        .ticks
        .iter()
        .chain(&report.monster_ticks.ticks)
    {
        info!(turn = report.turn, effect = %tick.effect, damage = %tick.damage, "dot tick");
    }
    if let Some(action) = &report.action {
        info!(turn = report.turn, "{action}");
    }
    if let Some(attack) = &report.monster_attack {
        info!(turn = report.turn, "{attack}");
    }
    for buff in report.character_expired.iter().chain(&report.monster_expired) {
        info!(turn = report.turn, buff = %buff, "buff faded");
    }
    if let Some((reward, loot)) = &report.kill {
        let items: Vec<&str> = loot.items.iter().map(|item| item.name.as_str()).collect();
        info!(
            xp = reward.xp,
            new_level = ?reward.new_level,
            gold = loot.gold,
            ?items,
            "victory"
        );
    }
}

/// Back to full health and mana between fights.
fn rest(hero: &mut Character) {
    let entity = hero.entity_mut();
    let missing_health = entity.max_health() - entity.health();
    let missing_mana = entity.max_mana() - entity.mana();
    entity.heal(missing_health);
    entity.restore_mana(missing_mana);
}
