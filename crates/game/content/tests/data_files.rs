use std::path::PathBuf;
use std::sync::Arc;

use combat_content::ContentFactory;
use combat_core::{
    CharacterClass, CombatAction, Combatant, Encounter, EquipmentSlot, Monster, PcgRng,
};

fn factory() -> ContentFactory {
    let data_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../../data");
    ContentFactory::new(data_dir)
}

#[test]
fn shipped_content_loads() {
    let factory = factory();
    let env = factory.load_env().unwrap();
    assert_eq!(env.progression.max_level(), 10);
    assert_eq!(env.progression.xp_required(1), Some(400));
    assert!(!env.spells.available(CharacterClass::Paladin, 1).is_empty());

    let items = factory.load_items().unwrap();
    let monsters = factory.load_monsters(&items).unwrap();
    assert!(monsters.contains_key("gnoll_scout"));
    assert!(!monsters["hogger"].respawnable);

    let characters = factory.load_characters(&items).unwrap();
    let recruit = characters["recruit"].spawn(Arc::new(env)).unwrap();
    assert!(
        recruit
            .entity()
            .equipment()
            .get(EquipmentSlot::MainHand)
            .is_some()
    );
    assert_eq!(recruit.inventory().count("Elixir of Giants"), 2);
}

#[test]
fn recruit_beats_a_kobold() {
    let factory = factory();
    let env = Arc::new(factory.load_env().unwrap());
    let items = factory.load_items().unwrap();
    let monsters = factory.load_monsters(&items).unwrap();
    let characters = factory.load_characters(&items).unwrap();

    let mut hero = characters["recruit"].spawn(env.clone()).unwrap();
    let mut kobold = Monster::from_template(&monsters["kobold_miner"], 1, env.config).unwrap();
    let mut rng = PcgRng::seeded(7);

    let mut encounter = Encounter::begin(&mut hero, &mut kobold);
    while !encounter.outcome().is_over() {
        assert!(encounter.turn() < 50, "duel did not finish");
        encounter.run_turn(CombatAction::Attack, &mut rng).unwrap();
    }
    drop(encounter);

    assert!(hero.is_alive());
    assert_eq!(hero.experience(), 90);
    assert!(hero.gold() >= 2);
}
