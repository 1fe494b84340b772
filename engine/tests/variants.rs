use arena_engine::rules::{LEGACY_MANA_COST, LEGACY_RAGE_MULTIPLIER, MANA_COST, RAGE_MULTIPLIER};
use arena_engine::{Battle, BattleError, Character, CharacterId, CombatRules, Dice};

fn arena(rules: CombatRules, dice: Dice, fighters: Vec<Character>) -> Battle {
    let mut battle = Battle::new(rules, dice);
    for f in fighters {
        battle.add_character(f).unwrap();
    }
    battle
}

fn hp(battle: &Battle, id: u32) -> i32 {
    battle.find(CharacterId(id)).unwrap().health()
}

fn dealt(battle: &Battle, id: u32) -> i64 {
    battle.find(CharacterId(id)).unwrap().damage_dealt()
}

#[test]
fn enraged_warrior_scales_damage_for_each_ruleset() {
    for (multiplier, expected) in [(RAGE_MULTIPLIER, 15), (LEGACY_RAGE_MULTIPLIER, 13)] {
        let rules = CombatRules { rage_multiplier: multiplier, ..CombatRules::default() };
        let mut grom = Character::warrior(1, "Grom", 100, 10, 1);
        grom.receive_damage(80, true).unwrap();
        let mut battle = arena(rules, Dice::from_seed(1), vec![grom, Character::mage(2, "Target", 100, 5)]);

        let actions = battle.turn(CharacterId(1), CharacterId(2)).unwrap();
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].damage, expected);
        assert_eq!(hp(&battle, 2), 100 - expected);
        assert_eq!(dealt(&battle, 1), i64::from(expected));
    }
}

#[test]
fn rage_is_flagged_in_the_description() {
    let mut grom = Character::warrior(1, "Grom", 100, 10, 1);
    grom.receive_damage(80, true).unwrap();
    let mut battle = arena(
        CombatRules::default(),
        Dice::from_seed(1),
        vec![grom, Character::mage(2, "Target", 100, 5)],
    );
    let actions = battle.turn(CharacterId(1), CharacterId(2)).unwrap();
    insta::assert_snapshot!(actions[0].description, @"Sword Strike (Rage +50%)");
}

#[test]
fn no_rage_at_exactly_thirty_percent() {
    let mut grom = Character::warrior(1, "Grom", 100, 10, 1);
    grom.receive_damage(70, true).unwrap();
    let mut battle = arena(
        CombatRules::default(),
        Dice::from_seed(1),
        vec![grom, Character::mage(2, "Target", 100, 5)],
    );
    let actions = battle.turn(CharacterId(1), CharacterId(2)).unwrap();
    assert_eq!(actions[0].damage, 10);
    assert_eq!(actions[0].description, "Sword Strike");
}

#[test]
fn warrior_counter_tracks_damage_before_defense() {
    let mut battle = arena(
        CombatRules::default(),
        Dice::from_seed(1),
        vec![
            Character::warrior(1, "Axe", 100, 12, 1),
            Character::warrior(2, "Shield", 100, 10, 5),
        ],
    );
    let actions = battle.turn(CharacterId(1), CharacterId(2)).unwrap();
    assert_eq!(actions[0].damage, 12);
    assert_eq!(hp(&battle, 2), 93);
    assert_eq!(dealt(&battle, 1), 12);
    assert_eq!(battle.find(CharacterId(2)).unwrap().damage_taken(), 7);
}

#[test]
fn mage_pays_mana_then_ignores_defense_for_each_ruleset() {
    for cost in [MANA_COST, LEGACY_MANA_COST] {
        let rules = CombatRules { mana_cost: cost, ..CombatRules::default() };
        let mut battle = arena(
            rules,
            Dice::from_seed(1),
            vec![Character::mage(1, "Merlin", 80, 25), Character::warrior(2, "Orc", 120, 14, 5)],
        );

        let actions = battle.turn(CharacterId(1), CharacterId(2)).unwrap();
        assert_eq!(actions.len(), 2);
        assert!(actions[0].is_self_inflicted());
        assert_eq!(actions[0].description, "Mana Cost");
        assert_eq!(actions[0].damage, cost);
        assert_eq!(actions[1].description, "Spell");
        assert_eq!(actions[1].damage, 25);

        assert_eq!(hp(&battle, 1), 80 - cost);
        assert_eq!(hp(&battle, 2), 95);
        assert_eq!(dealt(&battle, 1), 25);
        assert_eq!(battle.find(CharacterId(1)).unwrap().damage_taken(), i64::from(cost));
    }
}

#[test]
fn mage_doubles_against_archers() {
    let mut battle = arena(
        CombatRules::default(),
        Dice::from_seed(1),
        vec![Character::mage(1, "Merlin", 80, 25), Character::archer(2, "Legolas", 90, 18, 2)],
    );
    let actions = battle.turn(CharacterId(1), CharacterId(2)).unwrap();
    insta::assert_snapshot!(actions[1].description, @"Spell (Critical vs Archer)");
    assert_eq!(actions[1].damage, 50);
    assert_eq!(hp(&battle, 2), 40);
}

#[test]
fn mage_still_casts_when_the_cost_kills_it() {
    let mut battle = arena(
        CombatRules::default(),
        Dice::from_seed(1),
        vec![Character::mage(1, "Frail", 5, 25), Character::vampire(2, "Count", 60, 8)],
    );
    let actions = battle.turn(CharacterId(1), CharacterId(2)).unwrap();
    assert_eq!(actions.len(), 2);
    assert!(!battle.find(CharacterId(1)).unwrap().is_alive());
    assert_eq!(hp(&battle, 2), 35);
}

#[test]
fn archer_crit_depends_on_the_coin() {
    for (coin, expected, label) in [(1, 36, "Shot (Critical x2)"), (0, 18, "Shot")] {
        let mut battle = arena(
            CombatRules::default(),
            Dice::from_scripted(vec![coin]),
            vec![Character::archer(1, "Legolas", 90, 18, 2), Character::warrior(2, "Orc", 120, 14, 5)],
        );
        let actions = battle.turn(CharacterId(1), CharacterId(2)).unwrap();
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].damage, expected);
        assert_eq!(actions[0].description, label);
        assert_eq!(hp(&battle, 2), 120 - (expected - 5));
        assert_eq!(dealt(&battle, 1), i64::from(expected));
    }
}

#[test]
fn vampire_burns_bites_and_heals() {
    let mut count = Character::vampire(1, "Dracula", 110, 20);
    count.receive_damage(50, true).unwrap();
    let mut battle = arena(
        CombatRules::default(),
        Dice::from_seed(1),
        vec![count, Character::mage(2, "Prey", 100, 5)],
    );

    let actions = battle.turn(CharacterId(1), CharacterId(2)).unwrap();
    assert_eq!(actions.len(), 2);
    assert_eq!(actions[0].description, "Sunlight Burn");
    assert_eq!(actions[0].damage, 5);
    assert!(actions[0].is_self_inflicted());
    insta::assert_snapshot!(actions[1].description, @"Bite (Healed 10)");
    assert_eq!(actions[1].damage, 20);

    assert_eq!(hp(&battle, 1), 60 - 5 + 10);
    assert_eq!(hp(&battle, 2), 80);
    assert_eq!(dealt(&battle, 1), 20);
}

#[test]
fn vampire_heal_is_capped() {
    let mut battle = arena(
        CombatRules::default(),
        Dice::from_seed(1),
        vec![Character::vampire(1, "Dracula", 110, 20), Character::mage(2, "Prey", 100, 5)],
    );
    battle.turn(CharacterId(1), CharacterId(2)).unwrap();
    assert_eq!(hp(&battle, 1), 110);
}

#[test]
fn sunlight_can_end_a_vampire_before_it_bites() {
    let mut battle = arena(
        CombatRules::default(),
        Dice::from_seed(1),
        vec![Character::vampire(1, "Nosferatu", 5, 20), Character::mage(2, "Prey", 100, 5)],
    );
    let actions = battle.turn(CharacterId(1), CharacterId(2)).unwrap();
    assert_eq!(actions.len(), 1);
    assert!(actions[0].is_self_inflicted());
    assert_eq!(hp(&battle, 1), 0);
    assert_eq!(hp(&battle, 2), 100);
    assert_eq!(dealt(&battle, 1), 0);
}

#[test]
fn eternal_strikes_plainly() {
    let mut battle = arena(
        CombatRules::default(),
        Dice::from_seed(1),
        vec![Character::eternal(1, "Aion", 100, 10), Character::warrior(2, "Orc", 120, 14, 5)],
    );
    let actions = battle.turn(CharacterId(1), CharacterId(2)).unwrap();
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].description, "Eternal Strike");
    assert_eq!(hp(&battle, 2), 115);
    assert_eq!(hp(&battle, 1), 100);
}

#[test]
fn hitting_an_eternal_changes_nothing() {
    let mut battle = arena(
        CombatRules::default(),
        Dice::from_seed(1),
        vec![
            Character::mage(1, "Merlin", 80, 25),
            Character::eternal(2, "Aion", 100, 10),
            Character::eternal(3, "Chronos", 100, 10),
        ],
    );

    let err = battle.turn(CharacterId(1), CharacterId(2)).unwrap_err();
    assert_eq!(err, BattleError::AttackNotAllowed("Aion".into()));
    assert_eq!(hp(&battle, 1), 80, "mana is not spent on a refused spell");
    assert!(battle.actions().is_empty());
    assert!(battle.find(CharacterId(1)).unwrap().history().is_empty());

    let err = battle.turn(CharacterId(3), CharacterId(2)).unwrap_err();
    assert!(matches!(err, BattleError::AttackNotAllowed(_)));
    assert_eq!(hp(&battle, 2), 100);
}

#[test]
fn doubled_spell_saturates_at_the_top_of_the_range() {
    let mut battle = arena(
        CombatRules::default(),
        Dice::from_seed(1),
        vec![
            Character::mage(1, "Archmage", 100, 1_500_000_000),
            Character::archer(2, "Legolas", 90, 18, 2),
        ],
    );
    let actions = battle.turn(CharacterId(1), CharacterId(2)).unwrap();
    assert_eq!(actions[1].damage, i32::MAX);
    assert_eq!(hp(&battle, 2), 0);
    assert_eq!(dealt(&battle, 1), i64::from(i32::MAX));
}

#[test]
fn huge_vampire_heals_without_overflow() {
    let mut battle = arena(
        CombatRules::default(),
        Dice::from_seed(1),
        vec![
            Character::vampire(1, "Elder", 2_000_000_000, 2_000_000_000),
            Character::mage(2, "Merlin", 80, 25),
        ],
    );
    battle.turn(CharacterId(1), CharacterId(2)).unwrap();
    assert_eq!(hp(&battle, 1), 2_000_000_000);
    assert_eq!(hp(&battle, 2), 0);
}

#[test]
fn refused_shot_leaves_the_dice_untouched() {
    let mut battle = arena(
        CombatRules::default(),
        Dice::from_scripted(vec![1, 0]),
        vec![
            Character::archer(1, "Legolas", 90, 18, 2),
            Character::eternal(2, "Aion", 100, 10),
            Character::warrior(3, "Orc", 120, 14, 5),
        ],
    );
    assert!(battle.turn(CharacterId(1), CharacterId(2)).is_err());

    let actions = battle.turn(CharacterId(1), CharacterId(3)).unwrap();
    assert_eq!(actions[0].description, "Shot (Critical x2)");
    assert_eq!(hp(&battle, 3), 120 - (36 - 5));
}
