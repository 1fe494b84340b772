use arena_engine::{
    ActionFilter, Battle, BattleError, BattleStatus, Character, CharacterId, CombatRules, Dice,
};

fn battle() -> Battle {
    Battle::new(CombatRules::default(), Dice::from_seed(7))
}

fn duo() -> Battle {
    let mut b = battle();
    b.add_character(Character::mage(1, "Merlin", 80, 25)).unwrap();
    b.add_character(Character::warrior(2, "Orc", 120, 14, 5)).unwrap();
    b
}

#[test]
fn duplicate_id_is_rejected_without_change() {
    let mut b = duo();
    let err = b.add_character(Character::vampire(1, "Dracula", 110, 12)).unwrap_err();
    assert_eq!(err, BattleError::DuplicateId(CharacterId(1)));
    assert_eq!(b.len(), 2);
    assert!(b.find_by_name("Dracula").is_none());
}

#[test]
fn duplicate_name_is_rejected_without_change() {
    let mut b = duo();
    let err = b.add_character(Character::vampire(3, "Orc", 110, 12)).unwrap_err();
    assert_eq!(err, BattleError::DuplicateName("Orc".into()));
    assert_eq!(b.len(), 2);
    assert!(b.find(CharacterId(3)).is_none());
}

#[test]
fn names_are_case_sensitive() {
    let mut b = duo();
    assert!(b.add_character(Character::vampire(3, "orc", 110, 12)).is_ok());
}

#[test]
fn roster_keeps_insertion_order() {
    let mut b = battle();
    for (id, name) in [(30, "c"), (10, "a"), (20, "b")] {
        b.add_character(Character::mage(id, name, 10, 1)).unwrap();
    }
    let names: Vec<&str> = b.characters().map(|c| c.name()).collect();
    assert_eq!(names, ["c", "a", "b"]);
}

#[test]
fn bulk_add_skips_duplicates() {
    let mut b = duo();
    let added = b.add_all([
        Character::mage(1, "Clash", 10, 1),
        Character::mage(3, "Merlin", 10, 1),
        Character::archer(4, "Legolas", 90, 18, 2),
    ]);
    assert_eq!(added, 1);
    assert_eq!(b.len(), 3);
}

#[test]
fn turn_reports_missing_characters() {
    let mut b = duo();
    assert_eq!(b.turn(CharacterId(99), CharacterId(2)), Err(BattleError::NotFound(CharacterId(99))));
    assert_eq!(b.turn(CharacterId(1), CharacterId(98)), Err(BattleError::NotFound(CharacterId(98))));
}

#[test]
fn self_target_is_refused() {
    let mut b = duo();
    assert_eq!(b.turn(CharacterId(1), CharacterId(1)), Err(BattleError::SelfTarget));
    assert!(b.actions().is_empty());
    assert_eq!(b.find(CharacterId(1)).unwrap().health(), 80);
}

#[test]
fn dead_parties_cannot_fight() {
    let mut b = duo();
    b.add_character(Character::warrior(3, "Ghost", 0, 10, 1)).unwrap();

    assert_eq!(b.turn(CharacterId(3), CharacterId(2)), Err(BattleError::DeadActor("Ghost".into())));
    assert_eq!(b.turn(CharacterId(1), CharacterId(3)), Err(BattleError::DeadTarget("Ghost".into())));
    assert!(b.actions().is_empty());
    assert_eq!(b.find(CharacterId(1)).unwrap().health(), 80);
    assert_eq!(b.find(CharacterId(2)).unwrap().health(), 120);
}

#[test]
fn log_ids_increase_and_mirror_histories() {
    let mut b = duo();
    b.turn(CharacterId(1), CharacterId(2)).unwrap();
    b.turn(CharacterId(2), CharacterId(1)).unwrap();
    let last = b.turn(CharacterId(1), CharacterId(2)).unwrap();

    let ids: Vec<u64> = b.actions().iter().map(|a| a.id).collect();
    assert_eq!(ids, [1, 2, 3, 4, 5]);
    assert_eq!(last.iter().map(|a| a.id).collect::<Vec<_>>(), [4, 5]);

    let merlin = b.find(CharacterId(1)).unwrap();
    let orc = b.find(CharacterId(2)).unwrap();
    assert_eq!(merlin.history().iter().map(|a| a.id).collect::<Vec<_>>(), [1, 2, 4, 5]);
    assert_eq!(orc.history().iter().map(|a| a.id).collect::<Vec<_>>(), [3]);
    for action in b.actions() {
        let owner = b.find(action.origin_id).unwrap();
        assert!(owner.history().contains(action));
    }
}

#[test]
fn attack_filter_drops_self_inflicted_actions() {
    let mut b = duo();
    b.turn(CharacterId(1), CharacterId(2)).unwrap();
    b.turn(CharacterId(2), CharacterId(1)).unwrap();

    assert_eq!(b.filter_actions(ActionFilter::All).len(), 3);
    let attacks = b.filter_actions(ActionFilter::Attacks);
    assert_eq!(attacks.len(), 2);
    assert!(attacks.iter().all(|a| a.origin_id != a.target_id));
}

#[test]
fn removal_leaves_the_log_alone() {
    let mut b = duo();
    b.turn(CharacterId(1), CharacterId(2)).unwrap();
    let removed = b.remove_character(CharacterId(2)).unwrap();
    assert_eq!(removed.name(), "Orc");

    assert!(b.find(CharacterId(2)).is_none());
    assert_eq!(b.actions().len(), 2);
    assert_eq!(b.actions()[1].target_name, "Orc");
    assert_eq!(b.remove_character(CharacterId(2)).unwrap_err(), BattleError::NotFound(CharacterId(2)));
}

#[test]
fn winner_needs_exactly_one_survivor() {
    let mut b = battle();
    b.add_character(Character::mage(1, "Merlin", 80, 200)).unwrap();
    b.add_character(Character::warrior(2, "Orc", 50, 14, 5)).unwrap();

    assert!(b.winner().is_none());
    assert_eq!(b.living_count(), 2);
    assert_eq!(b.status(), BattleStatus::Ongoing);

    b.turn(CharacterId(1), CharacterId(2)).unwrap();
    assert_eq!(b.winner().map(|c| c.name()), Some("Merlin"));
    assert_eq!(b.living_count(), 1);
    assert_eq!(b.status(), BattleStatus::Won(CharacterId(1)));
    assert_eq!(b.len(), 2, "the fallen stay on the roster");
}

#[test]
fn mutual_annihilation_is_a_draw() {
    let mut b = battle();
    b.add_character(Character::mage(1, "Martyr", 5, 50)).unwrap();
    b.add_character(Character::archer(2, "Bow", 10, 5, 2)).unwrap();

    b.turn(CharacterId(1), CharacterId(2)).unwrap();
    assert!(b.winner().is_none());
    assert_eq!(b.living_count(), 0);
    assert_eq!(b.status(), BattleStatus::Draw);
}

#[test]
fn empty_battle_has_no_winner() {
    let b = battle();
    assert!(b.winner().is_none());
    assert_eq!(b.living_count(), 0);
    assert!(b.mvp().is_none());
}

#[test]
fn mvp_is_the_heaviest_hitter() {
    let mut b = duo();
    b.turn(CharacterId(2), CharacterId(1)).unwrap();
    assert_eq!(b.mvp().map(|c| c.name()), Some("Orc"));
    b.turn(CharacterId(1), CharacterId(2)).unwrap();
    assert_eq!(b.mvp().map(|c| c.name()), Some("Merlin"));
}
