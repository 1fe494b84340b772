use arena_engine::api::Enlistment;
use arena_engine::{Action, Battle, BattleStatus, Character, Class};

pub fn character_line(c: &Character) -> String {
    let mut line = format!(
        "[{}] {} ({}) | HP {}/{} | ATK {} | dealt {}",
        c.id(),
        c.name(),
        c.class_tag(),
        c.health(),
        c.max_health(),
        c.attack_power(),
        c.damage_dealt()
    );
    match c.class() {
        Class::Warrior { defense } => line.push_str(&format!(" | DEF {}", defense)),
        Class::Archer { multiplier } => line.push_str(&format!(" | x{}", multiplier)),
        _ => {}
    }
    line
}

/// Living sorted by health, highest first, then the graveyard.
pub fn arena_listing(battle: &Battle) -> Vec<String> {
    if battle.is_empty() {
        return vec!["Nobody in the arena.".to_string()];
    }
    let mut living: Vec<&Character> = battle.living().collect();
    living.sort_by(|a, b| b.health().cmp(&a.health()));
    let dead: Vec<&Character> = battle.characters().filter(|c| !c.is_alive()).collect();

    let mut lines = vec![format!(
        "-- ARENA STATUS ({} alive / {} dead) --",
        living.len(),
        dead.len()
    )];
    lines.extend(living.into_iter().map(character_line));
    if !dead.is_empty() {
        lines.push("-- GRAVEYARD --".to_string());
        lines.extend(
            dead.into_iter()
                .map(|c| format!("{} ({}) - fallen", c.name(), c.class_tag())),
        );
    }
    lines
}

pub fn stats_lines(battle: &Battle) -> Vec<String> {
    let mvp = battle.mvp();
    let mut lines = vec![format!(
        "MVP (most damage): {} ({})",
        mvp.map(|c| c.name()).unwrap_or("nobody"),
        mvp.map(|c| c.damage_dealt()).unwrap_or(0)
    )];
    lines.extend(battle.characters().map(|c| {
        format!("- {}: dealt {} | taken {}", c.name(), c.damage_dealt(), c.damage_taken())
    }));
    lines
}

/// Announcement once the fight is decided.
pub fn verdict_line(battle: &Battle) -> Option<String> {
    match battle.status() {
        BattleStatus::Ongoing => None,
        BattleStatus::Draw => Some("GAME OVER: every fighter has fallen. It's a draw.".to_string()),
        BattleStatus::Won(id) => battle.find(id).map(|w| {
            format!("THE BATTLE IS OVER! The winner is {} ({})", w.name(), w.class_tag())
        }),
    }
}

pub fn replay_line(index: usize, action: &Action) -> String {
    format!(
        "Turn {}: {} uses {} on {} ({})",
        index + 1,
        action.origin_name,
        action.description,
        action.target_name,
        action.damage
    )
}

/// The action worth headlining for a turn: the last hit on someone else.
pub fn headline(actions: &[Action]) -> Option<&Action> {
    actions
        .iter()
        .rev()
        .find(|a| !a.is_self_inflicted())
        .or_else(|| actions.first())
}

pub fn enlistment_line(e: &Enlistment) -> String {
    match e {
        Enlistment::Joined { id, name } => format!("[ID: {}] {} entered the arena.", id, name),
        Enlistment::NameTaken { name } => format!("{} already exists. Skipped.", name),
        Enlistment::IdCollision { name } => format!("Duplicate id drawn for {}.", name),
    }
}
