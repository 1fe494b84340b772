use crate::character::Class;
use crate::combat::Exchange;
use crate::error::BattleError;
use crate::rules::CombatRules;
use crate::Dice;

/// Scale a non-negative base by a multiplier, truncating the fraction.
fn scaled(base: i32, multiplier: f64) -> i32 {
    (f64::from(base) * multiplier).floor().max(0.0) as i32
}

pub(crate) fn warrior(ex: &mut Exchange<'_>, rules: &CombatRules) -> Result<(), BattleError> {
    let mut damage = ex.attacker.attack_power();
    let mut description = String::from("Sword Strike");

    if f64::from(ex.own.health) < f64::from(ex.own.max_health) * rules.rage_threshold {
        damage = scaled(damage, rules.rage_multiplier);
        let bonus = ((rules.rage_multiplier - 1.0) * 100.0).round() as i64;
        description.push_str(&format!(" (Rage {:+}%)", bonus));
        tracing::debug!(attacker = ex.attacker.name(), damage, "warrior rage");
    }

    ex.strike(damage, false, description)?;
    Ok(())
}

/// The spell cost is paid first, even when it is fatal.
pub(crate) fn mage(ex: &mut Exchange<'_>, rules: &CombatRules) -> Result<(), BattleError> {
    ex.pay(rules.mana_cost, "Mana Cost");

    let mut damage = ex.attacker.attack_power();
    let mut description = String::from("Spell");
    if matches!(ex.defender.class(), Class::Archer { .. }) {
        damage = damage.saturating_mul(2);
        description.push_str(" (Critical vs Archer)");
    }

    ex.strike(damage, true, description)?;
    Ok(())
}

pub(crate) fn archer(
    ex: &mut Exchange<'_>,
    multiplier: i32,
    rules: &CombatRules,
    dice: &mut Dice,
) -> Result<(), BattleError> {
    let mut damage = ex.attacker.attack_power();
    let mut description = String::from("Shot");
    if dice.chance(rules.archer_crit_chance) {
        damage = damage.saturating_mul(multiplier);
        description.push_str(&format!(" (Critical x{})", multiplier));
    }

    ex.strike(damage, false, description)?;
    Ok(())
}

/// Sunlight burns first; a vampire it kills never bites.
pub(crate) fn vampire(ex: &mut Exchange<'_>, rules: &CombatRules) -> Result<(), BattleError> {
    ex.pay(rules.sunlight_burn, "Sunlight Burn");
    if !ex.own.is_alive() {
        return Ok(());
    }

    let damage = ex.attacker.attack_power();
    let drain = scaled(damage, rules.lifesteal_ratio);
    ex.strike(damage, false, format!("Bite (Healed {})", drain))?;
    ex.own.heal(drain);
    Ok(())
}

pub(crate) fn eternal(ex: &mut Exchange<'_>) -> Result<(), BattleError> {
    let damage = ex.attacker.attack_power();
    ex.strike(damage, false, "Eternal Strike")?;
    Ok(())
}
