//! Turn resolution for every class.
//!
//! Resolution never touches the roster. It works on copies of both
//! combatants' [`Vitals`] and hands back the new values together with the
//! actions produced, so a failed attack leaves nothing half-applied.

pub mod actions;

use crate::action::Action;
use crate::character::{Character, Class, Vitals};
use crate::error::BattleError;
use crate::rules::CombatRules;
use crate::Dice;

/// What one attack did to both parties.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub attacker: Vitals,
    pub defender: Vitals,
    /// In the order they happened. Ids are still zero.
    pub actions: Vec<Action>,
}

/// Scratch state for a single attack.
pub(crate) struct Exchange<'a> {
    pub(crate) attacker: &'a Character,
    pub(crate) defender: &'a Character,
    pub(crate) own: Vitals,
    pub(crate) foe: Vitals,
    pub(crate) actions: Vec<Action>,
}

impl<'a> Exchange<'a> {
    fn new(attacker: &'a Character, defender: &'a Character) -> Self {
        Self {
            attacker,
            defender,
            own: attacker.vitals(),
            foe: defender.vitals(),
            actions: Vec::new(),
        }
    }

    /// Hit the defender. The attacker's counter records `amount` before mitigation.
    pub(crate) fn strike(
        &mut self,
        amount: i32,
        ignore_defense: bool,
        description: impl Into<String>,
    ) -> Result<i32, BattleError> {
        let net = self
            .defender
            .class()
            .mitigate(self.defender.name(), amount, ignore_defense)?;
        self.foe.apply_damage(net);
        self.own.record_dealt(amount);
        self.actions
            .push(Action::new(self.attacker, self.defender, description, amount));
        Ok(net)
    }

    /// Self-inflicted cost. Bypasses class mitigation.
    pub(crate) fn pay(&mut self, amount: i32, description: impl Into<String>) {
        self.own.apply_damage(amount);
        self.actions
            .push(Action::new(self.attacker, self.attacker, description, amount));
    }

    fn finish(self) -> Resolution {
        Resolution { attacker: self.own, defender: self.foe, actions: self.actions }
    }
}

/// Resolve `attacker` hitting `defender` according to the attacker's class.
///
/// Liveness and identity checks belong to the caller. A defender that
/// refuses every attack is rejected before any dice are rolled.
pub fn resolve(
    attacker: &Character,
    defender: &Character,
    rules: &CombatRules,
    dice: &mut Dice,
) -> Result<Resolution, BattleError> {
    defender.class().admit_attack(defender.name())?;
    let mut ex = Exchange::new(attacker, defender);
    match attacker.class() {
        Class::Warrior { .. } => actions::warrior(&mut ex, rules)?,
        Class::Mage => actions::mage(&mut ex, rules)?,
        Class::Archer { multiplier } => actions::archer(&mut ex, multiplier, rules, dice)?,
        Class::Vampire => actions::vampire(&mut ex, rules)?,
        Class::Eternal => actions::eternal(&mut ex)?,
    }
    Ok(ex.finish())
}
