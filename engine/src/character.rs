use std::fmt;

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::error::BattleError;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CharacterId(pub u32);

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for CharacterId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// The closed set of fighting styles. Secondary stats live on the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Class {
    /// Flat damage reduction on every hit that does not ignore defense.
    Warrior { defense: i32 },
    Mage,
    /// Damage multiplier applied on a successful coin flip.
    Archer { multiplier: i32 },
    Vampire,
    /// Cannot be damaged at all.
    Eternal,
}

impl Class {
    pub const TAGS: [&'static str; 5] = ["Warrior", "Mage", "Archer", "Vampire", "Eternal"];

    pub fn tag(&self) -> &'static str {
        match self {
            Class::Warrior { .. } => "Warrior",
            Class::Mage => "Mage",
            Class::Archer { .. } => "Archer",
            Class::Vampire => "Vampire",
            Class::Eternal => "Eternal",
        }
    }

    fn clamped(self) -> Self {
        match self {
            Class::Warrior { defense } => Class::Warrior { defense: defense.max(1) },
            Class::Archer { multiplier } => Class::Archer { multiplier: multiplier.max(1) },
            other => other,
        }
    }

    /// Whether `name`, of this class, can be attacked at all.
    pub fn admit_attack(&self, name: &str) -> Result<(), BattleError> {
        match self {
            Class::Eternal => Err(BattleError::AttackNotAllowed(name.to_string())),
            _ => Ok(()),
        }
    }

    /// Net damage this class takes from a hit of `amount`.
    pub fn mitigate(
        &self,
        name: &str,
        amount: i32,
        ignore_defense: bool,
    ) -> Result<i32, BattleError> {
        self.admit_attack(name)?;
        let amount = amount.max(0);
        match self {
            Class::Warrior { defense } if !ignore_defense => Ok((amount - defense).max(0)),
            _ => Ok(amount),
        }
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// The mutable combat state of a character.
///
/// `health` stays within `0..=max_health`; the damage counters only grow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Vitals {
    pub health: i32,
    pub max_health: i32,
    pub damage_dealt: i64,
    pub damage_taken: i64,
}

impl Vitals {
    pub fn new(health: i32) -> Self {
        let health = health.max(0);
        Self { health, max_health: health, damage_dealt: 0, damage_taken: 0 }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Take already-mitigated damage. The counter records the full amount even past zero health.
    pub fn apply_damage(&mut self, amount: i32) {
        let amount = amount.max(0);
        self.health = (self.health - amount).max(0);
        self.damage_taken += i64::from(amount);
    }

    /// Returns how much health was actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        if amount <= 0 {
            return 0;
        }
        let restored = (self.max_health - self.health).clamp(0, amount);
        self.health += restored;
        restored
    }

    pub fn record_dealt(&mut self, amount: i32) {
        self.damage_dealt += i64::from(amount.max(0));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    id: CharacterId,
    name: String,
    attack_power: i32,
    class: Class,
    vitals: Vitals,
    history: Vec<Action>,
}

impl Character {
    /// Build a character, clamping health to at least 0 and attack power and
    /// any class stat to at least 1. Max health is fixed to the starting health.
    pub fn new(
        id: impl Into<CharacterId>,
        name: impl Into<String>,
        health: i32,
        attack_power: i32,
        class: Class,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            attack_power: attack_power.max(1),
            class: class.clamped(),
            vitals: Vitals::new(health),
            history: Vec::new(),
        }
    }

    pub fn warrior(
        id: impl Into<CharacterId>,
        name: impl Into<String>,
        health: i32,
        attack_power: i32,
        defense: i32,
    ) -> Self {
        Self::new(id, name, health, attack_power, Class::Warrior { defense })
    }

    pub fn mage(id: impl Into<CharacterId>, name: impl Into<String>, health: i32, attack_power: i32) -> Self {
        Self::new(id, name, health, attack_power, Class::Mage)
    }

    pub fn archer(
        id: impl Into<CharacterId>,
        name: impl Into<String>,
        health: i32,
        attack_power: i32,
        multiplier: i32,
    ) -> Self {
        Self::new(id, name, health, attack_power, Class::Archer { multiplier })
    }

    pub fn vampire(id: impl Into<CharacterId>, name: impl Into<String>, health: i32, attack_power: i32) -> Self {
        Self::new(id, name, health, attack_power, Class::Vampire)
    }

    pub fn eternal(id: impl Into<CharacterId>, name: impl Into<String>, health: i32, attack_power: i32) -> Self {
        Self::new(id, name, health, attack_power, Class::Eternal)
    }

    /// Same character under a different id. Only meaningful before it joins a battle.
    pub fn with_id(mut self, id: impl Into<CharacterId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn id(&self) -> CharacterId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn health(&self) -> i32 {
        self.vitals.health
    }

    pub fn max_health(&self) -> i32 {
        self.vitals.max_health
    }

    pub fn attack_power(&self) -> i32 {
        self.attack_power
    }

    pub fn class(&self) -> Class {
        self.class
    }

    pub fn class_tag(&self) -> &'static str {
        self.class.tag()
    }

    pub fn is_alive(&self) -> bool {
        self.vitals.is_alive()
    }

    pub fn vitals(&self) -> Vitals {
        self.vitals
    }

    pub fn damage_dealt(&self) -> i64 {
        self.vitals.damage_dealt
    }

    pub fn damage_taken(&self) -> i64 {
        self.vitals.damage_taken
    }

    /// Actions this character originated, in log order.
    pub fn history(&self) -> &[Action] {
        &self.history
    }

    /// Take a hit, applying class mitigation unless `ignore_defense`.
    /// Returns the net damage applied.
    pub fn receive_damage(&mut self, amount: i32, ignore_defense: bool) -> Result<i32, BattleError> {
        let net = self.class.mitigate(&self.name, amount, ignore_defense)?;
        self.vitals.apply_damage(net);
        Ok(net)
    }

    pub fn heal(&mut self, amount: i32) -> i32 {
        self.vitals.heal(amount)
    }

    pub(crate) fn commit(&mut self, vitals: Vitals) {
        self.vitals = vitals;
    }

    pub(crate) fn record(&mut self, action: Action) {
        self.history.push(action);
    }
}
