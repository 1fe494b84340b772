use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Rage bonus a badly hurt Warrior applies to its strike.
pub const RAGE_MULTIPLIER: f64 = 1.5;
/// Rage bonus used by the older ruleset.
pub const LEGACY_RAGE_MULTIPLIER: f64 = 1.3;
/// Health a Mage pays before every spell.
pub const MANA_COST: i32 = 5;
/// Spell cost used by the older ruleset.
pub const LEGACY_MANA_COST: i32 = 10;

pub const RAGE_THRESHOLD: f64 = 0.3;
pub const SUNLIGHT_BURN: i32 = 5;
pub const LIFESTEAL_RATIO: f64 = 0.5;
pub const ARCHER_CRIT_CHANCE: f64 = 0.5;

/// Tunable numbers of the combat formulas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct CombatRules {
    pub rage_multiplier: f64,
    /// Rage triggers while health is strictly below this fraction of max health.
    pub rage_threshold: f64,
    pub mana_cost: i32,
    pub sunlight_burn: i32,
    pub lifesteal_ratio: f64,
    pub archer_crit_chance: f64,
}

impl Default for CombatRules {
    fn default() -> Self {
        Self {
            rage_multiplier: RAGE_MULTIPLIER,
            rage_threshold: RAGE_THRESHOLD,
            mana_cost: MANA_COST,
            sunlight_burn: SUNLIGHT_BURN,
            lifesteal_ratio: LIFESTEAL_RATIO,
            archer_crit_chance: ARCHER_CRIT_CHANCE,
        }
    }
}

impl CombatRules {
    /// The older ruleset: weaker rage, pricier spells.
    pub fn legacy() -> Self {
        Self {
            rage_multiplier: LEGACY_RAGE_MULTIPLIER,
            mana_cost: LEGACY_MANA_COST,
            ..Self::default()
        }
    }

    /// Load rules from YAML (`.yaml`/`.yml`) or JSON. Missing fields keep their defaults.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read rules file: {}", path.display()))?;
        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        );
        let rules = if is_yaml {
            serde_yaml::from_str(&text)
                .with_context(|| format!("failed to parse rules YAML: {}", path.display()))?
        } else {
            serde_json::from_str(&text)
                .with_context(|| format!("failed to parse rules JSON: {}", path.display()))?
        };
        Ok(rules)
    }
}
