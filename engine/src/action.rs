use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::character::{Character, CharacterId};

/// One damage or self-effect event.
///
/// Origin and target are kept as ids for lookups against the live roster and
/// as name snapshots for display. Serialization emits names only, so a
/// serialized action cannot be resolved back to a character.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    /// Position in the battle log, starting at 1. Zero until the battle records it.
    pub id: u64,
    #[serde(skip)]
    pub origin_id: CharacterId,
    #[serde(skip)]
    pub target_id: CharacterId,
    #[serde(rename = "origin")]
    pub origin_name: String,
    #[serde(rename = "target")]
    pub target_name: String,
    pub description: String,
    #[serde(rename = "damageValue")]
    pub damage: i32,
    pub timestamp: DateTime<Utc>,
}

impl Action {
    pub(crate) fn new(
        origin: &Character,
        target: &Character,
        description: impl Into<String>,
        damage: i32,
    ) -> Self {
        Self {
            id: 0,
            origin_id: origin.id(),
            target_id: target.id(),
            origin_name: origin.name().to_string(),
            target_name: target.name().to_string(),
            description: description.into(),
            damage,
            timestamp: Utc::now(),
        }
    }

    /// Mana cost, sunlight burn and the like: the actor hit itself.
    pub fn is_self_inflicted(&self) -> bool {
        self.origin_id == self.target_id
    }
}

/// Which slice of the battle log to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionFilter {
    /// Only actions aimed at another character.
    Attacks,
    #[default]
    All,
}

impl ActionFilter {
    pub fn admits(self, action: &Action) -> bool {
        match self {
            ActionFilter::Attacks => !action.is_self_inflicted(),
            ActionFilter::All => true,
        }
    }
}
