use indexmap::IndexMap;

use crate::action::{Action, ActionFilter};
use crate::character::{Character, CharacterId};
use crate::combat;
use crate::error::BattleError;
use crate::rules::CombatRules;
use crate::Dice;

/// Where a fight stands, as opposed to [`Battle::winner`] which cannot tell
/// an unfinished fight from a wipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleStatus {
    /// Two or more still standing.
    Ongoing,
    Won(CharacterId),
    /// Nobody left alive.
    Draw,
}

/// Owns the roster and the battle-wide action log.
///
/// Ids and names are unique across the roster. Dead characters stay in the
/// roster until explicitly removed. Log ids run 1, 2, 3... and every logged
/// action is also in its attacker's history.
pub struct Battle {
    roster: IndexMap<CharacterId, Character>,
    log: Vec<Action>,
    rules: CombatRules,
    dice: Dice,
}

impl Default for Battle {
    fn default() -> Self {
        Self::new(CombatRules::default(), Dice::from_entropy())
    }
}

impl Battle {
    pub fn new(rules: CombatRules, dice: Dice) -> Self {
        Self { roster: IndexMap::new(), log: Vec::new(), rules, dice }
    }

    pub fn rules(&self) -> &CombatRules {
        &self.rules
    }

    /// The battle's random source, shared by class rolls and the shell's target picks.
    pub fn dice(&mut self) -> &mut Dice {
        &mut self.dice
    }

    pub fn add_character(&mut self, character: Character) -> Result<(), BattleError> {
        if self.roster.contains_key(&character.id()) {
            return Err(BattleError::DuplicateId(character.id()));
        }
        if self.roster.values().any(|c| c.name() == character.name()) {
            return Err(BattleError::DuplicateName(character.name().to_string()));
        }
        self.roster.insert(character.id(), character);
        Ok(())
    }

    /// Add each character, skipping duplicates. Returns how many were accepted.
    pub fn add_all(&mut self, characters: impl IntoIterator<Item = Character>) -> usize {
        let mut added = 0;
        for character in characters {
            match self.add_character(character) {
                Ok(()) => added += 1,
                Err(err) => tracing::debug!(%err, "skipping character during bulk add"),
            }
        }
        added
    }

    pub fn find(&self, id: CharacterId) -> Option<&Character> {
        self.roster.get(&id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Character> {
        self.roster.values().find(|c| c.name() == name)
    }

    /// Every character in insertion order, dead or alive.
    pub fn characters(&self) -> impl Iterator<Item = &Character> {
        self.roster.values()
    }

    pub fn len(&self) -> usize {
        self.roster.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roster.is_empty()
    }

    pub fn living(&self) -> impl Iterator<Item = &Character> {
        self.roster.values().filter(|c| c.is_alive())
    }

    pub fn living_count(&self) -> usize {
        self.living().count()
    }

    pub fn actions(&self) -> &[Action] {
        &self.log
    }

    pub fn filter_actions(&self, filter: ActionFilter) -> Vec<&Action> {
        self.log.iter().filter(|a| filter.admits(a)).collect()
    }

    /// Resolve one attack of `attacker` on `defender`.
    ///
    /// Returns the actions produced, already numbered and logged. On error
    /// nothing changes: not the roster, not the log.
    pub fn turn(
        &mut self,
        attacker: CharacterId,
        defender: CharacterId,
    ) -> Result<Vec<Action>, BattleError> {
        let atk = self.roster.get(&attacker).ok_or(BattleError::NotFound(attacker))?;
        let def = self.roster.get(&defender).ok_or(BattleError::NotFound(defender))?;
        if attacker == defender {
            return Err(BattleError::SelfTarget);
        }
        if !atk.is_alive() {
            return Err(BattleError::DeadActor(atk.name().to_string()));
        }
        if !def.is_alive() {
            return Err(BattleError::DeadTarget(def.name().to_string()));
        }

        let resolution = combat::resolve(atk, def, &self.rules, &mut self.dice)?;
        tracing::debug!(
            attacker = atk.name(),
            defender = def.name(),
            actions = resolution.actions.len(),
            "turn resolved"
        );

        if let Some(d) = self.roster.get_mut(&defender) {
            d.commit(resolution.defender);
        }
        let mut produced = Vec::with_capacity(resolution.actions.len());
        if let Some(a) = self.roster.get_mut(&attacker) {
            a.commit(resolution.attacker);
            for mut action in resolution.actions {
                action.id = self.log.len() as u64 + 1;
                a.record(action.clone());
                self.log.push(action.clone());
                produced.push(action);
            }
        }
        Ok(produced)
    }

    /// Remove a character. Log entries that mention it are left as they are.
    pub fn remove_character(&mut self, id: CharacterId) -> Result<Character, BattleError> {
        self.roster.shift_remove(&id).ok_or(BattleError::NotFound(id))
    }

    /// The sole survivor, if exactly one character is alive.
    pub fn winner(&self) -> Option<&Character> {
        let mut living = self.living();
        match (living.next(), living.next()) {
            (Some(only), None) => Some(only),
            _ => None,
        }
    }

    pub fn status(&self) -> BattleStatus {
        match (self.winner(), self.living_count()) {
            (Some(w), _) => BattleStatus::Won(w.id()),
            (None, 0) => BattleStatus::Draw,
            _ => BattleStatus::Ongoing,
        }
    }

    /// Highest damage dealt; the earliest roster entry wins ties.
    pub fn mvp(&self) -> Option<&Character> {
        self.roster.values().fold(None, |best: Option<&Character>, c| match best {
            Some(b) if b.damage_dealt() >= c.damage_dealt() => Some(b),
            _ => Some(c),
        })
    }
}
