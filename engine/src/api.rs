use std::collections::BTreeMap;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::battle::{Battle, BattleStatus};
use crate::character::{Character, CharacterId};
use crate::content::{builtin_scenarios, DEFAULT_SCENARIO};
use crate::error::BattleError;
use crate::persistence;
use crate::rules::CombatRules;
use crate::Dice;

/// Rounds after which an automatic fight is called off. Two Eternals can
/// never hurt each other, so an uncapped loop may not end.
pub const MAX_ROUNDS: u32 = 1000;

const ID_RANGE: (u32, u32) = (1000, 9999);
const ID_DRAWS: usize = 64;

/// Draw a random id in 1000..=9999 that nobody in `battle` holds yet.
///
/// Gives up with `None` after a bounded number of draws.
pub fn draw_free_id(battle: &mut Battle) -> Option<CharacterId> {
    for _ in 0..ID_DRAWS {
        let id = CharacterId(battle.dice().between(ID_RANGE.0, ID_RANGE.1));
        if battle.find(id).is_none() {
            return Some(id);
        }
    }
    tracing::warn!(draws = ID_DRAWS, "no free character id found");
    None
}

fn default_max_rounds() -> u32 {
    MAX_ROUNDS
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SimulationConfig {
    /// Roster snapshot to fight with. Takes precedence over `scenario_id`.
    #[serde(default)]
    pub roster_path: Option<String>,
    /// Built-in scenario; `epic_arena` when neither source is given.
    #[serde(default)]
    pub scenario_id: Option<String>,
    #[serde(default)]
    pub seed: u64,
    #[serde(default = "default_max_rounds")]
    pub max_rounds: u32,
    #[serde(default)]
    pub rules: CombatRules,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            roster_path: None,
            scenario_id: None,
            seed: 0,
            max_rounds: MAX_ROUNDS,
            rules: CombatRules::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Victory,
    Draw,
    /// The round cap was hit with two or more still standing.
    Unfinished,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SimulationResult {
    pub verdict: Verdict,
    pub winner: Option<String>,
    pub rounds: u32,
    pub survivors: Vec<String>,
    pub log: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SimulationSummary {
    pub samples: u32,
    pub wins: BTreeMap<String, u32>,
    pub draws: u32,
    pub unfinished: u32,
    pub avg_rounds: f64,
}

/// How one scenario template fared when joining a battle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Enlistment {
    Joined { id: CharacterId, name: String },
    NameTaken { name: String },
    IdCollision { name: String },
}

/// Add a built-in scenario's characters under fresh random ids.
///
/// Templates whose name is already in the roster are skipped.
pub fn populate_scenario(battle: &mut Battle, scenario_id: &str) -> Result<Vec<Enlistment>> {
    let templates = scenario_roster(scenario_id)?;
    let mut report = Vec::with_capacity(templates.len());
    for template in templates {
        let name = template.name().to_string();
        if battle.find_by_name(&name).is_some() {
            report.push(Enlistment::NameTaken { name });
            continue;
        }
        let Some(id) = draw_free_id(battle) else {
            report.push(Enlistment::IdCollision { name });
            continue;
        };
        match battle.add_character(template.with_id(id)) {
            Ok(()) => report.push(Enlistment::Joined { id, name }),
            Err(_) => report.push(Enlistment::IdCollision { name }),
        }
    }
    Ok(report)
}

pub fn scenario_roster(scenario_id: &str) -> Result<Vec<Character>> {
    let scenarios = builtin_scenarios();
    let doc = scenarios
        .get(scenario_id)
        .ok_or_else(|| anyhow!("scenario '{}' not found", scenario_id))?;
    persistence::from_document(doc)
}

/// One automatic exchange between two randomly chosen living characters.
#[derive(Debug, Clone)]
pub struct Round {
    pub attacker: CharacterId,
    pub attacker_name: String,
    pub defender: CharacterId,
    pub defender_name: String,
    pub outcome: Result<Vec<Action>, BattleError>,
    pub attacker_fell: bool,
    pub defender_fell: bool,
}

impl Round {
    /// Transcript lines for this round.
    pub fn describe(&self) -> Vec<String> {
        let mut lines = Vec::new();
        match &self.outcome {
            Ok(actions) => {
                for action in actions {
                    lines.push(format!(
                        "[TURN] {} → {}: {} ({})",
                        action.origin_name, action.target_name, action.description, action.damage
                    ));
                }
            }
            Err(err) => lines.push(format!(
                "[BLOCKED] {} → {}: {}",
                self.attacker_name, self.defender_name, err
            )),
        }
        if self.defender_fell {
            lines.push(format!("[DEATH] {} falls", self.defender_name));
        }
        if self.attacker_fell {
            lines.push(format!("[DEATH] {} falls", self.attacker_name));
        }
        lines
    }
}

/// Pick a living attacker and a different living defender uniformly at
/// random and resolve their turn. `None` when fewer than two are alive.
pub fn play_round(battle: &mut Battle) -> Option<Round> {
    let living: Vec<CharacterId> = battle.living().map(|c| c.id()).collect();
    if living.len() < 2 {
        return None;
    }
    let attacker = living[battle.dice().index(living.len())?];
    let others: Vec<CharacterId> = living.into_iter().filter(|&id| id != attacker).collect();
    let defender = others[battle.dice().index(others.len())?];

    let attacker_name = battle.find(attacker)?.name().to_string();
    let defender_name = battle.find(defender)?.name().to_string();
    let outcome = battle.turn(attacker, defender);
    if let Err(err) = &outcome {
        tracing::debug!(%err, "automatic turn refused");
    }

    let fell = |id| battle.find(id).is_some_and(|c| !c.is_alive());
    Some(Round {
        attacker,
        defender,
        attacker_fell: fell(attacker),
        defender_fell: fell(defender),
        attacker_name,
        defender_name,
        outcome,
    })
}

fn load_roster(cfg: &SimulationConfig) -> Result<Vec<Character>> {
    match (&cfg.roster_path, &cfg.scenario_id) {
        (Some(path), _) => persistence::read_snapshot(path),
        (None, Some(id)) => scenario_roster(id),
        (None, None) => scenario_roster(DEFAULT_SCENARIO),
    }
}

/// Run an automatic battle until at most one character stands or the round cap hits.
pub fn simulate_battle(cfg: SimulationConfig) -> Result<SimulationResult> {
    let roster = load_roster(&cfg)?;
    let mut battle = Battle::new(cfg.rules, Dice::from_seed(cfg.seed));
    battle.add_all(roster);
    Ok(run_to_end(&mut battle, cfg.max_rounds))
}

/// Drive `battle` with [`play_round`] until it is decided or `max_rounds` pass.
pub fn run_to_end(battle: &mut Battle, max_rounds: u32) -> SimulationResult {
    let mut log = Vec::new();
    log.push(format!(
        "[START] {}",
        battle
            .characters()
            .map(|c| format!("{} ({}, HP {})", c.name(), c.class_tag(), c.health()))
            .collect::<Vec<_>>()
            .join(", ")
    ));

    let mut rounds = 0u32;
    while rounds < max_rounds {
        let Some(round) = play_round(battle) else {
            break;
        };
        rounds += 1;
        log.push(format!("[ROUND] {}", rounds));
        log.extend(round.describe());
    }

    let (verdict, winner) = match battle.status() {
        BattleStatus::Won(id) => (Verdict::Victory, battle.find(id).map(|c| c.name().to_string())),
        BattleStatus::Draw => (Verdict::Draw, None),
        BattleStatus::Ongoing => (Verdict::Unfinished, None),
    };
    let survivors: Vec<String> = battle.living().map(|c| c.name().to_string()).collect();
    log.push(format!(
        "[END] verdict={:?} winner={} rounds={}",
        verdict,
        winner.as_deref().unwrap_or("none"),
        rounds
    ));

    SimulationResult { verdict, winner, rounds, survivors, log }
}

/// Run `samples` battles with seeds `seed`, `seed + 1`, ...
pub fn simulate_many(cfg: SimulationConfig, samples: u32) -> Result<SimulationSummary> {
    let roster = load_roster(&cfg)?;
    let mut summary = SimulationSummary { samples, ..Default::default() };
    let mut total_rounds = 0u64;

    for i in 0..samples {
        let mut battle = Battle::new(cfg.rules, Dice::from_seed(cfg.seed.wrapping_add(u64::from(i))));
        battle.add_all(roster.iter().cloned());
        let result = run_to_end(&mut battle, cfg.max_rounds);
        total_rounds += u64::from(result.rounds);
        match (result.verdict, result.winner) {
            (Verdict::Victory, Some(name)) => *summary.wins.entry(name).or_default() += 1,
            (Verdict::Draw, _) => summary.draws += 1,
            _ => summary.unfinished += 1,
        }
    }

    if samples > 0 {
        summary.avg_rounds = total_rounds as f64 / f64::from(samples);
    }
    Ok(summary)
}
