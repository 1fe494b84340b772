use std::io::{BufRead, Write};
use std::thread;
use std::time::Duration;

use anyhow::Result;
use arena_engine::api::{self, MAX_ROUNDS};
use arena_engine::content::DEFAULT_SCENARIO;
use arena_engine::CharacterId;

use crate::render;
use crate::session::{ClassArg, Recruit, Session};

const MENU: &str = "\
=== BATTLE ARENA ===
1. Recruit character
2. Generate scenario
3. List arena
4. Battle (manual turn)
5. Automatic simulation
6. Statistics
7. Replay
8. Delete character
0. Save and quit";

/// Line-driven menu over any reader/writer pair.
pub struct Menu<'s, R, W> {
    session: &'s mut Session,
    input: R,
    out: W,
    delay: Duration,
}

impl<'s, R: BufRead, W: Write> Menu<'s, R, W> {
    pub fn new(session: &'s mut Session, input: R, out: W, delay: Duration) -> Self {
        Self { session, input, out, delay }
    }

    /// Loop until `0` or end of input, then save.
    pub fn run(&mut self) -> Result<()> {
        if self.session.recovered > 0 {
            writeln!(self.out, "Recovered {} fighters from the save file.", self.session.recovered)?;
        }
        loop {
            writeln!(self.out, "\n{}", MENU)?;
            let Some(choice) = self.prompt(">> ")? else {
                break;
            };
            match choice.trim() {
                "0" => break,
                "1" => self.recruit()?,
                "2" => self.scenario()?,
                "3" => self.list()?,
                "4" => self.manual_turn()?,
                "5" => self.simulate()?,
                "6" => self.stats()?,
                "7" => self.replay()?,
                "8" => self.delete()?,
                other => writeln!(self.out, "Unknown option '{}'.", other)?,
            }
        }
        if self.session.save() {
            writeln!(self.out, "Data saved. Farewell!")?;
        } else {
            writeln!(self.out, "Could not save the arena.")?;
        }
        Ok(())
    }

    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.out, "{}", label)?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn prompt_number(&mut self, label: &str, default: Option<i32>) -> Result<Option<i32>> {
        let Some(text) = self.prompt(label)? else {
            return Ok(None);
        };
        let text = text.trim();
        if text.is_empty() {
            return Ok(default);
        }
        match text.parse() {
            Ok(n) => Ok(Some(n)),
            Err(_) => {
                writeln!(self.out, "'{}' is not a number.", text)?;
                Ok(None)
            }
        }
    }

    fn recruit(&mut self) -> Result<()> {
        writeln!(self.out, "\n--- NEW RECRUIT ---")?;
        let name = match self.prompt("Name: ")? {
            Some(n) if !n.trim().is_empty() => n.trim().to_string(),
            _ => return Ok(()),
        };
        if self.session.battle.find_by_name(&name).is_some() {
            writeln!(self.out, "Error: '{}' is already in the arena. Pick another name.", name)?;
            return Ok(());
        }

        writeln!(self.out, "Classes: 1-Warrior, 2-Mage, 3-Archer, 4-Vampire, 5-Eternal")?;
        let Some(class) = self.prompt("Option: ")?.as_deref().and_then(ClassArg::from_menu) else {
            return Ok(());
        };
        let Some(health) = self.prompt_number("Health (e.g. 100): ", Some(100))? else {
            return Ok(());
        };
        let Some(attack) = self.prompt_number("Attack: ", None)? else {
            return Ok(());
        };
        let mut recruit = Recruit { class, name, health, attack, defense: 1, multiplier: 2 };
        match class {
            ClassArg::Warrior => match self.prompt_number("Defense: ", None)? {
                Some(d) => recruit.defense = d,
                None => return Ok(()),
            },
            ClassArg::Archer => match self.prompt_number("Multiplier (e.g. 2): ", Some(2))? {
                Some(m) => recruit.multiplier = m,
                None => return Ok(()),
            },
            _ => {}
        }

        match self.session.recruit(&recruit, None) {
            Ok(id) => {
                writeln!(self.out, "Recruited!")?;
                if let Some(c) = self.session.battle.find(id) {
                    writeln!(self.out, "{}", render::character_line(c))?;
                }
            }
            Err(err) => writeln!(self.out, "Could not recruit: {}", err)?,
        }
        Ok(())
    }

    fn scenario(&mut self) -> Result<()> {
        writeln!(self.out, "\nGenerating an epic battle scenario...")?;
        let report = api::populate_scenario(&mut self.session.battle, DEFAULT_SCENARIO)?;
        for entry in &report {
            writeln!(self.out, "{}", render::enlistment_line(entry))?;
        }
        let joined = report
            .iter()
            .filter(|e| matches!(e, api::Enlistment::Joined { .. }))
            .count();
        if joined > 0 {
            writeln!(self.out, "{} new fighters ready for war!", joined)?;
        } else {
            writeln!(self.out, "Nobody new was added (every name already existed).")?;
        }
        Ok(())
    }

    fn list(&mut self) -> Result<()> {
        for line in render::arena_listing(&self.session.battle) {
            writeln!(self.out, "{}", line)?;
        }
        Ok(())
    }

    fn manual_turn(&mut self) -> Result<()> {
        if self.session.battle.living_count() < 2 {
            writeln!(self.out, "Two living fighters are needed to battle.")?;
            return Ok(());
        }
        writeln!(self.out, "\n--- MANUAL TURN ---")?;
        let roll_call: Vec<String> = self
            .session
            .battle
            .living()
            .map(|c| format!("{} - {} ({} HP)", c.id(), c.name(), c.health()))
            .collect();
        for line in roll_call {
            writeln!(self.out, "{}", line)?;
        }

        let Some(attacker) = self.prompt_id("Attacker ID: ")? else {
            return Ok(());
        };
        let Some(defender) = self.prompt_id("Target ID: ")? else {
            return Ok(());
        };
        match self.session.battle.turn(attacker, defender) {
            Ok(actions) => {
                if let Some(a) = render::headline(&actions) {
                    writeln!(self.out, "Attack landed! {} -> {} damage.", a.description, a.damage)?;
                }
                if let Some(line) = render::verdict_line(&self.session.battle) {
                    writeln!(self.out, "{}", line)?;
                }
            }
            Err(err) => writeln!(self.out, "Error: {}", err)?,
        }
        Ok(())
    }

    fn prompt_id(&mut self, label: &str) -> Result<Option<CharacterId>> {
        Ok(self
            .prompt_number(label, None)?
            .and_then(|n| u32::try_from(n).ok())
            .map(CharacterId))
    }

    fn simulate(&mut self) -> Result<()> {
        if self.session.battle.living_count() < 2 {
            writeln!(self.out, "More fighters are needed to simulate.")?;
            return Ok(());
        }
        writeln!(self.out, "\n--- AUTOMATIC SIMULATION ---")?;
        let mut round = 0;
        while round < MAX_ROUNDS {
            let Some(outcome) = api::play_round(&mut self.session.battle) else {
                break;
            };
            round += 1;
            writeln!(self.out, "ROUND {}", round)?;
            for line in outcome.describe() {
                writeln!(self.out, "{}", line)?;
            }
            thread::sleep(self.delay);
        }
        match render::verdict_line(&self.session.battle) {
            Some(line) => writeln!(self.out, "{}", line)?,
            None => writeln!(self.out, "Stopped after {} rounds with no decision.", round)?,
        }
        Ok(())
    }

    fn stats(&mut self) -> Result<()> {
        writeln!(self.out, "\n--- WAR STATISTICS ---")?;
        for line in render::stats_lines(&self.session.battle) {
            writeln!(self.out, "{}", line)?;
        }
        Ok(())
    }

    fn replay(&mut self) -> Result<()> {
        let lines: Vec<String> = self
            .session
            .battle
            .actions()
            .iter()
            .enumerate()
            .map(|(i, a)| render::replay_line(i, a))
            .collect();
        if lines.is_empty() {
            writeln!(self.out, "Nothing to watch.")?;
            return Ok(());
        }
        writeln!(self.out, "\n--- BATTLE REPLAY ---")?;
        for line in lines {
            writeln!(self.out, "{}", line)?;
            thread::sleep(self.delay);
        }
        writeln!(self.out, "End of replay.")?;
        Ok(())
    }

    fn delete(&mut self) -> Result<()> {
        writeln!(self.out, "\n--- DELETE CHARACTER ---")?;
        if self.session.battle.is_empty() {
            writeln!(self.out, "The arena is empty. Nobody to delete.")?;
            return Ok(());
        }
        let targets: Vec<String> = self
            .session
            .battle
            .characters()
            .map(|c| format!("[ ID: {} ] - {} ({})", c.id(), c.name(), c.class_tag()))
            .collect();
        for line in targets {
            writeln!(self.out, "{}", line)?;
        }
        writeln!(self.out, "(Press ENTER on an empty line to cancel)")?;
        let Some(text) = self.prompt("ID to delete: ")? else {
            return Ok(());
        };
        if text.trim().is_empty() {
            writeln!(self.out, "Cancelled.")?;
            return Ok(());
        }
        let Ok(id) = text.trim().parse::<u32>() else {
            writeln!(self.out, "'{}' is not an id.", text.trim())?;
            return Ok(());
        };
        match self.session.battle.remove_character(CharacterId(id)) {
            Ok(_) => writeln!(self.out, "Character deleted.")?,
            Err(err) => writeln!(self.out, "Error: {}", err)?,
        }
        Ok(())
    }
}
