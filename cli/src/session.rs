use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use arena_engine::{api, persistence, Battle, Character, CharacterId, CombatRules, Dice};
use clap::ValueEnum;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ClassArg {
    Warrior,
    Mage,
    Archer,
    Vampire,
    Eternal,
}

impl ClassArg {
    /// Menu numbering: 1-Warrior ... 5-Eternal.
    pub fn from_menu(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(ClassArg::Warrior),
            "2" => Some(ClassArg::Mage),
            "3" => Some(ClassArg::Archer),
            "4" => Some(ClassArg::Vampire),
            "5" => Some(ClassArg::Eternal),
            _ => None,
        }
    }
}

/// Everything needed to build a recruit, minus the id.
#[derive(Clone, Debug)]
pub struct Recruit {
    pub class: ClassArg,
    pub name: String,
    pub health: i32,
    pub attack: i32,
    pub defense: i32,
    pub multiplier: i32,
}

impl Recruit {
    pub fn build(&self, id: CharacterId) -> Character {
        let name = self.name.clone();
        match self.class {
            ClassArg::Warrior => Character::warrior(id, name, self.health, self.attack, self.defense),
            ClassArg::Mage => Character::mage(id, name, self.health, self.attack),
            ClassArg::Archer => Character::archer(id, name, self.health, self.attack, self.multiplier),
            ClassArg::Vampire => Character::vampire(id, name, self.health, self.attack),
            ClassArg::Eternal => Character::eternal(id, name, self.health, self.attack),
        }
    }
}

/// A battle bound to its save file.
pub struct Session {
    pub battle: Battle,
    save_path: PathBuf,
    /// How many characters the save file contributed on open.
    pub recovered: usize,
}

impl Session {
    pub fn open(save_path: &Path, rules_path: Option<&Path>, seed: Option<u64>) -> Result<Self> {
        let rules = match rules_path {
            Some(path) => CombatRules::from_path(path)?,
            None => CombatRules::default(),
        };
        let dice = seed.map(Dice::from_seed).unwrap_or_else(Dice::from_entropy);
        let mut battle = Battle::new(rules, dice);
        let recovered = battle.add_all(persistence::load_roster(save_path));
        tracing::debug!(save = %save_path.display(), recovered, "session opened");
        Ok(Self { battle, save_path: save_path.to_path_buf(), recovered })
    }

    pub fn save(&self) -> bool {
        persistence::save_roster(&self.save_path, self.battle.characters())
    }

    pub fn recruit(
        &mut self,
        recruit: &Recruit,
        id: Option<CharacterId>,
    ) -> Result<CharacterId> {
        let id = match id {
            Some(id) => id,
            None => api::draw_free_id(&mut self.battle)
                .ok_or_else(|| anyhow!("no free character id left for {}", recruit.name))?,
        };
        self.battle.add_character(recruit.build(id))?;
        Ok(id)
    }
}
