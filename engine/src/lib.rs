use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub mod action;
pub mod api;
pub mod battle;
pub mod character;
pub mod combat;
pub mod content;
pub mod error;
pub mod persistence;
pub mod rules;

pub use action::{Action, ActionFilter};
pub use battle::{Battle, BattleStatus};
pub use character::{Character, CharacterId, Class, Vitals};
pub use error::BattleError;
pub use rules::CombatRules;

enum Source {
    Seeded(ChaCha8Rng),
    /// Replays `values` in a loop; used to pin down coin flips and picks in tests.
    Scripted { values: Vec<u32>, pos: usize },
}

pub struct Dice {
    source: Source,
}

impl Dice {
    pub fn from_seed(seed: u64) -> Self {
        Self { source: Source::Seeded(ChaCha8Rng::seed_from_u64(seed)) }
    }

    pub fn from_entropy() -> Self {
        Self { source: Source::Seeded(ChaCha8Rng::from_entropy()) }
    }

    pub fn from_scripted(values: Vec<u32>) -> Self {
        Self { source: Source::Scripted { values, pos: 0 } }
    }

    fn next_scripted(values: &[u32], pos: &mut usize) -> u32 {
        if values.is_empty() {
            return 0;
        }
        let v = values[*pos % values.len()];
        *pos += 1;
        v
    }

    /// True with probability `p`. Scripted dice treat any non-zero value as success.
    pub fn chance(&mut self, p: f64) -> bool {
        match &mut self.source {
            Source::Seeded(rng) => rng.gen_bool(p.clamp(0.0, 1.0)),
            Source::Scripted { values, pos } => Self::next_scripted(values, pos) != 0,
        }
    }

    /// Uniform index into a collection of `len` items, `None` when empty.
    pub fn index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(match &mut self.source {
            Source::Seeded(rng) => rng.gen_range(0..len),
            Source::Scripted { values, pos } => Self::next_scripted(values, pos) as usize % len,
        })
    }

    /// Uniform value in `lo..=hi`.
    pub fn between(&mut self, lo: u32, hi: u32) -> u32 {
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        match &mut self.source {
            Source::Seeded(rng) => rng.gen_range(lo..=hi),
            Source::Scripted { values, pos } => {
                let span = u64::from(hi - lo) + 1;
                lo + (u64::from(Self::next_scripted(values, pos)) % span) as u32
            }
        }
    }
}

impl Default for Dice {
    fn default() -> Self {
        Self::from_entropy()
    }
}
