//! Roster snapshots as JSON documents.
//!
//! The current document is `{timestamp, totalCharacters, characters}`. A bare
//! array of character records is also accepted. Each record field may appear
//! under an underscore-prefixed legacy name (`_health` for `health`); the
//! plain name wins when both are present. Records with an unknown `classTag`,
//! or missing the id or name, are dropped without complaint.

use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use encoding_rs::Encoding;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::action::Action;
use crate::character::{Character, CharacterId, Class};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Snapshot<'a> {
    timestamp: DateTime<Utc>,
    total_characters: usize,
    characters: Vec<Record<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Record<'a> {
    class_tag: &'static str,
    id: CharacterId,
    name: &'a str,
    health: i32,
    max_health: i32,
    attack_power: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    defense: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    attack_multiplier: Option<i32>,
    damage_dealt: i64,
    damage_taken: i64,
    history: &'a [Action],
}

impl<'a> From<&'a Character> for Record<'a> {
    fn from(c: &'a Character) -> Self {
        let (defense, attack_multiplier) = match c.class() {
            Class::Warrior { defense } => (Some(defense), None),
            Class::Archer { multiplier } => (None, Some(multiplier)),
            _ => (None, None),
        };
        Self {
            class_tag: c.class_tag(),
            id: c.id(),
            name: c.name(),
            health: c.health(),
            max_health: c.max_health(),
            attack_power: c.attack_power(),
            defense,
            attack_multiplier,
            damage_dealt: c.damage_dealt(),
            damage_taken: c.damage_taken(),
            history: c.history(),
        }
    }
}

/// Render a roster as a pretty-printed snapshot document.
pub fn to_document<'a>(characters: impl IntoIterator<Item = &'a Character>) -> Result<String> {
    let characters: Vec<Record<'_>> = characters.into_iter().map(Record::from).collect();
    let snapshot = Snapshot {
        timestamp: Utc::now(),
        total_characters: characters.len(),
        characters,
    };
    serde_json::to_string_pretty(&snapshot).context("failed to serialize roster")
}

/// Rebuild characters from a snapshot document.
///
/// Reloaded characters start fresh: max health is the saved health, and
/// counters and history are empty.
pub fn from_document(text: &str) -> Result<Vec<Character>> {
    let doc: Value = serde_json::from_str(text).context("snapshot is not valid JSON")?;
    let records = match &doc {
        Value::Array(items) => items,
        Value::Object(map) => match map.get("characters") {
            Some(Value::Array(items)) => items,
            _ => bail!("snapshot has no characters array"),
        },
        _ => bail!("snapshot must be an object or an array"),
    };

    let characters: Vec<Character> = records
        .iter()
        .filter_map(|r| match r {
            Value::Object(obj) => rebuild(obj),
            _ => None,
        })
        .collect();
    tracing::debug!(records = records.len(), kept = characters.len(), "parsed snapshot");
    Ok(characters)
}

fn field<'v>(obj: &'v Map<String, Value>, name: &str) -> Option<&'v Value> {
    obj.get(name)
        .filter(|v| !v.is_null())
        .or_else(|| obj.get(&format!("_{name}")).filter(|v| !v.is_null()))
}

fn int_field(obj: &Map<String, Value>, name: &str) -> Option<i64> {
    let value = field(obj, name)?;
    value.as_i64().or_else(|| value.as_f64().map(|f| f.floor() as i64))
}

fn stat(obj: &Map<String, Value>, name: &str) -> i32 {
    int_field(obj, name)
        .map(|v| v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
        .unwrap_or(0)
}

fn rebuild(obj: &Map<String, Value>) -> Option<Character> {
    let tag = field(obj, "classTag")?.as_str()?;
    let class = match tag {
        "Warrior" => Class::Warrior { defense: stat(obj, "defense") },
        "Mage" => Class::Mage,
        "Archer" => Class::Archer { multiplier: stat(obj, "attackMultiplier") },
        "Vampire" => Class::Vampire,
        "Eternal" => Class::Eternal,
        other => {
            tracing::debug!(class_tag = other, "skipping record with unknown class");
            return None;
        }
    };
    let id = u32::try_from(int_field(obj, "id")?).ok()?;
    let name = field(obj, "name")?.as_str()?;
    Some(Character::new(
        id,
        name,
        stat(obj, "health"),
        stat(obj, "attackPower"),
        class,
    ))
}

/// Read a file as text, honoring a UTF-8/UTF-16 byte order mark.
fn read_text_auto(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    if let Some((enc, bom_len)) = Encoding::for_bom(&bytes) {
        let (cow, _, _) = enc.decode(&bytes[bom_len..]);
        Ok(cow.into_owned())
    } else {
        Ok(String::from_utf8(bytes)?)
    }
}

pub fn read_snapshot(path: impl AsRef<Path>) -> Result<Vec<Character>> {
    let path = path.as_ref();
    let text = read_text_auto(path)
        .with_context(|| format!("failed to read snapshot: {}", path.display()))?;
    from_document(&text).with_context(|| format!("failed to parse snapshot: {}", path.display()))
}

pub fn write_snapshot<'a>(
    path: impl AsRef<Path>,
    characters: impl IntoIterator<Item = &'a Character>,
) -> Result<()> {
    let path = path.as_ref();
    let text = to_document(characters)?;
    fs::write(path, text)
        .with_context(|| format!("failed to write snapshot: {}", path.display()))
}

/// Load a roster, degrading to an empty one when the file is missing or unreadable.
pub fn load_roster(path: impl AsRef<Path>) -> Vec<Character> {
    let path = path.as_ref();
    if !path.exists() {
        return Vec::new();
    }
    match read_snapshot(path) {
        Ok(characters) => {
            tracing::info!(path = %path.display(), count = characters.len(), "roster loaded");
            characters
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), "could not load roster: {err:#}");
            Vec::new()
        }
    }
}

/// Save a roster. Failures are logged, never raised; returns whether the write happened.
pub fn save_roster<'a>(
    path: impl AsRef<Path>,
    characters: impl IntoIterator<Item = &'a Character>,
) -> bool {
    let path = path.as_ref();
    match write_snapshot(path, characters) {
        Ok(()) => {
            tracing::info!(path = %path.display(), "roster saved");
            true
        }
        Err(err) => {
            tracing::error!(path = %path.display(), "could not save roster: {err:#}");
            false
        }
    }
}
