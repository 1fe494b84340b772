use std::collections::HashMap;

/// Built-in roster documents, keyed by scenario id.
pub fn builtin_scenarios() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        (
            "epic_arena",
            include_str!("../content/scenarios/epic_arena.json"),
        ),
        (
            "immortals",
            include_str!("../content/scenarios/immortals.json"),
        ),
    ])
}

pub const DEFAULT_SCENARIO: &str = "epic_arena";
