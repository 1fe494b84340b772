use std::path::PathBuf;

use arena_engine::api::{simulate_many, SimulationConfig, MAX_ROUNDS};
use arena_engine::content::DEFAULT_SCENARIO;
use arena_engine::CombatRules;
use clap::Parser;

#[derive(Parser)]
#[command(name = "simulate-many")]
#[command(about = "Monte Carlo sim: many automatic battles over one roster")]
struct Args {
    /// Roster snapshot JSON (overrides --scenario)
    #[arg(long)]
    roster: Option<PathBuf>,

    /// Built-in scenario id
    #[arg(long, default_value = DEFAULT_SCENARIO)]
    scenario: String,

    /// Number of trials
    #[arg(long, default_value_t = 1000)]
    trials: u32,

    /// Safety cap on rounds per trial
    #[arg(long, default_value_t = MAX_ROUNDS)]
    max_rounds: u32,

    /// RNG base seed (trial i uses seed+i)
    #[arg(long, default_value_t = 12345)]
    seed: u64,

    /// Combat rules file (YAML or JSON)
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Use the older ruleset (1.3x rage, 10 mana) when no rules file is given
    #[arg(long, default_value_t = false)]
    legacy: bool,

    /// Print the summary as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let rules = match (&args.rules, args.legacy) {
        (Some(path), _) => CombatRules::from_path(path)?,
        (None, true) => CombatRules::legacy(),
        (None, false) => CombatRules::default(),
    };
    let cfg = SimulationConfig {
        roster_path: args
            .roster
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned()),
        scenario_id: Some(args.scenario.clone()),
        seed: args.seed,
        max_rounds: args.max_rounds,
        rules,
    };
    let summary = simulate_many(cfg, args.trials)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let pct = |n: u32| {
        if summary.samples == 0 {
            0.0
        } else {
            f64::from(n) * 100.0 / f64::from(summary.samples)
        }
    };

    println!("simulate-many results");
    println!("---------------------");
    println!("trials:             {}", summary.samples);
    match &args.roster {
        Some(path) => println!("roster:             {}", path.display()),
        None => println!("scenario:           {}", args.scenario),
    }
    println!(
        "rules:              rage x{} / mana {}",
        rules.rage_multiplier, rules.mana_cost
    );
    println!();
    let mut wins: Vec<(&String, &u32)> = summary.wins.iter().collect();
    wins.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    for (name, count) in wins {
        println!("{:<20}{:.1}%", format!("{}:", name), pct(*count));
    }
    println!("{:<20}{:.1}%", "draws:", pct(summary.draws));
    println!("{:<20}{:.1}%", "unfinished:", pct(summary.unfinished));
    println!("avg rounds:         {:.2}", summary.avg_rounds);

    Ok(())
}
