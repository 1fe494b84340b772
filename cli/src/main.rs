mod menu;
mod render;
mod session;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::bail;
use arena_engine::api::{self, MAX_ROUNDS};
use arena_engine::content::DEFAULT_SCENARIO;
use arena_engine::CharacterId;
use clap::{Parser, Subcommand};

use menu::Menu;
use session::{ClassArg, Recruit, Session};

#[derive(Subcommand)]
enum Cmd {
    /// Interactive arena menu (default)
    Menu {
        /// Pause between simulated rounds and replay lines, in milliseconds
        #[arg(long, default_value_t = 800)]
        delay_ms: u64,
    },
    /// Add a character to the saved roster
    Recruit {
        #[arg(long, value_enum)]
        class: ClassArg,
        #[arg(long)]
        name: String,
        #[arg(long, default_value_t = 100)]
        health: i32,
        #[arg(long)]
        attack: i32,
        /// Warrior damage reduction
        #[arg(long, default_value_t = 1)]
        defense: i32,
        /// Archer critical multiplier
        #[arg(long, default_value_t = 2)]
        multiplier: i32,
        /// Explicit id; a random one in 1000..=9999 otherwise
        #[arg(long)]
        id: Option<u32>,
    },
    /// Enlist a built-in scenario's fighters, skipping names already present
    Scenario {
        #[arg(long, default_value = DEFAULT_SCENARIO)]
        id: String,
    },
    /// Show living fighters and the graveyard
    List,
    /// Resolve one attack between two saved characters
    Turn {
        #[arg(long)]
        attacker: u32,
        #[arg(long)]
        defender: u32,
    },
    /// Fight it out automatically until at most one stands
    Simulate {
        #[arg(long, default_value_t = MAX_ROUNDS)]
        max_rounds: u32,
        /// Print the numbered action log afterwards
        #[arg(long, default_value_t = false)]
        replay: bool,
    },
    /// Damage dealt and taken per character
    ///
    /// Counters are not saved, so a fresh process reports only what it did
    /// itself. Use the menu to keep statistics across several turns.
    Stats,
    /// Delete a character by id
    Remove {
        #[arg(long)]
        id: u32,
    },
}

#[derive(Parser)]
#[command(name = "arena")]
#[command(about = "Turn-based arena combat simulator")]
struct Cli {
    /// Roster save file
    #[arg(long, default_value = "arena_save.json")]
    save: PathBuf,
    /// Combat rules file (YAML or JSON)
    #[arg(long)]
    rules: Option<PathBuf>,
    /// RNG seed for determinism
    #[arg(long)]
    seed: Option<u64>,
    #[command(subcommand)]
    cmd: Option<Cmd>,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let mut session = Session::open(&cli.save, cli.rules.as_deref(), cli.seed)?;

    match cli.cmd.unwrap_or(Cmd::Menu { delay_ms: 800 }) {
        Cmd::Menu { delay_ms } => {
            let stdin = io::stdin();
            Menu::new(
                &mut session,
                stdin.lock(),
                io::stdout(),
                Duration::from_millis(delay_ms),
            )
            .run()?;
        }
        Cmd::Recruit {
            class,
            name,
            health,
            attack,
            defense,
            multiplier,
            id,
        } => {
            let recruit = Recruit {
                class,
                name,
                health,
                attack,
                defense,
                multiplier,
            };
            let id = session.recruit(&recruit, id.map(CharacterId))?;
            if let Some(c) = session.battle.find(id) {
                println!("{}", render::character_line(c));
            }
            persist(&session);
        }
        Cmd::Scenario { id } => {
            for entry in api::populate_scenario(&mut session.battle, &id)? {
                println!("{}", render::enlistment_line(&entry));
            }
            persist(&session);
        }
        Cmd::List => {
            for line in render::arena_listing(&session.battle) {
                println!("{}", line);
            }
        }
        Cmd::Turn { attacker, defender } => {
            let actions = session
                .battle
                .turn(CharacterId(attacker), CharacterId(defender))?;
            for action in &actions {
                println!(
                    "{} → {}: {} ({})",
                    action.origin_name, action.target_name, action.description, action.damage
                );
            }
            if let Some(line) = render::verdict_line(&session.battle) {
                println!("{}", line);
            }
            persist(&session);
        }
        Cmd::Simulate { max_rounds, replay } => {
            if session.battle.living_count() < 2 {
                bail!("at least two living characters are needed to simulate");
            }
            let result = api::run_to_end(&mut session.battle, max_rounds);
            for line in &result.log {
                println!("{}", line);
            }
            if let Some(line) = render::verdict_line(&session.battle) {
                println!("{}", line);
            }
            if replay {
                for (i, action) in session.battle.actions().iter().enumerate() {
                    println!("{}", render::replay_line(i, action));
                }
            }
            persist(&session);
        }
        Cmd::Stats => {
            for line in render::stats_lines(&session.battle) {
                println!("{}", line);
            }
        }
        Cmd::Remove { id } => {
            let removed = session.battle.remove_character(CharacterId(id))?;
            println!("Deleted {} ({}).", removed.name(), removed.class_tag());
            persist(&session);
        }
    }
    Ok(())
}

/// Save failures are already logged by the engine; the command itself still succeeds.
fn persist(session: &Session) {
    if !session.save() {
        eprintln!("warning: the roster was not saved");
    }
}
