//! Headless skirmish driver.
//!
//! Plays a scripted session turn by turn and prints the stage as each turn's
//! animations settle.
mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use config::{CliConfig, Flags, Settings};
use skirmish::{InputQueue, InputSource, Session, SessionConfig, SessionLoader, SkirmishError};
use tracing::{info, warn};

/// Play a scripted skirmish frame by frame
#[derive(Parser, Debug)]
#[command(name = "skirmish-cli")]
#[command(about = "Headless skirmish driver", long_about = None)]
#[command(version)]
struct Cli {
    /// Session TOML file (defaults to the built-in session)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Stop after this many turns
    #[arg(short, long, default_value = "50")]
    turns: usize,

    /// Frame budget per turn (overrides the session file)
    #[arg(long)]
    max_frames: Option<usize>,

    /// Print every frame instead of only settled turns
    #[arg(long)]
    frames: bool,

    /// Commands to play after the session script, e.g. "attack 1"
    #[arg(value_name = "COMMAND")]
    commands: Vec<String>,
}

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let env = CliConfig::from_env();
    setup_logging();

    let flags = Flags {
        session_file: cli.config.clone(),
        max_frames: cli.max_frames,
        show_frames: cli.frames,
    };
    let file = match env.session_file(&flags) {
        Some(path) => SessionLoader::load(path)?,
        None => SessionConfig::default(),
    };
    let Settings {
        session: config,
        show_frames,
    } = env.resolve(&flags, file);

    let mut input = config.input().context("Invalid session script")?;
    input.append(InputQueue::from_script(&cli.commands).context("Invalid command argument")?);

    let mut session = Session::build(&config)?;
    println!("{}", session.stage().render());

    let mut played = 0;
    while played < cli.turns && !session.is_over() {
        let Some(command) = input.next_command() else {
            break;
        };

        let result = session.play_turn_with(command, |frame, stage| {
            if show_frames {
                println!("  {frame:>3} | {}", stage.render());
            }
        });
        match result {
            Ok(summary) => {
                played += 1;
                println!(
                    "turn {:>2} {:<12} {}",
                    summary.turn,
                    format!("{:?}", summary.command),
                    session.stage().render()
                );
                info!(
                    turn = summary.turn,
                    npc_turns = summary.npc_turns,
                    frames = summary.frames,
                    removed = summary.removed.len(),
                    "turn settled"
                );
            }
            Err(SkirmishError::Command(err)) => warn!(%err, ?command, "command rejected"),
            Err(err) => return Err(err.into()),
        }
    }

    match session.outcome() {
        Some(outcome) => println!("{outcome} after {} turns", session.turn_number()),
        None => println!("undecided after {} turns", session.turn_number()),
    }
    Ok(())
}

/// Setup logging to stderr so stdout only carries the stage.
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
