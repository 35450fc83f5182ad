//! Zorkish entry point: load a world and play it on the terminal.

use std::path::PathBuf;

use adventure_core::{Game, GameConfig, SessionStatus};
use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "zorkish")]
#[command(about = "A small text adventure")]
struct Cli {
    /// World file to play
    world: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Location id to start in
    #[arg(short, long)]
    start: Option<u32>,

    /// Deepest allowed chain of nested messages
    #[arg(long)]
    max_depth: Option<usize>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => GameConfig::from_file(path)?,
        None => GameConfig::default(),
    };
    if let Some(world) = cli.world {
        config = config.with_world_path(world);
    }
    if let Some(start) = cli.start {
        config = config.with_start_location(start);
    }
    if let Some(depth) = cli.max_depth {
        config = config.with_max_dispatch_depth(depth);
    }

    let mut game = Game::from_config(&config)?;
    game.welcome();
    print_output(&mut game);

    let mut editor = DefaultEditor::new()?;
    loop {
        let line = match editor.readline("> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        if !line.trim().is_empty() {
            let _ = editor.add_history_entry(line.as_str());
        }

        let status = match game.process_input(&line) {
            Ok(status) => status,
            Err(e) => {
                error!(%e, "command aborted");
                game.status()
            }
        };
        print_output(&mut game);

        match status {
            SessionStatus::Running => {}
            SessionStatus::Quit => break,
            SessionStatus::PlayerDied => {
                info!("session over");
                break;
            }
        }
    }

    Ok(())
}

fn print_output(game: &mut Game) {
    for line in game.drain_output() {
        println!("{line}");
    }
}
