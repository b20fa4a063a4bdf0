//! Brick Breaker entry point
//!
//! Loads the level named on the command line and plays it in the terminal.
//! Set `BRICK_BREAKER_CONFIG` to a JSON file to override game constants.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use brick_breaker::platform::{TerminalInput, TerminalPresentation};
use brick_breaker::{GameConfig, GameSession, GameState, LevelGrid};

/// Environment variable naming an optional JSON config file
const CONFIG_ENV: &str = "BRICK_BREAKER_CONFIG";

#[derive(Parser)]
#[command(name = "brick-breaker")]
#[command(about = "Break every block on a text-defined level")]
struct Cli {
    /// Level file: one line per row, block symbols and `.` for gaps
    level: PathBuf,
}

fn load_config() -> Result<GameConfig, brick_breaker::ConfigError> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => GameConfig::load(PathBuf::from(path)),
        None => Ok(GameConfig::default()),
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{e}");
            eprintln!("brick-breaker: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Validate the level before touching the terminal.
    let grid = match LevelGrid::load(&cli.level) {
        Ok(grid) => grid,
        Err(e) => {
            log::error!("{e}");
            eprintln!("brick-breaker: {e}");
            return ExitCode::FAILURE;
        }
    };

    let state = GameState::new(config, grid);
    let mut session = GameSession::new(
        state,
        TerminalPresentation::new(),
        TerminalInput::default(),
    );

    match session.run() {
        Ok(()) => {
            let state = session.state();
            println!("Final score: {} ({:?})", state.score, state.end);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            eprintln!("brick-breaker: {e}");
            ExitCode::FAILURE
        }
    }
}
