//! Resume command handler.
//!
//! Rebuilds a game from `session_<game_id>.json` and continues the session
//! loop of the play command. Seats, stacks, blinds, dealer button and the
//! hand counter come from the snapshot; the bot kind and data directory from
//! configuration.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use drawpoker_engine::engine::Engine;

use super::play::run_session;
use crate::config;
use crate::error::CliError;
use crate::history::HistoryStore;
use crate::human::Console;

pub fn handle_resume_command(
    game_id: &str,
    config_path: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    hands: Option<u32>,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let mut cfg = config::load_with_sources(config_path.as_deref())
        .map_err(|e| CliError::Config(e.to_string()))?
        .config;
    if let Some(dir) = data_dir {
        cfg.data_dir = dir;
    }
    let store = HistoryStore::new(cfg.data_dir.clone());
    let snapshot = store.load_session(game_id)?;

    // a finished game has nothing left to resume
    let funded = snapshot.players.iter().filter(|p| p.stack > 0).count();
    if funded < 2 {
        return Err(CliError::InvalidInput(format!(
            "Game {} is over: {} player(s) with chips left",
            game_id, funded
        )));
    }

    let seed = cfg.seed.unwrap_or_else(rand::random);
    let mut engine = Engine::from_snapshot(&snapshot, Some(seed))?;
    writeln!(
        out,
        "resume: game={} players={} hands so far={} seed={}",
        engine.game_id(),
        engine.players().len(),
        engine.state().round_counter(),
        seed
    )?;

    let console = Console::new(input, out, err).shared();
    run_session(&mut engine, &store, &cfg, seed, hands, &console)
}
