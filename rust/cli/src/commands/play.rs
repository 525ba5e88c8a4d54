//! # Play Command
//!
//! Starts a new game from configuration and plays hands at the terminal.
//!
//! Human seats are driven by [`HumanSource`] over the shared console, every
//! other seat by the configured bot. After each hand the record is appended
//! to the game's history and the session snapshot is rewritten, so a game
//! can be picked up again with `resume` at any hand boundary.
//!
//! The session ends when:
//! - `--hands` hands have been played
//! - fewer than two players have chips
//! - the human answers "n" to "Play another hand?" or types `q`
//! - no limit was given and no human is seated (one hand is played)
//!
//! Input closing in the middle of a hand aborts it (exit code 130); the
//! session file still describes the last completed hand.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use drawpoker_ai::create_ai;
use drawpoker_engine::engine::Engine;
use drawpoker_engine::errors::GameError;
use drawpoker_engine::source::ActionSource;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::info;

use super::replay::render_hand;
use crate::config::{self, Config};
use crate::error::CliError;
use crate::history::HistoryStore;
use crate::human::{Console, HumanSource, SharedConsole};
use crate::validation::parse_yes_no;

/// Handle the play command: create a game and run the session loop.
pub fn handle_play_command(
    config_path: Option<PathBuf>,
    seed: Option<u64>,
    hands: Option<u32>,
    data_dir: Option<PathBuf>,
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

    let seed = seed.or(cfg.seed).unwrap_or_else(rand::random);
    let mut engine = Engine::new(&cfg.player_specs(), cfg.small_blind, cfg.big_blind, Some(seed))?;
    writeln!(
        out,
        "play: game={} players={} blinds={}/{} seed={}",
        engine.game_id(),
        engine.players().len(),
        cfg.small_blind,
        cfg.big_blind,
        seed
    )?;

    let store = HistoryStore::new(cfg.data_dir.clone());
    let console = Console::new(input, out, err).shared();
    run_session(&mut engine, &store, &cfg, seed, hands, &console)
}

/// Plays hands until one of the stop conditions in the module docs holds.
///
/// `seed` seeds the generator that hands each bot its own seed.
pub(crate) fn run_session(
    engine: &mut Engine,
    store: &HistoryStore,
    cfg: &Config,
    seed: u64,
    hands: Option<u32>,
    console: &SharedConsole<'_>,
) -> Result<(), CliError> {
    let mut seeder = ChaCha20Rng::seed_from_u64(seed);
    let mut sources: Vec<Box<dyn ActionSource + '_>> = Vec::with_capacity(engine.players().len());
    for player in engine.players() {
        if player.is_human() {
            sources.push(Box::new(HumanSource::new(console.clone())));
        } else {
            sources.push(create_ai(&cfg.ai, seeder.random()).map_err(CliError::Config)?);
        }
    }

    let mut played = 0u32;
    loop {
        for seat in engine.drop_busted_players() {
            sources.remove(seat);
        }
        if engine.players().len() < 2 {
            writeln!(console.borrow_mut().out, "\nNot enough players left to continue.")?;
            break;
        }
        if hands.is_some_and(|limit| played >= limit) {
            break;
        }

        let record = match engine.play_hand(&mut sources) {
            Ok(record) => record,
            Err(GameError::SourceUnavailable(reason)) => {
                if console.borrow().quit_requested() {
                    let mut c = console.borrow_mut();
                    writeln!(c.out, "\nQuit. The unfinished hand is discarded.")?;
                    write_resume_hint(&mut *c.out, engine.game_id(), played)?;
                    return Ok(());
                }
                return Err(CliError::Interrupted(reason));
            }
            Err(e) => return Err(e.into()),
        };
        played += 1;
        store.append_hand(&record)?;
        store.save_session(&engine.snapshot())?;
        info!(game_id = engine.game_id(), hand_id = %record.hand_id, "hand saved");
        render_hand(&record, &mut *console.borrow_mut().out, false)?;

        if hands.is_none() {
            let human_seated = engine
                .players()
                .iter()
                .any(|p| p.is_human() && p.stack() > 0);
            if !human_seated || !ask_another_hand(console)? {
                break;
            }
        }
    }

    let mut c = console.borrow_mut();
    writeln!(c.out, "\nFinal stacks:")?;
    for p in engine.players() {
        writeln!(c.out, "  {}: {}", p.name(), p.stack())?;
    }
    write_resume_hint(&mut *c.out, engine.game_id(), played)?;
    Ok(())
}

/// `false` on "n" or when the input is closed between hands.
fn ask_another_hand(console: &SharedConsole<'_>) -> Result<bool, CliError> {
    let mut c = console.borrow_mut();
    loop {
        let Some(line) = c.prompt("\nPlay another hand? [y/n] > ")? else {
            return Ok(false);
        };
        if matches!(line.to_lowercase().as_str(), "q" | "quit") {
            return Ok(false);
        }
        if let Some(answer) = parse_yes_no(&line) {
            return Ok(answer);
        }
        writeln!(c.err, "Please answer y or n")?;
    }
}

fn write_resume_hint(out: &mut dyn Write, game_id: &str, played: u32) -> std::io::Result<()> {
    writeln!(out, "Hands played: {}", played)?;
    if played == 0 {
        return writeln!(out, "No hand was completed; nothing was saved.");
    }
    writeln!(
        out,
        "Game {} saved. Resume with: drawpoker resume --game-id {}",
        game_id, game_id
    )
}
