//! # drawpoker CLI Library
//!
//! Command-line front end for the five-card draw engine: configuration,
//! the interactive human seat, hand history files and hand replay.
//!
//! ## Main Entry Point
//!
//! [`run`] parses the arguments and executes the subcommand, reading player
//! input from stdin. [`run_with_input`] does the same with any `BufRead`,
//! which is how the tests drive interactive sessions.
//!
//! ```no_run
//! use std::io;
//! let args = vec!["drawpoker", "play", "--hands", "3"];
//! let code = drawpoker_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `play`: Start a new game and play hands against bots
//! - `resume`: Continue a saved game
//! - `replay`: Print a recorded hand
//! - `cfg`: Display the resolved configuration and value sources

use clap::Parser;
use std::io::{BufRead, Write};

pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod history;
pub mod human;
pub mod io_utils;
pub mod ui;
pub mod validation;

use cli::{Commands, DrawPokerCli};
use commands::{
    handle_cfg_command, handle_play_command, handle_replay_command, handle_resume_command,
};

pub use error::CliError;

const COMMANDS: &[&str] = &["play", "resume", "replay", "cfg"];

/// Main entry point for the CLI application.
///
/// Returns the process exit code: `0` for success, `2` for errors, `130`
/// when input ended in the middle of a hand.
///
/// ```
/// use std::io;
/// let code = drawpoker_cli::run(vec!["drawpoker", "--version"], &mut io::stdout(), &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let stdin = std::io::stdin();
    let mut stdin_lock = stdin.lock();
    run_with_input(args, &mut stdin_lock, out, err)
}

/// [`run`] with player input taken from `input` instead of stdin.
pub fn run_with_input<I, S>(
    args: I,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match DrawPokerCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return usage_error(e, out, err),
    };

    let result = match cli.cmd {
        Commands::Play {
            config,
            seed,
            hands,
            data_dir,
        } => handle_play_command(config, seed, hands, data_dir, input, out, err),
        Commands::Resume {
            game_id,
            config,
            data_dir,
            hands,
        } => handle_resume_command(&game_id, config, data_dir, hands, input, out, err),
        Commands::Replay {
            game_id,
            hand_id,
            config,
            data_dir,
        } => handle_replay_command(&game_id, &hand_id, config, data_dir, out),
        Commands::Cfg { config } => handle_cfg_command(config.as_deref(), out),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            let _ = ui::write_error(err, &e.to_string());
            e.exit_code()
        }
    }
}

fn usage_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    // Help and version print to stdout and exit 0
    if matches!(
        e.kind(),
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
    ) {
        return match write!(out, "{}", e) {
            Ok(()) => exit_code::SUCCESS,
            Err(_) => exit_code::ERROR,
        };
    }

    let _ = writeln!(err, "{}", e);
    let _ = writeln!(err, "\ndrawpoker: five-card draw poker");
    let _ = writeln!(err, "Usage: drawpoker <command> [options]\n");
    let _ = writeln!(err, "Commands:");
    for c in COMMANDS {
        let _ = writeln!(err, "  {}", c);
    }
    let _ = writeln!(err, "\nFor full help, run: drawpoker --help");
    exit_code::ERROR
}
