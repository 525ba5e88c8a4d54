#![allow(dead_code)]

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use drawpoker_engine::game::SessionSnapshot;
use drawpoker_engine::logger::HandRecord;

#[derive(Debug, Clone)]
pub struct CliResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Runs the CLI in-process with `stdin` as the player's input.
pub fn run_cli(args: &[&str], stdin: &str) -> CliResult {
    let mut argv = vec!["drawpoker"];
    argv.extend_from_slice(args);
    let mut input = Cursor::new(stdin.as_bytes().to_vec());
    let (mut out, mut err) = (Vec::new(), Vec::new());
    let exit_code = drawpoker_cli::run_with_input(argv, &mut input, &mut out, &mut err);
    CliResult {
        exit_code,
        stdout: String::from_utf8_lossy(&out).into_owned(),
        stderr: String::from_utf8_lossy(&err).into_owned(),
    }
}

/// Writes a table config into `dir` whose data directory is `dir/data`.
/// Seat names prefixed with `*` are human.
pub fn write_config(dir: &Path, ai: &str, seats: &[&str]) -> PathBuf {
    let mut toml = format!(
        "ai = \"{}\"\ndata_dir = '{}'\n",
        ai,
        dir.join("data").display()
    );
    for seat in seats {
        let (name, human) = match seat.strip_prefix('*') {
            Some(name) => (name, true),
            None => (*seat, false),
        };
        toml.push_str(&format!(
            "\n[[players]]\nname = \"{}\"\nis_human = {}\n",
            name, human
        ));
    }
    let path = dir.join("table.toml");
    fs::write(&path, toml).expect("write config");
    path
}

pub fn data_dir(dir: &Path) -> PathBuf {
    dir.join("data")
}

/// Game id printed on the first line of `play`/`resume` output.
pub fn game_id_from(stdout: &str) -> String {
    let first = stdout.lines().next().expect("output line");
    let start = first.find("game=").expect("game= in header") + "game=".len();
    first[start..]
        .split_whitespace()
        .next()
        .expect("game id")
        .to_string()
}

pub fn read_history(dir: &Path, game_id: &str) -> Vec<HandRecord> {
    let path = data_dir(dir).join(format!("history_{}.jsonl", game_id));
    fs::read_to_string(path)
        .expect("history file")
        .lines()
        .map(|l| serde_json::from_str(l).expect("hand record"))
        .collect()
}

pub fn read_session(dir: &Path, game_id: &str) -> SessionSnapshot {
    let path = data_dir(dir).join(format!("session_{}.json", game_id));
    serde_json::from_str(&fs::read_to_string(path).expect("session file")).expect("snapshot")
}
