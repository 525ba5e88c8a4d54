//! On-disk hand history and session files.
//!
//! Layout under the data directory:
//! - `history_<game_id>.jsonl`: one `HandRecord` per line, appended after every hand
//! - `session_<game_id>.json`: the latest `SessionSnapshot`, rewritten after every hand

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use drawpoker_engine::game::SessionSnapshot;
use drawpoker_engine::logger::HandRecord;
use tracing::debug;

use crate::error::CliError;
use crate::io_utils::{ensure_parent_dir, read_text};

#[derive(Debug, Clone)]
pub struct HistoryStore {
    dir: PathBuf,
}

impl HistoryStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn history_path(&self, game_id: &str) -> Result<PathBuf, CliError> {
        check_game_id(game_id)?;
        Ok(self.dir.join(format!("history_{}.jsonl", game_id)))
    }

    pub fn session_path(&self, game_id: &str) -> Result<PathBuf, CliError> {
        check_game_id(game_id)?;
        Ok(self.dir.join(format!("session_{}.json", game_id)))
    }

    pub fn append_hand(&self, record: &HandRecord) -> Result<(), CliError> {
        let path = self.history_path(&record.game_id)?;
        ensure_parent_dir(&path).map_err(|e| CliError::Io(std::io::Error::other(e)))?;
        let line = serde_json::to_string(record)
            .map_err(|e| CliError::Engine(format!("Failed to serialize hand: {}", e)))?;
        let mut f = OpenOptions::new().create(true).append(true).open(&path)?;
        writeln!(f, "{}", line)?;
        debug!(path = %path.display(), hand_id = %record.hand_id, "hand appended");
        Ok(())
    }

    /// Writes the snapshot to a temporary file first so an interrupted
    /// write never leaves a truncated session behind.
    pub fn save_session(&self, snapshot: &SessionSnapshot) -> Result<(), CliError> {
        let path = self.session_path(&snapshot.game_id)?;
        ensure_parent_dir(&path).map_err(|e| CliError::Io(std::io::Error::other(e)))?;
        let json = serde_json::to_string_pretty(snapshot)
            .map_err(|e| CliError::Engine(format!("Failed to serialize session: {}", e)))?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    pub fn load_session(&self, game_id: &str) -> Result<SessionSnapshot, CliError> {
        let path = self.session_path(game_id)?;
        if !path.exists() {
            return Err(CliError::InvalidInput(format!(
                "No saved session for game {} in {}",
                game_id,
                self.dir.display()
            )));
        }
        let text = read_text(&path).map_err(CliError::InvalidInput)?;
        serde_json::from_str(&text).map_err(|e| {
            CliError::InvalidInput(format!("Corrupt session file {}: {}", path.display(), e))
        })
    }

    /// All recorded hands of a game, in play order.
    pub fn load_hands(&self, game_id: &str) -> Result<Vec<HandRecord>, CliError> {
        let path = self.history_path(game_id)?;
        if !path.exists() {
            return Err(CliError::InvalidInput(format!(
                "No hand history for game {} in {}",
                game_id,
                self.dir.display()
            )));
        }
        let text = read_text(&path).map_err(CliError::InvalidInput)?;
        text.lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| {
                serde_json::from_str(line).map_err(|e| {
                    CliError::InvalidInput(format!(
                        "{}:{}: invalid hand record: {}",
                        path.display(),
                        i + 1,
                        e
                    ))
                })
            })
            .collect()
    }
}

/// Game ids become part of file names; only uuid-like characters pass.
fn check_game_id(game_id: &str) -> Result<(), CliError> {
    let ok = !game_id.is_empty()
        && game_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if ok {
        Ok(())
    } else {
        Err(CliError::InvalidInput(format!("Invalid game id '{}'", game_id)))
    }
}
