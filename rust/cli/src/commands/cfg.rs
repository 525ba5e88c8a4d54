//! Configuration command handler.
//!
//! Prints the resolved configuration as JSON, each value next to where it
//! came from (`default`, `file` or `env`):
//!
//! ```json
//! {
//!   "big_blind": {
//!     "value": 50,
//!     "source": "default"
//!   },
//!   ...
//! }
//! ```

use std::io::Write;
use std::path::Path;

use crate::config;
use crate::error::CliError;

pub fn handle_cfg_command(config_path: Option<&Path>, out: &mut dyn Write) -> Result<(), CliError> {
    let resolved = config::load_with_sources(config_path)
        .map_err(|e| CliError::Config(e.to_string()))?;

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "small_blind": {
            "value": config.small_blind,
            "source": sources.small_blind,
        },
        "big_blind": {
            "value": config.big_blind,
            "source": sources.big_blind,
        },
        "starting_stack": {
            "value": config.starting_stack,
            "source": sources.starting_stack,
        },
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "data_dir": {
            "value": config.data_dir,
            "source": sources.data_dir,
        },
        "ai": {
            "value": config.ai,
            "source": sources.ai,
        },
        "players": {
            "value": config.players,
            "source": sources.players,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
