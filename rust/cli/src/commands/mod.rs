//! Command handler modules for the drawpoker CLI.
//!
//! Each subcommand lives in its own module with the same shape:
//!
//! - Public handler function: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Module-private helpers specific to that command
//! - Output streams (`&mut dyn Write`) and input (`&mut dyn BufRead`) passed in
//! - Errors propagated as [`CliError`](crate::error::CliError); [`crate::run`] prints them

mod cfg;
mod play;
mod replay;
mod resume;

pub use cfg::handle_cfg_command;
pub use play::handle_play_command;
pub use replay::handle_replay_command;
pub use resume::handle_resume_command;
