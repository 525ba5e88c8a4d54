//! UI helper functions for terminal output formatting.
//!
//! Shared by the commands so errors and section headers look the same everywhere.

use std::io::Write;

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Section header used by the hand renderers, e.g. `-- blinds --`.
pub fn section(out: &mut dyn Write, title: &str) -> std::io::Result<()> {
    writeln!(out, "-- {} --", title)
}
