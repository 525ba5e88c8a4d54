//! File and console I/O helpers shared by the commands.
//!
//! - Reading one line of interactive input
//! - Reading text files with a UTF-8 BOM stripped
//! - Making sure a directory exists before writing into it

use std::io::BufRead;
use std::path::Path;

/// Reads a line of input from a buffered reader, blocking until available.
///
/// Returns the trimmed line (possibly empty), or `None` on EOF or a read
/// error.
///
/// # Example
///
/// ```rust
/// use std::io::Cursor;
/// # use drawpoker_cli::io_utils::read_stdin_line;
///
/// let mut input = Cursor::new("  fold \n");
/// assert_eq!(read_stdin_line(&mut input).as_deref(), Some("fold"));
/// assert_eq!(read_stdin_line(&mut input), None);
/// ```
pub fn read_stdin_line(stdin: &mut dyn BufRead) -> Option<String> {
    let mut line = String::new();
    match stdin.read_line(&mut line) {
        Ok(0) => None, // EOF
        Ok(_) => Some(line.trim().to_string()),
        Err(_) => None,
    }
}

/// Reads a whole text file, dropping a leading UTF-8 BOM.
pub fn read_text(path: &Path) -> Result<String, String> {
    let mut content =
        std::fs::read_to_string(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    strip_utf8_bom(&mut content);
    Ok(content)
}

/// Creates `dir` and any missing parents.
pub fn ensure_dir(dir: &Path) -> Result<(), String> {
    if dir.as_os_str().is_empty() || dir.exists() {
        return Ok(());
    }
    std::fs::create_dir_all(dir).map_err(|e| format!("Failed to create directory: {}", e))
}

/// Ensure parent directory exists for given path, creating if needed.
pub fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    match path.parent() {
        Some(parent) => ensure_dir(parent),
        None => Ok(()),
    }
}

pub(crate) fn strip_utf8_bom(s: &mut String) {
    const BOM: &str = "\u{feff}";
    if s.starts_with(BOM) {
        s.drain(..BOM.len());
    }
}
