//! # drawpoker-ai: Automated Players for Five-Card Draw
//!
//! Bots are [`ActionSource`] implementations, so the engine drives them
//! exactly like a human seat.
//!
//! ## Core Components
//!
//! - [`random_draw`] - The table's default bot: fixed call/check odds and a
//!   random redraw of hopeless hands
//! - [`baseline`] - Deterministic strength-based bot for testing and comparison
//! - [`create_ai`] - Factory creating bots by name
//!
//! ## Quick Start
//!
//! ```rust
//! use drawpoker_ai::create_ai;
//!
//! let bot = create_ai("random-draw", 42).unwrap();
//! assert_eq!(bot.name(), "random-draw");
//! assert!(create_ai("nonsense", 42).is_err());
//! ```

use drawpoker_engine::source::ActionSource;

pub mod baseline;
pub mod random_draw;

/// Bot kinds accepted by [`create_ai`].
pub const AI_KINDS: [&str; 2] = ["random-draw", "baseline"];

/// Creates a bot by kind name. `seed` feeds the bot's own generator, so a
/// seeded game replays the same bot decisions.
///
/// # Errors
///
/// Returns a message naming the accepted kinds if `kind` is unknown.
pub fn create_ai(kind: &str, seed: u64) -> Result<Box<dyn ActionSource>, String> {
    match kind {
        "random-draw" => Ok(Box::new(random_draw::RandomDrawBot::new(seed))),
        "baseline" => Ok(Box::new(baseline::BaselineBot::new())),
        other => Err(format!(
            "unknown AI type '{}', expected one of: {}",
            other,
            AI_KINDS.join(", ")
        )),
    }
}
