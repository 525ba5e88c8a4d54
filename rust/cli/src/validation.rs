//! Input parsing and validation for interactive play.
//!
//! Betting input is checked against the legal action set before it ever
//! reaches the engine, so a typo costs the player a re-prompt and nothing
//! else.

use drawpoker_engine::exchange::validate_selection;
use drawpoker_engine::player::{HAND_SIZE, PlayerAction};
use drawpoker_engine::rules::LegalActions;

/// Outcome of parsing one line of betting input.
#[derive(Debug, PartialEq)]
pub enum ParseResult {
    /// A legal action for the current street
    Action(PlayerAction),
    /// User entered quit command (q or quit)
    Quit,
    /// Invalid input with error message
    Invalid(String),
}

/// Parse betting input against the actions open to the player.
///
/// Accepts (case-insensitive):
/// - `f` / `fold`
/// - `k` / `check`
/// - `c` / `call`
/// - `r N` / `raise N`, where N is the new total commitment for the street
/// - `q` / `quit`
///
/// `bet_in_round` is what the player already committed this street; a raise
/// to N moves `N - bet_in_round` chips.
///
/// # Example
///
/// ```rust
/// use drawpoker_engine::player::{Player, PlayerAction};
/// use drawpoker_engine::rules::legal_actions;
/// # use drawpoker_cli::validation::{parse_player_action, ParseResult};
///
/// let p = Player::new(0, "Ann", 1000, true);
/// let legal = legal_actions(&p, 50, 50);
/// assert_eq!(
///     parse_player_action("call", &legal, 0),
///     ParseResult::Action(PlayerAction::Call(50))
/// );
/// assert_eq!(
///     parse_player_action("r 150", &legal, 0),
///     ParseResult::Action(PlayerAction::Raise(150))
/// );
/// assert_eq!(parse_player_action("Q", &legal, 0), ParseResult::Quit);
/// ```
pub fn parse_player_action(input: &str, legal: &LegalActions, bet_in_round: u32) -> ParseResult {
    let input = input.trim().to_lowercase();
    let parts: Vec<&str> = input.split_whitespace().collect();

    let Some(&verb) = parts.first() else {
        return ParseResult::Invalid("Empty input".to_string());
    };
    if parts.len() > 2 || (parts.len() == 2 && !matches!(verb, "r" | "raise")) {
        return ParseResult::Invalid(format!("Unexpected input '{}'", input));
    }

    match verb {
        "q" | "quit" => ParseResult::Quit,
        "f" | "fold" => ParseResult::Action(PlayerAction::Fold),
        "k" | "check" => {
            if legal.can_check {
                ParseResult::Action(PlayerAction::Check)
            } else {
                ParseResult::Invalid(format!("Cannot check, {} to call", legal.to_call))
            }
        }
        "c" | "call" => match legal.call {
            Some(amount) => ParseResult::Action(PlayerAction::Call(amount)),
            None => ParseResult::Invalid("Nothing to call, check instead".to_string()),
        },
        "r" | "raise" => {
            let Some(bounds) = legal.raise else {
                return ParseResult::Invalid("Raising is not possible here".to_string());
            };
            let Some(amount) = parts.get(1) else {
                return ParseResult::Invalid(format!(
                    "Raise requires a total (e.g. 'raise {}')",
                    bounds.min_total
                ));
            };
            let total = match amount.parse::<u32>() {
                Ok(v) => v,
                Err(_) => return ParseResult::Invalid("Invalid raise amount".to_string()),
            };
            if !bounds.contains(total) {
                return ParseResult::Invalid(format!(
                    "Raise total must be between {} and {}",
                    bounds.min_total, bounds.max_total
                ));
            }
            ParseResult::Action(PlayerAction::Raise(total - bet_in_round))
        }
        other => ParseResult::Invalid(format!(
            "Unrecognized action '{}'. Valid actions: fold, check, call, raise <total>, q",
            other
        )),
    }
}

/// Parse a discard selection: whitespace-separated positions 0-4, at most
/// four, blank to stand pat.
///
/// ```rust
/// # use drawpoker_cli::validation::parse_discards;
/// assert_eq!(parse_discards("0 3").unwrap(), vec![0, 3]);
/// assert!(parse_discards("").unwrap().is_empty());
/// assert!(parse_discards("0 1 2 3 4").is_err());
/// ```
pub fn parse_discards(input: &str) -> Result<Vec<usize>, String> {
    let indices = input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<usize>()
                .map_err(|_| format!("'{}' is not a card position", s))
        })
        .collect::<Result<Vec<_>, _>>()?;
    validate_selection(&indices, HAND_SIZE).map_err(|e| e.to_string())?;
    Ok(indices)
}

/// `Some(true)` for y/yes, `Some(false)` for n/no, `None` otherwise.
pub fn parse_yes_no(input: &str) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drawpoker_engine::player::Player;
    use drawpoker_engine::rules::legal_actions;

    #[test]
    fn check_only_when_nothing_is_owed() {
        let p = Player::new(0, "Ann", 1000, true);
        let owed = legal_actions(&p, 50, 50);
        assert!(matches!(
            parse_player_action("k", &owed, 0),
            ParseResult::Invalid(_)
        ));
        let free = legal_actions(&p, 0, 50);
        assert_eq!(
            parse_player_action("CHECK", &free, 0),
            ParseResult::Action(PlayerAction::Check)
        );
        assert!(matches!(
            parse_player_action("call", &free, 0),
            ParseResult::Invalid(_)
        ));
    }

    #[test]
    fn raise_total_is_converted_to_chips_moved() {
        let p = Player::new(0, "Ann", 1000, true);
        let legal = legal_actions(&p, 100, 50);
        assert_eq!(
            parse_player_action("raise 200", &legal, 50),
            ParseResult::Action(PlayerAction::Raise(150))
        );
    }

    #[test]
    fn out_of_range_raise_is_rejected() {
        let p = Player::new(0, "Ann", 300, true);
        let legal = legal_actions(&p, 50, 50);
        for input in ["r 60", "r 301", "r", "r lots", "raise 100 now"] {
            assert!(
                matches!(parse_player_action(input, &legal, 0), ParseResult::Invalid(_)),
                "{input}"
            );
        }
    }

    #[test]
    fn short_stack_cannot_raise() {
        let p = Player::new(0, "Ann", 40, true);
        let legal = legal_actions(&p, 50, 50);
        assert!(matches!(
            parse_player_action("r 100", &legal, 0),
            ParseResult::Invalid(_)
        ));
        assert_eq!(
            parse_player_action("c", &legal, 0),
            ParseResult::Action(PlayerAction::Call(40))
        );
    }

    #[test]
    fn discard_input_errors() {
        assert!(parse_discards("5").is_err());
        assert!(parse_discards("1 1").is_err());
        assert!(parse_discards("a").is_err());
        assert_eq!(parse_discards(" 4,2 ").unwrap(), vec![4, 2]);
    }

    #[test]
    fn yes_no() {
        assert_eq!(parse_yes_no("Y"), Some(true));
        assert_eq!(parse_yes_no("no"), Some(false));
        assert_eq!(parse_yes_no("maybe"), None);
    }
}
