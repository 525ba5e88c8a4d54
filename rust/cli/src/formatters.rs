//! Card, hand and action formatters for terminal display.
//!
//! Pure functions; the Unicode suit symbols fall back to ASCII letters on
//! Windows consoles that cannot render them.
//!
//! ```rust
//! use drawpoker_engine::cards::{Card, Rank, Suit};
//! use drawpoker_cli::formatters::{format_card, format_hand};
//!
//! let ace = Card::new(Rank::Ace, Suit::Spades);
//! assert!(format_card(&ace) == "A♠" || format_card(&ace) == "As");
//! assert!(format_hand(&[ace]).starts_with("[A"));
//! ```

use drawpoker_engine::cards::{Card, Suit};
use drawpoker_engine::logger::ActionRecord;
use drawpoker_engine::player::ActionKind;
use drawpoker_engine::rules::LegalActions;

/// Check if the terminal supports Unicode card symbols.
///
/// On Windows, checks for Windows Terminal (WT_SESSION), modern terminals
/// (TERM_PROGRAM) or VS Code (VSCODE_INJECTION). Elsewhere assumes yes.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

fn format_suit(suit: Suit) -> String {
    if supports_unicode() {
        suit.symbol().to_string()
    } else {
        match suit {
            Suit::Hearts => "h",
            Suit::Diamonds => "d",
            Suit::Clubs => "c",
            Suit::Spades => "s",
        }
        .to_string()
    }
}

/// String like "A♠" (Unicode) or "As" (ASCII).
pub fn format_card(card: &Card) -> String {
    format!("{}{}", card.rank.symbol(), format_suit(card.suit))
}

/// Cards in bracket notation, e.g. `[A♠ K♥ Q♦]`.
pub fn format_hand(cards: &[Card]) -> String {
    let formatted: Vec<String> = cards.iter().map(format_card).collect();
    format!("[{}]", formatted.join(" "))
}

/// Cards labelled with their positions for the discard prompt,
/// e.g. `0:A♠ 1:K♥`.
pub fn format_hand_indexed(cards: &[Card]) -> String {
    cards
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{}:{}", i, format_card(c)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// The options line shown with a betting prompt.
///
/// ```rust
/// use drawpoker_engine::player::Player;
/// use drawpoker_engine::rules::legal_actions;
/// # use drawpoker_cli::formatters::format_legal;
///
/// let p = Player::new(0, "Ann", 1000, true);
/// assert_eq!(
///     format_legal(&legal_actions(&p, 50, 50)),
///     "[f]old, [c]all 50, [r]aise 100-1000, [q]uit"
/// );
/// ```
pub fn format_legal(legal: &LegalActions) -> String {
    let mut options = vec!["[f]old".to_string()];
    if legal.can_check {
        options.push("chec[k]".to_string());
    }
    if let Some(call) = legal.call {
        options.push(format!("[c]all {}", call));
    }
    if let Some(bounds) = legal.raise {
        options.push(format!(
            "[r]aise {}-{}",
            bounds.min_total, bounds.max_total
        ));
    }
    options.push("[q]uit".to_string());
    options.join(", ")
}

/// One line of the action log, e.g. `Bot Eve raises 100`.
pub fn format_action_record(name: &str, record: &ActionRecord) -> String {
    match record.action {
        ActionKind::Blind => format!("{} posts blind {}", name, record.amount),
        ActionKind::Fold => format!("{} folds", name),
        ActionKind::Check => format!("{} checks", name),
        ActionKind::Call => format!("{} calls {}", name, record.amount),
        ActionKind::Raise => format!("{} raises {}", name, record.amount),
    }
}
