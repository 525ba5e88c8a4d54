use thiserror::Error;

use crate::player::PlayerId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid action: {0}")]
    InvalidAction(String),
    #[error("Insufficient funds: needs {needed}, has {available}")]
    InsufficientFunds { needed: u32, available: u32 },
    #[error("Deck exhausted: needed {needed} card(s), {remaining} left")]
    DeckExhausted { needed: usize, remaining: usize },
    #[error("Invalid hand: expected 5 cards, got {0}")]
    InvalidHand(usize),
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),
    #[error("Stack of player {player} cannot go below zero (stack {stack}, change {delta})")]
    NegativeStack {
        player: PlayerId,
        stack: u32,
        delta: i64,
    },
    #[error("Not enough players: {0} seated, at least 2 required")]
    NotEnoughPlayers(usize),
    #[error("Action source unavailable: {0}")]
    SourceUnavailable(String),
}

impl GameError {
    /// Errors that the action source may correct by choosing again.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GameError::InvalidAction(_)
                | GameError::InsufficientFunds { .. }
                | GameError::InvalidSelection(_)
        )
    }
}
