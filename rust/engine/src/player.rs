use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::GameError;

/// Identifier assigned in seating order when a game is created. Kept across
/// resumes and never reused within a game.
pub type PlayerId = usize;

/// Number of cards in a dealt five-card-draw hand.
pub const HAND_SIZE: usize = 5;

/// A decision returned by an action source. Amounts are the chips this
/// action moves from the player's stack into the pot.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Leave the hand
    Fold,
    /// Pass without adding chips; only legal when nothing is owed
    Check,
    /// Match the current bet (or as much of it as the stack allows)
    Call(u32),
    /// Add chips so that the total commitment exceeds the current bet
    Raise(u32),
}

impl PlayerAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            PlayerAction::Fold => ActionKind::Fold,
            PlayerAction::Check => ActionKind::Check,
            PlayerAction::Call(_) => ActionKind::Call,
            PlayerAction::Raise(_) => ActionKind::Raise,
        }
    }

    pub fn amount(&self) -> u32 {
        match self {
            PlayerAction::Fold | PlayerAction::Check => 0,
            PlayerAction::Call(a) | PlayerAction::Raise(a) => *a,
        }
    }
}

/// Action kind as written to the event record.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Blind,
    Fold,
    Check,
    Call,
    Raise,
}

/// Per-seat state. Persists across hands; hand, activity and street
/// commitment are reset by [`Player::reset_for_hand`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    id: PlayerId,
    name: String,
    stack: u32,
    hand: Vec<Card>,
    is_human: bool,
    is_active: bool,
    bet_in_round: u32,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, stack: u32, is_human: bool) -> Self {
        Self {
            id,
            name: name.into(),
            stack,
            hand: Vec::with_capacity(HAND_SIZE),
            is_human,
            is_active: true,
            bet_in_round: 0,
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn stack(&self) -> u32 {
        self.stack
    }
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }
    pub fn is_human(&self) -> bool {
        self.is_human
    }
    pub fn is_active(&self) -> bool {
        self.is_active
    }
    pub fn bet_in_round(&self) -> u32 {
        self.bet_in_round
    }

    /// Active and holding chips, i.e. still able to take a betting turn.
    pub fn can_act(&self) -> bool {
        self.is_active && self.stack > 0
    }

    /// Chips still owed to match `current_bet`.
    pub fn to_call(&self, current_bet: u32) -> u32 {
        current_bet.saturating_sub(self.bet_in_round)
    }

    /// Applies a signed change to the stack. A change that would take the
    /// stack below zero is rejected and leaves the stack untouched.
    pub fn adjust_stack(&mut self, delta: i64) -> Result<u32, GameError> {
        let next = i64::from(self.stack) + delta;
        if next < 0 {
            return Err(GameError::NegativeStack {
                player: self.id,
                stack: self.stack,
                delta,
            });
        }
        self.stack = u32::try_from(next)
            .map_err(|_| GameError::InvalidAction(format!("stack overflow for {}", self.id)))?;
        Ok(self.stack)
    }

    /// Moves `amount` from the stack into this street's commitment.
    pub(crate) fn commit(&mut self, amount: u32) -> Result<(), GameError> {
        self.adjust_stack(-i64::from(amount))?;
        self.bet_in_round += amount;
        Ok(())
    }

    pub fn take_card(&mut self, c: Card) {
        self.hand.push(c);
    }

    /// Removes the card at `idx`, shifting later cards left.
    pub(crate) fn remove_card(&mut self, idx: usize) -> Result<Card, GameError> {
        if idx >= self.hand.len() {
            return Err(GameError::InvalidSelection(format!(
                "card index {idx} out of range"
            )));
        }
        Ok(self.hand.remove(idx))
    }

    pub fn fold(&mut self) {
        self.is_active = false;
    }

    /// Puts the stack back to a value saved before an abandoned hand.
    pub(crate) fn restore_stack(&mut self, stack: u32) {
        self.stack = stack;
    }

    pub(crate) fn reset_bet(&mut self) {
        self.bet_in_round = 0;
    }

    pub fn reset_for_hand(&mut self) {
        self.hand.clear();
        self.is_active = true;
        self.bet_in_round = 0;
    }
}

/// Seat description used to create players for a new game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSpec {
    pub name: String,
    pub stack: u32,
    pub is_human: bool,
}

/// Creates players in seating order; ids follow the order of `specs`.
pub fn create_players(specs: &[PlayerSpec]) -> Vec<Player> {
    specs
        .iter()
        .enumerate()
        .map(|(id, s)| Player::new(id, s.name.clone(), s.stack, s.is_human))
        .collect()
}
