use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::player::{Player, PlayerAction as A};

/// An action that passed validation against the current street.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidatedAction {
    Fold,
    Check,
    Call(u32),
    /// `amount` leaves the stack, `to` is the new total commitment.
    Raise { amount: u32, to: u32 },
}

impl ValidatedAction {
    pub fn amount(&self) -> u32 {
        match self {
            ValidatedAction::Fold | ValidatedAction::Check => 0,
            ValidatedAction::Call(a) => *a,
            ValidatedAction::Raise { amount, .. } => *amount,
        }
    }
}

/// Inclusive range of legal raise totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaiseBounds {
    pub min_total: u32,
    pub max_total: u32,
}

impl RaiseBounds {
    pub fn contains(&self, total: u32) -> bool {
        (self.min_total..=self.max_total).contains(&total)
    }
}

/// The action set open to one player. Fold is always legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalActions {
    pub to_call: u32,
    pub can_check: bool,
    /// Exact chips a call moves, present iff something is owed.
    pub call: Option<u32>,
    pub raise: Option<RaiseBounds>,
}

/// Smallest legal raise increment: the current bet when one stands,
/// otherwise the big blind.
pub fn min_raise_increment(current_bet: u32, big_blind: u32) -> u32 {
    if current_bet > 0 {
        current_bet
    } else {
        big_blind
    }
}

pub fn legal_actions(player: &Player, current_bet: u32, big_blind: u32) -> LegalActions {
    let to_call = player.to_call(current_bet);
    let stack = player.stack();
    let raise = if stack > to_call {
        let bounds = RaiseBounds {
            min_total: current_bet + min_raise_increment(current_bet, big_blind),
            max_total: stack + player.bet_in_round(),
        };
        (bounds.min_total <= bounds.max_total).then_some(bounds)
    } else {
        None
    };
    LegalActions {
        to_call,
        can_check: to_call == 0,
        call: (to_call > 0).then(|| to_call.min(stack)),
        raise,
    }
}

/// Validates a decision against the street state. Nothing is coerced:
/// an amount that differs from what the action requires is an error.
///
/// # Errors
///
/// - [`GameError::InvalidAction`] for an action not open to the player or a
///   raise below the minimum total
/// - [`GameError::InsufficientFunds`] when the amount exceeds the stack
///
/// # Examples
///
/// ```
/// use drawpoker_engine::player::{Player, PlayerAction};
/// use drawpoker_engine::rules::{validate_action, ValidatedAction};
///
/// let p = Player::new(0, "Ann", 1000, false);
/// let v = validate_action(&p, 50, 50, PlayerAction::Call(50)).unwrap();
/// assert_eq!(v, ValidatedAction::Call(50));
/// assert!(validate_action(&p, 50, 50, PlayerAction::Check).is_err());
/// ```
pub fn validate_action(
    player: &Player,
    current_bet: u32,
    big_blind: u32,
    action: A,
) -> Result<ValidatedAction, GameError> {
    let to_call = player.to_call(current_bet);
    let stack = player.stack();
    match action {
        A::Fold => Ok(ValidatedAction::Fold),
        A::Check => {
            if to_call == 0 {
                Ok(ValidatedAction::Check)
            } else {
                Err(GameError::InvalidAction(format!(
                    "cannot check while {to_call} is owed"
                )))
            }
        }
        A::Call(amount) => {
            if to_call == 0 {
                return Err(GameError::InvalidAction("nothing to call".into()));
            }
            if amount > stack {
                return Err(GameError::InsufficientFunds {
                    needed: amount,
                    available: stack,
                });
            }
            let expected = to_call.min(stack);
            if amount != expected {
                return Err(GameError::InvalidAction(format!(
                    "call must be exactly {expected}, got {amount}"
                )));
            }
            Ok(ValidatedAction::Call(amount))
        }
        A::Raise(amount) => {
            if stack <= to_call {
                return Err(GameError::InvalidAction(
                    "stack does not cover more than a call".into(),
                ));
            }
            if amount > stack {
                return Err(GameError::InsufficientFunds {
                    needed: amount,
                    available: stack,
                });
            }
            let to = player.bet_in_round() + amount;
            let minimum = current_bet + min_raise_increment(current_bet, big_blind);
            if to < minimum {
                return Err(GameError::InvalidAction(format!(
                    "raise to {to} is below the minimum of {minimum}"
                )));
            }
            Ok(ValidatedAction::Raise { amount, to })
        }
    }
}
