use crate::errors::GameError;
use crate::player::{Player, PlayerId};

/// The single pot of one hand. Only grows until it is paid out.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Pot {
    total: u32,
}

impl Pot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    /// Moves `amount` from the player's stack into the pot. The debit, the
    /// street commitment and the credit are applied together or not at all.
    pub fn collect_from(&mut self, player: &mut Player, amount: u32) -> Result<(), GameError> {
        let next = self
            .total
            .checked_add(amount)
            .ok_or_else(|| GameError::InvalidAction(format!("pot overflow adding {amount}")))?;
        if amount > player.stack() {
            return Err(GameError::InsufficientFunds {
                needed: amount,
                available: player.stack(),
            });
        }
        player.commit(amount)?;
        self.total = next;
        Ok(())
    }

    /// Empties the pot into shares for `winners`, which must already be in
    /// payout order. Odd chips go one each to the earliest winners.
    pub fn split(&mut self, winners: &[PlayerId]) -> Vec<(PlayerId, u32)> {
        if winners.is_empty() {
            return Vec::new();
        }
        let count = winners.len() as u32;
        let share = self.total / count;
        let mut odd = self.total % count;
        self.total = 0;
        winners
            .iter()
            .map(|&id| {
                let bonus = if odd > 0 {
                    odd -= 1;
                    1
                } else {
                    0
                };
                (id, share + bonus)
            })
            .collect()
    }
}
