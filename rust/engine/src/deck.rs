use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::debug;

use crate::cards::{full_deck, Card};
use crate::errors::GameError;
use crate::player::Player;

/// One hand's deck: an undealt sequence (front is the next card) and a
/// discard sink. Discards never return to the undealt sequence.
#[derive(Debug)]
pub struct Deck {
    undealt: VecDeque<Card>,
    discarded: Vec<Card>,
    rng: ChaCha20Rng,
}

impl Deck {
    pub fn new_with_seed(seed: u64) -> Self {
        // Keep initial order until shuffle is called explicitly
        Self {
            undealt: full_deck().into(),
            discarded: Vec::new(),
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Randomizes the order of the undealt cards.
    pub fn shuffle(&mut self) {
        self.undealt.make_contiguous().shuffle(&mut self.rng);
    }

    /// Deals `n` rounds, one card per active player per round in seating
    /// order. Fails up front, dealing nothing, if the deck cannot cover every
    /// active player.
    pub fn deal(&mut self, players: &mut [Player], n: usize) -> Result<(), GameError> {
        let needed = n * players.iter().filter(|p| p.is_active()).count();
        if needed > self.undealt.len() {
            return Err(GameError::DeckExhausted {
                needed,
                remaining: self.undealt.len(),
            });
        }
        for _ in 0..n {
            for p in players.iter_mut().filter(|p| p.is_active()) {
                p.take_card(self.draw_one()?);
            }
        }
        debug!(cards = needed, remaining = self.undealt.len(), "dealt");
        Ok(())
    }

    pub fn draw_one(&mut self) -> Result<Card, GameError> {
        self.undealt.pop_front().ok_or(GameError::DeckExhausted {
            needed: 1,
            remaining: 0,
        })
    }

    pub fn discard_to_bottom(&mut self, card: Card) {
        self.discarded.push(card);
    }

    pub fn undealt(&self) -> impl Iterator<Item = &Card> {
        self.undealt.iter()
    }

    pub fn discarded(&self) -> &[Card] {
        &self.discarded
    }

    pub fn remaining(&self) -> usize {
        self.undealt.len()
    }
}
