//! The default table bot.
//!
//! Facing a bet it calls 80% of the time when its stack covers the call and
//! folds otherwise. With nothing to call it checks 70% of the time, and
//! always when its stack is no bigger than the big blind; the remaining
//! decisions raise to twice the big blind if that is affordable and legal.
//! At the draw it keeps any made hand and redraws one to four random
//! positions of a high-card hand.

use drawpoker_engine::errors::GameError;
use drawpoker_engine::hand::{Category, evaluate_hand};
use drawpoker_engine::player::{Player, PlayerAction};
use drawpoker_engine::source::{ActionSource, DecisionContext};
use rand::seq::index::sample;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::debug;

const CALL_PROBABILITY: f64 = 0.8;
const CHECK_PROBABILITY: f64 = 0.7;
const MAX_REDRAW: usize = 4;

#[derive(Debug, Clone)]
pub struct RandomDrawBot {
    rng: ChaCha20Rng,
}

impl RandomDrawBot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    fn facing_bet(&mut self, player: &Player, to_call: u32) -> PlayerAction {
        if self.rng.random_bool(CALL_PROBABILITY) && player.stack() >= to_call {
            PlayerAction::Call(to_call)
        } else {
            PlayerAction::Fold
        }
    }

    fn unopened(&mut self, ctx: &DecisionContext<'_>) -> PlayerAction {
        let player = ctx.player;
        if self.rng.random_bool(CHECK_PROBABILITY) || player.stack() <= ctx.big_blind {
            return PlayerAction::Check;
        }
        let target = ctx.big_blind * 2;
        let amount = target.saturating_sub(player.bet_in_round());
        let legal = ctx.legal.raise.is_some_and(|b| b.contains(target));
        if legal && player.stack() > amount {
            PlayerAction::Raise(amount)
        } else {
            PlayerAction::Check
        }
    }
}

impl ActionSource for RandomDrawBot {
    fn decide(&mut self, ctx: &DecisionContext<'_>) -> Result<PlayerAction, GameError> {
        let to_call = ctx.legal.to_call;
        let action = if to_call > 0 {
            self.facing_bet(ctx.player, to_call)
        } else {
            self.unopened(ctx)
        };
        debug!(player = ctx.player.id(), ?action, "random-draw decision");
        Ok(action)
    }

    fn select_discards(&mut self, player: &Player) -> Result<Vec<usize>, GameError> {
        let rank = evaluate_hand(player.hand())?;
        if rank.category > Category::HighCard {
            return Ok(Vec::new());
        }
        let count = self.rng.random_range(1..=MAX_REDRAW);
        Ok(sample(&mut self.rng, player.hand().len(), count).into_vec())
    }

    fn name(&self) -> &str {
        "random-draw"
    }
}
