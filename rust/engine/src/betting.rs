//! Resolution of one betting street.
//!
//! The resolver keeps its own turn bookkeeping: a countdown of players still
//! owed a turn and a per-seat flag recording who acted since the last raise.
//! A raise reopens the action for every other player able to bet. The street
//! closes once the countdown is exhausted and every active player who still
//! holds chips has matched the current bet, or as soon as at most one player
//! remains in the hand.

use tracing::{debug, warn};

use crate::errors::GameError;
use crate::logger::{ActionRecord, Stage};
use crate::player::{ActionKind, Player};
use crate::pot::Pot;
use crate::rules::{legal_actions, validate_action, ValidatedAction};
use crate::source::{ActionSource, DecisionContext};

/// Consecutive refused decisions tolerated from one source before the
/// refusal is returned to the caller.
pub const MAX_REJECTIONS: usize = 8;

#[derive(Debug, Clone)]
pub struct BettingRound {
    stage: Stage,
    current_bet: u32,
    big_blind: u32,
    start: usize,
    owed: usize,
    acted: Vec<bool>,
}

impl BettingRound {
    /// First street: the blinds stand, the big blind is the bet to match and
    /// action opens three seats after the dealer.
    pub fn pre_exchange(seats: usize, dealer: usize, big_blind: u32) -> Self {
        Self::new(Stage::PreExchange, seats, (dealer + 3) % seats, big_blind, big_blind)
    }

    /// Second street: nothing is bet yet and action opens left of the dealer.
    pub fn post_exchange(seats: usize, dealer: usize, big_blind: u32) -> Self {
        Self::new(Stage::PostExchange, seats, (dealer + 1) % seats, 0, big_blind)
    }

    fn new(stage: Stage, seats: usize, start: usize, current_bet: u32, big_blind: u32) -> Self {
        Self {
            stage,
            current_bet,
            big_blind,
            start,
            owed: 0,
            acted: vec![false; seats],
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }
    pub fn current_bet(&self) -> u32 {
        self.current_bet
    }
    pub fn start(&self) -> usize {
        self.start
    }
    /// Players still owed a turn before the street can close.
    pub fn owed(&self) -> usize {
        self.owed
    }
    pub fn has_acted(&self, seat: usize) -> bool {
        self.acted.get(seat).copied().unwrap_or(false)
    }

    /// Drives the street to closure. The post-exchange street starts by
    /// clearing every player's street commitment.
    pub fn run(
        &mut self,
        players: &mut [Player],
        sources: &mut [Box<dyn ActionSource + '_>],
        pot: &mut Pot,
        log: &mut Vec<ActionRecord>,
    ) -> Result<(), GameError> {
        let seats = players.len();
        if sources.len() != seats {
            return Err(GameError::InvalidAction(format!(
                "{} action sources for {} seats",
                sources.len(),
                seats
            )));
        }
        if self.stage == Stage::PostExchange {
            players.iter_mut().for_each(Player::reset_bet);
        }
        if active_count(players) <= 1 {
            return Ok(());
        }

        self.acted = vec![false; seats];
        self.owed = players.iter().filter(|p| p.can_act()).count();
        let mut seat = self.start;

        while self.owed > 0 {
            if active_count(players) <= 1 || !players.iter().any(Player::can_act) {
                break;
            }
            if players[seat].can_act() {
                let action = self.obtain(&players[seat], sources[seat].as_mut(), pot.total())?;
                self.apply(seat, action, players, pot, log)?;
            }
            seat = (seat + 1) % seats;

            if self.owed == 0 && !self.bets_equalized(players) {
                self.owed = players
                    .iter()
                    .filter(|p| p.can_act() && p.bet_in_round() < self.current_bet)
                    .count();
            }
        }
        debug!(
            stage = self.stage.as_str(),
            current_bet = self.current_bet,
            pot = pot.total(),
            "street closed"
        );
        Ok(())
    }

    /// True once every active player who can still bet matches the current
    /// bet. Players with an empty stack stand on what they committed.
    pub fn bets_equalized(&self, players: &[Player]) -> bool {
        players
            .iter()
            .filter(|p| p.can_act())
            .all(|p| p.bet_in_round() == self.current_bet)
    }

    fn obtain(
        &self,
        player: &Player,
        source: &mut (dyn ActionSource + '_),
        pot: u32,
    ) -> Result<ValidatedAction, GameError> {
        let ctx = DecisionContext {
            player,
            stage: self.stage,
            current_bet: self.current_bet,
            big_blind: self.big_blind,
            pot,
            legal: legal_actions(player, self.current_bet, self.big_blind),
        };
        let mut last_error = None;
        for _ in 0..MAX_REJECTIONS {
            let action = source.decide(&ctx)?;
            match validate_action(player, self.current_bet, self.big_blind, action) {
                Ok(valid) => return Ok(valid),
                Err(e) if e.is_recoverable() => {
                    warn!(player = player.id(), source = source.name(), error = %e, "decision rejected");
                    source.rejected(player, &e);
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }
        Err(last_error.unwrap_or_else(|| GameError::InvalidAction("no decision".into())))
    }

    fn apply(
        &mut self,
        seat: usize,
        action: ValidatedAction,
        players: &mut [Player],
        pot: &mut Pot,
        log: &mut Vec<ActionRecord>,
    ) -> Result<(), GameError> {
        let player = &mut players[seat];
        let kind = match action {
            ValidatedAction::Fold => {
                player.fold();
                ActionKind::Fold
            }
            ValidatedAction::Check => ActionKind::Check,
            ValidatedAction::Call(amount) => {
                pot.collect_from(player, amount)?;
                ActionKind::Call
            }
            ValidatedAction::Raise { amount, to } => {
                pot.collect_from(player, amount)?;
                self.current_bet = to;
                ActionKind::Raise
            }
        };
        let player_id = player.id();
        debug!(
            stage = self.stage.as_str(),
            player = player_id,
            action = ?kind,
            amount = action.amount(),
            pot = pot.total(),
            "betting action"
        );
        log.push(ActionRecord {
            stage: self.stage,
            player_id,
            action: kind,
            amount: action.amount(),
        });

        if let ValidatedAction::Raise { .. } = action {
            self.acted.iter_mut().for_each(|a| *a = false);
            self.acted[seat] = true;
            self.owed = players
                .iter()
                .enumerate()
                .filter(|(i, p)| *i != seat && p.can_act())
                .count();
        } else {
            self.acted[seat] = true;
            self.owed = self.owed.saturating_sub(1);
        }
        Ok(())
    }
}

fn active_count(players: &[Player]) -> usize {
    players.iter().filter(|p| p.is_active()).count()
}
