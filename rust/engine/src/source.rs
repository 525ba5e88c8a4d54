//! The boundary through which players make decisions.
//!
//! Every seat is driven by one [`ActionSource`]. Automated policies answer
//! synchronously; an interactive source may block while it waits for a
//! person. The engine never mutates hand state while a decision is pending.

use std::collections::VecDeque;

use crate::errors::GameError;
use crate::logger::Stage;
use crate::player::{Player, PlayerAction};
use crate::rules::LegalActions;

/// Everything a source may look at when choosing a betting action.
#[derive(Debug, Clone, Copy)]
pub struct DecisionContext<'a> {
    pub player: &'a Player,
    pub stage: Stage,
    pub current_bet: u32,
    pub big_blind: u32,
    pub pot: u32,
    pub legal: LegalActions,
}

pub trait ActionSource {
    /// Chooses a betting action. `Err` means no decision can be produced
    /// at all (for example the input stream closed).
    fn decide(&mut self, ctx: &DecisionContext<'_>) -> Result<PlayerAction, GameError>;

    /// Chooses hand positions (0-4) to exchange; empty to stand pat.
    fn select_discards(&mut self, player: &Player) -> Result<Vec<usize>, GameError>;

    /// Called when the last decision was refused; the source is asked again.
    fn rejected(&mut self, _player: &Player, _error: &GameError) {}

    fn name(&self) -> &str;
}

/// Replays fixed decisions in order. Falls back to check-or-call and
/// standing pat once the script runs out.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    actions: VecDeque<PlayerAction>,
    discards: VecDeque<Vec<usize>>,
    rejections: Vec<GameError>,
}

impl ScriptedSource {
    pub fn new(actions: Vec<PlayerAction>) -> Self {
        Self {
            actions: actions.into(),
            ..Self::default()
        }
    }

    pub fn with_discards(mut self, discards: Vec<Vec<usize>>) -> Self {
        self.discards = discards.into();
        self
    }

    pub fn rejections(&self) -> &[GameError] {
        &self.rejections
    }
}

impl ActionSource for ScriptedSource {
    fn decide(&mut self, ctx: &DecisionContext<'_>) -> Result<PlayerAction, GameError> {
        Ok(self
            .actions
            .pop_front()
            .unwrap_or_else(|| match ctx.legal.call {
                Some(amount) => PlayerAction::Call(amount),
                None => PlayerAction::Check,
            }))
    }

    fn select_discards(&mut self, _player: &Player) -> Result<Vec<usize>, GameError> {
        Ok(self.discards.pop_front().unwrap_or_default())
    }

    fn rejected(&mut self, _player: &Player, error: &GameError) {
        self.rejections.push(error.clone());
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
