use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::hand::HandRank;
use crate::player::{ActionKind, PlayerId};

/// Phase of a hand in which an action was taken.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    /// Forced small and big blind posts
    Blinds,
    /// Betting before the card exchange
    PreExchange,
    /// Betting after the card exchange
    PostExchange,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Blinds => "blinds",
            Stage::PreExchange => "pre-exchange",
            Stage::PostExchange => "post-exchange",
        }
    }
}

/// One entry of the action log: blinds and every betting decision.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub stage: Stage,
    pub player_id: PlayerId,
    pub action: ActionKind,
    /// Chips moved into the pot by this action
    pub amount: u32,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct SeatRecord {
    pub id: PlayerId,
    pub name: String,
    pub initial_stack: u32,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct Blinds {
    pub small: u32,
    pub big: u32,
}

/// A hand revealed at showdown together with its evaluated rank.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ShowdownEntry {
    pub player_id: PlayerId,
    pub hand: Vec<Card>,
    pub rank: HandRank,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct Payout {
    pub player_id: PlayerId,
    pub amount: u32,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct FinalStack {
    pub id: PlayerId,
    pub name: String,
    pub final_stack: u32,
}

/// Complete record of one hand, emitted once the pot has been paid out.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandRecord {
    pub game_id: String,
    /// Format: YYYYMMDD-NNNNNN, the sequence being the game's round counter
    pub hand_id: String,
    /// RFC 3339 timestamp of the hand start
    pub ts: String,
    /// Seed of this hand's deck shuffle
    pub deck_seed: u64,
    pub dealer: usize,
    pub players: Vec<SeatRecord>,
    pub blinds: Blinds,
    pub actions: Vec<ActionRecord>,
    /// Undealt order right after the shuffle
    pub deck: Vec<Card>,
    pub initial_hands: BTreeMap<PlayerId, Vec<Card>>,
    /// Present only if the exchange phase ran
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discards: Option<BTreeMap<PlayerId, Vec<Card>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_hands: Option<BTreeMap<PlayerId, Vec<Card>>>,
    /// Present only if hands were revealed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub showdown: Option<Vec<ShowdownEntry>>,
    #[serde(default)]
    pub winners: Vec<Payout>,
    /// Pot size at payout
    pub pot: u32,
    pub final_stacks: Vec<FinalStack>,
}

impl HandRecord {
    pub fn player_name(&self, id: PlayerId) -> Option<&str> {
        self.players
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.name.as_str())
    }
}

pub fn format_hand_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}
