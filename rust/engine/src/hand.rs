use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::GameError;
use crate::player::HAND_SIZE;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::HighCard => "high card",
            Category::OnePair => "one pair",
            Category::TwoPair => "two pair",
            Category::ThreeOfAKind => "three of a kind",
            Category::Straight => "straight",
            Category::Flush => "flush",
            Category::FullHouse => "full house",
            Category::FourOfAKind => "four of a kind",
            Category::StraightFlush => "straight flush",
            Category::RoyalFlush => "royal flush",
        }
    }
}

/// Totally ordered strength of a five-card hand. Field order matters: the
/// derived `Ord` compares the category first, then the kickers high to low.
/// Unused kicker slots are zero.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct HandRank {
    pub category: Category,
    pub kickers: [u8; 5],
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let used: Vec<String> = self
            .kickers
            .iter()
            .take_while(|&&k| k != 0)
            .map(|k| k.to_string())
            .collect();
        if used.is_empty() {
            write!(f, "{}", self.category.label())
        } else {
            write!(f, "{} ({})", self.category.label(), used.join(", "))
        }
    }
}

/// Ranks exactly five cards. Duplicate detection is left to the deck.
pub fn evaluate_hand(cards: &[Card]) -> Result<HandRank, GameError> {
    if cards.len() != HAND_SIZE {
        return Err(GameError::InvalidHand(cards.len()));
    }

    let mut values: Vec<u8> = cards.iter().map(Card::value).collect();
    values.sort_unstable_by(|a, b| b.cmp(a));

    let is_flush = cards.iter().all(|c| c.suit == cards[0].suit);
    let straight_high = straight_high(&values);

    if let Some(high) = straight_high {
        if is_flush {
            return Ok(if high == 14 {
                rank(Category::RoyalFlush, &[])
            } else {
                rank(Category::StraightFlush, &[high])
            });
        }
    }

    let groups = group_by_count(&values);
    let shape: Vec<u8> = groups.iter().map(|&(count, _)| count).collect();
    let ordered: Vec<u8> = groups.iter().map(|&(_, v)| v).collect();

    let hand = match (shape.as_slice(), straight_high) {
        ([4, 1], _) => rank(Category::FourOfAKind, &ordered),
        ([3, 2], _) => rank(Category::FullHouse, &ordered),
        _ if is_flush => rank(Category::Flush, &values),
        (_, Some(high)) => rank(Category::Straight, &[high]),
        ([3, 1, 1], _) => rank(Category::ThreeOfAKind, &ordered),
        ([2, 2, 1], _) => rank(Category::TwoPair, &ordered),
        ([2, 1, 1, 1], _) => rank(Category::OnePair, &ordered),
        _ => rank(Category::HighCard, &values),
    };
    Ok(hand)
}

pub fn compare_hands(a: &HandRank, b: &HandRank) -> Ordering {
    a.cmp(b)
}

fn rank(category: Category, tiebreak: &[u8]) -> HandRank {
    let mut kickers = [0u8; 5];
    for (slot, v) in kickers.iter_mut().zip(tiebreak) {
        *slot = *v;
    }
    HandRank { category, kickers }
}

/// Top card of a straight in `desc` (values sorted high to low), with the
/// wheel A-5-4-3-2 playing the ace low.
fn straight_high(desc: &[u8]) -> Option<u8> {
    if *desc == [14, 5, 4, 3, 2] {
        return Some(5);
    }
    let distinct = desc.windows(2).all(|w| w[0] != w[1]);
    if distinct && desc[0] - desc[desc.len() - 1] == 4 {
        Some(desc[0])
    } else {
        None
    }
}

/// `(count, value)` pairs ordered by count, then value, both descending.
fn group_by_count(desc: &[u8]) -> Vec<(u8, u8)> {
    let mut groups: Vec<(u8, u8)> = Vec::with_capacity(desc.len());
    for &v in desc {
        match groups.iter_mut().find(|(_, g)| *g == v) {
            Some((count, _)) => *count += 1,
            None => groups.push((1, v)),
        }
    }
    groups.sort_unstable_by(|a, b| b.cmp(a));
    groups
}
