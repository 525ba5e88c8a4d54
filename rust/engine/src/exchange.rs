use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::betting::MAX_REJECTIONS;
use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::player::{Player, PlayerId, HAND_SIZE};
use crate::source::ActionSource;

/// Most cards a player may exchange in one draw.
pub const MAX_DISCARDS: usize = 4;

/// Audit data of one exchange phase, keyed by player id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExchangeOutcome {
    pub discards: BTreeMap<PlayerId, Vec<Card>>,
    pub final_hands: BTreeMap<PlayerId, Vec<Card>>,
}

/// Checks a discard selection: at most four distinct positions, each within
/// the hand.
pub fn validate_selection(indices: &[usize], hand_len: usize) -> Result<(), GameError> {
    if indices.len() > MAX_DISCARDS {
        return Err(GameError::InvalidSelection(format!(
            "at most {MAX_DISCARDS} cards may be exchanged, got {}",
            indices.len()
        )));
    }
    let mut seen = [false; HAND_SIZE];
    for &i in indices {
        if i >= hand_len || i >= HAND_SIZE {
            return Err(GameError::InvalidSelection(format!(
                "card index {i} out of range 0-{}",
                hand_len.min(HAND_SIZE).saturating_sub(1)
            )));
        }
        if seen[i] {
            return Err(GameError::InvalidSelection(format!(
                "card index {i} selected twice"
            )));
        }
        seen[i] = true;
    }
    Ok(())
}

/// Replaces the cards at `indices` with fresh cards from the deck.
///
/// Cards are removed from the highest index down so remaining positions do
/// not shift under the loop; each goes to the bottom of the discard pile and
/// a replacement is drawn for it. Returns the discarded cards in selection
/// order. The hand and deck are untouched if the selection is invalid or the
/// deck cannot supply every replacement.
pub fn exchange_cards(
    player: &mut Player,
    deck: &mut Deck,
    indices: &[usize],
) -> Result<Vec<Card>, GameError> {
    validate_selection(indices, player.hand().len())?;
    if deck.remaining() < indices.len() {
        return Err(GameError::DeckExhausted {
            needed: indices.len(),
            remaining: deck.remaining(),
        });
    }
    let discarded: Vec<Card> = indices.iter().map(|&i| player.hand()[i]).collect();

    let mut descending = indices.to_vec();
    descending.sort_unstable_by(|a, b| b.cmp(a));
    for idx in descending {
        let card = player.remove_card(idx)?;
        deck.discard_to_bottom(card);
    }
    for _ in indices {
        player.take_card(deck.draw_one()?);
    }
    Ok(discarded)
}

/// Lets every active player, in seating order, exchange up to four cards.
pub fn run_exchange_phase(
    players: &mut [Player],
    sources: &mut [Box<dyn ActionSource + '_>],
    deck: &mut Deck,
) -> Result<ExchangeOutcome, GameError> {
    let mut outcome = ExchangeOutcome::default();
    for (player, source) in players.iter_mut().zip(sources.iter_mut()) {
        if !player.is_active() {
            continue;
        }
        let discarded = exchange_with_retries(player, source.as_mut(), deck)?;
        debug!(
            player = player.id(),
            exchanged = discarded.len(),
            "exchange"
        );
        outcome.discards.insert(player.id(), discarded);
    }
    outcome.final_hands = players
        .iter()
        .filter(|p| p.is_active())
        .map(|p| (p.id(), p.hand().to_vec()))
        .collect();
    Ok(outcome)
}

fn exchange_with_retries(
    player: &mut Player,
    source: &mut (dyn ActionSource + '_),
    deck: &mut Deck,
) -> Result<Vec<Card>, GameError> {
    let mut last_error = None;
    for _ in 0..MAX_REJECTIONS {
        let indices = source.select_discards(player)?;
        match exchange_cards(player, deck, &indices) {
            Ok(discarded) => return Ok(discarded),
            Err(e) if e.is_recoverable() => {
                warn!(player = player.id(), error = %e, "discard selection rejected");
                source.rejected(player, &e);
                last_error = Some(e);
            }
            Err(e) => return Err(e),
        }
    }
    Err(last_error.unwrap_or_else(|| GameError::InvalidSelection("no selection".into())))
}
