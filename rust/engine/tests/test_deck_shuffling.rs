use std::collections::HashSet;

use drawpoker_engine::cards::{full_deck, Card};
use drawpoker_engine::deck::Deck;
use drawpoker_engine::errors::GameError;
use drawpoker_engine::exchange::exchange_cards;
use drawpoker_engine::player::Player;

fn assert_partition(deck: &Deck, players: &[Player]) {
    let mut seen: HashSet<Card> = HashSet::new();
    let all = deck
        .undealt()
        .chain(deck.discarded())
        .chain(players.iter().flat_map(|p| p.hand()));
    for c in all {
        assert!(seen.insert(*c), "card {c} appears twice");
    }
    let expected: HashSet<Card> = full_deck().into_iter().collect();
    assert_eq!(seen, expected);
}

#[test]
fn shuffle_is_deterministic_with_same_seed() {
    let mut d1 = Deck::new_with_seed(12345);
    let mut d2 = Deck::new_with_seed(12345);
    d1.shuffle();
    d2.shuffle();
    assert!(d1.undealt().eq(d2.undealt()));

    let mut d3 = Deck::new_with_seed(54321);
    d3.shuffle();
    assert!(!d1.undealt().eq(d3.undealt()));
}

#[test]
fn deal_is_round_robin() {
    let mut deck = Deck::new_with_seed(7);
    deck.shuffle();
    let order: Vec<Card> = deck.undealt().copied().collect();
    let mut players: Vec<Player> = (0..3).map(|i| Player::new(i, format!("P{i}"), 100, false)).collect();
    deck.deal(&mut players, 5).unwrap();

    for (seat, p) in players.iter().enumerate() {
        let expected: Vec<Card> = (0..5).map(|round| order[round * 3 + seat]).collect();
        assert_eq!(p.hand(), expected.as_slice());
    }
    assert_eq!(deck.remaining(), 52 - 15);
}

#[test]
fn cards_are_conserved_through_deal_and_exchange() {
    let mut deck = Deck::new_with_seed(2024);
    deck.shuffle();
    let mut players: Vec<Player> = (0..4).map(|i| Player::new(i, format!("P{i}"), 100, false)).collect();
    assert_partition(&deck, &players);

    deck.deal(&mut players, 5).unwrap();
    assert_partition(&deck, &players);

    let selections: [&[usize]; 4] = [&[0, 1, 2, 3], &[], &[4], &[2, 0]];
    for (p, sel) in players.iter_mut().zip(selections) {
        exchange_cards(p, &mut deck, sel).unwrap();
        assert_eq!(p.hand().len(), 5);
    }
    assert_eq!(deck.discarded().len(), 7);
    assert_partition(&deck, &players);
}

#[test]
fn oversized_deal_fails_without_dealing() {
    let mut deck = Deck::new_with_seed(1);
    let mut players: Vec<Player> = (0..11).map(|i| Player::new(i, format!("P{i}"), 100, false)).collect();
    let err = deck.deal(&mut players, 5).unwrap_err();
    assert_eq!(
        err,
        GameError::DeckExhausted {
            needed: 55,
            remaining: 52
        }
    );
    assert_eq!(deck.remaining(), 52);
    assert!(players.iter().all(|p| p.hand().is_empty()));
}
