use std::collections::BTreeMap;

use chrono::Utc;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::{debug, info, warn};

use crate::betting::BettingRound;
use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::exchange::run_exchange_phase;
use crate::game::{GameState, SessionSnapshot};
use crate::hand::evaluate_hand;
use crate::logger::{
    format_hand_id, ActionRecord, Blinds, FinalStack, HandRecord, Payout, SeatRecord,
    ShowdownEntry, Stage,
};
use crate::player::{create_players, ActionKind, Player, PlayerId, PlayerSpec, HAND_SIZE};
use crate::pot::Pot;
use crate::source::ActionSource;

/// Most seats a table can hold.
pub const MAX_SEATS: usize = 8;

/// Plays complete hands of five-card draw for one table.
///
/// The engine owns the players and the game state between hands. Action
/// sources are lent per hand, one per seat in seating order.
///
/// # Examples
///
/// ```
/// use drawpoker_engine::engine::Engine;
/// use drawpoker_engine::player::PlayerSpec;
/// use drawpoker_engine::source::{ActionSource, ScriptedSource};
///
/// let specs: Vec<PlayerSpec> = ["Ann", "Bob", "Cid"]
///     .iter()
///     .map(|n| PlayerSpec { name: n.to_string(), stack: 1000, is_human: false })
///     .collect();
/// let mut engine = Engine::new(&specs, 25, 50, Some(7)).unwrap();
/// let mut sources: Vec<Box<dyn ActionSource>> = (0..3)
///     .map(|_| Box::new(ScriptedSource::default()) as Box<dyn ActionSource>)
///     .collect();
///
/// let record = engine.play_hand(&mut sources).unwrap();
/// let total: u32 = engine.players().iter().map(|p| p.stack()).sum();
/// assert_eq!(total, 3000);
/// assert_eq!(record.winners.iter().map(|w| w.amount).sum::<u32>(), record.pot);
/// ```
#[derive(Debug)]
pub struct Engine {
    state: GameState,
    players: Vec<Player>,
    /// Master generator; yields the game id and one deck seed per hand
    rng: ChaCha20Rng,
}

impl Engine {
    pub fn new(
        specs: &[PlayerSpec],
        small_blind: u32,
        big_blind: u32,
        seed: Option<u64>,
    ) -> Result<Self, GameError> {
        check_table(specs.len(), small_blind, big_blind)?;
        let mut rng = master_rng(seed);
        let game_id = uuid::Builder::from_random_bytes(rng.random())
            .into_uuid()
            .to_string();
        Ok(Self {
            state: GameState::new(game_id, small_blind, big_blind),
            players: create_players(specs),
            rng,
        })
    }

    /// Rebuilds an engine from a saved session. Player ids, dealer position
    /// and round counter continue where the snapshot left off.
    pub fn from_snapshot(snapshot: &SessionSnapshot, seed: Option<u64>) -> Result<Self, GameError> {
        check_table(snapshot.players.len(), snapshot.small_blind, snapshot.big_blind)?;
        Ok(Self {
            state: GameState::from_snapshot(snapshot),
            players: snapshot.restore_players()?,
            rng: master_rng(seed),
        })
    }

    pub fn game_id(&self) -> &str {
        self.state.game_id()
    }
    pub fn state(&self) -> &GameState {
        &self.state
    }
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.snapshot(&self.players)
    }

    /// Removes players whose stack is empty. Returns the removed seat
    /// indices, highest first, so callers can drop the matching sources.
    pub fn drop_busted_players(&mut self) -> Vec<usize> {
        let busted: Vec<usize> = self
            .players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.stack() == 0)
            .map(|(seat, _)| seat)
            .rev()
            .collect();
        for &seat in &busted {
            let gone = self.players.remove(seat);
            info!(player = gone.id(), name = gone.name(), "player left the table");
        }
        self.state.clamp_dealer(self.players.len());
        busted
    }

    /// Plays one full hand: blinds, deal, first betting street, exchange,
    /// second street, showdown and payout.
    ///
    /// If the hand cannot be finished (a source becomes unavailable or keeps
    /// refusing), the hand is abandoned: stacks, button, round counter and
    /// deck seeding return to where they were before the call, and the
    /// error is returned.
    pub fn play_hand(
        &mut self,
        sources: &mut [Box<dyn ActionSource + '_>],
    ) -> Result<HandRecord, GameError> {
        let seats = self.players.len();
        let funded = self.players.iter().filter(|p| p.stack() > 0).count();
        if funded < 2 {
            return Err(GameError::NotEnoughPlayers(funded));
        }
        if sources.len() != seats {
            return Err(GameError::InvalidAction(format!(
                "{} action sources for {} seats",
                sources.len(),
                seats
            )));
        }

        let state = self.state.clone();
        let rng = self.rng.clone();
        let stacks: Vec<u32> = self.players.iter().map(Player::stack).collect();
        match self.run_hand(sources) {
            Ok(record) => Ok(record),
            Err(e) => {
                warn!(round = self.state.round_counter(), error = %e, "hand abandoned");
                self.state = state;
                self.rng = rng;
                for (player, stack) in self.players.iter_mut().zip(stacks) {
                    player.restore_stack(stack);
                    player.reset_for_hand();
                }
                Err(e)
            }
        }
    }

    fn run_hand(
        &mut self,
        sources: &mut [Box<dyn ActionSource + '_>],
    ) -> Result<HandRecord, GameError> {
        let seats = self.players.len();
        let round = self.state.next_round();
        let started = Utc::now();
        let hand_id = format_hand_id(&started.format("%Y%m%d").to_string(), round);
        let dealer = self.state.rotate_button(seats);
        let small_blind = self.state.small_blind();
        let big_blind = self.state.big_blind();

        let seat_records: Vec<SeatRecord> = self
            .players
            .iter()
            .map(|p| SeatRecord {
                id: p.id(),
                name: p.name().to_string(),
                initial_stack: p.stack(),
            })
            .collect();
        for p in self.players.iter_mut() {
            p.reset_for_hand();
            // stackless seats sit the hand out
            if p.stack() == 0 {
                p.fold();
            }
        }

        let deck_seed: u64 = self.rng.random();
        let mut deck = Deck::new_with_seed(deck_seed);
        deck.shuffle();
        let deck_order = deck.undealt().copied().collect();
        info!(hand_id = %hand_id, dealer, deck_seed, "hand started");

        let mut pot = Pot::new();
        let mut actions = Vec::new();
        self.post_blind((dealer + 1) % seats, small_blind, &mut pot, &mut actions)?;
        self.post_blind((dealer + 2) % seats, big_blind, &mut pot, &mut actions)?;

        deck.deal(&mut self.players, HAND_SIZE)?;
        let initial_hands = self.active_hands();

        BettingRound::pre_exchange(seats, dealer, big_blind).run(
            &mut self.players,
            sources,
            &mut pot,
            &mut actions,
        )?;

        let mut discards = None;
        let mut final_hands = None;
        if self.players.iter().filter(|p| p.is_active()).count() > 1 {
            let outcome = run_exchange_phase(&mut self.players, sources, &mut deck)?;
            discards = Some(outcome.discards);
            final_hands = Some(outcome.final_hands);
            BettingRound::post_exchange(seats, dealer, big_blind).run(
                &mut self.players,
                sources,
                &mut pot,
                &mut actions,
            )?;
        }

        let pot_total = pot.total();
        let (showdown, winners) = settle(&mut self.players, dealer, &mut pot)?;
        let winner_ids: Vec<PlayerId> = winners.iter().map(|w| w.player_id).collect();

        let final_stacks = self
            .players
            .iter()
            .map(|p| FinalStack {
                id: p.id(),
                name: p.name().to_string(),
                final_stack: p.stack(),
            })
            .collect();
        info!(
            hand_id = %hand_id,
            pot = pot_total,
            winners = ?winner_ids,
            showdown = showdown.is_some(),
            "hand finished"
        );

        Ok(HandRecord {
            game_id: self.state.game_id().to_string(),
            hand_id,
            ts: started.to_rfc3339(),
            deck_seed,
            dealer,
            players: seat_records,
            blinds: Blinds {
                small: small_blind,
                big: big_blind,
            },
            actions,
            deck: deck_order,
            initial_hands,
            discards,
            final_hands,
            showdown,
            winners,
            pot: pot_total,
            final_stacks,
        })
    }

    /// Posts a forced bet, capped at what the player holds. A seat sitting
    /// the hand out posts nothing.
    fn post_blind(
        &mut self,
        seat: usize,
        blind: u32,
        pot: &mut Pot,
        actions: &mut Vec<ActionRecord>,
    ) -> Result<(), GameError> {
        let player = &mut self.players[seat];
        if !player.is_active() {
            return Ok(());
        }
        let amount = blind.min(player.stack());
        pot.collect_from(player, amount)?;
        debug!(player = player.id(), amount, "blind posted");
        actions.push(ActionRecord {
            stage: Stage::Blinds,
            player_id: player.id(),
            action: ActionKind::Blind,
            amount,
        });
        Ok(())
    }

    fn active_hands(&self) -> BTreeMap<PlayerId, Vec<Card>> {
        self.players
            .iter()
            .filter(|p| p.is_active())
            .map(|p| (p.id(), p.hand().to_vec()))
            .collect()
    }
}

/// Decides who takes the pot. A lone remaining player wins without a
/// reveal; otherwise every active hand is evaluated and all hands equal to
/// the best one share. Winners come back in seat order starting left of the
/// dealer.
pub fn showdown(
    players: &[Player],
    dealer: usize,
) -> Result<(Option<Vec<ShowdownEntry>>, Vec<PlayerId>), GameError> {
    let seats = players.len();
    let contenders: Vec<&Player> = (1..=seats)
        .map(|offset| &players[(dealer + offset) % seats])
        .filter(|p| p.is_active())
        .collect();

    match contenders.as_slice() {
        [] => Err(GameError::NotEnoughPlayers(0)),
        [only] => Ok((None, vec![only.id()])),
        _ => {
            let entries = contenders
                .iter()
                .map(|p| -> Result<ShowdownEntry, GameError> {
                    Ok(ShowdownEntry {
                        player_id: p.id(),
                        hand: p.hand().to_vec(),
                        rank: evaluate_hand(p.hand())?,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            let best = entries.iter().map(|e| &e.rank).max();
            let winners = entries
                .iter()
                .filter(|e| Some(&e.rank) == best)
                .map(|e| e.player_id)
                .collect();
            for e in &entries {
                debug!(player = e.player_id, rank = %e.rank, "showdown");
            }
            Ok((Some(entries), winners))
        }
    }
}

/// Runs the showdown and pays the whole pot out to its winners. Odd chips
/// of a split pot go to the winners nearest the dealer's left.
pub fn settle(
    players: &mut [Player],
    dealer: usize,
    pot: &mut Pot,
) -> Result<(Option<Vec<ShowdownEntry>>, Vec<Payout>), GameError> {
    let (showdown, winner_ids) = showdown(players, dealer)?;
    let mut winners = Vec::with_capacity(winner_ids.len());
    for (player_id, amount) in pot.split(&winner_ids) {
        let player = players
            .iter_mut()
            .find(|p| p.id() == player_id)
            .ok_or_else(|| GameError::InvalidAction(format!("unknown winner {player_id}")))?;
        player.adjust_stack(i64::from(amount))?;
        winners.push(Payout { player_id, amount });
    }
    Ok((showdown, winners))
}

fn master_rng(seed: Option<u64>) -> ChaCha20Rng {
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    ChaCha20Rng::seed_from_u64(seed)
}

fn check_table(seats: usize, small_blind: u32, big_blind: u32) -> Result<(), GameError> {
    if seats < 2 {
        return Err(GameError::NotEnoughPlayers(seats));
    }
    if seats > MAX_SEATS {
        return Err(GameError::InvalidAction(format!(
            "{seats} seats, at most {MAX_SEATS} allowed"
        )));
    }
    if big_blind == 0 || small_blind > big_blind {
        return Err(GameError::InvalidAction(format!(
            "invalid blinds {small_blind}/{big_blind}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::PlayerAction as A;
    use crate::source::ScriptedSource;

    fn specs(stacks: &[u32]) -> Vec<PlayerSpec> {
        stacks
            .iter()
            .enumerate()
            .map(|(i, &stack)| PlayerSpec {
                name: format!("P{i}"),
                stack,
                is_human: false,
            })
            .collect()
    }

    fn sources(scripts: Vec<Vec<A>>) -> Vec<Box<dyn ActionSource>> {
        scripts
            .into_iter()
            .map(|s| Box::new(ScriptedSource::new(s)) as Box<dyn ActionSource>)
            .collect()
    }

    #[test]
    fn table_size_and_blinds_are_checked() {
        assert!(matches!(
            Engine::new(&specs(&[100]), 1, 2, Some(1)),
            Err(GameError::NotEnoughPlayers(1))
        ));
        assert!(Engine::new(&specs(&[100; 9]), 1, 2, Some(1)).is_err());
        assert!(Engine::new(&specs(&[100, 100]), 5, 2, Some(1)).is_err());
        assert!(Engine::new(&specs(&[100, 100]), 0, 0, Some(1)).is_err());
    }

    #[test]
    fn same_seed_same_game() {
        let a = Engine::new(&specs(&[1000; 3]), 25, 50, Some(99)).unwrap();
        let b = Engine::new(&specs(&[1000; 3]), 25, 50, Some(99)).unwrap();
        assert_eq!(a.game_id(), b.game_id());
    }

    #[test]
    fn folds_to_big_blind_award_blinds_without_reveal() {
        let mut engine = Engine::new(&specs(&[1000; 3]), 25, 50, Some(3)).unwrap();
        let mut srcs = sources(vec![vec![A::Fold], vec![A::Fold], vec![]]);
        let record = engine.play_hand(&mut srcs).unwrap();

        assert_eq!(record.dealer, 0);
        assert_eq!(record.pot, 75);
        assert!(record.showdown.is_none());
        assert!(record.discards.is_none());
        assert_eq!(record.winners, vec![Payout { player_id: 2, amount: 75 }]);
        let stacks: Vec<u32> = engine.players().iter().map(|p| p.stack()).collect();
        assert_eq!(stacks, vec![1000, 975, 1025]);
    }

    #[test]
    fn short_blind_is_posted_for_what_remains() {
        let mut engine = Engine::new(&specs(&[1000, 10, 1000]), 25, 50, Some(3)).unwrap();
        let mut srcs = sources(vec![vec![A::Fold], vec![], vec![]]);
        let record = engine.play_hand(&mut srcs).unwrap();
        assert_eq!(record.actions[0].amount, 10);
        assert_eq!(record.actions[1].amount, 50);
    }

    #[test]
    fn busted_players_leave_and_button_stays_in_range() {
        let mut engine = Engine::new(&specs(&[0, 500, 0, 500]), 5, 10, Some(1)).unwrap();
        let removed = engine.drop_busted_players();
        assert_eq!(removed, vec![2, 0]);
        let ids: Vec<_> = engine.players().iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn hand_needs_two_funded_players() {
        let mut engine = Engine::new(&specs(&[0, 500]), 5, 10, Some(1)).unwrap();
        let mut srcs = sources(vec![vec![], vec![]]);
        assert!(matches!(
            engine.play_hand(&mut srcs),
            Err(GameError::NotEnoughPlayers(1))
        ));
    }

    #[test]
    fn snapshot_resumes_dealer_and_counter() {
        let mut engine = Engine::new(&specs(&[1000; 3]), 25, 50, Some(11)).unwrap();
        let mut srcs = sources(vec![vec![], vec![], vec![]]);
        engine.play_hand(&mut srcs).unwrap();
        let snap = engine.snapshot();

        let resumed = Engine::from_snapshot(&snap, Some(12)).unwrap();
        assert_eq!(resumed.game_id(), engine.game_id());
        assert_eq!(resumed.state().dealer_position(), Some(0));
        assert_eq!(resumed.state().round_counter(), 1);
        let stacks: Vec<u32> = resumed.players().iter().map(|p| p.stack()).collect();
        assert_eq!(stacks, snap.players.iter().map(|p| p.stack).collect::<Vec<_>>());
    }

    #[test]
    fn resumed_players_keep_their_ids_after_a_bust() {
        let mut engine = Engine::new(&specs(&[0, 500, 500]), 5, 10, Some(4)).unwrap();
        engine.drop_busted_players();
        let snap = engine.snapshot();
        let json = serde_json::to_string(&snap).unwrap();
        let snap: SessionSnapshot = serde_json::from_str(&json).unwrap();

        let mut resumed = Engine::from_snapshot(&snap, Some(5)).unwrap();
        let ids: Vec<(PlayerId, &str)> = resumed.players().iter().map(|p| (p.id(), p.name())).collect();
        assert_eq!(ids, vec![(1, "P1"), (2, "P2")]);

        let mut srcs = sources(vec![vec![], vec![]]);
        let record = resumed.play_hand(&mut srcs).unwrap();
        let seated: Vec<PlayerId> = record.players.iter().map(|s| s.id).collect();
        assert_eq!(seated, vec![1, 2]);
        assert!(record.winners.iter().all(|w| w.player_id != 0));
    }

    fn seated(id: PlayerId, cards: &str) -> Player {
        let mut p = Player::new(id, format!("P{id}"), 1000, false);
        for c in cards.split_whitespace() {
            p.take_card(c.parse().unwrap());
        }
        p
    }

    #[test]
    fn tied_hands_split_and_odd_chip_goes_left_of_dealer() {
        let mut players = vec![
            seated(0, "As Ks Qd Jc 9h"),
            seated(1, "2c 3d 4h 5s 7c"),
            seated(2, "Ah Kh Qc Jd 9s"),
            seated(3, "Ad Kd Qh Jh 9c"),
        ];
        let mut pot = Pot::new();
        for (seat, amount) in [(0, 25), (1, 25), (2, 26), (3, 25)] {
            pot.collect_from(&mut players[seat], amount).unwrap();
        }
        players[3].fold();
        assert_eq!(pot.total(), 101);

        // dealer at seat 1: seat 2 is the first tied hand to the left
        let (showdown, winners) = settle(&mut players, 1, &mut pot).unwrap();

        let revealed: Vec<PlayerId> = showdown.unwrap().iter().map(|e| e.player_id).collect();
        assert_eq!(revealed, vec![2, 0, 1]);
        assert_eq!(
            winners,
            vec![
                Payout { player_id: 2, amount: 51 },
                Payout { player_id: 0, amount: 50 },
            ]
        );
        assert_eq!(pot.total(), 0);
        let stacks: Vec<u32> = players.iter().map(|p| p.stack()).collect();
        assert_eq!(stacks, vec![1025, 975, 1025, 975]);
    }

    #[test]
    fn lone_player_wins_without_reveal() {
        let mut players = vec![seated(0, "2c 3d 4h 5s 7c"), seated(1, "As Ks Qd Jc 9h")];
        players[1].fold();
        let mut pot = Pot::new();
        pot.collect_from(&mut players[1], 40).unwrap();
        let (showdown, winners) = settle(&mut players, 0, &mut pot).unwrap();
        assert!(showdown.is_none());
        assert_eq!(winners, vec![Payout { player_id: 0, amount: 40 }]);
    }

    #[test]
    fn stackless_seat_is_neither_dealt_in_nor_charged_a_blind() {
        let mut engine = Engine::new(&specs(&[1000, 0, 1000, 1000]), 25, 50, Some(8)).unwrap();
        let mut srcs = sources(vec![vec![], vec![], vec![], vec![]]);
        let record = engine.play_hand(&mut srcs).unwrap();

        assert!(record.actions.iter().all(|a| a.player_id != 1));
        assert_eq!(record.actions[0].player_id, 2);
        assert_eq!(record.actions[0].amount, 50);
        assert!(!record.initial_hands.contains_key(&1));
        assert!(engine.players()[1].hand().is_empty());
        assert_eq!(engine.players()[1].stack(), 0);
        let total: u32 = engine.players().iter().map(|p| p.stack()).sum();
        assert_eq!(total, 3000);
    }

    struct Unplugged;

    impl ActionSource for Unplugged {
        fn decide(&mut self, _ctx: &crate::source::DecisionContext<'_>) -> Result<A, GameError> {
            Err(GameError::SourceUnavailable("input closed".into()))
        }
        fn select_discards(&mut self, _player: &Player) -> Result<Vec<usize>, GameError> {
            Err(GameError::SourceUnavailable("input closed".into()))
        }
        fn name(&self) -> &str {
            "unplugged"
        }
    }

    #[test]
    fn abandoned_hand_leaves_engine_as_before() {
        let mut engine = Engine::new(&specs(&[1000; 3]), 25, 50, Some(21)).unwrap();
        // seat 0 opens the first street after both blinds are in
        let mut srcs: Vec<Box<dyn ActionSource>> = vec![
            Box::new(Unplugged),
            Box::new(ScriptedSource::default()),
            Box::new(ScriptedSource::default()),
        ];
        let err = engine.play_hand(&mut srcs).unwrap_err();
        assert!(matches!(err, GameError::SourceUnavailable(_)));

        let stacks: Vec<u32> = engine.players().iter().map(|p| p.stack()).collect();
        assert_eq!(stacks, vec![1000, 1000, 1000]);
        assert!(engine.players().iter().all(|p| p.hand().is_empty() && p.bet_in_round() == 0));
        assert_eq!(engine.state().round_counter(), 0);
        assert_eq!(engine.state().dealer_position(), None);

        let mut srcs = sources(vec![vec![], vec![], vec![]]);
        let record = engine.play_hand(&mut srcs).unwrap();
        assert_eq!(record.dealer, 0);
        assert!(record.hand_id.ends_with("-000001"));

        let mut fresh = Engine::new(&specs(&[1000; 3]), 25, 50, Some(21)).unwrap();
        let mut srcs = sources(vec![vec![], vec![], vec![]]);
        assert_eq!(fresh.play_hand(&mut srcs).unwrap().deck_seed, record.deck_seed);
    }
}
