use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::player::{Player, PlayerId};

/// Game-wide state that outlives a single hand: blinds, dealer button and
/// the round counter used for hand ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    game_id: String,
    small_blind: u32,
    big_blind: u32,
    /// Seat of the last dealer; `None` before the first hand
    dealer_position: Option<usize>,
    round_counter: u32,
}

impl GameState {
    pub fn new(game_id: impl Into<String>, small_blind: u32, big_blind: u32) -> Self {
        Self {
            game_id: game_id.into(),
            small_blind,
            big_blind,
            dealer_position: None,
            round_counter: 0,
        }
    }

    pub fn game_id(&self) -> &str {
        &self.game_id
    }
    pub fn small_blind(&self) -> u32 {
        self.small_blind
    }
    pub fn big_blind(&self) -> u32 {
        self.big_blind
    }
    pub fn dealer_position(&self) -> Option<usize> {
        self.dealer_position
    }
    pub fn round_counter(&self) -> u32 {
        self.round_counter
    }

    /// Moves the button one seat clockwise, wrapping at `seats`. The first
    /// hand of a game is dealt by seat 0.
    pub fn rotate_button(&mut self, seats: usize) -> usize {
        let next = match self.dealer_position {
            Some(d) => (d + 1) % seats,
            None => 0,
        };
        self.dealer_position = Some(next);
        next
    }

    pub fn next_round(&mut self) -> u32 {
        self.round_counter += 1;
        self.round_counter
    }

    /// Keeps the button in range after seats were removed.
    pub(crate) fn clamp_dealer(&mut self, seats: usize) {
        if let Some(d) = self.dealer_position {
            if seats > 0 && d >= seats {
                self.dealer_position = Some(d % seats);
            }
        }
    }

    pub fn snapshot(&self, players: &[Player]) -> SessionSnapshot {
        SessionSnapshot {
            game_id: self.game_id.clone(),
            small_blind: self.small_blind,
            big_blind: self.big_blind,
            dealer_position: self.dealer_position,
            round_counter: self.round_counter,
            players: players
                .iter()
                .map(|p| SeatSnapshot {
                    id: p.id(),
                    name: p.name().to_string(),
                    stack: p.stack(),
                    is_human: p.is_human(),
                })
                .collect(),
        }
    }

    pub fn from_snapshot(snapshot: &SessionSnapshot) -> Self {
        Self {
            game_id: snapshot.game_id.clone(),
            small_blind: snapshot.small_blind,
            big_blind: snapshot.big_blind,
            dealer_position: snapshot.dealer_position,
            round_counter: snapshot.round_counter,
        }
    }
}

/// Session state written after every hand so that a game can be resumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub game_id: String,
    pub small_blind: u32,
    pub big_blind: u32,
    pub dealer_position: Option<usize>,
    #[serde(default)]
    pub round_counter: u32,
    pub players: Vec<SeatSnapshot>,
}

/// One seated player of a saved session. The id is kept so a resumed game
/// keys every player the same way its earlier hand records do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatSnapshot {
    pub id: PlayerId,
    pub name: String,
    pub stack: u32,
    pub is_human: bool,
}

impl SessionSnapshot {
    /// Rebuilds the seated players in seating order with their saved ids.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidAction`] if two seats share an id.
    pub fn restore_players(&self) -> Result<Vec<Player>, GameError> {
        let mut players: Vec<Player> = Vec::with_capacity(self.players.len());
        for seat in &self.players {
            if players.iter().any(|p| p.id() == seat.id) {
                return Err(GameError::InvalidAction(format!(
                    "player id {} appears twice in session {}",
                    seat.id, self.game_id
                )));
            }
            players.push(Player::new(seat.id, seat.name.clone(), seat.stack, seat.is_human));
        }
        Ok(players)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_starts_at_seat_zero_and_wraps() {
        let mut gs = GameState::new("g", 25, 50);
        assert_eq!(gs.dealer_position(), None);
        assert_eq!(gs.rotate_button(3), 0);
        assert_eq!(gs.rotate_button(3), 1);
        assert_eq!(gs.rotate_button(3), 2);
        assert_eq!(gs.rotate_button(3), 0);
    }

    #[test]
    fn snapshot_roundtrips_game_state() {
        let mut gs = GameState::new("g-1", 10, 20);
        gs.rotate_button(2);
        gs.next_round();
        let players = vec![
            Player::new(0, "Ann", 900, true),
            Player::new(1, "Bot", 1100, false),
        ];
        let snap = gs.snapshot(&players);
        assert_eq!(snap.players[1].stack, 1100);
        assert!(snap.players[0].is_human);
        assert_eq!(GameState::from_snapshot(&snap), gs);
    }

    #[test]
    fn restored_players_keep_their_ids() {
        let gs = GameState::new("g-2", 10, 20);
        let players = vec![
            Player::new(1, "Bob", 700, false),
            Player::new(4, "Eve", 1300, true),
        ];
        let restored = gs.snapshot(&players).restore_players().unwrap();
        assert_eq!(restored, players);

        let mut snap = gs.snapshot(&players);
        snap.players[1].id = 1;
        assert!(matches!(
            snap.restore_players(),
            Err(GameError::InvalidAction(_))
        ));
    }

    #[test]
    fn clamp_keeps_button_in_range() {
        let mut gs = GameState::new("g", 1, 2);
        for _ in 0..4 {
            gs.rotate_button(5);
        }
        assert_eq!(gs.dealer_position(), Some(3));
        gs.clamp_dealer(3);
        assert_eq!(gs.dealer_position(), Some(0));
    }
}
