//! Baseline bot for testing and benchmarking.
//!
//! Fully deterministic: decisions depend only on the evaluated hand, the
//! amount owed and the pot, so simulations against it are reproducible
//! without a seed.

use drawpoker_engine::errors::GameError;
use drawpoker_engine::hand::{Category, HandRank, evaluate_hand};
use drawpoker_engine::player::{Player, PlayerAction};
use drawpoker_engine::source::{ActionSource, DecisionContext};
use tracing::debug;

/// Rule-based reference bot.
///
/// # Strategy
///
/// **Betting:**
/// - Strong hands (two pair or better): raise the minimum, or call
/// - One pair: call if the price is at most half the pot, check if free
/// - High card: check if free, otherwise fold
///
/// **Draw:**
/// - Straights, flushes, full houses and better stand pat
/// - Paired hands throw every unpaired card
/// - High card keeps only its top card
///
/// # Example
///
/// ```rust
/// use drawpoker_ai::baseline::BaselineBot;
/// use drawpoker_engine::source::ActionSource;
///
/// let bot = BaselineBot::new();
/// assert_eq!(bot.name(), "baseline");
/// ```
#[derive(Debug, Clone, Default)]
pub struct BaselineBot;

impl BaselineBot {
    pub fn new() -> Self {
        Self
    }

    /// Hand strength on a 0-10 scale.
    fn strength(rank: &HandRank) -> u8 {
        let base = match rank.category {
            Category::HighCard => 1,
            Category::OnePair => 3,
            Category::TwoPair => 5,
            Category::ThreeOfAKind => 6,
            Category::Straight => 7,
            Category::Flush => 8,
            Category::FullHouse => 9,
            Category::FourOfAKind | Category::StraightFlush | Category::RoyalFlush => 10,
        };
        // a queen or better on top plays one tier up
        let kicker_boost = u8::from(rank.kickers[0] >= 12);
        (base + kicker_boost).min(10)
    }

    fn choose(strength: u8, ctx: &DecisionContext<'_>) -> PlayerAction {
        let legal = &ctx.legal;
        let min_raise = legal.raise.map(|b| b.min_total);
        let raise = min_raise
            .map(|to| to - ctx.player.bet_in_round())
            .filter(|&amount| amount < ctx.player.stack());

        match (strength, legal.call) {
            (5..=10, _) => match (raise, legal.call) {
                (Some(amount), _) => PlayerAction::Raise(amount),
                (None, Some(call)) => PlayerAction::Call(call),
                (None, None) => PlayerAction::Check,
            },
            (_, None) => PlayerAction::Check,
            (3..=4, Some(call)) if call <= ctx.pot / 2 => PlayerAction::Call(call),
            _ => PlayerAction::Fold,
        }
    }

    fn draw(rank: &HandRank, player: &Player) -> Vec<usize> {
        let hand = player.hand();
        match rank.category {
            Category::HighCard => {
                let top = rank.kickers[0];
                let keep = hand.iter().position(|c| c.value() == top);
                (0..hand.len()).filter(|&i| Some(i) != keep).collect()
            }
            Category::OnePair | Category::TwoPair | Category::ThreeOfAKind => (0..hand.len())
                .filter(|&i| {
                    let v = hand[i].value();
                    hand.iter().filter(|c| c.value() == v).count() == 1
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

impl ActionSource for BaselineBot {
    fn decide(&mut self, ctx: &DecisionContext<'_>) -> Result<PlayerAction, GameError> {
        let rank = evaluate_hand(ctx.player.hand())?;
        let strength = Self::strength(&rank);
        let action = Self::choose(strength, ctx);
        debug!(player = ctx.player.id(), strength, ?action, "baseline decision");
        Ok(action)
    }

    fn select_discards(&mut self, player: &Player) -> Result<Vec<usize>, GameError> {
        let rank = evaluate_hand(player.hand())?;
        Ok(Self::draw(&rank, player))
    }

    fn name(&self) -> &str {
        "baseline"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drawpoker_engine::cards::Card;
    use drawpoker_engine::logger::Stage;
    use drawpoker_engine::rules::{legal_actions, validate_action};

    fn player_with(stack: u32, hand: &str) -> Player {
        let mut p = Player::new(0, "Bot", stack, false);
        for c in hand.split_whitespace() {
            p.take_card(c.parse::<Card>().unwrap());
        }
        p
    }

    fn decide(p: &Player, current_bet: u32, pot: u32) -> PlayerAction {
        let ctx = DecisionContext {
            player: p,
            stage: Stage::PreExchange,
            current_bet,
            big_blind: 50,
            pot,
            legal: legal_actions(p, current_bet, 50),
        };
        let action = BaselineBot::new().decide(&ctx).unwrap();
        assert!(validate_action(p, current_bet, 50, action).is_ok());
        action
    }

    #[test]
    fn strong_hand_raises_minimum() {
        let p = player_with(1000, "Kc Kd 4h 4s 9c");
        assert_eq!(decide(&p, 50, 75), PlayerAction::Raise(100));
        assert_eq!(decide(&p, 0, 75), PlayerAction::Raise(50));
    }

    #[test]
    fn strong_hand_without_raise_room_calls() {
        let p = player_with(60, "Kc Kd 4h 4s 9c");
        assert_eq!(decide(&p, 50, 75), PlayerAction::Call(50));
    }

    #[test]
    fn one_pair_calls_cheap_bets_only() {
        let p = player_with(1000, "9c 9d 2h 5s Jc");
        assert_eq!(decide(&p, 50, 150), PlayerAction::Call(50));
        assert_eq!(decide(&p, 200, 150), PlayerAction::Fold);
        assert_eq!(decide(&p, 0, 150), PlayerAction::Check);
    }

    #[test]
    fn weak_hand_folds_to_a_bet() {
        let p = player_with(1000, "2c 7d 9h Js 4c");
        assert_eq!(decide(&p, 50, 75), PlayerAction::Fold);
        assert_eq!(decide(&p, 0, 75), PlayerAction::Check);
    }

    #[test]
    fn draw_keeps_made_cards() {
        let mut bot = BaselineBot::new();
        let pair = player_with(100, "9c 9d 2h 5s Kc");
        assert_eq!(bot.select_discards(&pair).unwrap(), vec![2, 3, 4]);

        let trips = player_with(100, "9c 2h 9d 9s Kc");
        assert_eq!(bot.select_discards(&trips).unwrap(), vec![1, 4]);

        let junk = player_with(100, "2c Kd 9h Js 4c");
        assert_eq!(bot.select_discards(&junk).unwrap(), vec![0, 2, 3, 4]);

        let flush = player_with(100, "2c 7c 9c Jc 4c");
        assert!(bot.select_discards(&flush).unwrap().is_empty());
    }
}
