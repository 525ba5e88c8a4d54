//! # drawpoker-engine: Five-Card Draw Engine Core
//!
//! Plays single hands of five-card draw poker for two to eight seats:
//! blinds, two betting streets around one card exchange, showdown and
//! payout. Every hand produces a serializable [`logger::HandRecord`] and
//! every random choice comes from a seeded generator, so a game replays
//! identically from its seed.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and deck construction
//! - [`deck`] - Seeded deck with undealt and discarded sequences
//! - [`hand`] - Five-card hand evaluation and comparison
//! - [`player`] - Player state, actions and stack management
//! - [`pot`] - Pot collection and payout splitting
//! - [`rules`] - Legal action sets and action validation
//! - [`betting`] - Betting street resolution
//! - [`exchange`] - The draw: discarding and replacing cards
//! - [`source`] - The decision interface implemented by humans and bots
//! - [`engine`] - Hand orchestration
//! - [`game`] - Button rotation, round counter and session snapshots
//! - [`logger`] - HandRecord serialization
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use drawpoker_engine::cards::Card;
//! use drawpoker_engine::hand::{evaluate_hand, Category};
//!
//! let cards: Vec<Card> = ["As", "Ks", "Qs", "Js", "Ts"]
//!     .iter()
//!     .map(|s| s.parse().unwrap())
//!     .collect();
//!
//! let rank = evaluate_hand(&cards).unwrap();
//! assert_eq!(rank.category, Category::RoyalFlush);
//! ```
//!
//! ## Deterministic Gameplay
//!
//! ```rust
//! use drawpoker_engine::deck::Deck;
//!
//! let mut a = Deck::new_with_seed(42);
//! let mut b = Deck::new_with_seed(42);
//! a.shuffle();
//! b.shuffle();
//! assert!(a.undealt().eq(b.undealt()));
//! ```

pub mod betting;
pub mod cards;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod exchange;
pub mod game;
pub mod hand;
pub mod logger;
pub mod player;
pub mod pot;
pub mod rules;
pub mod source;
