//! # sequence-engine: Sequence Board Game Rules
//!
//! A deterministic two-player engine for the Sequence board game. Each
//! terminal runs its own [`board::Board`]; both are seeded from the same
//! roster and stay in step by exchanging small move descriptors.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card), jacks, and deck contents
//! - [`deck`] - Seeded draw and discard piles with ChaCha20 RNG
//! - [`grid`] - 10×10 coordinates, directions, and line segments
//! - [`place`] - Board places, chips, and locking
//! - [`player`] - Player identity, hand, and sequence tally
//! - [`rules`] - Placement validation and dead cards
//! - [`sequence`] - Win detection along the four lines through a chip
//! - [`protocol`] - Move descriptors and the match-start roster
//! - [`board`] - Match state machine
//! - [`relay`] - Two peers wired together in-process
//! - [`logger`] - MatchRecord serialization to JSONL
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use sequence_engine::board::MatchRules;
//! use sequence_engine::protocol::{MatchStart, RosterEntry};
//! use sequence_engine::relay::LocalRelay;
//!
//! let start = MatchStart::new(
//!     vec![RosterEntry::new("Ana", 20, 1), RosterEntry::new("Bruno", 22, 2)],
//!     20,
//! );
//! let mut relay = LocalRelay::new(MatchRules::default());
//! relay.start(&start).unwrap();
//!
//! assert_eq!(relay.active_peer(), Some(0));
//! assert!(relay.is_consistent());
//! ```
//!
//! ## Deterministic Gameplay
//!
//! The deck seed is the sum of both player ids, so both terminals build
//! the same board and deal the same hands:
//!
//! ```rust
//! use sequence_engine::deck::Deck;
//!
//! let mut a = Deck::new_with_seed(42);
//! let mut b = Deck::new_with_seed(42);
//! assert_eq!(a.build_board_layout(), b.build_board_layout());
//! ```

pub mod board;
pub mod cards;
pub mod deck;
pub mod errors;
pub mod grid;
pub mod logger;
pub mod place;
pub mod player;
pub mod protocol;
pub mod relay;
pub mod rules;
pub mod sequence;
