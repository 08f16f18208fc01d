//! Rules: legality projection and the turn resolver.
//!
//! ## Key Types
//!
//! - `Projection`: legal targets of a card on a board
//! - `Game`: turn state machine owning board and deck
//! - `GameSnapshot`: a saved game, deck order included
//! - `InputSource` / `Selection`: where decisions come from
//! - `play_turn` / `play_game`: drive a game against input sources

pub mod driver;
pub mod game;
pub mod input;
pub mod projection;

pub use driver::{play_game, play_turn, GameResult, MAX_ATTEMPTS};
pub use game::{Game, GameSnapshot, TurnOutcome, TurnPhase, TurnRecord};
pub use input::{InputSource, Selection};
pub use projection::{candidates_for, compute_legal_targets, Candidates, Projection};
