//! # tock-engine
//!
//! Rule engine for Tock, a four-player race game in which drawn playing
//! cards decide how pawns move around a shared loop.
//!
//! ## Design Principles
//!
//! 1. **Pure decisions**: legality is a pure function of card, actor and
//!    board. Nothing here renders, animates or talks to the network.
//!
//! 2. **All-or-nothing**: a rejected command leaves the game exactly as it
//!    was. Effects are applied to a scratch board and committed whole.
//!
//! 3. **Deterministic**: every shuffle and bot decision flows from a seeded
//!    `GameRng`, so a game replays from its seed and selections.
//!
//! ## Architecture
//!
//! - **Single progress coordinate**: each pawn carries one progress value in
//!   its own color's frame. `board::track` maps it to a physical cell.
//!
//! - **Static card bindings**: a card's effect, color filter and filters are
//!   a table lookup on its value.
//!
//! - **Persistent history**: turn records live in an `im::Vector`, so a
//!   `Game` clones in O(1) for observers and search.
//!
//! ## Modules
//!
//! - `core`: colors, RNG, configuration, errors
//! - `board`: pawns, track geometry, occupancy, snapshots
//! - `cards`: card faces, value bindings, deck and hands
//! - `effects`: effects, target filters, effect resolution
//! - `rules`: legality projection, turn state machine, driver
//! - `events`: board events and presentation sinks
//! - `players`: built-in bot seats

pub mod board;
pub mod cards;
pub mod core;
pub mod effects;
pub mod events;
pub mod players;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    Color, ColorMap, GameConfig, GameRng, GameRngState, RuleError, RuleResult, UnplayablePolicy,
    COLOR_COUNT,
};

pub use crate::board::{
    Board, BoardSnapshot, Cell, Pawn, PawnId, PawnPosition, PawnState, PawnStatus, Track,
};

pub use crate::cards::{Card, CardId, CardValue, Deck, DeckState, Draw, Suit};

pub use crate::effects::{ColorFilter, Effect, EffectResolver, Filter, Share, TargetChoice};

pub use crate::events::{BoardEvent, EventLog, NullSink, PresentationSink};

pub use crate::rules::{
    compute_legal_targets, play_game, play_turn, Game, GameResult, GameSnapshot, InputSource,
    Projection, Selection, TurnOutcome, TurnPhase, TurnRecord,
};

pub use crate::players::RandomBot;
