//! Core engine types: colors, configuration, RNG, errors.
//!
//! These are the building blocks shared by the board, the cards and the
//! rules. None of them know about card effects or legality.

pub mod color;
pub mod config;
pub mod error;
pub mod rng;

pub use color::{Color, ColorMap, COLOR_COUNT};
pub use config::{GameConfig, UnplayablePolicy, MAX_JOKERS};
pub use error::{RuleError, RuleResult};
pub use rng::{GameRng, GameRngState};
