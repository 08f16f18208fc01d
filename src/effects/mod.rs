//! Effect system for card actions.
//!
//! Cards do exactly one thing each, chosen by value:
//! - `Effect`: what happens to the chosen pawn(s)
//! - `Filter`: which pawns a card may be played on
//! - `EffectResolver`: applies an effect and resolves captures
//!
//! ## Captures
//!
//! A pawn that ends a move on a loop cell held by another color sends that
//! pawn back to its start pool. Entering onto an entry cell held by another
//! color does the same. The Joker additionally captures every pawn it
//! passes on the loop. Home-lane pawns are never captured.

mod effect;
mod filter;
mod resolver;

pub use effect::{Arity, ColorFilter, Effect, Share, TargetChoice};
pub use filter::{
    evaluate, exchange_partners, move_filtering, on_board, parteu, precondition, Filter,
};
pub use resolver::{EffectResolver, Resolution};
