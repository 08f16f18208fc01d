//! Card system: faces, value bindings and the deck.
//!
//! ## Key Types
//!
//! - `CardValue` / `Suit`: the face of a card
//! - `Card`: a distinct card with its value-bound effect and filters
//! - `CardBinding`: the static value → (effect, color filter, filters) table
//! - `Deck`: draw pile, discard pile and hands

pub mod card;
pub mod deck;
pub mod value;

pub use card::{binding, Card, CardBinding, CardId};
pub use deck::{full_set, Deck, DeckState, Draw};
pub use value::{CardValue, Suit};
