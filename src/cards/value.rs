//! Card faces: suits and values.

use serde::{Deserialize, Serialize};

/// Card suit. Suits carry no rule meaning in Tock; they only keep every
/// card in the deck distinct.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];
}

/// Card face value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CardValue {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Joker,
}

impl CardValue {
    /// The thirteen ranks of a standard suit.
    pub const RANKS: [CardValue; 13] = [
        CardValue::Ace,
        CardValue::Two,
        CardValue::Three,
        CardValue::Four,
        CardValue::Five,
        CardValue::Six,
        CardValue::Seven,
        CardValue::Eight,
        CardValue::Nine,
        CardValue::Ten,
        CardValue::Jack,
        CardValue::Queen,
        CardValue::King,
    ];

    /// Numeric face value: Ace 1 through King 13, Joker 14.
    #[must_use]
    pub const fn face(self) -> u8 {
        self as u8 + 1
    }
}

impl std::fmt::Display for CardValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardValue::Ace => f.write_str("Ace"),
            CardValue::Jack => f.write_str("Jack"),
            CardValue::Queen => f.write_str("Queen"),
            CardValue::King => f.write_str("King"),
            CardValue::Joker => f.write_str("Joker"),
            other => write!(f, "{}", other.face()),
        }
    }
}
