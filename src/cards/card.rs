//! Cards and the value binding table.
//!
//! A card's behavior is a pure function of its value: the effect it
//! applies, whose pawns it may target and the ordered filters a target must
//! pass. The table below is the only place this binding is defined.

use serde::{Deserialize, Serialize};

use super::value::{CardValue, Suit};
use crate::effects::{ColorFilter, Effect, Filter};

/// Stable card identifier, unique within a deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u8);

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Everything a card value is bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CardBinding {
    pub effect: Effect,
    pub color_filter: ColorFilter,
    pub filters: &'static [Filter],
}

const PARTEU: &[Filter] = &[Filter::Parteu];
const MOVE_ON_BOARD: &[Filter] = &[Filter::Move, Filter::OnBoard];
const ON_BOARD: &[Filter] = &[Filter::OnBoard];
const ON_BOARD_MOVE: &[Filter] = &[Filter::OnBoard, Filter::Move];

/// Binding for a card value.
#[must_use]
pub const fn binding(value: CardValue) -> CardBinding {
    let n = value.face();
    match value {
        CardValue::Ace | CardValue::King => CardBinding {
            effect: Effect::EnterOrMove(n),
            color_filter: ColorFilter::OwnPawns,
            filters: PARTEU,
        },
        CardValue::Two
        | CardValue::Three
        | CardValue::Six
        | CardValue::Eight
        | CardValue::Nine
        | CardValue::Ten
        | CardValue::Queen => CardBinding {
            effect: Effect::Move(n),
            color_filter: ColorFilter::OwnPawns,
            filters: MOVE_ON_BOARD,
        },
        CardValue::Four => CardBinding {
            effect: Effect::MoveBackward(n),
            color_filter: ColorFilter::OwnPawns,
            filters: ON_BOARD,
        },
        CardValue::Five => CardBinding {
            effect: Effect::Move(n),
            color_filter: ColorFilter::OtherPawns,
            filters: ON_BOARD_MOVE,
        },
        CardValue::Seven => CardBinding {
            effect: Effect::SplitMove(n),
            color_filter: ColorFilter::OwnPawns,
            filters: ON_BOARD,
        },
        CardValue::Jack => CardBinding {
            effect: Effect::Exchange,
            color_filter: ColorFilter::OwnPawns,
            filters: ON_BOARD,
        },
        CardValue::Joker => CardBinding {
            effect: Effect::EnterOrWipe(n),
            color_filter: ColorFilter::OwnPawns,
            filters: PARTEU,
        },
    }
}

/// A playing card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub suit: Suit,
    pub value: CardValue,
}

impl Card {
    #[must_use]
    pub const fn new(id: CardId, suit: Suit, value: CardValue) -> Self {
        Self { id, suit, value }
    }

    #[must_use]
    pub const fn effect(&self) -> Effect {
        binding(self.value).effect
    }

    #[must_use]
    pub const fn color_filter(&self) -> ColorFilter {
        binding(self.value).color_filter
    }

    #[must_use]
    pub const fn filters(&self) -> &'static [Filter] {
        binding(self.value).filters
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.value {
            CardValue::Joker => write!(f, "Joker ({:?})", self.suit),
            value => write!(f, "{} of {:?}", value, self.suit),
        }
    }
}
