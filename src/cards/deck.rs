//! Draw pile, discard pile and player hands.
//!
//! Cards are never created or destroyed after setup: they move from the
//! draw pile to a hand, from a hand to the discard pile, and back to the
//! draw pile when it runs dry and the discard pile is reshuffled.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::card::{Card, CardId};
use super::value::{CardValue, Suit};
use crate::core::{Color, ColorMap, GameRng, GameRngState, RuleError, RuleResult};

/// Result of drawing one card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draw {
    pub card: Card,
    /// The discard pile was reshuffled to make this draw possible.
    pub reshuffled: bool,
}

/// Serializable contents of a deck, shuffle state included.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckState {
    /// Top of the pile is the last element.
    pub draw_pile: Vec<Card>,
    pub discard_pile: Vec<Card>,
    pub hands: ColorMap<Vec<Card>>,
    pub rng: GameRngState,
}

/// The cards of one game.
#[derive(Clone, Debug)]
pub struct Deck {
    /// Top of the pile is the last element.
    draw_pile: Vec<Card>,
    discard_pile: Vec<Card>,
    hands: ColorMap<Vec<Card>>,
    rng: GameRng,
}

/// The 52 standard cards followed by `jokers` jokers, in a fixed order.
#[must_use]
pub fn full_set(jokers: usize) -> Vec<Card> {
    let standard = Suit::ALL
        .iter()
        .flat_map(|&suit| CardValue::RANKS.iter().map(move |&value| (suit, value)));
    let joker_suits = [Suit::Hearts, Suit::Spades, Suit::Diamonds, Suit::Clubs];
    let extra = (0..jokers).map(|i| (joker_suits[i % joker_suits.len()], CardValue::Joker));

    standard
        .chain(extra)
        .enumerate()
        .map(|(i, (suit, value))| Card::new(CardId(i as u8), suit, value))
        .collect()
}

impl Deck {
    /// A shuffled deck with empty hands.
    #[must_use]
    pub fn new(jokers: usize, mut rng: GameRng) -> Self {
        let mut draw_pile = full_set(jokers);
        rng.shuffle(&mut draw_pile);
        Self {
            draw_pile,
            discard_pile: Vec::new(),
            hands: ColorMap::with_default(),
            rng,
        }
    }

    /// A deck whose draw pile yields `cards` in the given order.
    ///
    /// Used to stage scenarios; the shuffle RNG still governs reshuffles.
    #[must_use]
    pub fn stacked(cards: Vec<Card>, rng: GameRng) -> Self {
        let mut draw_pile = cards;
        draw_pile.reverse();
        Self {
            draw_pile,
            discard_pile: Vec::new(),
            hands: ColorMap::with_default(),
            rng,
        }
    }

    /// Move the discard pile under a fresh shuffle into the draw pile.
    pub fn reshuffle(&mut self) {
        self.draw_pile.append(&mut self.discard_pile);
        self.rng.shuffle(&mut self.draw_pile);
        log::info!("reshuffled discard pile, {} cards to draw", self.draw_pile.len());
    }

    /// Take the top card of the draw pile, reshuffling if it is empty.
    pub fn draw(&mut self) -> RuleResult<Draw> {
        let mut reshuffled = false;
        if self.draw_pile.is_empty() {
            if self.discard_pile.is_empty() {
                return Err(RuleError::DeckExhausted);
            }
            self.reshuffle();
            reshuffled = true;
        }
        let card = self.draw_pile.pop().ok_or(RuleError::DeckExhausted)?;
        Ok(Draw { card, reshuffled })
    }

    /// Draw one card into a player's hand.
    pub fn draw_to_hand(&mut self, color: Color) -> RuleResult<Draw> {
        let draw = self.draw()?;
        self.hands[color].push(draw.card);
        Ok(draw)
    }

    /// Draw until the hand holds `hand_size` cards.
    pub fn refill_hand(&mut self, color: Color, hand_size: usize) -> RuleResult<Vec<Draw>> {
        let missing = hand_size.saturating_sub(self.hands[color].len());
        (0..missing).map(|_| self.draw_to_hand(color)).collect()
    }

    /// Put a card on the discard pile.
    pub fn discard(&mut self, card: Card) {
        self.discard_pile.push(card);
    }

    /// Remove a card from a hand.
    pub fn take_from_hand(&mut self, color: Color, card: CardId) -> RuleResult<Card> {
        let hand = &mut self.hands[color];
        let index = hand
            .iter()
            .position(|c| c.id == card)
            .ok_or(RuleError::CardNotInHand { card, color })?;
        Ok(hand.remove(index))
    }

    /// Put a card back into a hand.
    pub fn return_to_hand(&mut self, color: Color, card: Card) {
        self.hands[color].push(card);
    }

    #[must_use]
    pub fn hand(&self, color: Color) -> &[Card] {
        &self.hands[color]
    }

    #[must_use]
    pub fn hand_card(&self, color: Color, card: CardId) -> Option<&Card> {
        self.hands[color].iter().find(|c| c.id == card)
    }

    #[must_use]
    pub fn draw_pile_len(&self) -> usize {
        self.draw_pile.len()
    }

    #[must_use]
    pub fn discard_pile(&self) -> &[Card] {
        &self.discard_pile
    }

    /// Cards in circulation: draw pile, discard pile and every hand.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.draw_pile.len()
            + self.discard_pile.len()
            + self.hands.values().map(Vec::len).sum::<usize>()
    }

    /// Every card currently in circulation, wherever it is.
    pub fn all_cards(&self) -> impl Iterator<Item = &Card> {
        self.draw_pile
            .iter()
            .chain(self.discard_pile.iter())
            .chain(self.hands.values().flatten())
    }

    /// Capture every pile, every hand and the shuffle generator.
    #[must_use]
    pub fn state(&self) -> DeckState {
        DeckState {
            draw_pile: self.draw_pile.clone(),
            discard_pile: self.discard_pile.clone(),
            hands: self.hands.clone(),
            rng: self.rng.state(),
        }
    }

    /// Rebuild a deck, rejecting states that hold a card twice.
    pub fn from_state(state: DeckState) -> RuleResult<Self> {
        let mut seen = FxHashSet::default();
        let cards = state
            .draw_pile
            .iter()
            .chain(state.discard_pile.iter())
            .chain(state.hands.values().flatten());
        for card in cards {
            if !seen.insert(card.id) {
                return Err(RuleError::Snapshot(format!("{} appears twice", card.id)));
            }
        }
        Ok(Self {
            draw_pile: state.draw_pile,
            discard_pile: state.discard_pile,
            hands: state.hands,
            rng: GameRng::from_state(&state.rng),
        })
    }
}
