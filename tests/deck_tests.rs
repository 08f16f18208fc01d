//! Deck tests: card conservation through draws, discards and reshuffles.

use std::collections::BTreeMap;

use tock_engine::cards::{full_set, Card, CardValue, Deck, Suit};
use tock_engine::core::{Color, GameRng, RuleError};

fn census<'a>(cards: impl Iterator<Item = &'a Card>) -> BTreeMap<(Suit, CardValue), usize> {
    let mut counts = BTreeMap::new();
    for card in cards {
        *counts.entry((card.suit, card.value)).or_insert(0) += 1;
    }
    counts
}

/// Test many rounds of play: every card stays in circulation exactly once.
#[test]
fn test_cards_are_conserved() {
    let mut deck = Deck::new(2, GameRng::new(11));
    let expected = census(full_set(2).iter());
    for color in Color::all() {
        deck.refill_hand(color, 5).unwrap();
    }

    let mut reshuffles = 0;
    for round in 0..40 {
        for color in Color::all() {
            let card = deck.hand(color)[round % 5];
            let card = deck.take_from_hand(color, card.id).unwrap();
            deck.discard(card);
            let draws = deck.refill_hand(color, 5).unwrap();
            reshuffles += draws.iter().filter(|d| d.reshuffled).count();

            assert_eq!(deck.total_cards(), 54);
            assert_eq!(deck.hand(color).len(), 5);
        }
    }

    assert!(reshuffles > 0);
    assert_eq!(census(deck.all_cards()), expected);
    let mut ids: Vec<u8> = deck.all_cards().map(|c| c.id.0).collect();
    ids.sort_unstable();
    assert_eq!(ids, (0..54).collect::<Vec<u8>>());
}

/// Test that drawing with every card in hand reports exhaustion.
#[test]
fn test_exhausted_when_all_cards_held() {
    let mut deck = Deck::new(0, GameRng::new(2));
    for color in Color::all() {
        deck.refill_hand(color, 13).unwrap();
    }
    assert_eq!(deck.draw_pile_len(), 0);
    assert_eq!(deck.draw(), Err(RuleError::DeckExhausted));
    assert_eq!(deck.total_cards(), 52);
}

/// Test that the same seed reshuffles the discard pile the same way.
#[test]
fn test_reshuffle_is_seeded() {
    let play = |seed: u64| {
        let mut deck = Deck::new(2, GameRng::new(seed));
        let mut drawn = Vec::new();
        for _ in 0..120 {
            let draw = deck.draw().unwrap();
            drawn.push(draw.card.id);
            deck.discard(draw.card);
        }
        (drawn, deck.state())
    };
    assert_eq!(play(3), play(3));
    assert_ne!(play(3).0, play(4).0);
}
