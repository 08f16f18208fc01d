//! Uniform random seat.

use smallvec::SmallVec;

use crate::board::{Board, PawnId};
use crate::cards::{Card, CardId};
use crate::core::{Color, GameRng};
use crate::effects::{exchange_partners, Arity, Share, TargetChoice};
use crate::rules::{InputSource, Projection, Selection};

/// Bot that picks uniformly among what it is offered.
///
/// Cards are drawn at random from the hand; targets at random among the
/// projection's legal targets. Seven splits are random but always valid.
#[derive(Clone, Debug)]
pub struct RandomBot {
    rng: GameRng,
}

impl RandomBot {
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self { rng }
    }

    /// One bot per seat, all derived from a single table seed.
    #[must_use]
    pub fn for_seat(seed: u64, color: Color) -> Self {
        Self::new(GameRng::derive(seed, color.index() as u64))
    }

    fn pick(&mut self, pawns: &[PawnId]) -> Option<PawnId> {
        self.rng.choose(pawns).copied()
    }

    fn split(&mut self, projection: &Projection, total: u8) -> Option<TargetChoice> {
        let mut pool: SmallVec<[(PawnId, u8); 4]> = projection.runs.clone();
        self.rng.shuffle(&mut pool);

        let mut rest: u8 = pool.iter().map(|(_, run)| run).sum();
        let mut remaining = total;
        let mut shares: SmallVec<[Share; 4]> = SmallVec::new();

        for (pawn, run) in pool {
            rest -= run;
            if remaining == 0 {
                break;
            }
            // Leave no more than the other pawns can still absorb.
            let low = remaining.saturating_sub(rest).max(1);
            let high = run.min(remaining);
            if low > high {
                continue;
            }
            let steps = self.rng.gen_inclusive(low, high);
            shares.push(Share::new(pawn, steps));
            remaining -= steps;
        }

        (remaining == 0).then_some(TargetChoice::Split(shares))
    }
}

impl InputSource for RandomBot {
    fn select_card(&mut self, _color: Color, hand: &[Card]) -> Selection<CardId> {
        match self.rng.choose(hand) {
            Some(card) => Selection::Chosen(card.id),
            None => Selection::Cancelled,
        }
    }

    fn select_target(
        &mut self,
        _color: Color,
        card: &Card,
        projection: &Projection,
        board: &Board,
    ) -> Selection<TargetChoice> {
        let effect = card.effect();
        let choice = match effect.arity() {
            Arity::Single => self.pick(&projection.legal_targets).map(TargetChoice::Single),
            Arity::Pair => self.pick(&projection.legal_targets).and_then(|own| {
                let partners = board
                    .pawn(own)
                    .map(|pawn| exchange_partners(pawn, board))
                    .unwrap_or_default();
                self.pick(&partners).map(|other| TargetChoice::Pair(own, other))
            }),
            Arity::Split => self.split(projection, effect.steps().unsigned_abs() as u8),
        };

        match choice {
            Some(choice) => Selection::Chosen(choice),
            None => Selection::Cancelled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardValue, Suit};

    fn seven() -> Card {
        Card::new(CardId(6), Suit::Hearts, CardValue::Seven)
    }

    #[test]
    fn test_split_is_always_valid() {
        let board = Board::with_placements([
            (PawnId::new(Color::Red, 0), 5),
            (PawnId::new(Color::Red, 1), 8),
            (PawnId::new(Color::Red, 2), 30),
        ])
        .unwrap();
        let projection = Projection::project(&seven(), Color::Red, &board).unwrap();
        assert!(projection.playable);

        for seed in 0..50 {
            let mut bot = RandomBot::new(GameRng::new(seed));
            let choice = bot
                .select_target(Color::Red, &seven(), &projection, &board)
                .chosen()
                .unwrap();
            assert_eq!(projection.check_choice(&choice, &board), Ok(()));
        }
    }

    #[test]
    fn test_picks_legal_single_target() {
        let board = Board::with_placements([(PawnId::new(Color::Blue, 2), 20)]).unwrap();
        let nine = Card::new(CardId(8), Suit::Hearts, CardValue::Nine);
        let projection = Projection::project(&nine, Color::Blue, &board).unwrap();

        let mut bot = RandomBot::for_seat(3, Color::Blue);
        assert_eq!(
            bot.select_target(Color::Blue, &nine, &projection, &board),
            Selection::Chosen(TargetChoice::Single(PawnId::new(Color::Blue, 2)))
        );
    }

    #[test]
    fn test_empty_hand_cancels() {
        let mut bot = RandomBot::new(GameRng::new(0));
        assert_eq!(bot.select_card(Color::Green, &[]), Selection::Cancelled);
    }
}
