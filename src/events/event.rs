//! Board event types.

use serde::{Deserialize, Serialize};

use crate::board::PawnId;
use crate::cards::CardId;
use crate::core::Color;

/// Something observable that happened on the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardEvent {
    /// A pawn changed progress. Entering is a move from 0 to 1.
    PawnMoved {
        pawn: PawnId,
        old_progress: u8,
        new_progress: u8,
        on_track: bool,
    },
    /// A pawn was sent back to its start pool.
    PawnCaptured { pawn: PawnId, by: PawnId },
    /// A card was dealt into a hand. The card id is only revealed to the
    /// hand's owner by the transport layer.
    CardDrawn { color: Color, card: CardId },
    /// A card was played from a hand.
    CardPlayed { color: Color, card: CardId },
    /// A card went to the discard pile without effect.
    CardDiscarded { color: Color, card: CardId },
    /// The discard pile was shuffled into the draw pile.
    Reshuffled { draw_pile: usize },
    /// Play passed to the next color.
    TurnPassed { from: Color, to: Color },
    /// A color gave up its seat.
    Forfeited(Color),
    /// A color finished all four pawns or outlasted every other seat.
    GameWon(Color),
}

impl BoardEvent {
    /// The pawn this event concerns, if any.
    #[must_use]
    pub fn pawn(&self) -> Option<PawnId> {
        match self {
            BoardEvent::PawnMoved { pawn, .. } | BoardEvent::PawnCaptured { pawn, .. } => {
                Some(*pawn)
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for BoardEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoardEvent::PawnMoved { pawn, old_progress, new_progress, .. } => {
                write!(f, "{} moved {} -> {}", pawn, old_progress, new_progress)
            }
            BoardEvent::PawnCaptured { pawn, by } => write!(f, "{} captured by {}", pawn, by),
            BoardEvent::CardDrawn { color, card } => write!(f, "{} drew {}", color, card),
            BoardEvent::CardPlayed { color, card } => write!(f, "{} played {}", color, card),
            BoardEvent::CardDiscarded { color, card } => write!(f, "{} discarded {}", color, card),
            BoardEvent::Reshuffled { draw_pile } => {
                write!(f, "reshuffled, {} cards to draw", draw_pile)
            }
            BoardEvent::TurnPassed { from, to } => write!(f, "turn passes {} -> {}", from, to),
            BoardEvent::Forfeited(color) => write!(f, "{} forfeited", color),
            BoardEvent::GameWon(color) => write!(f, "{} wins", color),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pawn_accessor() {
        let moved = BoardEvent::PawnMoved {
            pawn: PawnId(3),
            old_progress: 0,
            new_progress: 1,
            on_track: true,
        };
        assert_eq!(moved.pawn(), Some(PawnId(3)));
        assert_eq!(BoardEvent::Forfeited(Color::Red).pawn(), None);
    }

    #[test]
    fn test_display() {
        let event = BoardEvent::PawnCaptured {
            pawn: PawnId::new(Color::Red, 0),
            by: PawnId::new(Color::Blue, 1),
        };
        assert_eq!(event.to_string(), "Red1 captured by Blue2");
    }
}
