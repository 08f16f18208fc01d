//! Effect and target shapes.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::PawnId;
use crate::core::Color;

/// What a card does to the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effect {
    /// Off-track pawn enters on its entry cell; on-track pawn moves forward.
    EnterOrMove(u8),
    /// Move forward.
    Move(u8),
    /// Move backward.
    MoveBackward(u8),
    /// Distribute exactly this many forward steps over own pawns.
    SplitMove(u8),
    /// Swap the loop cells of an own pawn and another color's pawn.
    Exchange,
    /// Enter, or move forward capturing every pawn passed on the loop.
    EnterOrWipe(u8),
}

/// Shape of the target selection an effect needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Arity {
    Single,
    Pair,
    Split,
}

impl Arity {
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Arity::Single => "a single pawn",
            Arity::Pair => "a pair of pawns",
            Arity::Split => "a split of steps across pawns",
        }
    }
}

impl Effect {
    /// Signed displacement of a single-pawn move. Zero for `Exchange`.
    #[must_use]
    pub const fn steps(self) -> i16 {
        match self {
            Effect::EnterOrMove(n)
            | Effect::Move(n)
            | Effect::SplitMove(n)
            | Effect::EnterOrWipe(n) => n as i16,
            Effect::MoveBackward(n) => -(n as i16),
            Effect::Exchange => 0,
        }
    }

    #[must_use]
    pub const fn arity(self) -> Arity {
        match self {
            Effect::Exchange => Arity::Pair,
            Effect::SplitMove(_) => Arity::Split,
            _ => Arity::Single,
        }
    }

    /// Whether an off-track pawn may be brought onto the board.
    #[must_use]
    pub const fn can_enter(self) -> bool {
        matches!(self, Effect::EnterOrMove(_) | Effect::EnterOrWipe(_))
    }
}

/// Whose pawns a card may act on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorFilter {
    OwnPawns,
    OtherPawns,
}

impl ColorFilter {
    /// Whether `actor` may target a pawn owned by `owner`.
    #[must_use]
    pub fn admits(self, actor: Color, owner: Color) -> bool {
        match self {
            ColorFilter::OwnPawns => actor == owner,
            ColorFilter::OtherPawns => actor != owner,
        }
    }
}

/// Steps given to one pawn of a split move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Share {
    pub pawn: PawnId,
    pub steps: u8,
}

impl Share {
    #[must_use]
    pub const fn new(pawn: PawnId, steps: u8) -> Self {
        Self { pawn, steps }
    }
}

/// A player's target selection.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetChoice {
    /// One pawn, for every single-pawn effect.
    Single(PawnId),
    /// Own pawn then partner, for `Exchange`.
    Pair(PawnId, PawnId),
    /// Step distribution, for `SplitMove`.
    Split(SmallVec<[Share; 4]>),
}

impl TargetChoice {
    #[must_use]
    pub fn arity(&self) -> Arity {
        match self {
            TargetChoice::Single(_) => Arity::Single,
            TargetChoice::Pair(..) => Arity::Pair,
            TargetChoice::Split(_) => Arity::Split,
        }
    }

    /// Build a split from `(pawn, steps)` pairs.
    pub fn split(shares: impl IntoIterator<Item = (PawnId, u8)>) -> Self {
        TargetChoice::Split(shares.into_iter().map(|(p, s)| Share::new(p, s)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps() {
        assert_eq!(Effect::Move(8).steps(), 8);
        assert_eq!(Effect::MoveBackward(4).steps(), -4);
        assert_eq!(Effect::EnterOrWipe(14).steps(), 14);
        assert_eq!(Effect::Exchange.steps(), 0);
    }

    #[test]
    fn test_arity() {
        assert_eq!(Effect::Exchange.arity(), Arity::Pair);
        assert_eq!(Effect::SplitMove(7).arity(), Arity::Split);
        assert_eq!(Effect::EnterOrMove(1).arity(), Arity::Single);

        let choice = TargetChoice::split([(PawnId(0), 3), (PawnId(1), 4)]);
        assert_eq!(choice.arity(), Arity::Split);
        assert_eq!(TargetChoice::Pair(PawnId(0), PawnId(5)).arity(), Arity::Pair);
    }

    #[test]
    fn test_color_filter() {
        assert!(ColorFilter::OwnPawns.admits(Color::Red, Color::Red));
        assert!(!ColorFilter::OwnPawns.admits(Color::Red, Color::Blue));
        assert!(ColorFilter::OtherPawns.admits(Color::Red, Color::Blue));
        assert!(!ColorFilter::OtherPawns.admits(Color::Red, Color::Red));
    }

    #[test]
    fn test_serde_json() {
        let choice = TargetChoice::Pair(PawnId(2), PawnId(9));
        let json = serde_json::to_string(&choice).unwrap();
        let back: TargetChoice = serde_json::from_str(&json).unwrap();
        assert_eq!(back, choice);
    }
}
