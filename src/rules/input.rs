//! Input sources - where card and target selections come from.
//!
//! The turn driver blocks on an `InputSource` whenever a human or bot has
//! to choose. A UI, a network seat and a bot all sit behind the same trait;
//! returning `Selection::Cancelled` aborts the pending selection.

use crate::board::Board;
use crate::cards::{Card, CardId};
use crate::core::Color;
use crate::effects::TargetChoice;

use super::projection::Projection;

/// Outcome of a selection request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection<T> {
    Chosen(T),
    Cancelled,
}

impl<T> Selection<T> {
    #[must_use]
    pub fn chosen(self) -> Option<T> {
        match self {
            Selection::Chosen(value) => Some(value),
            Selection::Cancelled => None,
        }
    }
}

/// Provider of player decisions.
pub trait InputSource {
    /// Pick a card from `hand` to play.
    fn select_card(&mut self, color: Color, hand: &[Card]) -> Selection<CardId>;

    /// Pick the target(s) for `card` among the projection's legal targets.
    fn select_target(
        &mut self,
        color: Color,
        card: &Card,
        projection: &Projection,
        board: &Board,
    ) -> Selection<TargetChoice>;
}
