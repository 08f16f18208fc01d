//! Board state: every pawn on the table.
//!
//! The board is the single owner of pawn state. Queries go through
//! `Board::track()`, which indexes the current pawns by cell; mutation is
//! reserved to the effect resolver.

use serde::{Deserialize, Serialize};

use super::pawn::{Pawn, PawnId, PAWNS_PER_COLOR, PAWN_COUNT};
use super::track::{Cell, Track, FINISH_PROGRESS};
use crate::core::{Color, RuleError, RuleResult};

/// All sixteen pawns.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    pawns: [Pawn; PAWN_COUNT],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// A board with every pawn in its start pool.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pawns: std::array::from_fn(|i| Pawn::new(PawnId(i as u8))),
        }
    }

    /// Build a board from explicit pawn placements, checking invariants.
    ///
    /// Pawns not listed stay in their start pool.
    pub fn with_placements(
        placements: impl IntoIterator<Item = (PawnId, u8)>,
    ) -> RuleResult<Self> {
        let mut board = Self::new();
        for (id, progress) in placements {
            let pawn = board.pawn_mut(id)?;
            pawn.progress = progress;
            pawn.on_track = progress > 0;
        }
        board.validate()?;
        Ok(board)
    }

    #[must_use]
    pub fn pawns(&self) -> &[Pawn] {
        &self.pawns
    }

    /// Look up a pawn.
    pub fn pawn(&self, id: PawnId) -> RuleResult<&Pawn> {
        self.pawns.get(id.index()).ok_or(RuleError::UnknownPawn(id))
    }

    pub(crate) fn pawn_mut(&mut self, id: PawnId) -> RuleResult<&mut Pawn> {
        self.pawns.get_mut(id.index()).ok_or(RuleError::UnknownPawn(id))
    }

    /// The four pawns of a color.
    #[must_use]
    pub fn pawns_of(&self, color: Color) -> &[Pawn] {
        let start = color.index() * PAWNS_PER_COLOR;
        &self.pawns[start..start + PAWNS_PER_COLOR]
    }

    /// Pawns of every color except `color`.
    pub fn pawns_except(&self, color: Color) -> impl Iterator<Item = &Pawn> {
        self.pawns.iter().filter(move |p| p.owner != color)
    }

    /// Occupancy index for the current placement.
    #[must_use]
    pub fn track(&self) -> Track<'_> {
        Track::new(&self.pawns)
    }

    #[must_use]
    pub fn finished_count(&self, color: Color) -> usize {
        self.pawns_of(color).iter().filter(|p| p.is_finished()).count()
    }

    /// All four pawns of `color` have finished.
    #[must_use]
    pub fn has_won(&self, color: Color) -> bool {
        self.finished_count(color) == PAWNS_PER_COLOR
    }

    /// Check the board invariants: off-track pawns have progress 0,
    /// progress never exceeds the finish, at most one pawn per cell.
    pub fn validate(&self) -> RuleResult<()> {
        let mut seen = rustc_hash::FxHashSet::default();
        for pawn in &self.pawns {
            if !pawn.on_track && pawn.progress != 0 {
                return Err(RuleError::Snapshot(format!(
                    "{} is off-track with progress {}",
                    pawn.id, pawn.progress
                )));
            }
            if pawn.progress > FINISH_PROGRESS {
                return Err(RuleError::Snapshot(format!(
                    "{} is beyond the finish at {}",
                    pawn.id, pawn.progress
                )));
            }
            if let Some(cell) = Cell::at(pawn.owner, pawn.progress).filter(|_| pawn.on_track) {
                if !seen.insert(cell) {
                    return Err(RuleError::Snapshot(format!(
                        "{} shares {:?} with another pawn",
                        pawn.id, cell
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board() {
        let board = Board::new();
        assert_eq!(board.pawns().len(), 16);
        assert!(board.pawns().iter().all(|p| !p.on_track && p.progress == 0));
        assert!(board.track().is_empty());
    }

    #[test]
    fn test_pawns_of() {
        let board = Board::new();
        for color in Color::all() {
            let pawns = board.pawns_of(color);
            assert_eq!(pawns.len(), 4);
            assert!(pawns.iter().all(|p| p.owner == color));
        }
        assert_eq!(board.pawns_except(Color::Red).count(), 12);
    }

    #[test]
    fn test_with_placements() {
        let id = PawnId::new(Color::Green, 2);
        let board = Board::with_placements([(id, 30)]).unwrap();
        let pawn = board.pawn(id).unwrap();
        assert!(pawn.on_track);
        assert_eq!(pawn.progress, 30);
    }

    #[test]
    fn test_rejects_shared_cell() {
        // Blue progress 19 and Green progress 1 are both loop cell 18.
        let result = Board::with_placements([
            (PawnId::new(Color::Blue, 0), 19),
            (PawnId::new(Color::Green, 0), 1),
        ]);
        assert!(matches!(result, Err(RuleError::Snapshot(_))));
    }

    #[test]
    fn test_finished_pawns_do_not_collide() {
        let board = Board::with_placements(
            (0..4).map(|slot| (PawnId::new(Color::Red, slot), FINISH_PROGRESS)),
        )
        .unwrap();
        assert!(board.has_won(Color::Red));
        assert!(!board.has_won(Color::Blue));
    }

    #[test]
    fn test_unknown_pawn() {
        let board = Board::new();
        assert_eq!(board.pawn(PawnId(40)), Err(RuleError::UnknownPawn(PawnId(40))));
    }
}
