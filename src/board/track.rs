//! Track geometry and occupancy queries.
//!
//! The shared loop has 72 cells, 18 per color segment. A color's entry cell
//! is the first cell of its segment. Pawns travel 70 loop cells (progress
//! 1..=70), turn into their private four-cell home lane (71..=74) and finish
//! by stepping exactly onto progress 75.
//!
//! `Track` is a read-only occupancy index over a pawn slice. It is rebuilt
//! from the board whenever it is needed; it never owns pawn state.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::pawn::{Pawn, PawnPosition};
use crate::core::{Color, COLOR_COUNT};

/// Cells per color segment.
pub const SEGMENT_LEN: u8 = 18;

/// Cells on the shared loop.
pub const LOOP_LEN: u8 = SEGMENT_LEN * COLOR_COUNT as u8;

/// Progress of a pawn standing on its entry cell.
pub const ENTRY_PROGRESS: u8 = 1;

/// Last progress value on the shared loop.
pub const LOOP_END: u8 = 70;

/// First progress value in the home lane.
pub const HOME_LANE_START: u8 = LOOP_END + 1;

/// Last home-lane cell. No move may carry a pawn beyond `FINISH_PROGRESS`.
pub const FINISH_THRESHOLD: u8 = 74;

/// Progress of a finished pawn.
pub const FINISH_PROGRESS: u8 = FINISH_THRESHOLD + 1;

/// A physical cell of the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Shared loop cell, 0..72.
    Loop(u8),
    /// Private home-lane cell, lane 0..4.
    Home { color: Color, lane: u8 },
}

impl Cell {
    /// The loop cell a color's pawns enter on.
    #[must_use]
    pub const fn entry(color: Color) -> Self {
        Cell::Loop(color.index() as u8 * SEGMENT_LEN)
    }

    /// Cell of a pawn of `color` at `progress`. `None` off the board
    /// (start pool or finished).
    #[must_use]
    pub fn at(color: Color, progress: u8) -> Option<Self> {
        match progress {
            ENTRY_PROGRESS..=LOOP_END => {
                let offset = color.index() as u16 * SEGMENT_LEN as u16 + progress as u16 - 1;
                Some(Cell::Loop((offset % LOOP_LEN as u16) as u8))
            }
            HOME_LANE_START..=FINISH_THRESHOLD => Some(Cell::Home {
                color,
                lane: progress - HOME_LANE_START,
            }),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_loop(self) -> bool {
        matches!(self, Cell::Loop(_))
    }
}

/// Progress a pawn of `color` would have standing on loop cell `index`.
///
/// Ranges over `1..=72`; values above `LOOP_END` are the two cells behind
/// the color's entry that its own pawns never reach by moving.
#[must_use]
pub fn progress_on_loop(color: Color, index: u8) -> u8 {
    let start = color.index() as u16 * SEGMENT_LEN as u16;
    let rel = (index as u16 + LOOP_LEN as u16 - start) % LOOP_LEN as u16;
    rel as u8 + 1
}

/// Progress values crossed by a move from `from` to `to`, start excluded,
/// destination included. Works in both directions.
pub fn traversed(from: u8, to: u8) -> impl Iterator<Item = u8> {
    let forward = to >= from;
    let steps = if forward { to - from } else { from - to };
    (1..=steps).map(move |k| if forward { from + k } else { from - k })
}

/// Occupancy index over a set of pawns.
#[derive(Clone, Debug)]
pub struct Track<'a> {
    pawns: &'a [Pawn],
    cells: FxHashMap<Cell, usize>,
}

impl<'a> Track<'a> {
    /// Index every pawn that stands on a cell.
    #[must_use]
    pub fn new(pawns: &'a [Pawn]) -> Self {
        let cells = pawns
            .iter()
            .enumerate()
            .filter(|(_, pawn)| pawn.on_track)
            .filter_map(|(i, pawn)| Cell::at(pawn.owner, pawn.progress).map(|cell| (cell, i)))
            .collect();
        Self { pawns, cells }
    }

    /// The pawn standing on `cell`, if any.
    #[must_use]
    pub fn occupant(&self, cell: Cell) -> Option<&'a Pawn> {
        self.cells.get(&cell).map(|&i| &self.pawns[i])
    }

    #[must_use]
    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.cells.contains_key(&cell)
    }

    /// The pawn on the cell a pawn of `color` would reach at `progress`.
    #[must_use]
    pub fn occupant_at(&self, color: Color, progress: u8) -> Option<&'a Pawn> {
        Cell::at(color, progress).and_then(|cell| self.occupant(cell))
    }

    /// Pawns on the cells between `from` and `to` in `color`'s frame,
    /// start excluded and destination included (`(from, to]` forwards,
    /// `[to, from)` backwards).
    #[must_use]
    pub fn pawns_in_range(&self, color: Color, from: u8, to: u8) -> SmallVec<[&'a Pawn; 4]> {
        traversed(from, to)
            .filter_map(|progress| self.occupant_at(color, progress))
            .collect()
    }

    /// Consecutive steps a pawn can take before hitting an occupied cell,
    /// capped at `max` and at `FINISH_PROGRESS`.
    #[must_use]
    pub fn free_run(&self, pawn: &Pawn, max: u8) -> u8 {
        let mut run = 0;
        while run < max {
            let next = pawn.progress + run + 1;
            if next > FINISH_PROGRESS || self.occupant_at(pawn.owner, next).is_some() {
                break;
            }
            run += 1;
        }
        run
    }

    /// Whether any pawn sits on its own entry cell along the path.
    #[must_use]
    pub fn entry_guard_on_path(&self, color: Color, from: u8, to: u8) -> bool {
        self.pawns_in_range(color, from, to)
            .iter()
            .any(|p| p.position() == PawnPosition::Entry)
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
