//! Pawns - the movable tokens.
//!
//! A pawn's location is a single `progress` value in its own color's frame:
//!
//! | progress | meaning |
//! |---|---|
//! | 0 | waiting in the start pool (off-track) |
//! | 1 | on its color's entry cell |
//! | 2..=70 | on the shared loop |
//! | 71..=74 | in the color's private home lane |
//! | 75 | finished |
//!
//! `board::track` maps progress values onto physical cells.

use serde::{Deserialize, Serialize};

use super::track::{FINISH_PROGRESS, HOME_LANE_START};
use crate::core::{Color, COLOR_COUNT};

/// Pawns per color.
pub const PAWNS_PER_COLOR: usize = 4;

/// Total pawns on a table.
pub const PAWN_COUNT: usize = PAWNS_PER_COLOR * COLOR_COUNT;

/// Stable pawn identifier: `color_index * 4 + slot`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PawnId(pub u8);

impl PawnId {
    /// Identifier of the `slot`-th pawn (0..4) of `color`.
    #[must_use]
    pub const fn new(color: Color, slot: u8) -> Self {
        Self(color.index() as u8 * PAWNS_PER_COLOR as u8 + slot)
    }

    /// The owning color encoded in the id.
    #[must_use]
    pub const fn color(self) -> Color {
        Color::from_index(self.0 as usize / PAWNS_PER_COLOR)
    }

    /// Slot within the color (0..4).
    #[must_use]
    pub const fn slot(self) -> u8 {
        self.0 % PAWNS_PER_COLOR as u8
    }

    /// Index into the board's pawn array.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for PawnId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.color(), self.slot() + 1)
    }
}

/// Where a pawn is, derived from `progress` and `on_track`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PawnPosition {
    /// In the start pool.
    Out,
    /// On its own entry cell. Cannot be passed, landed on or captured.
    Entry,
    /// Anywhere else on the shared loop.
    Loop,
    /// In its private home lane.
    InHouse,
    /// Past the last home cell.
    Finished,
}

/// Playability tag produced by a legality evaluation.
///
/// Transient: it belongs to a `Projection`, never to the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PawnStatus {
    #[default]
    Untested,
    CanMove,
    CannotMove,
    /// Off-track pawn whose entry cell is held by a sibling.
    EntryBlocked,
}

/// A pawn on the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pawn {
    pub id: PawnId,
    pub owner: Color,
    pub progress: u8,
    pub on_track: bool,
}

impl Pawn {
    /// A pawn waiting in its start pool.
    #[must_use]
    pub const fn new(id: PawnId) -> Self {
        Self {
            id,
            owner: id.color(),
            progress: 0,
            on_track: false,
        }
    }

    #[must_use]
    pub fn position(&self) -> PawnPosition {
        match (self.on_track, self.progress) {
            (false, _) => PawnPosition::Out,
            (true, 1) => PawnPosition::Entry,
            (true, p) if p >= FINISH_PROGRESS => PawnPosition::Finished,
            (true, p) if p >= HOME_LANE_START => PawnPosition::InHouse,
            (true, _) => PawnPosition::Loop,
        }
    }

    /// On the shared loop, entry cell included.
    #[must_use]
    pub fn is_on_loop(&self) -> bool {
        matches!(self.position(), PawnPosition::Entry | PawnPosition::Loop)
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.position() == PawnPosition::Finished
    }

    /// Put the pawn on its entry cell.
    pub(crate) fn enter(&mut self) {
        self.on_track = true;
        self.progress = 1;
    }

    /// Send the pawn back to its start pool.
    pub(crate) fn reset(&mut self) {
        self.on_track = false;
        self.progress = 0;
    }
}
