//! Serializable board snapshots for reconnect and observer sync.
//!
//! The snapshot carries every pawn's color, progress and on-track flag plus
//! the turn context. The wire format belongs to the transport layer; the
//! crate offers a compact `bincode` encoding and plain serde for anything
//! else.

use serde::{Deserialize, Serialize};

use super::pawn::PawnId;
use super::state::Board;
use crate::core::{Color, RuleError, RuleResult};

/// One pawn's observable state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PawnState {
    pub id: PawnId,
    pub color: Color,
    pub progress: u8,
    pub on_track: bool,
}

/// Full observable board state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub pawns: Vec<PawnState>,
    pub active: Color,
    pub turn_number: u32,
    pub winner: Option<Color>,
}

impl BoardSnapshot {
    /// Capture a board together with its turn context.
    #[must_use]
    pub fn capture(board: &Board, active: Color, turn_number: u32, winner: Option<Color>) -> Self {
        let pawns = board
            .pawns()
            .iter()
            .map(|p| PawnState {
                id: p.id,
                color: p.owner,
                progress: p.progress,
                on_track: p.on_track,
            })
            .collect();
        Self {
            pawns,
            active,
            turn_number,
            winner,
        }
    }

    /// Rebuild the board, rejecting snapshots that break board invariants.
    pub fn restore(&self) -> RuleResult<Board> {
        for state in &self.pawns {
            if state.id.color() != state.color {
                return Err(RuleError::Snapshot(format!(
                    "{} recorded as {}",
                    state.id, state.color
                )));
            }
            if state.on_track != (state.progress > 0) {
                return Err(RuleError::Snapshot(format!(
                    "{} has inconsistent on-track flag",
                    state.id
                )));
            }
        }
        Board::with_placements(self.pawns.iter().map(|s| (s.id, s.progress)))
    }

    pub fn to_bytes(&self) -> RuleResult<Vec<u8>> {
        bincode::serialize(self).map_err(|e| RuleError::Snapshot(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> RuleResult<Self> {
        bincode::deserialize(bytes).map_err(|e| RuleError::Snapshot(e.to_string()))
    }
}
