//! Board model: pawns, track geometry, occupancy and snapshots.
//!
//! ## Key Types
//!
//! - `Pawn` / `PawnId`: a token and its stable identifier
//! - `Cell`: a physical loop or home-lane cell
//! - `Track`: occupancy index over the current pawns
//! - `Board`: owner of all pawn state
//! - `BoardSnapshot`: serializable view for reconnect and observers

pub mod pawn;
pub mod snapshot;
pub mod state;
pub mod track;

pub use pawn::{Pawn, PawnId, PawnPosition, PawnStatus, PAWNS_PER_COLOR, PAWN_COUNT};
pub use snapshot::{BoardSnapshot, PawnState};
pub use state::Board;
pub use track::{
    progress_on_loop, Cell, Track, ENTRY_PROGRESS, FINISH_PROGRESS, FINISH_THRESHOLD,
    HOME_LANE_START, LOOP_END, LOOP_LEN, SEGMENT_LEN,
};
