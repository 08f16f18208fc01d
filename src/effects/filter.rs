//! Target filters.
//!
//! A card carries an ordered list of `Filter`s. A pawn is a legal target
//! when every filter passes (checked in order, stopping at the first
//! failure) and the effect's own precondition holds.
//!
//! ## Rules
//!
//! - `OnBoard`: the pawn is on the track.
//! - `Move`: the move stays within the finish, passes no pawn guarding its
//!   entry cell, and does not land on a home-lane pawn or a sibling.
//! - `Parteu`: an off-track pawn may enter unless a sibling holds its entry
//!   cell; an on-track pawn must pass `Move`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::effect::Effect;
use crate::board::{
    progress_on_loop, Board, Cell, Pawn, PawnId, PawnPosition, PawnStatus, Track, ENTRY_PROGRESS,
    FINISH_PROGRESS, LOOP_END,
};
use crate::cards::Card;

/// Filter identifiers used by the card binding table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Filter {
    OnBoard,
    Move,
    Parteu,
}

impl Filter {
    /// Evaluate this filter for a pawn moved by `steps`.
    #[must_use]
    pub fn check(self, pawn: &Pawn, steps: i16, track: &Track<'_>) -> PawnStatus {
        let pass = match self {
            Filter::OnBoard => on_board(pawn),
            Filter::Move => move_filtering(pawn, steps, track),
            Filter::Parteu => return parteu(pawn, steps, track),
        };
        status(pass)
    }
}

fn status(pass: bool) -> PawnStatus {
    if pass {
        PawnStatus::CanMove
    } else {
        PawnStatus::CannotMove
    }
}

#[must_use]
pub fn on_board(pawn: &Pawn) -> bool {
    pawn.on_track
}

/// Whether `pawn` may move `steps` cells (negative moves backward).
#[must_use]
pub fn move_filtering(pawn: &Pawn, steps: i16, track: &Track<'_>) -> bool {
    let dest = i16::from(pawn.progress) + steps;
    if dest > i16::from(FINISH_PROGRESS) || dest < i16::from(ENTRY_PROGRESS) {
        return false;
    }
    let dest = dest as u8;

    if track.entry_guard_on_path(pawn.owner, pawn.progress, dest) {
        return false;
    }

    match track.occupant_at(pawn.owner, dest) {
        Some(other) if other.id == pawn.id => true,
        Some(other) => other.position() != PawnPosition::InHouse && other.owner != pawn.owner,
        None => true,
    }
}

/// Entry check for off-track pawns, movement check otherwise.
#[must_use]
pub fn parteu(pawn: &Pawn, steps: i16, track: &Track<'_>) -> PawnStatus {
    if pawn.on_track {
        return status(move_filtering(pawn, steps, track));
    }
    match track.occupant(Cell::entry(pawn.owner)) {
        Some(holder) if holder.owner == pawn.owner => PawnStatus::EntryBlocked,
        _ => PawnStatus::CanMove,
    }
}

/// Pawns of other colors an own pawn on the loop may swap cells with.
///
/// Entry cells count as loop cells. Both pawns must stay within the loop in
/// their own frames after the swap.
#[must_use]
pub fn exchange_partners(pawn: &Pawn, board: &Board) -> SmallVec<[PawnId; 12]> {
    let Some(Cell::Loop(own_cell)) = Cell::at(pawn.owner, pawn.progress) else {
        return SmallVec::new();
    };
    if !pawn.is_on_loop() {
        return SmallVec::new();
    }

    board
        .pawns_except(pawn.owner)
        .filter(|other| other.is_on_loop())
        .filter_map(|other| match Cell::at(other.owner, other.progress) {
            Some(Cell::Loop(other_cell)) => {
                let fits = progress_on_loop(pawn.owner, other_cell) <= LOOP_END
                    && progress_on_loop(other.owner, own_cell) <= LOOP_END;
                fits.then_some(other.id)
            }
            _ => None,
        })
        .collect()
}

/// Effect-specific condition checked once the card's filters pass.
#[must_use]
pub fn precondition(effect: Effect, pawn: &Pawn, board: &Board, track: &Track<'_>) -> bool {
    if pawn.is_finished() {
        return false;
    }
    match effect {
        Effect::MoveBackward(n) => move_filtering(pawn, -i16::from(n), track),
        Effect::Exchange => !exchange_partners(pawn, board).is_empty(),
        Effect::EnterOrMove(_)
        | Effect::Move(_)
        | Effect::SplitMove(_)
        | Effect::EnterOrWipe(_) => true,
    }
}

/// Composite check of a card against one pawn.
#[must_use]
pub fn evaluate(card: &Card, pawn: &Pawn, board: &Board, track: &Track<'_>) -> PawnStatus {
    let effect = card.effect();
    let steps = effect.steps();
    for filter in card.filters() {
        let result = filter.check(pawn, steps, track);
        if result != PawnStatus::CanMove {
            return result;
        }
    }
    status(precondition(effect, pawn, board, track))
}
