//! Effect resolution - executing effects on the board.
//!
//! The `EffectResolver` applies one card's effect to a chosen target and
//! resolves the captures it causes. Application is all-or-nothing: the
//! effect runs against a scratch copy of the board, which replaces the real
//! one only if every step succeeded.
//!
//! Legality against the current projection is checked before the resolver
//! runs. The resolver re-checks the board geometry it depends on, so a
//! stale or hand-built choice is rejected instead of corrupting the board.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use super::effect::{Effect, Share, TargetChoice};
use super::filter::exchange_partners;
use crate::board::track::traversed;
use crate::board::{
    progress_on_loop, Board, Cell, PawnId, PawnPosition, ENTRY_PROGRESS, FINISH_PROGRESS,
};
use crate::cards::{Card, CardValue};
use crate::core::{RuleError, RuleResult};
use crate::events::BoardEvent;

/// Everything an applied effect did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Board events in the order they happened.
    pub events: Vec<BoardEvent>,
    /// Pawns sent back to their start pool.
    pub captured: SmallVec<[PawnId; 4]>,
}

impl Resolution {
    fn push(&mut self, event: BoardEvent) {
        if let BoardEvent::PawnCaptured { pawn, .. } = event {
            self.captured.push(pawn);
        }
        self.events.push(event);
    }
}

/// Applies card effects to a board.
pub struct EffectResolver;

impl EffectResolver {
    /// Apply `card`'s effect to `choice`.
    ///
    /// On error the board is left exactly as it was.
    pub fn apply_effect(
        board: &mut Board,
        card: &Card,
        choice: &TargetChoice,
    ) -> RuleResult<Resolution> {
        let effect = card.effect();
        if choice.arity() != effect.arity() {
            return Err(RuleError::InvalidEffectArity {
                value: card.value,
                expected: effect.arity().describe(),
            });
        }

        let mut next = board.clone();
        let mut out = Resolution::default();
        let value = card.value;

        match (effect, choice) {
            (Effect::EnterOrMove(n), TargetChoice::Single(id)) => {
                Self::enter_or_move(&mut next, *id, n, false, value, &mut out)?;
            }
            (Effect::EnterOrWipe(n), TargetChoice::Single(id)) => {
                Self::enter_or_move(&mut next, *id, n, true, value, &mut out)?;
            }
            (Effect::Move(n), TargetChoice::Single(id)) => {
                Self::step(&mut next, *id, i16::from(n), false, value, &mut out)?;
            }
            (Effect::MoveBackward(n), TargetChoice::Single(id)) => {
                Self::step(&mut next, *id, -i16::from(n), false, value, &mut out)?;
            }
            (Effect::Exchange, TargetChoice::Pair(own, other)) => {
                Self::exchange(&mut next, *own, *other, value, &mut out)?;
            }
            (Effect::SplitMove(n), TargetChoice::Split(shares)) => {
                Self::split(&mut next, shares, n, value, &mut out)?;
            }
            _ => {
                return Err(RuleError::InvalidEffectArity {
                    value,
                    expected: effect.arity().describe(),
                })
            }
        }

        log::debug!("{} resolved: {} events", card, out.events.len());
        *board = next;
        Ok(out)
    }

    /// Send `victim` back to its start pool.
    ///
    /// Only pawns on the shared loop can be captured; anything else is left
    /// alone and `None` is returned.
    pub fn capture(
        board: &mut Board,
        victim: PawnId,
        by: PawnId,
    ) -> RuleResult<Option<BoardEvent>> {
        let pawn = board.pawn_mut(victim)?;
        if !pawn.is_on_loop() {
            return Ok(None);
        }
        pawn.reset();
        log::info!("{} captured by {}", victim, by);
        Ok(Some(BoardEvent::PawnCaptured { pawn: victim, by }))
    }

    fn enter_or_move(
        board: &mut Board,
        id: PawnId,
        n: u8,
        wipe: bool,
        value: CardValue,
        out: &mut Resolution,
    ) -> RuleResult<()> {
        if board.pawn(id)?.on_track {
            Self::step(board, id, i16::from(n), wipe, value, out)
        } else {
            Self::enter(board, id, value, out)
        }
    }

    fn enter(
        board: &mut Board,
        id: PawnId,
        value: CardValue,
        out: &mut Resolution,
    ) -> RuleResult<()> {
        let pawn = *board.pawn(id)?;
        let holder = board
            .track()
            .occupant(Cell::entry(pawn.owner))
            .map(|p| (p.id, p.owner));

        let victim = match holder {
            Some((_, owner)) if owner == pawn.owner => {
                return Err(RuleError::IllegalTargetSelected { value })
            }
            Some((victim, _)) => Some(victim),
            None => None,
        };

        board.pawn_mut(id)?.enter();
        out.push(BoardEvent::PawnMoved {
            pawn: id,
            old_progress: 0,
            new_progress: ENTRY_PROGRESS,
            on_track: true,
        });

        if let Some(victim) = victim {
            if let Some(event) = Self::capture(board, victim, id)? {
                out.push(event);
            }
        }
        Ok(())
    }

    /// Move one pawn `steps` cells, capturing at the destination and, for a
    /// wipe, on every loop cell passed.
    fn step(
        board: &mut Board,
        id: PawnId,
        steps: i16,
        wipe: bool,
        value: CardValue,
        out: &mut Resolution,
    ) -> RuleResult<()> {
        let illegal = RuleError::IllegalTargetSelected { value };
        let pawn = *board.pawn(id)?;
        if !pawn.on_track || pawn.is_finished() {
            return Err(illegal);
        }

        let dest = i16::from(pawn.progress) + steps;
        if dest < i16::from(ENTRY_PROGRESS) || dest > i16::from(FINISH_PROGRESS) {
            return Err(illegal);
        }
        let dest = dest as u8;

        let mut victims: SmallVec<[PawnId; 4]> = SmallVec::new();
        {
            let track = board.track();
            for progress in traversed(pawn.progress, dest) {
                let Some(cell) = Cell::at(pawn.owner, progress) else {
                    continue;
                };
                let Some(other) = track.occupant(cell) else {
                    continue;
                };
                if other.position() == PawnPosition::Entry {
                    return Err(illegal);
                }
                if progress == dest {
                    if other.owner == pawn.owner || !cell.is_loop() {
                        return Err(illegal);
                    }
                    victims.push(other.id);
                } else if wipe && cell.is_loop() {
                    victims.push(other.id);
                }
            }
        }

        board.pawn_mut(id)?.progress = dest;
        out.push(BoardEvent::PawnMoved {
            pawn: id,
            old_progress: pawn.progress,
            new_progress: dest,
            on_track: true,
        });

        for victim in victims {
            if let Some(event) = Self::capture(board, victim, id)? {
                out.push(event);
            }
        }
        Ok(())
    }

    fn exchange(
        board: &mut Board,
        own: PawnId,
        other: PawnId,
        value: CardValue,
        out: &mut Resolution,
    ) -> RuleResult<()> {
        let illegal = RuleError::IllegalTargetSelected { value };
        let a = *board.pawn(own)?;
        let b = *board.pawn(other)?;
        if !exchange_partners(&a, board).contains(&other) {
            return Err(illegal);
        }
        let (Some(Cell::Loop(cell_a)), Some(Cell::Loop(cell_b))) =
            (Cell::at(a.owner, a.progress), Cell::at(b.owner, b.progress))
        else {
            return Err(illegal);
        };

        let new_a = progress_on_loop(a.owner, cell_b);
        let new_b = progress_on_loop(b.owner, cell_a);
        board.pawn_mut(own)?.progress = new_a;
        board.pawn_mut(other)?.progress = new_b;

        out.push(BoardEvent::PawnMoved {
            pawn: own,
            old_progress: a.progress,
            new_progress: new_a,
            on_track: true,
        });
        out.push(BoardEvent::PawnMoved {
            pawn: other,
            old_progress: b.progress,
            new_progress: new_b,
            on_track: true,
        });
        Ok(())
    }

    /// Move several pawns of one color by their shares.
    ///
    /// Each share must fit in the pawn's free run measured on the board
    /// before any of them moves. Free runs never overlap, so the moves
    /// cannot collide or capture.
    fn split(
        board: &mut Board,
        shares: &[Share],
        total: u8,
        value: CardValue,
        out: &mut Resolution,
    ) -> RuleResult<()> {
        let illegal = RuleError::IllegalTargetSelected { value };
        let sum: u16 = shares.iter().map(|s| u16::from(s.steps)).sum();
        if shares.is_empty() || sum != u16::from(total) {
            return Err(illegal);
        }

        let mut seen = FxHashSet::default();
        let mut owner = None;
        {
            let track = board.track();
            for share in shares {
                let pawn = board.pawn(share.pawn)?;
                if share.steps == 0 || !seen.insert(share.pawn) || !pawn.on_track {
                    return Err(illegal);
                }
                if *owner.get_or_insert(pawn.owner) != pawn.owner {
                    return Err(illegal);
                }
                if track.free_run(pawn, total) < share.steps {
                    return Err(illegal);
                }
            }
        }

        for share in shares {
            Self::step(board, share.pawn, i16::from(share.steps), false, value, out)?;
        }
        Ok(())
    }
}
