//! Legality projection - which pawns a card may be played on.
//!
//! A `Projection` is computed for one card, one acting color and one board.
//! It is a pure function of those three: computing it twice on the same
//! board yields the same result and never touches pawn state.
//!
//! ## The Seven
//!
//! The Seven splits seven forward steps over the actor's pawns. Each
//! on-track pawn contributes the number of free cells directly ahead of it
//! (at most seven, stopping at the first occupied cell or at the finish).
//! A pawn with at least one free cell is a legal target, and the card is
//! playable only when the free cells add up to seven or more.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::{Board, PawnId, PawnStatus, Track};
use crate::cards::Card;
use crate::core::{Color, RuleError, RuleResult};
use crate::effects::{evaluate, exchange_partners, Effect, Share, TargetChoice};

/// Candidate pawn list for one card.
pub type Candidates = SmallVec<[PawnId; 12]>;

/// Legal targets of a card on a board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projection {
    pub card: Card,
    /// Whether the card may be played at all.
    pub playable: bool,
    /// Candidates that passed every check, in candidate order.
    pub legal_targets: SmallVec<[PawnId; 4]>,
    /// Status of every candidate.
    pub statuses: Vec<(PawnId, PawnStatus)>,
    /// Free cells ahead of each legal Seven target.
    pub runs: SmallVec<[(PawnId, u8); 4]>,
    /// Sum of `runs`.
    pub slack: u8,
}

/// Pawns a card may act on for `actor`, before any filter.
#[must_use]
pub fn candidates_for(card: &Card, actor: Color, board: &Board) -> Candidates {
    let filter = card.color_filter();
    board
        .pawns()
        .iter()
        .filter(|p| filter.admits(actor, p.owner))
        .map(|p| p.id)
        .collect()
}

/// Evaluate `card` against each candidate.
pub fn compute_legal_targets(
    card: &Card,
    candidates: &[PawnId],
    board: &Board,
) -> RuleResult<Projection> {
    let track = board.track();
    let mut projection = Projection {
        card: *card,
        playable: true,
        legal_targets: SmallVec::new(),
        statuses: Vec::with_capacity(candidates.len()),
        runs: SmallVec::new(),
        slack: 0,
    };

    match card.effect() {
        Effect::SplitMove(total) => {
            project_split(&mut projection, candidates, board, &track, total)?;
        }
        _ => {
            for &id in candidates {
                let pawn = board.pawn(id)?;
                let status = evaluate(card, pawn, board, &track);
                if status == PawnStatus::CanMove {
                    projection.legal_targets.push(id);
                }
                projection.statuses.push((id, status));
            }
        }
    }

    log::debug!(
        "{}: {} legal of {} candidates, playable={}",
        card,
        projection.legal_targets.len(),
        candidates.len(),
        projection.playable
    );
    Ok(projection)
}

fn project_split(
    projection: &mut Projection,
    candidates: &[PawnId],
    board: &Board,
    track: &Track<'_>,
    total: u8,
) -> RuleResult<()> {
    let card = projection.card;
    for &id in candidates {
        let pawn = board.pawn(id)?;
        let mut status = evaluate(&card, pawn, board, track);
        if status == PawnStatus::CanMove {
            let run = track.free_run(pawn, total);
            if run > 0 {
                projection.legal_targets.push(id);
                projection.runs.push((id, run));
                projection.slack += run;
            } else {
                status = PawnStatus::CannotMove;
            }
        }
        projection.statuses.push((id, status));
    }
    projection.playable = projection.slack >= total;
    Ok(())
}

impl Projection {
    /// Project `card` for `actor` over every candidate pawn.
    pub fn project(card: &Card, actor: Color, board: &Board) -> RuleResult<Self> {
        compute_legal_targets(card, &candidates_for(card, actor, board), board)
    }

    /// The card can be played on at least one target.
    #[must_use]
    pub fn has_move(&self) -> bool {
        self.playable && !self.legal_targets.is_empty()
    }

    #[must_use]
    pub fn is_legal(&self, pawn: PawnId) -> bool {
        self.legal_targets.contains(&pawn)
    }

    /// Status of a pawn; `Untested` if it was not a candidate.
    #[must_use]
    pub fn status(&self, pawn: PawnId) -> PawnStatus {
        self.statuses
            .iter()
            .find(|(id, _)| *id == pawn)
            .map_or(PawnStatus::Untested, |(_, status)| *status)
    }

    /// Free cells ahead of a Seven target.
    #[must_use]
    pub fn run(&self, pawn: PawnId) -> u8 {
        self.runs
            .iter()
            .find(|(id, _)| *id == pawn)
            .map_or(0, |(_, run)| *run)
    }

    /// Check a target selection against this projection.
    ///
    /// `board` must be the board the projection was computed on.
    pub fn check_choice(&self, choice: &TargetChoice, board: &Board) -> RuleResult<()> {
        let effect = self.card.effect();
        let value = self.card.value;
        if choice.arity() != effect.arity() {
            return Err(RuleError::InvalidEffectArity {
                value,
                expected: effect.arity().describe(),
            });
        }

        let legal = match choice {
            TargetChoice::Single(pawn) => self.is_legal(*pawn),
            TargetChoice::Pair(own, other) => {
                self.is_legal(*own) && exchange_partners(board.pawn(*own)?, board).contains(other)
            }
            TargetChoice::Split(shares) => match effect {
                Effect::SplitMove(total) => self.split_fits(shares, total),
                _ => false,
            },
        };

        if legal {
            Ok(())
        } else {
            Err(RuleError::IllegalTargetSelected { value })
        }
    }

    fn split_fits(&self, shares: &[Share], total: u8) -> bool {
        if shares.is_empty() {
            return false;
        }
        let mut sum: u16 = 0;
        for (i, share) in shares.iter().enumerate() {
            if share.steps == 0 || share.steps > self.run(share.pawn) {
                return false;
            }
            if shares[..i].iter().any(|s| s.pawn == share.pawn) {
                return false;
            }
            sum += u16::from(share.steps);
        }
        sum == u16::from(total)
    }
}
