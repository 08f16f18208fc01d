//! Turn driver - runs turns by asking input sources for selections.

use smallvec::SmallVec;

use super::game::Game;
use super::input::{InputSource, Selection};
use super::projection::Projection;
use crate::cards::Card;
use crate::core::{Color, ColorMap, RuleError, RuleResult};
use crate::events::PresentationSink;

/// Selections a seat may get wrong before its turn is given up.
pub const MAX_ATTEMPTS: usize = 8;

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// A color finished all its pawns or outlasted every other seat.
    Winner(Color),
    /// `max_turns` was reached first.
    TurnLimit { turns: u32 },
}

impl GameResult {
    /// Check if a color won.
    #[must_use]
    pub fn is_winner(&self, color: Color) -> bool {
        matches!(self, GameResult::Winner(c) if *c == color)
    }
}

enum TargetOutcome {
    Resolved,
    Cancelled,
}

/// Play the active color's turn to completion.
///
/// Rejected selections are asked again up to `MAX_ATTEMPTS` times; after
/// that the selection is cancelled and the last error returned. A seat that
/// only ever backs out of its target selection gets `SelectionAbandoned`.
/// Events produced along the way are forwarded to `sink`.
pub fn play_turn(
    game: &mut Game,
    input: &mut dyn InputSource,
    sink: &mut dyn PresentationSink,
) -> RuleResult<()> {
    let color = game.active();
    let result = drive_turn(game, color, input);
    sink.on_events(&game.drain_events());
    result
}

fn drive_turn(game: &mut Game, color: Color, input: &mut dyn InputSource) -> RuleResult<()> {
    let mut last = None;
    for _ in 0..MAX_ATTEMPTS {
        let hand: SmallVec<[Card; 8]> = game.hand(color).iter().copied().collect();
        let card_id = match input.select_card(color, &hand) {
            Selection::Chosen(id) => id,
            Selection::Cancelled => return game.cancel_turn(color),
        };

        let projection = match game.select_card(color, card_id) {
            Ok(projection) => projection,
            Err(RuleError::NoLegalTarget { .. }) => return Ok(()),
            Err(err @ RuleError::CardNotInHand { .. }) => {
                log::warn!("{}: {}", color, err);
                last = Some(err);
                continue;
            }
            Err(err) => return Err(err),
        };

        match drive_target(game, color, &projection.card, &projection, input)? {
            TargetOutcome::Resolved => return Ok(()),
            TargetOutcome::Cancelled if game.active() != color || game.is_over() => return Ok(()),
            TargetOutcome::Cancelled => {}
        }
    }

    Err(last.unwrap_or(RuleError::SelectionAbandoned { color }))
}

fn drive_target(
    game: &mut Game,
    color: Color,
    card: &Card,
    projection: &Projection,
    input: &mut dyn InputSource,
) -> RuleResult<TargetOutcome> {
    let mut last = None;
    for _ in 0..MAX_ATTEMPTS {
        let choice = match input.select_target(color, card, projection, game.board()) {
            Selection::Chosen(choice) => choice,
            Selection::Cancelled => {
                game.cancel_turn(color)?;
                return Ok(TargetOutcome::Cancelled);
            }
        };
        match game.select_target(color, choice) {
            Ok(_) => return Ok(TargetOutcome::Resolved),
            Err(
                err @ (RuleError::IllegalTargetSelected { .. }
                | RuleError::InvalidEffectArity { .. }),
            ) => last = Some(err),
            Err(err) => return Err(err),
        }
    }

    game.cancel_turn(color)?;
    Err(last.unwrap_or(RuleError::IllegalTargetSelected { value: card.value }))
}

/// Play until a color wins or the configured turn limit is hit.
pub fn play_game(
    game: &mut Game,
    seats: &mut ColorMap<Box<dyn InputSource>>,
    sink: &mut dyn PresentationSink,
) -> RuleResult<GameResult> {
    sink.on_events(&game.drain_events());
    let max_turns = game.config().max_turns;

    loop {
        if let Some(winner) = game.winner() {
            return Ok(GameResult::Winner(winner));
        }
        if max_turns > 0 && game.turn_number() >= max_turns {
            log::info!("turn limit {} reached", max_turns);
            return Ok(GameResult::TurnLimit {
                turns: game.turn_number(),
            });
        }
        let color = game.active();
        play_turn(game, seats[color].as_mut(), sink)?;
    }
}
