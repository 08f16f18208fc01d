//! The turn state machine.
//!
//! A `Game` owns the board and the deck of one table and accepts commands
//! from the active color only. Each turn walks through
//!
//! ```text
//! AwaitingCardSelection -> AwaitingTargetSelection -> Resolving -> TurnComplete
//! ```
//!
//! and either passes play to the next seated color or ends in
//! `GameWon(color)`. Every rejected command leaves the game exactly as it
//! was, except `NoLegalTarget`, which is reported once the unplayable card
//! has been settled and play has moved on.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::projection::Projection;
use crate::board::{Board, BoardSnapshot, PawnId};
use crate::cards::{Card, CardId, Deck, DeckState, Draw};
use crate::core::{
    Color, ColorMap, GameConfig, GameRng, RuleError, RuleResult, UnplayablePolicy, COLOR_COUNT,
};
use crate::effects::{EffectResolver, Resolution, TargetChoice};
use crate::events::BoardEvent;

/// Where the current turn stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    AwaitingCardSelection,
    AwaitingTargetSelection,
    Resolving,
    TurnComplete,
    GameWon(Color),
}

impl TurnPhase {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            TurnPhase::AwaitingCardSelection => "awaiting card selection",
            TurnPhase::AwaitingTargetSelection => "awaiting target selection",
            TurnPhase::Resolving => "resolving",
            TurnPhase::TurnComplete => "completing the turn",
            TurnPhase::GameWon(_) => "the game is won",
        }
    }
}

/// How a turn ended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOutcome {
    Played {
        choice: TargetChoice,
        captured: SmallVec<[PawnId; 4]>,
    },
    /// The card had no legal target.
    Unplayable { returned_to_hand: bool },
    Forfeited,
}

/// One completed turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub turn: u32,
    pub color: Color,
    pub card: Option<Card>,
    pub outcome: TurnOutcome,
}

/// Everything needed to resume a game where it stood: the board, every
/// card location with the shuffle state, the seats and the history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub config: GameConfig,
    pub board: BoardSnapshot,
    pub deck: DeckState,
    pub forfeited: ColorMap<bool>,
    pub history: Vector<TurnRecord>,
}

impl GameSnapshot {
    pub fn to_bytes(&self) -> RuleResult<Vec<u8>> {
        bincode::serialize(self).map_err(|e| RuleError::Snapshot(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> RuleResult<Self> {
        bincode::deserialize(bytes).map_err(|e| RuleError::Snapshot(e.to_string()))
    }
}

#[derive(Clone, Debug)]
struct Pending {
    card: Card,
    projection: Projection,
}

/// One table of Tock.
#[derive(Clone, Debug)]
pub struct Game {
    config: GameConfig,
    board: Board,
    deck: Deck,
    active: Color,
    phase: TurnPhase,
    pending: Option<Pending>,
    forfeited: ColorMap<bool>,
    turn_number: u32,
    history: Vector<TurnRecord>,
    events: Vec<BoardEvent>,
}

impl Game {
    /// Shuffle a fresh deck, deal every hand and seat Blue first.
    pub fn new(config: GameConfig) -> RuleResult<Self> {
        config.validate()?;
        let deck = Deck::new(config.jokers, GameRng::new(config.seed));
        Self::from_parts(config, Board::new(), deck)
    }

    /// Start from an existing board and deck. Hands are topped up to
    /// `hand_size`.
    pub fn from_parts(config: GameConfig, board: Board, deck: Deck) -> RuleResult<Self> {
        config.validate()?;
        board.validate()?;
        let mut game = Self {
            config,
            board,
            deck,
            active: Color::Blue,
            phase: TurnPhase::AwaitingCardSelection,
            pending: None,
            forfeited: ColorMap::with_default(),
            turn_number: 0,
            history: Vector::new(),
            events: Vec::new(),
        };
        for color in Color::all() {
            game.refill(color)?;
        }
        log::info!("game ready, seed {}", game.config.seed);
        Ok(game)
    }

    /// Resume a saved game at card selection for the saved active color.
    pub fn restore(snapshot: GameSnapshot) -> RuleResult<Self> {
        let GameSnapshot {
            config,
            board,
            deck,
            forfeited,
            history,
        } = snapshot;
        config.validate()?;
        let deck = Deck::from_state(deck)?;
        if deck.total_cards() != config.deck_size() {
            return Err(RuleError::Snapshot(format!(
                "{} cards in circulation, expected {}",
                deck.total_cards(),
                config.deck_size()
            )));
        }
        if history.len() != board.turn_number as usize {
            return Err(RuleError::Snapshot(format!(
                "{} turns recorded at turn {}",
                history.len(),
                board.turn_number
            )));
        }
        if board.winner.is_none() && forfeited[board.active] {
            return Err(RuleError::Snapshot(format!(
                "{} to play but forfeited",
                board.active
            )));
        }

        let phase = board
            .winner
            .map_or(TurnPhase::AwaitingCardSelection, TurnPhase::GameWon);
        log::info!("game restored at turn {}, {} to play", board.turn_number, board.active);
        Ok(Self {
            board: board.restore()?,
            deck,
            active: board.active,
            phase,
            pending: None,
            forfeited,
            turn_number: board.turn_number,
            history,
            events: Vec::new(),
            config,
        })
    }

    // === Commands ===

    /// Choose a card from the active hand.
    ///
    /// Returns the card's projection. A card with no legal target is
    /// settled per `UnplayablePolicy`, the turn ends and `NoLegalTarget` is
    /// returned.
    pub fn select_card(&mut self, color: Color, card: CardId) -> RuleResult<Projection> {
        self.expect_phase(color, TurnPhase::AwaitingCardSelection)?;
        let card = *self
            .deck
            .hand_card(color, card)
            .ok_or(RuleError::CardNotInHand { card, color })?;
        let projection = Projection::project(&card, color, &self.board)?;
        self.deck.take_from_hand(color, card.id)?;

        if !projection.has_move() {
            self.settle_unplayable(color, card)?;
            return Err(RuleError::NoLegalTarget {
                card: card.id,
                value: card.value,
            });
        }

        self.pending = Some(Pending {
            card,
            projection: projection.clone(),
        });
        self.phase = TurnPhase::AwaitingTargetSelection;
        Ok(projection)
    }

    /// Choose the target(s) of the pending card and resolve it.
    pub fn select_target(&mut self, color: Color, choice: TargetChoice) -> RuleResult<Resolution> {
        self.expect_phase(color, TurnPhase::AwaitingTargetSelection)?;
        let pending = self.pending.as_ref().ok_or(RuleError::WrongPhase {
            phase: self.phase.name(),
        })?;
        if let Err(err) = pending.projection.check_choice(&choice, &self.board) {
            log::warn!("{} rejected: {}", color, err);
            return Err(err);
        }
        let card = pending.card;

        self.phase = TurnPhase::Resolving;
        let resolution = match EffectResolver::apply_effect(&mut self.board, &card, &choice) {
            Ok(resolution) => resolution,
            Err(err) => {
                log::warn!("{} rejected: {}", color, err);
                self.phase = TurnPhase::AwaitingTargetSelection;
                return Err(err);
            }
        };
        self.pending = None;

        self.events.push(BoardEvent::CardPlayed { color, card: card.id });
        self.events.extend(resolution.events.iter().copied());
        self.deck.discard(card);
        self.refill(color)?;

        self.record(
            color,
            Some(card),
            TurnOutcome::Played {
                choice,
                captured: resolution.captured.clone(),
            },
        );
        self.finish_turn(color);
        Ok(resolution)
    }

    /// Abort the current selection. The pending card goes back to the hand.
    ///
    /// With `forfeit_on_cancel` the color also gives up its seat.
    pub fn cancel_turn(&mut self, color: Color) -> RuleResult<()> {
        self.expect_active(color)?;
        match self.phase {
            TurnPhase::AwaitingCardSelection | TurnPhase::AwaitingTargetSelection => {}
            phase => return Err(RuleError::WrongPhase { phase: phase.name() }),
        }

        if let Some(pending) = self.pending.take() {
            self.deck.return_to_hand(color, pending.card);
        }
        self.phase = TurnPhase::AwaitingCardSelection;
        log::warn!("{} cancelled its selection", color);

        if self.config.forfeit_on_cancel {
            self.forfeited[color] = true;
            self.events.push(BoardEvent::Forfeited(color));
            self.record(color, None, TurnOutcome::Forfeited);
            self.finish_turn(color);
        }
        Ok(())
    }

    /// Draw one card into the active hand when it is short of `hand_size`.
    ///
    /// Only valid before a card is selected; a pending card still counts
    /// toward the hand.
    pub fn draw(&mut self, color: Color) -> RuleResult<Draw> {
        self.expect_phase(color, TurnPhase::AwaitingCardSelection)?;
        let held = self.deck.hand(color).len() + usize::from(self.pending.is_some());
        if held >= self.config.hand_size {
            return Err(RuleError::WrongPhase {
                phase: "the hand is full",
            });
        }
        let draw = self.deck.draw_to_hand(color)?;
        self.note_draw(color, draw);
        Ok(draw)
    }

    // === Queries ===

    /// Projection of a card in `color`'s hand without selecting it.
    pub fn preview(&self, color: Color, card: CardId) -> RuleResult<Projection> {
        let card = self
            .deck
            .hand_card(color, card)
            .ok_or(RuleError::CardNotInHand { card, color })?;
        Projection::project(card, color, &self.board)
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn hand(&self, color: Color) -> &[Card] {
        self.deck.hand(color)
    }

    #[must_use]
    pub fn active(&self) -> Color {
        self.active
    }

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    #[must_use]
    pub fn winner(&self) -> Option<Color> {
        match self.phase {
            TurnPhase::GameWon(color) => Some(color),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.winner().is_some()
    }

    #[must_use]
    pub fn is_forfeited(&self, color: Color) -> bool {
        self.forfeited[color]
    }

    /// Completed turns so far.
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    #[must_use]
    pub fn history(&self) -> &Vector<TurnRecord> {
        &self.history
    }

    /// The card awaiting a target, if any.
    #[must_use]
    pub fn pending_card(&self) -> Option<Card> {
        self.pending.as_ref().map(|p| p.card)
    }

    #[must_use]
    pub fn pending_projection(&self) -> Option<&Projection> {
        self.pending.as_ref().map(|p| &p.projection)
    }

    /// Observable board state for spectators.
    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::capture(&self.board, self.active, self.turn_number, self.winner())
    }

    /// Capture the whole game for `Game::restore`.
    ///
    /// A card awaiting its target is saved back in its hand.
    #[must_use]
    pub fn save(&self) -> GameSnapshot {
        let mut deck = self.deck.state();
        if let Some(pending) = &self.pending {
            deck.hands[self.active].push(pending.card);
        }
        GameSnapshot {
            config: self.config.clone(),
            board: self.snapshot(),
            deck,
            forfeited: self.forfeited.clone(),
            history: self.history.clone(),
        }
    }

    /// Take the events produced since the last call.
    pub fn drain_events(&mut self) -> Vec<BoardEvent> {
        std::mem::take(&mut self.events)
    }

    // === Internals ===

    fn expect_active(&self, color: Color) -> RuleResult<()> {
        if self.is_over() {
            return Err(RuleError::GameOver);
        }
        if color != self.active {
            return Err(RuleError::NotYourTurn {
                actor: color,
                active: self.active,
            });
        }
        Ok(())
    }

    fn expect_phase(&self, color: Color, phase: TurnPhase) -> RuleResult<()> {
        self.expect_active(color)?;
        if self.phase != phase {
            return Err(RuleError::WrongPhase {
                phase: self.phase.name(),
            });
        }
        Ok(())
    }

    fn settle_unplayable(&mut self, color: Color, card: Card) -> RuleResult<()> {
        let returned = self.config.unplayable_policy == UnplayablePolicy::ReturnToHand;
        if returned {
            self.deck.return_to_hand(color, card);
        } else {
            self.deck.discard(card);
            self.events.push(BoardEvent::CardDiscarded { color, card: card.id });
            self.refill(color)?;
        }
        log::info!("{} could not play {}", color, card);
        self.record(
            color,
            Some(card),
            TurnOutcome::Unplayable {
                returned_to_hand: returned,
            },
        );
        self.finish_turn(color);
        Ok(())
    }

    fn refill(&mut self, color: Color) -> RuleResult<()> {
        for draw in self.deck.refill_hand(color, self.config.hand_size)? {
            self.note_draw(color, draw);
        }
        Ok(())
    }

    fn note_draw(&mut self, color: Color, draw: Draw) {
        if draw.reshuffled {
            self.events.push(BoardEvent::Reshuffled {
                draw_pile: self.deck.draw_pile_len() + 1,
            });
        }
        self.events.push(BoardEvent::CardDrawn {
            color,
            card: draw.card.id,
        });
    }

    fn record(&mut self, color: Color, card: Option<Card>, outcome: TurnOutcome) {
        self.history.push_back(TurnRecord {
            turn: self.turn_number,
            color,
            card,
            outcome,
        });
    }

    fn finish_turn(&mut self, color: Color) {
        self.phase = TurnPhase::TurnComplete;
        self.turn_number += 1;

        let seated: SmallVec<[Color; 4]> =
            Color::all().filter(|&c| !self.forfeited[c]).collect();
        let finisher = std::iter::once(color)
            .chain(Color::all())
            .find(|&c| self.board.has_won(c));

        let winner = match (finisher, seated.as_slice()) {
            (Some(c), _) => Some(c),
            (None, [last]) => Some(*last),
            _ => None,
        };
        if let Some(winner) = winner {
            self.phase = TurnPhase::GameWon(winner);
            self.events.push(BoardEvent::GameWon(winner));
            log::info!("{} wins after {} turns", winner, self.turn_number);
            return;
        }

        let next = (1..=COLOR_COUNT)
            .map(|k| Color::from_index(color.index() + k))
            .find(|&c| !self.forfeited[c])
            .unwrap_or(color);
        self.active = next;
        self.phase = TurnPhase::AwaitingCardSelection;
        self.events.push(BoardEvent::TurnPassed { from: color, to: next });
        log::info!("turn {} complete, {} to play", self.turn_number, next);
    }
}
