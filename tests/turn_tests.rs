//! Turn state machine tests.
//!
//! Games are built from a stacked deck so Blue opens with a known hand;
//! every other seat gets filler cards.

use tock_engine::board::{Board, BoardSnapshot, PawnId};
use tock_engine::cards::{full_set, Card, CardValue, Deck};
use tock_engine::core::{Color, GameConfig, GameRng, RuleError, UnplayablePolicy};
use tock_engine::effects::TargetChoice;
use tock_engine::events::BoardEvent;
use tock_engine::rules::{Game, GameSnapshot, TurnOutcome, TurnPhase};

fn board(placements: &[(Color, u8, u8)]) -> Board {
    Board::with_placements(
        placements
            .iter()
            .map(|&(color, slot, progress)| (PawnId::new(color, slot), progress)),
    )
    .unwrap()
}

fn id(color: Color, slot: u8) -> PawnId {
    PawnId::new(color, slot)
}

/// Deal `blue` to Blue and filler cards to the other seats.
fn game_with(board: Board, blue: &[CardValue], config: GameConfig) -> Game {
    let set = full_set(2);
    let mut order: Vec<Card> = Vec::new();
    for value in blue {
        let card = set
            .iter()
            .find(|c| c.value == *value && !order.contains(c))
            .copied()
            .unwrap();
        order.push(card);
    }
    let filler: Vec<Card> = set.iter().filter(|c| !order.contains(c)).copied().collect();
    order.extend(filler);

    let config = config.with_hand_size(blue.len());
    Game::from_parts(config, board, Deck::stacked(order, GameRng::new(5))).unwrap()
}

fn only_card(game: &Game, color: Color) -> Card {
    game.hand(color)[0]
}

/// Test that an illegal target is rejected without touching the game.
#[test]
fn test_illegal_target_leaves_state() {
    let mut game = game_with(
        board(&[(Color::Blue, 0, 10), (Color::Blue, 1, 13)]),
        &[CardValue::Three],
        GameConfig::default(),
    );
    let three = only_card(&game, Color::Blue);
    let projection = game.select_card(Color::Blue, three.id).unwrap();
    assert_eq!(projection.legal_targets.as_slice(), &[id(Color::Blue, 1)]);

    let before = game.board().clone();
    for target in [id(Color::Blue, 0), id(Color::Blue, 2), id(Color::Red, 0)] {
        let err = game.select_target(Color::Blue, TargetChoice::Single(target)).unwrap_err();
        assert_eq!(err, RuleError::IllegalTargetSelected { value: CardValue::Three });
        assert_eq!(game.board(), &before);
        assert_eq!(game.phase(), TurnPhase::AwaitingTargetSelection);
        assert_eq!(game.pending_card(), Some(three));
    }

    game.select_target(Color::Blue, TargetChoice::Single(id(Color::Blue, 1))).unwrap();
    assert_eq!(game.board().pawn(id(Color::Blue, 1)).unwrap().progress, 16);
    assert_eq!(game.active(), Color::Green);
}

/// Test the Jack: a single target is the wrong shape, a pair swaps cells.
#[test]
fn test_jack_arity_and_swap() {
    // Blue 30 is loop 29 (Green 12); Green 40 is loop 57 (Blue 58).
    let mut game = game_with(
        board(&[(Color::Blue, 0, 30), (Color::Green, 0, 40)]),
        &[CardValue::Jack],
        GameConfig::default(),
    );
    let jack = only_card(&game, Color::Blue);
    game.select_card(Color::Blue, jack.id).unwrap();

    let err = game
        .select_target(Color::Blue, TargetChoice::Single(id(Color::Blue, 0)))
        .unwrap_err();
    assert_eq!(
        err,
        RuleError::InvalidEffectArity {
            value: CardValue::Jack,
            expected: "a pair of pawns",
        }
    );
    assert_eq!(game.phase(), TurnPhase::AwaitingTargetSelection);

    let res = game
        .select_target(
            Color::Blue,
            TargetChoice::Pair(id(Color::Blue, 0), id(Color::Green, 0)),
        )
        .unwrap();
    assert!(res.captured.is_empty());
    assert_eq!(game.board().pawn(id(Color::Blue, 0)).unwrap().progress, 58);
    assert_eq!(game.board().pawn(id(Color::Green, 0)).unwrap().progress, 12);
}

/// Test an unplayable Seven kept in hand under `ReturnToHand`.
#[test]
fn test_unplayable_seven_returned() {
    // Yellow 36 is loop 17 (Blue 18): runs 3 and 3.
    let config = GameConfig::default().with_unplayable_policy(UnplayablePolicy::ReturnToHand);
    let mut game = game_with(
        board(&[(Color::Blue, 0, 10), (Color::Blue, 1, 14), (Color::Yellow, 0, 36)]),
        &[CardValue::Seven],
        config,
    );
    let seven = only_card(&game, Color::Blue);
    let preview = game.preview(Color::Blue, seven.id).unwrap();
    assert_eq!(preview.slack, 6);

    let err = game.select_card(Color::Blue, seven.id).unwrap_err();
    assert_eq!(err, RuleError::NoLegalTarget { card: seven.id, value: CardValue::Seven });
    assert_eq!(game.hand(Color::Blue), &[seven]);
    assert_eq!(game.active(), Color::Green);
    assert_eq!(game.turn_number(), 1);

    let record = game.history().back().unwrap();
    assert_eq!(record.color, Color::Blue);
    assert_eq!(record.outcome, TurnOutcome::Unplayable { returned_to_hand: true });
}

/// Test that finishing the fourth pawn wins and freezes the game.
#[test]
fn test_win_detection() {
    let mut game = game_with(
        board(&[
            (Color::Blue, 0, 75),
            (Color::Blue, 1, 75),
            (Color::Blue, 2, 75),
            (Color::Blue, 3, 73),
        ]),
        &[CardValue::Two],
        GameConfig::default(),
    );
    game.drain_events();
    let two = only_card(&game, Color::Blue);
    let projection = game.select_card(Color::Blue, two.id).unwrap();
    assert_eq!(projection.legal_targets.as_slice(), &[id(Color::Blue, 3)]);

    game.select_target(Color::Blue, TargetChoice::Single(id(Color::Blue, 3))).unwrap();
    assert_eq!(game.phase(), TurnPhase::GameWon(Color::Blue));
    assert_eq!(game.winner(), Some(Color::Blue));
    assert!(game.is_over());
    assert!(game.drain_events().contains(&BoardEvent::GameWon(Color::Blue)));

    let next = only_card(&game, Color::Blue);
    assert_eq!(game.select_card(Color::Blue, next.id), Err(RuleError::GameOver));
    assert_eq!(game.cancel_turn(Color::Blue), Err(RuleError::GameOver));
    assert_eq!(game.draw(Color::Green), Err(RuleError::GameOver));
    assert_eq!(game.snapshot().winner, Some(Color::Blue));
}

/// Test forfeits: the last seated color wins.
#[test]
fn test_forfeit_leaves_last_seat_winner() {
    let config = GameConfig::default().with_forfeit_on_cancel(true);
    let mut game = game_with(Board::new(), &[CardValue::Two], config);

    game.cancel_turn(Color::Blue).unwrap();
    assert!(game.is_forfeited(Color::Blue));
    assert_eq!(game.active(), Color::Green);
    assert!(matches!(
        game.cancel_turn(Color::Blue),
        Err(RuleError::NotYourTurn { .. })
    ));

    game.cancel_turn(Color::Green).unwrap();
    assert!(!game.is_over());
    game.cancel_turn(Color::Red).unwrap();

    assert_eq!(game.winner(), Some(Color::Yellow));
    assert_eq!(game.history().len(), 3);
    assert!(game
        .history()
        .iter()
        .all(|r| r.outcome == TurnOutcome::Forfeited && r.card.is_none()));
}

/// Test that a cancelled target selection returns the card to the same seat.
#[test]
fn test_cancel_target_selection() {
    let mut game = game_with(Board::new(), &[CardValue::Ace], GameConfig::default());
    let ace = only_card(&game, Color::Blue);
    game.select_card(Color::Blue, ace.id).unwrap();
    assert!(game.pending_projection().is_some());

    game.cancel_turn(Color::Blue).unwrap();
    assert_eq!(game.hand(Color::Blue), &[ace]);
    assert_eq!(game.pending_card(), None);
    assert_eq!(game.active(), Color::Blue);
    assert_eq!(game.turn_number(), 0);
    assert!(game.history().is_empty());
}

/// Test the events of a full turn, in order.
#[test]
fn test_turn_events() {
    let mut game = game_with(Board::new(), &[CardValue::Ace], GameConfig::default());
    let dealt = game.drain_events();
    assert_eq!(dealt.len(), 4);
    assert!(dealt.iter().all(|e| matches!(e, BoardEvent::CardDrawn { .. })));

    let ace = only_card(&game, Color::Blue);
    game.select_card(Color::Blue, ace.id).unwrap();
    game.select_target(Color::Blue, TargetChoice::Single(id(Color::Blue, 0))).unwrap();

    let refill = only_card(&game, Color::Blue);
    assert_eq!(
        game.drain_events(),
        vec![
            BoardEvent::CardPlayed { color: Color::Blue, card: ace.id },
            BoardEvent::PawnMoved {
                pawn: id(Color::Blue, 0),
                old_progress: 0,
                new_progress: 1,
                on_track: true,
            },
            BoardEvent::CardDrawn { color: Color::Blue, card: refill.id },
            BoardEvent::TurnPassed { from: Color::Blue, to: Color::Green },
        ]
    );
    assert!(game.drain_events().is_empty());
    assert_eq!(game.deck().discard_pile(), &[ace]);
}

/// Test that drawing is limited to the active color before a card is chosen.
#[test]
fn test_draw_command() {
    let mut game = game_with(Board::new(), &[CardValue::Ace], GameConfig::default());
    assert_eq!(
        game.draw(Color::Red),
        Err(RuleError::NotYourTurn { actor: Color::Red, active: Color::Blue })
    );
    assert_eq!(
        game.draw(Color::Blue),
        Err(RuleError::WrongPhase { phase: "the hand is full" })
    );

    // The pending card still belongs to the hand.
    let ace = only_card(&game, Color::Blue);
    game.select_card(Color::Blue, ace.id).unwrap();
    assert_eq!(
        game.draw(Color::Blue),
        Err(RuleError::WrongPhase { phase: "awaiting target selection" })
    );

    game.cancel_turn(Color::Blue).unwrap();
    assert_eq!(game.hand(Color::Blue), &[ace]);
    assert!(game.draw(Color::Blue).is_err());
    assert_eq!(game.hand(Color::Blue).len(), game.config().hand_size);
    assert_eq!(game.deck().total_cards(), 54);
}

/// Test that snapshots survive both encodings and restore the board.
#[test]
fn test_snapshot_round_trip() {
    let mut game = game_with(
        board(&[(Color::Blue, 0, 10), (Color::Red, 1, 72), (Color::Yellow, 2, 1)]),
        &[CardValue::Eight],
        GameConfig::default(),
    );
    let eight = only_card(&game, Color::Blue);
    game.select_card(Color::Blue, eight.id).unwrap();
    game.select_target(Color::Blue, TargetChoice::Single(id(Color::Blue, 0))).unwrap();

    let snapshot = game.snapshot();
    assert_eq!(snapshot.active, Color::Green);
    assert_eq!(snapshot.turn_number, 1);

    let bytes = snapshot.to_bytes().unwrap();
    assert_eq!(BoardSnapshot::from_bytes(&bytes).unwrap(), snapshot);

    let json = serde_json::to_string(&snapshot).unwrap();
    let decoded: BoardSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded.restore().unwrap(), *game.board());
}

/// Test that saving mid-turn puts the pending card back in its hand.
#[test]
fn test_save_during_target_selection() {
    let mut game = game_with(Board::new(), &[CardValue::King], GameConfig::default());
    let king = only_card(&game, Color::Blue);
    game.select_card(Color::Blue, king.id).unwrap();

    let saved = game.save();
    assert_eq!(saved.deck.hands[Color::Blue], vec![king]);
    let json = serde_json::to_string(&saved).unwrap();
    let decoded: GameSnapshot = serde_json::from_str(&json).unwrap();

    let mut restored = Game::restore(decoded).unwrap();
    assert_eq!(restored.phase(), TurnPhase::AwaitingCardSelection);
    assert_eq!(restored.pending_card(), None);
    assert_eq!(restored.hand(Color::Blue), &[king]);
    assert_eq!(restored.deck().total_cards(), 54);

    restored.select_card(Color::Blue, king.id).unwrap();
    restored
        .select_target(Color::Blue, TargetChoice::Single(id(Color::Blue, 2)))
        .unwrap();
    assert_eq!(restored.board().pawn(id(Color::Blue, 2)).unwrap().progress, 1);
    assert_eq!(restored.active(), Color::Green);
}

/// Test that inconsistent saves are refused.
#[test]
fn test_restore_rejects_inconsistent_save() {
    let mut game = game_with(Board::new(), &[CardValue::Ace], GameConfig::default());
    let ace = only_card(&game, Color::Blue);
    game.select_card(Color::Blue, ace.id).unwrap();
    game.select_target(Color::Blue, TargetChoice::Single(id(Color::Blue, 0))).unwrap();

    let mut lost_card = game.save();
    lost_card.deck.discard_pile.clear();
    assert!(matches!(Game::restore(lost_card), Err(RuleError::Snapshot(_))));

    let mut doubled = game.save();
    let card = doubled.deck.hands[Color::Red][0];
    doubled.deck.hands[Color::Green].push(card);
    assert!(matches!(Game::restore(doubled), Err(RuleError::Snapshot(_))));

    let mut no_history = game.save();
    no_history.history.clear();
    assert!(matches!(Game::restore(no_history), Err(RuleError::Snapshot(_))));

    let mut absent = game.save();
    absent.forfeited[Color::Green] = true;
    assert!(matches!(Game::restore(absent), Err(RuleError::Snapshot(_))));

    assert!(Game::restore(game.save()).is_ok());
}
