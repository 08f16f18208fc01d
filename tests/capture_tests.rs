//! Capture tests: landing, entering, wiping and the pawns that are safe.

use tock_engine::board::{Board, PawnId, PawnPosition};
use tock_engine::cards::{Card, CardId, CardValue, Suit};
use tock_engine::core::Color;
use tock_engine::effects::{EffectResolver, TargetChoice};
use tock_engine::events::BoardEvent;
use tock_engine::rules::Projection;

fn board(placements: &[(Color, u8, u8)]) -> Board {
    Board::with_placements(
        placements
            .iter()
            .map(|&(color, slot, progress)| (PawnId::new(color, slot), progress)),
    )
    .unwrap()
}

fn card(value: CardValue) -> Card {
    Card::new(CardId(0), Suit::Clubs, value)
}

fn id(color: Color, slot: u8) -> PawnId {
    PawnId::new(color, slot)
}

fn play(board: &mut Board, value: CardValue, actor: Color, target: PawnId) -> Vec<BoardEvent> {
    let projection = Projection::project(&card(value), actor, board).unwrap();
    assert!(projection.is_legal(target), "{} on {}", value, target);
    EffectResolver::apply_effect(board, &card(value), &TargetChoice::Single(target))
        .unwrap()
        .events
}

/// Test that landing on an opponent sends it home.
#[test]
fn test_landing_capture() {
    // Red 49 is loop 12, Blue progress 13.
    let mut b = board(&[(Color::Blue, 0, 10), (Color::Red, 0, 49)]);
    let events = play(&mut b, CardValue::Three, Color::Blue, id(Color::Blue, 0));

    assert_eq!(
        events,
        vec![
            BoardEvent::PawnMoved {
                pawn: id(Color::Blue, 0),
                old_progress: 10,
                new_progress: 13,
                on_track: true,
            },
            BoardEvent::PawnCaptured { pawn: id(Color::Red, 0), by: id(Color::Blue, 0) },
        ]
    );
    let red = b.pawn(id(Color::Red, 0)).unwrap();
    assert_eq!(red.position(), PawnPosition::Out);
    assert_eq!(red.progress, 0);
}

/// Test that a backward move captures at its destination too.
#[test]
fn test_backward_capture() {
    // Green 70 is loop 15, Blue progress 16.
    let mut b = board(&[(Color::Blue, 0, 20), (Color::Green, 0, 70)]);
    play(&mut b, CardValue::Four, Color::Blue, id(Color::Blue, 0));

    assert_eq!(b.pawn(id(Color::Blue, 0)).unwrap().progress, 16);
    assert!(!b.pawn(id(Color::Green, 0)).unwrap().on_track);
}

/// Test that the Five's capture is credited to the moved pawn.
#[test]
fn test_five_capture_credited_to_mover() {
    // Red 30 is loop 65; five more is loop 70, Green progress 53.
    let mut b = board(&[(Color::Red, 0, 30), (Color::Green, 0, 53)]);
    let events = play(&mut b, CardValue::Five, Color::Blue, id(Color::Red, 0));

    assert!(events.contains(&BoardEvent::PawnCaptured {
        pawn: id(Color::Green, 0),
        by: id(Color::Red, 0),
    }));
    assert_eq!(b.pawn(id(Color::Red, 0)).unwrap().progress, 35);
}

/// Test that entering captures an opponent resting on the entry cell.
#[test]
fn test_entry_capture() {
    // Red's entry is loop 36, Blue progress 37.
    let mut b = board(&[(Color::Blue, 0, 37)]);
    let events = play(&mut b, CardValue::Ace, Color::Red, id(Color::Red, 0));

    assert_eq!(events.len(), 2);
    assert_eq!(b.pawn(id(Color::Red, 0)).unwrap().position(), PawnPosition::Entry);
    assert_eq!(b.pawn(id(Color::Blue, 0)).unwrap().position(), PawnPosition::Out);
}

/// Test that the Joker captures everything on the loop cells it crosses.
#[test]
fn test_joker_wipe() {
    // Green 66 is loop 11 (Blue 12); Red 60 is loop 23 (Blue 24).
    let mut b = board(&[
        (Color::Blue, 0, 10),
        (Color::Blue, 1, 15),
        (Color::Green, 0, 66),
        (Color::Red, 0, 60),
    ]);
    let res = EffectResolver::apply_effect(
        &mut b,
        &card(CardValue::Joker),
        &TargetChoice::Single(id(Color::Blue, 0)),
    )
    .unwrap();

    assert_eq!(
        res.captured.as_slice(),
        &[id(Color::Green, 0), id(Color::Blue, 1), id(Color::Red, 0)]
    );
    assert_eq!(b.pawn(id(Color::Blue, 0)).unwrap().progress, 24);
    assert_eq!(b.track().len(), 1);
}

/// Test that the Joker wipe spares home-lane pawns.
#[test]
fn test_joker_wipe_spares_home_lane() {
    // Yellow 10 is loop 63, Blue progress 64.
    let mut b = board(&[(Color::Blue, 0, 60), (Color::Blue, 1, 72), (Color::Yellow, 0, 10)]);
    let res = EffectResolver::apply_effect(
        &mut b,
        &card(CardValue::Joker),
        &TargetChoice::Single(id(Color::Blue, 0)),
    )
    .unwrap();

    assert_eq!(res.captured.as_slice(), &[id(Color::Yellow, 0)]);
    assert_eq!(b.pawn(id(Color::Blue, 0)).unwrap().progress, 74);
    assert_eq!(b.pawn(id(Color::Blue, 1)).unwrap().progress, 72);
}

/// Test that a plain move passes over pawns without capturing them.
#[test]
fn test_passing_is_safe() {
    // Yellow 30 is loop 11, Blue progress 12.
    let mut b = board(&[(Color::Blue, 0, 10), (Color::Yellow, 0, 30)]);
    let events = play(&mut b, CardValue::Eight, Color::Blue, id(Color::Blue, 0));

    assert_eq!(events.len(), 1);
    assert_eq!(b.pawn(id(Color::Yellow, 0)).unwrap().progress, 30);
}

/// Test that home-lane and finished pawns cannot be captured directly.
#[test]
fn test_capture_ignores_home_and_finished() {
    let mut b = board(&[(Color::Green, 0, 72), (Color::Green, 1, 75), (Color::Red, 0, 5)]);
    let before = b.clone();
    let by = id(Color::Red, 0);

    assert_eq!(EffectResolver::capture(&mut b, id(Color::Green, 0), by), Ok(None));
    assert_eq!(EffectResolver::capture(&mut b, id(Color::Green, 1), by), Ok(None));
    assert_eq!(EffectResolver::capture(&mut b, id(Color::Green, 2), by), Ok(None));
    assert_eq!(b, before);
}
