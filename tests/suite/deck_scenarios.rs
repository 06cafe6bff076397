//! End-to-end walks through the deck state machine.

use std::time::Instant;

use swipedeck_engine::{BoundarySide, DeckPhase, ExitDirection, Outcome, PointerKind};

use super::common::{Event, deck, drag, ms};

#[test]
fn three_letter_walkthrough() {
    let t0 = Instant::now();
    let mut deck = deck(&["A", "B", "C"], Some("A"), t0);
    assert_eq!(deck.current_index(), 0);

    // Past the threshold to the left: commit to B once the exit settles.
    assert_eq!(
        drag(&mut deck, -150.0, t0),
        Some(Outcome::Commit(ExitDirection::Left))
    );
    assert_eq!(deck.phase(), DeckPhase::Committing(ExitDirection::Left));
    assert_eq!(deck.current_index(), 0);
    deck.tick(t0 + ms(200));
    assert_eq!(deck.current_index(), 1);
    assert_eq!(deck.current_item().map(|l| l.0), Some("B"));
    assert_eq!(deck.listener().changes(), vec![(1, "B")]);
    assert_eq!(deck.listener().locations(), vec!["/letters/B"]);

    // Back to A.
    let t1 = t0 + ms(1000);
    assert_eq!(
        drag(&mut deck, 150.0, t1),
        Some(Outcome::Commit(ExitDirection::Right))
    );
    deck.tick(t1 + ms(200));
    assert_eq!(deck.current_index(), 0);
    assert_eq!(deck.listener().changes(), vec![(1, "B"), (0, "A")]);

    // Overshoot at the start: caption, no navigation.
    let t2 = t1 + ms(1000);
    assert_eq!(
        drag(&mut deck, 80.0, t2),
        Some(Outcome::Bounce(BoundarySide::Start))
    );
    assert!(deck.state().boundary.active);
    assert_eq!(deck.state().boundary.side, Some(BoundarySide::Start));
    assert_eq!(deck.phase(), DeckPhase::BoundaryBounce(BoundarySide::Start));
    assert_eq!(deck.current_index(), 0);
    assert_eq!(deck.listener().changes().len(), 2);

    // Short drag: snap back.
    let t3 = t2 + ms(2000);
    deck.tick(t3);
    assert_eq!(drag(&mut deck, -40.0, t3), Some(Outcome::SnapBack));
    assert_eq!(deck.state().drag_offset, 0.0);
    assert_eq!(deck.current_index(), 0);
    assert_eq!(deck.listener().changes().len(), 2);
    assert_eq!(deck.phase(), DeckPhase::Idle);
}

#[test]
fn boundary_caption_fades_then_clears() {
    let t0 = Instant::now();
    let mut deck = deck(&["A", "B"], Some("B"), t0);
    assert_eq!(
        drag(&mut deck, -300.0, t0),
        Some(Outcome::Bounce(BoundarySide::End))
    );

    deck.tick(t0 + ms(999));
    assert!(deck.state().boundary.active);
    assert!(!deck.state().boundary.fading);

    deck.tick(t0 + ms(1000));
    assert!(deck.state().boundary.fading);
    let overlay = deck.stack().overlay.unwrap();
    assert_eq!(overlay.opacity, 0.0);

    deck.tick(t0 + ms(1500));
    assert!(!deck.state().boundary.active);
    assert!(deck.stack().overlay.is_none());
    assert_eq!(deck.current_index(), 1);
}

#[test]
fn second_bounce_restarts_the_caption() {
    let t0 = Instant::now();
    let mut deck = deck(&["A", "B"], None, t0);
    drag(&mut deck, 90.0, t0);
    drag(&mut deck, 90.0, t0 + ms(800));

    // The first bounce's fade would have fired at 1000.
    deck.tick(t0 + ms(1200));
    assert!(!deck.state().boundary.fading);
    deck.tick(t0 + ms(1800));
    assert!(deck.state().boundary.fading);
}

#[test]
fn overshoot_inside_dead_zone_snaps_back_quietly() {
    let t0 = Instant::now();
    let mut deck = deck(&["A", "B"], None, t0);
    assert_eq!(drag(&mut deck, 30.0, t0), Some(Outcome::SnapBack));
    assert!(!deck.state().boundary.active);
    assert!(!deck.listener().events.contains(&Event::Haptic));
}

#[test]
fn haptic_pulses_once_per_gesture() {
    let t0 = Instant::now();
    let mut deck = deck(&["A", "B"], None, t0);
    assert!(deck.pointer_down(0.0, 0.0, PointerKind::Touch, t0));
    deck.pointer_move(60.0, 0.0, t0);
    deck.pointer_move(120.0, 0.0, t0);
    deck.pointer_move(200.0, 0.0, t0);
    deck.pointer_up(t0);
    let pulses = deck
        .listener()
        .events
        .iter()
        .filter(|event| **event == Event::Haptic)
        .count();
    assert_eq!(pulses, 1);
}

#[test]
fn gestures_are_refused_while_exiting() {
    let t0 = Instant::now();
    let mut deck = deck(&["A", "B", "C"], None, t0);
    drag(&mut deck, -150.0, t0);
    assert_eq!(drag(&mut deck, -150.0, t0 + ms(50)), None);
    assert!(!deck.next());
    assert!(!deck.swipe_next(t0 + ms(60)));

    deck.tick(t0 + ms(200));
    assert_eq!(deck.current_index(), 1);
    assert_eq!(deck.listener().changes(), vec![(1, "B")]);
}

#[test]
fn keyboard_navigation_uses_the_same_exit() {
    let t0 = Instant::now();
    let mut deck = deck(&["A", "B", "C"], None, t0);
    assert!(deck.swipe_next(t0));
    let stack = deck.stack();
    assert!(stack.background.is_some_and(|bg| bg.index == 1 && bg.scale == 1.0));
    deck.tick(t0 + ms(200));
    assert_eq!(deck.current_index(), 1);

    assert!(deck.next());
    assert_eq!(deck.current_index(), 2);
    assert!(!deck.next());
    assert!(!deck.swipe_next(t0 + ms(300)));
    assert!(deck.previous());
    assert_eq!(
        deck.listener().changes(),
        vec![(1, "B"), (2, "C"), (1, "B")]
    );
}

#[test]
fn unknown_initial_id_starts_at_first_item() {
    let t0 = Instant::now();
    let deck = deck(&["A", "B"], Some("Z"), t0);
    assert_eq!(deck.current_index(), 0);
    assert!(deck.listener().changes().is_empty());
}

#[test]
fn empty_deck_ignores_everything() {
    let t0 = Instant::now();
    let mut deck = deck(&[], None, t0);
    assert_eq!(deck.phase(), DeckPhase::Empty);
    assert_eq!(drag(&mut deck, -300.0, t0), None);
    assert!(!deck.next());
    assert!(!deck.previous());
    assert!(!deck.swipe_previous(t0));
    assert!(deck.stack().is_empty());
    deck.tick(t0 + ms(60_000));
    assert!(deck.listener().events.is_empty());
}

#[test]
fn single_item_bounces_both_ways() {
    let t0 = Instant::now();
    let mut deck = deck(&["A"], None, t0);
    assert_eq!(
        drag(&mut deck, 200.0, t0),
        Some(Outcome::Bounce(BoundarySide::Start))
    );
    assert_eq!(
        drag(&mut deck, -200.0, t0 + ms(10)),
        Some(Outcome::Bounce(BoundarySide::End))
    );
    assert_eq!(deck.current_index(), 0);
}

#[test]
fn go_back_reaches_the_listener() {
    let t0 = Instant::now();
    let mut deck = deck(&["A"], None, t0);
    deck.go_back();
    assert_eq!(deck.listener().events, vec![Event::Back]);
}

#[test]
fn unmount_cancels_pending_exit() {
    let t0 = Instant::now();
    let mut deck = deck(&["A", "B"], None, t0);
    drag(&mut deck, -150.0, t0);
    deck.unmount();
    assert_eq!(deck.pending_timers(), 0);
    deck.tick(t0 + ms(1000));
    assert_eq!(deck.current_index(), 0);
    assert!(deck.listener().changes().is_empty());
}
