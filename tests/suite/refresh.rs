//! Refreshed item lists arriving while the deck is on screen.

use std::time::Instant;

use swipedeck_engine::{BoundarySide, DeckPhase, ExitDirection, Outcome, PointerKind};

use super::common::{deck, drag, letters, ms};

#[test]
fn current_item_is_followed_by_id() {
    let t0 = Instant::now();
    let mut deck = deck(&["A", "B", "C"], Some("B"), t0);
    deck.replace_items(letters(&["Z", "A", "B", "C"]), t0);
    assert_eq!(deck.current_index(), 2);
    assert_eq!(deck.current_item().map(|l| l.0), Some("B"));
    assert!(deck.listener().changes().is_empty());
}

#[test]
fn vanished_item_resets_to_first_and_notifies() {
    let t0 = Instant::now();
    let mut deck = deck(&["A", "B", "C"], Some("C"), t0);
    deck.replace_items(letters(&["X", "Y"]), t0);
    assert_eq!(deck.current_index(), 0);
    assert_eq!(deck.listener().changes(), vec![(0, "X")]);
    assert_eq!(deck.listener().locations(), vec!["/letters/X"]);
}

#[test]
fn refresh_to_empty_settles_the_deck() {
    let t0 = Instant::now();
    let mut deck = deck(&["A", "B"], None, t0);
    drag(&mut deck, 90.0, t0);
    deck.replace_items(Vec::new(), t0);
    assert_eq!(deck.phase(), DeckPhase::Empty);
    assert_eq!(deck.pending_timers(), 0);
    assert!(deck.stack().is_empty());
}

#[test]
fn drag_survives_a_refresh() {
    let t0 = Instant::now();
    let mut deck = deck(&["A", "B", "C"], None, t0);
    assert!(deck.pointer_down(200.0, 100.0, PointerKind::Touch, t0));
    deck.pointer_move(50.0, 100.0, t0);
    deck.replace_items(letters(&["A", "B", "C", "D"]), t0);

    assert_eq!(deck.phase(), DeckPhase::Dragging);
    assert_eq!(deck.state().drag_offset, -150.0);
    assert_eq!(
        deck.pointer_up(t0),
        Some(Outcome::Commit(ExitDirection::Left))
    );
    deck.tick(t0 + ms(200));
    assert_eq!(deck.current_index(), 1);
}

#[test]
fn exit_toward_removed_item_is_dropped() {
    let t0 = Instant::now();
    let mut deck = deck(&["A", "B"], None, t0);
    drag(&mut deck, -150.0, t0);
    deck.replace_items(letters(&["A"]), t0);
    deck.tick(t0 + ms(200));

    assert_eq!(deck.current_index(), 0);
    assert_eq!(deck.phase(), DeckPhase::Idle);
    assert!(deck.listener().changes().is_empty());
}

#[test]
fn first_items_for_empty_deck_start_at_zero() {
    let t0 = Instant::now();
    let mut deck = deck(&[], None, t0);
    deck.replace_items(letters(&["A", "B"]), t0);
    assert_eq!(deck.current_index(), 0);
    assert_eq!(deck.phase(), DeckPhase::Idle);
    // Nothing was on screen before, so nothing changed from the host's view.
    assert!(deck.listener().changes().is_empty());
}

#[test]
fn caption_of_removed_card_is_cleared() {
    let t0 = Instant::now();
    let mut deck = deck(&["A", "B", "C"], Some("C"), t0);
    assert_eq!(
        drag(&mut deck, -150.0, t0),
        Some(Outcome::Bounce(BoundarySide::End))
    );
    deck.replace_items(letters(&["X", "Y"]), t0 + ms(100));

    assert_eq!(deck.current_index(), 0);
    assert!(!deck.state().boundary.active);
    assert!(deck.stack().overlay.is_none());
    assert_eq!(deck.pending_timers(), 0);

    // The old fade and clear never fire.
    deck.tick(t0 + ms(2000));
    assert_eq!(deck.phase(), DeckPhase::Idle);
}

#[test]
fn exit_of_removed_card_does_not_move_again() {
    let t0 = Instant::now();
    let mut deck = deck(&["A", "B", "C"], Some("B"), t0);
    assert_eq!(
        drag(&mut deck, -150.0, t0),
        Some(Outcome::Commit(ExitDirection::Left))
    );
    deck.replace_items(letters(&["X", "Y", "Z"]), t0 + ms(50));

    assert_eq!(deck.phase(), DeckPhase::Idle);
    deck.tick(t0 + ms(200));
    assert_eq!(deck.current_index(), 0);
    assert_eq!(deck.listener().changes(), vec![(0, "X")]);
}

#[test]
fn removed_card_mid_drag_keeps_the_drag() {
    let t0 = Instant::now();
    let mut deck = deck(&["A", "B", "C"], Some("B"), t0);
    assert!(deck.pointer_down(200.0, 100.0, PointerKind::Touch, t0));
    deck.pointer_move(120.0, 100.0, t0);
    deck.replace_items(letters(&["X", "Y"]), t0);

    assert_eq!(deck.phase(), DeckPhase::Dragging);
    assert_eq!(deck.state().drag_offset, -80.0);
    assert_eq!(deck.listener().changes(), vec![(0, "X")]);
}
