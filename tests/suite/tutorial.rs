//! Idle hint timing as seen by a deck host.

use std::time::Instant;

use swipedeck_engine::{DeckController, PointerKind, TutorialSchedule};

use super::common::{Event, Letter, Recorder, VIEWPORT, letters, ms, settings};

fn mounted(now: Instant) -> DeckController<Letter, Recorder> {
    let mut deck = DeckController::new(
        settings(TutorialSchedule::default()),
        VIEWPORT,
        Recorder::default(),
    );
    deck.initialize(letters(&["A", "B", "C"]), None, now);
    deck
}

fn tutorial_events(deck: &DeckController<Letter, Recorder>) -> Vec<bool> {
    deck.listener()
        .events
        .iter()
        .filter_map(|event| match event {
            Event::Tutorial(visible) => Some(*visible),
            _ => None,
        })
        .collect()
}

#[test]
fn idle_user_sees_every_reveal() {
    let t0 = Instant::now();
    let mut deck = mounted(t0);

    deck.tick(t0 + ms(499));
    assert!(!deck.tutorial_visible());
    deck.tick(t0 + ms(500));
    assert!(deck.tutorial_visible());
    deck.tick(t0 + ms(3500));
    assert!(!deck.tutorial_visible());

    deck.tick(t0 + ms(10_000));
    assert!(deck.tutorial_visible());
    deck.tick(t0 + ms(14_000));
    assert!(!deck.tutorial_visible());

    deck.tick(t0 + ms(30_000));
    assert!(deck.tutorial_visible());
    deck.tick(t0 + ms(34_000));
    assert!(!deck.tutorial_visible());

    assert_eq!(
        tutorial_events(&deck),
        vec![true, false, true, false, true, false]
    );
    assert_eq!(deck.pending_timers(), 0);
}

#[test]
fn touch_at_400ms_cancels_all_reveals() {
    let t0 = Instant::now();
    let mut deck = mounted(t0);

    assert!(deck.pointer_down(10.0, 10.0, PointerKind::Touch, t0 + ms(400)));
    deck.pointer_up(t0 + ms(400));

    for at in [500, 3_500, 10_000, 14_000, 30_000, 34_000] {
        deck.tick(t0 + ms(at));
        assert!(!deck.tutorial_visible(), "visible at {at}ms");
    }
    assert!(tutorial_events(&deck).is_empty());
}

#[test]
fn interaction_just_after_mount_is_forgiven() {
    let t0 = Instant::now();
    let mut deck = mounted(t0);

    deck.note_interaction(t0 + ms(50));
    deck.tick(t0 + ms(500));
    assert!(deck.tutorial_visible());
}

#[test]
fn interaction_hides_a_visible_hint() {
    let t0 = Instant::now();
    let mut deck = mounted(t0);

    deck.tick(t0 + ms(600));
    assert!(deck.tutorial_visible());
    deck.note_interaction(t0 + ms(700));
    assert!(!deck.tutorial_visible());
    assert_eq!(tutorial_events(&deck), vec![true, false]);

    // The hide timer went with it; nothing more fires before the next reveal.
    deck.tick(t0 + ms(3500));
    assert_eq!(tutorial_events(&deck), vec![true, false]);
}

#[test]
fn swiping_keeps_the_hint_away() {
    let t0 = Instant::now();
    let mut deck = mounted(t0);

    assert!(deck.swipe_next(t0 + ms(9_000)));
    deck.note_interaction(t0 + ms(9_000));
    deck.tick(t0 + ms(10_000));
    assert_eq!(deck.current_index(), 1);
    assert!(!deck.tutorial_visible());
}

#[test]
fn unmount_hides_and_cancels() {
    let t0 = Instant::now();
    let mut deck = mounted(t0);

    deck.tick(t0 + ms(500));
    assert!(deck.tutorial_visible());
    deck.unmount();
    assert!(!deck.tutorial_visible());
    assert_eq!(deck.pending_timers(), 0);
    assert_eq!(tutorial_events(&deck), vec![true, false]);

    deck.tick(t0 + ms(60_000));
    assert_eq!(tutorial_events(&deck), vec![true, false]);
}

#[test]
fn reinitialize_restarts_the_schedule() {
    let t0 = Instant::now();
    let mut deck = mounted(t0);
    deck.note_interaction(t0 + ms(400));
    deck.tick(t0 + ms(40_000));
    assert!(tutorial_events(&deck).is_empty());

    let t1 = t0 + ms(40_000);
    deck.initialize(letters(&["A", "B"]), None, t1);
    deck.tick(t1 + ms(500));
    assert!(deck.tutorial_visible());
}

#[test]
fn empty_deck_schedules_nothing() {
    let t0 = Instant::now();
    let mut deck = DeckController::new(
        settings(TutorialSchedule::default()),
        VIEWPORT,
        Recorder::default(),
    );
    deck.initialize(Vec::new(), None, t0);
    assert_eq!(deck.pending_timers(), 0);
    deck.tick(t0 + ms(1000));
    assert!(!deck.tutorial_visible());
}

#[test]
fn first_refreshed_items_start_the_schedule() {
    let t0 = Instant::now();
    let mut deck = DeckController::new(
        settings(TutorialSchedule::default()),
        VIEWPORT,
        Recorder::default(),
    );
    deck.initialize(Vec::new(), None, t0);

    let filled = t0 + ms(2000);
    deck.replace_items(letters(&["A", "B"]), filled);
    deck.tick(filled + ms(499));
    assert!(!deck.tutorial_visible());
    deck.tick(filled + ms(500));
    assert!(deck.tutorial_visible());
    assert_eq!(tutorial_events(&deck), vec![true]);
}

#[test]
fn refresh_of_a_filled_deck_keeps_the_schedule() {
    let t0 = Instant::now();
    let mut deck = mounted(t0);

    deck.replace_items(letters(&["A", "B", "C", "D"]), t0 + ms(300));
    deck.tick(t0 + ms(500));
    assert!(deck.tutorial_visible());
}
