//! Properties that hold after every call, checked over random sessions.

use std::time::Instant;

use proptest::prelude::*;

use swipedeck_engine::{DeckController, PointerKind};

use super::common::{Event, Letter, Recorder, deck, ms};

const IDS: [&str; 6] = ["A", "B", "C", "D", "E", "F"];

#[derive(Debug, Clone)]
enum Action {
    Press(f32),
    Move(f32),
    Release,
    Leave,
    Next,
    Previous,
    SwipeNext,
    SwipePrevious,
    Refresh(usize),
    Wait(u64),
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        3 => (0.0f32..400.0).prop_map(Action::Press),
        4 => (-400.0f32..800.0).prop_map(Action::Move),
        3 => Just(Action::Release),
        1 => Just(Action::Leave),
        1 => Just(Action::Next),
        1 => Just(Action::Previous),
        1 => Just(Action::SwipeNext),
        1 => Just(Action::SwipePrevious),
        1 => (0usize..=IDS.len()).prop_map(Action::Refresh),
        3 => (0u64..1500).prop_map(Action::Wait),
    ]
}

fn apply(deck: &mut DeckController<Letter, Recorder>, action: &Action, now: Instant) {
    match *action {
        Action::Press(x) => {
            deck.pointer_down(x, 100.0, PointerKind::Mouse, now);
        }
        Action::Move(x) => {
            deck.pointer_move(x, 100.0, now);
        }
        Action::Release => {
            deck.pointer_up(now);
        }
        Action::Leave => {
            deck.pointer_leave(now);
        }
        Action::Next => {
            deck.next();
        }
        Action::Previous => {
            deck.previous();
        }
        Action::SwipeNext => {
            deck.swipe_next(now);
        }
        Action::SwipePrevious => {
            deck.swipe_previous(now);
        }
        Action::Refresh(len) => {
            deck.replace_items(IDS[..len].iter().copied().map(Letter).collect(), now);
        }
        Action::Wait(_) => deck.tick(now),
    }
}

fn check(deck: &DeckController<Letter, Recorder>) -> Result<(), TestCaseError> {
    let state = deck.state();
    prop_assert!(!(state.is_dragging && state.exit_direction.is_some()));
    if deck.is_empty() {
        prop_assert!(deck.stack().is_empty());
        return Ok(());
    }
    prop_assert!(state.current_index < deck.len());

    let stack = deck.stack();
    let progress = stack.progress.ok_or_else(|| TestCaseError::fail("no progress"))?;
    prop_assert_eq!(progress.position, state.current_index + 1);
    prop_assert_eq!(progress.total, deck.len());
    if let Some(background) = stack.background {
        prop_assert!(!background.interactive);
        prop_assert!(background.index < deck.len());
        prop_assert_eq!(background.index.abs_diff(state.current_index), 1);
        prop_assert!((0.89..=1.01).contains(&background.scale));
        prop_assert!((0.49..=1.01).contains(&background.opacity));
    }
    if let Some(overlay) = stack.overlay {
        prop_assert!((0.0..=1.0).contains(&overlay.opacity));
    }
    Ok(())
}

proptest! {
    #[test]
    fn state_stays_consistent(actions in prop::collection::vec(action(), 0..80)) {
        let t0 = Instant::now();
        let mut now = t0;
        let mut deck = deck(&IDS[..4], None, t0);

        for action in &actions {
            if let Action::Wait(step) = action {
                now += ms(*step);
            }
            let shown = deck.current_item().map(|item| item.0);
            apply(&mut deck, action, now);
            check(&deck)?;

            // A refresh that removes the shown card leaves nothing of it behind.
            if let (Action::Refresh(_), Some(id)) = (action, shown)
                && !deck.is_empty()
                && deck.items().iter().all(|item| item.0 != id)
            {
                prop_assert!(!deck.state().boundary.active);
                prop_assert!(deck.state().exit_direction.is_none());
            }
        }
    }

    #[test]
    fn location_follows_every_change(actions in prop::collection::vec(action(), 0..80)) {
        let t0 = Instant::now();
        let mut now = t0;
        let mut deck = deck(&IDS[..4], None, t0);

        for action in &actions {
            if let Action::Wait(step) = action {
                now += ms(*step);
            }
            apply(&mut deck, action, now);
        }

        let events = &deck.listener().events;
        for (i, event) in events.iter().enumerate() {
            if let Event::Changed(_, id) = event {
                let expected = format!("/letters/{id}");
                prop_assert_eq!(events.get(i + 1), Some(&Event::Location(expected)));
            }
        }
    }
}
