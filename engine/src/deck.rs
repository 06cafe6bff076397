//! The deck state machine.
//!
//! `Idle -> Dragging -> {Committing | BoundaryBounce | snap-back} -> Idle`
//!
//! One generic controller serves every deck variant. Time is passed in by
//! the caller, so the same inputs always produce the same transitions.

use std::time::{Duration, Instant};

use tracing::{debug, warn};

use swipedeck_types::{
    BoundarySide, DeckItem, ExitDirection, PointerKind, RouteTemplate, ThresholdFraction,
};

use crate::evaluator::{EvaluationInput, Outcome, evaluate, overshoot};
use crate::gesture::{GestureTracker, MoveSample};
use crate::stack::{CardStack, StackInput, compose};
use crate::state::{BoundaryFeedback, DeckPhase, DeckState};
use crate::timers::TimerQueue;
use crate::tutorial::{TutorialSchedule, TutorialScheduler};

/// Receives everything the deck reports to its host.
///
/// `item_changed` and `replace_location` for one navigation are delivered
/// inside the same controller call that changes the index.
pub trait DeckListener<T: DeckItem> {
    fn item_changed(&mut self, index: usize, item: &T);

    /// Reflect the current item in the address bar. Replaces the current
    /// history entry; swipes never push.
    fn replace_location(&mut self, _path: &str) {}

    fn haptic_pulse(&mut self) {}

    fn tutorial_visibility_changed(&mut self, _visible: bool) {}

    fn go_back(&mut self) {}
}

impl<T: DeckItem> DeckListener<T> for () {
    fn item_changed(&mut self, _index: usize, _item: &T) {}
}

/// Tunables for one deck instance.
#[derive(Debug, Clone, PartialEq)]
pub struct DeckSettings {
    pub threshold: ThresholdFraction,
    /// Overshoot past an end shorter than this doesn't trigger the caption.
    pub dead_zone: f32,
    /// Delay between committing a swipe and the index change.
    pub exit_delay: Duration,
    /// How long the boundary caption stays fully visible.
    pub boundary_hold: Duration,
    /// How long the caption fades before clearing.
    pub boundary_fade: Duration,
    pub route: Option<RouteTemplate>,
    pub tutorial: TutorialSchedule,
}

impl Default for DeckSettings {
    fn default() -> Self {
        Self {
            threshold: ThresholdFraction::DEFAULT,
            dead_zone: 50.0,
            exit_delay: Duration::from_millis(200),
            boundary_hold: Duration::from_millis(1000),
            boundary_fade: Duration::from_millis(500),
            route: None,
            tutorial: TutorialSchedule::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeckTimer {
    Exit(ExitDirection),
    BoundaryFade,
    BoundaryClear,
}

impl DeckTimer {
    fn is_boundary(self) -> bool {
        matches!(self, Self::BoundaryFade | Self::BoundaryClear)
    }
}

pub struct DeckController<T: DeckItem, L: DeckListener<T> = ()> {
    items: Vec<T>,
    state: DeckState,
    settings: DeckSettings,
    viewport_width: f32,
    tracker: GestureTracker,
    /// The haptic pulse already fired for the current gesture.
    pulsed: bool,
    timers: TimerQueue<DeckTimer>,
    tutorial: TutorialScheduler,
    listener: L,
}

impl<T: DeckItem, L: DeckListener<T>> DeckController<T, L> {
    /// An unmounted, empty deck. Call [`Self::initialize`] to show items.
    pub fn new(settings: DeckSettings, viewport_width: f32, listener: L) -> Self {
        let tutorial = TutorialScheduler::new(settings.tutorial.clone());
        Self {
            items: Vec::new(),
            state: DeckState::default(),
            settings,
            viewport_width: viewport_width.max(0.0),
            tracker: GestureTracker::new(),
            pulsed: false,
            timers: TimerQueue::new(),
            tutorial,
            listener,
        }
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Mount the deck on `items`, starting at `initial_id` (or the first item).
    ///
    /// Discards all transient state and pending timers and restarts the
    /// tutorial schedule.
    pub fn initialize(&mut self, items: Vec<T>, initial_id: Option<&T::Id>, now: Instant) {
        self.timers.clear();
        self.tracker.finish();
        self.pulsed = false;

        let found = initial_id.and_then(|id| items.iter().position(|item| item.id() == id));
        if found.is_none()
            && let Some(id) = initial_id
        {
            debug!(?id, "Initial item not in deck, starting at first item");
        }
        let index = found.unwrap_or(0);

        self.items = items;
        self.state = DeckState::at(index);

        let hidden = if self.items.is_empty() {
            self.tutorial.unmount()
        } else {
            self.tutorial.mount(now)
        };
        if hidden {
            self.listener.tutorial_visibility_changed(false);
        }
        debug!(len = self.items.len(), index, "Deck initialized");
    }

    /// Swap in a refreshed item list without disturbing the user.
    ///
    /// The current item is followed by id. If it disappeared the deck jumps
    /// to the first item and reports the change, dropping any caption or
    /// committed exit that belonged to the removed card. An in-progress drag
    /// is left alone. The first items to reach an empty deck start the
    /// tutorial schedule from `now`.
    pub fn replace_items(&mut self, items: Vec<T>, now: Instant) {
        let was_empty = self.items.is_empty();
        let current_id = self.current_item().map(|item| item.id().clone());
        self.items = items;

        if self.items.is_empty() {
            self.timers.clear();
            self.tracker.finish();
            self.state = DeckState::default();
            if self.tutorial.unmount() {
                self.listener.tutorial_visibility_changed(false);
            }
            debug!("Deck refreshed to empty");
            return;
        }

        if was_empty {
            self.state = DeckState::default();
            if self.tutorial.mount(now) {
                self.listener.tutorial_visibility_changed(false);
            }
            debug!(len = self.items.len(), "Deck filled by refresh");
            return;
        }

        let followed = current_id
            .as_ref()
            .and_then(|id| self.items.iter().position(|item| item.id() == id));
        match followed {
            Some(index) => {
                if index != self.state.current_index {
                    debug!(
                        from = self.state.current_index,
                        to = index,
                        "Current item moved in refreshed deck"
                    );
                }
                self.state.current_index = index;
            }
            None => {
                debug!(?current_id, "Current item gone after refresh, resetting to first");
                self.drop_card_feedback();
                self.state.current_index = 0;
                self.notify_current();
            }
        }
    }

    /// Forget the caption and any committed exit of a card that is gone.
    fn drop_card_feedback(&mut self) {
        self.timers
            .cancel_where(|timer| timer.is_boundary() || matches!(timer, DeckTimer::Exit(_)));
        self.state.boundary = BoundaryFeedback::default();
        if self.state.exit_direction.is_some() {
            self.state.settle();
        }
    }

    /// Cancel every timer and drop transient state.
    pub fn unmount(&mut self) {
        self.timers.clear();
        self.tracker.finish();
        self.state.settle();
        self.state.boundary = BoundaryFeedback::default();
        if self.tutorial.unmount() {
            self.listener.tutorial_visibility_changed(false);
        }
    }

    pub fn set_viewport_width(&mut self, width: f32) {
        self.viewport_width = width.max(0.0);
    }

    // ========================================================================
    // Pointer input
    // ========================================================================

    /// Returns false if the gesture was refused (empty deck or exit in flight).
    pub fn pointer_down(&mut self, x: f32, y: f32, kind: PointerKind, now: Instant) -> bool {
        self.note_interaction(now);
        if self.items.is_empty() || self.state.exit_direction.is_some() {
            return false;
        }
        self.tracker.start(x, y, kind);
        self.state.is_dragging = true;
        self.state.drag_offset = 0.0;
        self.pulsed = false;
        true
    }

    /// `None` when no gesture is active.
    pub fn pointer_move(&mut self, x: f32, y: f32, now: Instant) -> Option<MoveSample> {
        self.note_interaction(now);
        if !self.state.is_dragging {
            return None;
        }
        let sample = self.tracker.sample(x, y)?;
        self.state.drag_offset = sample.offset;

        if !self.pulsed
            && overshoot(
                sample.offset,
                self.state.current_index,
                self.items.len(),
                self.settings.dead_zone,
            )
            .is_some()
        {
            self.pulsed = true;
            self.listener.haptic_pulse();
        }
        Some(sample)
    }

    /// Release the pointer. `None` when no gesture was active.
    pub fn pointer_up(&mut self, now: Instant) -> Option<Outcome> {
        self.note_interaction(now);
        if !self.state.is_dragging {
            return None;
        }
        self.state.is_dragging = false;
        self.tracker.finish();

        let outcome = evaluate(&EvaluationInput {
            drag_offset: self.state.drag_offset,
            current_index: self.state.current_index,
            item_count: self.items.len(),
            threshold: self.threshold(),
            dead_zone: self.settings.dead_zone,
        });
        debug!(offset = self.state.drag_offset, ?outcome, "Gesture released");

        match outcome {
            Outcome::Bounce(side) => {
                self.state.drag_offset = 0.0;
                self.show_boundary(side, now);
            }
            Outcome::Commit(direction) => self.begin_exit(direction, now),
            Outcome::SnapBack => self.state.drag_offset = 0.0,
        }
        Some(outcome)
    }

    /// The pointer left the surface mid-gesture; treated as a release.
    pub fn pointer_leave(&mut self, now: Instant) -> Option<Outcome> {
        self.pointer_up(now)
    }

    /// Record user activity that isn't a pointer event (keys, buttons).
    pub fn note_interaction(&mut self, now: Instant) {
        if self.tutorial.record_interaction(now) {
            self.listener.tutorial_visibility_changed(false);
        }
    }

    // ========================================================================
    // Programmatic navigation
    // ========================================================================

    /// Jump to the next item immediately. Ignored at the end or mid-exit.
    pub fn next(&mut self) -> bool {
        if !self.can_step(ExitDirection::Left) {
            return false;
        }
        self.navigate_to(self.state.current_index + 1);
        true
    }

    /// Jump to the previous item immediately. Ignored at the start or mid-exit.
    pub fn previous(&mut self) -> bool {
        if !self.can_step(ExitDirection::Right) {
            return false;
        }
        self.navigate_to(self.state.current_index - 1);
        true
    }

    /// Animate to the next item through the same exit as a committed swipe.
    pub fn swipe_next(&mut self, now: Instant) -> bool {
        self.swipe(ExitDirection::Left, now)
    }

    /// Animate to the previous item through the same exit as a committed swipe.
    pub fn swipe_previous(&mut self, now: Instant) -> bool {
        self.swipe(ExitDirection::Right, now)
    }

    pub fn go_back(&mut self) {
        self.listener.go_back();
    }

    fn swipe(&mut self, direction: ExitDirection, now: Instant) -> bool {
        if self.state.is_dragging || !self.can_step(direction) {
            return false;
        }
        self.begin_exit(direction, now);
        true
    }

    fn can_step(&self, direction: ExitDirection) -> bool {
        if self.state.exit_direction.is_some() {
            return false;
        }
        match direction {
            ExitDirection::Left => self.state.current_index + 1 < self.items.len(),
            ExitDirection::Right => self.state.current_index > 0 && !self.items.is_empty(),
        }
    }

    // ========================================================================
    // Timers
    // ========================================================================

    /// Fire everything due at `now`, deck timers first, then the tutorial.
    pub fn tick(&mut self, now: Instant) {
        while let Some(fired) = self.timers.pop_due(now) {
            match fired.key {
                DeckTimer::Exit(direction) => self.finish_exit(direction),
                DeckTimer::BoundaryFade => {
                    self.state.boundary.fading = true;
                    self.timers.schedule(
                        fired.deadline,
                        self.settings.boundary_fade,
                        DeckTimer::BoundaryClear,
                    );
                }
                DeckTimer::BoundaryClear => self.on_boundary_bounce_complete(),
            }
        }

        let listener = &mut self.listener;
        self.tutorial
            .tick(now, |visible| listener.tutorial_visibility_changed(visible));
    }

    fn show_boundary(&mut self, side: BoundarySide, now: Instant) {
        self.timers.cancel_where(|timer| timer.is_boundary());
        self.state.boundary = BoundaryFeedback::shown(side);
        self.timers
            .schedule(now, self.settings.boundary_hold, DeckTimer::BoundaryFade);
        debug!(?side, "Boundary bounce");
    }

    fn on_boundary_bounce_complete(&mut self) {
        self.state.boundary = BoundaryFeedback::default();
    }

    fn begin_exit(&mut self, direction: ExitDirection, now: Instant) {
        self.state.exit_direction = Some(direction);
        self.state.is_swiping_out = true;
        self.timers
            .schedule(now, self.settings.exit_delay, DeckTimer::Exit(direction));
    }

    fn finish_exit(&mut self, direction: ExitDirection) {
        let target = match direction {
            ExitDirection::Left => Some(self.state.current_index + 1),
            ExitDirection::Right => self.state.current_index.checked_sub(1),
        };
        match target.filter(|&index| index < self.items.len()) {
            Some(index) => self.navigate_to(index),
            None => {
                warn!(
                    ?direction,
                    index = self.state.current_index,
                    len = self.items.len(),
                    "Dropping committed swipe whose target no longer exists"
                );
                self.state.settle();
            }
        }
    }

    /// Move to `index`, clear transient state and notify. The only place the
    /// index changes on navigation.
    fn navigate_to(&mut self, index: usize) {
        self.tracker.finish();
        self.state.settle();
        self.timers.cancel_where(|timer| timer.is_boundary());
        self.state.boundary = BoundaryFeedback::default();
        self.state.current_index = index;
        debug!(index, "Deck navigated");
        self.notify_current();
    }

    fn notify_current(&mut self) {
        let index = self.state.current_index;
        let Some(item) = self.items.get(index) else {
            return;
        };
        self.listener.item_changed(index, item);
        if let Some(route) = &self.settings.route {
            self.listener.replace_location(&route.render(item.id()));
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    #[must_use]
    pub fn state(&self) -> &DeckState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> DeckPhase {
        if self.items.is_empty() {
            return DeckPhase::Empty;
        }
        if let Some(direction) = self.state.exit_direction {
            return DeckPhase::Committing(direction);
        }
        if self.state.is_dragging {
            return DeckPhase::Dragging;
        }
        match self.state.boundary {
            BoundaryFeedback {
                active: true,
                side: Some(side),
                ..
            } => DeckPhase::BoundaryBounce(side),
            _ => DeckPhase::Idle,
        }
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    #[must_use]
    pub fn current_item(&self) -> Option<&T> {
        self.items.get(self.state.current_index)
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    /// Commit distance in viewport units.
    #[must_use]
    pub fn threshold(&self) -> f32 {
        self.settings.threshold.of(self.viewport_width)
    }

    #[must_use]
    pub fn tutorial_visible(&self) -> bool {
        self.tutorial.is_visible()
    }

    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len() + self.tutorial.pending()
    }

    #[must_use]
    pub fn stack(&self) -> CardStack {
        compose(&StackInput {
            drag_offset: self.state.drag_offset,
            threshold: self.threshold(),
            viewport_width: self.viewport_width,
            current_index: self.state.current_index,
            item_count: self.items.len(),
            exit_direction: self.state.exit_direction,
            is_dragging: self.state.is_dragging,
            is_swiping_out: self.state.is_swiping_out,
            boundary: self.state.boundary,
        })
    }

    #[must_use]
    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }
}
