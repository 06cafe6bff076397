use swipedeck_types::{BoundarySide, ExitDirection};

/// Transient "you reached the end" caption state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoundaryFeedback {
    pub active: bool,
    pub side: Option<BoundarySide>,
    pub fading: bool,
}

impl BoundaryFeedback {
    #[must_use]
    pub fn shown(side: BoundarySide) -> Self {
        Self {
            active: true,
            side: Some(side),
            fading: false,
        }
    }
}

/// Observable state of one deck instance.
///
/// `exit_direction` and `is_dragging` are never both set.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeckState {
    pub current_index: usize,
    pub drag_offset: f32,
    pub is_dragging: bool,
    pub exit_direction: Option<ExitDirection>,
    pub boundary: BoundaryFeedback,
    /// A committed exit/entry animation is in flight.
    pub is_swiping_out: bool,
}

impl DeckState {
    #[must_use]
    pub fn at(current_index: usize) -> Self {
        Self {
            current_index,
            ..Self::default()
        }
    }

    /// Clear drag and exit state, keeping the index and boundary caption.
    pub fn settle(&mut self) {
        self.drag_offset = 0.0;
        self.is_dragging = false;
        self.exit_direction = None;
        self.is_swiping_out = false;
    }
}

/// Coarse state-machine view of a [`DeckState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckPhase {
    /// No items; nothing is interactive.
    Empty,
    Idle,
    Dragging,
    Committing(ExitDirection),
    BoundaryBounce(BoundarySide),
}
