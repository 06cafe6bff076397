//! Visual parameters of the card stack as a pure function of deck state.
//!
//! At most two cards are produced: the current one and the single neighbour
//! in the drag (or exit) direction. Hosts map these numbers onto whatever
//! surface they draw on.

use swipedeck_types::ui::Transition;
use swipedeck_types::{BoundarySide, ExitDirection};

use crate::evaluator::past_boundary;
use crate::state::BoundaryFeedback;

/// Degrees of tilt per unit of horizontal drag.
pub const ROTATION_PER_UNIT: f32 = 0.05;
/// Tilt of a card that has been committed off-stage.
pub const EXIT_ROTATION_DEG: f32 = 20.0;
/// Off-stage position as a fraction of the card width.
pub const OFF_STAGE_FRACTION: f32 = 1.5;
/// Fraction of the viewport a drag past a dead end takes to fully show the caption.
pub const OVERLAY_RAMP_FRACTION: f32 = 0.25;

const FOREGROUND_TRANSITION_MS: u64 = 300;
const BACKGROUND_SWIPE_TRANSITION_MS: u64 = 200;
const OVERLAY_FADE_MS: u64 = 500;

const BACKGROUND_MIN_SCALE: f32 = 0.9;
const BACKGROUND_MIN_OPACITY: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackInput {
    pub drag_offset: f32,
    pub threshold: f32,
    pub viewport_width: f32,
    pub current_index: usize,
    pub item_count: usize,
    pub exit_direction: Option<ExitDirection>,
    pub is_dragging: bool,
    pub is_swiping_out: bool,
    pub boundary: BoundaryFeedback,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Translate {
    Offset(f32),
    OffStage(ExitDirection),
}

impl Translate {
    /// Horizontal shift in the same units as `card_width`.
    #[must_use]
    pub fn resolve(self, card_width: f32) -> f32 {
        match self {
            Self::Offset(offset) => offset,
            Self::OffStage(direction) => direction.sign() * OFF_STAGE_FRACTION * card_width,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForegroundCard {
    pub index: usize,
    pub translate: Translate,
    pub rotate_deg: f32,
    pub opacity: f32,
    pub transition: Transition,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundCard {
    pub index: usize,
    pub scale: f32,
    pub opacity: f32,
    /// 1.0 is fully desaturated.
    pub grayscale: f32,
    /// Always false: the revealed neighbour never takes pointer input.
    pub interactive: bool,
    pub transition: Transition,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryOverlay {
    pub side: BoundarySide,
    pub opacity: f32,
    pub transition: Transition,
}

/// "3 of 12" style position for the host's progress indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// One-based.
    pub position: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CardStack {
    pub foreground: Option<ForegroundCard>,
    pub background: Option<BackgroundCard>,
    pub overlay: Option<BoundaryOverlay>,
    pub progress: Option<Progress>,
}

impl CardStack {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.foreground.is_none()
    }
}

/// How far the drag is toward committing, in `[0, 1]`.
#[must_use]
pub fn reveal_progress(drag_offset: f32, threshold: f32) -> f32 {
    if threshold <= 0.0 {
        return if drag_offset == 0.0 { 0.0 } else { 1.0 };
    }
    (drag_offset.abs() / threshold).clamp(0.0, 1.0)
}

#[must_use]
pub fn compose(input: &StackInput) -> CardStack {
    if input.item_count == 0 || input.current_index >= input.item_count {
        return CardStack::default();
    }

    CardStack {
        foreground: Some(foreground(input)),
        background: background(input),
        overlay: overlay(input),
        progress: Some(Progress {
            position: input.current_index + 1,
            total: input.item_count,
        }),
    }
}

fn foreground(input: &StackInput) -> ForegroundCard {
    let transition = if input.is_dragging {
        Transition::None
    } else {
        Transition::ease_out_ms(FOREGROUND_TRANSITION_MS)
    };

    match input.exit_direction {
        Some(direction) => ForegroundCard {
            index: input.current_index,
            translate: Translate::OffStage(direction),
            rotate_deg: direction.sign() * EXIT_ROTATION_DEG,
            opacity: 0.0,
            transition,
        },
        None => ForegroundCard {
            index: input.current_index,
            translate: Translate::Offset(input.drag_offset),
            rotate_deg: input.drag_offset * ROTATION_PER_UNIT,
            opacity: 1.0,
            transition,
        },
    }
}

fn background(input: &StackInput) -> Option<BackgroundCard> {
    let direction = input
        .exit_direction
        .or_else(|| ExitDirection::from_offset(input.drag_offset))?;
    let index = match direction {
        ExitDirection::Left => input.current_index + 1,
        ExitDirection::Right => input.current_index.checked_sub(1)?,
    };
    if index >= input.item_count {
        return None;
    }

    let (progress, transition) = if input.is_swiping_out {
        (1.0, Transition::ease_out_ms(BACKGROUND_SWIPE_TRANSITION_MS))
    } else {
        (
            reveal_progress(input.drag_offset, input.threshold),
            Transition::None,
        )
    };

    Some(BackgroundCard {
        index,
        scale: BACKGROUND_MIN_SCALE + (1.0 - BACKGROUND_MIN_SCALE) * progress,
        opacity: BACKGROUND_MIN_OPACITY + (1.0 - BACKGROUND_MIN_OPACITY) * progress,
        grayscale: 1.0 - progress,
        interactive: false,
        transition,
    })
}

fn overlay(input: &StackInput) -> Option<BoundaryOverlay> {
    if input.boundary.active {
        let side = input.boundary.side?;
        let opacity = if input.boundary.fading { 0.0 } else { 1.0 };
        return Some(BoundaryOverlay {
            side,
            opacity,
            transition: Transition::ease_out_ms(OVERLAY_FADE_MS),
        });
    }

    let side = past_boundary(input.drag_offset, input.current_index, input.item_count)?;
    let ramp = input.viewport_width * OVERLAY_RAMP_FRACTION;
    let opacity = if ramp > 0.0 {
        (input.drag_offset.abs() / ramp).min(1.0)
    } else {
        1.0
    };
    Some(BoundaryOverlay {
        side,
        opacity,
        transition: Transition::None,
    })
}
