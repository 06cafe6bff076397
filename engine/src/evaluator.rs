//! Release decision for a finished drag.

use swipedeck_types::{BoundarySide, ExitDirection};

/// What a released drag does to the deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Tried to leave the deck through one of its ends.
    Bounce(BoundarySide),
    /// Move to the neighbour; the card leaves in the given direction.
    Commit(ExitDirection),
    SnapBack,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluationInput {
    pub drag_offset: f32,
    pub current_index: usize,
    pub item_count: usize,
    pub threshold: f32,
    /// Overshoot past an end shorter than this is treated as a plain
    /// snap-back.
    pub dead_zone: f32,
}

/// The dead end the displacement points at, ignoring magnitude.
#[must_use]
pub fn past_boundary(offset: f32, current_index: usize, item_count: usize) -> Option<BoundarySide> {
    if item_count == 0 {
        return None;
    }
    if current_index == 0 && offset > 0.0 {
        Some(BoundarySide::Start)
    } else if current_index + 1 >= item_count && offset < 0.0 {
        Some(BoundarySide::End)
    } else {
        None
    }
}

/// Like [`past_boundary`], but only once the displacement clears the dead zone.
#[must_use]
pub fn overshoot(
    offset: f32,
    current_index: usize,
    item_count: usize,
    dead_zone: f32,
) -> Option<BoundarySide> {
    past_boundary(offset, current_index, item_count).filter(|_| offset.abs() > dead_zone)
}

#[must_use]
pub fn evaluate(input: &EvaluationInput) -> Outcome {
    let EvaluationInput {
        drag_offset,
        current_index,
        item_count,
        threshold,
        dead_zone,
    } = *input;

    if item_count == 0 {
        return Outcome::SnapBack;
    }

    if let Some(side) = overshoot(drag_offset, current_index, item_count, dead_zone) {
        return Outcome::Bounce(side);
    }

    if drag_offset.abs() > threshold {
        let has_next = current_index + 1 < item_count;
        let has_previous = current_index > 0;
        match ExitDirection::from_offset(drag_offset) {
            Some(ExitDirection::Left) if has_next => return Outcome::Commit(ExitDirection::Left),
            Some(ExitDirection::Right) if has_previous => {
                return Outcome::Commit(ExitDirection::Right);
            }
            _ => {}
        }
    }

    Outcome::SnapBack
}
