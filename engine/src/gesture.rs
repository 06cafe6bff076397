//! Pointer samples to horizontal displacement.

use swipedeck_types::PointerKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy)]
struct Anchor {
    x: f32,
    y: f32,
    kind: PointerKind,
    axis: Option<Axis>,
}

/// Result of feeding one move sample to the tracker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveSample {
    /// Horizontal displacement from the anchor.
    pub offset: f32,
    /// True when the host should suppress its default scroll handling for
    /// this pointer stream.
    pub claimed: bool,
}

/// Tracks the anchor of the active pointer stream.
///
/// The axis is locked on the first sample that moves at all. Only touch
/// streams are claimed, and only when that first movement is more
/// horizontal than vertical; mouse drags never compete with scrolling.
#[derive(Debug, Default)]
pub struct GestureTracker {
    anchor: Option<Anchor>,
}

impl GestureTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, x: f32, y: f32, kind: PointerKind) {
        self.anchor = Some(Anchor {
            x,
            y,
            kind,
            axis: None,
        });
    }

    /// `None` when no stream is being tracked.
    pub fn sample(&mut self, x: f32, y: f32) -> Option<MoveSample> {
        let anchor = self.anchor.as_mut()?;
        let dx = x - anchor.x;
        let dy = y - anchor.y;

        if anchor.axis.is_none() && (dx != 0.0 || dy != 0.0) {
            anchor.axis = Some(if dx.abs() > dy.abs() {
                Axis::Horizontal
            } else {
                Axis::Vertical
            });
        }

        let claimed =
            anchor.kind == PointerKind::Touch && anchor.axis == Some(Axis::Horizontal);
        Some(MoveSample {
            offset: dx,
            claimed,
        })
    }

    /// Drops the anchor. Returns whether a stream was being tracked.
    pub fn finish(&mut self) -> bool {
        self.anchor.take().is_some()
    }

    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.anchor.is_some()
    }
}
