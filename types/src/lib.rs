//! Core domain types for SwipeDeck.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application.

mod copy;
mod item;
mod route;
pub mod ui;

pub use copy::BoundaryCopy;
pub use item::{Candidate, Job, Modality};
pub use route::RouteTemplate;

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Deck items
// ============================================================================

/// An entry in a deck.
///
/// The deck engine treats items as opaque: only the id is inspected, for
/// locating the initial item, following the current item across refreshes,
/// and building navigation paths.
pub trait DeckItem {
    type Id: Clone + Eq + fmt::Debug + fmt::Display;

    fn id(&self) -> &Self::Id;
}

/// Which of the two deck variants is being shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeckKind {
    #[default]
    Jobs,
    Candidates,
}

impl DeckKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Jobs => "jobs",
            Self::Candidates => "candidates",
        }
    }

    /// Route used to reflect the current item in the address.
    #[must_use]
    pub fn route(self) -> RouteTemplate {
        match self {
            Self::Jobs => RouteTemplate::jobs(),
            Self::Candidates => RouteTemplate::candidates(),
        }
    }

    #[must_use]
    pub fn boundary_copy(self) -> BoundaryCopy {
        match self {
            Self::Jobs => BoundaryCopy::jobs(),
            Self::Candidates => BoundaryCopy::candidates(),
        }
    }
}

// ============================================================================
// Gesture vocabulary
// ============================================================================

/// Direction the foreground card leaves the stage once a swipe is committed.
///
/// `Left` reveals the next item, `Right` the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitDirection {
    Left,
    Right,
}

impl ExitDirection {
    /// Direction implied by the sign of a horizontal displacement.
    #[must_use]
    pub fn from_offset(offset: f32) -> Option<Self> {
        if offset < 0.0 {
            Some(Self::Left)
        } else if offset > 0.0 {
            Some(Self::Right)
        } else {
            None
        }
    }

    /// `-1.0` for left, `1.0` for right.
    #[must_use]
    pub const fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

/// End of the deck a user tried to swipe past.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundarySide {
    Start,
    End,
}

/// Source of pointer samples.
///
/// Only touch streams compete with page scrolling, so only they are claimed
/// by the gesture tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerKind {
    #[default]
    Mouse,
    Touch,
}

// ============================================================================
// Commit threshold
// ============================================================================

/// Fraction of the viewport width a drag must exceed to commit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct ThresholdFraction(f32);

#[derive(Debug, Error, PartialEq)]
#[error("threshold fraction must be in (0, 1], got {0}")]
pub struct ThresholdError(pub f32);

impl ThresholdFraction {
    pub const DEFAULT: Self = Self(0.3);

    pub fn new(value: f32) -> Result<Self, ThresholdError> {
        if value.is_finite() && value > 0.0 && value <= 1.0 {
            Ok(Self(value))
        } else {
            Err(ThresholdError(value))
        }
    }

    #[must_use]
    pub const fn get(self) -> f32 {
        self.0
    }

    /// Threshold in the same units as `viewport_width`.
    #[must_use]
    pub fn of(self, viewport_width: f32) -> f32 {
        viewport_width.max(0.0) * self.0
    }
}

impl Default for ThresholdFraction {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<f32> for ThresholdFraction {
    type Error = ThresholdError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ThresholdFraction> for f32 {
    fn from(value: ThresholdFraction) -> Self {
        value.0
    }
}
