//! Core engine for SwipeDeck - the swipeable card deck state machine.
//!
//! This crate has no terminal dependencies. Hosts feed it pointer samples,
//! key-driven navigation and clock ticks, and draw whatever [`CardStack`]
//! it composes.

mod config;
mod deck;
mod evaluator;
mod gesture;
mod stack;
mod state;
mod timers;
mod tutorial;

pub use config::{
    AppConfig, CONFIG_PATH_ENV, ConfigError, CopyConfig, DeckConfig, SwipeDeckConfig,
    TutorialConfig, config_path,
};
pub use deck::{DeckController, DeckListener, DeckSettings};
pub use evaluator::{EvaluationInput, Outcome, evaluate, overshoot, past_boundary};
pub use gesture::{GestureTracker, MoveSample};
pub use stack::{
    BackgroundCard, BoundaryOverlay, CardStack, EXIT_ROTATION_DEG, ForegroundCard,
    OFF_STAGE_FRACTION, OVERLAY_RAMP_FRACTION, Progress, ROTATION_PER_UNIT, StackInput, Translate,
    compose, reveal_progress,
};
pub use state::{BoundaryFeedback, DeckPhase, DeckState};
pub use timers::{Fired, TimerId, TimerQueue};
pub use tutorial::{TutorialSchedule, TutorialScheduler};

// Re-export from types for public API
pub use swipedeck_types::{
    BoundaryCopy, BoundarySide, Candidate, DeckItem, DeckKind, ExitDirection, Job, Modality,
    PointerKind, RouteTemplate, ThresholdError, ThresholdFraction, ui,
};
