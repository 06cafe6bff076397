//! UI state types for the terminal layer.
//!
//! Pure data types with no IO, no async, no ratatui dependency.
//! Used by both the engine (composition) and tui (rendering/input).

mod animation;

pub use animation::{AnimPhase, EffectTimer, Transition, ease_out_cubic};

/// UI configuration options derived from config/environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiOptions {
    pub ascii_only: bool,
    pub high_contrast: bool,
    /// Snap cards into place instead of tweening them.
    pub reduced_motion: bool,
}
