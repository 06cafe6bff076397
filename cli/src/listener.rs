//! Host side of the deck's notifications.

use swipedeck_engine::{DeckItem, DeckListener};

/// Collects what the frame loop has to act on after each batch of input.
#[derive(Debug, Default)]
pub struct HostListener {
    /// Last path reported through `replace_location`.
    location: Option<String>,
    back_requested: bool,
    bell_pending: bool,
}

impl HostListener {
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    #[must_use]
    pub fn back_requested(&self) -> bool {
        self.back_requested
    }

    /// Returns true once per haptic pulse; the terminal stand-in is a bell.
    pub fn take_bell(&mut self) -> bool {
        std::mem::take(&mut self.bell_pending)
    }
}

impl<T: DeckItem> DeckListener<T> for HostListener {
    fn item_changed(&mut self, index: usize, item: &T) {
        tracing::info!(index, id = %item.id(), "Current item changed");
    }

    fn replace_location(&mut self, path: &str) {
        // Replace, not push: only the latest path is kept.
        tracing::debug!(path, "Location replaced");
        self.location = Some(path.to_string());
    }

    fn haptic_pulse(&mut self) {
        self.bell_pending = true;
    }

    fn tutorial_visibility_changed(&mut self, visible: bool) {
        tracing::debug!(visible, "Swipe hint visibility changed");
    }

    fn go_back(&mut self) {
        tracing::info!("Back requested");
        self.back_requested = true;
    }
}
