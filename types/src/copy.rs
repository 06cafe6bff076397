use serde::{Deserialize, Serialize};

use crate::BoundarySide;

/// Captions shown when the user tries to swipe past either end of a deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundaryCopy {
    pub start_title: String,
    pub start_body: String,
    pub end_title: String,
    pub end_body: String,
    /// Shown in place of the stack when the deck has no items.
    pub empty: String,
}

impl BoundaryCopy {
    #[must_use]
    pub fn jobs() -> Self {
        Self {
            start_title: "Start of the list!".to_string(),
            start_body: "This is the first job".to_string(),
            end_title: "You've seen everything!".to_string(),
            end_body: "No more jobs for now".to_string(),
            empty: "No more jobs.".to_string(),
        }
    }

    #[must_use]
    pub fn candidates() -> Self {
        Self {
            start_title: "Start of the list!".to_string(),
            start_body: "This is the first candidate".to_string(),
            end_title: "You've seen everything!".to_string(),
            end_body: "No more candidates for now".to_string(),
            empty: "No more candidates.".to_string(),
        }
    }

    #[must_use]
    pub fn for_side(&self, side: BoundarySide) -> (&str, &str) {
        match side {
            BoundarySide::Start => (&self.start_title, &self.start_body),
            BoundarySide::End => (&self.end_title, &self.end_body),
        }
    }
}

impl Default for BoundaryCopy {
    fn default() -> Self {
        Self::jobs()
    }
}
