//! Address paths for the navigation host.

use std::fmt;

use serde::{Deserialize, Serialize};

const ID_PLACEHOLDER: &str = "{id}";

/// A path pattern with a single `{id}` placeholder, e.g. `/jobs/{id}`.
///
/// A template without the placeholder renders as the id appended to the
/// pattern with a `/` separator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteTemplate(String);

impl RouteTemplate {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self(pattern.into())
    }

    #[must_use]
    pub fn jobs() -> Self {
        Self::new("/jobs/{id}")
    }

    #[must_use]
    pub fn candidates() -> Self {
        Self::new("/company/candidates/{id}")
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn render(&self, id: &impl fmt::Display) -> String {
        let id = id.to_string();
        if self.0.contains(ID_PLACEHOLDER) {
            self.0.replace(ID_PLACEHOLDER, &id)
        } else {
            format!("{}/{id}", self.0.trim_end_matches('/'))
        }
    }
}
