//! Records shown by the two deck variants.

use serde::{Deserialize, Serialize};

use crate::DeckItem;

/// Work arrangement advertised on a job posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    #[default]
    Onsite,
    Remote,
    Hybrid,
}

impl Modality {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Onsite => "On-site",
            Self::Remote => "Remote",
            Self::Hybrid => "Hybrid",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, rename = "type")]
    pub modality: Modality,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub salary: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_external: bool,
    #[serde(default)]
    pub external_url: Option<String>,
}

impl DeckItem for Job {
    type Id = u64;

    fn id(&self) -> &u64 {
        &self.id
    }
}

impl Job {
    /// Salary with its currency, when both are published.
    #[must_use]
    pub fn salary_label(&self) -> Option<String> {
        let salary = self.salary.as_deref()?.trim();
        if salary.is_empty() {
            return None;
        }
        Some(match self.currency.as_deref() {
            Some(currency) if !currency.trim().is_empty() => format!("{salary} {currency}"),
            _ => salary.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience_years: Option<u32>,
    /// Contact details are only visible once the company unlocked them.
    #[serde(default)]
    pub unlocked: bool,
    #[serde(default)]
    pub email: Option<String>,
}

impl DeckItem for Candidate {
    type Id = String;

    fn id(&self) -> &String {
        &self.id
    }
}
