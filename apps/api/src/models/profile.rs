//! Profile document — the structured, read-only record every answer is drawn from.
//!
//! Field names follow the camelCase layout of the portfolio's `profile.json`.
//! Entity fields default to empty so that a single malformed entry deserializes
//! and is skipped by the chunker instead of failing the whole load.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDocument {
    #[serde(default)]
    pub profile_summary: String,
    #[serde(default)]
    pub contact: Contact,
    #[serde(default)]
    pub skills: Skills,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub leadership: Vec<Leadership>,
    #[serde(default)]
    pub education: Vec<Education>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub github: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Skills {
    pub product: Vec<String>,
    pub design: Vec<String>,
    pub data: Vec<String>,
}

impl Skills {
    /// All skills across the three groups, in declaration order.
    pub fn all(&self) -> impl Iterator<Item = &String> {
        self.product.iter().chain(&self.design).chain(&self.data)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub title: String,
    pub dates: String,
    pub stack: Vec<String>,
    pub bullets: Vec<String>,
    pub outcome: Option<String>,
    pub aliases: Vec<String>,
}

impl Project {
    /// The part of the title before the en-dash separator, e.g. "BetWise" for
    /// "BetWise – Interactive Decision Support System".
    pub fn short_name(&self) -> Option<&str> {
        let (head, _) = self.title.split_once('–')?;
        let head = head.trim();
        (!head.is_empty()).then_some(head)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
    pub company: String,
    pub role: String,
    pub dates: String,
    pub location: String,
    pub bullets: Vec<String>,
    pub impact: Option<String>,
    pub aliases: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Leadership {
    pub title: String,
    pub dates: String,
    pub bullets: Vec<String>,
    pub impact: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    pub school: String,
    pub program: String,
    pub dates: String,
    pub location: String,
    pub highlights: Vec<String>,
}

impl ProfileDocument {
    /// Reads and parses the profile JSON at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read profile document at {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Profile document at {} is not valid JSON", path.display()))
    }
}
