//! Intent Router — narrows the candidate chunks to the section a query is
//! plainly about before keyword scoring runs.
//!
//! Keyword overlap alone confuses "a company named inside a project bullet"
//! with "a question about that company". Checks run in a fixed order and the
//! first hit wins: company → project → skills/tools → education → contact →
//! leadership → none.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::models::profile::ProfileDocument;
use crate::retrieval::aliases::AliasMap;
use crate::retrieval::chunker::{Chunk, SectionType};
use crate::retrieval::text::{contains_term, normalize_name};

/// Generic words that signal a question about skills or tooling.
const SKILL_WORDS: &[&str] = &[
    "skill",
    "skills",
    "tool",
    "tools",
    "technology",
    "technologies",
    "tech stack",
    "stack",
    "software",
    "programming",
    "language",
    "languages",
];

/// Generic words that signal a question about education.
const EDUCATION_WORDS: &[&str] = &[
    "education",
    "school",
    "university",
    "college",
    "degree",
    "study",
    "studying",
    "studied",
    "courses",
    "coursework",
    "graduate",
    "graduating",
];

/// Words that signal a request for contact details.
const CONTACT_WORDS: &[&str] = &[
    "contact", "email", "e-mail", "phone", "reach", "linkedin", "github",
];

/// Words that signal a question about leadership roles.
const LEADERSHIP_WORDS: &[&str] = &["leadership", "president", "society", "club"];

/// Detected query category. Company and project intents carry the canonical
/// key that triggered them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum Intent {
    Company(String),
    Project(String),
    Skills,
    Education,
    Contact,
    Leadership,
    General,
}

impl Intent {
    /// Whether chunks of `section` stay candidates under this intent.
    pub fn allows(&self, section: SectionType) -> bool {
        match self {
            Intent::Company(_) => section == SectionType::Experience,
            Intent::Project(_) => section == SectionType::Project,
            Intent::Skills => matches!(section, SectionType::Skills | SectionType::Project),
            Intent::Education => section == SectionType::Education,
            Intent::Contact => section == SectionType::Contact,
            Intent::Leadership => section == SectionType::Leadership,
            Intent::General => true,
        }
    }
}

/// Trigger vocabulary derived once from the loaded profile.
#[derive(Debug, Clone, Default)]
pub struct IntentRouter {
    companies: Vec<(String, BTreeSet<String>)>,
    projects: Vec<(String, BTreeSet<String>)>,
    skill_terms: BTreeSet<String>,
    education_terms: BTreeSet<String>,
    contact_terms: BTreeSet<String>,
    leadership_terms: BTreeSet<String>,
}

impl IntentRouter {
    pub fn new(profile: &ProfileDocument, aliases: &AliasMap) -> Self {
        let fragments_for = |key: String| {
            let fragments = aliases
                .get(&key)
                .cloned()
                .unwrap_or_else(|| BTreeSet::from([key.clone()]));
            (key, fragments)
        };

        let companies = profile
            .experience
            .iter()
            .map(|e| normalize_name(&e.company))
            .filter(|k| !k.is_empty())
            .map(fragments_for)
            .collect();

        let projects = profile
            .projects
            .iter()
            .map(|p| normalize_name(&p.title))
            .filter(|k| !k.is_empty())
            .map(fragments_for)
            .collect();

        let skill_terms = SKILL_WORDS
            .iter()
            .map(|w| w.to_string())
            .chain(profile.skills.all().map(|s| s.to_lowercase()))
            .chain(
                profile
                    .projects
                    .iter()
                    .flat_map(|p| p.stack.iter().map(|s| s.to_lowercase())),
            )
            .filter(|t| !t.trim().is_empty())
            .collect();

        let education_terms = EDUCATION_WORDS
            .iter()
            .map(|w| w.to_string())
            .chain(profile.education.iter().map(|e| e.school.to_lowercase()))
            .filter(|t| !t.trim().is_empty())
            .collect();

        Self {
            companies,
            projects,
            skill_terms,
            education_terms,
            contact_terms: words(CONTACT_WORDS),
            leadership_terms: words(LEADERSHIP_WORDS),
        }
    }

    /// Classifies the query. Depends only on the query text, never on the
    /// candidate set, which keeps routing idempotent.
    pub fn detect(&self, query: &str) -> Intent {
        let query = query.to_lowercase();
        let mentions = |terms: &BTreeSet<String>| terms.iter().any(|t| contains_term(&query, t));

        if let Some((key, _)) = self.companies.iter().find(|(_, f)| mentions(f)) {
            return Intent::Company(key.clone());
        }
        if let Some((key, _)) = self.projects.iter().find(|(_, f)| mentions(f)) {
            return Intent::Project(key.clone());
        }
        if mentions(&self.skill_terms) {
            return Intent::Skills;
        }
        if mentions(&self.education_terms) {
            return Intent::Education;
        }
        if mentions(&self.contact_terms) {
            return Intent::Contact;
        }
        if mentions(&self.leadership_terms) {
            return Intent::Leadership;
        }
        Intent::General
    }

    /// Filters `chunks` down to the sections the query's intent allows.
    pub fn route(&self, query: &str, chunks: &[Chunk]) -> (Intent, Vec<Chunk>) {
        let intent = self.detect(query);
        let routed = chunks
            .iter()
            .filter(|c| intent.allows(c.section))
            .cloned()
            .collect();
        (intent, routed)
    }
}

fn words(list: &[&str]) -> BTreeSet<String> {
    list.iter().map(|w| w.to_string()).collect()
}
