//! Chunker — flattens the profile document into first-person prose units.
//!
//! One chunk per project, experience, leadership and education entry, plus one
//! each for the summary, skills and contact sections. Entries missing a required
//! field are skipped with a warning; the rest of the build continues.
//!
//! Section chunks name their own section ("for my education", "my contact details")
//! so a question routed to that section always has a word to match.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::profile::{
    Contact, Education, Experience, Leadership, ProfileDocument, Project, Skills,
};

/// Section a chunk was derived from. Drives intent routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionType {
    Summary,
    Skills,
    Project,
    Experience,
    Education,
    Leadership,
    Contact,
}

/// A single retrievable unit of profile prose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub content: String,
    pub source_label: String,
    pub section: SectionType,
}

impl Chunk {
    fn new(section: SectionType, source_label: impl Into<String>, content: String) -> Self {
        Self {
            content,
            source_label: source_label.into(),
            section,
        }
    }
}

/// Builds the chunk list in profile declaration order.
pub fn build_chunks(profile: &ProfileDocument) -> Vec<Chunk> {
    let mut chunks = Vec::new();

    chunks.extend(summary_chunk(profile));
    chunks.extend(contact_chunk(&profile.contact));
    chunks.extend(skills_chunk(&profile.skills));
    chunks.extend(profile.projects.iter().filter_map(project_chunk));
    chunks.extend(profile.experience.iter().filter_map(experience_chunk));
    chunks.extend(profile.leadership.iter().filter_map(leadership_chunk));
    chunks.extend(profile.education.iter().filter_map(education_chunk));

    chunks
}

fn summary_chunk(profile: &ProfileDocument) -> Option<Chunk> {
    let summary = flatten(&profile.profile_summary);
    if summary.is_empty() {
        warn!("Profile summary is empty; skipping summary chunk");
        return None;
    }
    let name = flatten(&profile.contact.name);
    let content = if name.is_empty() {
        sentence(&summary)
    } else {
        format!("I'm {name}. {}", sentence(&summary))
    };
    Some(Chunk::new(SectionType::Summary, "Profile Summary", content))
}

fn contact_chunk(contact: &Contact) -> Option<Chunk> {
    let mut channels = Vec::new();
    if !contact.email.trim().is_empty() {
        channels.push(format!("email me at {}", contact.email.trim()));
    }
    if !contact.phone.trim().is_empty() {
        channels.push(format!("call my phone at {}", contact.phone.trim()));
    }
    if !contact.linkedin.trim().is_empty() {
        channels.push(format!("connect on LinkedIn ({})", contact.linkedin.trim()));
    }
    if !contact.github.trim().is_empty() {
        channels.push(format!("find my code on GitHub ({})", contact.github.trim()));
    }
    if channels.is_empty() {
        warn!("Contact section has no channels; skipping contact chunk");
        return None;
    }
    let content = format!(
        "You can reach me through my contact details: {}.",
        join_list(&channels, "or")
    );
    Some(Chunk::new(SectionType::Contact, "Contact", content))
}

fn skills_chunk(skills: &Skills) -> Option<Chunk> {
    let groups: Vec<String> = [
        ("Product Tools", &skills.product),
        ("Design & Delivery", &skills.design),
        ("Data & Visualization", &skills.data),
    ]
    .into_iter()
    .filter(|(_, items)| !items.is_empty())
    .map(|(label, items)| format!("{label} ({})", items.join(", ")))
    .collect();

    if groups.is_empty() {
        warn!("Skills section is empty; skipping skills chunk");
        return None;
    }
    let content = format!("My top skills and tools span {}.", join_list(&groups, "and"));
    Some(Chunk::new(SectionType::Skills, "Skills", content))
}

fn project_chunk(project: &Project) -> Option<Chunk> {
    let title = flatten(&project.title);
    if title.is_empty() {
        warn!("Skipping project entry without a title");
        return None;
    }

    let mut content = with_body(
        format!("I built {title}{}", dated(&project.dates)),
        &project.bullets,
    );
    if !project.stack.is_empty() {
        content.push_str(&format!(" Tech stack: {}.", project.stack.join(", ")));
    }
    if let Some(outcome) = project.outcome.as_deref().map(flatten).filter(|o| !o.is_empty()) {
        content.push_str(&format!(" Outcome: {}", sentence(&outcome)));
    }

    let label = project.short_name().unwrap_or(&title).to_string();
    Some(Chunk::new(SectionType::Project, format!("Project – {label}"), content))
}

fn experience_chunk(experience: &Experience) -> Option<Chunk> {
    let company = flatten(&experience.company);
    let role = flatten(&experience.role);
    if company.is_empty() || role.is_empty() {
        warn!(
            company = %company,
            "Skipping experience entry missing company or role"
        );
        return None;
    }

    let location = flatten(&experience.location);
    let mut header = format!("At {company} as {role}{}", dated(&experience.dates));
    if !location.is_empty() {
        header.push_str(&format!(" in {location}"));
    }
    let mut content = with_body(header, &experience.bullets);
    if let Some(impact) = experience.impact.as_deref().map(flatten).filter(|i| !i.is_empty()) {
        content.push_str(&format!(" Impact: {}", sentence(&impact)));
    }

    Some(Chunk::new(
        SectionType::Experience,
        format!("Experience – {company}"),
        content,
    ))
}

fn leadership_chunk(leadership: &Leadership) -> Option<Chunk> {
    let title = flatten(&leadership.title);
    if title.is_empty() {
        warn!("Skipping leadership entry without a title");
        return None;
    }

    let mut content = with_body(
        format!("In my leadership role as {title}{}", dated(&leadership.dates)),
        &leadership.bullets,
    );
    if let Some(impact) = leadership.impact.as_deref().map(flatten).filter(|i| !i.is_empty()) {
        content.push_str(&format!(" Impact: {}", sentence(&impact)));
    }

    Some(Chunk::new(
        SectionType::Leadership,
        format!("Leadership – {title}"),
        content,
    ))
}

fn education_chunk(education: &Education) -> Option<Chunk> {
    let school = flatten(&education.school);
    let program = flatten(&education.program);
    if school.is_empty() || program.is_empty() {
        warn!(school = %school, "Skipping education entry missing school or program");
        return None;
    }

    let location = flatten(&education.location);
    let mut content = format!(
        "For my education, I'm studying {program} at {school}{}",
        dated(&education.dates)
    );
    if !location.is_empty() {
        content.push_str(&format!(" in {location}"));
    }
    content.push('.');

    let highlights: Vec<String> = education
        .highlights
        .iter()
        .map(|h| strip_marker(h))
        .filter(|h| !h.is_empty())
        .collect();
    if !highlights.is_empty() {
        content.push_str(&format!(" Relevant courses: {}.", highlights.join(", ")));
    }

    Some(Chunk::new(
        SectionType::Education,
        format!("Education – {school}"),
        content,
    ))
}

// ────────────────────────────────────────────────────────────────────────────
// Prose helpers
// ────────────────────────────────────────────────────────────────────────────

/// Collapses whitespace and control characters into single spaces.
fn flatten(text: &str) -> String {
    text.split(|c: char| c.is_whitespace() || c.is_control())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Removes a leading bullet marker ("•", "-", "*") and flattens the rest.
fn strip_marker(text: &str) -> String {
    let flat = flatten(text);
    flat.trim_start_matches(['•', '-', '*', '–', '·'])
        .trim_start()
        .to_string()
}

/// Ensures the text ends with terminal punctuation.
fn sentence(text: &str) -> String {
    let text = text.trim_end();
    if text.ends_with(['.', '!', '?']) {
        text.to_string()
    } else {
        format!("{text}.")
    }
}

fn dated(dates: &str) -> String {
    let dates = flatten(dates);
    if dates.is_empty() {
        String::new()
    } else {
        format!(" ({dates})")
    }
}

/// Appends the bullets as prose after a colon, or closes the header with a
/// period when the entry has no bullets.
fn with_body(header: String, bullets: &[String]) -> String {
    let prose: Vec<String> = bullets
        .iter()
        .map(|b| strip_marker(b))
        .filter(|b| !b.is_empty())
        .map(|b| sentence(&b))
        .collect();
    if prose.is_empty() {
        format!("{header}.")
    } else {
        format!("{header}: {}", prose.join(" "))
    }
}

fn join_list(items: &[String], conjunction: &str) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{first} {conjunction} {second}"),
        [head @ .., last] => format!("{}, {conjunction} {last}", head.join(", ")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::sample_profile;

    #[test]
    fn test_build_chunks_is_deterministic() {
        let profile = sample_profile();
        assert_eq!(build_chunks(&profile), build_chunks(&profile));
    }

    #[test]
    fn test_one_chunk_per_entity_plus_singletons() {
        let profile = sample_profile();
        let chunks = build_chunks(&profile);
        let expected = 3
            + profile.projects.len()
            + profile.experience.len()
            + profile.leadership.len()
            + profile.education.len();
        assert_eq!(chunks.len(), expected);

        for singleton in [SectionType::Summary, SectionType::Skills, SectionType::Contact] {
            assert_eq!(chunks.iter().filter(|c| c.section == singleton).count(), 1);
        }
    }

    #[test]
    fn test_experience_chunk_is_first_person_prose() {
        let chunks = build_chunks(&sample_profile());
        let berger = chunks
            .iter()
            .find(|c| c.source_label == "Experience – A. Berger Precision Ltd")
            .expect("A. Berger chunk present");
        assert!(berger.content.starts_with(
            "At A. Berger Precision Ltd as Quality Engineer Intern (JAN 2025 – APR 2025)"
        ));
        assert!(berger.content.contains("Impact: 35% fewer defects"));
    }

    #[test]
    fn test_content_never_contains_bullet_markers() {
        let mut profile = sample_profile();
        profile.projects[0].bullets =
            vec!["• Led the\nmodel work".to_string(), "- Shipped it".to_string()];
        let chunks = build_chunks(&profile);
        for chunk in &chunks {
            assert!(!chunk.content.contains('•'), "marker in {:?}", chunk.content);
            assert!(!chunk.content.contains('\n'));
        }
        let project = chunks.iter().find(|c| c.section == SectionType::Project).unwrap();
        assert!(project.content.contains("Led the model work. Shipped it."));
    }

    #[test]
    fn test_entry_missing_required_field_is_skipped() {
        let mut profile = sample_profile();
        let before = build_chunks(&profile).len();
        profile.experience[1].role = String::new();
        let chunks = build_chunks(&profile);
        assert_eq!(chunks.len(), before - 1);
        assert!(!chunks
            .iter()
            .any(|c| c.source_label == "Experience – A. Berger Precision Ltd"));
    }

    #[test]
    fn test_missing_optional_outcome_keeps_chunk() {
        let mut profile = sample_profile();
        profile.projects[0].outcome = None;
        let chunks = build_chunks(&profile);
        let project = chunks.iter().find(|c| c.section == SectionType::Project).unwrap();
        assert!(!project.content.contains("Outcome:"));
    }

    #[test]
    fn test_entry_without_bullets_ends_cleanly() {
        let chunks = build_chunks(&sample_profile());
        let forcen = chunks
            .iter()
            .find(|c| c.source_label == "Experience – ForceN")
            .unwrap();
        assert!(forcen.content.starts_with(
            "At ForceN as Incoming Quality Engineer Intern (SEP 2025 – DEC 2025) in Toronto, ON. Impact:"
        ));
    }

    #[test]
    fn test_project_label_uses_short_name() {
        let chunks = build_chunks(&sample_profile());
        assert!(chunks.iter().any(|c| c.source_label == "Project – BetWise"));
    }

    #[test]
    fn test_section_chunks_name_their_section() {
        let chunks = build_chunks(&sample_profile());
        let content = |section: SectionType| {
            chunks
                .iter()
                .find(|c| c.section == section)
                .map(|c| c.content.to_lowercase())
                .unwrap()
        };
        assert!(content(SectionType::Skills)
            .starts_with("my top skills and tools span product tools ("));
        assert!(content(SectionType::Education).contains("education"));
        assert!(content(SectionType::Leadership).starts_with("in my leadership role as president"));
        let contact = content(SectionType::Contact);
        for word in ["contact", "reach", "email", "phone"] {
            assert!(contact.contains(word), "contact chunk lacks {word:?}");
        }
    }

    #[test]
    fn test_join_list_forms() {
        let items = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert_eq!(join_list(&items(&["a"]), "and"), "a");
        assert_eq!(join_list(&items(&["a", "b"]), "or"), "a or b");
        assert_eq!(join_list(&items(&["a", "b", "c"]), "and"), "a, b, and c");
    }
}
