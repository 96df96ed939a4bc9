//! Follow-up suggestions and conversation starters.

use crate::models::profile::ProfileDocument;
use crate::retrieval::intent::Intent;

/// Up to three follow-ups keyed off the routed intent. General queries get none.
pub fn follow_ups(intent: &Intent) -> Vec<String> {
    let picks: &[&str] = match intent {
        Intent::Company(_) => &[
            "What tools did you use there?",
            "What did you learn there?",
            "Tell me about your other experiences",
        ],
        Intent::Project(_) => &[
            "What tech stack did you use?",
            "What was the outcome?",
            "What other projects have you built?",
        ],
        Intent::Skills => &[
            "Which projects used these skills?",
            "Where have you applied these tools at work?",
            "What are your strongest skills?",
        ],
        Intent::Education => &[
            "What courses did you take?",
            "How does your program connect to your work?",
            "Where have you worked?",
        ],
        Intent::Contact => &[
            "What are your top skills?",
            "What projects have you built?",
            "Where have you worked?",
        ],
        Intent::Leadership => &[
            "What events did you run?",
            "How did you secure sponsors?",
            "Where have you worked?",
        ],
        Intent::General => &[],
    };
    picks.iter().map(|s| s.to_string()).collect()
}

/// Opening line shown before the first question.
pub fn greeting(profile: &ProfileDocument) -> String {
    let name = profile.contact.name.trim();
    if name.is_empty() {
        "Hi! Ask me anything about my experience, skills, projects, or background!".to_string()
    } else {
        format!(
            "Hi! I'm {name}. Ask me anything about my experience, skills, projects, or background!"
        )
    }
}

/// Quick questions offered before the conversation starts, built from the
/// profile so they are always answerable.
pub fn seed_questions(profile: &ProfileDocument) -> Vec<String> {
    let mut questions = Vec::new();

    let first_name = profile.contact.name.split_whitespace().next();
    match first_name {
        Some(name) => questions.push(format!("Who is {name}?")),
        None => questions.push("Who are you?".to_string()),
    }
    questions.push("What are your top skills?".to_string());

    if let Some(project) = profile.projects.iter().find(|p| !p.title.trim().is_empty()) {
        let name = project.short_name().unwrap_or(project.title.trim());
        questions.push(format!("Tell me about {name}"));
    }

    if let Some(job) = profile
        .experience
        .iter()
        .find(|e| !e.company.trim().is_empty() && !e.bullets.is_empty())
    {
        // Shortest known name reads most naturally
        let name = job
            .aliases
            .iter()
            .map(|a| a.trim())
            .filter(|a| a.len() > 3)
            .min_by_key(|a| a.len())
            .unwrap_or(job.company.trim());
        questions.push(format!("What did you do at {name}?"));
    }

    if !profile.education.is_empty() {
        questions.push("What's your education background?".to_string());
    }
    questions.push("How can I contact you?".to_string());

    questions
}
