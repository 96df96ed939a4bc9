// All LLM prompt constants for the Gateway module.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::chat::formatter::NOT_FOUND;
use crate::gateway::AugmentRequest;
use crate::llm_client::prompts::{FIRST_PERSON_INSTRUCTION, GROUNDING_INSTRUCTION};

/// Answer system prompt template. Replace `{name}`, `{grounding_instruction}`,
/// `{first_person_instruction}` and `{not_found}` before sending.
const ANSWER_SYSTEM_TEMPLATE: &str = "You are {name} speaking in first person. \
    {grounding_instruction} \
    If the information isn't in the context, reply exactly: \"{not_found}\" \
    {first_person_instruction}";

pub fn build_system_prompt(name: &str) -> String {
    let name = if name.trim().is_empty() {
        "the profile owner"
    } else {
        name.trim()
    };
    ANSWER_SYSTEM_TEMPLATE
        .replace("{name}", name)
        .replace("{grounding_instruction}", GROUNDING_INSTRUCTION)
        .replace("{not_found}", NOT_FOUND)
        .replace("{first_person_instruction}", FIRST_PERSON_INSTRUCTION)
}

pub fn build_answer_prompt(request: &AugmentRequest) -> String {
    let context = request
        .context
        .iter()
        .map(|c| format!("[{}] {}", c.source, c.content))
        .collect::<Vec<_>>()
        .join("\n\n");
    // Single pass: braces in profile text are not template slots
    format!("Context:\n{context}\n\nQuestion: {}", request.query.trim())
}
