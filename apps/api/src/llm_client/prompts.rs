// Shared prompt constants and prompt-building utilities.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// Keeps the model in the profile owner's voice.
pub const FIRST_PERSON_INSTRUCTION: &str = "\
    Always speak as \"I\" and refer to your own experiences. \
    Keep responses conversational, natural, and 2-4 sentences. \
    Never use bullet points or raw lists; rewrite everything into flowing, first-person sentences.";

/// Common instruction appended to every answer prompt.
pub const GROUNDING_INSTRUCTION: &str = "\
    CRITICAL: Answer ONLY from the provided resume/profile context. \
    Do NOT infer, interpolate, or invent details.";
