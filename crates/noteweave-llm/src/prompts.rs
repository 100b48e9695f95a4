//! Prompt construction for section regeneration.
//!
//! Renders planner [`GenerationRequest`]s into prompt text for chat-style
//! generation backends.

use noteweave_core::GenerationRequest;

/// System prompt for the section-writing assistant.
pub const SYSTEM_PROMPT: &str = r#"You are a clinical documentation assistant that rewrites one section of a behavioral health encounter note at a time.

Rules:
- Work only from the original section and the new encounter information you are given
- Never invent symptoms, findings, medications, or events
- Write in the clinical register of the original section
- Return only the section body text, with no header and no commentary"#;

/// Render the user-facing portion of a generation prompt.
pub fn make_generation_prompt(request: &GenerationRequest) -> String {
    let mut prompt = String::new();

    prompt.push_str(&request.instruction);
    prompt.push_str("\n\nFormatting constraints:\n");
    for constraint in &request.constraints {
        prompt.push_str("- ");
        prompt.push_str(constraint);
        prompt.push('\n');
    }

    prompt.push_str("\nOriginal section:\n\"");
    prompt.push_str(&request.original_content);
    prompt.push_str("\"\n\nNew encounter information:\n\"");
    prompt.push_str(&request.new_material);
    prompt.push_str("\"\n\nReturn only the rewritten section body.");

    prompt
}

/// Build a complete single-string prompt with system context, for backends
/// that take one rendered string instead of chat turns.
pub fn build_full_prompt(request: &GenerationRequest) -> String {
    let mut prompt = String::new();

    prompt.push_str("<|system|>\n");
    prompt.push_str(SYSTEM_PROMPT);
    prompt.push_str("\n<|end|>\n");

    prompt.push_str("<|user|>\n");
    prompt.push_str(&make_generation_prompt(request));
    prompt.push_str("\n<|end|>\n");
    prompt.push_str("<|assistant|>\n");

    prompt
}
