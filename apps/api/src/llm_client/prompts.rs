// Shared prompt fragments for every companion request.
// Each feature that calls the completion service keeps its own prompts.rs
// alongside it and builds on these.

/// Voice shared by all companion requests.
pub const COMPANION_VOICE: &str = "You are a compassionate journaling companion. \
    Be warm, supportive and non-judgmental. \
    Be specific to this person's own words and patterns, never generic.";

/// Keeps replies displayable as-is.
pub const PLAIN_TEXT_ONLY: &str = "Return ONLY the requested text. \
    Do NOT add a preamble, markdown, or surrounding quotation marks.";

/// Joins the shared fragments with feature-specific guidelines.
pub fn system_prompt(guidelines: &str) -> String {
    format!("{COMPANION_VOICE}\n\n{guidelines}\n\n{PLAIN_TEXT_ONLY}")
}
