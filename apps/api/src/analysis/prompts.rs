// Completion prompts for the insights features.

pub const WEEKLY_REFLECTION_MAX_TOKENS: u32 = 300;
pub const PERSONAL_INSIGHT_MAX_TOKENS: u32 = 200;

pub const WEEKLY_REFLECTION_GUIDELINES: &str = "\
Write a brief weekly reflection on the journal entries provided. It should:
- Highlight patterns you notice (emotions, themes, progress)
- Offer one gentle observation or question for reflection
- Be 3-4 sentences max
Reference specific things from the entries.";

pub const PERSONAL_INSIGHT_GUIDELINES: &str = "\
Based on the journaling patterns provided, offer ONE meaningful insight that could \
help this person on their self-discovery journey. Be thought-provoking without \
being preachy. 2-3 sentences max.";

/// Replace `{entries}` before sending.
pub const WEEKLY_REFLECTION_TEMPLATE: &str = "Here are my recent journal entries:

{entries}

Please give me a weekly reflection summary.";

/// Replace `{patterns}` before sending.
pub const PERSONAL_INSIGHT_TEMPLATE: &str = "My journaling patterns:
{patterns}

What insight do you have for me?";
