// Completion prompts for remote prompt generation.

pub const SMART_PROMPT_MAX_TOKENS: u32 = 150;

pub const SMART_PROMPT_GUIDELINES: &str = "\
Generate a single thoughtful journaling prompt based on the user's current mood and context.
- Ask an open-ended question that invites reflection
- If mood is low, be gentle and supportive
- If mood is good, help them explore what's working
- Keep it to 1-2 sentences max";

/// Replace `{mood}`, `{time_of_day}` and `{themes}` before sending.
pub const SMART_PROMPT_TEMPLATE: &str = "Current mood: {mood}
Time of day: {time_of_day}
{themes}
Generate a journaling prompt for this person.";
