//! Prompt sources: the swappable decision point behind prompt refreshes.
//!
//! Default: `LocalPromptSource` (static pools, injected RNG, no I/O).
//! `RemotePromptSource` answers immediately from the same pools and then
//! refines the prompt through the completion service.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::llm_client::prompts::system_prompt;
use crate::llm_client::{request_completion, Completion, CompletionRequest, RemoteOutcome};
use crate::models::{newest_first, Entry, Mood, Theme};
use crate::prompting::pools::PromptPools;
use crate::prompting::prompts::{
    SMART_PROMPT_GUIDELINES, SMART_PROMPT_MAX_TOKENS, SMART_PROMPT_TEMPLATE,
};

const RECENT_THEME_ENTRIES: usize = 3;

/// Inputs to prompt selection.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptContext {
    /// Local hour of day, 0-23.
    pub hour: u32,
    pub recent_mood: Option<Mood>,
    /// Theme sets of the most recent entries, newest first.
    pub recent_themes: Vec<BTreeSet<Theme>>,
}

impl PromptContext {
    pub fn new(hour: u32, recent_mood: Option<Mood>) -> Self {
        Self {
            hour,
            recent_mood,
            recent_themes: Vec::new(),
        }
    }

    pub fn with_recent_entries(mut self, entries: &[Entry]) -> Self {
        self.recent_themes = newest_first(entries)
            .into_iter()
            .take(RECENT_THEME_ENTRIES)
            .map(|e| e.themes.clone())
            .collect();
        self
    }

    fn time_of_day(&self) -> &'static str {
        match self.hour {
            0..=11 => "morning",
            12..=17 => "afternoon",
            _ => "evening",
        }
    }
}

/// Carried in `AppState` as `Arc<dyn PromptSource>`. Implement this to swap the
/// prompt backend without touching the handlers.
#[async_trait]
pub trait PromptSource: Send + Sync {
    /// Synchronous answer, always available.
    fn immediate(&self, ctx: &PromptContext) -> String;

    /// Whether `refine` does anything beyond `immediate`.
    fn refines(&self) -> bool {
        false
    }

    async fn refine(&self, _ctx: &PromptContext) -> RemoteOutcome {
        RemoteOutcome::Failed("prompt source has no refinement".to_string())
    }

    fn backend(&self) -> &'static str;
}

pub struct LocalPromptSource {
    pools: PromptPools,
    rng: Mutex<StdRng>,
}

impl LocalPromptSource {
    pub fn new(pools: PromptPools, rng: StdRng) -> Self {
        Self {
            pools,
            rng: Mutex::new(rng),
        }
    }

    pub fn from_entropy() -> Self {
        Self::new(PromptPools::default(), StdRng::from_entropy())
    }
}

#[async_trait]
impl PromptSource for LocalPromptSource {
    fn immediate(&self, ctx: &PromptContext) -> String {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        self.pools.select(ctx.hour, ctx.recent_mood, &mut *rng)
    }

    fn backend(&self) -> &'static str {
        "local"
    }
}

pub struct RemotePromptSource {
    local: LocalPromptSource,
    completion: Arc<dyn Completion>,
}

impl RemotePromptSource {
    pub fn new(local: LocalPromptSource, completion: Arc<dyn Completion>) -> Self {
        Self { local, completion }
    }
}

#[async_trait]
impl PromptSource for RemotePromptSource {
    fn immediate(&self, ctx: &PromptContext) -> String {
        self.local.immediate(ctx)
    }

    fn refines(&self) -> bool {
        true
    }

    async fn refine(&self, ctx: &PromptContext) -> RemoteOutcome {
        let request = smart_prompt_request(ctx);
        request_completion(Some(self.completion.as_ref()), &request, "prompt generation").await
    }

    fn backend(&self) -> &'static str {
        "remote"
    }
}

pub fn smart_prompt_request(ctx: &PromptContext) -> CompletionRequest {
    let mood = ctx.recent_mood.map_or("not shared", Mood::as_str);
    let themes = ctx
        .recent_themes
        .iter()
        .filter(|set| !set.is_empty())
        .map(|set| {
            set.iter()
                .map(|t| t.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        })
        .collect::<Vec<_>>();
    let themes_line = if themes.is_empty() {
        String::new()
    } else {
        format!("Recent themes from their journal: {}\n", themes.join("; "))
    };

    let content = SMART_PROMPT_TEMPLATE
        .replace("{mood}", mood)
        .replace("{time_of_day}", ctx.time_of_day())
        .replace("{themes}\n", &themes_line);

    CompletionRequest::user(
        &system_prompt(SMART_PROMPT_GUIDELINES),
        content,
        SMART_PROMPT_MAX_TOKENS,
    )
}
