use axum::{extract::State, Json};
use chrono::Timelike;
use serde::{Deserialize, Serialize};

use crate::models::Mood;
use crate::prompting::slot::CurrentPrompt;
use crate::prompting::source::PromptContext;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct RefreshRequest {
    /// Mood the writer has picked for the entry they are about to write.
    #[serde(default)]
    pub mood: Option<Mood>,
}

#[derive(Serialize)]
pub struct PromptResponse {
    #[serde(flatten)]
    pub prompt: CurrentPrompt,
    pub backend: &'static str,
}

/// GET /api/v1/prompt
pub async fn handle_get_prompt(State(state): State<AppState>) -> Json<PromptResponse> {
    Json(PromptResponse {
        prompt: state.prompts.current(),
        backend: state.prompts.backend(),
    })
}

/// POST /api/v1/prompt/refresh
/// Answers with the locally selected prompt; a remote refinement, when
/// configured, lands later and shows up on `GET /api/v1/prompt`.
pub async fn handle_refresh_prompt(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Json<PromptResponse> {
    let now = state.clock.now();
    let view = state.journal.view().await;
    let ctx = PromptContext::new(now.hour(), req.mood).with_recent_entries(view.snapshot.entries());
    let (prompt, _refinement) = state.prompts.refresh(ctx);
    Json(PromptResponse {
        prompt,
        backend: state.prompts.backend(),
    })
}
