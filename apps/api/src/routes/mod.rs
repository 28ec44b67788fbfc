pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::analysis::handlers as insights;
use crate::journal::handlers as journal;
use crate::prompting::handlers as prompts;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Entries
        .route(
            "/api/v1/entries",
            get(journal::handle_list_entries)
                .post(journal::handle_create_entry)
                .delete(journal::handle_clear_entries),
        )
        .route("/api/v1/entries/history", get(journal::handle_history))
        .route("/api/v1/entries/:id", delete(journal::handle_delete_entry))
        .route("/api/v1/demo", post(journal::handle_seed_demo))
        // Insights
        .route("/api/v1/insights", get(insights::handle_get_insights))
        .route(
            "/api/v1/insights/weekly-summary",
            get(insights::handle_weekly_summary),
        )
        .route(
            "/api/v1/insights/personal",
            get(insights::handle_personal_insight),
        )
        .route("/api/v1/insights/calendar", get(insights::handle_calendar))
        // Prompts
        .route("/api/v1/prompt", get(prompts::handle_get_prompt))
        .route("/api/v1/prompt/refresh", post(prompts::handle_refresh_prompt))
        // Settings
        .route(
            "/api/v1/settings",
            get(journal::handle_get_settings).put(journal::handle_update_settings),
        )
        .with_state(state)
}
