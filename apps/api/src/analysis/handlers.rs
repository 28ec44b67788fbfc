use axum::{extract::State, Json};
use serde::Serialize;

use crate::analysis::companion::{local_insight, personal_insight, weekly_reflection, Reflection};
use crate::analysis::insights::InsightsSnapshot;
use crate::analysis::patterns::{has_written_today, writing_calendar, CalendarDay};
use crate::state::AppState;

#[derive(Serialize)]
pub struct CalendarResponse {
    pub days: Vec<CalendarDay>,
    pub has_written_today: bool,
}

/// GET /api/v1/insights
/// `null` until there are at least two entries.
pub async fn handle_get_insights(State(state): State<AppState>) -> Json<Option<InsightsSnapshot>> {
    Json(state.journal.insights(state.clock.now()).await)
}

/// GET /api/v1/insights/weekly-summary
pub async fn handle_weekly_summary(State(state): State<AppState>) -> Json<Reflection> {
    let view = state.journal.view().await;
    let completion = state.completion();
    let reflection = weekly_reflection(
        completion.as_deref(),
        view.snapshot.entries(),
        state.clock.now(),
    )
    .await;
    Json(reflection)
}

/// GET /api/v1/insights/personal
pub async fn handle_personal_insight(State(state): State<AppState>) -> Json<Reflection> {
    let now = state.clock.now();
    let view = state.journal.view().await;
    let insights = state.journal.insights(now).await;
    let fallback = {
        let mut rng = state.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        local_insight(&mut *rng)
    };
    let completion = state.completion();
    let reflection = personal_insight(
        completion.as_deref(),
        view.snapshot.entries(),
        insights.as_ref(),
        fallback,
    )
    .await;
    Json(reflection)
}

/// GET /api/v1/insights/calendar
pub async fn handle_calendar(State(state): State<AppState>) -> Json<CalendarResponse> {
    let now = state.clock.now();
    let view = state.journal.view().await;
    let entries = view.snapshot.entries();
    Json(CalendarResponse {
        days: writing_calendar(entries, now),
        has_written_today: has_written_today(entries, now),
    })
}
