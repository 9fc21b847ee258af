use axum::{extract::State, routing::get, Json, Router};
use time::OffsetDateTime;
use tracing::instrument;

use super::dto::DashboardView;
use crate::{
    applications::{repo_types::Application, services},
    auth::extractors::CurrentUser,
    error::AppError,
    state::AppState,
};

/// How many rows each dashboard panel shows.
const PANEL_SIZE: usize = 5;
/// Deadlines within this many days count as "upcoming".
const DEADLINE_WINDOW_DAYS: i64 = 7;

pub fn routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(dashboard))
}

/// Recomputed per request; nothing here is cached.
#[instrument(skip(state))]
pub async fn dashboard(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<DashboardView>, AppError> {
    let recent = Application::list_recent(&state.db, current.id, PANEL_SIZE as i64).await?;

    let mut open = services::open_applications(&state.db, current.id).await?;
    open.truncate(PANEL_SIZE);

    let upcoming =
        services::upcoming_deadlines(&state.db, DEADLINE_WINDOW_DAYS, current.id).await?;

    let total = services::total_count(&state.db, current.id).await?;
    let active = services::active_count(&state.db, current.id).await?;

    Ok(Json(DashboardView {
        greeting: greeting(OffsetDateTime::now_utc().hour()),
        total_applications: total,
        active_applications: active,
        recent,
        open_applications: open,
        upcoming_deadlines: upcoming,
    }))
}

fn greeting(hour: u8) -> String {
    let text = match hour {
        5..=11 => "Good morning",
        12..=17 => "Good afternoon",
        _ => "Good evening",
    };
    text.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greeting_follows_time_of_day() {
        assert_eq!(greeting(6), "Good morning");
        assert_eq!(greeting(11), "Good morning");
        assert_eq!(greeting(12), "Good afternoon");
        assert_eq!(greeting(17), "Good afternoon");
        assert_eq!(greeting(22), "Good evening");
        assert_eq!(greeting(3), "Good evening");
    }
}
