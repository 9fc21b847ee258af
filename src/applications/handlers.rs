use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use super::dto::{ApplicationInput, ApplicationListView, ListQuery, StatusUpdateRequest};
use super::repo_types::Application;
use super::services;
use crate::{auth::extractors::CurrentUser, error::AppError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/applications", get(list).post(create))
        .route(
            "/applications/:id",
            get(get_one).put(update).delete(delete_one),
        )
        .route("/applications/:id/status", post(update_status))
}

/// List view: filtered applications plus the per-status counts shown in the
/// sidebar.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    current: CurrentUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApplicationListView>, AppError> {
    let applications = services::list_applications(
        &state.db,
        current.id,
        query.status,
        query.search.as_deref(),
    )
    .await?;
    let counts = services::status_counts(&state.db, current.id).await?;

    Ok(Json(ApplicationListView {
        applications,
        counts,
    }))
}

#[instrument(skip(state, payload))]
pub async fn create(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(payload): Json<ApplicationInput>,
) -> Result<(StatusCode, Json<Application>), AppError> {
    let saved = services::create_application(&state.db, &payload, current.id).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

#[instrument(skip(state))]
pub async fn get_one(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<Application>, AppError> {
    let application = services::get_application(&state.db, id, current.id).await?;
    Ok(Json(application))
}

#[instrument(skip(state, payload))]
pub async fn update(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<ApplicationInput>,
) -> Result<Json<Application>, AppError> {
    let updated = services::update_application(&state.db, id, &payload, current.id).await?;
    Ok(Json(updated))
}

#[instrument(skip(state))]
pub async fn delete_one(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    services::delete_application(&state.db, id, current.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state, payload))]
pub async fn update_status(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<StatusUpdateRequest>,
) -> Result<Json<Application>, AppError> {
    let updated = services::update_status(&state.db, id, payload.status, current.id).await?;
    Ok(Json(updated))
}
