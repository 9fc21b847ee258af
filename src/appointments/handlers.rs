use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;
use time::OffsetDateTime;
use tracing::{info, instrument};

use super::repo_types::Appointment;
use crate::{auth::extractors::CurrentUser, error::AppError, state::AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentInput {
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub participants: Option<String>,
    pub category: Option<String>,
    pub start_time: OffsetDateTime,
    pub end_time: OffsetDateTime,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/appointments", get(list).post(create))
        .route("/appointments/:id", put(update).delete(delete_one))
}

#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let rows = Appointment::list_by_owner(&state.db, current.id).await?;
    Ok(Json(rows))
}

#[instrument(skip(state, payload))]
pub async fn create(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(payload): Json<AppointmentInput>,
) -> Result<(StatusCode, Json<Appointment>), AppError> {
    if payload.title.trim().is_empty() {
        return Err(AppError::Validation("title is required".into()));
    }

    let saved = Appointment::insert(
        &state.db,
        current.id,
        &payload.title,
        payload.description.as_deref(),
        payload.location.as_deref(),
        payload.participants.as_deref(),
        payload.category.as_deref(),
        payload.start_time,
        payload.end_time,
    )
    .await?;

    info!(appointment_id = saved.id, owner_id = current.id, "appointment created");
    Ok((StatusCode::CREATED, Json(saved)))
}

#[instrument(skip(state, payload))]
pub async fn update(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<AppointmentInput>,
) -> Result<Json<Appointment>, AppError> {
    if payload.title.trim().is_empty() {
        return Err(AppError::Validation("title is required".into()));
    }

    let existing = Appointment::find_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound("appointment"))?;
    if existing.user_id != current.id {
        return Err(AppError::Forbidden("not allowed"));
    }

    let updated = Appointment::update(
        &state.db,
        id,
        &payload.title,
        payload.description.as_deref(),
        payload.location.as_deref(),
        payload.participants.as_deref(),
        payload.category.as_deref(),
        payload.start_time,
        payload.end_time,
    )
    .await?;

    Ok(Json(updated))
}

#[instrument(skip(state))]
pub async fn delete_one(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let existing = Appointment::find_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound("appointment"))?;
    if existing.user_id != current.id {
        return Err(AppError::Forbidden("not allowed"));
    }

    Appointment::delete_by_id(&state.db, id).await?;
    info!(appointment_id = id, owner_id = current.id, "appointment deleted");
    Ok(StatusCode::NO_CONTENT)
}
