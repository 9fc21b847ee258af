use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;
use tracing::{info, instrument};

use super::repo_types::Note;
use crate::{auth::extractors::CurrentUser, error::AppError, state::AppState};

const MAX_CONTENT_LEN: usize = 1000;
const DEFAULT_COLOR: &str = "white";

#[derive(Debug, Deserialize)]
pub struct NoteInput {
    pub title: String,
    pub content: String,
    pub color: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/notes", get(list).post(create))
        .route("/notes/:id", put(update).delete(delete_one))
}

fn validate(input: &NoteInput) -> Result<(), AppError> {
    if input.title.trim().is_empty() {
        return Err(AppError::Validation("title is required".into()));
    }
    if input.content.len() > MAX_CONTENT_LEN {
        return Err(AppError::Validation(format!(
            "content must be at most {MAX_CONTENT_LEN} characters"
        )));
    }
    Ok(())
}

fn color_or_default(color: Option<&str>) -> &str {
    match color {
        Some(c) if !c.trim().is_empty() => c,
        _ => DEFAULT_COLOR,
    }
}

#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<Vec<Note>>, AppError> {
    let rows = Note::list_by_owner(&state.db, current.id).await?;
    Ok(Json(rows))
}

#[instrument(skip(state, payload))]
pub async fn create(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(payload): Json<NoteInput>,
) -> Result<(StatusCode, Json<Note>), AppError> {
    validate(&payload)?;

    let color = color_or_default(payload.color.as_deref());
    let saved = Note::insert(&state.db, current.id, &payload.title, &payload.content, color).await?;

    info!(note_id = saved.id, owner_id = current.id, "note created");
    Ok((StatusCode::CREATED, Json(saved)))
}

#[instrument(skip(state, payload))]
pub async fn update(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<NoteInput>,
) -> Result<Json<Note>, AppError> {
    validate(&payload)?;

    let existing = Note::find_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound("note"))?;
    if existing.user_id != current.id {
        return Err(AppError::Forbidden("not allowed"));
    }

    let color = color_or_default(payload.color.as_deref());
    let updated = Note::update(&state.db, id, &payload.title, &payload.content, color).await?;
    Ok(Json(updated))
}

#[instrument(skip(state))]
pub async fn delete_one(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let existing = Note::find_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound("note"))?;
    if existing.user_id != current.id {
        return Err(AppError::Forbidden("not allowed"));
    }

    Note::delete_by_id(&state.db, id).await?;
    info!(note_id = id, owner_id = current.id, "note deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_color_defaults_to_white() {
        assert_eq!(color_or_default(None), "white");
        assert_eq!(color_or_default(Some("  ")), "white");
        assert_eq!(color_or_default(Some("yellow")), "yellow");
    }

    #[test]
    fn validate_bounds_content_length() {
        let input = NoteInput {
            title: "Todo".into(),
            content: "x".repeat(MAX_CONTENT_LEN + 1),
            color: None,
        };
        assert!(matches!(validate(&input), Err(AppError::Validation(_))));
    }

    #[test]
    fn validate_requires_title() {
        let input = NoteInput {
            title: " ".into(),
            content: "hello".into(),
            color: None,
        };
        assert!(matches!(validate(&input), Err(AppError::Validation(_))));
    }
}
