use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use super::{
    dto::{
        AuthResponse, LoginRequest, MeResponse, PasswordChangeRequest, ProfileUpdateRequest,
        PublicUser, RegisterRequest,
    },
    extractors::CurrentUser,
    jwt::JwtKeys,
    password::{hash_password, verify_password},
    repo_types::User,
};
use crate::{error::AppError, state::AppState};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/me", get(get_me))
}

pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/me/profile", put(update_profile))
        .route("/me/password", put(change_password))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/users/:id/approve", post(approve_user))
        .route("/users/:id", delete(delete_user))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.email = payload.email.trim().to_string();

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(AppError::Validation("invalid email".into()));
    }
    if payload.password.len() < 8 {
        warn!("password too short");
        return Err(AppError::Validation("password too short".into()));
    }
    if payload.first_name.trim().is_empty() || payload.last_name.trim().is_empty() {
        return Err(AppError::Validation(
            "first and last name are required".into(),
        ));
    }

    if User::exists_by_email(&state.db, &payload.email).await? {
        warn!(email = %payload.email, "email already registered");
        return Err(AppError::Conflict("email already registered".into()));
    }

    let hash = hash_password(&payload.password)?;
    let user = User::create(
        &state.db,
        &payload.email,
        &hash,
        payload.first_name.trim(),
        payload.last_name.trim(),
    )
    .await?;

    let keys = JwtKeys::from_ref(&state);
    let token = keys.issue(&user.email, user.id)?;

    info!(user_id = user.id, email = %user.email, "user registered");
    Ok(Json(AuthResponse {
        token,
        user: PublicUser {
            id: user.id,
            full_name: user.full_name(),
            email: user.email,
        },
    }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.email = payload.email.trim().to_string();

    let user = User::find_by_email(&state.db, &payload.email)
        .await?
        .ok_or_else(|| {
            warn!(email = %payload.email, "login unknown email");
            AppError::Unauthenticated("invalid email or password")
        })?;

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(user_id = user.id, "login invalid password");
        return Err(AppError::Unauthenticated("invalid email or password"));
    }

    if !user.approved {
        warn!(user_id = user.id, "login attempt by unapproved user");
        return Err(AppError::Forbidden("account not approved yet"));
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.issue(&user.email, user.id)?;

    info!(user_id = user.id, email = %user.email, "user logged in");
    Ok(Json(AuthResponse {
        token,
        user: PublicUser {
            id: user.id,
            full_name: user.full_name(),
            email: user.email,
        },
    }))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<MeResponse>, AppError> {
    let user = User::find_by_id(&state.db, current.id)
        .await?
        .ok_or(AppError::NotFound("user"))?;

    Ok(Json(MeResponse {
        id: user.id,
        full_name: user.full_name(),
        approved: user.approved,
        email: user.email,
    }))
}

#[instrument(skip(state, payload))]
pub async fn update_profile(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(payload): Json<ProfileUpdateRequest>,
) -> Result<Json<MeResponse>, AppError> {
    if payload.first_name.trim().is_empty() || payload.last_name.trim().is_empty() {
        return Err(AppError::Validation(
            "first and last name are required".into(),
        ));
    }

    let user = User::update_profile(&state.db, current.id, &payload)
        .await?
        .ok_or(AppError::NotFound("user"))?;

    info!(user_id = user.id, "profile updated");
    Ok(Json(MeResponse {
        id: user.id,
        full_name: user.full_name(),
        approved: user.approved,
        email: user.email,
    }))
}

#[instrument(skip(state, payload))]
pub async fn change_password(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(payload): Json<PasswordChangeRequest>,
) -> Result<StatusCode, AppError> {
    if payload.new_password.len() < 8 {
        return Err(AppError::Validation("password too short".into()));
    }

    let user = User::find_by_id(&state.db, current.id)
        .await?
        .ok_or(AppError::NotFound("user"))?;

    if !verify_password(&payload.current_password, &user.password_hash)? {
        warn!(user_id = user.id, "password change with wrong current password");
        return Err(AppError::Validation("current password is incorrect".into()));
    }

    let hash = hash_password(&payload.new_password)?;
    User::update_password(&state.db, user.id, &hash).await?;

    info!(user_id = user.id, "password changed");
    Ok(StatusCode::NO_CONTENT)
}

/// Admin approval. Registration currently auto-approves, so this mostly
/// exists for accounts flipped back to unapproved by hand.
#[instrument(skip(state))]
pub async fn approve_user(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<PublicUser>, AppError> {
    let user = User::approve(&state.db, id)
        .await?
        .ok_or(AppError::NotFound("user"))?;

    info!(user_id = user.id, approved_by = current.id, "user approved");
    Ok(Json(PublicUser {
        id: user.id,
        full_name: user.full_name(),
        email: user.email,
    }))
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if !User::delete_by_id(&state.db, id).await? {
        return Err(AppError::NotFound("user"));
    }

    info!(user_id = id, deleted_by = current.id, "user deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("dave@example.com"));
        assert!(is_valid_email("first.last@sub.domain.de"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("two@@example.com"));
        assert!(!is_valid_email("spaces in@example.com"));
        assert!(!is_valid_email("missing-tld@example"));
    }
}
