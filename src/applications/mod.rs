use crate::state::AppState;
use axum::Router;

mod dto;
pub mod handlers;
mod repo;
pub mod repo_types;
pub mod services;
pub mod status;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
