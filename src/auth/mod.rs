use crate::state::AppState;
use axum::Router;

mod dto;
pub mod handlers;
pub mod jwt;
pub mod middleware;
mod password;
pub mod repo;
pub mod repo_types;

pub fn router(state: &AppState) -> Router<AppState> {
    handlers::auth_routes(state)
}
