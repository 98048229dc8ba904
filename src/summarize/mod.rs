use crate::state::AppState;
use axum::Router;

pub mod annotate;
mod dto;
pub mod engine;
pub mod extract;
pub mod handlers;
pub mod repo;
pub mod resolver;

pub fn router() -> Router<AppState> {
    handlers::summarize_routes()
}
