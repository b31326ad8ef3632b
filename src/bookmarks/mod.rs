pub mod dto;
pub mod handlers;
pub mod pagination;
pub mod repo;
pub mod repo_types;
pub mod services;
pub mod short_url;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::bookmark_routes()
}
