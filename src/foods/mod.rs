mod dto;
pub mod handlers;
pub mod repo;
pub mod table;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::food_routes()
}
