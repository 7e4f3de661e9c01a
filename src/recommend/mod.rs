mod client;
mod dto;
pub mod handlers;

pub use client::HttpRecommendClient;

use async_trait::async_trait;
use axum::Router;

use crate::state::AppState;

/// ML recommendation microservice. Behind a trait so tests can stub it out.
#[async_trait]
pub trait RecommendClient: Send + Sync {
    /// Meal recommendations for the named food; the upstream payload is
    /// forwarded to the client verbatim.
    async fn recommend(&self, food: &str) -> anyhow::Result<serde_json::Value>;
}

pub fn router() -> Router<AppState> {
    handlers::recommend_routes()
}
