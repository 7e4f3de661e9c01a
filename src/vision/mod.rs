mod client;
mod dto;
pub mod handlers;

pub use client::HttpVisionClient;

use async_trait::async_trait;
use axum::Router;
use bytes::Bytes;

use crate::state::AppState;

/// External OCR / food-detection microservice. Behind a trait so tests can
/// stub it out.
#[async_trait]
pub trait VisionClient: Send + Sync {
    /// OCR: extracted text of an uploaded report image.
    async fn extract_text(
        &self,
        file: Bytes,
        content_type: &str,
        filename: &str,
    ) -> anyhow::Result<String>;

    /// Food detection: primary label of an uploaded food photo.
    async fn detect_food(
        &self,
        file: Bytes,
        content_type: &str,
        filename: &str,
    ) -> anyhow::Result<String>;
}

pub fn router() -> Router<AppState> {
    handlers::vision_routes()
}
