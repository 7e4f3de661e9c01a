use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use super::RecommendClient;

const RECOMMEND_TIMEOUT_SECS: u64 = 30;

/// HTTP client for the recommendation endpoint of the ML microservice.
pub struct HttpRecommendClient {
    http: Client,
    base_url: String,
}

impl HttpRecommendClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let http = Client::builder()
            .build()
            .context("build recommendation http client")?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl RecommendClient for HttpRecommendClient {
    async fn recommend(&self, food: &str) -> anyhow::Result<Value> {
        let response = self
            .http
            .post(format!("{}/recommend", self.base_url))
            .timeout(Duration::from_secs(RECOMMEND_TIMEOUT_SECS))
            .json(&serde_json::json!({ "food": food }))
            .send()
            .await
            .context("recommendation request failed")?
            .error_for_status()
            .context("recommendation service rejected the request")?;

        let body: Value = response
            .json()
            .await
            .context("decode recommendation response")?;
        debug!(food = %food, "recommendations received");
        Ok(body)
    }
}
