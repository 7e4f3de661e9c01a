use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{parse_facts_content, NutritionFacts, NutritionProvider};
use crate::config::LlmConfig;

const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

/// Together AI chat-completions client (OpenAI-compatible endpoint).
pub struct TogetherClient {
    http: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl TogetherClient {
    pub fn new(config: &LlmConfig) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("build llm http client")?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }

    async fn complete(&self, request: ChatRequest) -> anyhow::Result<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .context("llm request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("llm returned {}: {}", status, body);
        }

        let parsed: ChatResponse = response.json().await.context("decode llm response")?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .context("llm response had no choices")?;
        debug!(len = content.len(), "llm completion received");
        Ok(content)
    }
}

#[async_trait]
impl NutritionProvider for TogetherClient {
    async fn nutrition_facts(&self, food: &str) -> anyhow::Result<NutritionFacts> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: "You are a nutrition expert. Return nutrition facts per 100g \
                              in strict JSON format."
                        .into(),
                },
                ChatMessage {
                    role: "user",
                    content: format!(
                        "Provide nutrition facts per 100g of {food} in this JSON format: \
                         {{\"calories\":0,\"carbs\":0,\"protein\":0,\"fat\":0,\"fiber\":0,\
                         \"glycemic_index\":null}}"
                    ),
                },
            ],
            max_tokens: Some(200),
            temperature: 0.7,
        };

        let content = self.complete(request).await?;
        match parse_facts_content(&content) {
            Some(facts) => Ok(facts),
            None => {
                warn!(food = %food, "llm content was not parseable json, returning zeros");
                Ok(NutritionFacts::zeroed())
            }
        }
    }

    async fn simplify_report(&self, text: &str) -> anyhow::Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: format!("Simplify this medical report into easy language:\n\n{text}"),
            }],
            max_tokens: None,
            temperature: 0.7,
        };
        self.complete(request).await
    }
}
