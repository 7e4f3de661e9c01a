use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::VisionClient;

/// Detection can be slow; the upstream service caps inference around 15s.
const DETECT_TIMEOUT_SECS: u64 = 15;
const OCR_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Deserialize)]
struct OcrResponse {
    text: String,
}

#[derive(Debug, Deserialize)]
struct DetectResponse {
    primary_item: String,
}

/// HTTP client for the OCR/detection microservice.
pub struct HttpVisionClient {
    http: Client,
    base_url: String,
}

impl HttpVisionClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let http = Client::builder()
            .build()
            .context("build vision http client")?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn file_form(file: Bytes, content_type: &str, filename: &str) -> anyhow::Result<Form> {
        let part = Part::bytes(file.to_vec())
            .file_name(filename.to_string())
            .mime_str(content_type)
            .context("invalid content type")?;
        Ok(Form::new().part("file", part))
    }
}

#[async_trait]
impl VisionClient for HttpVisionClient {
    async fn extract_text(
        &self,
        file: Bytes,
        content_type: &str,
        filename: &str,
    ) -> anyhow::Result<String> {
        let form = Self::file_form(file, content_type, filename)?;
        let response = self
            .http
            .post(format!("{}/ocr", self.base_url))
            .timeout(Duration::from_secs(OCR_TIMEOUT_SECS))
            .multipart(form)
            .send()
            .await
            .context("ocr request failed")?
            .error_for_status()
            .context("ocr service rejected the upload")?;

        let body: OcrResponse = response.json().await.context("decode ocr response")?;
        debug!(chars = body.text.len(), "ocr text extracted");
        Ok(body.text)
    }

    async fn detect_food(
        &self,
        file: Bytes,
        content_type: &str,
        filename: &str,
    ) -> anyhow::Result<String> {
        let form = Self::file_form(file, content_type, filename)?;
        let response = self
            .http
            .post(format!("{}/detect-food", self.base_url))
            .timeout(Duration::from_secs(DETECT_TIMEOUT_SECS))
            .multipart(form)
            .send()
            .await
            .context("detection request failed")?
            .error_for_status()
            .context("detection service rejected the upload")?;

        let body: DetectResponse = response.json().await.context("decode detection response")?;
        anyhow::ensure!(
            !body.primary_item.trim().is_empty(),
            "detection service returned an empty label"
        );
        debug!(label = %body.primary_item, "food detected");
        Ok(body.primary_item)
    }
}
