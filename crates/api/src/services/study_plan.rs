//! Study-plan generation client.
//!
//! Thin proxy over the Gemini `generateContent` REST endpoint: one request,
//! no retry, no streaming. Upstream failures surface as a single error the
//! route maps to 503 with a generic message.

use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{error, warn};

use crate::config::AiConfig;

/// Errors from the study-plan proxy.
#[derive(Debug, Error)]
pub enum StudyPlanError {
    #[error("Study plan service not configured")]
    NotConfigured,

    #[error("Upstream request failed: {0}")]
    RequestFailed(String),

    #[error("Upstream returned {0}")]
    UpstreamStatus(u16),

    #[error("Upstream response contained no candidates")]
    EmptyResponse,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

/// Client for the generative language API.
#[derive(Clone)]
pub struct StudyPlanClient {
    client: reqwest::Client,
    config: Arc<AiConfig>,
}

impl StudyPlanClient {
    pub fn new(config: AiConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    /// Generate a study plan for the given prompt. Returns the first
    /// candidate's text.
    pub async fn generate(&self, prompt: &str) -> Result<String, StudyPlanError> {
        if self.config.api_key.is_empty() {
            warn!("Study plan requested but no API key is configured");
            return Err(StudyPlanError::NotConfigured);
        }

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model,
        );

        let body = serde_json::json!({
            "contents": [{
                "parts": [{ "text": prompt }]
            }]
        });

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Study plan upstream request failed");
                StudyPlanError::RequestFailed(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(
                status = %status,
                error = %error_body,
                "Study plan upstream returned an error"
            );
            return Err(StudyPlanError::UpstreamStatus(status.as_u16()));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| StudyPlanError::RequestFailed(format!("Invalid response body: {}", e)))?;

        extract_plan(parsed)
    }
}

fn extract_plan(response: GenerateContentResponse) -> Result<String, StudyPlanError> {
    let text = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content.parts.into_iter().next())
        .map(|p| p.text)
        .filter(|t| !t.trim().is_empty())
        .ok_or(StudyPlanError::EmptyResponse)?;

    Ok(text)
}
