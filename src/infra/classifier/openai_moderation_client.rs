use crate::core::moderation::{ClassificationResult, ClassifierError, ContentClassifier};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MODERATION_URL: &str = "https://api.openai.com/v1/moderations";

/// Client for the OpenAI moderation endpoint.
pub struct OpenAiModerationClient {
    client: Client,
    api_key: String,
    endpoint: String,
    model: Option<String>,
}

impl OpenAiModerationClient {
    pub fn new(api_key: String, endpoint: String, model: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            endpoint,
            model,
        }
    }
}

#[derive(Serialize)]
struct ModerationPayload<'a> {
    input: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
}

#[derive(Deserialize)]
struct ModerationResponse {
    #[serde(default)]
    results: Vec<ClassificationResult>,
}

#[async_trait]
impl ContentClassifier for OpenAiModerationClient {
    async fn classify(&self, content: &str) -> Result<ClassificationResult, ClassifierError> {
        let payload = ModerationPayload {
            input: content,
            model: self.model.as_deref(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| ClassifierError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ClassifierError::Status { status, body });
        }

        let parsed: ModerationResponse = response
            .json()
            .await
            .map_err(|e| ClassifierError::MalformedResponse(e.to_string()))?;

        // One input text means one result; only the first is used.
        parsed
            .results
            .into_iter()
            .next()
            .ok_or_else(|| ClassifierError::MalformedResponse("response has no results".to_string()))
    }
}
