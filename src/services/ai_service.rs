use crate::config::Config;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Turns a prompt into the provider's raw text output.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListModelsResponse {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

#[derive(Clone)]
pub struct GeminiService {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiService {
    pub fn new(api_key: String, model: String, base_url: String, client: Client) -> Self {
        Self {
            client,
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.generation_timeout_secs))
            .build()?;
        Ok(Self::new(
            config.google_api_key.clone(),
            config.gemini_model.clone(),
            config.gemini_base_url.clone(),
            client,
        ))
    }

    pub async fn generate_content(&self, model: &str, prompt: &str) -> Result<String> {
        let model = model.trim_start_matches("models/");
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, model);
        let body = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        tracing::debug!(model, "Sending generateContent request");
        let res = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::ExternalApi(format!("generateContent request failed: {}", e)))?;

        let status = res.status();
        if !status.is_success() {
            let text = res.text().await.unwrap_or_default();
            return Err(Error::ExternalApi(format!("Gemini API Error {}: {}", status, text)));
        }

        let parsed: GenerateResponse = res
            .json()
            .await
            .map_err(|e| Error::ExternalApi(format!("Invalid Gemini response format: {}", e)))?;

        extract_text(parsed)
    }

    pub async fn list_models(&self) -> Result<Vec<ModelInfo>> {
        let url = format!("{}/v1beta/models", self.base_url);
        let res = self
            .client
            .get(&url)
            .header("x-goog-api-key", &self.api_key)
            .send()
            .await
            .map_err(|e| Error::ExternalApi(format!("models request failed: {}", e)))?;

        let status = res.status();
        if !status.is_success() {
            let text = res.text().await.unwrap_or_default();
            return Err(Error::ExternalApi(format!("Gemini API Error {}: {}", status, text)));
        }

        let parsed: ListModelsResponse = res
            .json()
            .await
            .map_err(|e| Error::ExternalApi(format!("Invalid models response: {}", e)))?;
        Ok(parsed.models)
    }

    /// Tries each model in order and returns the first one that produces text,
    /// together with that text.
    pub async fn first_working_model(
        &self,
        candidates: &[String],
        prompt: &str,
    ) -> Result<(String, String)> {
        let mut last_err = None;
        for model in candidates {
            match self.generate_content(model, prompt).await {
                Ok(text) => return Ok((model.clone(), text)),
                Err(e) => {
                    tracing::warn!(model = %model, error = %e, "Model failed");
                    last_err = Some(e);
                }
            }
        }
        Err(last_err
            .unwrap_or_else(|| Error::ExternalApi("No candidate models to try".to_string())))
    }
}

#[async_trait]
impl QuizGenerator for GeminiService {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.generate_content(&self.model, prompt).await
    }
}

fn extract_text(resp: GenerateResponse) -> Result<String> {
    if resp.candidates.is_empty() {
        if let Some(reason) = resp.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(Error::ExternalApi(format!("Prompt blocked: {}", reason)));
        }
    }

    let text: String = resp
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(Error::EmptyResponse);
    }
    Ok(text)
}
