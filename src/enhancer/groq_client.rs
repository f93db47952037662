// src/enhancer/groq_client.rs
use super::CompletionBackend;
use crate::config::EnhancerConfig;
use crate::types::response::{ChatCompletionRequest, ChatCompletionResponse};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error};

/// Chat completions client for Groq (or any OpenAI-compatible endpoint).
pub struct GroqClient {
    client: Client,
    api_url: String,
}

impl GroqClient {
    pub fn new(config: &EnhancerConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
        })
    }
}

#[async_trait]
impl CompletionBackend for GroqClient {
    async fn complete(&self, credential: &str, request: &ChatCompletionRequest) -> Result<String> {
        debug!("Sending completion request to {}", self.api_url);

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(credential)
            .json(request)
            .send()
            .await
            .context("Failed to send request to text generation API")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Text generation API error {}: {}", status, error_text);
            anyhow::bail!("Groq API error: {}", status);
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .context("Failed to parse text generation API response")?;

        completion
            .first_content()
            .ok_or_else(|| anyhow::anyhow!("Text generation API returned no choices"))
    }
}
