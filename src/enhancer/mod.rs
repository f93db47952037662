// src/enhancer/mod.rs
//! Best-effort rewriting of CV sections through a text generation API.
//!
//! Enhancement never fails a generation: any error is logged, kept as a
//! warning for the caller and the original text is used instead.

pub mod groq_client;
pub mod prompts;

pub use groq_client::GroqClient;
pub use prompts::SectionKind;

use crate::config::EnhancerConfig;
use crate::types::cv_record::is_present;
use crate::types::response::{ChatCompletionRequest, ChatMessage};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Returns the trimmed text of the first completion choice.
    async fn complete(&self, credential: &str, request: &ChatCompletionRequest) -> Result<String>;
}

pub struct ContentEnhancer {
    backend: Arc<dyn CompletionBackend>,
    model: String,
    temperature: f32,
    max_tokens: u32,
    warnings: Vec<String>,
}

impl ContentEnhancer {
    pub fn new(backend: Arc<dyn CompletionBackend>, config: &EnhancerConfig) -> Self {
        Self {
            backend,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            warnings: Vec::new(),
        }
    }

    /// Enhancer backed by the real HTTP client.
    pub fn from_config(config: &EnhancerConfig) -> Result<Self> {
        let client = GroqClient::new(config)?;
        Ok(Self::new(Arc::new(client), config))
    }

    pub fn build_request(&self, text: &str, kind: &SectionKind) -> ChatCompletionRequest {
        ChatCompletionRequest {
            messages: vec![ChatMessage::user(kind.prompt_for(text))],
            model: self.model.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }

    pub async fn enhance(&mut self, text: &str, kind: &SectionKind, credential: Option<&str>) -> String {
        let credential = match credential {
            Some(key) if is_present(key) => key.trim(),
            _ => return text.to_string(),
        };
        if !is_present(text) {
            return text.to_string();
        }

        let request = self.build_request(text, kind);
        match self.backend.complete(credential, &request).await {
            Ok(enhanced) => {
                info!("Enhanced {} section ({} -> {} chars)", kind, text.len(), enhanced.len());
                enhanced
            }
            Err(e) => {
                warn!("Enhancement of {} section failed, keeping original: {:#}", kind, e);
                self.warnings
                    .push(format!("Error enhancing {} text: {}", kind, e));
                text.to_string()
            }
        }
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn take_warnings(&mut self) -> Vec<String> {
        std::mem::take(&mut self.warnings)
    }
}
