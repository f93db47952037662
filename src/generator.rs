// src/generator.rs
use crate::config::EnhancerConfig;
use crate::document::{DocumentAssembler, DocxWriter, DOCX_MIME_TYPE};
use crate::enhancer::{CompletionBackend, ContentEnhancer};
use crate::types::cv_record::{is_present, CvRecord};
use crate::utils::cv_filename;
use chrono::{Local, NaiveDate};
use std::sync::Arc;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

pub const MISSING_API_KEY_WARNING: &str = "AI enhancement requested but no API key provided";

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("Please fill in all required fields: {}", .missing.join(", "))]
    Validation { missing: Vec<&'static str> },
    #[error("Error generating CV: {0:#}")]
    Assembly(anyhow::Error),
}

#[derive(Debug, Clone, Default)]
pub struct GenerationOptions {
    pub enhance: bool,
    pub api_key: Option<String>,
}

impl GenerationOptions {
    /// Credential to enhance with, when enhancement is both requested and possible.
    fn active_credential(&self) -> Option<&str> {
        match &self.api_key {
            Some(key) if self.enhance && is_present(key) => Some(key.trim()),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct GeneratedCv {
    pub data: Vec<u8>,
    pub filename: String,
    pub enhanced: bool,
    /// Non-fatal problems, e.g. enhancement calls that fell back to the original text
    pub warnings: Vec<String>,
}

impl GeneratedCv {
    pub fn mime_type(&self) -> &'static str {
        DOCX_MIME_TYPE
    }
}

pub struct CvGenerator {
    config: EnhancerConfig,
    backend: Option<Arc<dyn CompletionBackend>>,
}

impl CvGenerator {
    pub fn new(config: EnhancerConfig) -> Self {
        Self {
            config,
            backend: None,
        }
    }

    /// Use a specific completion backend instead of the HTTP client.
    pub fn with_backend(mut self, backend: Arc<dyn CompletionBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn validate(record: &CvRecord) -> Result<(), GenerationError> {
        let missing = record.missing_required_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(GenerationError::Validation { missing })
        }
    }

    pub async fn generate(
        &self,
        record: &CvRecord,
        options: &GenerationOptions,
    ) -> Result<GeneratedCv, GenerationError> {
        self.generate_on(record, options, Local::now().date_naive())
            .await
    }

    /// Same as `generate`, with the date used in the filename fixed.
    pub async fn generate_on(
        &self,
        record: &CvRecord,
        options: &GenerationOptions,
        date: NaiveDate,
    ) -> Result<GeneratedCv, GenerationError> {
        let credential = options.active_credential();
        let span = info_span!(
            "cv_generation",
            generation_id = %Uuid::new_v4(),
            enhance = credential.is_some()
        );

        self.run(record, options, credential, date)
            .instrument(span)
            .await
    }

    async fn run(
        &self,
        record: &CvRecord,
        options: &GenerationOptions,
        credential: Option<&str>,
        date: NaiveDate,
    ) -> Result<GeneratedCv, GenerationError> {
        if let Err(e) = Self::validate(record) {
            warn!("Rejected CV record: {}", e);
            return Err(e);
        }

        let mut warnings = Vec::new();
        if options.enhance && credential.is_none() {
            warn!("{}", MISSING_API_KEY_WARNING);
            warnings.push(MISSING_API_KEY_WARNING.to_string());
        }

        let document = match credential {
            Some(key) => {
                let mut enhancer = self.enhancer().map_err(|e| {
                    error!("Failed to create enhancer: {:#}", e);
                    GenerationError::Assembly(e)
                })?;
                let document = DocumentAssembler::with_enhancer(&mut enhancer, key)
                    .assemble(record)
                    .await;
                warnings.extend(enhancer.take_warnings());
                document
            }
            None => DocumentAssembler::plain().assemble(record).await,
        };

        let data = DocxWriter::write(&document).map_err(|e| {
            error!("CV generation failed: {:#}", e);
            GenerationError::Assembly(e)
        })?;

        let filename = cv_filename(&record.name, date);
        info!(
            "CV generation completed, filename: {}, size: {}, warnings: {}",
            filename,
            data.len(),
            warnings.len()
        );

        Ok(GeneratedCv {
            data,
            filename,
            enhanced: credential.is_some(),
            warnings,
        })
    }

    fn enhancer(&self) -> anyhow::Result<ContentEnhancer> {
        match &self.backend {
            Some(backend) => Ok(ContentEnhancer::new(backend.clone(), &self.config)),
            None => ContentEnhancer::from_config(&self.config),
        }
    }
}
