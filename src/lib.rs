//! Render structured CV records into Word documents, optionally rewriting
//! sections through a text generation API.

pub mod cli;
pub mod config;
pub mod document;
pub mod enhancer;
pub mod generator;
pub mod preview;
pub mod types;
pub mod utils;
pub mod web;

pub use config::{AppConfig, ConfigManager, EnhancerConfig};
pub use document::{CvDocument, DOCX_MIME_TYPE};
pub use enhancer::{CompletionBackend, ContentEnhancer, SectionKind};
pub use generator::{CvGenerator, GeneratedCv, GenerationError, GenerationOptions};
pub use preview::CvPreview;
pub use types::{CvRecord, EducationEntry, ExperienceEntry};

/// Convenience function for one-off generation with default settings
pub async fn generate_cv(
    record: &CvRecord,
    options: &GenerationOptions,
) -> Result<GeneratedCv, GenerationError> {
    CvGenerator::new(EnhancerConfig::default())
        .generate(record, options)
        .await
}
