// src/web/types.rs
use crate::config::EnhancerConfig;
use crate::document::DOCX_MIME_TYPE;
use crate::enhancer::CompletionBackend;
use crate::generator::GeneratedCv;
use crate::types::CvRecord;
use crate::utils::content_disposition;
use rocket::http::{ContentType, Header};
use rocket::response::{self, Responder};
use rocket::serde::{Deserialize, Serialize};
use rocket::{Request, Response};
use std::sync::Arc;

pub const WARNINGS_HEADER: &str = "X-Cv-Warnings";
pub const ENHANCED_HEADER: &str = "X-Cv-Enhanced";

pub struct ServerConfig {
    pub enhancer: EnhancerConfig,
    /// Used when a request carries no API key of its own
    pub default_api_key: Option<String>,
    /// Overrides the HTTP completion client (tests)
    pub backend: Option<Arc<dyn CompletionBackend>>,
}

pub struct DocxResponse {
    pub data: Vec<u8>,
    pub filename: String,
    pub enhanced: bool,
    pub warnings: Vec<String>,
}

impl From<GeneratedCv> for DocxResponse {
    fn from(cv: GeneratedCv) -> Self {
        Self {
            data: cv.data,
            filename: cv.filename,
            enhanced: cv.enhanced,
            warnings: cv.warnings,
        }
    }
}

pub fn docx_content_type() -> ContentType {
    let (top, sub) = DOCX_MIME_TYPE
        .split_once('/')
        .unwrap_or(("application", "octet-stream"));
    ContentType::new(top, sub)
}

impl<'r> Responder<'r, 'static> for DocxResponse {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let mut binding = Response::build();
        let mut response = binding
            .header(docx_content_type())
            .raw_header("Content-Disposition", content_disposition(&self.filename))
            .header(Header::new(ENHANCED_HEADER, self.enhanced.to_string()))
            .sized_body(self.data.len(), std::io::Cursor::new(self.data));

        if !self.warnings.is_empty() {
            // Header values cannot carry line breaks
            let joined = self.warnings.join(" | ").replace(['\r', '\n'], " ");
            response = response.raw_header(WARNINGS_HEADER, joined);
        }

        response.ok()
    }
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct GenerateRequest {
    pub record: CvRecord,
    #[serde(default)]
    pub enhance: bool,
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct PreviewRequest {
    pub record: CvRecord,
}

// ===== Standard response types =====

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct DataResponse<T> {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct StandardErrorResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_fields: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum ResponseType {
    Data,
    Error,
}

// Request types with conversation_id support
#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct StandardRequest<T> {
    #[serde(flatten)]
    pub data: T,
    pub conversation_id: Option<String>,
}

// Helper trait for extracting conversation_id
pub trait WithConversationId {
    fn conversation_id(&self) -> Option<String>;
}

impl<T> WithConversationId for StandardRequest<T> {
    fn conversation_id(&self) -> Option<String> {
        self.conversation_id.clone()
    }
}

impl<T> DataResponse<T> {
    pub fn success(message: String, data: T, conversation_id: Option<String>) -> Self {
        Self {
            response_type: ResponseType::Data,
            success: true,
            message,
            data,
            conversation_id,
        }
    }
}

impl StandardErrorResponse {
    pub fn new(
        error: String,
        error_code: String,
        suggestions: Vec<String>,
        conversation_id: Option<String>,
    ) -> Self {
        Self {
            response_type: ResponseType::Error,
            success: false,
            error,
            error_code,
            suggestions,
            missing_fields: None,
            conversation_id,
        }
    }

    pub fn with_missing_fields(mut self, fields: &[&str]) -> Self {
        self.missing_fields = Some(fields.iter().map(|f| f.to_string()).collect());
        self
    }
}
