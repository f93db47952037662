// src/web/handlers/cv_handlers.rs
use crate::generator::{CvGenerator, GenerationError, GenerationOptions};
use crate::preview::CvPreview;
use crate::web::types::{
    DataResponse, DocxResponse, GenerateRequest, PreviewRequest, ServerConfig,
    StandardErrorResponse, StandardRequest, WithConversationId,
};
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info, warn};

pub type ApiError = (Status, Json<StandardErrorResponse>);

pub async fn generate_cv_handler(
    request: Json<StandardRequest<GenerateRequest>>,
    config: &State<ServerConfig>,
) -> Result<DocxResponse, ApiError> {
    let conversation_id = request.conversation_id();
    let StandardRequest { data, .. } = request.into_inner();

    let api_key = data
        .api_key
        .filter(|key| !key.trim().is_empty())
        .or_else(|| config.default_api_key.clone());

    info!(
        "Generate request, enhance: {}, api_key: {}",
        data.enhance,
        if api_key.is_some() { "provided" } else { "none" }
    );

    let mut generator = CvGenerator::new(config.enhancer.clone());
    if let Some(backend) = &config.backend {
        generator = generator.with_backend(backend.clone());
    }

    let options = GenerationOptions {
        enhance: data.enhance,
        api_key,
    };

    match generator.generate(&data.record, &options).await {
        Ok(cv) => {
            info!(
                "CV generated, filename: {}, size: {}",
                cv.filename,
                cv.data.len()
            );
            Ok(DocxResponse::from(cv))
        }
        Err(GenerationError::Validation { missing }) => {
            warn!("Validation failed, missing: {:?}", missing);
            Err((
                Status::UnprocessableEntity,
                Json(
                    StandardErrorResponse::new(
                        format!(
                            "Please fill in all required fields: {}",
                            missing.join(", ")
                        ),
                        "VALIDATION_ERROR".to_string(),
                        vec!["Name, profile and skills are required".to_string()],
                        conversation_id,
                    )
                    .with_missing_fields(&missing),
                ),
            ))
        }
        Err(e) => {
            error!("CV generation failed: {}", e);
            Err((
                Status::InternalServerError,
                Json(StandardErrorResponse::new(
                    e.to_string(),
                    "GENERATION_ERROR".to_string(),
                    vec!["Check the error details above".to_string()],
                    conversation_id,
                )),
            ))
        }
    }
}

pub async fn preview_cv_handler(
    request: Json<StandardRequest<PreviewRequest>>,
) -> Json<DataResponse<CvPreview>> {
    let conversation_id = request.conversation_id();
    let preview = CvPreview::from_record(&request.data.record);

    Json(DataResponse::success(
        "CV preview".to_string(),
        preview,
        conversation_id,
    ))
}
