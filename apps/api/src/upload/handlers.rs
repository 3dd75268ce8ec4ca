//! Axum route handlers for resume upload.

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::{debug, info, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::questions::plan::InterviewPlan;
use crate::state::AppState;
use crate::upload::extract::{extract_upload, file_extension, DocumentFormat};

/// Multipart field carrying the resume file.
const RESUME_FIELD: &str = "resume";
/// Extracted text shorter than this (after trimming) is treated as empty.
const MIN_TEXT_CHARS: usize = 10;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub status: &'static str,
    #[serde(flatten)]
    pub plan: InterviewPlan,
}

struct ResumeUpload {
    filename: String,
    data: Bytes,
}

/// POST /upload, POST /api/upload
///
/// Extracts text from the uploaded resume, infers skills, and returns
/// interview questions.
pub async fn handle_upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    let request_id = Uuid::new_v4();
    // A body that is not multipart/form-data carries no file part at all.
    let multipart = multipart.map_err(|rejection| {
        debug!("Multipart rejected: {rejection}");
        AppError::Validation("No file part in request".to_string())
    })?;
    process_upload(state, multipart)
        .instrument(tracing::info_span!("upload", %request_id))
        .await
}

async fn process_upload(
    state: AppState,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    info!("Received upload request");

    let upload = read_resume_field(&mut multipart).await?;
    let extension = file_extension(&upload.filename);
    info!(
        "Processing file: {} (type: {extension}, {} bytes)",
        upload.filename,
        upload.data.len()
    );

    let format = DocumentFormat::from_extension(&extension).ok_or_else(|| {
        AppError::Validation(format!(
            "Unsupported file format: {extension}. Please upload PDF, DOCX, or TXT."
        ))
    })?;

    let text = tokio::task::spawn_blocking(move || extract_upload(&upload.data, format))
        .await
        .map_err(|e| AppError::Internal(format!("extraction task failed: {e}")))??;
    info!("Extracted text length: {} characters", text.chars().count());

    if text.trim().chars().count() < MIN_TEXT_CHARS {
        return Err(AppError::Validation(
            "Resume content appears to be empty or too short. Please check your file."
                .to_string(),
        ));
    }

    let skills: Vec<String> = state.extractor.extract_skills(&text).into_iter().collect();
    info!("Extracted {} skills", skills.len());

    let plan = state.selector.select(&text, &skills).await;

    Ok(Json(UploadResponse {
        status: "success",
        plan,
    }))
}

async fn read_resume_field(multipart: &mut Multipart) -> Result<ResumeUpload, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("Invalid multipart body", e))?
    {
        if field.name() != Some(RESUME_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().trim().to_string();
        if filename.is_empty() {
            return Err(AppError::Validation("No file selected".to_string()));
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_error("Failed to read uploaded file", e))?;

        return Ok(ResumeUpload { filename, data });
    }

    Err(AppError::Validation("No file part in request".to_string()))
}

/// Body-limit overruns surface as 413; any other multipart failure is a bad request.
fn multipart_error(context: &str, err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!(
            "Uploaded file is too large: {}",
            err.body_text()
        ))
    } else {
        AppError::Validation(format!("{context}: {}", err.body_text()))
    }
}
