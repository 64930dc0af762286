use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::parsing::extract::ExtractedText;
use crate::parsing::{parse_resume_text, validate_resume_file, ParsedResume, ResumeFile};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ParseRequest {
    pub resume_text: String,
}

/// POST /api/v1/resume/parse
pub async fn handle_parse(Json(req): Json<ParseRequest>) -> Json<ParsedResume> {
    Json(parse_resume_text(&req.resume_text))
}

/// POST /api/v1/resume/extract
/// Multipart field `file`; returns the plain text pulled from the PDF/DOCX.
pub async fn handle_extract(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ExtractedText>, AppError> {
    let file = read_resume_file(multipart).await?;
    if let Some(rejection) = validate_resume_file(&file.name, &file.media_type, file.size) {
        return Err(AppError::UnprocessableEntity(rejection));
    }
    let extracted = state.extractor.extract(&file).await?;
    Ok(Json(extracted))
}

/// Reads the first multipart field named `file`.
pub async fn read_resume_file(mut multipart: Multipart) -> Result<ResumeFile, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let name = field.file_name().unwrap_or_default().to_string();
        let media_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(e.to_string()))?;
        return Ok(ResumeFile::new(name, media_type, bytes));
    }
    Err(AppError::Validation(
        "Missing multipart field 'file'".to_string(),
    ))
}
