use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::review::samples::{find_sample, SampleResume, SAMPLE_RESUMES};
use crate::review::{ReviewRequest, ReviewResult, ReviewSource};
use crate::state::AppState;
use crate::scoring::ResumeTrack;

#[derive(Deserialize)]
pub struct ReviewBody {
    pub resume_text: Option<String>,
    pub sample_id: Option<String>,
    pub track: Option<ResumeTrack>,
}

/// POST /api/v1/review
pub async fn handle_review(
    State(state): State<AppState>,
    Json(body): Json<ReviewBody>,
) -> Result<Json<ReviewResult>, AppError> {
    let source = match (&body.sample_id, &body.resume_text) {
        (Some(id), _) => {
            find_sample(id).ok_or_else(|| AppError::NotFound(format!("Sample {id} not found")))?;
            ReviewSource::sample(id)
        }
        (None, Some(_)) => ReviewSource::upload(),
        (None, None) => {
            return Err(AppError::Validation(
                "Provide resume_text or sample_id".to_string(),
            ))
        }
    };

    let review = state
        .reviewer
        .review(ReviewRequest {
            source,
            resume_text: body.resume_text,
            track: body.track.or(Some(state.config.scan_track)),
        })
        .await?;
    Ok(Json(review))
}

/// GET /api/v1/samples
pub async fn handle_list_samples() -> Json<&'static [SampleResume]> {
    Json(SAMPLE_RESUMES)
}
