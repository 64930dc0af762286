use axum::Json;
use serde::Deserialize;

use crate::scoring::{score_resume, ResumeTrack, ScanResult};

#[derive(Deserialize)]
pub struct ScoreRequest {
    pub resume_text: String,
    pub track: Option<ResumeTrack>,
}

/// POST /api/v1/review/score
/// Raw scan with every reason and warning; scoring never fails.
pub async fn handle_score(Json(req): Json<ScoreRequest>) -> Json<ScanResult> {
    Json(score_resume(&req.resume_text, req.track))
}
