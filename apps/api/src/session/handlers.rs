use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dialog::{DialogCommand, DialogView};
use crate::errors::AppError;
use crate::parsing::handlers::read_resume_file;
use crate::scene::models::IdleClip;
use crate::scene::{ScenePhase, SceneState};
use crate::session::DialogSession;
use crate::state::AppState;

#[derive(Serialize)]
pub struct SessionResponse {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub dialog: DialogView,
    pub scene: SceneState,
}

impl SessionResponse {
    async fn of(session: &DialogSession) -> Self {
        Self {
            id: session.id(),
            created_at: session.created_at(),
            dialog: session.view().await,
            scene: session.scene_state(),
        }
    }
}

#[derive(Deserialize)]
pub struct UploadQuery {
    #[serde(default)]
    pub start_scan: bool,
}

/// Playback signals reported by the renderer.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SceneSignal {
    VideoEnded,
    VideoError,
    UpdateIdleWeights {
        phase: ScenePhase,
        clips: Vec<IdleClip>,
    },
}

async fn find_session(state: &AppState, id: Uuid) -> Result<DialogSession, AppError> {
    state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionResponse>) {
    let session = state.sessions.create().await;
    (StatusCode::CREATED, Json(SessionResponse::of(&session).await))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = find_session(&state, id).await?;
    Ok(Json(SessionResponse::of(&session).await))
}

/// POST /api/v1/sessions/:id/commands
pub async fn handle_command(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(command): Json<DialogCommand>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = find_session(&state, id).await?;
    session.apply_command(command).await?;
    Ok(Json(SessionResponse::of(&session).await))
}

/// POST /api/v1/sessions/:id/upload
/// Multipart field `file`. A rejected file is reported on the dialog, not as an HTTP error.
pub async fn handle_upload(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<UploadQuery>,
    multipart: Multipart,
) -> Result<Json<SessionResponse>, AppError> {
    let session = find_session(&state, id).await?;

    let file = read_resume_file(multipart).await?;
    session.select_file(file, query.start_scan).await;
    Ok(Json(SessionResponse::of(&session).await))
}

/// POST /api/v1/sessions/:id/scene
pub async fn handle_scene_signal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(signal): Json<SceneSignal>,
) -> Result<Json<SceneState>, AppError> {
    let session = find_session(&state, id).await?;
    let scene = match signal {
        SceneSignal::VideoEnded => session.video_ended().await,
        SceneSignal::VideoError => session.video_error(),
        SceneSignal::UpdateIdleWeights { phase, clips } => {
            if clips.iter().any(|clip| !clip.weight.is_finite() || clip.weight < 0.0) {
                return Err(AppError::Validation(
                    "Idle clip weights must be finite and non-negative".to_string(),
                ));
            }
            session.update_idle_weights(phase, clips)
        }
    };
    Ok(Json(scene))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .sessions
        .remove(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;
    Ok(StatusCode::NO_CONTENT)
}
