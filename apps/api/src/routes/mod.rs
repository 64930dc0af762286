pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::parsing::validation::MAX_FILE_SIZE_BYTES;
use crate::state::AppState;
use crate::{parsing, review, scoring, session};

/// Room for multipart framing around a maximum-size résumé.
const MAX_BODY_BYTES: usize = MAX_FILE_SIZE_BYTES as usize + 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Stateless scanning
        .route("/api/v1/review", post(review::handlers::handle_review))
        .route("/api/v1/review/score", post(scoring::handlers::handle_score))
        .route("/api/v1/resume/parse", post(parsing::handlers::handle_parse))
        .route(
            "/api/v1/resume/extract",
            post(parsing::handlers::handle_extract),
        )
        .route(
            "/api/v1/samples",
            get(review::handlers::handle_list_samples),
        )
        // Dialog sessions
        .route(
            "/api/v1/sessions",
            post(session::handlers::handle_create_session),
        )
        .route(
            "/api/v1/sessions/:id",
            get(session::handlers::handle_get_session)
                .delete(session::handlers::handle_delete_session),
        )
        .route(
            "/api/v1/sessions/:id/commands",
            post(session::handlers::handle_command),
        )
        .route(
            "/api/v1/sessions/:id/upload",
            post(session::handlers::handle_upload),
        )
        .route(
            "/api/v1/sessions/:id/scene",
            post(session::handlers::handle_scene_signal),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}
