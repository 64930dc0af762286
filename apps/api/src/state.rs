use std::sync::Arc;

use crate::config::Config;
use crate::parsing::TextExtractor;
use crate::review::ResumeReviewer;
use crate::session::SessionRegistry;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub sessions: SessionRegistry,
    /// Default: DocumentTextExtractor (pdf-extract + DOCX XML runs).
    pub extractor: Arc<dyn TextExtractor>,
    /// Default: HeuristicReviewer. Sessions share the same instance.
    pub reviewer: Arc<dyn ResumeReviewer>,
}

impl AppState {
    pub fn new(
        config: Config,
        reviewer: Arc<dyn ResumeReviewer>,
        extractor: Arc<dyn TextExtractor>,
    ) -> Self {
        let sessions = SessionRegistry::new(
            config.session_settings(),
            Arc::clone(&reviewer),
            Arc::clone(&extractor),
        );
        Self {
            config,
            sessions,
            extractor,
            reviewer,
        }
    }
}
