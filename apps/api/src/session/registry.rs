use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::parsing::TextExtractor;
use crate::review::ResumeReviewer;
use crate::session::orchestrator::{DialogSession, SessionSettings};

#[derive(Clone)]
pub struct SessionRegistry {
    inner: Arc<RegistryInner>,
}

struct RegistryInner {
    sessions: RwLock<HashMap<Uuid, DialogSession>>,
    settings: SessionSettings,
    reviewer: Arc<dyn ResumeReviewer>,
    extractor: Arc<dyn TextExtractor>,
}

impl SessionRegistry {
    pub fn new(
        settings: SessionSettings,
        reviewer: Arc<dyn ResumeReviewer>,
        extractor: Arc<dyn TextExtractor>,
    ) -> Self {
        Self {
            inner: Arc::new(RegistryInner {
                sessions: RwLock::new(HashMap::new()),
                settings,
                reviewer,
                extractor,
            }),
        }
    }

    pub async fn create(&self) -> DialogSession {
        let session = DialogSession::start(
            self.inner.settings,
            Arc::clone(&self.inner.reviewer),
            Arc::clone(&self.inner.extractor),
        )
        .await;
        self.inner
            .sessions
            .write()
            .await
            .insert(session.id(), session.clone());
        session
    }

    pub async fn get(&self, id: Uuid) -> Option<DialogSession> {
        self.inner.sessions.read().await.get(&id).cloned()
    }

    /// Removes the session and tears down its scan and idle tasks.
    pub async fn remove(&self, id: Uuid) -> Option<DialogSession> {
        let session = self.inner.sessions.write().await.remove(&id)?;
        session.teardown().await;
        info!(
            "Removed session {id} after {}s",
            (chrono::Utc::now() - session.created_at()).num_seconds()
        );
        Some(session)
    }

    pub async fn len(&self) -> usize {
        self.inner.sessions.read().await.len()
    }
}
