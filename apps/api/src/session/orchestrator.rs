//! Dialog session: serialises dialog mutations, runs scans and drives the scene.
//!
//! Every mutation goes through `SessionInner::commit` while holding the session
//! lock. Scan work runs in a spawned task tagged with the `ScanToken` current at
//! launch; a completion only lands if the dialog is still open and no newer scan
//! or close has bumped the token since.

use std::sync::{Arc, Weak};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::dialog::actions::{self, MISSING_FILE_ERROR};
use crate::dialog::state::{PendingScan, ScanSource, SidebarMode};
use crate::dialog::{
    plan_command, reduce_all, DialogCommand, DialogError, DialogEvent, DialogState,
    DialogStateId, DialogView,
};
use crate::parsing::{ResumeFile, TextExtractor};
use crate::review::{ResumeReviewer, ReviewRequest, ReviewResult, ReviewSource};
use crate::scene::bridge::scene_cues;
use crate::scene::models::{IdleClip, SceneEvent};
use crate::scene::{IdleSchedule, SceneController, ScenePhase, SceneState};
use crate::scoring::ResumeTrack;

pub const SCAN_FAILED_ERROR: &str = "Scan failed. Please try again.";

const SUBSCRIBER_CAPACITY: usize = 64;

/// Generation counter; only the scan launched under the current value may
/// write its outcome.
pub type ScanToken = u64;

#[derive(Debug, Clone, Copy)]
pub struct SessionSettings {
    /// Pause between launching a scan and reviewing it.
    pub scan_delay: Duration,
    pub track: ResumeTrack,
    pub idle: IdleSchedule,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            scan_delay: Duration::from_millis(2_200),
            track: ResumeTrack::FullStack,
            idle: IdleSchedule::default(),
        }
    }
}

#[derive(Clone)]
pub struct DialogSession {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    id: Uuid,
    created_at: DateTime<Utc>,
    core: Mutex<SessionCore>,
    tx: broadcast::Sender<DialogState>,
    scene: SceneController,
    reviewer: Arc<dyn ResumeReviewer>,
    extractor: Arc<dyn TextExtractor>,
    settings: SessionSettings,
}

struct SessionCore {
    state: DialogState,
    token: ScanToken,
    scan_task: Option<JoinHandle<()>>,
}

impl SessionCore {
    fn cancel_scan(&mut self) {
        self.token += 1;
        if let Some(task) = self.scan_task.take() {
            task.abort();
        }
    }
}

impl DialogSession {
    /// Creates a session on the welcome screen and plays the greeting.
    pub async fn start(
        settings: SessionSettings,
        reviewer: Arc<dyn ResumeReviewer>,
        extractor: Arc<dyn TextExtractor>,
    ) -> Self {
        let (tx, _rx) = broadcast::channel(SUBSCRIBER_CAPACITY);
        let inner = Arc::new(SessionInner {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            core: Mutex::new(SessionCore {
                state: DialogState::default(),
                token: 0,
                scan_task: None,
            }),
            tx,
            scene: SceneController::new(settings.idle),
            reviewer,
            extractor,
            settings,
        });

        inner.scene.send(SceneEvent::Init);
        {
            let mut core = inner.core.lock().await;
            inner.commit(&mut core, Vec::new());
        }
        info!("Started dialog session {}", inner.id);
        Self { inner }
    }

    pub fn id(&self) -> Uuid {
        self.inner.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.inner.created_at
    }

    pub async fn state(&self) -> DialogState {
        self.inner.core.lock().await.state.clone()
    }

    pub async fn view(&self) -> DialogView {
        DialogView::of(&self.inner.core.lock().await.state)
    }

    pub fn scene_state(&self) -> SceneState {
        self.inner.scene.state()
    }

    /// Receives every dialog state committed after subscribing.
    #[cfg(test)]
    pub fn subscribe(&self) -> broadcast::Receiver<DialogState> {
        self.inner.tx.subscribe()
    }

    #[cfg(test)]
    pub fn subscribe_scene(&self) -> broadcast::Receiver<SceneState> {
        self.inner.scene.subscribe()
    }

    #[instrument(skip(self), fields(session = %self.inner.id))]
    pub async fn apply_command(&self, command: DialogCommand) -> Result<DialogState, DialogError> {
        let mut core = self.inner.core.lock().await;
        let events = plan_command(&core.state, command)?;
        self.inner.commit(&mut core, events);
        Ok(core.state.clone())
    }

    /// Holds `file` if it passes validation, optionally starting an upload scan
    /// with it straight away.
    #[instrument(skip(self, file), fields(session = %self.inner.id, file = %file.name))]
    pub async fn select_file(&self, file: ResumeFile, start_scan: bool) -> DialogState {
        let mut core = self.inner.core.lock().await;
        self.inner.commit(&mut core, actions::select_file(file));

        if start_scan && core.state.resume_file.is_some() {
            let events = actions::start_scan(&core.state, None);
            self.inner.commit(&mut core, events);
        }
        core.state.clone()
    }

    /// The renderer finished the active clip.
    pub async fn video_ended(&self) -> SceneState {
        let mut core = self.inner.core.lock().await;
        if core.state.id == DialogStateId::Scanning {
            self.inner
                .commit(&mut core, vec![DialogEvent::SetScanAnimationCompleted(true)]);
        }
        self.inner.scene.send(SceneEvent::VideoEnded)
    }

    /// The renderer could not play the active clip.
    pub fn video_error(&self) -> SceneState {
        warn!("Scene video failed in session {}", self.inner.id);
        self.inner.scene.send(SceneEvent::SetPhase(ScenePhase::Error));
        self.inner.scene.send(SceneEvent::VideoEnded)
    }

    pub fn update_idle_weights(&self, phase: ScenePhase, clips: Vec<IdleClip>) -> SceneState {
        self.inner
            .scene
            .send(SceneEvent::UpdateIdleWeights { phase, clips })
    }

    /// Cancels the running scan and the pending idle clip.
    pub async fn teardown(&self) {
        self.inner.core.lock().await.cancel_scan();
        self.inner.scene.cancel_idle();
        info!("Tore down dialog session {}", self.inner.id);
    }
}

impl SessionInner {
    /// Folds `events` into the dialog, launches any pending scan, forwards the
    /// transition to the scene and repeats for follow-up events.
    fn commit(self: &Arc<Self>, core: &mut SessionCore, events: Vec<DialogEvent>) {
        let mut batch = events;
        loop {
            let previous = core.state.clone();
            core.state = reduce_all(std::mem::take(&mut core.state), batch);

            if previous.is_open && !core.state.is_open {
                debug!("Dialog closed, cancelling scan {}", core.token);
                core.cancel_scan();
            }
            if let Some(pending) = core.state.pending_scan.clone() {
                self.begin_scan(core, pending);
            }
            if previous.id != core.state.id {
                debug!("Dialog {} -> {}", previous.id, core.state.id);
            }

            let (scene_events, follow_up) = scene_cues(&previous, &core.state);
            for event in scene_events {
                self.scene.send(event);
            }
            let _ = self.tx.send(core.state.clone());

            if follow_up.is_empty() {
                break;
            }
            batch = follow_up;
        }
    }

    fn begin_scan(self: &Arc<Self>, core: &mut SessionCore, pending: PendingScan) {
        core.cancel_scan();
        let job = ScanJob {
            session: Arc::downgrade(self),
            token: core.token,
            reviewer: Arc::clone(&self.reviewer),
            extractor: Arc::clone(&self.extractor),
            delay: self.settings.scan_delay,
            track: self.settings.track,
        };

        let mut events = vec![
            DialogEvent::SetPendingScan(None),
            DialogEvent::SetReviewResult(None),
            DialogEvent::SetUploadError(None),
        ];
        match pending.source {
            ScanSource::Sample => {
                let sample_id = pending.sample_id.unwrap_or_default();
                debug!("Launching sample scan {} for {sample_id}", job.token);
                core.scan_task = Some(tokio::spawn(job.run_sample(sample_id)));
            }
            ScanSource::Upload => match pending.file.or_else(|| core.state.resume_file.clone()) {
                Some(file) => {
                    debug!("Launching upload scan {} for {}", job.token, file.name);
                    events.push(DialogEvent::SetUploading(true));
                    core.scan_task = Some(tokio::spawn(job.run_upload(file)));
                }
                None if core.state.is_open => events.extend([
                    DialogEvent::SetUploadError(Some(MISSING_FILE_ERROR.to_string())),
                    DialogEvent::SetState(DialogStateId::Error),
                ]),
                None => {}
            },
        }
        core.state = reduce_all(std::mem::take(&mut core.state), events);
    }
}

impl Drop for SessionInner {
    fn drop(&mut self) {
        if let Some(task) = self.core.get_mut().scan_task.take() {
            task.abort();
        }
    }
}

/// One launched scan. Holds only a weak handle on its session.
struct ScanJob {
    session: Weak<SessionInner>,
    token: ScanToken,
    reviewer: Arc<dyn ResumeReviewer>,
    extractor: Arc<dyn TextExtractor>,
    delay: Duration,
    track: ResumeTrack,
}

impl ScanJob {
    async fn run_sample(self, sample_id: String) {
        tokio::time::sleep(self.delay).await;
        let outcome = self.review(ReviewSource::sample(&sample_id), None).await;
        self.finish(outcome).await;
    }

    async fn run_upload(self, file: ResumeFile) {
        let extracted = self.extractor.extract(&file).await;

        let text = match extracted {
            Ok(extracted) => {
                if !self.apply_if_current(vec![DialogEvent::SetUploading(false)]).await {
                    return;
                }
                extracted.text
            }
            Err(err) => {
                warn!("Extraction failed for {}: {err}", file.name);
                self.apply_if_current(vec![
                    DialogEvent::SetUploadError(Some(err.to_string())),
                    DialogEvent::SetState(DialogStateId::Error),
                    DialogEvent::SetUploading(false),
                ])
                .await;
                return;
            }
        };

        tokio::time::sleep(self.delay).await;
        let outcome = self.review(ReviewSource::upload(), Some(text)).await;
        self.finish(outcome).await;
    }

    async fn review(
        &self,
        source: ReviewSource,
        resume_text: Option<String>,
    ) -> Result<ReviewResult, String> {
        self.reviewer
            .review(ReviewRequest {
                source,
                resume_text,
                track: Some(self.track),
            })
            .await
            .map_err(|err| match err.to_string() {
                message if message.is_empty() => SCAN_FAILED_ERROR.to_string(),
                message => message,
            })
    }

    async fn finish(&self, outcome: Result<ReviewResult, String>) {
        let events = match outcome {
            Ok(result) => vec![
                DialogEvent::SetReviewResult(Some(result)),
                DialogEvent::SetState(DialogStateId::Results),
                DialogEvent::OpenSidebar {
                    mode: SidebarMode::Results,
                    sample_id: None,
                },
            ],
            Err(message) => vec![
                DialogEvent::SetUploadError(Some(message)),
                DialogEvent::SetState(DialogStateId::Error),
            ],
        };
        self.apply_if_current(events).await;
    }

    /// Commits `events` only while the dialog is open and this scan is current.
    async fn apply_if_current(&self, events: Vec<DialogEvent>) -> bool {
        let Some(inner) = self.session.upgrade() else {
            return false;
        };
        let mut core = inner.core.lock().await;
        if !core.state.is_open || core.token != self.token {
            debug!("Dropping stale completion of scan {}", self.token);
            return false;
        }
        inner.commit(&mut core, events);
        true
    }
}
