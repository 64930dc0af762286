//! Dialog snapshot and its pure reducer.

use serde::{Deserialize, Serialize};

use crate::dialog::config::DialogStateId;
use crate::parsing::ResumeFile;
use crate::review::ReviewResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanSource {
    Upload,
    Sample,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SidebarMode {
    Sample,
    Results,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SidebarState {
    pub open: bool,
    pub mode: Option<SidebarMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_id: Option<String>,
}

/// A scan request waiting to be picked up by the session's orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PendingScan {
    pub source: ScanSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<ResumeFile>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DialogState {
    pub id: DialogStateId,
    pub is_open: bool,
    pub selected_sample_id: Option<String>,
    pub last_scan_source: Option<ScanSource>,
    pub resume_file: Option<ResumeFile>,
    pub upload_error: Option<String>,
    pub is_uploading: bool,
    pub review_result: Option<ReviewResult>,
    pub sidebar: SidebarState,
    pub has_animated_welcome: bool,
    pub has_returned_to_welcome: bool,
    pub has_played_greeting: bool,
    pub scan_animation_completed: bool,
    pub pending_scan: Option<PendingScan>,
}

impl Default for DialogState {
    /// A fresh session: open, on the welcome screen.
    fn default() -> Self {
        Self {
            id: DialogStateId::Welcome,
            is_open: true,
            selected_sample_id: None,
            last_scan_source: None,
            resume_file: None,
            upload_error: None,
            is_uploading: false,
            review_result: None,
            sidebar: SidebarState::default(),
            has_animated_welcome: false,
            has_returned_to_welcome: false,
            has_played_greeting: false,
            scan_animation_completed: false,
            pending_scan: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DialogEvent {
    OpenDialog,
    CloseDialog,
    SetState(DialogStateId),
    SetResumeFile(Option<ResumeFile>),
    SetUploadError(Option<String>),
    SetUploading(bool),
    SetReviewResult(Option<ReviewResult>),
    SelectSample(Option<String>),
    SetLastScanSource(Option<ScanSource>),
    /// `Some` also moves the dialog to `scanning`.
    SetPendingScan(Option<PendingScan>),
    OpenSidebar {
        mode: SidebarMode,
        sample_id: Option<String>,
    },
    CloseSidebar,
    WelcomeAnimated,
    SetReturnedToWelcome(bool),
    SetPlayedGreeting(bool),
    SetScanAnimationCompleted(bool),
}

pub fn reduce(mut state: DialogState, event: DialogEvent) -> DialogState {
    match event {
        DialogEvent::OpenDialog => state.is_open = true,
        DialogEvent::CloseDialog => state.is_open = false,
        DialogEvent::SetState(id) => state.id = id,
        DialogEvent::SetResumeFile(file) => state.resume_file = file,
        DialogEvent::SetUploadError(error) => state.upload_error = error,
        DialogEvent::SetUploading(uploading) => state.is_uploading = uploading,
        DialogEvent::SetReviewResult(result) => state.review_result = result,
        DialogEvent::SelectSample(sample_id) => state.selected_sample_id = sample_id,
        DialogEvent::SetLastScanSource(source) => state.last_scan_source = source,
        DialogEvent::SetPendingScan(scan) => {
            if scan.is_some() {
                state.id = DialogStateId::Scanning;
            }
            state.pending_scan = scan;
        }
        DialogEvent::OpenSidebar { mode, sample_id } => {
            state.sidebar = SidebarState {
                open: true,
                mode: Some(mode),
                sample_id,
            }
        }
        DialogEvent::CloseSidebar => state.sidebar = SidebarState::default(),
        DialogEvent::WelcomeAnimated => state.has_animated_welcome = true,
        DialogEvent::SetReturnedToWelcome(value) => state.has_returned_to_welcome = value,
        DialogEvent::SetPlayedGreeting(value) => state.has_played_greeting = value,
        DialogEvent::SetScanAnimationCompleted(value) => state.scan_animation_completed = value,
    }
    state
}

/// Folds a batch of events over `state` in order.
pub fn reduce_all(
    state: DialogState,
    events: impl IntoIterator<Item = DialogEvent>,
) -> DialogState {
    events.into_iter().fold(state, reduce)
}
