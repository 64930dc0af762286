//! Dialog commands: each one plans a batch of events from the current snapshot.
//!
//! Planning reads only the snapshot taken before the batch, and the batch is
//! then folded through `reduce` in order.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dialog::config::{
    cta_label, dialog_state_config, source_options, DialogAction, DialogOption, DialogStateId,
    SourceKind, SourceOption, DIALOG_SPEAKER, WELCOME_RETURN_PROMPT,
};
use crate::dialog::state::{
    DialogEvent, DialogState, PendingScan, ScanSource, SidebarMode,
};
use crate::parsing::{validate_resume_file, ResumeFile};
use crate::review::samples::{find_sample, CHAOS_SAMPLE_ERROR, CHAOS_SAMPLE_ID};

pub const MISSING_FILE_ERROR: &str = "Select a resume to continue.";

#[derive(Debug, Error)]
pub enum DialogError {
    #[error("Option '{option_id}' is not available in the {state} state")]
    UnknownOption {
        state: DialogStateId,
        option_id: String,
    },

    #[error("Unknown sample '{0}'")]
    UnknownSample(String),
}

/// Commands accepted by a dialog session. File selection goes through the
/// upload endpoint instead, since it carries bytes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum DialogCommand {
    /// Open the dialog; from the welcome screen this also moves to the menu.
    Activate,
    CloseDialog,
    OpenMenu,
    SetState { state: DialogStateId },
    SelectOption { option_id: String },
    SelectSourceOption { option_id: String },
    SelectSample { sample_id: String },
    StartSampleScan { sample_id: String },
    StartScan,
    ClearFile,
    CloseSidebar,
    WelcomeAnimated,
    /// Zero-based index into the options currently on screen.
    NumberPress { index: usize },
}

pub fn plan_command(
    state: &DialogState,
    command: DialogCommand,
) -> Result<Vec<DialogEvent>, DialogError> {
    let events = match command {
        DialogCommand::Activate => {
            let mut events = vec![DialogEvent::OpenDialog];
            if state.id == DialogStateId::Welcome {
                events.extend(set_state(DialogStateId::Menu));
            }
            events
        }
        DialogCommand::CloseDialog => vec![DialogEvent::CloseDialog],
        DialogCommand::OpenMenu => set_state(DialogStateId::Menu),
        DialogCommand::SetState { state: next } => set_state(next),
        DialogCommand::SelectOption { option_id } => {
            let option = available_options(state)
                .into_iter()
                .find(|option| option.id == option_id)
                .ok_or(DialogError::UnknownOption {
                    state: state.id,
                    option_id,
                })?;
            select_option(state, &option)
        }
        DialogCommand::SelectSourceOption { option_id } => select_source_option(&option_id)?,
        DialogCommand::SelectSample { sample_id } => {
            known_sample(&sample_id)?;
            select_sample(&sample_id)
        }
        DialogCommand::StartSampleScan { sample_id } => {
            known_sample(&sample_id)?;
            start_sample_scan(&sample_id)
        }
        DialogCommand::StartScan => start_scan(state, None),
        DialogCommand::ClearFile => clear_file(),
        DialogCommand::CloseSidebar => vec![DialogEvent::CloseSidebar],
        DialogCommand::WelcomeAnimated if state.id == DialogStateId::Welcome => {
            vec![DialogEvent::WelcomeAnimated]
        }
        DialogCommand::WelcomeAnimated => Vec::new(),
        DialogCommand::NumberPress { index } => number_press(state, index)?,
    };
    Ok(events)
}

fn known_sample(sample_id: &str) -> Result<(), DialogError> {
    find_sample(sample_id)
        .map(|_| ())
        .ok_or_else(|| DialogError::UnknownSample(sample_id.to_string()))
}

fn clear_scan_state() -> Vec<DialogEvent> {
    vec![
        DialogEvent::SetResumeFile(None),
        DialogEvent::SetUploadError(None),
        DialogEvent::SetUploading(false),
        DialogEvent::SetReviewResult(None),
        DialogEvent::SetPendingScan(None),
        DialogEvent::SetScanAnimationCompleted(false),
        DialogEvent::SetLastScanSource(None),
    ]
}

/// Moves to `next`. Entering the menu always resets every piece of scan state.
pub fn set_state(next: DialogStateId) -> Vec<DialogEvent> {
    let mut events = Vec::new();
    if next == DialogStateId::Menu {
        events.extend(clear_scan_state());
        events.push(DialogEvent::SelectSample(None));
        events.push(DialogEvent::CloseSidebar);
    }
    events.push(DialogEvent::SetState(next));
    events
}

pub fn select_option(state: &DialogState, option: &DialogOption) -> Vec<DialogEvent> {
    match (option.action, option.next_state) {
        (Some(DialogAction::Close), _) => set_state(DialogStateId::Menu),
        (Some(DialogAction::StartScan), _) => start_scan(state, None),
        (None, Some(next)) => {
            let mut events = Vec::new();
            if state.id == DialogStateId::Results && option.id == "scan-again" {
                events.extend(clear_scan_state());
                events.push(DialogEvent::SelectSample(None));
                events.push(DialogEvent::CloseSidebar);
            }
            if state.id == DialogStateId::Menu && option.id == "close" {
                events.push(DialogEvent::SetReturnedToWelcome(true));
            }
            events.extend(set_state(next));
            events
        }
        (None, None) => Vec::new(),
    }
}

pub fn select_source_option(option_id: &str) -> Result<Vec<DialogEvent>, DialogError> {
    let option = source_options()
        .into_iter()
        .find(|option| option.id == option_id)
        .ok_or_else(|| DialogError::UnknownSample(option_id.to_string()))?;

    Ok(match option.kind {
        SourceKind::Upload => vec![
            DialogEvent::SelectSample(None),
            DialogEvent::SetUploadError(None),
            DialogEvent::CloseSidebar,
            DialogEvent::SetState(DialogStateId::UploadReady),
        ],
        SourceKind::Sample => select_sample(option.id),
    })
}

/// Previews a sample in the sidebar without scanning it.
pub fn select_sample(sample_id: &str) -> Vec<DialogEvent> {
    vec![
        DialogEvent::SelectSample(Some(sample_id.to_string())),
        DialogEvent::SetResumeFile(None),
        DialogEvent::SetUploadError(None),
        DialogEvent::OpenSidebar {
            mode: SidebarMode::Sample,
            sample_id: Some(sample_id.to_string()),
        },
    ]
}

pub fn start_sample_scan(sample_id: &str) -> Vec<DialogEvent> {
    let mut events = vec![
        DialogEvent::SetLastScanSource(Some(ScanSource::Sample)),
        DialogEvent::SelectSample(Some(sample_id.to_string())),
        DialogEvent::SetResumeFile(None),
    ];

    if sample_id == CHAOS_SAMPLE_ID {
        events.extend([
            DialogEvent::SetUploadError(Some(CHAOS_SAMPLE_ERROR.to_string())),
            DialogEvent::CloseSidebar,
            DialogEvent::SetPendingScan(None),
            DialogEvent::SetState(DialogStateId::Error),
        ]);
        return events;
    }

    events.extend([
        DialogEvent::SetUploadError(None),
        DialogEvent::SetScanAnimationCompleted(false),
        DialogEvent::CloseSidebar,
        DialogEvent::SetState(DialogStateId::Scanning),
        DialogEvent::SetPendingScan(Some(PendingScan {
            source: ScanSource::Sample,
            sample_id: Some(sample_id.to_string()),
            file: None,
        })),
    ]);
    events
}

/// Starts an upload scan with `file`, or with the held file when `None`.
pub fn start_scan(state: &DialogState, file: Option<ResumeFile>) -> Vec<DialogEvent> {
    let Some(selected) = file.clone().or_else(|| state.resume_file.clone()) else {
        return vec![
            DialogEvent::SetLastScanSource(Some(ScanSource::Upload)),
            DialogEvent::SetUploadError(Some(MISSING_FILE_ERROR.to_string())),
            DialogEvent::SetState(DialogStateId::Error),
        ];
    };

    let mut events = Vec::new();
    if let Some(file) = file {
        events.push(DialogEvent::SetResumeFile(Some(file)));
    }
    events.extend([
        DialogEvent::SetLastScanSource(Some(ScanSource::Upload)),
        DialogEvent::SetUploadError(None),
        DialogEvent::SetScanAnimationCompleted(false),
        DialogEvent::CloseSidebar,
        DialogEvent::SetState(DialogStateId::Scanning),
        DialogEvent::SetPendingScan(Some(PendingScan {
            source: ScanSource::Upload,
            sample_id: None,
            file: Some(selected),
        })),
    ]);
    events
}

/// Validates and holds `file`; a rejected file is dropped and the reason recorded.
pub fn select_file(file: ResumeFile) -> Vec<DialogEvent> {
    match validate_resume_file(&file.name, &file.media_type, file.size) {
        Some(error) => vec![
            DialogEvent::SetUploadError(Some(error)),
            DialogEvent::SetResumeFile(None),
        ],
        None => vec![
            DialogEvent::SetResumeFile(Some(file)),
            DialogEvent::SetUploadError(None),
        ],
    }
}

pub fn clear_file() -> Vec<DialogEvent> {
    vec![DialogEvent::SetResumeFile(None), DialogEvent::SetUploadError(None)]
}

/// "Try scan again" only while a file is held; "Go back" always.
pub fn error_options(state: &DialogState) -> Vec<DialogOption> {
    let mut options = Vec::new();
    if state.resume_file.is_some() {
        options.push(DialogOption::action(
            "retry-scan",
            "Try scan again",
            DialogAction::StartScan,
        ));
    }

    let back = match state.last_scan_source {
        Some(ScanSource::Sample) => DialogStateId::SampleList,
        _ => DialogStateId::UploadReady,
    };
    options.push(DialogOption::goto("go-back", "Go back", back));
    options
}

/// Options selectable by id in the current state.
pub fn available_options(state: &DialogState) -> Vec<DialogOption> {
    match state.id {
        DialogStateId::Error => error_options(state),
        id => dialog_state_config(id).options.to_vec(),
    }
}

pub fn number_press(state: &DialogState, index: usize) -> Result<Vec<DialogEvent>, DialogError> {
    match state.id {
        DialogStateId::Welcome | DialogStateId::Scanning => Ok(Vec::new()),
        DialogStateId::SampleList => match source_options().get(index) {
            Some(option) => select_source_option(option.id),
            None => Ok(Vec::new()),
        },
        _ => Ok(available_options(state)
            .get(index)
            .map(|option| select_option(state, option))
            .unwrap_or_default()),
    }
}

fn is_chaos_error(state: &DialogState) -> bool {
    state.id == DialogStateId::Error && state.selected_sample_id.as_deref() == Some(CHAOS_SAMPLE_ID)
}

pub fn resolved_prompt(state: &DialogState) -> String {
    match (&state.upload_error, state.id) {
        (Some(error), DialogStateId::Error) if is_chaos_error(state) => format!("...{error}"),
        (Some(error), DialogStateId::Error) => error.clone(),
        (_, DialogStateId::Welcome) if state.has_returned_to_welcome => {
            WELCOME_RETURN_PROMPT.to_string()
        }
        _ => dialog_state_config(state.id).prompt.to_string(),
    }
}

pub fn animate_prompt(state: &DialogState) -> bool {
    let first_welcome = state.id == DialogStateId::Welcome
        && !state.has_animated_welcome
        && !state.has_returned_to_welcome;
    first_welcome || is_chaos_error(state)
}

/// What a renderer needs to draw the dialog.
#[derive(Debug, Clone, Serialize)]
pub struct DialogView {
    #[serde(flatten)]
    pub state: DialogState,
    pub speaker: &'static str,
    pub prompt: String,
    pub animate_prompt: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta_label: Option<&'static str>,
    pub options: Vec<DialogOption>,
    pub source_options: Vec<SourceOption>,
}

impl DialogView {
    pub fn of(state: &DialogState) -> Self {
        Self {
            speaker: DIALOG_SPEAKER,
            prompt: resolved_prompt(state),
            animate_prompt: animate_prompt(state),
            cta_label: cta_label(state.id),
            options: available_options(state),
            source_options: if state.id == DialogStateId::SampleList {
                source_options()
            } else {
                Vec::new()
            },
            state: state.clone(),
        }
    }
}
