//! Static dialog table: one prompt and option list per dialog state.

use serde::{Deserialize, Serialize};

use crate::review::samples::SAMPLE_RESUMES;

pub const DIALOG_SPEAKER: &str = "HR-418 (Teapot)";
pub const WELCOME_RETURN_PROMPT: &str = "Okay, activate the scanner when you're ready to begin.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DialogStateId {
    Welcome,
    Menu,
    What,
    Privacy,
    UploadConsent,
    UploadReady,
    SampleList,
    Scanning,
    Results,
    Error,
}

impl std::fmt::Display for DialogStateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Welcome => "welcome",
            Self::Menu => "menu",
            Self::What => "what",
            Self::Privacy => "privacy",
            Self::UploadConsent => "upload-consent",
            Self::UploadReady => "upload-ready",
            Self::SampleList => "sample-list",
            Self::Scanning => "scanning",
            Self::Results => "results",
            Self::Error => "error",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DialogAction {
    Close,
    StartScan,
}

/// A selectable option. When both are set, `action` wins over `next_state`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DialogOption {
    pub id: &'static str,
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_state: Option<DialogStateId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<DialogAction>,
}

impl DialogOption {
    pub const fn goto(id: &'static str, label: &'static str, next: DialogStateId) -> Self {
        Self {
            id,
            label,
            next_state: Some(next),
            action: None,
        }
    }

    pub const fn action(id: &'static str, label: &'static str, action: DialogAction) -> Self {
        Self {
            id,
            label,
            next_state: None,
            action: Some(action),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DialogStateConfig {
    pub id: DialogStateId,
    pub speaker: &'static str,
    pub prompt: &'static str,
    pub options: &'static [DialogOption],
}

const BACK_TO_MENU: DialogOption = DialogOption::goto("back", "Never mind", DialogStateId::Menu);
const BACK_ONLY: &[DialogOption] = &[BACK_TO_MENU];

const MENU_OPTIONS: &[DialogOption] = &[
    DialogOption::goto("choose-resume", "Scan a resume", DialogStateId::SampleList),
    DialogOption::goto("what", "What is your function?", DialogStateId::What),
    DialogOption::goto("privacy", "Privacy / data handling", DialogStateId::Privacy),
    DialogOption::goto("close", "Never mind", DialogStateId::Welcome),
];

const UPLOAD_CONSENT_OPTIONS: &[DialogOption] = &[
    DialogOption::goto("agree", "I agree", DialogStateId::UploadReady),
    DialogOption::goto("use-sample", "Use a sample instead", DialogStateId::SampleList),
    BACK_TO_MENU,
];

const UPLOAD_READY_OPTIONS: &[DialogOption] = &[
    DialogOption::action("start-scan", "Begin scan", DialogAction::StartScan),
    BACK_TO_MENU,
];

const RESULTS_OPTIONS: &[DialogOption] = &[
    DialogOption::goto("scan-again", "Scan another resume", DialogStateId::SampleList),
    DialogOption::action("close", "Close", DialogAction::Close),
];

pub fn dialog_state_config(id: DialogStateId) -> DialogStateConfig {
    let (prompt, options): (&'static str, &'static [DialogOption]) = match id {
        DialogStateId::Welcome => (
            "Welcome to the Galactic Career Center. I'm HR-418, designation Teapot. Please activate the scanner to begin your resume review when you're ready...",
            &[],
        ),
        DialogStateId::Menu => ("How can I assist you today?", MENU_OPTIONS),
        DialogStateId::What => (
            "Scan a resume and recieve structured feedback. Upload your own or try a sample applicant.\n\nNote: listing \"fast learner\" will be verified.",
            BACK_ONLY,
        ),
        DialogStateId::Privacy => (
            "Resumes are parsed locally in your browser. We do not store files or results, and nothing is sent to third-party services.",
            BACK_ONLY,
        ),
        DialogStateId::UploadConsent => (
            "Before we scan a real resume, I need your consent to parse the file in your browser. We do not store the file or generated data. Ready?",
            UPLOAD_CONSENT_OPTIONS,
        ),
        DialogStateId::UploadReady => (
            "Choose a .pdf or .docx resume to scan. Files are parsed in your browser and never stored.",
            UPLOAD_READY_OPTIONS,
        ),
        DialogStateId::SampleList => (
            "Choose what to scan. Upload your own resume or pick a sample applicant.",
            BACK_ONLY,
        ),
        DialogStateId::Scanning => ("Scanning resume...", &[]),
        DialogStateId::Results => ("Scan complete. Here are the highlights.", RESULTS_OPTIONS),
        // Error options depend on the dialog snapshot, see `actions::error_options`.
        DialogStateId::Error => ("Hmm... looks like the scanner ran into trouble. Try again?", &[]),
    };

    DialogStateConfig {
        id,
        speaker: DIALOG_SPEAKER,
        prompt,
        options,
    }
}

pub fn cta_label(id: DialogStateId) -> Option<&'static str> {
    match id {
        DialogStateId::UploadReady => Some("Upload ready"),
        DialogStateId::SampleList => Some("Choose a sample"),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Upload,
    Sample,
}

/// Entries of the sample-list screen: upload first, then every sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourceOption {
    pub id: &'static str,
    pub label: &'static str,
    pub kind: SourceKind,
}

pub const UPLOAD_SOURCE_ID: &str = "upload";

pub fn source_options() -> Vec<SourceOption> {
    std::iter::once(SourceOption {
        id: UPLOAD_SOURCE_ID,
        label: "Upload your resume",
        kind: SourceKind::Upload,
    })
    .chain(SAMPLE_RESUMES.iter().map(|sample| SourceOption {
        id: sample.id,
        label: sample.name,
        kind: SourceKind::Sample,
    }))
    .collect()
}
