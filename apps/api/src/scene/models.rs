use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenePhase {
    Boot,
    Greeting,
    Idle,
    Scanning,
    Reviewing,
    Complete,
    Error,
}

impl ScenePhase {
    pub const ALL: [ScenePhase; 7] = [
        ScenePhase::Boot,
        ScenePhase::Greeting,
        ScenePhase::Idle,
        ScenePhase::Scanning,
        ScenePhase::Reviewing,
        ScenePhase::Complete,
        ScenePhase::Error,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SceneVideoId {
    Greet,
    ResumeScan,
    RobotIdle,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IdleClip {
    pub id: SceneVideoId,
    pub weight: f64,
}

pub type IdleWeights = BTreeMap<ScenePhase, Vec<IdleClip>>;

/// boot, greeting and error have no idle clips; every other phase idles on `robot-idle`.
pub fn default_idle_weights() -> IdleWeights {
    ScenePhase::ALL
        .into_iter()
        .map(|phase| {
            let clips = match phase {
                ScenePhase::Boot | ScenePhase::Greeting | ScenePhase::Error => Vec::new(),
                _ => vec![IdleClip {
                    id: SceneVideoId::RobotIdle,
                    weight: 1.0,
                }],
            };
            (phase, clips)
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneState {
    pub phase: ScenePhase,
    pub active_video: Option<SceneVideoId>,
    pub is_video_visible: bool,
    pub last_video: Option<SceneVideoId>,
    pub idle_weights: IdleWeights,
}

impl Default for SceneState {
    fn default() -> Self {
        Self {
            phase: ScenePhase::Boot,
            active_video: None,
            is_video_visible: false,
            last_video: None,
            idle_weights: default_idle_weights(),
        }
    }
}

impl SceneState {
    pub fn idle_clips(&self) -> &[IdleClip] {
        self.idle_weights
            .get(&self.phase)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SceneEvent {
    Init,
    PlayVideo {
        id: SceneVideoId,
        next_phase: Option<ScenePhase>,
    },
    VideoEnded,
    SetPhase(ScenePhase),
    UpdateIdleWeights {
        phase: ScenePhase,
        clips: Vec<IdleClip>,
    },
}

fn phase_after_video(phase: ScenePhase) -> ScenePhase {
    match phase {
        ScenePhase::Greeting => ScenePhase::Idle,
        ScenePhase::Scanning => ScenePhase::Reviewing,
        other => other,
    }
}

pub fn reduce(mut state: SceneState, event: SceneEvent) -> SceneState {
    match event {
        SceneEvent::Init => {
            state.phase = ScenePhase::Greeting;
            state.active_video = Some(SceneVideoId::Greet);
            state.is_video_visible = true;
            state.last_video = Some(SceneVideoId::Greet);
        }
        SceneEvent::PlayVideo { id, next_phase } => {
            state.phase = next_phase.unwrap_or(state.phase);
            state.active_video = Some(id);
            state.is_video_visible = true;
            state.last_video = Some(id);
        }
        SceneEvent::VideoEnded => {
            state.phase = phase_after_video(state.phase);
            state.last_video = state.active_video.take().or(state.last_video);
            state.is_video_visible = false;
        }
        SceneEvent::SetPhase(phase) => state.phase = phase,
        SceneEvent::UpdateIdleWeights { phase, clips } => {
            state.idle_weights.insert(phase, clips);
        }
    }
    state
}
