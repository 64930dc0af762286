//! Maps dialog transitions onto scene cues.

use crate::dialog::config::DialogStateId;
use crate::dialog::state::{DialogEvent, DialogState};
use crate::scene::models::{SceneEvent, ScenePhase, SceneVideoId};

fn play(id: SceneVideoId, next_phase: ScenePhase) -> SceneEvent {
    SceneEvent::PlayVideo {
        id,
        next_phase: Some(next_phase),
    }
}

fn go_idle() -> Vec<SceneEvent> {
    vec![
        SceneEvent::SetPhase(ScenePhase::Idle),
        play(SceneVideoId::RobotIdle, ScenePhase::Idle),
    ]
}

/// Scene events implied by moving from `previous` to `current`, plus any
/// dialog bookkeeping the cue requires.
pub fn scene_cues(
    previous: &DialogState,
    current: &DialogState,
) -> (Vec<SceneEvent>, Vec<DialogEvent>) {
    if current.is_open && current.id == DialogStateId::Welcome && !current.has_played_greeting {
        return (
            vec![
                SceneEvent::SetPhase(ScenePhase::Greeting),
                play(SceneVideoId::Greet, ScenePhase::Greeting),
            ],
            vec![DialogEvent::SetPlayedGreeting(true)],
        );
    }

    if previous.is_open && !current.is_open {
        return (go_idle(), Vec::new());
    }
    if !current.is_open {
        return (Vec::new(), Vec::new());
    }

    if previous.id != current.id {
        match current.id {
            DialogStateId::Scanning => {
                return (
                    vec![
                        SceneEvent::SetPhase(ScenePhase::Scanning),
                        play(SceneVideoId::ResumeScan, ScenePhase::Scanning),
                    ],
                    Vec::new(),
                )
            }
            DialogStateId::Results => {
                return (vec![SceneEvent::SetPhase(ScenePhase::Reviewing)], Vec::new())
            }
            DialogStateId::Error => {
                return (
                    vec![
                        SceneEvent::SetPhase(ScenePhase::Idle),
                        play(SceneVideoId::Error, ScenePhase::Idle),
                    ],
                    Vec::new(),
                )
            }
            _ if previous.id == DialogStateId::Results => return (go_idle(), Vec::new()),
            _ => {}
        }
    }

    (Vec::new(), Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialog::state::reduce;

    fn open_at(id: DialogStateId) -> DialogState {
        DialogState {
            id,
            has_played_greeting: true,
            ..DialogState::default()
        }
    }

    #[test]
    fn test_first_welcome_plays_greeting_once() {
        let fresh = DialogState::default();
        let (scene, dialog) = scene_cues(&fresh, &fresh);
        assert_eq!(scene[0], SceneEvent::SetPhase(ScenePhase::Greeting));
        assert_eq!(
            scene[1],
            SceneEvent::PlayVideo {
                id: SceneVideoId::Greet,
                next_phase: Some(ScenePhase::Greeting)
            }
        );
        assert_eq!(dialog, vec![DialogEvent::SetPlayedGreeting(true)]);

        let greeted = reduce(fresh.clone(), DialogEvent::SetPlayedGreeting(true));
        assert_eq!(scene_cues(&fresh, &greeted), (Vec::new(), Vec::new()));
    }

    #[test]
    fn test_scanning_plays_scan_clip() {
        let (scene, _) = scene_cues(
            &open_at(DialogStateId::UploadReady),
            &open_at(DialogStateId::Scanning),
        );
        assert_eq!(
            scene,
            vec![
                SceneEvent::SetPhase(ScenePhase::Scanning),
                SceneEvent::PlayVideo {
                    id: SceneVideoId::ResumeScan,
                    next_phase: Some(ScenePhase::Scanning)
                },
            ]
        );
    }

    #[test]
    fn test_results_switches_to_reviewing() {
        let (scene, _) = scene_cues(
            &open_at(DialogStateId::Scanning),
            &open_at(DialogStateId::Results),
        );
        assert_eq!(scene, vec![SceneEvent::SetPhase(ScenePhase::Reviewing)]);
    }

    #[test]
    fn test_error_plays_error_clip() {
        let (scene, _) = scene_cues(
            &open_at(DialogStateId::Scanning),
            &open_at(DialogStateId::Error),
        );
        assert_eq!(
            scene[1],
            SceneEvent::PlayVideo {
                id: SceneVideoId::Error,
                next_phase: Some(ScenePhase::Idle)
            }
        );
    }

    #[test]
    fn test_leaving_results_and_closing_go_idle() {
        let (scene, _) = scene_cues(
            &open_at(DialogStateId::Results),
            &open_at(DialogStateId::Menu),
        );
        assert_eq!(scene, go_idle());

        let closed = reduce(open_at(DialogStateId::Menu), DialogEvent::CloseDialog);
        let (scene, _) = scene_cues(&open_at(DialogStateId::Menu), &closed);
        assert_eq!(scene, go_idle());
    }

    #[test]
    fn test_unrelated_transition_is_quiet() {
        let (scene, dialog) = scene_cues(
            &open_at(DialogStateId::Welcome),
            &open_at(DialogStateId::Menu),
        );
        assert!(scene.is_empty() && dialog.is_empty());
    }
}
