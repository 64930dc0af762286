//! Scene controller: owns the scene snapshot and its single idle task.
//!
//! After every event the idle task is cancelled and, when nothing is playing,
//! rescheduled with a fresh clip and delay. The idle task holds only a weak
//! reference and a generation number, so a superseded or orphaned task is a no-op.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::scene::idle::{pick_idle_clip, IdleSchedule};
use crate::scene::models::{reduce, SceneEvent, SceneState, SceneVideoId};

const SUBSCRIBER_CAPACITY: usize = 64;

#[derive(Clone)]
pub struct SceneController {
    inner: Arc<SceneInner>,
}

struct SceneInner {
    core: Mutex<SceneCore>,
    tx: broadcast::Sender<SceneState>,
    schedule: IdleSchedule,
}

struct SceneCore {
    state: SceneState,
    idle_task: Option<JoinHandle<()>>,
    idle_generation: u64,
}

impl SceneController {
    pub fn new(schedule: IdleSchedule) -> Self {
        let (tx, _rx) = broadcast::channel(SUBSCRIBER_CAPACITY);
        Self {
            inner: Arc::new(SceneInner {
                core: Mutex::new(SceneCore {
                    state: SceneState::default(),
                    idle_task: None,
                    idle_generation: 0,
                }),
                tx,
                schedule,
            }),
        }
    }

    pub fn state(&self) -> SceneState {
        self.lock().state.clone()
    }

    /// Receives every state produced after subscribing.
    #[cfg(test)]
    pub fn subscribe(&self) -> broadcast::Receiver<SceneState> {
        self.inner.tx.subscribe()
    }

    /// Applies `event`, notifies subscribers and reschedules the idle clip.
    /// Must be called from within a tokio runtime.
    pub fn send(&self, event: SceneEvent) -> SceneState {
        let mut core = self.lock();
        self.apply(&mut core, event);
        core.state.clone()
    }

    /// Cancels the pending idle clip. Later events schedule a new one.
    pub fn cancel_idle(&self) {
        let mut core = self.lock();
        core.idle_generation += 1;
        if let Some(task) = core.idle_task.take() {
            task.abort();
        }
    }

    fn lock(&self) -> MutexGuard<'_, SceneCore> {
        self.inner.core.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn apply(&self, core: &mut SceneCore, event: SceneEvent) {
        debug!("Scene event {event:?}");
        core.state = reduce(core.state.clone(), event);
        let _ = self.inner.tx.send(core.state.clone());
        self.reschedule_idle(core);
    }

    fn reschedule_idle(&self, core: &mut SceneCore) {
        core.idle_generation += 1;
        if let Some(task) = core.idle_task.take() {
            task.abort();
        }
        if core.state.active_video.is_some() {
            return;
        }

        let schedule = self.inner.schedule;
        let (clip, delay) = {
            let mut rng = rand::thread_rng();
            let Some(clip) = pick_idle_clip(
                core.state.idle_clips(),
                core.state.last_video,
                schedule.avoid_repeat,
                &mut rng,
            ) else {
                return;
            };
            (clip, schedule.random_delay(&mut rng))
        };

        let generation = core.idle_generation;
        let weak = Arc::downgrade(&self.inner);
        debug!("Idle clip {clip:?} scheduled in {delay:?}");
        core.idle_task = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            fire_idle(weak, generation, clip);
        }));
    }
}

fn fire_idle(weak: Weak<SceneInner>, generation: u64, clip: SceneVideoId) {
    let Some(inner) = weak.upgrade() else {
        return;
    };
    let controller = SceneController { inner };
    let mut core = controller.lock();
    if core.idle_generation != generation {
        return;
    }
    // This task is finishing; detach its handle instead of aborting it.
    core.idle_task = None;
    controller.apply(
        &mut core,
        SceneEvent::PlayVideo {
            id: clip,
            next_phase: None,
        },
    );
}

impl Drop for SceneInner {
    fn drop(&mut self) {
        let core = self.core.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(task) = core.idle_task.take() {
            task.abort();
        }
    }
}
