use std::time::Duration;

use rand::Rng;

use crate::scene::models::{IdleClip, SceneVideoId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdleSchedule {
    pub min_delay: Duration,
    pub max_delay: Duration,
    pub avoid_repeat: bool,
}

impl Default for IdleSchedule {
    fn default() -> Self {
        Self {
            min_delay: Duration::from_millis(8_000),
            max_delay: Duration::from_millis(16_000),
            avoid_repeat: true,
        }
    }
}

impl IdleSchedule {
    /// Uniform in `[min_delay, max_delay)`; a max below min collapses to min.
    pub fn random_delay(&self, rng: &mut impl Rng) -> Duration {
        let max = self.max_delay.max(self.min_delay);
        if max == self.min_delay {
            return self.min_delay;
        }
        rng.gen_range(self.min_delay..max)
    }
}

/// Cumulative-weight pick from `clips`.
///
/// With `avoid_repeat`, `last` is excluded unless that would empty the pool.
/// Returns `None` for an empty pool or a non-positive total weight.
pub fn pick_idle_clip(
    clips: &[IdleClip],
    last: Option<SceneVideoId>,
    avoid_repeat: bool,
    rng: &mut impl Rng,
) -> Option<SceneVideoId> {
    if clips.is_empty() {
        return None;
    }

    let filtered: Vec<IdleClip> = match last {
        Some(last) if avoid_repeat => clips.iter().copied().filter(|c| c.id != last).collect(),
        _ => clips.to_vec(),
    };
    let pool = if filtered.is_empty() { clips } else { &filtered[..] };

    let total: f64 = pool.iter().map(|c| c.weight).sum();
    if total <= 0.0 {
        return None;
    }

    let target = rng.gen::<f64>() * total;
    let mut cumulative = 0.0;
    for clip in pool {
        cumulative += clip.weight;
        if target <= cumulative {
            return Some(clip.id);
        }
    }
    pool.last().map(|c| c.id)
}
