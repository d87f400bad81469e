use serde::Serialize;
use tracing::debug;

use crate::layout::bars::{Bar, Rect};
use crate::math::interp::{ease_cubic_in_out, lerp};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TransitionTiming {
    /// Length of each of the two phases.
    pub phase_ms: f64,
    /// Extra start delay per year index.
    pub stagger_ms: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BarTween {
    pub from: Rect,
    pub to: Rect,
    pub delay_ms: f64,
}

/// Layout change for every bar: x/width first, then y/height.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransitionPlan {
    pub generation: u64,
    pub timing: TransitionTiming,
    pub tweens: Vec<BarTween>,
}

impl TransitionPlan {
    /// Pair `from` and `to` bar by bar. Bars without a starting rect appear at their target.
    pub fn new(generation: u64, from: &[Bar], to: &[Bar], timing: TransitionTiming) -> Self {
        let tweens = to
            .iter()
            .enumerate()
            .map(|(i, bar)| BarTween {
                from: from.get(i).map(|b| b.rect).unwrap_or(bar.rect),
                to: bar.rect,
                delay_ms: bar.year_index as f64 * timing.stagger_ms,
            })
            .collect();
        Self { generation, timing, tweens }
    }

    pub fn duration_ms(&self) -> f64 {
        let last_delay = self.tweens.iter().map(|t| t.delay_ms).fold(0.0, f64::max);
        last_delay + 2.0 * self.timing.phase_ms
    }

    pub fn is_finished(&self, t_ms: f64) -> bool {
        t_ms >= self.duration_ms()
    }

    /// Geometry `t_ms` after the transition started.
    pub fn sample(&self, t_ms: f64) -> Vec<Rect> {
        self.tweens.iter().map(|tw| self.sample_tween(tw, t_ms)).collect()
    }

    fn sample_tween(&self, tw: &BarTween, t_ms: f64) -> Rect {
        let phase = self.timing.phase_ms;
        let elapsed = t_ms - tw.delay_ms;
        if elapsed >= 2.0 * phase {
            return tw.to;
        }
        let horizontal = ease_cubic_in_out(progress(elapsed, phase));
        let vertical = ease_cubic_in_out(progress(elapsed - phase, phase));
        Rect {
            x: lerp(tw.from.x, tw.to.x, horizontal),
            width: lerp(tw.from.width, tw.to.width, horizontal),
            y: lerp(tw.from.y, tw.to.y, vertical),
            height: lerp(tw.from.height, tw.to.height, vertical),
        }
    }
}

fn progress(elapsed: f64, duration: f64) -> f64 {
    if duration <= 0.0 {
        return if elapsed >= 0.0 { 1.0 } else { 0.0 };
    }
    (elapsed / duration).clamp(0.0, 1.0)
}

/// Holds at most one live transition; starting another cancels it.
#[derive(Debug, Default)]
pub struct Animator {
    generation: u64,
    active: Option<TransitionPlan>,
}

impl Animator {
    pub fn begin(&mut self, from: &[Bar], to: &[Bar], timing: TransitionTiming) -> &TransitionPlan {
        if let Some(old) = self.active.take() {
            debug!(generation = old.generation, "cancelling in-flight transition");
        }
        self.generation += 1;
        self.active.insert(TransitionPlan::new(self.generation, from, to, timing))
    }

    pub fn cancel(&mut self) {
        self.active = None;
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn current(&self) -> Option<&TransitionPlan> {
        self.active.as_ref()
    }

    /// Sample the live transition. `None` if `generation` has been superseded or cancelled.
    pub fn sample(&self, generation: u64, t_ms: f64) -> Option<Vec<Rect>> {
        self.active
            .as_ref()
            .filter(|plan| plan.generation == generation)
            .map(|plan| plan.sample(t_ms))
    }
}
