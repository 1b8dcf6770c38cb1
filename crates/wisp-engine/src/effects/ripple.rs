//! Click ripple effect, driven frame by frame.

use crate::api::types::{StyleOp, TargetId, Transform};
use crate::core::ops::OpBuffer;
use crate::extensions::easing::{ease, Easing};

/// Scale a ripple grows to before it is removed.
const RIPPLE_MAX_SCALE: f32 = 2.0;

/// A single live ripple.
#[derive(Debug, Clone)]
pub struct Ripple {
    pub target: TargetId,
    pub elapsed_ms: f64,
    pub duration_ms: f64,
}

impl Ripple {
    pub fn new(target: TargetId, duration_ms: f64) -> Self {
        Self { target, elapsed_ms: 0.0, duration_ms }
    }

    /// Advance the ripple. Returns false once it has lived out its duration.
    pub fn tick(&mut self, dt_ms: f64) -> bool {
        self.elapsed_ms += dt_ms;
        self.elapsed_ms < self.duration_ms
    }

    /// Eased progress in [0, 1].
    pub fn progress(&self) -> f32 {
        let t = (self.elapsed_ms / self.duration_ms).clamp(0.0, 1.0) as f32;
        Easing::EaseOut.apply(t)
    }
}

/// All live ripples.
///
/// Each frame every ripple gets a fresh scale/opacity pose from its eased
/// progress; a ripple past its duration emits `Remove` and is dropped. The
/// returned ids let the engine despawn the finished targets.
#[derive(Debug, Default)]
pub struct RippleState {
    ripples: Vec<Ripple>,
}

impl RippleState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, target: TargetId, duration_ms: f64) {
        self.ripples.push(Ripple::new(target, duration_ms));
    }

    /// Advance all ripples one frame.
    pub fn tick(&mut self, dt_ms: f64, ops: &mut OpBuffer) -> Vec<TargetId> {
        let mut finished = Vec::new();
        for ripple in &mut self.ripples {
            let alive = ripple.tick(dt_ms);
            let progress = ripple.progress();
            ops.push(StyleOp::Transform {
                target: ripple.target,
                value: Transform::Scale(ease(0.0, RIPPLE_MAX_SCALE, progress, Easing::Linear)),
            });
            ops.push(StyleOp::Opacity {
                target: ripple.target,
                value: ease(1.0, 0.0, progress, Easing::Linear),
            });
            if !alive {
                ops.push(StyleOp::Remove { target: ripple.target });
                finished.push(ripple.target);
            }
        }
        self.ripples.retain(|r| !finished.contains(&r.target));
        finished
    }

    /// Drop a ripple without emitting anything (its target went away).
    pub fn cancel(&mut self, target: TargetId) {
        self.ripples.retain(|r| r.target != target);
    }

    pub fn len(&self) -> usize {
        self.ripples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ripples.is_empty()
    }
}
