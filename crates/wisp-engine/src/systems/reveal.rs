//! Reveal system. Turns accepted crossings into hidden/revealed style ops,
//! schedules staggered work, and answers due timers.

use crate::api::engine::EngineConfig;
use crate::api::types::{
    StyleOp, TargetId, Transform, TransitionProperty, TransitionSpec, Width,
};
use crate::components::target::{RevealKind, Target};
use crate::core::ops::OpBuffer;
use crate::core::registry::Registry;
use crate::core::timer::{DueTimer, TimerAction, TimerQueue};
use crate::extensions::easing::Easing;
use crate::watch::group::WatchGroup;

/// Slide-in offset for a hidden pipeline step.
const STEP_HIDDEN_SHIFT_PX: f32 = -30.0;
/// Scale of a hidden core box.
const CORE_HIDDEN_SCALE: f32 = 0.8;
/// Transition lengths per kind.
const STEP_TRANSITION_MS: f64 = 600.0;
const SECTION_FADE_MS: f64 = 800.0;
const CORE_REVEAL_MS: f64 = 400.0;
const PROGRESS_TRANSITION_MS: f64 = 200.0;
const BODY_FADE_MS: f64 = 500.0;
const ICON_TRANSITION_MS: f64 = 300.0;
/// Hover pose for a card icon.
const ICON_HOVER_SCALE: f32 = 1.2;
const ICON_HOVER_TILT_DEG: f32 = 5.0;

/// Ops that put a freshly registered target into its hidden state.
///
/// Emitted synchronously at registration so nothing flashes visible before
/// the first observer callback.
pub fn initial_ops(target: &Target, ops: &mut OpBuffer) {
    let id = target.id;
    match target.kind {
        // The stylesheet owns the hidden state of class-driven targets.
        RevealKind::FadeIn => {}
        RevealKind::PipelineStep => {
            ops.push(StyleOp::Opacity { target: id, value: 0.0 });
            ops.push(StyleOp::Transform {
                target: id,
                value: Transform::TranslateX(STEP_HIDDEN_SHIFT_PX),
            });
            ops.push(StyleOp::Transition {
                target: id,
                spec: Some(TransitionSpec::new(
                    TransitionProperty::All,
                    STEP_TRANSITION_MS,
                    Easing::Ease,
                )),
            });
        }
        RevealKind::Section => {
            ops.push(StyleOp::Transition {
                target: id,
                spec: Some(TransitionSpec::new(
                    TransitionProperty::Opacity,
                    SECTION_FADE_MS,
                    Easing::Ease,
                )),
            });
            // A section marked fired at registration (the hero) stays visible.
            let value = if target.fired { 1.0 } else { 0.0 };
            ops.push(StyleOp::Opacity { target: id, value });
        }
        RevealKind::CoreBox => {
            ops.push(StyleOp::Opacity { target: id, value: 0.0 });
            ops.push(StyleOp::Transform {
                target: id,
                value: Transform::Scale(CORE_HIDDEN_SCALE),
            });
        }
        RevealKind::ProgressBar => {
            ops.push(StyleOp::Width { target: id, value: Width::Percent(0.0) });
            ops.push(StyleOp::Transition {
                target: id,
                spec: Some(TransitionSpec::new(
                    TransitionProperty::Width,
                    PROGRESS_TRANSITION_MS,
                    Easing::Ease,
                )),
            });
        }
        // Stat cards and speed bars keep their markup state until they fire;
        // the rest have no hidden pose at all.
        RevealKind::StatCard
        | RevealKind::SpeedBar
        | RevealKind::ParallaxBlob
        | RevealKind::CardIcon
        | RevealKind::Emblem
        | RevealKind::Body
        | RevealKind::Ripple => {}
    }
}

/// Handle one crossing report for `target_id`.
///
/// `batch_index` counts prior staggered siblings in the same drained frame,
/// so a batch of steps reveals as 0, 1*step, 2*step... regardless of where
/// in the document the batch sits. Returns true when the crossing was
/// accepted (targets fire at most once; exits are ignored).
#[allow(clippy::too_many_arguments)]
pub fn on_crossing(
    target_id: TargetId,
    entered: bool,
    registry: &mut Registry,
    group: &WatchGroup,
    config: &EngineConfig,
    now_ms: f64,
    batch_index: &mut u32,
    timers: &mut TimerQueue,
    ops: &mut OpBuffer,
) -> bool {
    if !entered {
        return false;
    }
    let Some(target) = registry.get_mut(target_id) else {
        return false;
    };
    if target.fired {
        return false;
    }
    target.fired = true;
    let kind = target.kind;

    match kind {
        RevealKind::FadeIn => {
            ops.push(StyleOp::Class {
                target: target_id,
                name: group.reveal_class.clone(),
                on: true,
            });
        }
        RevealKind::Section => {
            ops.push(StyleOp::Opacity { target: target_id, value: 1.0 });
        }
        RevealKind::PipelineStep => {
            let step = group.stagger_step_ms.unwrap_or(config.stagger_step_ms);
            let delay = f64::from(*batch_index) * step;
            *batch_index += 1;
            timers.schedule(now_ms + delay, target_id, TimerAction::Reveal);
        }
        RevealKind::StatCard => {
            if let Some(counter) = target.counter.as_mut() {
                counter.start(config.counter_duration_ms, config.counter_tick_ms);
            } else {
                log::debug!("stat target {} has no parsed number, leaving text alone", target_id.0);
            }
        }
        RevealKind::SpeedBar => {
            if target.bar_width.is_some() {
                ops.push(StyleOp::Width { target: target_id, value: Width::Percent(0.0) });
                timers.schedule(
                    now_ms + config.bar_restore_delay_ms,
                    target_id,
                    TimerAction::RestoreBarWidth,
                );
            } else {
                log::debug!("speed bar {} has no captured width, skipping regrow", target_id.0);
            }
        }
        other => {
            log::debug!("ignoring crossing for unobserved kind {:?}", other);
            return false;
        }
    }

    // Fired targets leave their observer; the engine guard is authoritative
    // either way.
    ops.push(StyleOp::Release { target: target_id });
    true
}

/// Ops that put a target into its revealed state, applied when its stagger
/// timer fires.
pub fn revealed_ops(target: &Target, ops: &mut OpBuffer) {
    match target.kind {
        RevealKind::PipelineStep => {
            ops.push(StyleOp::Opacity { target: target.id, value: 1.0 });
            ops.push(StyleOp::Transform { target: target.id, value: Transform::None });
        }
        RevealKind::CoreBox => {
            ops.push(StyleOp::Transition {
                target: target.id,
                spec: Some(TransitionSpec::new(
                    TransitionProperty::All,
                    CORE_REVEAL_MS,
                    Easing::Ease,
                )),
            });
            ops.push(StyleOp::Opacity { target: target.id, value: 1.0 });
            ops.push(StyleOp::Transform { target: target.id, value: Transform::Scale(1.0) });
        }
        other => {
            log::debug!("no timed reveal profile for kind {:?}", other);
        }
    }
}

/// Schedule the spawn wave for freshly rebuilt core boxes.
/// The first box waits one full step, like the widget this replaces.
pub fn schedule_core_wave(
    targets: &[TargetId],
    registry: &mut Registry,
    config: &EngineConfig,
    now_ms: f64,
    timers: &mut TimerQueue,
) {
    for (i, id) in targets.iter().enumerate() {
        let Some(target) = registry.get_mut(*id) else {
            continue;
        };
        if target.fired {
            continue;
        }
        target.fired = true;
        let delay = (i as f64 + 1.0) * config.core_stagger_ms;
        timers.schedule(now_ms + delay, *id, TimerAction::Reveal);
    }
}

/// Begin the body fade once the window reports loaded.
pub fn on_load(
    body: TargetId,
    registry: &mut Registry,
    config: &EngineConfig,
    now_ms: f64,
    timers: &mut TimerQueue,
    ops: &mut OpBuffer,
) {
    let Some(target) = registry.get_mut(body) else {
        return;
    };
    if target.fired {
        return;
    }
    target.fired = true;
    ops.push(StyleOp::Opacity { target: body, value: 0.0 });
    timers.schedule(now_ms + config.body_fade_delay_ms, body, TimerAction::BodyReveal);
}

/// Nudge or rest a card icon on hover.
pub fn on_hover(target_id: TargetId, entered: bool, registry: &Registry, ops: &mut OpBuffer) {
    let Some(target) = registry.get(target_id) else {
        return;
    };
    if target.kind != RevealKind::CardIcon {
        return;
    }
    if entered {
        ops.push(StyleOp::Transition {
            target: target_id,
            spec: Some(TransitionSpec::new(
                TransitionProperty::Transform,
                ICON_TRANSITION_MS,
                Easing::Ease,
            )),
        });
        ops.push(StyleOp::Transform {
            target: target_id,
            value: Transform::ScaleRotate { scale: ICON_HOVER_SCALE, degrees: ICON_HOVER_TILT_DEG },
        });
    } else {
        ops.push(StyleOp::Transform {
            target: target_id,
            value: Transform::ScaleRotate { scale: 1.0, degrees: 0.0 },
        });
    }
}

/// Answer a due timer. The registry lookup is the liveness check: work for
/// a target removed since scheduling is silently dropped.
pub fn apply_timer(due: DueTimer, registry: &Registry, ops: &mut OpBuffer) {
    let Some(target) = registry.get(due.target) else {
        log::debug!("timer for removed target {} dropped", due.target.0);
        return;
    };
    match due.action {
        TimerAction::Reveal => revealed_ops(target, ops),
        TimerAction::RestoreBarWidth => {
            if let Some(width) = target.bar_width.clone() {
                ops.push(StyleOp::Width { target: target.id, value: width });
            }
        }
        TimerAction::BodyReveal => {
            ops.push(StyleOp::Transition {
                target: target.id,
                spec: Some(TransitionSpec::new(
                    TransitionProperty::Opacity,
                    BODY_FADE_MS,
                    Easing::Ease,
                )),
            });
            ops.push(StyleOp::Opacity { target: target.id, value: 1.0 });
        }
        TimerAction::EmblemPulse => {
            ops.push(StyleOp::Animation {
                target: target.id,
                spec: Some(crate::api::types::AnimationSpec::looping(
                    "pulse",
                    2000.0,
                    Easing::EaseInOut,
                )),
            });
        }
    }
}
