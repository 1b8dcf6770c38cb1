use std::collections::HashMap;

use glam::Vec2;

use crate::api::types::{AnimationSpec, GroupId, StyleOp, TargetId, Transform, Width};
use crate::components::counter::Counter;
use crate::components::target::{RevealKind, Target};
use crate::core::ops::OpBuffer;
use crate::core::registry::Registry;
use crate::core::time::FixedStepper;
use crate::core::timer::{TimerAction, TimerQueue};
use crate::effects::emblem::EmblemState;
use crate::effects::ripple::RippleState;
use crate::extensions::easing::Easing;
use crate::input::queue::{InputQueue, PageInput};
use crate::systems::{counter as counter_system, reveal, scrollfx};
use crate::watch::group::WatchGroup;

/// Engine tuning, provided by the page.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Honor the user's reduced-motion preference. Read once at startup;
    /// when set, no transition or animation styling ever leaves the engine.
    pub reduced_motion: bool,
    /// Delay between staggered reveals, per batch index.
    pub stagger_step_ms: f64,
    /// Delay between core box reveals in a spawn wave.
    pub core_stagger_ms: f64,
    /// Full length of a stat count-up.
    pub counter_duration_ms: f64,
    /// Fixed step driving counters.
    pub counter_tick_ms: f64,
    /// Lifetime of a click ripple.
    pub ripple_duration_ms: f64,
    /// Pause before a collapsed speed bar regrows.
    pub bar_restore_delay_ms: f64,
    /// Pause before the body fades in after load.
    pub body_fade_delay_ms: f64,
    /// Emblem clicks required to trigger the easter egg.
    pub emblem_clicks: u32,
    /// Length of the emblem spin before the pulse takes over.
    pub emblem_spin_ms: f64,
    /// Per-order parallax speed increment.
    pub parallax_step: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            reduced_motion: false,
            stagger_step_ms: 150.0,
            core_stagger_ms: 80.0,
            counter_duration_ms: 1500.0,
            counter_tick_ms: 16.0,
            ripple_duration_ms: 600.0,
            bar_restore_delay_ms: 200.0,
            body_fade_delay_ms: 100.0,
            emblem_clicks: 5,
            emblem_spin_ms: 1000.0,
            parallax_step: 0.15,
        }
    }
}

/// Registration payload for one element, captured by the bridge.
#[derive(Debug, Clone, Default)]
pub struct TargetDesc {
    /// Markup text for stat kinds; parsed into a counter when it has digits.
    pub counter_text: Option<String>,
    /// Inline width captured for speed bars.
    pub bar_width: Option<String>,
    /// Register already revealed (the hero section).
    pub start_visible: bool,
}

impl TargetDesc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_counter_text(mut self, text: &str) -> Self {
        self.counter_text = Some(text.to_string());
        self
    }

    pub fn with_bar_width(mut self, width: &str) -> Self {
        self.bar_width = Some(width.to_string());
        self
    }

    pub fn visible(mut self) -> Self {
        self.start_visible = true;
        self
    }
}

/// The reveal engine. Owns every decision; the bridge is only its hands.
///
/// Per frame the bridge pushes inputs, calls `tick(dt_ms)`, then applies
/// whatever `drain_ops` returns. All state (fired flags, counters, pending
/// delays) lives here, never in the DOM.
pub struct Engine {
    config: EngineConfig,
    groups: Vec<WatchGroup>,
    /// Next registration order per group, parallel to `groups`.
    orders: Vec<u32>,
    registry: Registry,
    input: InputQueue,
    timers: TimerQueue,
    stepper: FixedStepper,
    ripples: RippleState,
    emblem: EmblemState,
    ops: OpBuffer,
    now_ms: f64,
    next_id: u32,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            groups: Vec::new(),
            orders: Vec::new(),
            registry: Registry::new(),
            input: InputQueue::new(),
            timers: TimerQueue::new(),
            stepper: FixedStepper::new(config.counter_tick_ms),
            ripples: RippleState::new(),
            emblem: EmblemState::new(config.emblem_clicks),
            ops: OpBuffer::new(config.reduced_motion),
            now_ms: 0.0,
            next_id: 1,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn reduced_motion(&self) -> bool {
        self.config.reduced_motion
    }

    /// Engine clock in ms, advanced by `tick`.
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Replace the emblem click threshold; resets the click count.
    pub fn set_emblem_clicks(&mut self, clicks: u32) {
        self.emblem = EmblemState::new(clicks);
    }

    /// Create a watch group. The bridge creates one DOM observer per
    /// observed group, using the group's config.
    pub fn add_group(&mut self, group: WatchGroup) -> GroupId {
        let id = GroupId(self.groups.len() as u32);
        self.groups.push(group);
        self.orders.push(0);
        id
    }

    pub fn group(&self, id: GroupId) -> Option<&WatchGroup> {
        self.groups.get(id.0 as usize)
    }

    /// Register one element into a group. Hidden-state ops are emitted
    /// synchronously so the bridge can apply them before first paint.
    /// Returns `None` for an unknown group.
    pub fn register(&mut self, group: GroupId, desc: TargetDesc) -> Option<TargetId> {
        let Some(watch) = self.groups.get(group.0 as usize) else {
            log::error!("register into unknown group {}", group.0);
            return None;
        };
        let kind = watch.kind;
        let id = TargetId(self.next_id);
        self.next_id += 1;
        let order = self.orders[group.0 as usize];
        self.orders[group.0 as usize] += 1;

        let mut target = Target::new(id, kind, group, order);
        if desc.start_visible {
            target = target.already_fired();
        }
        if kind == RevealKind::StatCard {
            if let Some(text) = desc.counter_text.as_deref() {
                match Counter::parse(text) {
                    Some(counter) => target = target.with_counter(counter),
                    None => log::debug!("stat text {:?} has no digits, kept static", text),
                }
            }
        }
        if kind == RevealKind::SpeedBar {
            if let Some(width) = desc.bar_width.filter(|w| !w.is_empty()) {
                target = target.with_bar_width(Width::Raw(width));
            }
        }

        reveal::initial_ops(&target, &mut self.ops);
        self.registry.spawn(target);
        Some(id)
    }

    /// Remove a target: cancels its pending timers and any live ripple,
    /// then drops it from the registry. The bridge removes the node.
    pub fn remove(&mut self, id: TargetId) {
        self.timers.cancel_target(id);
        self.ripples.cancel(id);
        self.registry.despawn(id);
    }

    /// Queue a page input for the next tick.
    pub fn push(&mut self, input: PageInput) {
        self.input.push(input);
    }

    /// Advance one frame: drain inputs, fire due timers, run fixed counter
    /// steps, advance ripples.
    pub fn tick(&mut self, dt_ms: f64) {
        self.now_ms += dt_ms.max(0.0);

        // Inputs first, so zero-delay work scheduled here fires this tick.
        let events = self.input.drain();
        let mut batch_indices: HashMap<GroupId, u32> = HashMap::new();
        for event in events {
            self.dispatch(event, &mut batch_indices);
        }

        for due in self.timers.fire_due(self.now_ms) {
            reveal::apply_timer(due, &self.registry, &mut self.ops);
        }

        let steps = self.stepper.accumulate(dt_ms);
        for _ in 0..steps {
            counter_system::step_counters(&mut self.registry, &mut self.ops);
        }

        for id in self.ripples.tick(dt_ms, &mut self.ops) {
            self.registry.despawn(id);
        }
    }

    /// Drain the ops the bridge must apply now.
    pub fn drain_ops(&mut self) -> Vec<StyleOp> {
        self.ops.drain()
    }

    pub fn target(&self, id: TargetId) -> Option<&Target> {
        self.registry.get(id)
    }

    pub fn target_count(&self) -> usize {
        self.registry.len()
    }

    fn dispatch(&mut self, event: PageInput, batch_indices: &mut HashMap<GroupId, u32>) {
        match event {
            PageInput::Crossing { target, entered, .. } => {
                let Some(group_id) = self.registry.get(target).map(|t| t.group) else {
                    return;
                };
                let Some(group) = self.groups.get(group_id.0 as usize) else {
                    return;
                };
                let batch = batch_indices.entry(group_id).or_insert(0);
                reveal::on_crossing(
                    target,
                    entered,
                    &mut self.registry,
                    group,
                    &self.config,
                    self.now_ms,
                    batch,
                    &mut self.timers,
                    &mut self.ops,
                );
            }
            PageInput::Scroll { offset, max } => {
                scrollfx::apply_scroll(
                    &self.registry,
                    self.config.parallax_step,
                    offset,
                    max,
                    &mut self.ops,
                );
            }
            PageInput::Hover { target, entered } => {
                reveal::on_hover(target, entered, &self.registry, &mut self.ops);
            }
            PageInput::EmblemClick { target } => {
                if self.registry.get(target).is_none() {
                    return;
                }
                if self.emblem.click() {
                    log::info!("emblem easter egg triggered");
                    self.ops.push(StyleOp::Animation {
                        target,
                        spec: Some(AnimationSpec::once(
                            "spin",
                            self.config.emblem_spin_ms,
                            Easing::Ease,
                        )),
                    });
                    self.timers.schedule(
                        self.now_ms + self.config.emblem_spin_ms,
                        target,
                        TimerAction::EmblemPulse,
                    );
                }
            }
            PageInput::RippleSpawned { target, origin, size } => {
                if self.registry.get(target).is_none() {
                    return;
                }
                if self.config.reduced_motion {
                    // Nothing to show without motion; drop the element now.
                    self.ops.push(StyleOp::Remove { target });
                    self.registry.despawn(target);
                    return;
                }
                let top_left = origin - Vec2::splat(size / 2.0);
                self.ops.push(StyleOp::Position { target, at: top_left });
                self.ops.push(StyleOp::Transform { target, value: Transform::Scale(0.0) });
                self.ops.push(StyleOp::Opacity { target, value: 1.0 });
                self.ripples.spawn(target, self.config.ripple_duration_ms);
            }
            PageInput::CoresRebuilt { targets } => {
                reveal::schedule_core_wave(
                    &targets,
                    &mut self.registry,
                    &self.config,
                    self.now_ms,
                    &mut self.timers,
                );
            }
            PageInput::Loaded { body } => {
                reveal::on_load(
                    body,
                    &mut self.registry,
                    &self.config,
                    self.now_ms,
                    &mut self.timers,
                    &mut self.ops,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::TransitionSpec;

    fn engine() -> Engine {
        Engine::new(EngineConfig::default())
    }

    fn texts_for(ops: &[StyleOp], id: TargetId) -> Vec<String> {
        ops.iter()
            .filter_map(|op| match op {
                StyleOp::Text { target, value } if *target == id => Some(value.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn fade_in_reveals_once_through_the_full_loop() {
        let mut engine = engine();
        let group = engine.add_group(WatchGroup::new(RevealKind::FadeIn));
        let id = engine.register(group, TargetDesc::new()).unwrap();
        engine.drain_ops();

        engine.push(PageInput::Crossing { target: id, ratio: 0.2, entered: true });
        engine.tick(16.0);
        let ops = engine.drain_ops();
        assert!(ops.contains(&StyleOp::Class { target: id, name: "visible".into(), on: true }));
        assert!(ops.contains(&StyleOp::Release { target: id }));

        // Re-reported crossings change nothing.
        engine.push(PageInput::Crossing { target: id, ratio: 0.9, entered: true });
        engine.tick(16.0);
        assert!(engine.drain_ops().is_empty());
    }

    #[test]
    fn pipeline_steps_reveal_in_batch_order() {
        let mut engine = engine();
        let group = engine.add_group(WatchGroup::new(RevealKind::PipelineStep));
        let ids: Vec<TargetId> =
            (0..3).map(|_| engine.register(group, TargetDesc::new()).unwrap()).collect();
        engine.drain_ops();

        for id in &ids {
            engine.push(PageInput::Crossing { target: *id, ratio: 0.5, entered: true });
        }

        // The batch lands on this tick; slot 0 reveals immediately.
        engine.tick(16.0);
        let ops = engine.drain_ops();
        assert!(ops.contains(&StyleOp::Opacity { target: ids[0], value: 1.0 }));
        assert!(!ops.contains(&StyleOp::Opacity { target: ids[1], value: 1.0 }));

        // One stagger step later the second slot fires, and only it.
        engine.tick(150.0);
        let ops = engine.drain_ops();
        assert!(ops.contains(&StyleOp::Opacity { target: ids[1], value: 1.0 }));
        assert!(!ops.contains(&StyleOp::Opacity { target: ids[2], value: 1.0 }));

        engine.tick(150.0);
        let ops = engine.drain_ops();
        assert!(ops.contains(&StyleOp::Opacity { target: ids[2], value: 1.0 }));
    }

    #[test]
    fn stat_counter_runs_to_its_final_text_and_stops() {
        let mut engine = engine();
        let group = engine.add_group(WatchGroup::new(RevealKind::StatCard));
        let id = engine
            .register(group, TargetDesc::new().with_counter_text("128+"))
            .unwrap();
        engine.drain_ops();

        engine.push(PageInput::Crossing { target: id, ratio: 0.6, entered: true });

        let mut texts = Vec::new();
        for _ in 0..120 {
            engine.tick(16.0);
            texts.extend(texts_for(&engine.drain_ops(), id));
        }
        assert_eq!(texts.last().map(String::as_str), Some("128+"));
        // 94 increments reach 128; nothing after the pin.
        assert_eq!(texts.len(), 94);

        // A second crossing cannot restart a finished counter.
        engine.push(PageInput::Crossing { target: id, ratio: 0.9, entered: true });
        for _ in 0..10 {
            engine.tick(16.0);
            assert!(texts_for(&engine.drain_ops(), id).is_empty());
        }
    }

    #[test]
    fn speed_bar_collapses_and_regrows() {
        let mut engine = engine();
        let group = engine.add_group(WatchGroup::new(RevealKind::SpeedBar));
        let id = engine
            .register(group, TargetDesc::new().with_bar_width("75%"))
            .unwrap();
        engine.drain_ops();

        engine.push(PageInput::Crossing { target: id, ratio: 0.6, entered: true });
        engine.tick(16.0);
        let ops = engine.drain_ops();
        assert!(ops.contains(&StyleOp::Width { target: id, value: Width::Percent(0.0) }));
        assert!(!ops.iter().any(|op| matches!(op, StyleOp::Width { value: Width::Raw(_), .. })));

        engine.tick(200.0);
        let ops = engine.drain_ops();
        assert!(ops.contains(&StyleOp::Width { target: id, value: Width::Raw("75%".into()) }));
    }

    #[test]
    fn core_wave_reveals_in_spawn_order_and_remove_cancels() {
        let mut engine = engine();
        let group = engine.add_group(WatchGroup::new(RevealKind::CoreBox));
        let a = engine.register(group, TargetDesc::new()).unwrap();
        let b = engine.register(group, TargetDesc::new()).unwrap();
        engine.drain_ops();

        engine.push(PageInput::CoresRebuilt { targets: vec![a, b] });
        engine.tick(16.0);
        engine.drain_ops();

        // The second box is torn down before its reveal lands.
        engine.remove(b);

        engine.tick(1000.0);
        let ops = engine.drain_ops();
        assert!(ops.contains(&StyleOp::Opacity { target: a, value: 1.0 }));
        assert!(!ops.iter().any(|op| op.target() == b));
    }

    #[test]
    fn scroll_samples_coalesce_to_one_update() {
        let mut engine = engine();
        let blobs = engine.add_group(WatchGroup::new(RevealKind::ParallaxBlob));
        let blob = engine.register(blobs, TargetDesc::new()).unwrap();
        let bar_group = engine.add_group(WatchGroup::new(RevealKind::ProgressBar));
        let bar = engine.register(bar_group, TargetDesc::new()).unwrap();
        engine.drain_ops();

        for offset in [10.0, 200.0, 400.0] {
            engine.push(PageInput::Scroll { offset, max: 800.0 });
        }
        engine.tick(16.0);
        let ops = engine.drain_ops();

        let bar_updates: Vec<&StyleOp> =
            ops.iter().filter(|op| op.target() == bar).collect();
        assert_eq!(bar_updates.len(), 1);
        assert_eq!(
            *bar_updates[0],
            StyleOp::Width { target: bar, value: Width::Percent(50.0) }
        );

        let blob_updates: Vec<&StyleOp> =
            ops.iter().filter(|op| op.target() == blob).collect();
        assert_eq!(blob_updates.len(), 1);
    }

    #[test]
    fn ripple_lives_and_dies_through_the_loop() {
        let mut engine = engine();
        let group = engine.add_group(WatchGroup::new(RevealKind::Ripple));
        let id = engine.register(group, TargetDesc::new()).unwrap();
        engine.drain_ops();

        engine.push(PageInput::RippleSpawned {
            target: id,
            origin: Vec2::new(40.0, 10.0),
            size: 60.0,
        });
        engine.tick(16.0);
        let ops = engine.drain_ops();
        assert_eq!(ops[0], StyleOp::Position { target: id, at: Vec2::new(10.0, -20.0) });
        assert_eq!(ops[1], StyleOp::Transform { target: id, value: Transform::Scale(0.0) });
        assert!(engine.target(id).is_some());

        engine.tick(700.0);
        let ops = engine.drain_ops();
        assert!(ops.contains(&StyleOp::Remove { target: id }));
        assert!(engine.target(id).is_none());
    }

    #[test]
    fn reduced_motion_suppresses_motion_styling_but_not_counters() {
        let mut engine = Engine::new(EngineConfig {
            reduced_motion: true,
            ..EngineConfig::default()
        });
        let steps = engine.add_group(WatchGroup::new(RevealKind::PipelineStep));
        let step = engine.register(steps, TargetDesc::new()).unwrap();
        let stats = engine.add_group(WatchGroup::new(RevealKind::StatCard));
        let stat = engine
            .register(stats, TargetDesc::new().with_counter_text("64"))
            .unwrap();

        let no_motion = |ops: &[StyleOp]| {
            !ops.iter().any(|op| {
                matches!(
                    op,
                    StyleOp::Transition { spec: Some(_), .. }
                        | StyleOp::Animation { spec: Some(_), .. }
                )
            })
        };

        let ops = engine.drain_ops();
        assert!(no_motion(&ops), "registration leaked motion styling: {:?}", ops);

        engine.push(PageInput::Crossing { target: step, ratio: 0.5, entered: true });
        engine.push(PageInput::Crossing { target: stat, ratio: 0.6, entered: true });
        let mut saw_text = false;
        for _ in 0..120 {
            engine.tick(16.0);
            let ops = engine.drain_ops();
            assert!(no_motion(&ops), "tick leaked motion styling: {:?}", ops);
            saw_text |= !texts_for(&ops, stat).is_empty();
        }
        assert!(saw_text, "counters must still run under reduced motion");
    }

    #[test]
    fn reduced_motion_discards_ripples_immediately() {
        let mut engine = Engine::new(EngineConfig {
            reduced_motion: true,
            ..EngineConfig::default()
        });
        let group = engine.add_group(WatchGroup::new(RevealKind::Ripple));
        let id = engine.register(group, TargetDesc::new()).unwrap();
        engine.drain_ops();

        engine.push(PageInput::RippleSpawned {
            target: id,
            origin: Vec2::new(5.0, 5.0),
            size: 20.0,
        });
        engine.tick(16.0);
        let ops = engine.drain_ops();
        assert_eq!(ops, vec![StyleOp::Remove { target: id }]);
        assert!(engine.target(id).is_none());
    }

    #[test]
    fn emblem_spins_on_the_fifth_click_then_pulses() {
        let mut engine = engine();
        let group = engine.add_group(WatchGroup::new(RevealKind::Emblem));
        let id = engine.register(group, TargetDesc::new()).unwrap();
        engine.drain_ops();

        for _ in 0..4 {
            engine.push(PageInput::EmblemClick { target: id });
        }
        engine.tick(16.0);
        assert!(engine.drain_ops().is_empty(), "four clicks must not trigger");

        engine.push(PageInput::EmblemClick { target: id });
        engine.tick(16.0);
        let ops = engine.drain_ops();
        assert!(matches!(
            &ops[0],
            StyleOp::Animation { spec: Some(spec), .. } if spec.name == "spin" && !spec.infinite
        ));

        engine.tick(1000.0);
        let ops = engine.drain_ops();
        assert!(matches!(
            &ops[0],
            StyleOp::Animation { spec: Some(spec), .. } if spec.name == "pulse" && spec.infinite
        ));
    }

    #[test]
    fn body_fade_runs_hidden_then_visible() {
        let mut engine = engine();
        let group = engine.add_group(WatchGroup::new(RevealKind::Body));
        let body = engine.register(group, TargetDesc::new()).unwrap();
        engine.drain_ops();

        engine.push(PageInput::Loaded { body });
        engine.tick(16.0);
        let ops = engine.drain_ops();
        assert_eq!(ops[0], StyleOp::Opacity { target: body, value: 0.0 });

        engine.tick(100.0);
        let ops = engine.drain_ops();
        assert!(matches!(
            ops[0],
            StyleOp::Transition { spec: Some(TransitionSpec { duration_ms, .. }), .. }
                if duration_ms == 500.0
        ));
        assert_eq!(ops[1], StyleOp::Opacity { target: body, value: 1.0 });
    }

    #[test]
    fn register_into_unknown_group_is_refused() {
        let mut engine = engine();
        assert!(engine.register(GroupId(9), TargetDesc::new()).is_none());
        assert_eq!(engine.target_count(), 0);
    }

    #[test]
    fn inputs_for_removed_targets_are_dropped() {
        let mut engine = engine();
        let group = engine.add_group(WatchGroup::new(RevealKind::FadeIn));
        let id = engine.register(group, TargetDesc::new()).unwrap();
        engine.drain_ops();
        engine.remove(id);

        engine.push(PageInput::Crossing { target: id, ratio: 0.5, entered: true });
        engine.push(PageInput::Hover { target: id, entered: true });
        engine.push(PageInput::EmblemClick { target: id });
        engine.tick(16.0);
        assert!(engine.drain_ops().is_empty());
    }

    #[test]
    fn orders_count_per_group() {
        let mut engine = engine();
        let blobs = engine.add_group(WatchGroup::new(RevealKind::ParallaxBlob));
        let fades = engine.add_group(WatchGroup::new(RevealKind::FadeIn));
        let b0 = engine.register(blobs, TargetDesc::new()).unwrap();
        let f0 = engine.register(fades, TargetDesc::new()).unwrap();
        let b1 = engine.register(blobs, TargetDesc::new()).unwrap();

        assert_eq!(engine.target(b0).unwrap().order, 0);
        assert_eq!(engine.target(f0).unwrap().order, 0);
        assert_eq!(engine.target(b1).unwrap().order, 1);
    }
}
