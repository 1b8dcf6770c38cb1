//! Counter system. Advances every started stat counter one fixed step and
//! emits the text to display.

use crate::api::types::StyleOp;
use crate::core::ops::OpBuffer;
use crate::core::registry::Registry;

/// Run one fixed tick over all counters. Counters that finished (or never
/// started) stay silent, so a finished stat is written exactly once more
/// with its pinned final text and then left alone.
pub fn step_counters(registry: &mut Registry, ops: &mut OpBuffer) {
    for target in registry.iter_mut() {
        if let Some(counter) = target.counter.as_mut() {
            if let Some(text) = counter.step() {
                ops.push(StyleOp::Text { target: target.id, value: text });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{GroupId, TargetId};
    use crate::components::counter::Counter;
    use crate::components::target::{RevealKind, Target};

    fn stat(id: u32, text: &str) -> Target {
        Target::new(TargetId(id), RevealKind::StatCard, GroupId(0), id)
            .with_counter(Counter::parse(text).unwrap())
    }

    #[test]
    fn started_counters_emit_text_each_step() {
        let mut reg = Registry::new();
        reg.spawn(stat(1, "128+"));
        reg.get_mut(TargetId(1)).unwrap().counter.as_mut().unwrap().start(1500.0, 16.0);

        let mut ops = OpBuffer::new(false);
        step_counters(&mut reg, &mut ops);
        step_counters(&mut reg, &mut ops);
        let out = ops.drain();
        assert_eq!(out.len(), 2);
        assert!(matches!(out[0], StyleOp::Text { target: TargetId(1), .. }));
    }

    #[test]
    fn unstarted_counters_stay_silent() {
        let mut reg = Registry::new();
        reg.spawn(stat(1, "64"));
        let mut ops = OpBuffer::new(false);
        step_counters(&mut reg, &mut ops);
        assert!(ops.is_empty());
    }

    #[test]
    fn run_finishes_with_pinned_text_then_goes_quiet() {
        let mut reg = Registry::new();
        reg.spawn(stat(1, "7nm"));
        // Short run: 5 ticks to the end.
        reg.get_mut(TargetId(1)).unwrap().counter.as_mut().unwrap().start(80.0, 16.0);

        let mut ops = OpBuffer::new(false);
        let mut last = None;
        for _ in 0..20 {
            step_counters(&mut reg, &mut ops);
            if let Some(StyleOp::Text { value, .. }) = ops.drain().pop() {
                last = Some(value);
            }
        }
        assert_eq!(last.as_deref(), Some("7nm"));

        step_counters(&mut reg, &mut ops);
        assert!(ops.is_empty(), "finished counter emitted again");
    }
}
