use crate::api::types::TargetId;

/// What to do when a timer comes due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    /// Apply the revealed profile for the target's kind.
    Reveal,
    /// Write the captured bar width back after the collapse.
    RestoreBarWidth,
    /// Fade the body in after the load delay.
    BodyReveal,
    /// Swap the emblem spin for the looping pulse.
    EmblemPulse,
}

/// Cancellation handle for one scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(pub u64);

/// A timer that has come due, ready for dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DueTimer {
    pub target: TargetId,
    pub action: TimerAction,
}

#[derive(Debug, Clone)]
struct Entry {
    token: TimerToken,
    due_ms: f64,
    target: TargetId,
    action: TimerAction,
}

/// Engine-owned delayed actions.
///
/// Every delay in the page lives here instead of in host timeouts, so a
/// removed target can cancel its pending work and a due action is always
/// checked against the registry before it runs.
#[derive(Debug, Default)]
pub struct TimerQueue {
    entries: Vec<Entry>,
    next_token: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `action` for `target` at the absolute clock time `due_ms`.
    pub fn schedule(&mut self, due_ms: f64, target: TargetId, action: TimerAction) -> TimerToken {
        let token = TimerToken(self.next_token);
        self.next_token += 1;
        self.entries.push(Entry { token, due_ms, target, action });
        token
    }

    /// Cancel a single timer. Returns false when it already fired or was
    /// cancelled before.
    pub fn cancel(&mut self, token: TimerToken) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.token != token);
        self.entries.len() != before
    }

    /// Cancel everything scheduled for a target. Returns how many were dropped.
    pub fn cancel_target(&mut self, target: TargetId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.target != target);
        before - self.entries.len()
    }

    /// Pop every timer due at or before `now_ms`, in due order.
    /// Timers due at the same instant keep their scheduling order.
    pub fn fire_due(&mut self, now_ms: f64) -> Vec<DueTimer> {
        let mut due = Vec::new();
        let mut rest = Vec::with_capacity(self.entries.len());
        for e in self.entries.drain(..) {
            if e.due_ms <= now_ms {
                due.push(e);
            } else {
                rest.push(e);
            }
        }
        self.entries = rest;
        due.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms).then(a.token.0.cmp(&b.token.0)));
        due.into_iter().map(|e| DueTimer { target: e.target, action: e.action }).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_in_due_order() {
        let mut q = TimerQueue::new();
        q.schedule(300.0, TargetId(3), TimerAction::Reveal);
        q.schedule(150.0, TargetId(2), TimerAction::Reveal);
        q.schedule(0.0, TargetId(1), TimerAction::Reveal);

        let due = q.fire_due(1000.0);
        let order: Vec<u32> = due.iter().map(|d| d.target.0).collect();
        assert_eq!(order, vec![1, 2, 3]);
        assert!(q.is_empty());
    }

    #[test]
    fn nothing_fires_before_due() {
        let mut q = TimerQueue::new();
        q.schedule(200.0, TargetId(1), TimerAction::RestoreBarWidth);
        assert!(q.fire_due(199.9).is_empty());
        assert_eq!(q.fire_due(200.0).len(), 1);
    }

    #[test]
    fn cancelled_token_never_fires() {
        let mut q = TimerQueue::new();
        let token = q.schedule(100.0, TargetId(1), TimerAction::Reveal);
        assert!(q.cancel(token));
        assert!(!q.cancel(token));
        assert!(q.fire_due(500.0).is_empty());
    }

    #[test]
    fn cancel_target_drops_all_its_timers() {
        let mut q = TimerQueue::new();
        q.schedule(100.0, TargetId(1), TimerAction::Reveal);
        q.schedule(200.0, TargetId(1), TimerAction::RestoreBarWidth);
        q.schedule(150.0, TargetId(2), TimerAction::Reveal);

        assert_eq!(q.cancel_target(TargetId(1)), 2);
        let due = q.fire_due(1000.0);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].target, TargetId(2));
    }

    #[test]
    fn equal_due_keeps_schedule_order() {
        let mut q = TimerQueue::new();
        q.schedule(50.0, TargetId(10), TimerAction::Reveal);
        q.schedule(50.0, TargetId(11), TimerAction::Reveal);
        q.schedule(50.0, TargetId(12), TimerAction::Reveal);

        let order: Vec<u32> = q.fire_due(50.0).iter().map(|d| d.target.0).collect();
        assert_eq!(order, vec![10, 11, 12]);
    }

    #[test]
    fn fired_timers_leave_the_queue() {
        let mut q = TimerQueue::new();
        q.schedule(10.0, TargetId(1), TimerAction::Reveal);
        assert_eq!(q.fire_due(10.0).len(), 1);
        assert!(q.fire_due(10.0).is_empty());
    }
}
