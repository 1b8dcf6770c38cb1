use glam::Vec2;

use crate::api::types::TargetId;

/// Page event types the engine understands.
/// Pushed by the bridge; no DOM types cross this boundary.
#[derive(Debug, Clone)]
pub enum PageInput {
    /// An observed target crossed its visibility threshold.
    Crossing { target: TargetId, ratio: f32, entered: bool },
    /// The page scrolled to `offset` of `max` scrollable px.
    Scroll { offset: f32, max: f32 },
    /// Pointer entered or left a hover target.
    Hover { target: TargetId, entered: bool },
    /// The page emblem was clicked.
    EmblemClick { target: TargetId },
    /// A ripple element was created under a click. `origin` is the click
    /// point relative to the host element, `size` its larger edge in px.
    RippleSpawned { target: TargetId, origin: Vec2, size: f32 },
    /// The cores widget rebuilt its boxes; ids are in DOM order.
    CoresRebuilt { targets: Vec<TargetId> },
    /// The window finished loading.
    Loaded { body: TargetId },
}

/// A queue of page events.
/// The bridge writes events into the queue; the engine drains them each frame.
pub struct InputQueue {
    events: Vec<PageInput>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new page event (called from the bridge's listeners).
    /// Scroll events coalesce: only the newest offset survives.
    pub fn push(&mut self, event: PageInput) {
        if matches!(event, PageInput::Scroll { .. }) {
            self.events.retain(|e| !matches!(e, PageInput::Scroll { .. }));
        }
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<PageInput> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &PageInput> {
        self.events.iter()
    }

    /// Check if there are pending events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(PageInput::Crossing { target: TargetId(1), ratio: 0.4, entered: true });
        q.push(PageInput::EmblemClick { target: TargetId(2) });
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn scroll_coalesces_to_latest() {
        let mut q = InputQueue::new();
        q.push(PageInput::Scroll { offset: 10.0, max: 1000.0 });
        q.push(PageInput::Crossing { target: TargetId(1), ratio: 0.2, entered: true });
        q.push(PageInput::Scroll { offset: 50.0, max: 1000.0 });
        q.push(PageInput::Scroll { offset: 90.0, max: 1000.0 });

        let events = q.drain();
        assert_eq!(events.len(), 2);
        let scrolls: Vec<f32> = events
            .iter()
            .filter_map(|e| match e {
                PageInput::Scroll { offset, .. } => Some(*offset),
                _ => None,
            })
            .collect();
        assert_eq!(scrolls, vec![90.0]);
    }

    #[test]
    fn ripple_payload_survives() {
        let mut q = InputQueue::new();
        q.push(PageInput::RippleSpawned {
            target: TargetId(3),
            origin: Vec2::new(12.0, 8.0),
            size: 48.0,
        });
        match q.drain().pop() {
            Some(PageInput::RippleSpawned { target, origin, size }) => {
                assert_eq!(target, TargetId(3));
                assert_eq!(origin, Vec2::new(12.0, 8.0));
                assert_eq!(size, 48.0);
            }
            other => panic!("expected RippleSpawned, got {:?}", other),
        }
    }
}
