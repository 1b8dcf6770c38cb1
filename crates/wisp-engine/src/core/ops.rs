use crate::api::types::StyleOp;

/// Outbound style op buffer, drained by the bridge once per frame.
///
/// Reduced motion is enforced here: when set, any transition or animation
/// spec is rewritten to `None` on push, so no emit path can leak motion
/// styling past the preference.
#[derive(Debug, Default)]
pub struct OpBuffer {
    ops: Vec<StyleOp>,
    reduced_motion: bool,
}

impl OpBuffer {
    pub fn new(reduced_motion: bool) -> Self {
        Self {
            ops: Vec::with_capacity(32),
            reduced_motion,
        }
    }

    pub fn push(&mut self, op: StyleOp) {
        let op = if self.reduced_motion {
            match op {
                StyleOp::Transition { target, spec: Some(_) } => {
                    StyleOp::Transition { target, spec: None }
                }
                StyleOp::Animation { target, spec: Some(_) } => {
                    StyleOp::Animation { target, spec: None }
                }
                other => other,
            }
        } else {
            op
        };
        self.ops.push(op);
    }

    /// Drain all pending ops. Returns a Vec and clears the buffer.
    pub fn drain(&mut self) -> Vec<StyleOp> {
        std::mem::take(&mut self.ops)
    }

    /// Iterate over pending ops without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &StyleOp> {
        self.ops.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{TargetId, TransitionProperty, TransitionSpec};
    use crate::extensions::easing::Easing;

    fn some_transition(target: TargetId) -> StyleOp {
        StyleOp::Transition {
            target,
            spec: Some(TransitionSpec::new(TransitionProperty::All, 600.0, Easing::Ease)),
        }
    }

    #[test]
    fn push_and_drain() {
        let mut buf = OpBuffer::new(false);
        buf.push(StyleOp::Opacity { target: TargetId(1), value: 1.0 });
        buf.push(some_transition(TargetId(1)));
        assert_eq!(buf.len(), 2);
        let ops = buf.drain();
        assert_eq!(ops.len(), 2);
        assert!(buf.is_empty());
        assert_eq!(ops[1], some_transition(TargetId(1)));
    }

    #[test]
    fn reduced_motion_rewrites_specs_to_none() {
        let mut buf = OpBuffer::new(true);
        buf.push(some_transition(TargetId(1)));
        buf.push(StyleOp::Opacity { target: TargetId(1), value: 1.0 });

        let ops = buf.drain();
        assert_eq!(ops[0], StyleOp::Transition { target: TargetId(1), spec: None });
        // Non-motion ops pass through untouched.
        assert_eq!(ops[1], StyleOp::Opacity { target: TargetId(1), value: 1.0 });
    }

    #[test]
    fn reduced_motion_keeps_explicit_none() {
        let mut buf = OpBuffer::new(true);
        buf.push(StyleOp::Animation { target: TargetId(2), spec: None });
        assert_eq!(
            buf.drain()[0],
            StyleOp::Animation { target: TargetId(2), spec: None }
        );
    }
}
