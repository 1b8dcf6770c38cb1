//! Scroll-coupled effects: parallax blobs and the reading progress bar.
//! Runs once per frame on the latest coalesced scroll offset.

use glam::Vec2;

use crate::api::types::{StyleOp, Transform, Width};
use crate::components::target::RevealKind;
use crate::core::ops::OpBuffer;
use crate::core::registry::Registry;

/// Apply one scroll sample.
///
/// Each blob drifts at `(order + 1) * parallax_step` of the scroll offset,
/// so later blobs move faster. The progress bar maps offset to percent of
/// the scrollable range.
pub fn apply_scroll(
    registry: &Registry,
    parallax_step: f32,
    offset: f32,
    max: f32,
    ops: &mut OpBuffer,
) {
    let mut blobs = registry.find_all_by_kind(RevealKind::ParallaxBlob);
    blobs.sort_by_key(|t| t.order);
    for blob in blobs {
        let speed = (blob.order as f32 + 1.0) * parallax_step;
        ops.push(StyleOp::Transform {
            target: blob.id,
            value: Transform::Translate3d(Vec2::new(0.0, offset * speed)),
        });
    }

    if let Some(bar) = registry.find_by_kind(RevealKind::ProgressBar) {
        let percent = if max > 0.0 {
            (offset / max * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };
        ops.push(StyleOp::Width { target: bar.id, value: Width::Percent(percent) });
    }
}
