use std::fmt;

use glam::Vec2;

use crate::extensions::easing::Easing;

/// Unique identifier for a registered target in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetId(pub u32);

/// Identifier of a watch group (one observer configuration).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupId(pub u32);

/// A `transform` value the bridge writes verbatim into inline style.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Transform {
    /// Clears any inline transform.
    #[default]
    None,
    /// Horizontal offset in px.
    TranslateX(f32),
    /// GPU-composited translation in px (z is always 0).
    Translate3d(Vec2),
    /// Uniform scale.
    Scale(f32),
    /// Scale plus rotation in degrees.
    ScaleRotate { scale: f32, degrees: f32 },
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::None => f.write_str("none"),
            Transform::TranslateX(x) => write!(f, "translateX({}px)", x),
            Transform::Translate3d(v) => write!(f, "translate3d({}px, {}px, 0)", v.x, v.y),
            Transform::Scale(s) => write!(f, "scale({})", s),
            Transform::ScaleRotate { scale, degrees } => {
                write!(f, "scale({}) rotate({}deg)", scale, degrees)
            }
        }
    }
}

/// A `width` value. `Raw` carries back a width captured from inline style.
#[derive(Debug, Clone, PartialEq)]
pub enum Width {
    Percent(f32),
    Raw(String),
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Width::Percent(p) => write!(f, "{}%", p),
            Width::Raw(w) => f.write_str(w),
        }
    }
}

/// Property selector for a transition shorthand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionProperty {
    All,
    Opacity,
    Transform,
    Width,
}

impl fmt::Display for TransitionProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TransitionProperty::All => "all",
            TransitionProperty::Opacity => "opacity",
            TransitionProperty::Transform => "transform",
            TransitionProperty::Width => "width",
        })
    }
}

/// A CSS `transition` shorthand, e.g. `all 0.6s ease`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionSpec {
    pub property: TransitionProperty,
    pub duration_ms: f64,
    pub easing: Easing,
}

impl TransitionSpec {
    pub fn new(property: TransitionProperty, duration_ms: f64, easing: Easing) -> Self {
        Self { property, duration_ms, easing }
    }
}

impl fmt::Display for TransitionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}s {}", self.property, self.duration_ms / 1000.0, self.easing)
    }
}

/// A CSS `animation` shorthand, e.g. `pulse 2s ease-in-out infinite`.
/// The keyframes themselves live in the page stylesheet.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationSpec {
    pub name: String,
    pub duration_ms: f64,
    pub easing: Easing,
    pub infinite: bool,
}

impl AnimationSpec {
    pub fn once(name: &str, duration_ms: f64, easing: Easing) -> Self {
        Self { name: name.to_string(), duration_ms, easing, infinite: false }
    }

    pub fn looping(name: &str, duration_ms: f64, easing: Easing) -> Self {
        Self { name: name.to_string(), duration_ms, easing, infinite: true }
    }
}

impl fmt::Display for AnimationSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}s {}", self.name, self.duration_ms / 1000.0, self.easing)?;
        if self.infinite {
            f.write_str(" infinite")?;
        }
        Ok(())
    }
}

/// One style mutation the engine asks the bridge to apply.
///
/// Ops are the only channel from engine to DOM. The bridge applies them in
/// emission order; it never reorders or drops them.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleOp {
    /// Toggle a class on the target element.
    Class { target: TargetId, name: String, on: bool },
    /// Set inline `opacity`.
    Opacity { target: TargetId, value: f32 },
    /// Set inline `transform`.
    Transform { target: TargetId, value: Transform },
    /// Set inline `width`.
    Width { target: TargetId, value: Width },
    /// Set inline `transition`; `None` renders as the keyword `none`.
    Transition { target: TargetId, spec: Option<TransitionSpec> },
    /// Set inline `animation`; `None` renders as the keyword `none`.
    Animation { target: TargetId, spec: Option<AnimationSpec> },
    /// Replace the element's text content.
    Text { target: TargetId, value: String },
    /// Set inline `left`/`top` in px (for absolutely positioned effects).
    Position { target: TargetId, at: Vec2 },
    /// Stop watching the target; its observer slot is no longer needed.
    Release { target: TargetId },
    /// Remove the element from the document and forget the binding.
    Remove { target: TargetId },
}

impl StyleOp {
    /// The target this op addresses.
    pub fn target(&self) -> TargetId {
        match *self {
            StyleOp::Class { target, .. }
            | StyleOp::Opacity { target, .. }
            | StyleOp::Transform { target, .. }
            | StyleOp::Width { target, .. }
            | StyleOp::Transition { target, .. }
            | StyleOp::Animation { target, .. }
            | StyleOp::Text { target, .. }
            | StyleOp::Position { target, .. }
            | StyleOp::Release { target }
            | StyleOp::Remove { target } => target,
        }
    }
}
