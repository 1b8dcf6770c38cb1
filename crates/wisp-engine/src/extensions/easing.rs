// extensions/easing.rs
//
// CSS timing functions evaluated in Rust.
// No dependencies on Target/Registry, just math.

/// Timing function for frame-driven interpolation.
///
/// The variants mirror the CSS timing keywords so a curve can be evaluated
/// engine-side for frame effects and rendered verbatim into a CSS
/// `transition`/`animation` shorthand for DOM-side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant velocity.
    Linear,
    /// Gentle start and end, the CSS initial value.
    #[default]
    Ease,
    /// Slow start.
    EaseIn,
    /// Slow end.
    EaseOut,
    /// Slow start and end.
    EaseInOut,
}

impl Easing {
    /// Apply the timing function to a normalized time `t` in [0, 1].
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Ease => cubic_bezier(0.25, 0.1, 0.25, 1.0, t),
            Easing::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, t),
            Easing::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, t),
            Easing::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, t),
        }
    }

    /// The CSS keyword for this curve.
    pub fn css_name(self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::Ease => "ease",
            Easing::EaseIn => "ease-in",
            Easing::EaseOut => "ease-out",
            Easing::EaseInOut => "ease-in-out",
        }
    }
}

impl std::fmt::Display for Easing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.css_name())
    }
}

/// One axis of a cubic bezier with implicit endpoints 0 and 1.
#[inline]
fn bezier(u: f32, p1: f32, p2: f32) -> f32 {
    let inv = 1.0 - u;
    3.0 * inv * inv * u * p1 + 3.0 * inv * u * u * p2 + u * u * u
}

#[inline]
fn bezier_slope(u: f32, p1: f32, p2: f32) -> f32 {
    let inv = 1.0 - u;
    3.0 * inv * inv * p1 + 6.0 * inv * u * (p2 - p1) + 3.0 * u * u * (1.0 - p2)
}

/// Evaluate `cubic-bezier(x1, y1, x2, y2)` at time `t`.
///
/// Solves x(u) = t with a few Newton steps, falling back to bisection where
/// the curve is too flat for Newton to converge.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, t: f32) -> f32 {
    let mut u = t;
    for _ in 0..8 {
        let err = bezier(u, x1, x2) - t;
        if err.abs() < 1e-5 {
            return bezier(u, y1, y2);
        }
        let slope = bezier_slope(u, x1, x2);
        if slope.abs() < 1e-6 {
            break;
        }
        u -= err / slope;
    }

    let mut lo = 0.0_f32;
    let mut hi = 1.0_f32;
    u = t;
    for _ in 0..24 {
        let x = bezier(u, x1, x2);
        if (x - t).abs() < 1e-5 {
            break;
        }
        if x < t {
            lo = u;
        } else {
            hi = u;
        }
        u = (lo + hi) / 2.0;
    }
    bezier(u, y1, y2)
}

// ---- Interpolation helpers ----

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Interpolate with easing.
#[inline]
pub fn ease(a: f32, b: f32, t: f32, easing: Easing) -> f32 {
    lerp(a, b, easing.apply(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_exact_for_every_curve() {
        for curve in [
            Easing::Linear,
            Easing::Ease,
            Easing::EaseIn,
            Easing::EaseOut,
            Easing::EaseInOut,
        ] {
            assert!(curve.apply(0.0).abs() < 1e-4, "{curve} at 0");
            assert!((curve.apply(1.0) - 1.0).abs() < 1e-4, "{curve} at 1");
        }
    }

    #[test]
    fn ease_out_front_loads_progress() {
        let mid = Easing::EaseOut.apply(0.5);
        assert!(mid > 0.5, "ease-out at 0.5 should be > 0.5, got {}", mid);
    }

    #[test]
    fn ease_in_back_loads_progress() {
        let mid = Easing::EaseIn.apply(0.5);
        assert!(mid < 0.5, "ease-in at 0.5 should be < 0.5, got {}", mid);
    }

    #[test]
    fn ease_in_out_is_centered() {
        let mid = Easing::EaseInOut.apply(0.5);
        assert!((mid - 0.5).abs() < 1e-3, "got {}", mid);
    }

    #[test]
    fn curves_are_monotonic() {
        for curve in [Easing::Ease, Easing::EaseIn, Easing::EaseOut, Easing::EaseInOut] {
            let mut prev = 0.0;
            for i in 0..=20 {
                let v = curve.apply(i as f32 / 20.0);
                assert!(v >= prev - 1e-4, "{curve} dipped at step {}", i);
                prev = v;
            }
        }
    }

    #[test]
    fn css_names_render() {
        assert_eq!(Easing::Ease.to_string(), "ease");
        assert_eq!(Easing::EaseInOut.to_string(), "ease-in-out");
        assert_eq!(format!("{}", Easing::EaseOut), "ease-out");
    }

    #[test]
    fn ease_interpolates() {
        let result = ease(100.0, 200.0, 0.5, Easing::Linear);
        assert!((result - 150.0).abs() < 0.001);
    }
}
