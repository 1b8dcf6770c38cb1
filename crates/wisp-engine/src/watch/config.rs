use std::fmt;

/// Root margin for a watch group, in px per edge.
///
/// Mirrors the CSS margin shorthand the observer API takes. Negative values
/// shrink the viewport box, so a reveal can be held back until the element
/// is well inside the view.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RootMargin {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl RootMargin {
    /// Margin on the bottom edge only, the common scroll-reveal shape.
    pub fn bottom(px: f32) -> Self {
        Self { bottom: px, ..Self::default() }
    }

    /// Parse a CSS margin shorthand of px values, e.g. `"0px 0px -50px 0px"`.
    /// Returns `None` on empty input or non-px components.
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = Vec::with_capacity(4);
        for token in s.split_whitespace() {
            let raw = token.strip_suffix("px").unwrap_or(token);
            parts.push(raw.parse::<f32>().ok()?);
        }
        match parts.as_slice() {
            [all] => Some(Self { top: *all, right: *all, bottom: *all, left: *all }),
            [v, h] => Some(Self { top: *v, right: *h, bottom: *v, left: *h }),
            [t, h, b] => Some(Self { top: *t, right: *h, bottom: *b, left: *h }),
            [t, r, b, l] => Some(Self { top: *t, right: *r, bottom: *b, left: *l }),
            _ => None,
        }
    }
}

impl fmt::Display for RootMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px {}px {}px {}px", self.top, self.right, self.bottom, self.left)
    }
}

/// Observer tuning for one watch group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WatchConfig {
    /// Fraction of the element that must be visible before a crossing fires.
    pub threshold: f32,
    pub root_margin: RootMargin,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self { threshold: 0.1, root_margin: RootMargin::default() }
    }
}

impl WatchConfig {
    pub fn new(threshold: f32) -> Self {
        Self { threshold, ..Self::default() }
    }

    pub fn with_root_margin(mut self, margin: RootMargin) -> Self {
        self.root_margin = margin;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_shorthand() {
        let m = RootMargin::parse("0px 0px -50px 0px").unwrap();
        assert_eq!(m, RootMargin { top: 0.0, right: 0.0, bottom: -50.0, left: 0.0 });
    }

    #[test]
    fn parses_short_forms() {
        assert_eq!(
            RootMargin::parse("10px"),
            Some(RootMargin { top: 10.0, right: 10.0, bottom: 10.0, left: 10.0 })
        );
        assert_eq!(
            RootMargin::parse("5px 20px"),
            Some(RootMargin { top: 5.0, right: 20.0, bottom: 5.0, left: 20.0 })
        );
        assert_eq!(
            RootMargin::parse("1px 2px 3px"),
            Some(RootMargin { top: 1.0, right: 2.0, bottom: 3.0, left: 2.0 })
        );
    }

    #[test]
    fn rejects_junk() {
        assert_eq!(RootMargin::parse(""), None);
        assert_eq!(RootMargin::parse("10%"), None);
        assert_eq!(RootMargin::parse("1px 2px 3px 4px 5px"), None);
    }

    #[test]
    fn renders_round_trip() {
        let m = RootMargin::bottom(-50.0);
        assert_eq!(m.to_string(), "0px 0px -50px 0px");
        assert_eq!(RootMargin::parse(&m.to_string()), Some(m));
    }

    #[test]
    fn config_defaults() {
        let c = WatchConfig::default();
        assert!((c.threshold - 0.1).abs() < f32::EPSILON);
        assert_eq!(c.root_margin, RootMargin::default());
    }
}
