use serde::{Deserialize, Serialize};

use crate::api::types::{GroupId, TargetId, Width};
use crate::components::counter::Counter;
use crate::watch::config::{RootMargin, WatchConfig};

/// What a registered target is and therefore how it reveals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RevealKind {
    /// Generic element that gains a class when scrolled into view.
    FadeIn,
    /// One step of a staggered left-slide sequence.
    PipelineStep,
    /// Full-page section faded in as a block.
    Section,
    /// Stat card whose number counts up once visible.
    StatCard,
    /// Comparison row whose bar collapses and regrows.
    SpeedBar,
    /// Box in the cores widget, revealed in a spawn wave.
    CoreBox,
    /// Decorative background blob moved on scroll.
    ParallaxBlob,
    /// Fixed top-of-page scroll progress indicator.
    ProgressBar,
    /// Icon nudged on card hover.
    CardIcon,
    /// Logo element hiding the click easter egg.
    Emblem,
    /// The document body, faded in on load.
    Body,
    /// Short-lived click ripple.
    Ripple,
}

impl RevealKind {
    /// Whether targets of this kind are watched by an observer.
    pub fn observed(self) -> bool {
        matches!(
            self,
            RevealKind::FadeIn
                | RevealKind::PipelineStep
                | RevealKind::Section
                | RevealKind::StatCard
                | RevealKind::SpeedBar
        )
    }

    /// Observer tuning this kind wants unless the manifest overrides it.
    pub fn default_config(self) -> WatchConfig {
        match self {
            RevealKind::FadeIn => {
                WatchConfig::new(0.1).with_root_margin(RootMargin::bottom(-50.0))
            }
            RevealKind::PipelineStep => WatchConfig::new(0.3),
            RevealKind::Section => WatchConfig::new(0.1),
            RevealKind::StatCard | RevealKind::SpeedBar => WatchConfig::new(0.5),
            _ => WatchConfig::default(),
        }
    }
}

/// One registered page element.
///
/// Fat struct with optional parts: most kinds leave `counter` and
/// `bar_width` empty. `fired` is the at-most-once guard for the whole
/// reveal sequence and lives here, never in the DOM.
#[derive(Debug, Clone)]
pub struct Target {
    pub id: TargetId,
    pub kind: RevealKind,
    pub group: GroupId,
    /// Registration order within the group, stable across removals.
    pub order: u32,
    pub fired: bool,
    pub counter: Option<Counter>,
    pub bar_width: Option<Width>,
}

impl Target {
    pub fn new(id: TargetId, kind: RevealKind, group: GroupId, order: u32) -> Self {
        Self { id, kind, group, order, fired: false, counter: None, bar_width: None }
    }

    pub fn with_counter(mut self, counter: Counter) -> Self {
        self.counter = Some(counter);
        self
    }

    pub fn with_bar_width(mut self, width: Width) -> Self {
        self.bar_width = Some(width);
        self
    }

    /// Mark the target as already revealed (e.g. the hero section, which is
    /// visible before any scrolling happens).
    pub fn already_fired(mut self) -> Self {
        self.fired = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_attaches_parts() {
        let t = Target::new(TargetId(1), RevealKind::StatCard, GroupId(0), 3)
            .with_counter(Counter::parse("128+").unwrap());
        assert!(t.counter.is_some());
        assert!(t.bar_width.is_none());
        assert!(!t.fired);
        assert_eq!(t.order, 3);
    }

    #[test]
    fn hero_section_starts_fired() {
        let t = Target::new(TargetId(2), RevealKind::Section, GroupId(1), 0).already_fired();
        assert!(t.fired);
    }

    #[test]
    fn observed_kinds_are_the_watched_five() {
        assert!(RevealKind::FadeIn.observed());
        assert!(RevealKind::SpeedBar.observed());
        assert!(!RevealKind::CoreBox.observed());
        assert!(!RevealKind::ProgressBar.observed());
        assert!(!RevealKind::Ripple.observed());
    }

    #[test]
    fn default_configs_differ_by_kind() {
        let fade = RevealKind::FadeIn.default_config();
        assert!((fade.threshold - 0.1).abs() < f32::EPSILON);
        assert!((fade.root_margin.bottom - -50.0).abs() < f32::EPSILON);

        let step = RevealKind::PipelineStep.default_config();
        assert!((step.threshold - 0.3).abs() < f32::EPSILON);

        let stat = RevealKind::StatCard.default_config();
        assert!((stat.threshold - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn kind_names_use_kebab_case() {
        let json = serde_json::to_string(&RevealKind::FadeIn).unwrap();
        assert_eq!(json, "\"fade-in\"");
        let kind: RevealKind = serde_json::from_str("\"speed-bar\"").unwrap();
        assert_eq!(kind, RevealKind::SpeedBar);
    }
}
