use serde::{Deserialize, Serialize};

use crate::components::target::RevealKind;

/// Page manifest describing every element group and widget the engine
/// drives. Built in code by a `Page`, or loaded from a JSON string at init.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageManifest {
    /// Observed reveal groups, in the order their observers are created.
    #[serde(default)]
    pub groups: Vec<GroupSpec>,
    /// Navigation glue: menu toggle and smooth anchor scrolling.
    #[serde(default)]
    pub nav: Option<NavSpec>,
    /// Accordion of expandable items (one open at a time).
    #[serde(default)]
    pub accordion: Option<AccordionSpec>,
    /// Interactive cores widget.
    #[serde(default)]
    pub cores: Option<CoresSpec>,
    /// Click ripple on matching buttons.
    #[serde(default)]
    pub ripple: Option<RippleSpec>,
    /// Card hover icon nudge.
    #[serde(default)]
    pub hover: Option<HoverSpec>,
    /// Logo easter egg.
    #[serde(default)]
    pub emblem: Option<EmblemSpec>,
    /// Scroll parallax for decorative elements.
    #[serde(default)]
    pub parallax: Option<ParallaxSpec>,
    /// Inject the fixed scroll progress bar.
    #[serde(default)]
    pub progress_bar: bool,
    /// Fade the body in once the window loads.
    #[serde(default)]
    pub body_fade: bool,
    /// Styled console banner printed once at init.
    #[serde(default)]
    pub banner: Option<BannerSpec>,
}

impl PageManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// One observed element group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupSpec {
    /// Selector for the observed elements.
    pub selector: String,
    /// Reveal behavior shared by the group.
    pub kind: RevealKind,
    /// Selector, within each observed element, of the child that receives
    /// ops (the stat number, the bar fill). Defaults to the element itself.
    #[serde(default)]
    pub inner: Option<String>,
    /// Observer threshold override.
    #[serde(default)]
    pub threshold: Option<f32>,
    /// Observer root margin override, CSS px shorthand.
    #[serde(default)]
    pub root_margin: Option<String>,
    /// Stagger step override for staggered kinds, in ms.
    #[serde(default)]
    pub stagger_ms: Option<f64>,
    /// Class applied on reveal for class-driven kinds.
    #[serde(default)]
    pub reveal_class: Option<String>,
    /// Selector matching elements that start revealed (the hero section).
    #[serde(default)]
    pub start_visible: Option<String>,
}

impl GroupSpec {
    pub fn new(selector: &str, kind: RevealKind) -> Self {
        Self {
            selector: selector.to_string(),
            kind,
            inner: None,
            threshold: None,
            root_margin: None,
            stagger_ms: None,
            reveal_class: None,
            start_visible: None,
        }
    }

    pub fn with_inner(mut self, selector: &str) -> Self {
        self.inner = Some(selector.to_string());
        self
    }

    pub fn with_start_visible(mut self, selector: &str) -> Self {
        self.start_visible = Some(selector.to_string());
        self
    }
}

/// Navigation glue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavSpec {
    /// Menu toggle button.
    #[serde(default)]
    pub menu_button: Option<String>,
    /// Menu element whose active class is toggled. Clicks landing outside
    /// both the button and the menu close it, as do clicks on its links.
    #[serde(default)]
    pub menu: Option<String>,
    /// Class toggled on the open menu.
    #[serde(default = "default_active_class")]
    pub active_class: String,
    /// Height of the fixed header, subtracted when scrolling to anchors.
    #[serde(default = "default_anchor_offset")]
    pub anchor_offset_px: f64,
    /// Button that scrolls to a section on click.
    #[serde(default)]
    pub start_button: Option<StartButtonSpec>,
}

/// A call-to-action button that scrolls to a section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartButtonSpec {
    pub button: String,
    pub target: String,
}

/// Accordion behavior: clicking a question toggles its item and closes the
/// rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccordionSpec {
    /// Selector for the items.
    pub item: String,
    /// Selector, within an item, for the clickable question.
    pub question: String,
    #[serde(default = "default_active_class")]
    pub active_class: String,
}

/// Interactive cores widget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoresSpec {
    /// Container the boxes are rebuilt into.
    pub display: String,
    /// Count buttons.
    pub buttons: String,
    /// Attribute on a button carrying its core count.
    #[serde(default = "default_count_attr")]
    pub count_attr: String,
    /// Core count rendered at startup.
    #[serde(default = "default_initial_cores")]
    pub initial: u32,
    /// Class marking the selected button.
    #[serde(default = "default_active_class")]
    pub active_class: String,
    /// Class given to each generated box.
    #[serde(default = "default_core_class")]
    pub box_class: String,
    /// Label prefix inside each box.
    #[serde(default = "default_core_label")]
    pub label: String,
    /// Status line inside each box.
    #[serde(default = "default_core_status")]
    pub status: String,
}

/// Click ripple.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RippleSpec {
    /// Buttons that ripple on click.
    pub selector: String,
}

/// Card hover icon nudge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoverSpec {
    /// Hoverable cards.
    pub card: String,
    /// Icon inside the card that takes the pose.
    pub icon: String,
}

/// Logo easter egg.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmblemSpec {
    pub selector: String,
    /// Clicks required to trigger the egg.
    #[serde(default = "default_emblem_clicks")]
    pub clicks: u32,
}

/// Scroll parallax.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParallaxSpec {
    pub selector: String,
}

/// Console banner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BannerSpec {
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
}

fn default_active_class() -> String {
    "active".to_string()
}

fn default_anchor_offset() -> f64 {
    80.0
}

fn default_count_attr() -> String {
    "data-cores".to_string()
}

fn default_initial_cores() -> u32 {
    1
}

fn default_core_class() -> String {
    "core".to_string()
}

fn default_core_label() -> String {
    "Core".to_string()
}

fn default_core_status() -> String {
    "Processing...".to_string()
}

fn default_emblem_clicks() -> u32 {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_manifest_with_groups_and_widgets() {
        let json = r##"{
            "groups": [
                { "selector": ".fade-in", "kind": "fade-in" },
                { "selector": ".pipeline-step", "kind": "pipeline-step", "stagger_ms": 150 },
                { "selector": ".stat-card", "kind": "stat-card", "inner": ".stat-number", "threshold": 0.5 }
            ],
            "cores": { "display": "#cores-display", "buttons": ".core-btn", "initial": 1 },
            "emblem": { "selector": ".logo" },
            "progress_bar": true
        }"##;
        let manifest = PageManifest::from_json(json).unwrap();

        assert_eq!(manifest.groups.len(), 3);
        assert_eq!(manifest.groups[0].kind, RevealKind::FadeIn);
        assert_eq!(manifest.groups[1].stagger_ms, Some(150.0));
        assert_eq!(manifest.groups[2].inner.as_deref(), Some(".stat-number"));
        assert!(manifest.progress_bar);
        assert!(!manifest.body_fade);

        let cores = manifest.cores.unwrap();
        assert_eq!(cores.count_attr, "data-cores");
        assert_eq!(cores.box_class, "core");
        assert_eq!(cores.label, "Core");
        assert_eq!(cores.status, "Processing...");

        assert_eq!(manifest.emblem.unwrap().clicks, 5);
    }

    #[test]
    fn parse_empty_manifest_is_all_defaults() {
        let manifest = PageManifest::from_json("{}").unwrap();
        assert!(manifest.groups.is_empty());
        assert!(manifest.nav.is_none());
        assert!(!manifest.progress_bar);
        assert!(manifest.banner.is_none());
    }

    #[test]
    fn nav_defaults_fill_in() {
        let json = r#"{ "nav": { "menu_button": ".menu-btn", "menu": ".nav-links" } }"#;
        let manifest = PageManifest::from_json(json).unwrap();
        let nav = manifest.nav.unwrap();
        assert_eq!(nav.active_class, "active");
        assert_eq!(nav.anchor_offset_px, 80.0);
        assert!(nav.start_button.is_none());
    }

    #[test]
    fn group_builder_mirrors_json() {
        let spec = GroupSpec::new(".speed-item", RevealKind::SpeedBar).with_inner(".bar-fill");
        assert_eq!(spec.selector, ".speed-item");
        assert_eq!(spec.inner.as_deref(), Some(".bar-fill"));
        assert!(spec.threshold.is_none());
    }

    #[test]
    fn bad_json_is_an_error() {
        assert!(PageManifest::from_json("{ groups: nope }").is_err());
    }
}
