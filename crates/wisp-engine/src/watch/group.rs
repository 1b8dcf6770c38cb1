use crate::components::target::RevealKind;
use crate::watch::config::WatchConfig;

/// One observer configuration plus the reveal options its targets share.
///
/// The bridge creates one DOM observer per group; the engine only keeps the
/// tuning here so tests can drive crossings without a DOM.
#[derive(Debug, Clone)]
pub struct WatchGroup {
    pub kind: RevealKind,
    pub config: WatchConfig,
    /// Per-index reveal delay for staggered kinds; `None` uses the engine default.
    pub stagger_step_ms: Option<f64>,
    /// Class toggled on reveal for class-driven kinds.
    pub reveal_class: String,
}

impl WatchGroup {
    pub fn new(kind: RevealKind) -> Self {
        Self {
            kind,
            config: kind.default_config(),
            stagger_step_ms: None,
            reveal_class: "visible".to_string(),
        }
    }

    pub fn with_config(mut self, config: WatchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_stagger_step_ms(mut self, ms: f64) -> Self {
        self.stagger_step_ms = Some(ms);
        self
    }

    pub fn with_reveal_class(mut self, class: &str) -> Self {
        self.reveal_class = class.to_string();
        self
    }
}
