use crate::api::engine::{Engine, EngineConfig};
use crate::api::manifest::PageManifest;

/// Implemented by a page to describe and drive its reveal behavior.
///
/// Most pages only provide a manifest; the bridge wires everything else.
/// `init` and `update` exist for pages that want to talk to the engine
/// directly, past what the manifest can express.
pub trait Page {
    /// Declarative wiring: selectors, watch groups, widgets.
    fn manifest(&self) -> PageManifest;

    /// Engine tuning. The bridge overwrites `reduced_motion` with the
    /// user's media preference before the engine is built.
    fn config(&self) -> EngineConfig {
        EngineConfig::default()
    }

    /// Runs once, after every manifest element has been registered.
    fn init(&mut self, _engine: &mut Engine) {}

    /// Runs every frame, before the engine tick.
    fn update(&mut self, _engine: &mut Engine) {}
}
