// api/mod.rs
//
// Public surface of the engine: the orchestrator, the page trait, the
// manifest format, and the op vocabulary shared with bridges.

pub mod engine;
pub mod manifest;
pub mod page;
pub mod types;

pub use engine::{Engine, EngineConfig, TargetDesc};
pub use manifest::PageManifest;
pub use page::Page;
pub use types::{GroupId, StyleOp, TargetId};
