pub mod api;
pub mod components;
pub mod core;
pub mod effects;
pub mod extensions;
pub mod input;
pub mod systems;
pub mod watch;

// Re-export key types at crate root for convenience
pub use api::engine::{Engine, EngineConfig, TargetDesc};
pub use api::manifest::{
    AccordionSpec, BannerSpec, CoresSpec, EmblemSpec, GroupSpec, HoverSpec, NavSpec,
    PageManifest, ParallaxSpec, RippleSpec, StartButtonSpec,
};
pub use api::page::Page;
pub use api::types::{
    AnimationSpec, GroupId, StyleOp, TargetId, Transform, TransitionProperty, TransitionSpec,
    Width,
};
pub use components::counter::{Counter, Suffix};
pub use components::target::{RevealKind, Target};
pub use core::ops::OpBuffer;
pub use core::registry::Registry;
pub use core::time::FixedStepper;
pub use core::timer::{DueTimer, TimerAction, TimerQueue, TimerToken};
pub use effects::emblem::EmblemState;
pub use effects::ripple::{Ripple, RippleState};
pub use input::queue::{InputQueue, PageInput};
pub use watch::config::{RootMargin, WatchConfig};
pub use watch::group::WatchGroup;

// Extensions, decoupled optional helpers
pub use extensions::{ease, lerp, Easing};
