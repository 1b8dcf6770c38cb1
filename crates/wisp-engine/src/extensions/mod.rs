// extensions/mod.rs
//
// Optional extension modules for Wisp.
// Decoupled from Target/Registry, pages and effects opt in as needed.

pub mod easing;

pub use easing::{ease, lerp, Easing};
