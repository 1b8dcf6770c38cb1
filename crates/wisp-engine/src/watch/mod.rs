pub mod config;
pub mod group;

pub use config::{RootMargin, WatchConfig};
pub use group::WatchGroup;
