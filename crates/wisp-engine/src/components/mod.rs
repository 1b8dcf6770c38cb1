pub mod counter;
pub mod target;

pub use counter::{Counter, Suffix};
pub use target::{RevealKind, Target};
