pub mod emblem;
pub mod ripple;

pub use emblem::EmblemState;
pub use ripple::{Ripple, RippleState};
