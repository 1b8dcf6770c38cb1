pub mod queue;

pub use queue::{InputQueue, PageInput};
