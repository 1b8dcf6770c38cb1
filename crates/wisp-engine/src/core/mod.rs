pub mod ops;
pub mod registry;
pub mod time;
pub mod timer;

pub use ops::OpBuffer;
pub use registry::Registry;
pub use time::FixedStepper;
pub use timer::{DueTimer, TimerAction, TimerQueue, TimerToken};
