pub mod counter;
pub mod reveal;
pub mod scrollfx;
