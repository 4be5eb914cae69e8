//! Time subsystem.
//!
//! One `FrameClock` per render loop; call `tick()` once per presented frame to
//! obtain a `FrameTime`. `FrameTime::elapsed` is the time source the animation
//! kernels are driven by.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
