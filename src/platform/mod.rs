//! Platform abstraction layer
//!
//! The simulation never reads a clock. Display callbacks (requestAnimationFrame
//! on the web, a sleep loop on native) feed wall-clock deltas here and get
//! back a number of fixed ticks to run.

pub mod clock;

pub use clock::FrameClock;
