//! Driver-facing traits
//!
//! These traits sit between the text rendering / polling logic and the
//! concrete panel and sensor drivers.

pub mod display;
pub mod sensor;

pub use display::PixelWriter;
pub use sensor::MotionSensor;
