//! Display controller drivers

pub mod command;
pub mod ili9163;

pub use command::{InitStep, Payload, INIT_SEQUENCE};
pub use ili9163::{DisplayError, Ili9163};
