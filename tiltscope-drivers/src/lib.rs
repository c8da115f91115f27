//! Peripheral drivers
//!
//! Everything here is written against the `tiltscope-hal` traits and
//! blocks until the hardware is done:
//!
//! - I2C transaction sequencer (register writes, single and burst reads)
//! - Command/data framing for SPI display controllers
//! - ILI9163C display controller
//! - 5x8 bitmap font rasterizer
//! - LSM6DS33 inertial sensor
//! - Readout screen composition

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod bus;
pub mod dashboard;
pub mod display;
pub mod font;
pub mod imu;

#[cfg(test)]
pub(crate) mod mock;
