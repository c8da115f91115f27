//! Board-agnostic core types for the tiltscope firmware
//!
//! This crate contains everything that does not touch a bus:
//!
//! - RGB565 colors
//! - Raw IMU samples and their conversion to physical units
//! - Full-scale ranges paired with their divisors
//! - Text formatting of the readout screen
//! - Board configuration and its TOML-subset parser
//! - Driver-facing traits (pixel sink, motion sensor)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod color;
pub mod config;
pub mod readout;
pub mod sample;
pub mod traits;

pub use color::Rgb565;
pub use sample::{ImuSample, MotionReading, Scale};
