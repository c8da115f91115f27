//! RP2040-specific HAL for the Tiltscope firmware
//!
//! This crate provides RP2040 implementations of the shared
//! `tiltscope-hal` traits:
//!
//! - Blocking SPI for the display link (implements `tiltscope_hal::SpiBus`)
//! - Push-pull GPIOs for chip-select and command/data select
//! - Open-drain GPIOs driving the software I2C master
//! - Timer-backed cycle counter for settle delays and polling periods

#![no_std]

pub mod board;
pub mod timer;

// Re-export shared traits from tiltscope-hal for convenience
pub use tiltscope_hal::{CycleCounter, I2cMaster, OutputPin, SpiBus};

pub use board::{DisplayLink, ImuBus, SelectPin};
pub use timer::TickCounter;
