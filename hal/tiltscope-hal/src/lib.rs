//! Tiltscope Hardware Abstraction Layer
//!
//! This crate defines the bus-level traits the drivers are written
//! against. Chip-specific crates implement them on real peripherals, and
//! the driver tests implement them with recording mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  tiltscope-drivers (display, font, IMU) │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  tiltscope-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!            ┌─────────────────┐
//!            │ tiltscope-hal-  │
//!            │     rp2040      │
//!            └─────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`i2c::I2cMaster`] - Bit-level I2C master sequencing
//! - [`spi::SpiBus`] - Byte-wide full-duplex SPI
//! - [`timer::CycleCounter`] - Free-running counter for settle delays
//!
//! Every operation blocks until the hardware reports completion. How
//! long a caller is willing to wait is expressed with [`poll::WaitPolicy`].

#![no_std]
#![deny(unsafe_code)]

pub mod bitbang;
pub mod gpio;
pub mod i2c;
pub mod poll;
pub mod spi;
pub mod timer;

// Re-export key traits at crate root for convenience
pub use bitbang::{BitBangError, BitBangI2c};
pub use gpio::{InputPin, IoPin, OutputPin};
pub use i2c::{Ack, I2cConfig, I2cMaster};
pub use poll::{poll_until, PollTimeout, WaitPolicy};
pub use spi::{SpiBus, SpiConfig};
pub use timer::{CycleCounter, Stopwatch};
