//! Transaction-level bus drivers

pub mod i2c;
pub mod spi;

pub use i2c::{BusOp, BusState, I2cError, I2cSequencer, NackStage, ReadLength};
pub use spi::DisplayBus;
