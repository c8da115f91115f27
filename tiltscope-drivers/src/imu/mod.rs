//! Inertial sensor drivers

pub mod lsm6ds33;

pub use lsm6ds33::{Axis, ImuError, Lsm6ds33};
