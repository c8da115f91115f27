//! Raw IMU samples and unit conversion
//!
//! One sample is the 14-byte block starting at the temperature output
//! register, read in a single burst. The device lays the block out as
//! little-endian words in the order temperature, gyro X/Y/Z, accel X/Y/Z.

use crate::config::{AccelRange, GyroRange};

/// Length of one burst-read sample block in bytes
pub const SAMPLE_LEN: usize = 14;

/// Raw signed counts from one burst read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ImuSample {
    /// Raw temperature word
    pub temperature: i16,
    /// Angular rate counts, X/Y/Z
    pub gyro: [i16; 3],
    /// Acceleration counts, X/Y/Z
    pub accel: [i16; 3],
}

impl ImuSample {
    /// Unpack a sample block
    pub fn from_bytes(block: &[u8; SAMPLE_LEN]) -> Self {
        let word = |i: usize| i16::from_le_bytes([block[i], block[i + 1]]);
        Self {
            temperature: word(0),
            gyro: [word(2), word(4), word(6)],
            accel: [word(8), word(10), word(12)],
        }
    }
}

/// Full-scale divisors turning raw counts into g and dps
///
/// Build it from the configured ranges so the divisors cannot drift away
/// from the range bits written to the sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Scale {
    pub accel_divisor: i16,
    pub gyro_divisor: i16,
}

impl Scale {
    pub const fn from_ranges(accel: AccelRange, gyro: GyroRange) -> Self {
        Self {
            accel_divisor: accel.divisor(),
            gyro_divisor: gyro.divisor(),
        }
    }

    /// Counts to g
    pub fn accel_g(&self, raw: i16) -> f32 {
        f32::from(raw) / f32::from(self.accel_divisor)
    }

    /// Counts to degrees per second
    pub fn gyro_dps(&self, raw: i16) -> f32 {
        f32::from(raw) / f32::from(self.gyro_divisor)
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::from_ranges(AccelRange::default(), GyroRange::default())
    }
}

/// A sample converted to physical units
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionReading {
    pub accel_g: [f32; 3],
    pub gyro_dps: [f32; 3],
    /// Raw temperature word, not scaled
    pub temperature: i16,
}

impl MotionReading {
    pub fn from_sample(sample: &ImuSample, scale: &Scale) -> Self {
        Self {
            accel_g: sample.accel.map(|a| scale.accel_g(a)),
            gyro_dps: sample.gyro.map(|g| scale.gyro_dps(g)),
            temperature: sample.temperature,
        }
    }
}
