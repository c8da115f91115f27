//! Configuration type definitions

use core::ops::RangeInclusive;

use heapless::String;

use super::ranges::{AccelRange, GyroRange};
use crate::color::Rgb565;
use crate::sample::Scale;

/// Maximum banner length
pub const MAX_BANNER_LEN: usize = 32;

/// Lines of ILI9163C memory on each axis; addresses run 0..GRAM_LINES
pub const GRAM_LINES: u16 = 162;

/// Highest addressable column or page
pub const LAST_GRAM_LINE: u16 = GRAM_LINES - 1;

/// Accepted display clock range
pub const SPI_FREQUENCY_HZ: RangeInclusive<u32> = 100_000..=62_500_000;

/// Accepted software I2C clock range
pub const I2C_FREQUENCY_HZ: RangeInclusive<u32> = 1_000..=1_000_000;

/// Accepted poll periods
pub const POLL_PERIOD_MS: RangeInclusive<u32> = 1..=60_000;

/// CTRL3_C register auto-increment bit, required by burst reads
pub const CTRL3_IF_INC: u8 = 0x04;

/// What the I2C sequencer does when a byte is not acknowledged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AckPolicy {
    /// Log and keep clocking the transaction
    Ignore,
    /// Release the bus with a stop and report the failure
    #[default]
    Abort,
}

/// Inertial sensor configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ImuConfig {
    /// 7-bit device address
    pub address: u8,
    pub accel_range: AccelRange,
    pub gyro_range: GyroRange,
    /// Accelerometer output data rate nibble (CTRL1_XL bits 7:4)
    pub accel_odr: u8,
    /// Anti-aliasing bandwidth (CTRL1_XL bits 1:0)
    pub accel_bandwidth: u8,
    /// Gyro output data rate nibble (CTRL2_G bits 7:4)
    pub gyro_odr: u8,
    /// CTRL3_C value, 0x04 sets IF_INC for burst reads
    pub ctrl3_c: u8,
    /// Probe WHO_AM_I before configuring
    pub check_identity: bool,
    pub ack_policy: AckPolicy,
}

impl ImuConfig {
    /// CTRL1_XL register value
    pub const fn ctrl1_xl(&self) -> u8 {
        ((self.accel_odr & 0x0F) << 4) | (self.accel_range.bits() << 2) | (self.accel_bandwidth & 0x03)
    }

    /// CTRL2_G register value
    pub const fn ctrl2_g(&self) -> u8 {
        ((self.gyro_odr & 0x0F) << 4) | (self.gyro_range.bits() << 2)
    }

    /// Divisors matching the configured ranges
    pub const fn scale(&self) -> Scale {
        Scale::from_ranges(self.accel_range, self.gyro_range)
    }
}

impl Default for ImuConfig {
    fn default() -> Self {
        Self {
            address: 0x6B,
            accel_range: AccelRange::G2,
            gyro_range: GyroRange::Dps245,
            accel_odr: 0b1000,
            accel_bandwidth: 0b01,
            gyro_odr: 0b1000,
            ctrl3_c: 0x04,
            check_identity: true,
            ack_policy: AckPolicy::Abort,
        }
    }
}

/// Display panel configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayConfig {
    pub width: u16,
    pub height: u16,
    /// MADCTL value written at the end of init
    pub orientation: u8,
    pub foreground: Rgb565,
    pub background: Rgb565,
    /// Glyph pixels beyond this coordinate on either axis are skipped
    pub clip_bound: u16,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 128,
            height: 128,
            orientation: 0x08,
            foreground: Rgb565::RED,
            background: Rgb565::BLACK,
            clip_bound: 128,
        }
    }
}

/// Bus timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusConfig {
    pub i2c_frequency_hz: u32,
    pub spi_frequency_hz: u32,
    /// Clock-stretch polls before giving up; 0 waits forever
    pub stretch_polls: u32,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            i2c_frequency_hz: 100_000,
            spi_frequency_hz: 12_000_000,
            stretch_polls: 0,
        }
    }
}

/// Readout screen layout
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UiConfig {
    /// Sensor poll period
    pub poll_period_ms: u32,
    /// Top-left corner of the first readout line
    pub origin_x: u16,
    pub origin_y: u16,
    /// Vertical distance between readout lines
    pub line_spacing: u16,
    pub banner: String<MAX_BANNER_LEN>,
    pub banner_x: u16,
    pub banner_y: u16,
}

impl Default for UiConfig {
    fn default() -> Self {
        let mut banner = String::new();
        // Fits MAX_BANNER_LEN
        let _ = banner.push_str("Hello world 1337!");
        Self {
            poll_period_ms: 20,
            origin_x: 5,
            origin_y: 12,
            line_spacing: 15,
            banner,
            banner_x: 28,
            banner_y: 32,
        }
    }
}

/// Complete board configuration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardConfig {
    pub imu: ImuConfig,
    pub display: DisplayConfig,
    pub bus: BusConfig,
    pub ui: UiConfig,
}

impl BoardConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registers() {
        let imu = ImuConfig::default();
        assert_eq!(imu.ctrl1_xl(), 0x81);
        assert_eq!(imu.ctrl2_g(), 0x80);
        assert_eq!(imu.ctrl3_c, 0x04);
        assert_eq!(imu.address, 0b110_1011);
    }

    #[test]
    fn test_range_changes_register_and_scale_together() {
        let imu = ImuConfig {
            accel_range: AccelRange::G8,
            gyro_range: GyroRange::Dps2000,
            ..ImuConfig::default()
        };
        assert_eq!(imu.ctrl1_xl(), 0x8D);
        assert_eq!(imu.ctrl2_g(), 0x8C);
        assert_eq!(imu.scale().accel_divisor, 4095);
        assert_eq!(imu.scale().gyro_divisor, 16);
    }

    #[test]
    fn test_ui_defaults() {
        let ui = UiConfig::default();
        assert_eq!(ui.banner.as_str(), "Hello world 1337!");
        assert_eq!(ui.poll_period_ms, 20);
        assert_eq!((ui.origin_x, ui.origin_y, ui.line_spacing), (5, 12, 15));
    }
}
