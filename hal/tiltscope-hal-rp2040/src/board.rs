//! Board wiring for the RP2040 bring-up board
//!
//! Pin assignments are fixed (not runtime configurable):
//!
//! | Signal | GPIO | Function |
//! | ------ | ---- | -------- |
//! | Display SCK | 18 | SPI0 clock |
//! | Display SDA | 19 | SPI0 TX |
//! | Display CS | 17 | chip-select, active low |
//! | Display A0 | 20 | command (low) / data (high) |
//! | IMU SDA | 4 | open-drain, external pull-up |
//! | IMU SCL | 5 | open-drain, external pull-up |

use embassy_rp::gpio::{Level, Output, OutputOpenDrain, Pin};
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{self, Blocking, ClkPin, MosiPin, Phase, Polarity, Spi};
use embassy_rp::Peri;

use tiltscope_hal::gpio::{EhOpenDrain, EhOutput};
use tiltscope_hal::spi::{self as hal_spi, EhSpi};
use tiltscope_hal::{BitBangI2c, I2cConfig, SpiConfig, WaitPolicy};

use crate::timer::TickCounter;

/// Push-pull select line (chip-select or command/data)
pub type SelectPin<'d> = EhOutput<Output<'d>>;

/// Display SPI link
pub type DisplayLink<'d> = EhSpi<Spi<'d, SPI0, Blocking>>;

/// Open-drain I2C line
pub type I2cLine<'d> = EhOpenDrain<OutputOpenDrain<'d>>;

/// Software I2C master wired to the IMU
pub type ImuBus<'d> = BitBangI2c<I2cLine<'d>, I2cLine<'d>, TickCounter>;

/// Create the display SPI link (transmit only)
pub fn display_link<'d>(
    spi: Peri<'d, SPI0>,
    clk: Peri<'d, impl ClkPin<SPI0> + 'd>,
    mosi: Peri<'d, impl MosiPin<SPI0> + 'd>,
    config: SpiConfig,
) -> DisplayLink<'d> {
    let mut rp_config = spi::Config::default();
    rp_config.frequency = config.frequency;
    rp_config.polarity = match config.polarity {
        hal_spi::Polarity::IdleLow => Polarity::IdleLow,
        hal_spi::Polarity::IdleHigh => Polarity::IdleHigh,
    };
    rp_config.phase = match config.phase {
        hal_spi::Phase::CaptureOnFirstTransition => Phase::CaptureOnFirstTransition,
        hal_spi::Phase::CaptureOnSecondTransition => Phase::CaptureOnSecondTransition,
    };

    EhSpi(Spi::new_blocking_txonly(spi, clk, mosi, rp_config))
}

/// Create an idle-high select line
pub fn select_pin<'d>(pin: Peri<'d, impl Pin>) -> SelectPin<'d> {
    EhOutput::new(Output::new(pin, Level::High), true)
}

/// Create the software I2C master on two open-drain pins
pub fn imu_bus<'d>(
    sda: Peri<'d, impl Pin>,
    scl: Peri<'d, impl Pin>,
    config: I2cConfig,
    wait: WaitPolicy,
) -> ImuBus<'d> {
    let sda = EhOpenDrain::new(OutputOpenDrain::new(sda, Level::High));
    let scl = EhOpenDrain::new(OutputOpenDrain::new(scl, Level::High));
    BitBangI2c::new(sda, scl, TickCounter::new(), config, wait)
}
