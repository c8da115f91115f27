//! Tiltscope - IMU readout firmware
//!
//! Polls an LSM6DS33 over a software I2C master and renders the motion
//! values as text on an ILI9163C panel. Everything runs in one blocking
//! loop on the RP2040's first core; the loop period comes from the
//! free-running timer, not from a scheduler.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_time::Timer;
use {defmt_rtt as _, panic_probe as _};

use tiltscope_core::config::{parse_config, BoardConfig};
use tiltscope_core::traits::PixelWriter;
use tiltscope_drivers::bus::DisplayBus;
use tiltscope_drivers::dashboard::Dashboard;
use tiltscope_drivers::display::Ili9163;
use tiltscope_drivers::imu::Lsm6ds33;
use tiltscope_hal::{I2cConfig, SpiConfig, Stopwatch, WaitPolicy};
use tiltscope_hal_rp2040::{board, TickCounter};

/// Embedded board configuration (compiled into firmware)
/// Edit board.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../board.toml");

/// Readings between two periodic log lines (one per second at 50 Hz)
const LOG_EVERY: u32 = 50;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Tiltscope firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();

    // Display: SPI0 on GPIO18 (SCK) / GPIO19 (SDA), CS on GPIO17, A0 on GPIO20
    let spi = board::display_link(
        p.SPI0,
        p.PIN_18,
        p.PIN_19,
        SpiConfig {
            frequency: config.bus.spi_frequency_hz,
            ..SpiConfig::DISPLAY
        },
    );
    let bus = DisplayBus::new(spi, board::select_pin(p.PIN_17), board::select_pin(p.PIN_20));
    let mut lcd = Ili9163::new(bus, TickCounter::new(), &config.display);

    if let Err(e) = lcd.init() {
        error!("Display init failed: {}", Debug2Format(&e));
        halt();
    }
    info!("Display initialized");

    // IMU: software I2C on GPIO4 (SDA) / GPIO5 (SCL)
    let i2c = board::imu_bus(
        p.PIN_4,
        p.PIN_5,
        I2cConfig {
            frequency: config.bus.i2c_frequency_hz,
        },
        WaitPolicy::from_limit(config.bus.stretch_polls),
    );
    let mut imu = Lsm6ds33::new(i2c, config.imu);

    match imu.init() {
        Ok(()) => info!("IMU initialized at {=u8:#x}", config.imu.address),
        // Keep going: the readout loop reports every failed read
        Err(e) => warn!("IMU init failed: {}", Debug2Format(&e)),
    }

    let dashboard = Dashboard::new(&config);
    if let Err(e) = dashboard.show_banner(&mut lcd) {
        warn!("Banner draw failed: {}", Debug2Format(&e));
    }
    Timer::after_secs(1).await;

    if let Err(e) = lcd.clear(dashboard.style().background) {
        warn!("Clear failed: {}", Debug2Format(&e));
    }

    let clock = TickCounter::new();
    let period_us = config.ui.poll_period_ms.saturating_mul(1_000);
    let mut cycles: u32 = 0;
    let mut failures: u32 = 0;

    info!("Polling every {} ms", config.ui.poll_period_ms);

    loop {
        let watch = Stopwatch::start(&clock);

        match dashboard.refresh(&mut imu, &mut lcd) {
            Ok(reading) => {
                if cycles % LOG_EVERY == 0 {
                    debug!(
                        "accel {} g, gyro {} dps, temp {}",
                        reading.accel_g, reading.gyro_dps, reading.temperature
                    );
                }
            }
            Err(e) => {
                failures = failures.wrapping_add(1);
                warn!("Readout failed ({} total): {}", failures, Debug2Format(&e));
            }
        }

        cycles = cycles.wrapping_add(1);
        watch.wait_us(&clock, period_us);
    }
}

/// Parse the embedded board.toml, falling back to defaults
fn load_config() -> BoardConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Loaded board configuration");
            config
        }
        Err(e) => {
            warn!("board.toml rejected ({}), using defaults", e);
            BoardConfig::default()
        }
    }
}

/// Park the core after a fatal bring-up error
fn halt() -> ! {
    loop {
        cortex_m::asm::wfi();
    }
}
