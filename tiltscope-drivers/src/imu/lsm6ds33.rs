//! LSM6DS33 accelerometer and gyroscope over I2C
//!
//! The device auto-increments its register pointer during a burst read
//! once IF_INC is set in CTRL3_C, so one transaction starting at
//! OUT_TEMP_L returns temperature, gyro and accelerometer words.

use tiltscope_core::config::ImuConfig;
use tiltscope_core::sample::{ImuSample, Scale, SAMPLE_LEN};
use tiltscope_core::traits::MotionSensor;
use tiltscope_hal::I2cMaster;

use crate::bus::{I2cError, I2cSequencer, ReadLength};

/// Register addresses
pub mod reg {
    pub const WHO_AM_I: u8 = 0x0F;
    pub const CTRL1_XL: u8 = 0x10;
    pub const CTRL2_G: u8 = 0x11;
    pub const CTRL3_C: u8 = 0x12;
    pub const OUT_TEMP_L: u8 = 0x20;
    pub const OUTX_L_G: u8 = 0x22;
    pub const OUTX_L_XL: u8 = 0x28;
}

/// Expected value of `WHO_AM_I`
pub const WHO_AM_I_VALUE: u8 = 0x69;

/// IMU errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ImuError<E> {
    /// Bus transaction failed
    I2c(I2cError<E>),
    /// Invalid `WHO_AM_I` value (contains the value read)
    InvalidDevice(u8),
}

impl<E> From<I2cError<E>> for ImuError<E> {
    fn from(e: I2cError<E>) -> Self {
        ImuError::I2c(e)
    }
}

/// Measurement axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    const fn offset(self) -> u8 {
        match self {
            Axis::X => 0,
            Axis::Y => 2,
            Axis::Z => 4,
        }
    }
}

pub struct Lsm6ds33<B> {
    i2c: I2cSequencer<B>,
    config: ImuConfig,
}

impl<B: I2cMaster> Lsm6ds33<B> {
    pub fn new(bus: B, config: ImuConfig) -> Self {
        Self {
            i2c: I2cSequencer::new(bus, config.ack_policy),
            config,
        }
    }

    pub fn free(self) -> B {
        self.i2c.free()
    }

    pub fn config(&self) -> &ImuConfig {
        &self.config
    }

    /// Bus-level state, for diagnostics
    pub fn sequencer(&self) -> &I2cSequencer<B> {
        &self.i2c
    }

    /// Probe the device (if enabled) and write the control registers
    pub fn init(&mut self) -> Result<(), ImuError<B::Error>> {
        if self.config.check_identity {
            let id = self.who_am_i()?;
            if id != WHO_AM_I_VALUE {
                return Err(ImuError::InvalidDevice(id));
            }
        }
        self.configure()
    }

    /// Write CTRL1_XL, CTRL2_G and CTRL3_C, one transaction each
    pub fn configure(&mut self) -> Result<(), ImuError<B::Error>> {
        let address = self.config.address;
        self.i2c
            .write_register(address, reg::CTRL1_XL, self.config.ctrl1_xl())?;
        self.i2c
            .write_register(address, reg::CTRL2_G, self.config.ctrl2_g())?;
        self.i2c
            .write_register(address, reg::CTRL3_C, self.config.ctrl3_c)?;

        #[cfg(feature = "defmt")]
        defmt::info!(
            "lsm6ds33: CTRL1_XL={=u8:#x} CTRL2_G={=u8:#x} CTRL3_C={=u8:#x}",
            self.config.ctrl1_xl(),
            self.config.ctrl2_g(),
            self.config.ctrl3_c
        );

        Ok(())
    }

    pub fn who_am_i(&mut self) -> Result<u8, ImuError<B::Error>> {
        self.read_register(reg::WHO_AM_I)
    }

    pub fn read_register(&mut self, register: u8) -> Result<u8, ImuError<B::Error>> {
        Ok(self.i2c.read_register(self.config.address, register)?)
    }

    /// Burst read starting at `register`; returns the byte count
    pub fn read_burst(
        &mut self,
        register: u8,
        buf: &mut [u8],
        length: ReadLength,
    ) -> Result<usize, ImuError<B::Error>> {
        Ok(self
            .i2c
            .burst_read(self.config.address, register, buf, length)?)
    }

    /// Read a little-endian word from `register` and `register + 1`
    pub fn read_word(&mut self, register: u8) -> Result<i16, ImuError<B::Error>> {
        let mut bytes = [0u8; 2];
        self.read_burst(register, &mut bytes, ReadLength::Exact(2))?;
        Ok(i16::from_le_bytes(bytes))
    }

    /// Raw accelerometer counts on one axis
    pub fn read_accel_axis(&mut self, axis: Axis) -> Result<i16, ImuError<B::Error>> {
        self.read_word(reg::OUTX_L_XL + axis.offset())
    }

    /// Raw gyro counts on one axis
    pub fn read_gyro_axis(&mut self, axis: Axis) -> Result<i16, ImuError<B::Error>> {
        self.read_word(reg::OUTX_L_G + axis.offset())
    }
}

impl<B: I2cMaster> MotionSensor for Lsm6ds33<B> {
    type Error = ImuError<B::Error>;

    /// One 14-byte burst from OUT_TEMP_L
    fn read_sample(&mut self) -> Result<ImuSample, Self::Error> {
        let mut block = [0u8; SAMPLE_LEN];
        self.read_burst(reg::OUT_TEMP_L, &mut block, ReadLength::Exact(SAMPLE_LEN))?;
        Ok(ImuSample::from_bytes(&block))
    }

    fn scale(&self) -> Scale {
        self.config.scale()
    }
}
