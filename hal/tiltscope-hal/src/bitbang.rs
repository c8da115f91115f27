//! Software I2C master over two open-drain GPIOs
//!
//! Implements [`I2cMaster`] by driving SDA/SCL directly. Setting a line
//! "high" releases it to the pull-up; a slave may hold SCL low to stretch
//! the clock, which is polled under the configured [`WaitPolicy`].
//!
//! Bits are shifted MSB first. SDA only changes while SCL is low, except
//! for start/stop conditions.

use crate::gpio::IoPin;
use crate::i2c::{Ack, I2cConfig, I2cMaster};
use crate::poll::{poll_until, WaitPolicy};
use crate::timer::CycleCounter;

/// Errors from the software I2C master
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitBangError {
    /// SCL stayed low after release for longer than the wait policy allows
    ClockStretchTimeout,
}

/// Bit-banged I2C master
pub struct BitBangI2c<SDA, SCL, C> {
    sda: SDA,
    scl: SCL,
    counter: C,
    half_period_us: u32,
    wait: WaitPolicy,
}

impl<SDA, SCL, C> BitBangI2c<SDA, SCL, C>
where
    SDA: IoPin,
    SCL: IoPin,
    C: CycleCounter,
{
    /// Create a master and release both lines
    pub fn new(mut sda: SDA, mut scl: SCL, counter: C, config: I2cConfig, wait: WaitPolicy) -> Self {
        sda.set_high();
        scl.set_high();
        Self {
            sda,
            scl,
            counter,
            half_period_us: config.half_period_us(),
            wait,
        }
    }

    /// Release the pins and counter
    pub fn free(self) -> (SDA, SCL, C) {
        (self.sda, self.scl, self.counter)
    }

    fn half_delay(&mut self) {
        self.counter.delay_us(self.half_period_us);
    }

    /// Release SCL and wait for any clock stretching to end
    fn release_scl(&mut self) -> Result<(), BitBangError> {
        self.scl.set_high();
        let scl = &mut self.scl;
        poll_until(self.wait, || scl.is_high()).map_err(|_| BitBangError::ClockStretchTimeout)
    }

    /// SDA falls while SCL is high
    fn start_condition(&mut self) -> Result<(), BitBangError> {
        self.sda.set_high();
        self.half_delay();
        self.release_scl()?;
        self.half_delay();
        self.sda.set_low();
        self.half_delay();
        self.scl.set_low();
        Ok(())
    }

    fn write_bit(&mut self, high: bool) -> Result<(), BitBangError> {
        self.sda.set_state(high);
        self.half_delay();
        self.release_scl()?;
        self.half_delay();
        self.scl.set_low();
        Ok(())
    }

    fn read_bit(&mut self) -> Result<bool, BitBangError> {
        self.sda.set_high();
        self.half_delay();
        self.release_scl()?;
        let bit = self.sda.is_high();
        self.half_delay();
        self.scl.set_low();
        Ok(bit)
    }
}

impl<SDA, SCL, C> I2cMaster for BitBangI2c<SDA, SCL, C>
where
    SDA: IoPin,
    SCL: IoPin,
    C: CycleCounter,
{
    type Error = BitBangError;

    fn start(&mut self) -> Result<(), Self::Error> {
        self.start_condition()
    }

    fn restart(&mut self) -> Result<(), Self::Error> {
        // SCL is low here, so raising SDA first is not a stop
        self.start_condition()
    }

    fn send(&mut self, byte: u8) -> Result<Ack, Self::Error> {
        for bit in (0..8).rev() {
            self.write_bit((byte >> bit) & 1 == 1)?;
        }
        let released = self.read_bit()?;
        Ok(if released { Ack::Nack } else { Ack::Ack })
    }

    fn recv(&mut self) -> Result<u8, Self::Error> {
        let mut byte = 0u8;
        for _ in 0..8 {
            byte = (byte << 1) | self.read_bit()? as u8;
        }
        Ok(byte)
    }

    fn ack(&mut self, ack: Ack) -> Result<(), Self::Error> {
        self.write_bit(ack.bit() == 1)?;
        self.sda.set_high();
        Ok(())
    }

    fn stop(&mut self) -> Result<(), Self::Error> {
        self.sda.set_low();
        self.half_delay();
        self.release_scl()?;
        self.half_delay();
        self.sda.set_high();
        self.half_delay();
        Ok(())
    }
}
