//! Command/data framing for SPI display controllers
//!
//! Every byte (or 16-bit word) is framed on its own: the data/command
//! line is set first, then chip-select goes low for the transfer and back
//! high afterwards. Command bytes go out with D/C low, parameters and
//! pixel data with D/C high.

use tiltscope_hal::{OutputPin, SpiBus};

/// SPI bus plus the two framing lines of a display controller
pub struct DisplayBus<SPI, CS, DC> {
    spi: SPI,
    cs: CS,
    dc: DC,
}

impl<SPI, CS, DC> DisplayBus<SPI, CS, DC>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
{
    /// Take the bus and park both lines high (deselected, data)
    pub fn new(spi: SPI, mut cs: CS, mut dc: DC) -> Self {
        cs.set_high();
        dc.set_high();
        Self { spi, cs, dc }
    }

    pub fn free(self) -> (SPI, CS, DC) {
        (self.spi, self.cs, self.dc)
    }

    /// Run one chip-select frame; CS is released even if a transfer fails
    fn frame(&mut self, bytes: &[u8]) -> Result<(), SPI::Error> {
        self.cs.set_low();
        let result = self.spi.write(bytes);
        self.cs.set_high();
        result
    }

    /// Send a command byte
    pub fn command(&mut self, cmd: u8) -> Result<(), SPI::Error> {
        self.dc.set_low();
        self.frame(&[cmd])
    }

    /// Send one parameter byte
    pub fn data(&mut self, byte: u8) -> Result<(), SPI::Error> {
        self.dc.set_high();
        self.frame(&[byte])
    }

    /// Send a 16-bit word, high byte first, in a single frame
    pub fn data16(&mut self, word: u16) -> Result<(), SPI::Error> {
        self.dc.set_high();
        self.frame(&word.to_be_bytes())
    }

    /// Send the same word `count` times
    pub fn repeat16(&mut self, word: u16, count: u32) -> Result<(), SPI::Error> {
        for _ in 0..count {
            self.data16(word)?;
        }
        Ok(())
    }
}
