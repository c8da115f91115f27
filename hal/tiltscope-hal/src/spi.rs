//! SPI bus abstractions
//!
//! Provides a byte-wide full-duplex SPI master trait. Chip-select and
//! command/data lines are plain GPIOs driven by the device driver.

use embedded_hal::spi as eh;

/// SPI bus master
///
/// Provides the blocking single-byte exchange that display framing is
/// built from.
pub trait SpiBus {
    /// Error type for SPI operations
    type Error;

    /// Transfer one byte (simultaneous read/write)
    ///
    /// Blocks until the receive buffer holds the byte clocked in while
    /// `byte` was clocked out.
    fn transfer(&mut self, byte: u8) -> Result<u8, Self::Error>;

    /// Write data, discarding what is read back
    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        for &byte in data {
            self.transfer(byte)?;
        }
        Ok(())
    }
}

/// Adapter for any `embedded-hal` SPI bus
pub struct EhSpi<T>(pub T);

impl<T: eh::SpiBus<u8>> SpiBus for EhSpi<T> {
    type Error = T::Error;

    fn transfer(&mut self, byte: u8) -> Result<u8, Self::Error> {
        let mut buf = [byte];
        self.0.transfer_in_place(&mut buf)?;
        Ok(buf[0])
    }

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.0.write(data)?;
        // Callers toggle chip-select right after this returns
        self.0.flush()
    }
}

/// SPI configuration
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
    /// Clock polarity
    pub polarity: Polarity,
    /// Clock phase
    pub phase: Phase,
}

impl Default for SpiConfig {
    fn default() -> Self {
        Self {
            frequency: 1_000_000, // 1 MHz
            polarity: Polarity::IdleLow,
            phase: Phase::CaptureOnFirstTransition,
        }
    }
}

impl SpiConfig {
    /// Display link: 12 MHz, mode 0
    pub const DISPLAY: Self = Self {
        frequency: 12_000_000,
        polarity: Polarity::IdleLow,
        phase: Phase::CaptureOnFirstTransition,
    };

    /// Baud rate generator reload: `pbclk / (2 * f) - 1`
    ///
    /// 12 MHz on a 48 MHz bus gives 1.
    pub fn brg(&self, pbclk_hz: u32) -> u32 {
        (pbclk_hz / self.frequency.max(1).saturating_mul(2)).saturating_sub(1)
    }

    /// Combined SPI mode
    pub fn mode(&self) -> Mode {
        match (self.polarity, self.phase) {
            (Polarity::IdleLow, Phase::CaptureOnFirstTransition) => Mode::Mode0,
            (Polarity::IdleLow, Phase::CaptureOnSecondTransition) => Mode::Mode1,
            (Polarity::IdleHigh, Phase::CaptureOnFirstTransition) => Mode::Mode2,
            (Polarity::IdleHigh, Phase::CaptureOnSecondTransition) => Mode::Mode3,
        }
    }
}

/// SPI clock polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Clock idles low (CPOL=0)
    IdleLow,
    /// Clock idles high (CPOL=1)
    IdleHigh,
}

/// SPI clock phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Data captured on first clock transition (CPHA=0)
    CaptureOnFirstTransition,
    /// Data captured on second clock transition (CPHA=1)
    CaptureOnSecondTransition,
}

/// SPI mode (combined polarity and phase)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Mode 0: CPOL=0, CPHA=0
    Mode0,
    /// Mode 1: CPOL=0, CPHA=1
    Mode1,
    /// Mode 2: CPOL=1, CPHA=0
    Mode2,
    /// Mode 3: CPOL=1, CPHA=1
    Mode3,
}

impl From<Mode> for (Polarity, Phase) {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Mode0 => (Polarity::IdleLow, Phase::CaptureOnFirstTransition),
            Mode::Mode1 => (Polarity::IdleLow, Phase::CaptureOnSecondTransition),
            Mode::Mode2 => (Polarity::IdleHigh, Phase::CaptureOnFirstTransition),
            Mode::Mode3 => (Polarity::IdleHigh, Phase::CaptureOnSecondTransition),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_brg() {
        assert_eq!(SpiConfig::DISPLAY.brg(48_000_000), 1);
        assert_eq!(SpiConfig::default().brg(48_000_000), 23);

        let fast = SpiConfig {
            frequency: u32::MAX,
            ..SpiConfig::DISPLAY
        };
        assert_eq!(fast.brg(48_000_000), 0);
    }

    #[test]
    fn test_mode_round_trip() {
        for mode in [Mode::Mode0, Mode::Mode1, Mode::Mode2, Mode::Mode3] {
            let (polarity, phase) = mode.into();
            let config = SpiConfig {
                frequency: 1_000_000,
                polarity,
                phase,
            };
            assert_eq!(config.mode(), mode);
        }
    }

    struct Loopback {
        flushed: bool,
    }

    impl eh::ErrorType for Loopback {
        type Error = core::convert::Infallible;
    }

    impl eh::SpiBus<u8> for Loopback {
        fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
            words.fill(0);
            Ok(())
        }

        fn write(&mut self, _words: &[u8]) -> Result<(), Self::Error> {
            self.flushed = false;
            Ok(())
        }

        fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
            read.copy_from_slice(&write[..read.len()]);
            Ok(())
        }

        fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
            for w in words.iter_mut() {
                *w = !*w;
            }
            Ok(())
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            self.flushed = true;
            Ok(())
        }
    }

    #[test]
    fn test_eh_adapter() {
        let mut spi = EhSpi(Loopback { flushed: false });
        assert_eq!(spi.transfer(0x0F), Ok(0xF0));

        spi.write(&[1, 2, 3]).unwrap();
        assert!(spi.0.flushed);
    }
}
