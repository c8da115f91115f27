//! I2C bus abstractions
//!
//! Provides a bit-level I2C master trait mirroring what a simple MCU
//! peripheral exposes: individual start, restart, byte send, byte receive,
//! acknowledge and stop operations. Transaction-level helpers live in the
//! driver crate on top of this.

/// Acknowledge bit as it appears on the wire
///
/// The receiver pulls SDA low (bit 0) to acknowledge and leaves it high
/// (bit 1) to signal "not acknowledged" / "no more bytes".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ack {
    /// SDA low: byte accepted, or master wants another byte
    Ack,
    /// SDA high: byte refused, or master ends the read
    Nack,
}

impl Ack {
    /// Build from the raw ACKDT bit (0 = ACK, 1 = NACK)
    pub const fn from_bit(bit: u8) -> Self {
        if bit == 0 {
            Ack::Ack
        } else {
            Ack::Nack
        }
    }

    /// Raw ACKDT bit
    pub const fn bit(self) -> u8 {
        match self {
            Ack::Ack => 0,
            Ack::Nack => 1,
        }
    }

    /// True when the receiver acknowledged
    pub const fn is_ack(self) -> bool {
        matches!(self, Ack::Ack)
    }
}

/// Address byte for a write transfer (R/W bit = 0)
#[inline]
pub const fn write_address(address: u8) -> u8 {
    address << 1
}

/// Address byte for a read transfer (R/W bit = 1)
#[inline]
pub const fn read_address(address: u8) -> u8 {
    (address << 1) | 1
}

/// Bit-level I2C bus master
///
/// Every method blocks until the bus reports completion. A correct
/// register read is `start → send(addr|W) → send(reg) → restart →
/// send(addr|R) → recv/ack... → stop`.
pub trait I2cMaster {
    /// Error type for I2C operations
    type Error;

    /// Issue a start condition
    fn start(&mut self) -> Result<(), Self::Error>;

    /// Issue a repeated start without releasing the bus
    fn restart(&mut self) -> Result<(), Self::Error>;

    /// Shift out one byte and report whether the slave acknowledged it
    fn send(&mut self, byte: u8) -> Result<Ack, Self::Error>;

    /// Shift in one byte from the slave
    fn recv(&mut self) -> Result<u8, Self::Error>;

    /// Answer the byte just received
    fn ack(&mut self, ack: Ack) -> Result<(), Self::Error>;

    /// Issue a stop condition and release the bus
    fn stop(&mut self) -> Result<(), Self::Error>;
}

/// I2C configuration
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self {
            frequency: 100_000, // 100kHz standard mode
        }
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self { frequency: 100_000 };

    /// Fast mode (400 kHz)
    pub const FAST: Self = Self { frequency: 400_000 };

    /// Pulse gobbler delay of the baud generator, in nanoseconds
    pub const PGD_NS: u32 = 104;

    /// Baud rate generator reload for a peripheral clock of `pbclk_hz`
    ///
    /// `BRG = (1 / (2 * Fsck) - PGD) * Pbclk - 2`, rounded down.
    /// 100 kHz on a 48 MHz bus gives 233.
    pub fn brg(&self, pbclk_hz: u32) -> u32 {
        let half_period_ns = 1_000_000_000u64 / (2 * self.frequency.max(1) as u64);
        let active_ns = half_period_ns.saturating_sub(Self::PGD_NS as u64);
        let cycles = active_ns * pbclk_hz as u64 / 1_000_000_000;
        cycles.saturating_sub(2) as u32
    }

    /// Half of one SCL period in microseconds (at least 1)
    pub fn half_period_us(&self) -> u32 {
        (500_000 / self.frequency.max(1)).max(1)
    }
}
