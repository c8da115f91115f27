//! ILI9163C command set and power-up sequence

/// Controller command bytes
pub mod cmd {
    pub const SWRESET: u8 = 0x01;
    pub const SLPOUT: u8 = 0x11;
    pub const NORML: u8 = 0x13;
    pub const GAMMASET: u8 = 0x26;
    pub const DISPON: u8 = 0x29;
    pub const CLMADRS: u8 = 0x2A;
    pub const PGEADRS: u8 = 0x2B;
    pub const RAMWR: u8 = 0x2C;
    pub const VSCLLDEF: u8 = 0x33;
    pub const MADCTL: u8 = 0x36;
    pub const PIXFMT: u8 = 0x3A;
    pub const FRMCTR1: u8 = 0xB1;
    pub const DINVCTR: u8 = 0xB4;
    pub const DFUNCTR: u8 = 0xB6;
    pub const PWCTR1: u8 = 0xC0;
    pub const PWCTR2: u8 = 0xC1;
    pub const VCOMCTR1: u8 = 0xC5;
    pub const VCOMOFFS: u8 = 0xC7;
    pub const PGAMMAC: u8 = 0xE0;
    pub const NGAMMAC: u8 = 0xE1;
    pub const GAMRSEL: u8 = 0xF2;
}

/// Parameters following a command byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Payload {
    None,
    /// Fixed parameter bytes
    Bytes(&'static [u8]),
    /// Words `0, width` (column address defaults)
    ColumnSpan,
    /// Words `0, height` (page address defaults)
    PageSpan,
    /// Words `0, height, 0` (no fixed top or bottom area)
    ScrollArea,
    /// The configured MADCTL byte
    Orientation,
}

/// One entry of the power-up sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InitStep {
    pub command: u8,
    pub payload: Payload,
    /// Minimum wait before the next command
    pub settle_us: u32,
}

impl InitStep {
    const fn new(command: u8, payload: Payload, settle_us: u32) -> Self {
        Self {
            command,
            payload,
            settle_us,
        }
    }
}

const POSITIVE_GAMMA: [u8; 15] = [
    0x36, 0x29, 0x12, 0x22, 0x1C, 0x15, 0x42, 0xB7, 0x2F, 0x13, 0x12, 0x0A, 0x11, 0x0B, 0x06,
];

const NEGATIVE_GAMMA: [u8; 15] = [
    0x09, 0x16, 0x2D, 0x0D, 0x13, 0x15, 0x40, 0x48, 0x53, 0x0C, 0x1D, 0x25, 0x2E, 0x34, 0x39,
];

/// Power-up sequence, in order
///
/// The order and the settle times are part of the controller contract.
/// The sequence ends in memory-write mode.
pub const INIT_SEQUENCE: [InitStep; 21] = [
    InitStep::new(cmd::SWRESET, Payload::None, 500_000),
    InitStep::new(cmd::SLPOUT, Payload::None, 5_000),
    // 16 bits per pixel
    InitStep::new(cmd::PIXFMT, Payload::Bytes(&[0x05]), 5_000),
    // Gamma curve 3
    InitStep::new(cmd::GAMMASET, Payload::Bytes(&[0x04]), 1_000),
    InitStep::new(cmd::GAMRSEL, Payload::Bytes(&[0x01]), 1_000),
    InitStep::new(cmd::NORML, Payload::None, 0),
    InitStep::new(cmd::DFUNCTR, Payload::Bytes(&[0xFF, 0x06]), 0),
    InitStep::new(cmd::PGAMMAC, Payload::Bytes(&POSITIVE_GAMMA), 0),
    InitStep::new(cmd::NGAMMAC, Payload::Bytes(&NEGATIVE_GAMMA), 0),
    InitStep::new(cmd::FRMCTR1, Payload::Bytes(&[0x08, 0x02]), 1_000),
    InitStep::new(cmd::DINVCTR, Payload::Bytes(&[0x07]), 1_000),
    InitStep::new(cmd::PWCTR1, Payload::Bytes(&[0x0A, 0x02]), 1_000),
    InitStep::new(cmd::PWCTR2, Payload::Bytes(&[0x02]), 1_000),
    InitStep::new(cmd::VCOMCTR1, Payload::Bytes(&[0x50, 0x63]), 1_000),
    InitStep::new(cmd::VCOMOFFS, Payload::Bytes(&[0x00]), 1_000),
    InitStep::new(cmd::CLMADRS, Payload::ColumnSpan, 0),
    InitStep::new(cmd::PGEADRS, Payload::PageSpan, 0),
    InitStep::new(cmd::VSCLLDEF, Payload::ScrollArea, 0),
    InitStep::new(cmd::MADCTL, Payload::Orientation, 0),
    InitStep::new(cmd::DISPON, Payload::None, 1_000),
    InitStep::new(cmd::RAMWR, Payload::None, 0),
];
