//! 16-bit RGB565 colors

/// A 16-bit color word in 5-6-5 layout, sent MSB first to the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb565(pub u16);

impl Rgb565 {
    pub const BLACK: Self = Self(0x0000);
    pub const BLUE: Self = Self(0x001F);
    pub const RED: Self = Self(0xF800);
    pub const GREEN: Self = Self(0x07E0);
    pub const CYAN: Self = Self(0x07FF);
    pub const MAGENTA: Self = Self(0xF81F);
    pub const YELLOW: Self = Self(0xFFE0);
    pub const WHITE: Self = Self(0xFFFF);

    /// Raw color word
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Look up one of the named colors (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        const NAMES: [(&str, Rgb565); 8] = [
            ("black", Rgb565::BLACK),
            ("blue", Rgb565::BLUE),
            ("red", Rgb565::RED),
            ("green", Rgb565::GREEN),
            ("cyan", Rgb565::CYAN),
            ("magenta", Rgb565::MAGENTA),
            ("yellow", Rgb565::YELLOW),
            ("white", Rgb565::WHITE),
        ];
        NAMES
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, c)| *c)
    }
}

impl From<u16> for Rgb565 {
    fn from(raw: u16) -> Self {
        Self(raw)
    }
}
