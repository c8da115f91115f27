//! ILI9163C display controller
//!
//! Pixels are streamed into an address window: the column and page
//! ranges are set first, then RAMWR opens memory-write mode and every
//! 16-bit word that follows fills the window in raster order. The
//! controller does not clip; words past the end of the window wrap.

use tiltscope_core::config::{DisplayConfig, LAST_GRAM_LINE};
use tiltscope_core::traits::PixelWriter;
use tiltscope_core::Rgb565;
use tiltscope_hal::{CycleCounter, OutputPin, SpiBus};

use super::command::{cmd, Payload, INIT_SEQUENCE};
use crate::bus::DisplayBus;

pub use tiltscope_core::config::GRAM_LINES;

/// Display errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError<E> {
    /// SPI transfer failed
    Spi(E),
    /// Window is inverted or lies outside controller memory
    WindowOutOfBounds,
}

impl<E> From<E> for DisplayError<E> {
    fn from(e: E) -> Self {
        DisplayError::Spi(e)
    }
}

/// ILI9163C on a [`DisplayBus`]
pub struct Ili9163<SPI, CS, DC, C> {
    bus: DisplayBus<SPI, CS, DC>,
    clock: C,
    width: u16,
    height: u16,
    orientation: u8,
}

impl<SPI, CS, DC, C> Ili9163<SPI, CS, DC, C>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    C: CycleCounter,
{
    pub fn new(bus: DisplayBus<SPI, CS, DC>, clock: C, config: &DisplayConfig) -> Self {
        Self {
            bus,
            clock,
            width: config.width,
            height: config.height,
            orientation: config.orientation,
        }
    }

    pub fn free(self) -> (DisplayBus<SPI, CS, DC>, C) {
        (self.bus, self.clock)
    }

    pub fn orientation(&self) -> u8 {
        self.orientation
    }

    /// Run the power-up sequence
    ///
    /// Blocks for a little over half a second of settle time.
    pub fn init(&mut self) -> Result<(), DisplayError<SPI::Error>> {
        for step in INIT_SEQUENCE.iter() {
            self.bus.command(step.command)?;
            match step.payload {
                Payload::None => {}
                Payload::Bytes(bytes) => {
                    for &b in bytes {
                        self.bus.data(b)?;
                    }
                }
                Payload::ColumnSpan => {
                    self.bus.data16(0)?;
                    self.bus.data16(self.width)?;
                }
                Payload::PageSpan | Payload::ScrollArea => {
                    self.bus.data16(0)?;
                    self.bus.data16(self.height)?;
                    if step.payload == Payload::ScrollArea {
                        self.bus.data16(0)?;
                    }
                }
                Payload::Orientation => self.bus.data(self.orientation)?,
            }
            if step.settle_us > 0 {
                self.clock.delay_us(step.settle_us);
            }
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("ili9163: init done, {}x{}", self.width, self.height);

        Ok(())
    }

    /// Rewrite the memory access control byte (rotation and RGB/BGR order)
    pub fn set_orientation(&mut self, madctl: u8) -> Result<(), DisplayError<SPI::Error>> {
        self.bus.command(cmd::MADCTL)?;
        self.bus.data(madctl)?;
        self.orientation = madctl;
        Ok(())
    }

    /// Set the address window and enter memory-write mode
    pub fn set_window(
        &mut self,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
    ) -> Result<(), DisplayError<SPI::Error>> {
        if x0 > x1 || y0 > y1 || x1 > LAST_GRAM_LINE || y1 > LAST_GRAM_LINE {
            return Err(DisplayError::WindowOutOfBounds);
        }

        self.bus.command(cmd::CLMADRS)?;
        self.bus.data16(x0)?;
        self.bus.data16(x1)?;

        self.bus.command(cmd::PGEADRS)?;
        self.bus.data16(y0)?;
        self.bus.data16(y1)?;

        self.bus.command(cmd::RAMWR)?;
        Ok(())
    }

    /// Stream one color word into the current window
    pub fn write_color(&mut self, color: Rgb565) -> Result<(), DisplayError<SPI::Error>> {
        self.bus.data16(color.raw())?;
        Ok(())
    }

    /// Set a single pixel
    ///
    /// The window reaches one line past the pixel, except on the last
    /// GRAM line where it collapses to the pixel itself.
    pub fn draw_pixel(&mut self, x: u16, y: u16, color: Rgb565) -> Result<(), DisplayError<SPI::Error>> {
        let x1 = x.saturating_add(1).min(LAST_GRAM_LINE);
        let y1 = y.saturating_add(1).min(LAST_GRAM_LINE);
        self.set_window(x, y, x1, y1)?;
        self.write_color(color)
    }

    /// Fill a `w` x `h` rectangle, one word per pixel
    pub fn fill_rect(
        &mut self,
        x: u16,
        y: u16,
        w: u16,
        h: u16,
        color: Rgb565,
    ) -> Result<(), DisplayError<SPI::Error>> {
        if w == 0 || h == 0 {
            return Ok(());
        }
        self.set_window(x, y, x.saturating_add(w - 1), y.saturating_add(h - 1))?;
        self.bus.repeat16(color.raw(), u32::from(w) * u32::from(h))?;
        Ok(())
    }
}

impl<SPI, CS, DC, C> PixelWriter for Ili9163<SPI, CS, DC, C>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    C: CycleCounter,
{
    type Error = DisplayError<SPI::Error>;

    fn write_pixel(&mut self, x: u16, y: u16, color: Rgb565) -> Result<(), Self::Error> {
        self.draw_pixel(x, y, color)
    }

    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Window (0, 0, w-1, h-1) followed by exactly w*h color words
    fn clear(&mut self, color: Rgb565) -> Result<(), Self::Error> {
        self.fill_rect(0, 0, self.width, self.height, color)
    }
}
