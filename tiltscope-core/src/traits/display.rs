//! Pixel sink trait

use crate::color::Rgb565;

/// Something that can set individual pixels
///
/// The font rasterizer draws through this trait, so it works with the
/// panel driver on hardware and with a recording buffer in tests.
pub trait PixelWriter {
    type Error;

    /// Set one pixel
    fn write_pixel(&mut self, x: u16, y: u16, color: Rgb565) -> Result<(), Self::Error>;

    /// Surface size in pixels (width, height)
    fn size(&self) -> (u16, u16);

    /// Paint the whole surface one color
    ///
    /// The default writes pixel by pixel; drivers with a faster path
    /// override it.
    fn clear(&mut self, color: Rgb565) -> Result<(), Self::Error> {
        let (width, height) = self.size();
        for y in 0..height {
            for x in 0..width {
                self.write_pixel(x, y, color)?;
            }
        }
        Ok(())
    }
}

impl<T: PixelWriter + ?Sized> PixelWriter for &mut T {
    type Error = T::Error;

    fn write_pixel(&mut self, x: u16, y: u16, color: Rgb565) -> Result<(), Self::Error> {
        T::write_pixel(self, x, y, color)
    }

    fn size(&self) -> (u16, u16) {
        T::size(self)
    }

    fn clear(&mut self, color: Rgb565) -> Result<(), Self::Error> {
        T::clear(self, color)
    }
}
