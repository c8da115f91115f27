//! Readout screen
//!
//! Glue between the sensor and the panel: one call reads a sample,
//! converts it, formats the seven readout lines and draws them. The
//! screen is not cleared between frames; each line overwrites the
//! previous one in place.

use heapless::String;

use tiltscope_core::config::{BoardConfig, MAX_BANNER_LEN};
use tiltscope_core::readout::{format_readout, line_origin};
use tiltscope_core::traits::{MotionSensor, PixelWriter};
use tiltscope_core::MotionReading;

use crate::font::{draw_string, RasterError, TextStyle};

/// Errors from one readout cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DashboardError<S, D> {
    /// Sensor read failed
    Sensor(S),
    /// Drawing failed
    Raster(RasterError<D>),
    /// A formatted line did not fit its buffer
    Format,
}

impl<S, D> From<RasterError<D>> for DashboardError<S, D> {
    fn from(e: RasterError<D>) -> Self {
        DashboardError::Raster(e)
    }
}

/// Layout and colors of the readout screen
pub struct Dashboard {
    style: TextStyle,
    origin: (u16, u16),
    line_spacing: u16,
    banner: String<MAX_BANNER_LEN>,
    banner_at: (u16, u16),
}

impl Dashboard {
    pub fn new(config: &BoardConfig) -> Self {
        Self {
            style: TextStyle::from_config(&config.display),
            origin: (config.ui.origin_x, config.ui.origin_y),
            line_spacing: config.ui.line_spacing,
            banner: config.ui.banner.clone(),
            banner_at: (config.ui.banner_x, config.ui.banner_y),
        }
    }

    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    /// Clear to the background color and draw the greeting
    pub fn show_banner<W: PixelWriter>(&self, target: &mut W) -> Result<(), RasterError<W::Error>> {
        target.clear(self.style.background)?;
        draw_string(
            target,
            self.banner_at.0,
            self.banner_at.1,
            &self.banner,
            &self.style,
        )?;
        Ok(())
    }

    /// Read one sample and draw it
    pub fn refresh<S, W>(
        &self,
        sensor: &mut S,
        target: &mut W,
    ) -> Result<MotionReading, DashboardError<S::Error, W::Error>>
    where
        S: MotionSensor,
        W: PixelWriter,
    {
        let reading = sensor.read_motion().map_err(DashboardError::Sensor)?;
        self.draw::<S::Error, W>(&reading, target)?;
        Ok(reading)
    }

    /// Draw an already converted reading
    pub fn draw<S, W: PixelWriter>(
        &self,
        reading: &MotionReading,
        target: &mut W,
    ) -> Result<(), DashboardError<S, W::Error>> {
        let lines = format_readout(reading).map_err(|_| DashboardError::Format)?;

        for (i, line) in lines.iter().enumerate() {
            let (x, y) = line_origin(self.origin, self.line_spacing, i);
            draw_string(target, x, y, line, &self.style)?;
        }

        Ok(())
    }
}
