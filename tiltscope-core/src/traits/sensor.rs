//! Motion sensor trait

use crate::sample::{ImuSample, MotionReading, Scale};

/// A sensor that produces one raw sample per call
pub trait MotionSensor {
    type Error;

    /// Read one fresh sample
    fn read_sample(&mut self) -> Result<ImuSample, Self::Error>;

    /// Divisors matching the sensor's configured ranges
    fn scale(&self) -> Scale;

    /// Read a sample and convert it to physical units
    fn read_motion(&mut self) -> Result<MotionReading, Self::Error> {
        let sample = self.read_sample()?;
        Ok(MotionReading::from_sample(&sample, &self.scale()))
    }
}
