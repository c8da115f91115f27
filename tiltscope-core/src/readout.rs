//! Text lines of the readout screen
//!
//! Every line ends in three spaces so a shorter value overwrites the
//! trailing digits of the previous frame without clearing the screen.

use core::fmt::{self, Write};

use heapless::String;

use crate::sample::MotionReading;

/// Longest formatted line, with headroom for the widest gyro value
pub const MAX_LINE_LEN: usize = 32;

/// Number of lines on the readout screen
pub const READOUT_LINES: usize = 7;

pub type ReadoutLine = String<MAX_LINE_LEN>;

const LABELS: [&str; 6] = [
    "accelX(g)",
    "accelY(g)",
    "accelZ(g)",
    "gyroX(dps)",
    "gyroY(dps)",
    "gyroZ(dps)",
];

/// Format one reading as the seven readout lines, top to bottom
pub fn format_readout(reading: &MotionReading) -> Result<[ReadoutLine; READOUT_LINES], fmt::Error> {
    let mut lines: [ReadoutLine; READOUT_LINES] = Default::default();
    let values = reading.accel_g.iter().chain(reading.gyro_dps.iter());

    for ((line, label), value) in lines.iter_mut().zip(LABELS).zip(values) {
        write!(line, "{}: {:.2}   ", label, value)?;
    }
    write!(lines[6], "TEMP: {}   ", reading.temperature)?;

    Ok(lines)
}

/// Top-left corner of line `index` given the first line's origin
///
/// Saturates at `u16::MAX`; such lines fall outside any clip bound.
pub const fn line_origin(origin: (u16, u16), spacing: u16, index: usize) -> (u16, u16) {
    let index = if index > u16::MAX as usize {
        u16::MAX
    } else {
        index as u16
    };
    (origin.0, origin.1.saturating_add(spacing.saturating_mul(index)))
}
