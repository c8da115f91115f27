//! Minimal TOML parser for board configuration
//!
//! Handles only the subset `board.toml` uses. It does NOT support the
//! full TOML spec.
//!
//! Supported features:
//! - `[imu]`, `[display]`, `[bus]` and `[ui]` section headers
//! - Key = value pairs (string, integer, boolean)
//! - Integers in decimal, `0x` hex or `0b` binary, with `_` separators
//! - Comments (# ...), whole-line or trailing
//!
//! NOT supported:
//! - Arrays and inline tables
//! - Multi-line strings and escapes
//! - Dotted keys

use core::ops::RangeInclusive;

use super::ranges::{AccelRange, GyroRange};
use super::types::{
    AckPolicy, BoardConfig, CTRL3_IF_INC, GRAM_LINES, I2C_FREQUENCY_HZ, LAST_GRAM_LINE,
    MAX_BANNER_LEN, POLL_PERIOD_MS, SPI_FREQUENCY_HZ,
};
use crate::color::Rgb565;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Value has the wrong type or does not parse
    InvalidValue,
    /// Key is not recognised in its section
    UnknownKey,
    /// Value parses but does not fit the field
    OutOfRange,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Imu,
    Display,
    Bus,
    Ui,
}

/// Parse TOML text on top of the default configuration
///
/// Keys that are absent keep their defaults.
pub fn parse_config(input: &str) -> Result<BoardConfig, ParseError> {
    let mut config = BoardConfig::new();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') {
            if !line.ends_with(']') {
                return Err(ParseError::InvalidSection);
            }
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidValue)?;
        apply_value(section, key, value, &mut config)?;
    }

    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "imu" => Ok(Section::Imu),
        "display" => Ok(Section::Display),
        "bus" => Ok(Section::Bus),
        "ui" => Ok(Section::Ui),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Drop a trailing comment unless the `#` sits inside a string
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a quoted string value
fn parse_string(value: &str) -> Result<&str, ParseError> {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .ok_or(ParseError::InvalidValue)
}

/// Parse an integer and narrow it to the target type
fn parse_int<T: TryFrom<u32>>(value: &str) -> Result<T, ParseError> {
    let mut digits: heapless::String<32> = heapless::String::new();
    for c in value.chars().filter(|&c| c != '_') {
        digits.push(c).map_err(|_| ParseError::InvalidValue)?;
    }

    let raw = if let Some(hex) = digits.strip_prefix("0x") {
        u32::from_str_radix(hex, 16)
    } else if let Some(bin) = digits.strip_prefix("0b") {
        u32::from_str_radix(bin, 2)
    } else {
        digits.parse::<u32>()
    }
    .map_err(|_| ParseError::InvalidValue)?;

    T::try_from(raw).map_err(|_| ParseError::OutOfRange)
}

/// Parse an integer that must lie in `range`
fn parse_in<T>(value: &str, range: RangeInclusive<T>) -> Result<T, ParseError>
where
    T: TryFrom<u32> + PartialOrd,
{
    let v: T = parse_int(value)?;
    if !range.contains(&v) {
        return Err(ParseError::OutOfRange);
    }
    Ok(v)
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Parse a color given by name ("red") or as a raw RGB565 word
fn parse_color(value: &str) -> Result<Rgb565, ParseError> {
    if value.starts_with('"') {
        let name = parse_string(value)?;
        return Rgb565::from_name(name).ok_or(ParseError::InvalidValue);
    }
    parse_int::<u16>(value).map(Rgb565::from)
}

fn parse_ack_policy(value: &str) -> Result<AckPolicy, ParseError> {
    match parse_string(value)? {
        "ignore" => Ok(AckPolicy::Ignore),
        "abort" => Ok(AckPolicy::Abort),
        _ => Err(ParseError::InvalidValue),
    }
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut BoardConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Imu => {
            let imu = &mut config.imu;
            match key {
                "address" => imu.address = parse_in(value, 0..=0x7F)?,
                "accel_range_g" => {
                    imu.accel_range =
                        AccelRange::from_full_scale(parse_int(value)?).ok_or(ParseError::OutOfRange)?
                }
                "gyro_range_dps" => {
                    imu.gyro_range =
                        GyroRange::from_full_scale(parse_int(value)?).ok_or(ParseError::OutOfRange)?
                }
                "accel_odr" => imu.accel_odr = parse_in(value, 0..=0x0F)?,
                "accel_bandwidth" => imu.accel_bandwidth = parse_in(value, 0..=0x03)?,
                "gyro_odr" => imu.gyro_odr = parse_in(value, 0..=0x0F)?,
                "ctrl3_c" => {
                    let ctrl3: u8 = parse_int(value)?;
                    if ctrl3 & CTRL3_IF_INC == 0 {
                        return Err(ParseError::OutOfRange);
                    }
                    imu.ctrl3_c = ctrl3;
                }
                "check_identity" => imu.check_identity = parse_bool(value)?,
                "ack_policy" => imu.ack_policy = parse_ack_policy(value)?,
                _ => return Err(ParseError::UnknownKey),
            }
        }
        Section::Display => {
            let display = &mut config.display;
            match key {
                "width" => display.width = parse_in(value, 1..=GRAM_LINES)?,
                "height" => display.height = parse_in(value, 1..=GRAM_LINES)?,
                "orientation" => display.orientation = parse_int(value)?,
                "foreground" => display.foreground = parse_color(value)?,
                "background" => display.background = parse_color(value)?,
                "clip_bound" => display.clip_bound = parse_in(value, 0..=LAST_GRAM_LINE)?,
                _ => return Err(ParseError::UnknownKey),
            }
        }
        Section::Bus => {
            let bus = &mut config.bus;
            match key {
                "i2c_frequency_hz" => bus.i2c_frequency_hz = parse_in(value, I2C_FREQUENCY_HZ)?,
                "spi_frequency_hz" => bus.spi_frequency_hz = parse_in(value, SPI_FREQUENCY_HZ)?,
                "stretch_polls" => bus.stretch_polls = parse_int(value)?,
                _ => return Err(ParseError::UnknownKey),
            }
        }
        Section::Ui => {
            let ui = &mut config.ui;
            match key {
                "poll_period_ms" => ui.poll_period_ms = parse_in(value, POLL_PERIOD_MS)?,
                "origin_x" => ui.origin_x = parse_int(value)?,
                "origin_y" => ui.origin_y = parse_int(value)?,
                "line_spacing" => ui.line_spacing = parse_int(value)?,
                "banner" => {
                    let text = parse_string(value)?;
                    if text.len() > MAX_BANNER_LEN {
                        return Err(ParseError::OutOfRange);
                    }
                    if !text.bytes().all(|b| (0x20..=0x7E).contains(&b)) {
                        return Err(ParseError::InvalidValue);
                    }
                    ui.banner.clear();
                    ui.banner.push_str(text).map_err(|_| ParseError::OutOfRange)?;
                }
                "banner_x" => ui.banner_x = parse_int(value)?,
                "banner_y" => ui.banner_y = parse_int(value)?,
                _ => return Err(ParseError::UnknownKey),
            }
        }
        Section::Root => return Err(ParseError::UnknownKey),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_gives_defaults() {
        assert_eq!(parse_config("").unwrap(), BoardConfig::default());
        assert_eq!(parse_config("# only a comment\n\n").unwrap(), BoardConfig::default());
    }

    #[test]
    fn test_parse_int_forms() {
        assert_eq!(parse_int::<u8>("107").unwrap(), 107);
        assert_eq!(parse_int::<u8>("0x6B").unwrap(), 0x6B);
        assert_eq!(parse_int::<u8>("0b1101011").unwrap(), 0x6B);
        assert_eq!(parse_int::<u32>("12_000_000").unwrap(), 12_000_000);
        assert_eq!(parse_int::<u8>("256"), Err(ParseError::OutOfRange));
        assert_eq!(parse_int::<u8>("-1"), Err(ParseError::InvalidValue));
        assert_eq!(parse_int::<u8>("0xZZ"), Err(ParseError::InvalidValue));
    }

    #[test]
    fn test_strip_comment_respects_strings() {
        assert_eq!(strip_comment("a = 1 # note"), "a = 1 ");
        assert_eq!(strip_comment("banner = \"#1\" # x"), "banner = \"#1\" ");
    }

    #[test]
    fn test_parse_full_config() {
        let config_str = r#"
# Board wiring
[imu]
address = 0b1101011
accel_range_g = 4
gyro_range_dps = 500
ack_policy = "ignore"
check_identity = false

[display]
foreground = "white"
background = 0x001F
clip_bound = 127

[bus]
i2c_frequency_hz = 400_000

[ui]
poll_period_ms = 40   # 25 Hz
banner = "Tilt #1"
banner_x = 10
"#;

        let config = parse_config(config_str).unwrap();
        assert_eq!(config.imu.address, 0x6B);
        assert_eq!(config.imu.accel_range, AccelRange::G4);
        assert_eq!(config.imu.gyro_range, GyroRange::Dps500);
        assert_eq!(config.imu.ack_policy, AckPolicy::Ignore);
        assert!(!config.imu.check_identity);
        assert_eq!(config.imu.ctrl1_xl(), 0x89);
        assert_eq!(config.imu.ctrl2_g(), 0x84);
        assert_eq!(config.display.foreground, Rgb565::WHITE);
        assert_eq!(config.display.background, Rgb565::BLUE);
        assert_eq!(config.display.clip_bound, 127);
        assert_eq!(config.display.width, 128);
        assert_eq!(config.bus.i2c_frequency_hz, 400_000);
        assert_eq!(config.bus.spi_frequency_hz, 12_000_000);
        assert_eq!(config.ui.poll_period_ms, 40);
        assert_eq!(config.ui.banner.as_str(), "Tilt #1");
        assert_eq!(config.ui.banner_x, 10);
        assert_eq!(config.ui.banner_y, 32);
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse_config("[motors]"), Err(ParseError::InvalidSection));
        assert_eq!(parse_config("[imu"), Err(ParseError::InvalidSection));
        assert_eq!(parse_config("address = 1"), Err(ParseError::UnknownKey));
        assert_eq!(parse_config("[imu]\nspeed = 1"), Err(ParseError::UnknownKey));
        assert_eq!(parse_config("[imu]\naddress = 0x80"), Err(ParseError::OutOfRange));
        assert_eq!(parse_config("[imu]\naccel_range_g = 3"), Err(ParseError::OutOfRange));
        assert_eq!(parse_config("[imu]\nack_policy = retry"), Err(ParseError::InvalidValue));
        assert_eq!(parse_config("[imu]\naddress"), Err(ParseError::InvalidValue));
        assert_eq!(parse_config("[display]\nforeground = \"teal\""), Err(ParseError::InvalidValue));
        assert_eq!(
            parse_config("[ui]\nbanner = \"0123456789012345678901234567890123\""),
            Err(ParseError::OutOfRange)
        );
        assert_eq!(parse_config("[ui]\nbanner = \"caf\u{e9}\""), Err(ParseError::InvalidValue));
        assert_eq!(parse_config("[imu]\nctrl3_c = 0x00"), Err(ParseError::OutOfRange));
    }

    #[test]
    fn test_geometry_stays_inside_controller_memory() {
        assert_eq!(parse_config("[display]\nclip_bound = 200"), Err(ParseError::OutOfRange));
        assert_eq!(parse_config("[display]\nclip_bound = 162"), Err(ParseError::OutOfRange));
        assert_eq!(parse_config("[display]\nclip_bound = 161").unwrap().display.clip_bound, 161);
        assert_eq!(parse_config("[display]\nwidth = 0"), Err(ParseError::OutOfRange));
        assert_eq!(parse_config("[display]\nheight = 163"), Err(ParseError::OutOfRange));
        assert_eq!(parse_config("[display]\nwidth = 162").unwrap().display.width, 162);
    }

    #[test]
    fn test_timing_ranges() {
        assert_eq!(parse_config("[ui]\npoll_period_ms = 0"), Err(ParseError::OutOfRange));
        assert_eq!(
            parse_config("[bus]\nspi_frequency_hz = 0x8000_0000"),
            Err(ParseError::OutOfRange)
        );
        assert_eq!(parse_config("[bus]\ni2c_frequency_hz = 0"), Err(ParseError::OutOfRange));
        assert_eq!(
            parse_config("[bus]\nspi_frequency_hz = 62_500_000").unwrap().bus.spi_frequency_hz,
            62_500_000
        );
    }

    #[test]
    fn test_extreme_text_origin_is_accepted() {
        let config = parse_config("[ui]\norigin_y = 65500\nline_spacing = 15\n").unwrap();
        assert_eq!(config.ui.origin_y, 65_500);
        assert_eq!(config.ui.line_spacing, 15);
    }

    #[test]
    fn test_shipped_board_file_matches_defaults() {
        let shipped = include_str!("../../../tiltscope-firmware/board.toml");
        assert_eq!(parse_config(shipped), Ok(BoardConfig::default()));
    }
}
