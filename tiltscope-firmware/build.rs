//! Build script for tiltscope-firmware
//!
//! - Sets up linker search paths and scripts for memory.x
//! - Validates board.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate board.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=board.toml");

    let config_path = Path::new("board.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: board.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds a board.toml configuration file.            ║\n\
            ║  Please create one in the tiltscope-firmware directory.          ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read board.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Parse and validate TOML syntax
    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in board.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_imu(&config, &mut errors);
    validate_display(&config, &mut errors);
    validate_bus(&config, &mut errors);
    validate_ui(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid values in board.toml                             ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=board.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

const SECTIONS: [(&str, &[&str]); 4] = [
    (
        "imu",
        &[
            "address",
            "accel_range_g",
            "gyro_range_dps",
            "accel_odr",
            "accel_bandwidth",
            "gyro_odr",
            "ctrl3_c",
            "check_identity",
            "ack_policy",
        ],
    ),
    (
        "display",
        &["width", "height", "orientation", "foreground", "background", "clip_bound"],
    ),
    ("bus", &["i2c_frequency_hz", "spi_frequency_hz", "stretch_polls"]),
    (
        "ui",
        &[
            "poll_period_ms",
            "origin_x",
            "origin_y",
            "line_spacing",
            "banner",
            "banner_x",
            "banner_y",
        ],
    ),
];

const COLOR_NAMES: [&str; 8] = [
    "black", "blue", "red", "green", "cyan", "magenta", "yellow", "white",
];

/// Only known sections and keys, no top-level values
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let table = match config {
        toml::Value::Table(t) => t,
        _ => return,
    };

    for (name, value) in table {
        let Some((_, keys)) = SECTIONS.iter().find(|(s, _)| s == name) else {
            errors.push(format!("unknown section or top-level key '{}'", name));
            continue;
        };
        let toml::Value::Table(section) = value else {
            errors.push(format!("[{}] must be a table", name));
            continue;
        };
        for key in section.keys() {
            if !keys.contains(&key.as_str()) {
                errors.push(format!("[{}] unknown key '{}'", name, key));
            }
        }
    }
}

fn get<'a>(config: &'a toml::Value, section: &str, key: &str) -> Option<&'a toml::Value> {
    config.get(section).and_then(|s| s.get(key))
}

/// Integer key must lie in `min..=max`
fn check_int(
    config: &toml::Value,
    section: &str,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) {
    match get(config, section, key) {
        None => {}
        Some(toml::Value::Integer(v)) if (min..=max).contains(v) => {}
        Some(toml::Value::Integer(_)) => {
            errors.push(format!("[{}] {} must be {}-{}", section, key, min, max))
        }
        Some(_) => errors.push(format!("[{}] {} must be an integer", section, key)),
    }
}

/// Integer key must be one of `allowed`
fn check_choice(config: &toml::Value, section: &str, key: &str, allowed: &[i64], errors: &mut Vec<String>) {
    match get(config, section, key) {
        None => {}
        Some(toml::Value::Integer(v)) if allowed.contains(v) => {}
        Some(_) => errors.push(format!("[{}] {} must be one of {:?}", section, key, allowed)),
    }
}

fn check_bool(config: &toml::Value, section: &str, key: &str, errors: &mut Vec<String>) {
    if let Some(v) = get(config, section, key) {
        if !v.is_bool() {
            errors.push(format!("[{}] {} must be true or false", section, key));
        }
    }
}

fn validate_imu(config: &toml::Value, errors: &mut Vec<String>) {
    check_int(config, "imu", "address", 0, 0x7F, errors);
    check_choice(config, "imu", "accel_range_g", &[2, 4, 8, 16], errors);
    check_choice(config, "imu", "gyro_range_dps", &[245, 500, 1000, 2000], errors);
    check_int(config, "imu", "accel_odr", 0, 0x0F, errors);
    check_int(config, "imu", "accel_bandwidth", 0, 0x03, errors);
    check_int(config, "imu", "gyro_odr", 0, 0x0F, errors);
    check_int(config, "imu", "ctrl3_c", 0, 0xFF, errors);
    check_bool(config, "imu", "check_identity", errors);

    if let Some(policy) = get(config, "imu", "ack_policy") {
        if !matches!(policy.as_str(), Some("abort") | Some("ignore")) {
            errors.push("[imu] ack_policy must be 'abort' or 'ignore'".to_string());
        }
    }

    // Burst reads depend on register auto-increment
    if let Some(toml::Value::Integer(ctrl3)) = get(config, "imu", "ctrl3_c") {
        if ctrl3 & 0x04 == 0 {
            errors.push("[imu] ctrl3_c must keep IF_INC (0x04) set".to_string());
        }
    }
}

fn validate_display(config: &toml::Value, errors: &mut Vec<String>) {
    check_int(config, "display", "width", 1, 162, errors);
    check_int(config, "display", "height", 1, 162, errors);
    check_int(config, "display", "orientation", 0, 0xFF, errors);
    // Glyph pixels must stay inside controller memory
    check_int(config, "display", "clip_bound", 0, 161, errors);

    for key in ["foreground", "background"] {
        match get(config, "display", key) {
            None => {}
            Some(toml::Value::String(name)) if COLOR_NAMES.contains(&name.to_lowercase().as_str()) => {}
            Some(toml::Value::Integer(raw)) if (0..=0xFFFF).contains(raw) => {}
            Some(_) => errors.push(format!(
                "[display] {} must be a color name or an RGB565 word",
                key
            )),
        }
    }
}

fn validate_bus(config: &toml::Value, errors: &mut Vec<String>) {
    check_int(config, "bus", "i2c_frequency_hz", 1_000, 1_000_000, errors);
    check_int(config, "bus", "spi_frequency_hz", 100_000, 62_500_000, errors);
    check_int(config, "bus", "stretch_polls", 0, u32::MAX as i64, errors);
}

fn validate_ui(config: &toml::Value, errors: &mut Vec<String>) {
    check_int(config, "ui", "poll_period_ms", 1, 60_000, errors);
    for key in ["origin_x", "origin_y", "line_spacing", "banner_x", "banner_y"] {
        check_int(config, "ui", key, 0, 0xFFFF, errors);
    }

    match get(config, "ui", "banner") {
        None => {}
        Some(toml::Value::String(text)) => {
            if text.len() > 32 {
                errors.push("[ui] banner must be at most 32 characters".to_string());
            }
            if !text.bytes().all(|b| (0x20..=0x7E).contains(&b)) {
                errors.push("[ui] banner must be printable ASCII".to_string());
            }
        }
        Some(_) => errors.push("[ui] banner must be a string".to_string()),
    }
}
