//! Board configuration
//!
//! Defaults reproduce the wiring and register values the board shipped
//! with. The firmware overrides them from an embedded TOML file parsed by
//! [`parse_config`].

pub mod parse;
pub mod ranges;
pub mod types;

pub use parse::{parse_config, ParseError};
pub use ranges::{AccelRange, GyroRange};
pub use types::*;
