//! Bitmap font and text drawing

pub mod glyphs;
pub mod raster;

pub use glyphs::glyph;
pub use raster::{draw_char, draw_string, RasterError, TextCursor, TextStyle};
