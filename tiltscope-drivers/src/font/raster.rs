//! Text rasterizer
//!
//! Every glyph cell is painted completely: set bits in the foreground
//! color, clear bits in the background color. Drawing text over old text
//! therefore replaces it cell by cell without clearing the screen.

use tiltscope_core::config::DisplayConfig;
use tiltscope_core::traits::PixelWriter;
use tiltscope_core::Rgb565;

use super::glyphs::{glyph, GLYPH_HEIGHT, GLYPH_WIDTH};

/// Horizontal advance per character (glyph plus one blank column)
pub const ADVANCE_X: u16 = GLYPH_WIDTH + 1;

/// Vertical advance on a newline
pub const LINE_PITCH: u16 = 10;

/// Rasterizer errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RasterError<E> {
    /// Byte outside printable ASCII
    UnsupportedGlyph(u8),
    /// Pixel write failed
    Display(E),
}

impl<E> From<E> for RasterError<E> {
    fn from(e: E) -> Self {
        RasterError::Display(e)
    }
}

/// Colors and clip bound for drawing text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextStyle {
    pub foreground: Rgb565,
    pub background: Rgb565,
    /// Pixels with a coordinate above this are skipped (inclusive bound)
    pub clip_bound: u16,
}

impl TextStyle {
    pub const fn new(foreground: Rgb565, background: Rgb565) -> Self {
        Self {
            foreground,
            background,
            clip_bound: 128,
        }
    }

    pub fn from_config(config: &DisplayConfig) -> Self {
        Self {
            foreground: config.foreground,
            background: config.background,
            clip_bound: config.clip_bound,
        }
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(Rgb565::RED, Rgb565::BLACK)
    }
}

/// Pen position while drawing a string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextCursor {
    /// Left margin newlines return to
    pub left: u16,
    pub x: u16,
    pub y: u16,
}

impl TextCursor {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { left: x, x, y }
    }

    /// Move past one drawn glyph
    pub fn advance(&mut self) {
        self.x = self.x.saturating_add(ADVANCE_X);
    }

    /// Back to the left margin, one line down
    pub fn newline(&mut self) {
        self.x = self.left;
        self.y = self.y.saturating_add(LINE_PITCH);
    }
}

/// Draw one character with its top-left corner at (x, y)
///
/// Writes the 40 pixels of the 5x8 cell column by column, skipping any
/// beyond the clip bound or past `u16::MAX`. Codes outside 0x20..=0x7E
/// are rejected before anything is drawn.
pub fn draw_char<W: PixelWriter>(
    target: &mut W,
    x: u16,
    y: u16,
    code: u8,
    style: &TextStyle,
) -> Result<(), RasterError<W::Error>> {
    let columns = glyph(code).ok_or(RasterError::UnsupportedGlyph(code))?;

    for (col, bits) in (0..GLYPH_WIDTH).zip(columns.iter()) {
        let Some(px) = x.checked_add(col) else {
            break;
        };
        if px > style.clip_bound {
            continue;
        }
        for row in 0..GLYPH_HEIGHT {
            let Some(py) = y.checked_add(row) else {
                break;
            };
            if py > style.clip_bound {
                continue;
            }
            let color = if (bits >> row) & 0x01 != 0 {
                style.foreground
            } else {
                style.background
            };
            target.write_pixel(px, py, color)?;
        }
    }

    Ok(())
}

/// Draw a string starting at (x, y) and return where the pen ended up
///
/// `\n` moves to the next line at the original left margin. A NUL byte
/// ends the string early. The first unsupported byte stops drawing and is
/// returned as an error; glyphs before it stay on screen.
pub fn draw_string<W: PixelWriter>(
    target: &mut W,
    x: u16,
    y: u16,
    text: &str,
    style: &TextStyle,
) -> Result<TextCursor, RasterError<W::Error>> {
    let mut cursor = TextCursor::new(x, y);

    for &byte in text.as_bytes() {
        match byte {
            0 => break,
            b'\n' => cursor.newline(),
            _ => {
                draw_char(target, cursor.x, cursor.y, byte, style)?;
                cursor.advance();
            }
        }
    }

    Ok(cursor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::glyphs::GLYPHS;
    use crate::mock::{Canvas, MockError};
    use proptest::prelude::*;
    use std::collections::HashSet;

    const STYLE: TextStyle = TextStyle::new(Rgb565::RED, Rgb565::BLACK);

    #[test]
    fn test_draw_char_column_major_order() {
        let mut canvas = Canvas::new(128, 128);
        draw_char(&mut canvas, 10, 20, b'!', &STYLE).unwrap();

        // '!' is a single vertical bar in the middle column, rows 0..=4 and 6
        assert_eq!(canvas.writes.len(), 40);
        assert_eq!(canvas.writes[0], (10, 20, Rgb565::BLACK));
        assert_eq!(canvas.writes[8], (11, 20, Rgb565::BLACK));
        let middle: Vec<_> = canvas.writes[16..24].iter().map(|w| w.2).collect();
        let r = Rgb565::RED;
        let b = Rgb565::BLACK;
        assert_eq!(middle, vec![r, r, r, r, r, b, r, b]);
    }

    #[test]
    fn test_draw_string_advances_twelve_for_two_chars() {
        let mut canvas = Canvas::new(128, 128);
        let cursor = draw_string(&mut canvas, 5, 12, "AB", &STYLE).unwrap();
        assert_eq!(cursor, TextCursor { left: 5, x: 17, y: 12 });
        assert_eq!(canvas.writes.len(), 80);
        // 'B' starts six pixels right of 'A'
        assert_eq!(canvas.writes[40].0, 11);
    }

    #[test]
    fn test_newline_draws_nothing() {
        let mut canvas = Canvas::new(128, 128);
        let cursor = draw_string(&mut canvas, 5, 12, "AB\n", &STYLE).unwrap();
        assert_eq!(canvas.writes.len(), 80);
        assert_eq!(cursor, TextCursor { left: 5, x: 5, y: 22 });

        let mut canvas = Canvas::new(128, 128);
        draw_string(&mut canvas, 5, 12, "A\nB", &STYLE).unwrap();
        let second = &canvas.writes[40..];
        assert_eq!(second[0].0, 5);
        assert_eq!(second[0].1, 22);
    }

    #[test]
    fn test_nul_terminates() {
        let mut canvas = Canvas::new(128, 128);
        let cursor = draw_string(&mut canvas, 0, 0, "A\0B", &STYLE).unwrap();
        assert_eq!(canvas.writes.len(), 40);
        assert_eq!(cursor.x, 6);
    }

    #[test]
    fn test_unsupported_glyph() {
        let mut canvas = Canvas::new(128, 128);
        assert_eq!(
            draw_char(&mut canvas, 0, 0, 0x7F, &STYLE),
            Err(RasterError::<MockError>::UnsupportedGlyph(0x7F))
        );
        assert!(canvas.writes.is_empty());

        assert_eq!(
            draw_string(&mut canvas, 0, 0, "A\tB", &STYLE),
            Err(RasterError::UnsupportedGlyph(b'\t'))
        );
        assert_eq!(canvas.writes.len(), 40);

        assert_eq!(
            draw_string(&mut Canvas::new(128, 128), 0, 0, "°", &STYLE),
            Err(RasterError::UnsupportedGlyph(0xC2))
        );
    }

    #[test]
    fn test_clip_bound_is_inclusive() {
        let mut canvas = Canvas::new(128, 128);
        draw_char(&mut canvas, 126, 124, b'W', &STYLE).unwrap();

        // Columns 126..=128 and rows 124..=128 survive
        assert_eq!(canvas.writes.len(), 3 * 5);
        assert!(canvas.writes.iter().all(|&(x, y, _)| x <= 128 && y <= 128));
        assert!(canvas.writes.iter().any(|&(x, y, _)| x == 128 && y == 128));

        let tight = TextStyle {
            clip_bound: 127,
            ..STYLE
        };
        let mut canvas = Canvas::new(128, 128);
        draw_char(&mut canvas, 126, 124, b'W', &tight).unwrap();
        assert_eq!(canvas.writes.len(), 2 * 4);
    }

    #[test]
    fn test_cell_at_coordinate_limit_never_repeats_pixels() {
        let open = TextStyle {
            clip_bound: u16::MAX,
            ..STYLE
        };
        let mut canvas = Canvas::new(128, 128);
        draw_char(&mut canvas, u16::MAX - 2, u16::MAX - 4, b'W', &open).unwrap();

        // Three columns and five rows fit below the limit
        assert_eq!(canvas.writes.len(), 3 * 5);
        let cells: HashSet<(u16, u16)> = canvas.writes.iter().map(|&(x, y, _)| (x, y)).collect();
        assert_eq!(cells.len(), 15);
    }

    proptest! {
        #[test]
        fn prop_glyph_fills_exactly_its_cell(code in 0x20u8..=0x7E, x in 0u16..100, y in 0u16..100) {
            let mut canvas = Canvas::new(128, 128);
            draw_char(&mut canvas, x, y, code, &STYLE).unwrap();

            prop_assert_eq!(canvas.writes.len(), 40);
            let cells: HashSet<(u16, u16)> = canvas.writes.iter().map(|&(px, py, _)| (px, py)).collect();
            prop_assert_eq!(cells.len(), 40);

            let columns = GLYPHS[usize::from(code - 0x20)];
            for &(px, py, color) in &canvas.writes {
                prop_assert!(px >= x && px < x + 5 && py >= y && py < y + 8);
                let set = (columns[usize::from(px - x)] >> (py - y)) & 1 == 1;
                let expected = if set { Rgb565::RED } else { Rgb565::BLACK };
                prop_assert_eq!(color, expected);
            }
        }

        #[test]
        fn prop_cursor_tracks_lines(lines in proptest::collection::vec("[ -~]{0,8}", 1..5)) {
            let text = lines.join("\n");
            let mut canvas = Canvas::new(128, 128);
            let cursor = draw_string(&mut canvas, 3, 4, &text, &TextStyle { clip_bound: u16::MAX, ..STYLE }).unwrap();

            let last = lines.last().map(|l| l.len()).unwrap_or(0) as u16;
            prop_assert_eq!(cursor.x, 3 + 6 * last);
            prop_assert_eq!(cursor.y, 4 + 10 * (lines.len() as u16 - 1));
            let glyphs: usize = lines.iter().map(|l| l.len()).sum();
            prop_assert_eq!(canvas.writes.len(), glyphs * 40);
        }
    }
}
