//! Glyph sets
//!
//! Two fonts are available:
//! - The standard font: 5x7 glyphs in a 6x8 cell, drawn at an integer size
//!   multiplier (1..=4). Glyph shapes come from `embedded-graphics`.
//! - The compact label font: 3x5 glyphs in a 4x6 cell covering digits,
//!   sign, decimal point and a few unit suffixes. Used for axis labels when
//!   a plot has no room for the standard font.

use embedded_graphics::mono_font::ascii::FONT_5X7;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::{Baseline, Text};

/// Standard font cell width in pixels (size 1)
pub const CHAR_WIDTH: i32 = 6;

/// Standard font cell height in pixels (size 1)
pub const CHAR_HEIGHT: i32 = 8;

/// Largest accepted text size multiplier
pub const MAX_TEXT_SIZE: u8 = 4;

/// Compact glyph width in pixels (scale 1)
pub const TINY_GLYPH_WIDTH: i32 = 3;

/// Compact glyph height in pixels (scale 1)
pub const TINY_GLYPH_HEIGHT: i32 = 5;

/// Compact glyph advance including the one pixel gap
pub const TINY_ADVANCE: i32 = TINY_GLYPH_WIDTH + 1;

/// Compact line height including the one pixel gap
pub const TINY_LINE_HEIGHT: i32 = TINY_GLYPH_HEIGHT + 1;

/// Compact glyph bitmaps
///
/// Five rows per glyph, top first. Bit 2 is the leftmost column.
const TINY_GLYPHS: &[(char, [u8; 5])] = &[
    ('0', [0b111, 0b101, 0b101, 0b101, 0b111]),
    ('1', [0b010, 0b110, 0b010, 0b010, 0b111]),
    ('2', [0b111, 0b001, 0b111, 0b100, 0b111]),
    ('3', [0b111, 0b001, 0b111, 0b001, 0b111]),
    ('4', [0b101, 0b101, 0b111, 0b001, 0b001]),
    ('5', [0b111, 0b100, 0b111, 0b001, 0b111]),
    ('6', [0b111, 0b100, 0b111, 0b101, 0b111]),
    ('7', [0b111, 0b001, 0b010, 0b010, 0b010]),
    ('8', [0b111, 0b101, 0b111, 0b101, 0b111]),
    ('9', [0b111, 0b101, 0b111, 0b001, 0b111]),
    ('-', [0b000, 0b000, 0b111, 0b000, 0b000]),
    ('+', [0b000, 0b010, 0b111, 0b010, 0b000]),
    ('.', [0b000, 0b000, 0b000, 0b000, 0b010]),
    (' ', [0b000, 0b000, 0b000, 0b000, 0b000]),
    ('%', [0b101, 0b001, 0b010, 0b100, 0b101]),
    ('A', [0b010, 0b101, 0b111, 0b101, 0b101]),
    ('C', [0b111, 0b100, 0b100, 0b100, 0b111]),
    ('F', [0b111, 0b100, 0b110, 0b100, 0b100]),
    ('K', [0b101, 0b101, 0b110, 0b101, 0b101]),
    ('M', [0b101, 0b111, 0b111, 0b101, 0b101]),
    ('V', [0b101, 0b101, 0b101, 0b101, 0b010]),
    ('h', [0b100, 0b100, 0b111, 0b101, 0b101]),
    ('k', [0b100, 0b101, 0b110, 0b110, 0b101]),
    ('m', [0b000, 0b110, 0b111, 0b101, 0b101]),
    ('s', [0b000, 0b111, 0b110, 0b011, 0b111]),
];

/// Look up a compact glyph
pub fn tiny_glyph(c: char) -> Option<&'static [u8; 5]> {
    TINY_GLYPHS
        .iter()
        .find(|(ch, _)| *ch == c)
        .map(|(_, rows)| rows)
}

/// Width in pixels of `chars` standard-font characters at `size`
pub const fn text_width(chars: usize, size: u8) -> i32 {
    chars as i32 * CHAR_WIDTH * size as i32
}

/// Width in pixels of `chars` compact glyphs at `scale`, without trailing gap
pub const fn tiny_text_width(chars: usize, scale: u8) -> i32 {
    if chars == 0 {
        0
    } else {
        (chars as i32 * TINY_ADVANCE - 1) * scale as i32
    }
}

/// Draw target adapter that blows every pixel up to a `scale` x `scale` block
///
/// Pixels are given relative to the adapter's own origin (0, 0), which maps
/// onto `origin` in the wrapped target.
pub struct Scaled<'a, T> {
    target: &'a mut T,
    origin: Point,
    scale: u32,
}

impl<'a, T> Scaled<'a, T> {
    /// Wrap a target
    pub fn new(target: &'a mut T, origin: Point, scale: u32) -> Self {
        Self {
            target,
            origin,
            scale: scale.max(1),
        }
    }
}

impl<T> OriginDimensions for Scaled<'_, T> {
    fn size(&self) -> Size {
        // Glyph space only; the wrapped target does the real clipping
        Size::new(64, 64)
    }
}

impl<T> DrawTarget for Scaled<'_, T>
where
    T: DrawTarget<Color = BinaryColor>,
{
    type Color = BinaryColor;
    type Error = T::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let s = self.scale as i32;
        for Pixel(point, color) in pixels {
            let block = Rectangle::new(
                self.origin + Point::new(point.x * s, point.y * s),
                Size::new(self.scale, self.scale),
            );
            self.target.fill_solid(&block, color)?;
        }
        Ok(())
    }
}

/// Draw one standard-font glyph with its cell's top-left corner at `origin`
pub fn draw_glyph<T>(
    target: &mut T,
    origin: Point,
    c: char,
    color: BinaryColor,
    size: u8,
) -> Result<(), T::Error>
where
    T: DrawTarget<Color = BinaryColor>,
{
    let mut buf = [0u8; 4];
    let text = c.encode_utf8(&mut buf);
    let style = MonoTextStyle::new(&FONT_5X7, color);
    let mut scaled = Scaled::new(target, origin, size as u32);
    Text::with_baseline(text, Point::zero(), style, Baseline::Top)
        .draw(&mut scaled)
        .map(|_| ())
}

/// Draw one compact glyph with its top-left corner at `origin`
///
/// Returns `false` if the character has no compact glyph (nothing drawn).
pub fn draw_tiny_glyph<T>(
    target: &mut T,
    origin: Point,
    c: char,
    color: BinaryColor,
    scale: u8,
) -> Result<bool, T::Error>
where
    T: DrawTarget<Color = BinaryColor>,
{
    let Some(rows) = tiny_glyph(c) else {
        return Ok(false);
    };

    let s = scale.max(1) as i32;
    for (row, bits) in rows.iter().enumerate() {
        for col in 0..TINY_GLYPH_WIDTH {
            if bits & (0b100 >> col) != 0 {
                let block = Rectangle::new(
                    origin + Point::new(col * s, row as i32 * s),
                    Size::new(s as u32, s as u32),
                );
                target.fill_solid(&block, color)?;
            }
        }
    }
    Ok(true)
}
