//! Surface drawing contract
//!
//! `Surface` is the only thing widgets know about the display. Every
//! operation takes surface coordinates and a two-tone color, and every
//! operation clips instead of failing.

use core::convert::Infallible;
use core::fmt::Write;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{
    Circle, Line, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, RoundedRectangle,
    StrokeAlignment, Triangle,
};
use heapless::String;

use crate::font::{self, CHAR_HEIGHT, CHAR_WIDTH, MAX_TEXT_SIZE, TINY_ADVANCE};

/// Text cursor and text style state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextCursor {
    /// Cursor column in pixels
    pub x: i32,
    /// Cursor row in pixels (top of the glyph cell)
    pub y: i32,
    /// Size multiplier (1..=4)
    pub size: u8,
    /// Glyph color
    pub color: BinaryColor,
    /// Cell background, `None` for transparent
    pub background: Option<BinaryColor>,
    /// Wrap to the next line at the right edge
    pub wrap: bool,
}

impl Default for TextCursor {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            size: 1,
            color: BinaryColor::On,
            background: None,
            wrap: true,
        }
    }
}

/// Unwrap a draw result from an infallible target
fn settle<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

/// Stroke style whose outline stays inside the shape's bounds
fn outline(color: BinaryColor) -> PrimitiveStyle<BinaryColor> {
    PrimitiveStyleBuilder::new()
        .stroke_color(color)
        .stroke_width(1)
        .stroke_alignment(StrokeAlignment::Inside)
        .build()
}

/// Two-tone drawing surface
///
/// Implementors supply pixel storage (through `DrawTarget`) and text cursor
/// storage. All shape and text operations are provided on top of that.
pub trait Surface:
    DrawTarget<Color = BinaryColor, Error = Infallible> + OriginDimensions + Sized
{
    /// Current text cursor
    fn cursor(&self) -> &TextCursor;

    /// Mutable text cursor
    fn cursor_mut(&mut self) -> &mut TextCursor;

    /// Surface width in pixels
    fn width(&self) -> i32 {
        self.size().width as i32
    }

    /// Surface height in pixels
    fn height(&self) -> i32 {
        self.size().height as i32
    }

    /// Fill the whole surface
    fn fill_screen(&mut self, color: BinaryColor) {
        settle(self.clear(color));
    }

    /// Set a single pixel
    fn draw_pixel(&mut self, x: i32, y: i32, color: BinaryColor) {
        settle(self.draw_iter(core::iter::once(Pixel(Point::new(x, y), color))));
    }

    /// Draw a line between two points (both ends inclusive)
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: BinaryColor) {
        settle(
            Line::new(Point::new(x0, y0), Point::new(x1, y1))
                .into_styled(PrimitiveStyle::with_stroke(color, 1))
                .draw(self),
        );
    }

    /// Draw a horizontal run of `length` pixels starting at (x, y)
    fn draw_hline(&mut self, x: i32, y: i32, length: i32, color: BinaryColor) {
        if length > 0 {
            let area = Rectangle::new(Point::new(x, y), Size::new(length as u32, 1));
            settle(self.fill_solid(&area, color));
        }
    }

    /// Draw a vertical run of `length` pixels starting at (x, y)
    fn draw_vline(&mut self, x: i32, y: i32, length: i32, color: BinaryColor) {
        if length > 0 {
            let area = Rectangle::new(Point::new(x, y), Size::new(1, length as u32));
            settle(self.fill_solid(&area, color));
        }
    }

    /// Draw a rectangle outline
    fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: BinaryColor) {
        if w > 0 && h > 0 {
            settle(
                Rectangle::new(Point::new(x, y), Size::new(w as u32, h as u32))
                    .into_styled(outline(color))
                    .draw(self),
            );
        }
    }

    /// Fill a rectangle
    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: BinaryColor) {
        if w > 0 && h > 0 {
            let area = Rectangle::new(Point::new(x, y), Size::new(w as u32, h as u32));
            settle(self.fill_solid(&area, color));
        }
    }

    /// Draw a rounded rectangle outline with corner radius `r`
    fn draw_round_rect(&mut self, x: i32, y: i32, w: i32, h: i32, r: i32, color: BinaryColor) {
        if w > 0 && h > 0 {
            settle(
                rounded(x, y, w, h, r)
                    .into_styled(outline(color))
                    .draw(self),
            );
        }
    }

    /// Fill a rounded rectangle with corner radius `r`
    fn fill_round_rect(&mut self, x: i32, y: i32, w: i32, h: i32, r: i32, color: BinaryColor) {
        if w > 0 && h > 0 {
            settle(
                rounded(x, y, w, h, r)
                    .into_styled(PrimitiveStyle::with_fill(color))
                    .draw(self),
            );
        }
    }

    /// Draw a circle outline centred on (x, y)
    fn draw_circle(&mut self, x: i32, y: i32, r: i32, color: BinaryColor) {
        if r >= 0 {
            settle(
                Circle::with_center(Point::new(x, y), (2 * r + 1) as u32)
                    .into_styled(outline(color))
                    .draw(self),
            );
        }
    }

    /// Fill a circle centred on (x, y)
    fn fill_circle(&mut self, x: i32, y: i32, r: i32, color: BinaryColor) {
        if r >= 0 {
            settle(
                Circle::with_center(Point::new(x, y), (2 * r + 1) as u32)
                    .into_styled(PrimitiveStyle::with_fill(color))
                    .draw(self),
            );
        }
    }

    /// Draw a triangle outline
    #[allow(clippy::too_many_arguments)]
    fn draw_triangle(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        color: BinaryColor,
    ) {
        self.draw_line(x0, y0, x1, y1, color);
        self.draw_line(x1, y1, x2, y2, color);
        self.draw_line(x2, y2, x0, y0, color);
    }

    /// Fill a triangle
    #[allow(clippy::too_many_arguments)]
    fn fill_triangle(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        color: BinaryColor,
    ) {
        settle(
            Triangle::new(Point::new(x0, y0), Point::new(x1, y1), Point::new(x2, y2))
                .into_styled(PrimitiveStyle::with_fill(color))
                .draw(self),
        );
    }

    /// Blit a bit-packed image
    ///
    /// `bitmap` holds `ceil(w * h / 8)` bytes, row-major, MSB first, with no
    /// per-row padding. Set bits are painted in `color`; clear bits are left
    /// untouched. A short buffer draws as much as it covers.
    fn draw_bitmap(&mut self, x: i32, y: i32, bitmap: &[u8], w: i32, h: i32, color: BinaryColor) {
        if w <= 0 || h <= 0 {
            return;
        }
        let pixels = (0..h).flat_map(move |row| {
            (0..w).filter_map(move |col| {
                let bit = (row * w + col) as usize;
                let byte = *bitmap.get(bit / 8)?;
                (byte & (0x80 >> (bit % 8)) != 0)
                    .then(|| Pixel(Point::new(x + col, y + row), color))
            })
        });
        settle(self.draw_iter(pixels));
    }

    /// Move the text cursor
    fn set_cursor(&mut self, x: i32, y: i32) {
        let cursor = self.cursor_mut();
        cursor.x = x;
        cursor.y = y;
    }

    /// Set the text size multiplier; values outside 1..=4 are ignored
    fn set_text_size(&mut self, size: u8) {
        if (1..=MAX_TEXT_SIZE).contains(&size) {
            self.cursor_mut().size = size;
        }
    }

    /// Set the text color, optionally painting the cell background in the
    /// opposite color
    fn set_text_color(&mut self, color: BinaryColor, background: bool) {
        let cursor = self.cursor_mut();
        cursor.color = color;
        cursor.background = background.then(|| color.invert());
    }

    /// Enable or disable wrapping at the right edge
    fn set_text_wrap(&mut self, wrap: bool) {
        self.cursor_mut().wrap = wrap;
    }

    /// Draw one character cell at an explicit position
    fn draw_char(
        &mut self,
        x: i32,
        y: i32,
        c: char,
        color: BinaryColor,
        background: Option<BinaryColor>,
        size: u8,
    ) {
        let size = size.clamp(1, MAX_TEXT_SIZE);
        if let Some(bg) = background {
            let s = size as i32;
            self.fill_rect(x, y, CHAR_WIDTH * s, CHAR_HEIGHT * s, bg);
        }
        settle(font::draw_glyph(self, Point::new(x, y), c, color, size));
    }

    /// Print text at the cursor and advance it
    ///
    /// `\n` moves to the start of the next line, `\r` is ignored.
    fn print(&mut self, text: &str) {
        for c in text.chars() {
            let TextCursor {
                x,
                y,
                size,
                color,
                background,
                wrap,
            } = *self.cursor();
            let advance = CHAR_WIDTH * size as i32;
            let line = CHAR_HEIGHT * size as i32;

            match c {
                '\n' => self.set_cursor(0, y + line),
                '\r' => {}
                _ => {
                    let (x, y) = if wrap && x + advance > self.width() {
                        (0, y + line)
                    } else {
                        (x, y)
                    };
                    self.draw_char(x, y, c, color, background, size);
                    self.set_cursor(x + advance, y);
                }
            }
        }
    }

    /// Draw compact-font text with its top-left corner at (x, y)
    ///
    /// Characters without a compact glyph leave a blank cell.
    fn draw_tiny_text(&mut self, x: i32, y: i32, text: &str, scale: u8, color: BinaryColor) {
        let scale = scale.max(1);
        let mut pen = x;
        for c in text.chars() {
            settle(font::draw_tiny_glyph(self, Point::new(pen, y), c, color, scale));
            pen += TINY_ADVANCE * scale as i32;
        }
    }

    /// Draw a progress bar: outline plus a fill proportional to `percent`
    fn draw_progress_bar(&mut self, x: i32, y: i32, w: i32, h: i32, percent: u8) {
        let percent = percent.min(100) as i32;
        self.draw_rect(x, y, w, h, BinaryColor::On);
        let fill = ((w - 2) * percent) / 100;
        if fill > 0 {
            self.fill_rect(x + 1, y + 1, fill, h - 2, BinaryColor::On);
        }
    }

    /// Print text horizontally centred on the surface
    fn draw_centered_text(&mut self, text: &str, y: i32, size: u8) {
        let size = size.clamp(1, MAX_TEXT_SIZE);
        let width = font::text_width(text.chars().count(), size);
        self.set_text_size(size);
        self.set_cursor((self.width() - width) / 2, y);
        self.print(text);
    }

    /// Print a number whose right edge ends at `right_x`
    fn draw_right_aligned_number(&mut self, value: i32, right_x: i32, y: i32, size: u8) {
        let size = size.clamp(1, MAX_TEXT_SIZE);
        let mut digits: String<12> = String::new();
        let _ = write!(digits, "{}", value);
        let width = font::text_width(digits.len(), size);
        self.set_text_size(size);
        self.set_cursor(right_x - width, y);
        self.print(&digits);
    }
}

fn rounded(x: i32, y: i32, w: i32, h: i32, r: i32) -> RoundedRectangle {
    let r = r.max(0) as u32;
    RoundedRectangle::with_equal_corners(
        Rectangle::new(Point::new(x, y), Size::new(w as u32, h as u32)),
        Size::new(r, r),
    )
}
