//! Frame buffer
//!
//! A 128x64 one-bit buffer organised as eight pages of 128 columns, one
//! byte per column per page. Bit 0 of a byte is the top row of its page.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use crate::surface::{Surface, TextCursor};

/// Surface width in pixels
pub const WIDTH: usize = 128;

/// Surface height in pixels
pub const HEIGHT: usize = 64;

/// Number of 8-row pages
pub const PAGES: usize = HEIGHT / 8;

/// Two-tone frame buffer
///
/// All writes land in RAM; nothing here talks to hardware. Out-of-range
/// pixels are dropped.
#[derive(Clone)]
pub struct Canvas {
    /// Frame buffer (1 bit per pixel, organized as pages)
    buffer: [[u8; WIDTH]; PAGES],
    /// Present the buffer inverted
    inverted: bool,
    /// Text cursor for `print`
    cursor: TextCursor,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Create a blank canvas
    pub const fn new() -> Self {
        Self {
            buffer: [[0; WIDTH]; PAGES],
            inverted: false,
            cursor: TextCursor {
                x: 0,
                y: 0,
                size: 1,
                color: BinaryColor::On,
                background: None,
                wrap: true,
            },
        }
    }

    /// Turn every pixel off
    pub fn clear_buffer(&mut self) {
        for page in self.buffer.iter_mut() {
            page.fill(0);
        }
    }

    /// Read back a pixel; `None` outside the surface
    pub fn pixel(&self, x: i32, y: i32) -> Option<bool> {
        let (x, y) = Self::index(x, y)?;
        Some(self.buffer[y / 8][x] & (1 << (y % 8)) != 0)
    }

    /// Whether the pixel at (x, y) is on (false outside the surface)
    pub fn is_on(&self, x: i32, y: i32) -> bool {
        self.pixel(x, y).unwrap_or(false)
    }

    /// Number of lit pixels in the buffer
    pub fn count_on(&self) -> usize {
        self.buffer
            .iter()
            .flat_map(|page| page.iter())
            .map(|byte| byte.count_ones() as usize)
            .sum()
    }

    /// Number of lit pixels inside a box (clipped to the surface)
    pub fn count_on_in(&self, x: i32, y: i32, w: i32, h: i32) -> usize {
        (y..y + h)
            .flat_map(|py| (x..x + w).map(move |px| (px, py)))
            .filter(|&(px, py)| self.is_on(px, py))
            .count()
    }

    /// Invert presentation (affects `page` output only)
    pub fn set_inverted(&mut self, inverted: bool) {
        self.inverted = inverted;
    }

    /// Check if presentation is inverted
    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    /// Page bytes ready to send to the panel
    ///
    /// Returns `None` for pages past the bottom of the surface.
    pub fn page(&self, page: usize) -> Option<[u8; WIDTH]> {
        let mut data = *self.buffer.get(page)?;
        if self.inverted {
            for byte in data.iter_mut() {
                *byte = !*byte;
            }
        }
        Some(data)
    }

    /// Raw frame buffer
    pub fn pages(&self) -> &[[u8; WIDTH]; PAGES] {
        &self.buffer
    }

    fn index(x: i32, y: i32) -> Option<(usize, usize)> {
        let x = usize::try_from(x).ok().filter(|&x| x < WIDTH)?;
        let y = usize::try_from(y).ok().filter(|&y| y < HEIGHT)?;
        Some((x, y))
    }

    fn set(&mut self, x: i32, y: i32, on: bool) {
        if let Some((x, y)) = Self::index(x, y) {
            let mask = 1 << (y % 8);
            if on {
                self.buffer[y / 8][x] |= mask;
            } else {
                self.buffer[y / 8][x] &= !mask;
            }
        }
    }
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for Canvas {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set(point.x, point.y, color.is_on());
        }
        Ok(())
    }
}

impl Surface for Canvas {
    fn cursor(&self) -> &TextCursor {
        &self.cursor
    }

    fn cursor_mut(&mut self) -> &mut TextCursor {
        &mut self.cursor
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Canvas {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Canvas[{}x{}, lit={}, inverted={}]",
            WIDTH,
            HEIGHT,
            self.count_on(),
            self.inverted
        );
    }
}
