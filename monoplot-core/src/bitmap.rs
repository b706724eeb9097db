//! Bit-packed image widget
//!
//! Pixel data is one bit per pixel, row-major, MSB first, with no per-row
//! padding: `ceil(w * h / 8)` bytes for a `w × h` image.

use alloc::vec;
use alloc::vec::Vec;

use monoplot_surface::{BinaryColor, Surface};

use crate::asset::{AssetKind, Layer, Widget};

/// Bytes needed for a `width × height` image
pub fn packed_len(width: i32, height: i32) -> usize {
    let bits = width.max(0) as usize * height.max(0) as usize;
    bits.div_ceil(8)
}

/// Image storage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PixelData {
    #[default]
    Empty,
    /// Caller-provided bytes that outlive the widget
    Borrowed(&'static [u8]),
    /// Bytes owned by the widget, dropped on replacement
    Owned(Vec<u8>),
}

impl PixelData {
    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            PixelData::Empty => None,
            PixelData::Borrowed(bytes) => Some(*bytes),
            PixelData::Owned(bytes) => Some(bytes.as_slice()),
        }
    }

    pub fn is_owned(&self) -> bool {
        matches!(self, PixelData::Owned(_))
    }
}

/// Packs pixels produced by `lit(row, col)` for a `width × height` image
fn pack(width: i32, height: i32, lit: impl Fn(i32, i32) -> bool) -> Vec<u8> {
    let mut bytes = vec![0u8; packed_len(width, height)];
    for row in 0..height {
        for col in 0..width {
            if lit(row, col) {
                let bit = (row * width + col) as usize;
                bytes[bit / 8] |= 0x80 >> (bit % 8);
            }
        }
    }
    bytes
}

/// Image asset
#[derive(Debug, Clone, Default)]
pub struct Bitmap {
    layer: Layer,
    data: PixelData,
    inverted: bool,
}

impl Bitmap {
    /// Create an image box with no pixel data
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            layer: Layer::new(x, y, width, height),
            data: PixelData::Empty,
            inverted: false,
        }
    }

    /// Create an image over caller-provided bytes
    pub fn with_data(x: i32, y: i32, width: i32, height: i32, data: &'static [u8]) -> Self {
        let mut bitmap = Self::new(x, y, width, height);
        bitmap.set_data_borrowed(data);
        bitmap
    }

    pub fn set_data_borrowed(&mut self, data: &'static [u8]) {
        self.data = PixelData::Borrowed(data);
    }

    /// Take ownership of `data`
    pub fn set_data_owned(&mut self, data: Vec<u8>) {
        self.data = PixelData::Owned(data);
    }

    pub fn data(&self) -> &PixelData {
        &self.data
    }

    /// Drop owned pixel data; borrowed data is kept
    pub fn free_data(&mut self) {
        if self.data.is_owned() {
            self.data = PixelData::Empty;
        }
    }

    /// Pack one flag per pixel, row-major
    ///
    /// Flags beyond the image are ignored and missing ones stay clear. An
    /// empty slice only releases owned data.
    pub fn fill_from_pattern(&mut self, pattern: &[bool]) {
        self.free_data();
        if pattern.is_empty() {
            return;
        }
        let width = self.layer.width;
        self.data = PixelData::Owned(pack(width, self.layer.height, |row, col| {
            pattern
                .get((row * width + col) as usize)
                .copied()
                .unwrap_or(false)
        }));
    }

    /// Alternating squares of `size` pixels, lit at the top-left; sizes
    /// below 1 use 1
    pub fn create_checkerboard(&mut self, size: i32) {
        let size = size.max(1);
        self.data = PixelData::Owned(pack(self.layer.width, self.layer.height, |row, col| {
            (row / size + col / size) % 2 == 0
        }));
    }

    /// Dithered ramp that thins out to the right (horizontal) or downwards
    pub fn create_gradient(&mut self, horizontal: bool) {
        let (width, height) = (self.layer.width, self.layer.height);
        self.data = PixelData::Owned(pack(width, height, |row, col| {
            let percent = if horizontal {
                col * 100 / width
            } else {
                row * 100 / height
            };
            (row + col) % 4 < 4 - percent / 25
        }));
    }

    /// Draw set bits in the "off" colour instead
    pub fn set_inverted(&mut self, inverted: bool) {
        self.inverted = inverted;
    }

    pub fn is_inverted(&self) -> bool {
        self.inverted
    }
}

impl Widget for Bitmap {
    fn kind(&self) -> AssetKind {
        AssetKind::Bitmap
    }

    fn layer(&self) -> &Layer {
        &self.layer
    }

    fn layer_mut(&mut self) -> &mut Layer {
        &mut self.layer
    }

    fn draw<S: Surface>(&mut self, surface: &mut S) {
        let Some(bytes) = self.data.bytes() else {
            return;
        };
        let layer = self.layer;
        if layer.border {
            surface.draw_rect(layer.x, layer.y, layer.width, layer.height, BinaryColor::On);
        }
        let color = if self.inverted {
            BinaryColor::Off
        } else {
            BinaryColor::On
        };
        surface.draw_bitmap(layer.x, layer.y, bytes, layer.width, layer.height, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use monoplot_surface::Canvas;

    static ARROW: [u8; 2] = [0b1000_0000, 0b0000_0001];

    #[test]
    fn test_packed_len() {
        assert_eq!(packed_len(8, 8), 8);
        assert_eq!(packed_len(3, 3), 2);
        assert_eq!(packed_len(-1, 4), 0);
    }

    #[test]
    fn test_checkerboard_bits() {
        let mut bitmap = Bitmap::new(0, 0, 4, 2);
        bitmap.create_checkerboard(1);
        assert_eq!(bitmap.data().bytes(), Some(&[0b1010_0101][..]));

        bitmap.create_checkerboard(0);
        assert_eq!(bitmap.data().bytes(), Some(&[0b1010_0101][..]));

        bitmap.create_checkerboard(2);
        assert_eq!(bitmap.data().bytes(), Some(&[0b1100_1100][..]));
    }

    #[test]
    fn test_gradient_thins_out() {
        let mut bitmap = Bitmap::new(0, 0, 40, 8);
        bitmap.create_gradient(true);
        let mut canvas = Canvas::new();
        bitmap.draw(&mut canvas);
        let left = canvas.count_on_in(0, 0, 10, 8);
        let right = canvas.count_on_in(30, 0, 10, 8);
        assert_eq!(left, 80);
        assert!(right < left);
    }

    #[test]
    fn test_vertical_gradient() {
        let mut bitmap = Bitmap::new(0, 0, 8, 40);
        bitmap.create_gradient(false);
        let mut canvas = Canvas::new();
        bitmap.draw(&mut canvas);
        assert!(canvas.count_on_in(0, 0, 8, 10) > canvas.count_on_in(0, 30, 8, 10));
    }

    #[test]
    fn test_from_pattern() {
        let mut bitmap = Bitmap::new(0, 0, 3, 3);
        bitmap.fill_from_pattern(&[true, false, false, false, true]);
        assert_eq!(bitmap.data().bytes(), Some(&[0b1000_1000, 0][..]));
        assert!(bitmap.data().is_owned());

        bitmap.fill_from_pattern(&[]);
        assert_eq!(bitmap.data(), &PixelData::Empty);
    }

    #[test]
    fn test_borrowed_data_survives_free() {
        let mut bitmap = Bitmap::with_data(0, 0, 4, 4, &ARROW);
        bitmap.free_data();
        assert_eq!(bitmap.data(), &PixelData::Borrowed(&ARROW));

        let mut canvas = Canvas::new();
        bitmap.draw(&mut canvas);
        assert!(canvas.is_on(0, 0));
        assert!(canvas.is_on(3, 3));
        assert_eq!(canvas.count_on(), 2);
    }

    #[test]
    fn test_inverted_clears_pixels() {
        let mut canvas = Canvas::new();
        canvas.fill_screen(BinaryColor::On);
        let mut bitmap = Bitmap::new(0, 0, 4, 2);
        bitmap.create_checkerboard(1);
        bitmap.set_inverted(true);
        bitmap.draw(&mut canvas);
        assert!(!canvas.is_on(0, 0));
        assert!(canvas.is_on(1, 0));
    }

    #[test]
    fn test_empty_draws_nothing() {
        let mut canvas = Canvas::new();
        let mut bitmap = Bitmap::new(0, 0, 8, 8);
        bitmap.set_border(true);
        bitmap.draw(&mut canvas);
        assert_eq!(canvas.count_on(), 0);
    }
}
