//! Two-tone frame buffer and drawing primitives for Monoplot
//!
//! This crate provides:
//! - `Canvas`, a fixed 128x64 one-bit frame buffer in panel page layout
//! - `Surface`, the drawing contract widgets render against
//! - The standard 6x8 text cell font and the compact 3x5 label font
//!
//! # Clipping
//!
//! Nothing in this crate fails. Coordinates are signed and any pixel that
//! falls outside the surface is dropped silently, so widgets may hang
//! partially off screen.
//!
//! # Presenting
//!
//! The buffer is laid out in eight 128-byte pages (LSB = top row of the
//! page), matching SSD1306/SH1106 controllers. Board firmware reads the
//! pages with [`Canvas::page`] and pushes them over its own transport.

#![no_std]
#![deny(unsafe_code)]

pub mod canvas;
pub mod font;
pub mod surface;

// Re-export key types
pub use canvas::{Canvas, HEIGHT, PAGES, WIDTH};
pub use embedded_graphics::pixelcolor::BinaryColor;
pub use font::{CHAR_HEIGHT, CHAR_WIDTH, TINY_ADVANCE, TINY_LINE_HEIGHT};
pub use surface::{Surface, TextCursor};
