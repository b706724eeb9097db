//! Text box widget
//!
//! Word-wrapped or single-line text inside a padded box, with an optional
//! typewriter reveal (one more character per draw).

use alloc::string::String;

use monoplot_surface::{BinaryColor, Surface, CHAR_HEIGHT, CHAR_WIDTH};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::asset::{AssetKind, Layer, Reveal, Widget};
use crate::config::TextConfig;

/// Inner padding between the box edge and the text
pub const PADDING: i32 = 2;

/// Horizontal alignment of each text line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Split `text` into lines of at most `max_chars` characters
///
/// A line breaks at the last space that leaves a non-empty line, and the
/// space is dropped; a word longer than the line is cut hard.
pub fn wrap_lines(text: &str, max_chars: usize) -> impl Iterator<Item = &str> {
    let mut rest = if max_chars == 0 { "" } else { text };
    core::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let cut = char_boundary(rest, max_chars);
        if cut == rest.len() {
            return Some(core::mem::take(&mut rest));
        }
        let line = match rest[..cut].rfind(' ') {
            Some(space) if space > 0 => {
                let line = &rest[..space];
                rest = &rest[space + 1..];
                line
            }
            _ => {
                let line = &rest[..cut];
                rest = &rest[cut..];
                line
            }
        };
        Some(line)
    })
}

/// Byte offset of the `n`-th character, or the length if there are fewer
fn char_boundary(text: &str, n: usize) -> usize {
    text.char_indices().nth(n).map_or(text.len(), |(i, _)| i)
}

/// First `n` characters of `text`
fn prefix(text: &str, n: usize) -> &str {
    &text[..char_boundary(text, n)]
}

/// Padded text box
#[derive(Debug, Clone)]
pub struct TextBox {
    layer: Layer,
    text: String,
    config: TextConfig,
    reveal: Reveal,
}

impl TextBox {
    pub fn new(x: i32, y: i32, width: i32, height: i32, text: &str) -> Self {
        Self::with_config(x, y, width, height, text, TextConfig::default())
    }

    pub fn with_config(
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        text: &str,
        config: TextConfig,
    ) -> Self {
        Self {
            layer: Layer::new(x, y, width, height),
            text: String::from(text),
            config,
            reveal: Reveal::default(),
        }
    }

    /// Replace the text and restart the reveal
    pub fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
        self.reveal.reset();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn config(&self) -> &TextConfig {
        &self.config
    }

    /// Set the text size; values outside 1..=4 are ignored
    pub fn set_text_size(&mut self, size: u8) {
        if (1..=4).contains(&size) {
            self.config.size = size;
        }
    }

    pub fn text_size(&self) -> u8 {
        self.config.size
    }

    pub fn set_alignment(&mut self, align: TextAlign) {
        self.config.align = align;
    }

    pub fn alignment(&self) -> TextAlign {
        self.config.align
    }

    pub fn set_word_wrap(&mut self, wrap: bool) {
        self.config.wrap = wrap;
    }

    pub fn word_wrap(&self) -> bool {
        self.config.wrap
    }

    pub fn set_fill_background(&mut self, fill: bool) {
        self.config.fill_background = fill;
    }

    pub fn fill_background(&self) -> bool {
        self.config.fill_background
    }

    /// Characters that fit on one line
    pub fn line_capacity(&self) -> usize {
        let char_width = CHAR_WIDTH * self.config.size as i32;
        ((self.layer.width - 2 * PADDING) / char_width).max(0) as usize
    }

    /// Number of lines the full text occupies
    ///
    /// Without word wrap any text is one line.
    pub fn calculate_lines(&self) -> usize {
        if self.text.is_empty() {
            0
        } else if !self.config.wrap {
            1
        } else {
            wrap_lines(&self.text, self.line_capacity()).count()
        }
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    fn line_x(&self, chars: usize) -> i32 {
        let width = chars as i32 * CHAR_WIDTH * self.config.size as i32;
        match self.config.align {
            TextAlign::Left => self.layer.x + PADDING,
            TextAlign::Center => self.layer.x + (self.layer.width - width) / 2,
            TextAlign::Right => self.layer.right() - width - PADDING,
        }
    }

    fn draw_line<S: Surface>(&self, surface: &mut S, line: &str, y: i32) {
        let size = self.config.size;
        let advance = CHAR_WIDTH * size as i32;
        let background = self.config.fill_background.then_some(BinaryColor::Off);
        let x = self.line_x(line.chars().count());
        for (i, c) in line.chars().enumerate() {
            surface.draw_char(x + i as i32 * advance, y, c, BinaryColor::On, background, size);
        }
    }
}

impl Default for TextBox {
    fn default() -> Self {
        Self::new(0, 0, 60, 10, "")
    }
}

impl Widget for TextBox {
    fn kind(&self) -> AssetKind {
        AssetKind::Text
    }

    fn layer(&self) -> &Layer {
        &self.layer
    }

    fn layer_mut(&mut self) -> &mut Layer {
        &mut self.layer
    }

    fn draw<S: Surface>(&mut self, surface: &mut S) {
        let layer = self.layer;
        if layer.border {
            surface.draw_rect(layer.x, layer.y, layer.width, layer.height, BinaryColor::On);
        }
        if self.config.fill_background {
            surface.fill_rect(
                layer.x + 1,
                layer.y + 1,
                layer.width - 2,
                layer.height - 2,
                BinaryColor::Off,
            );
        }

        let shown = self.reveal.on_draw(layer.animate, self.char_count());
        let visible = prefix(&self.text, shown);
        let max_chars = self.line_capacity();
        let line_height = CHAR_HEIGHT * self.config.size as i32;
        let top = layer.y + PADDING;

        if self.config.wrap {
            let limit = layer.bottom() - PADDING;
            let mut y = top;
            for line in wrap_lines(visible, max_chars) {
                if y + line_height > limit {
                    break;
                }
                self.draw_line(surface, line, y);
                y += line_height;
            }
        } else {
            self.draw_line(surface, prefix(visible, max_chars), top);
        }
    }

    fn animation_frame(&self) -> usize {
        self.reveal.frame()
    }

    fn reset_animation(&mut self) {
        self.reveal.reset();
    }

    fn advance_animation(&mut self) {
        let limit = self.char_count();
        self.reveal.advance(limit);
    }
}
