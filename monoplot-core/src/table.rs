//! Table widget
//!
//! Cells live in a row-major store of `rows × cols` strings with one pixel
//! width per column. Text is stored untouched and only truncated when drawn.

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;

use monoplot_surface::{BinaryColor, Surface, CHAR_HEIGHT, CHAR_WIDTH};

use crate::asset::{AssetKind, Layer, Reveal, Widget};
use crate::config::TableConfig;

/// Pixels reserved for the outer border when splitting the width
const BORDER_ALLOWANCE: i32 = 2;

/// Extra height of the header row
const HEADER_EXTRA: i32 = 2;

/// Left padding of cell text
const CELL_PADDING: i32 = 2;

/// Table errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TableError {
    /// Row or column out of range
    OutOfBounds,
    /// Zero rows or zero columns requested
    InvalidShape,
}

/// Grid of text cells
#[derive(Debug, Clone)]
pub struct Table {
    layer: Layer,
    rows: usize,
    cols: usize,
    cells: Vec<String>,
    col_widths: Vec<i32>,
    config: TableConfig,
    reveal: Reveal,
}

impl Table {
    pub fn new(x: i32, y: i32, width: i32, height: i32, rows: usize, cols: usize) -> Self {
        Self::with_config(x, y, width, height, rows, cols, TableConfig::default())
    }

    /// Create a table; a zero dimension yields an empty table that draws
    /// nothing until resized
    pub fn with_config(
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        rows: usize,
        cols: usize,
        config: TableConfig,
    ) -> Self {
        let (rows, cols) = if rows == 0 || cols == 0 {
            (0, 0)
        } else {
            (rows, cols)
        };
        let layer = Layer::new(x, y, width, height);
        let mut table = Self {
            layer,
            rows,
            cols,
            cells: vec![String::new(); rows * cols],
            col_widths: vec![0; cols],
            config,
            reveal: Reveal::default(),
        };
        if config.auto_fit {
            table.fit_columns();
        } else if cols > 0 {
            let even = width / cols as i32;
            table.col_widths.iter_mut().for_each(|w| *w = even);
        }
        table
    }

    fn index(&self, row: usize, col: usize) -> Result<usize, TableError> {
        if row < self.rows && col < self.cols {
            Ok(row * self.cols + col)
        } else {
            Err(TableError::OutOfBounds)
        }
    }

    /// Store text in a cell and restart the reveal
    pub fn set_cell(&mut self, row: usize, col: usize, text: &str) -> Result<(), TableError> {
        let index = self.index(row, col)?;
        let cell = &mut self.cells[index];
        cell.clear();
        cell.push_str(text);
        self.reveal.reset();
        Ok(())
    }

    pub fn set_cell_int(&mut self, row: usize, col: usize, value: i32) -> Result<(), TableError> {
        let index = self.index(row, col)?;
        self.cells[index] = value.to_string();
        self.reveal.reset();
        Ok(())
    }

    /// Store a number with a fixed number of decimals
    pub fn set_cell_float(
        &mut self,
        row: usize,
        col: usize,
        value: f32,
        decimals: usize,
    ) -> Result<(), TableError> {
        let index = self.index(row, col)?;
        self.cells[index] = format!("{:.*}", decimals, value);
        self.reveal.reset();
        Ok(())
    }

    /// Cell text, or `""` outside the table
    pub fn get_cell(&self, row: usize, col: usize) -> &str {
        self.index(row, col)
            .map_or("", |index| self.cells[index].as_str())
    }

    pub fn clear_cell(&mut self, row: usize, col: usize) -> Result<(), TableError> {
        let index = self.index(row, col)?;
        self.cells[index].clear();
        self.reveal.reset();
        Ok(())
    }

    pub fn clear_all(&mut self) {
        self.cells.iter_mut().for_each(String::clear);
        self.reveal.reset();
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Change the shape, keeping the overlapping cells
    ///
    /// Existing columns keep their widths; new columns get an even share of
    /// the box width.
    pub fn resize(&mut self, rows: usize, cols: usize) -> Result<(), TableError> {
        if rows == 0 || cols == 0 {
            return Err(TableError::InvalidShape);
        }
        let mut cells = vec![String::new(); rows * cols];
        for r in 0..rows.min(self.rows) {
            for c in 0..cols.min(self.cols) {
                cells[r * cols + c] = core::mem::take(&mut self.cells[r * self.cols + c]);
            }
        }
        let even = self.layer.width / cols as i32;
        let col_widths = (0..cols)
            .map(|c| self.col_widths.get(c).copied().unwrap_or(even))
            .collect();

        self.cells = cells;
        self.col_widths = col_widths;
        self.rows = rows;
        self.cols = cols;
        if self.config.auto_fit {
            self.fit_columns();
        }
        self.reveal.reset();
        Ok(())
    }

    /// Fix one column's width and turn auto-fit off; non-positive widths
    /// and unknown columns are ignored
    pub fn set_column_width(&mut self, col: usize, width: i32) {
        if width > 0 {
            if let Some(w) = self.col_widths.get_mut(col) {
                *w = width;
                self.config.auto_fit = false;
            }
        }
    }

    /// Column width in pixels, 0 outside the table
    pub fn column_width(&self, col: usize) -> i32 {
        self.col_widths.get(col).copied().unwrap_or(0)
    }

    /// Fix every column's width and turn auto-fit off
    pub fn set_all_column_widths(&mut self, width: i32) {
        if width > 0 {
            self.col_widths.iter_mut().for_each(|w| *w = width);
            self.config.auto_fit = false;
        }
    }

    pub fn set_row_height(&mut self, height: i32) {
        if height > 0 {
            self.config.row_height = height;
        }
    }

    pub fn row_height(&self) -> i32 {
        self.config.row_height
    }

    /// Set the text size; values outside 1..=4 are ignored
    pub fn set_text_size(&mut self, size: u8) {
        if (1..=4).contains(&size) {
            self.config.text_size = size;
        }
    }

    pub fn text_size(&self) -> u8 {
        self.config.text_size
    }

    pub fn set_show_headers(&mut self, show: bool) {
        self.config.show_headers = show;
    }

    pub fn show_headers(&self) -> bool {
        self.config.show_headers
    }

    pub fn set_show_grid_lines(&mut self, show: bool) {
        self.config.show_grid = show;
    }

    pub fn show_grid_lines(&self) -> bool {
        self.config.show_grid
    }

    pub fn set_auto_fit(&mut self, auto_fit: bool) {
        self.config.auto_fit = auto_fit;
        if auto_fit {
            self.fit_columns();
        }
    }

    pub fn auto_fit(&self) -> bool {
        self.config.auto_fit
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Split the interior width evenly; the remainder goes to the last column
    fn fit_columns(&mut self) {
        if self.cols == 0 {
            return;
        }
        let available = self.layer.width - BORDER_ALLOWANCE;
        let cols = self.cols as i32;
        let even = available / cols;
        let remainder = available - even * cols;
        self.col_widths.iter_mut().for_each(|w| *w = even);
        if remainder > 0 {
            if let Some(last) = self.col_widths.last_mut() {
                *last += remainder;
            }
        }
    }

    fn row_height_of(&self, row: usize) -> i32 {
        if self.config.show_headers && row == 0 {
            self.config.row_height + HEADER_EXTRA
        } else {
            self.config.row_height
        }
    }

    fn draw_cell<S: Surface>(&self, surface: &mut S, row: usize, col: usize, cell: (i32, i32, i32, i32)) {
        let (x, y, w, h) = cell;
        let size = self.config.text_size;
        let char_width = CHAR_WIDTH * size as i32;
        let capacity = (w - 2 * CELL_PADDING) / char_width;
        if capacity > 0 {
            let text = self.get_cell(row, col);
            let text_y = y + (h - CHAR_HEIGHT * size as i32) / 2;
            for (i, c) in text.chars().take(capacity as usize).enumerate() {
                let cx = x + CELL_PADDING + i as i32 * char_width;
                surface.draw_char(cx, text_y, c, BinaryColor::On, None, size);
            }
        }
        if self.config.show_headers && row == 0 {
            surface.draw_hline(x, y + h - 1, w, BinaryColor::On);
        }
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new(0, 0, 80, 40, 3, 3)
    }
}

impl Widget for Table {
    fn kind(&self) -> AssetKind {
        AssetKind::Table
    }

    fn layer(&self) -> &Layer {
        &self.layer
    }

    fn layer_mut(&mut self) -> &mut Layer {
        &mut self.layer
    }

    /// Rows are revealed one per draw when animated
    fn draw<S: Surface>(&mut self, surface: &mut S) {
        if self.rows == 0 || self.cols == 0 {
            return;
        }
        let layer = self.layer;
        if layer.border {
            surface.draw_rect(layer.x, layer.y, layer.width, layer.height, BinaryColor::On);
        }
        if self.config.auto_fit {
            self.fit_columns();
        }

        let shown = self.reveal.on_draw(layer.animate, self.rows);
        let mut y = layer.y + 1;
        for row in 0..shown {
            let h = self.row_height_of(row);
            if y + h > layer.bottom() {
                break;
            }
            let mut x = layer.x + 1;
            for col in 0..self.cols {
                if x >= layer.right() {
                    break;
                }
                let w = self.col_widths[col].min(layer.right() - x);
                self.draw_cell(surface, row, col, (x, y, w, h));
                if self.config.show_grid && col + 1 < self.cols {
                    surface.draw_vline(x + w, y, h, BinaryColor::On);
                }
                x += w;
            }
            if self.config.show_grid && row + 1 < self.rows {
                surface.draw_hline(layer.x + 1, y + h, layer.width - 2, BinaryColor::On);
            }
            y += h;
        }
    }

    fn animation_frame(&self) -> usize {
        self.reveal.frame()
    }

    fn reset_animation(&mut self) {
        self.reveal.reset();
    }

    fn advance_animation(&mut self) {
        let limit = self.rows;
        self.reveal.advance(limit);
    }
}
