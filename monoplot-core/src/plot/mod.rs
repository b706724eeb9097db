//! Plot widgets
//!
//! [`DataPlot`] draws a buffered (x, y) series, [`FunctionPlot`] samples a
//! function once per pixel column. Both share the same pipeline:
//!
//! 1. Pick the working [`Domain`] (fixed, or auto-scaled from the content)
//! 2. Reserve label margins and derive the content area
//! 3. Draw border, grid, axes, ticks and labels
//! 4. Plot, lifting the pen wherever the content leaves the domain
//!
//! With animation on, every draw reveals one more point (data plot) or
//! one more pixel column (function plot).

/// Chrome and label accessors shared by both plot kinds
macro_rules! plot_options {
    ($ty:ty) => {
        impl $ty {
            /// Current chrome and label options
            pub fn config(&self) -> &$crate::config::PlotConfig {
                &self.config
            }

            /// Replace all chrome and label options
            pub fn set_config(&mut self, config: $crate::config::PlotConfig) {
                self.config = config;
            }

            pub fn set_show_axes(&mut self, show: bool) {
                self.config.show_axes = show;
            }

            pub fn set_show_grid(&mut self, show: bool) {
                self.config.show_grid = show;
            }

            /// Set the grid spacing; 0 is ignored
            pub fn set_grid_spacing(&mut self, spacing: u8) {
                if spacing > 0 {
                    self.config.grid_spacing = spacing;
                }
            }

            pub fn set_show_axis_labels(&mut self, show: bool) {
                self.config.labels.show = show;
            }

            /// Set the standard label font size; values outside 1..=4 are
            /// ignored
            pub fn set_axis_label_size(&mut self, size: u8) {
                if (1..=4).contains(&size) {
                    self.config.labels.size = size;
                }
            }

            pub fn set_use_tiny_axis_labels(&mut self, use_tiny: bool) {
                self.config.labels.use_tiny = use_tiny;
            }

            /// Set the compact label scale; 0 is ignored
            pub fn set_tiny_axis_label_scale(&mut self, scale: u8) {
                if scale > 0 {
                    self.config.labels.tiny_scale = scale;
                }
            }

            pub fn set_auto_tiny_axis_labels(&mut self, auto: bool) {
                self.config.labels.auto_tiny = auto;
            }

            pub fn set_tiny_label_threshold(&mut self, threshold: u8) {
                self.config.labels.tiny_threshold = threshold;
            }

            /// Set the tick count per axis; 0 ticks every grid spacing
            pub fn set_max_ticks(&mut self, max_ticks: u8) {
                self.config.labels.max_ticks = max_ticks;
            }

            /// Content area for the current box, options and domain
            pub fn plot_area(&self) -> $crate::plot::PlotArea {
                $crate::plot::chrome::layout(&self.layer, &self.config, &self.domain).area
            }
        }
    };
}

mod chrome;
mod data;
mod function;
mod mapping;
mod ticks;

pub use chrome::{LabelFont, PlacedLabel};
pub use data::{DataPlot, DEFAULT_CAPACITY};
pub use function::{FunctionPlot, PlotFn};
pub use mapping::{padded_range, Domain, PlotArea, Viewport, AUTO_PADDING, MIN_RANGE};
pub use ticks::{format_label, tick_offsets, LabelTrack, MAX_TICKS};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How a data series is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PlotStyle {
    /// Connect consecutive points
    #[default]
    Lines,
    /// A plus mark per point
    Points,
    /// Both
    LinesPoints,
}

impl PlotStyle {
    pub const fn has_lines(self) -> bool {
        matches!(self, PlotStyle::Lines | PlotStyle::LinesPoints)
    }

    pub const fn has_points(self) -> bool {
        matches!(self, PlotStyle::Points | PlotStyle::LinesPoints)
    }
}
