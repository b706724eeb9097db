//! Widget configuration and declarative scenes
//!
//! The `*Config` structs hold the display options of each widget kind and
//! are what the widgets store internally. [`SceneConfig`] describes a whole
//! screen (a list of assets with their placement and flags) and builds a
//! populated [`Compositor`].

use heapless::{String, Vec};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::asset::{Asset, Widget};
use crate::bitmap::Bitmap;
use crate::compositor::{AssetId, Compositor, CompositorError, MAX_ASSETS};
use crate::geometry::{Geometry, Shape};
use crate::plot::{DataPlot, Domain, FunctionPlot, PlotStyle};
use crate::table::Table;
use crate::text::{TextAlign, TextBox};

/// Maximum text length in a scene description
pub const MAX_SCENE_TEXT: usize = 64;

/// Maximum preloaded points per data plot in a scene description
pub const MAX_SCENE_POINTS: usize = 64;

/// Axis label options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AxisLabelConfig {
    /// Draw numeric labels and tick marks
    pub show: bool,
    /// Standard font size multiplier (1..=4)
    pub size: u8,
    /// Always use the compact 3×5 font
    pub use_tiny: bool,
    /// Compact font pixel scale
    pub tiny_scale: u8,
    /// Switch to the compact font when the plot area is small
    pub auto_tiny: bool,
    /// Smaller side of the plot area, in pixels, below which `auto_tiny`
    /// kicks in
    pub tiny_threshold: u8,
    /// Ticks per axis; 0 places ticks every grid spacing instead
    pub max_ticks: u8,
}

impl Default for AxisLabelConfig {
    fn default() -> Self {
        Self {
            show: false,
            size: 1,
            use_tiny: false,
            tiny_scale: 1,
            auto_tiny: true,
            tiny_threshold: 48,
            max_ticks: 5,
        }
    }
}

/// Plot chrome options shared by data and function plots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlotConfig {
    /// Draw axis lines through zero
    pub show_axes: bool,
    /// Draw the dotted grid
    pub show_grid: bool,
    /// Grid spacing in pixels (non-zero)
    pub grid_spacing: u8,
    /// Axis labels
    pub labels: AxisLabelConfig,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            show_axes: true,
            show_grid: false,
            grid_spacing: 10,
            labels: AxisLabelConfig::default(),
        }
    }
}

/// Table display options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TableConfig {
    /// Body row height in pixels
    pub row_height: i32,
    /// Text size multiplier (1..=4)
    pub text_size: u8,
    /// Treat row 0 as a header (taller and underlined)
    pub show_headers: bool,
    /// Grid lines between rows and columns
    pub show_grid: bool,
    /// Split the box width evenly across columns on every draw
    pub auto_fit: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            row_height: 10,
            text_size: 1,
            show_headers: true,
            show_grid: true,
            auto_fit: true,
        }
    }
}

/// Text box display options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TextConfig {
    /// Text size multiplier (1..=4)
    pub size: u8,
    /// Horizontal alignment of each line
    pub align: TextAlign,
    /// Break lines at word boundaries; otherwise one truncated line
    pub wrap: bool,
    /// Clear the interior before drawing
    pub fill_background: bool,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            size: 1,
            align: TextAlign::Left,
            wrap: true,
            fill_background: false,
        }
    }
}

/// Functions a scene can plot by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BuiltinFunction {
    #[default]
    Sin,
    Cos,
    Square,
    Reciprocal,
    Identity,
}

impl BuiltinFunction {
    pub fn function(self) -> fn(f32) -> f32 {
        match self {
            BuiltinFunction::Sin => libm::sinf,
            BuiltinFunction::Cos => libm::cosf,
            BuiltinFunction::Square => square,
            BuiltinFunction::Reciprocal => reciprocal,
            BuiltinFunction::Identity => identity,
        }
    }
}

fn square(x: f32) -> f32 {
    x * x
}

fn reciprocal(x: f32) -> f32 {
    1.0 / x
}

fn identity(x: f32) -> f32 {
    x
}

/// Procedural bitmap content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BitmapPattern {
    Checkerboard { size: i32 },
    Gradient { horizontal: bool },
}

/// Widget-specific part of an [`AssetConfig`]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum WidgetConfig {
    Text {
        text: String<MAX_SCENE_TEXT>,
        #[cfg_attr(feature = "serde", serde(default))]
        style: TextConfig,
    },
    DataPlot {
        #[cfg_attr(feature = "serde", serde(default = "default_capacity"))]
        capacity: usize,
        #[cfg_attr(feature = "serde", serde(default))]
        style: PlotStyle,
        #[cfg_attr(feature = "serde", serde(default))]
        plot: PlotConfig,
        #[cfg_attr(feature = "serde", serde(default))]
        points: Vec<[f32; 2], MAX_SCENE_POINTS>,
    },
    FunctionPlot {
        function: BuiltinFunction,
        #[cfg_attr(feature = "serde", serde(default))]
        domain: Option<Domain>,
        #[cfg_attr(feature = "serde", serde(default))]
        auto_scale_y: bool,
        #[cfg_attr(feature = "serde", serde(default))]
        plot: PlotConfig,
    },
    Table {
        rows: usize,
        cols: usize,
        #[cfg_attr(feature = "serde", serde(default))]
        table: TableConfig,
    },
    Geometry {
        shape: Shape,
        #[cfg_attr(feature = "serde", serde(default))]
        filled: bool,
    },
    Bitmap {
        pattern: BitmapPattern,
        #[cfg_attr(feature = "serde", serde(default))]
        inverted: bool,
    },
}

#[cfg(feature = "serde")]
fn default_capacity() -> usize {
    crate::plot::DEFAULT_CAPACITY
}

#[cfg(feature = "serde")]
fn default_visible() -> bool {
    true
}

/// One asset in a scene
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AssetConfig {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub z_index: i16,
    #[cfg_attr(feature = "serde", serde(default = "default_visible"))]
    pub visible: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub border: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub animate: bool,
    pub widget: WidgetConfig,
}

impl AssetConfig {
    /// Construct the described widget
    pub fn build(&self) -> Asset {
        let (x, y, w, h) = (self.x, self.y, self.width, self.height);
        let mut asset: Asset = match &self.widget {
            WidgetConfig::Text { text, style } => {
                TextBox::with_config(x, y, w, h, text, *style).into()
            }
            WidgetConfig::DataPlot {
                capacity,
                style,
                plot,
                points,
            } => {
                let mut data_plot = DataPlot::with_config(x, y, w, h, *capacity, *plot);
                data_plot.set_style(*style);
                for &[px, py] in points.iter() {
                    data_plot.add_point(px, py);
                }
                data_plot.into()
            }
            WidgetConfig::FunctionPlot {
                function,
                domain,
                auto_scale_y,
                plot,
            } => {
                let mut function_plot =
                    FunctionPlot::with_config(x, y, w, h, Some(function.function()), *plot);
                if let Some(domain) = domain {
                    function_plot.set_x_range(domain.min_x, domain.max_x);
                    function_plot.set_y_range(domain.min_y, domain.max_y);
                }
                function_plot.set_auto_scale_y(*auto_scale_y);
                function_plot.into()
            }
            WidgetConfig::Table { rows, cols, table } => {
                Table::with_config(x, y, w, h, *rows, *cols, *table).into()
            }
            WidgetConfig::Geometry { shape, filled } => {
                Geometry::new(x, y, w, h, *shape, *filled).into()
            }
            WidgetConfig::Bitmap { pattern, inverted } => {
                let mut bitmap = Bitmap::new(x, y, w, h);
                match *pattern {
                    BitmapPattern::Checkerboard { size } => bitmap.create_checkerboard(size),
                    BitmapPattern::Gradient { horizontal } => bitmap.create_gradient(horizontal),
                }
                bitmap.set_inverted(*inverted);
                bitmap.into()
            }
        };

        let layer = asset.layer_mut();
        layer.z_index = self.z_index;
        layer.visible = self.visible;
        layer.border = self.border;
        layer.animate = self.animate;
        asset
    }
}

/// A screen's worth of assets
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SceneConfig {
    #[cfg_attr(feature = "serde", serde(default))]
    pub assets: Vec<AssetConfig, MAX_ASSETS>,
}

impl SceneConfig {
    /// Build every asset and register it with a fresh compositor
    ///
    /// Returns the compositor and the handles in declaration order.
    pub fn build(&self) -> Result<(Compositor, Vec<AssetId, MAX_ASSETS>), CompositorError> {
        let mut compositor = Compositor::new();
        let mut ids = Vec::new();
        for asset in self.assets.iter() {
            let id = compositor.add(asset.build())?;
            ids.push(id).map_err(|_| CompositorError::Full)?;
        }
        debug!("scene built with {} assets", compositor.len());
        Ok((compositor, ids))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::AssetKind;

    fn placed(widget: WidgetConfig, z_index: i16) -> AssetConfig {
        AssetConfig {
            x: 0,
            y: 0,
            width: 40,
            height: 20,
            z_index,
            visible: true,
            border: false,
            animate: false,
            widget,
        }
    }

    #[test]
    fn test_defaults() {
        let plot = PlotConfig::default();
        assert!(plot.show_axes);
        assert!(!plot.show_grid);
        assert_eq!(plot.grid_spacing, 10);
        assert_eq!(plot.labels.tiny_threshold, 48);

        let table = TableConfig::default();
        assert_eq!(table.row_height, 10);
        assert!(table.show_headers && table.show_grid && table.auto_fit);
    }

    #[test]
    fn test_builtin_functions() {
        assert_eq!((BuiltinFunction::Square.function())(3.0), 9.0);
        assert_eq!((BuiltinFunction::Identity.function())(-2.0), -2.0);
        assert!((BuiltinFunction::Reciprocal.function())(0.0).is_infinite());
        assert!((BuiltinFunction::Sin.function())(0.0).abs() < 1e-6);
    }

    #[test]
    fn test_build_scene() {
        let mut scene = SceneConfig::default();
        let mut text = String::new();
        text.push_str("Temp").unwrap();
        scene
            .assets
            .push(placed(
                WidgetConfig::Text {
                    text,
                    style: TextConfig::default(),
                },
                2,
            ))
            .unwrap();
        scene
            .assets
            .push(placed(
                WidgetConfig::Table {
                    rows: 2,
                    cols: 2,
                    table: TableConfig::default(),
                },
                -1,
            ))
            .unwrap();

        let (compositor, ids) = scene.build().unwrap();
        assert_eq!(compositor.len(), 2);
        assert_eq!(ids.len(), 2);
        let text = compositor.get(ids[0]).unwrap();
        assert_eq!(text.kind(), AssetKind::Text);
        assert_eq!(text.z_index(), 2);
        assert_eq!(compositor.draw_order().as_slice(), &[ids[1], ids[0]]);
    }

    #[test]
    fn test_build_data_plot_with_points() {
        let mut points = Vec::new();
        points.push([0.0, 1.0]).unwrap();
        points.push([1.0, 3.0]).unwrap();
        let config = placed(
            WidgetConfig::DataPlot {
                capacity: 10,
                style: PlotStyle::Points,
                plot: PlotConfig::default(),
                points,
            },
            0,
        );
        let asset = config.build();
        let plot = asset.as_data_plot().unwrap();
        assert_eq!(plot.len(), 2);
        assert_eq!(plot.point(1), Some((1.0, 3.0)));
        assert_eq!(plot.style(), PlotStyle::Points);
    }
}
