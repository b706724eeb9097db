//! Asset model
//!
//! Every widget carries a [`Layer`] (box, visibility, border, animation
//! flag, z-index) and implements [`Widget`]. The [`Asset`] enum is the
//! closed set of widget kinds the compositor stores; its kind tag is
//! derived from the variant, so the tag can never disagree with the type.

use monoplot_surface::Surface;

use crate::bitmap::Bitmap;
use crate::geometry::Geometry;
use crate::plot::{DataPlot, FunctionPlot};
use crate::table::Table;
use crate::text::TextBox;

/// Widget kind tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AssetKind {
    Text,
    FunctionPlot,
    DataPlot,
    Table,
    Geometry,
    Bitmap,
}

/// Placement and display state shared by all widgets
///
/// The box may extend past the surface; drawing clips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Layer {
    /// Left edge in surface pixels
    pub x: i32,
    /// Top edge in surface pixels
    pub y: i32,
    /// Box width (never negative)
    pub width: i32,
    /// Box height (never negative)
    pub height: i32,
    /// Drawn by the compositor when set
    pub visible: bool,
    /// Draw an outline around the box
    pub border: bool,
    /// Progressive reveal on each draw
    pub animate: bool,
    /// Layering order, lower values drawn first
    pub z_index: i16,
}

impl Layer {
    /// Create a visible, borderless, static layer at z-index 0
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width: if width < 0 { 0 } else { width },
            height: if height < 0 { 0 } else { height },
            visible: true,
            border: false,
            animate: false,
            z_index: 0,
        }
    }

    /// Right edge (exclusive)
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Bottom edge (exclusive)
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Check if a point lies inside the box
    pub const fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }
}

impl Default for Layer {
    fn default() -> Self {
        Self::new(0, 0, 0, 0)
    }
}

/// Call-count driven reveal counter
///
/// Each draw of an animated widget advances the counter by one until it
/// reaches the widget's element count, at which point the widget is
/// complete and draws in full. When animation is off the widget draws in
/// full and the counter stays where it was.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reveal {
    frame: usize,
}

impl Reveal {
    /// Frames drawn so far
    pub const fn frame(&self) -> usize {
        self.frame
    }

    /// Back to frame 0
    pub fn reset(&mut self) {
        self.frame = 0;
    }

    /// Advance one frame, stopping at `limit`
    pub fn advance(&mut self, limit: usize) {
        if self.frame < limit {
            self.frame += 1;
        }
    }

    /// Number of elements to render for this draw call
    ///
    /// Advances the counter when `animate` is set.
    pub fn on_draw(&mut self, animate: bool, total: usize) -> usize {
        if animate {
            self.advance(total);
            self.frame.min(total)
        } else {
            total
        }
    }
}

/// Behaviour shared by all widgets
///
/// Implementors provide access to their [`Layer`] and a draw routine; the
/// attribute getters and setters come for free.
pub trait Widget {
    /// Kind tag
    fn kind(&self) -> AssetKind;

    /// Shared placement/display state
    fn layer(&self) -> &Layer;

    /// Mutable placement/display state
    fn layer_mut(&mut self) -> &mut Layer;

    /// Render onto a surface
    ///
    /// The only state this may change is the reveal counter, which moves
    /// by at most one step per call.
    fn draw<S: Surface>(&mut self, surface: &mut S);

    /// Frames revealed so far (0 for widgets without animation)
    fn animation_frame(&self) -> usize {
        0
    }

    /// Restart the reveal animation
    fn reset_animation(&mut self) {}

    /// Step the reveal animation without drawing
    fn advance_animation(&mut self) {}

    fn x(&self) -> i32 {
        self.layer().x
    }

    fn y(&self) -> i32 {
        self.layer().y
    }

    fn set_x(&mut self, x: i32) {
        self.layer_mut().x = x;
    }

    fn set_y(&mut self, y: i32) {
        self.layer_mut().y = y;
    }

    fn set_position(&mut self, x: i32, y: i32) {
        let layer = self.layer_mut();
        layer.x = x;
        layer.y = y;
    }

    fn width(&self) -> i32 {
        self.layer().width
    }

    fn height(&self) -> i32 {
        self.layer().height
    }

    /// Set the box width; negative values clamp to 0
    fn set_width(&mut self, width: i32) {
        self.layer_mut().width = width.max(0);
    }

    /// Set the box height; negative values clamp to 0
    fn set_height(&mut self, height: i32) {
        self.layer_mut().height = height.max(0);
    }

    fn set_size(&mut self, width: i32, height: i32) {
        self.set_width(width);
        self.set_height(height);
    }

    fn is_visible(&self) -> bool {
        self.layer().visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.layer_mut().visible = visible;
    }

    fn show(&mut self) {
        self.set_visible(true);
    }

    fn hide(&mut self) {
        self.set_visible(false);
    }

    fn has_border(&self) -> bool {
        self.layer().border
    }

    fn set_border(&mut self, border: bool) {
        self.layer_mut().border = border;
    }

    fn is_animated(&self) -> bool {
        self.layer().animate
    }

    /// Turn the reveal animation on or off
    ///
    /// Turning it off keeps the reveal counter where it is.
    fn set_animate(&mut self, animate: bool) {
        self.layer_mut().animate = animate;
    }

    fn z_index(&self) -> i16 {
        self.layer().z_index
    }

    fn set_z_index(&mut self, z_index: i16) {
        self.layer_mut().z_index = z_index;
    }

    /// Check if a surface point lies inside the widget's box
    fn contains(&self, px: i32, py: i32) -> bool {
        self.layer().contains(px, py)
    }
}

/// Any widget the compositor can hold
#[derive(Debug, Clone)]
pub enum Asset {
    Text(TextBox),
    FunctionPlot(FunctionPlot),
    DataPlot(DataPlot),
    Table(Table),
    Geometry(Geometry),
    Bitmap(Bitmap),
}

macro_rules! each_asset {
    ($value:expr, $inner:ident => $body:expr) => {
        match $value {
            Asset::Text($inner) => $body,
            Asset::FunctionPlot($inner) => $body,
            Asset::DataPlot($inner) => $body,
            Asset::Table($inner) => $body,
            Asset::Geometry($inner) => $body,
            Asset::Bitmap($inner) => $body,
        }
    };
}

impl Widget for Asset {
    fn kind(&self) -> AssetKind {
        each_asset!(self, w => w.kind())
    }

    fn layer(&self) -> &Layer {
        each_asset!(self, w => w.layer())
    }

    fn layer_mut(&mut self) -> &mut Layer {
        each_asset!(self, w => w.layer_mut())
    }

    fn draw<S: Surface>(&mut self, surface: &mut S) {
        each_asset!(self, w => w.draw(surface))
    }

    fn animation_frame(&self) -> usize {
        each_asset!(self, w => w.animation_frame())
    }

    fn reset_animation(&mut self) {
        each_asset!(self, w => w.reset_animation())
    }

    fn advance_animation(&mut self) {
        each_asset!(self, w => w.advance_animation())
    }
}

macro_rules! asset_conversions {
    ($($variant:ident($ty:ty) => $as_ref:ident, $as_mut:ident;)*) => {
        $(
            impl From<$ty> for Asset {
                fn from(widget: $ty) -> Self {
                    Asset::$variant(widget)
                }
            }

            impl Asset {
                /// Borrow as this widget kind, if it is one
                pub fn $as_ref(&self) -> Option<&$ty> {
                    match self {
                        Asset::$variant(w) => Some(w),
                        _ => None,
                    }
                }

                /// Mutably borrow as this widget kind, if it is one
                pub fn $as_mut(&mut self) -> Option<&mut $ty> {
                    match self {
                        Asset::$variant(w) => Some(w),
                        _ => None,
                    }
                }
            }
        )*
    };
}

asset_conversions! {
    Text(TextBox) => as_text, as_text_mut;
    FunctionPlot(FunctionPlot) => as_function_plot, as_function_plot_mut;
    DataPlot(DataPlot) => as_data_plot, as_data_plot_mut;
    Table(Table) => as_table, as_table_mut;
    Geometry(Geometry) => as_geometry, as_geometry_mut;
    Bitmap(Bitmap) => as_bitmap, as_bitmap_mut;
}
