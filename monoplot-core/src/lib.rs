//! Widget compositor for small monochrome displays
//!
//! This crate contains everything between "the caller wants a chart" and
//! "pixels in a frame buffer":
//!
//! - The asset model: shared placement/visibility state plus a closed set
//!   of widget kinds
//! - The compositor: a fixed-capacity, z-ordered asset store
//! - Plot widgets: coordinate mapping, auto-scaling, ticks and labels
//! - Table, text, geometry and bitmap widgets
//! - Configuration types for declaring a scene
//!
//! Drawing goes through the `Surface` trait from `monoplot-surface`.
//! Animation is driven by draw calls, not by time: every `draw()` of an
//! animated widget reveals one more step, so the caller's render rate sets
//! the animation speed.

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

mod fmt;

pub mod asset;
pub mod bitmap;
pub mod compositor;
pub mod config;
pub mod geometry;
pub mod plot;
pub mod table;
pub mod text;

pub use asset::{Asset, AssetKind, Layer, Reveal, Widget};
pub use bitmap::{Bitmap, PixelData};
pub use compositor::{AssetId, Compositor, CompositorError, MAX_ASSETS};
pub use config::{AssetConfig, SceneConfig};
pub use geometry::{Geometry, Shape};
pub use plot::{DataPlot, Domain, FunctionPlot, PlotStyle};
pub use table::{Table, TableError};
pub use text::{TextAlign, TextBox};

pub use monoplot_surface::{BinaryColor, Canvas, Surface};
