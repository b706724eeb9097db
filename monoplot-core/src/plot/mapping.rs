//! Value-to-pixel mapping
//!
//! A [`Domain`] is mapped affinely onto a [`PlotArea`]; Y is inverted so
//! larger values sit higher on screen.

use libm::{fabsf, roundf};

/// Observed ranges narrower than this are treated as degenerate
pub const MIN_RANGE: f32 = 1e-4;

/// Fraction of the observed range added on each side by auto-scaling
pub const AUTO_PADDING: f32 = 0.1;

/// Logical value domain `[min_x, max_x] × [min_y, max_y]`
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Domain {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Domain {
    pub const fn new(min_x: f32, max_x: f32, min_y: f32, max_y: f32) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    /// Check that both spans are finite and strictly positive
    pub fn is_valid(&self) -> bool {
        let w = self.width();
        let h = self.height();
        w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0
    }

    pub fn contains_x(&self, x: f32) -> bool {
        x >= self.min_x && x <= self.max_x
    }

    pub fn contains_y(&self, y: f32) -> bool {
        y >= self.min_y && y <= self.max_y
    }

    /// Check if a point lies inside the domain (bounds inclusive)
    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.contains_x(x) && self.contains_y(y)
    }
}

/// Pad an observed range by [`AUTO_PADDING`] on both sides
///
/// Ranges below [`MIN_RANGE`] (including NaN) are replaced by a unit range
/// before padding. The result always has a finite, strictly positive span.
pub fn padded_range(lo: f32, hi: f32) -> (f32, f32) {
    let mut range = hi - lo;
    if range.is_nan() || range < MIN_RANGE {
        debug!("degenerate range {} .. {}, using unit range", lo, hi);
        range = 1.0;
    }
    let pad = range * AUTO_PADDING;
    let (min, max) = (lo - pad, hi + pad);
    if min.is_finite() && max.is_finite() && max > min {
        return (min, max);
    }

    // Padding lost to rounding at large magnitudes
    let pad = fabsf(lo).max(fabsf(hi)).max(1.0) * AUTO_PADDING;
    let (min, max) = (lo - pad, hi + pad);
    if min.is_finite() && max.is_finite() && max > min {
        (min, max)
    } else {
        (-1.0, 1.0)
    }
}

/// Pixel rectangle the domain is mapped onto
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PlotArea {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl PlotArea {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Length of the shorter side
    pub fn min_side(&self) -> i32 {
        self.width.min(self.height)
    }
}

/// A domain bound to a pixel area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub area: PlotArea,
    pub domain: Domain,
}

impl Viewport {
    pub const fn new(area: PlotArea, domain: Domain) -> Self {
        Self { area, domain }
    }

    /// Map a logical X value to a pixel column
    pub fn map_x(&self, value: f32) -> i32 {
        let t = (value - self.domain.min_x) / self.domain.width();
        self.area.x + roundf(t * (self.area.width - 1) as f32) as i32
    }

    /// Map a logical Y value to a pixel row
    pub fn map_y(&self, value: f32) -> i32 {
        let t = (value - self.domain.min_y) / self.domain.height();
        self.area.bottom() - 1 - roundf(t * (self.area.height - 1) as f32) as i32
    }

    /// Logical X value at a column offset from the left edge of the area
    pub fn value_at_column(&self, offset: i32) -> f32 {
        if self.area.width <= 1 {
            return self.domain.min_x;
        }
        let t = offset as f32 / (self.area.width - 1) as f32;
        self.domain.min_x + t * self.domain.width()
    }

    /// Logical Y value at a row offset from the top edge of the area
    pub fn value_at_row(&self, offset: i32) -> f32 {
        if self.area.height <= 1 {
            return self.domain.max_y;
        }
        let t = offset as f32 / (self.area.height - 1) as f32;
        self.domain.max_y - t * self.domain.height()
    }
}
