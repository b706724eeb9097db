//! Primitive shape widget

use monoplot_surface::{BinaryColor, Surface};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::asset::{AssetKind, Layer, Widget};

/// Shape drawn by a [`Geometry`] asset
///
/// Points are offsets from the top-left corner of the asset box, so moving
/// the box moves the whole shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Shape {
    /// Fills the box
    #[default]
    Rectangle,
    /// Fills the box with rounded corners
    RoundedRectangle { radius: i32 },
    /// Circle centred at `(radius, radius)`
    Circle { radius: i32 },
    /// Segment between two points; never filled
    Line { start: [i32; 2], end: [i32; 2] },
    Triangle { a: [i32; 2], b: [i32; 2], c: [i32; 2] },
}

/// Shape asset
#[derive(Debug, Clone)]
pub struct Geometry {
    layer: Layer,
    shape: Shape,
    filled: bool,
}

impl Geometry {
    pub fn new(x: i32, y: i32, width: i32, height: i32, shape: Shape, filled: bool) -> Self {
        Self {
            layer: Layer::new(x, y, width, height),
            shape,
            filled,
        }
    }

    pub fn rectangle(x: i32, y: i32, width: i32, height: i32, filled: bool) -> Self {
        Self::new(x, y, width, height, Shape::Rectangle, filled)
    }

    pub fn circle(center_x: i32, center_y: i32, radius: i32, filled: bool) -> Self {
        let mut geometry = Self::default();
        geometry.set_as_circle(center_x, center_y, radius, filled);
        geometry
    }

    pub fn line(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        let mut geometry = Self::default();
        geometry.set_as_line(x0, y0, x1, y1);
        geometry
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn set_shape(&mut self, shape: Shape) {
        self.shape = shape;
    }

    pub fn is_filled(&self) -> bool {
        self.filled
    }

    /// Lines ignore the fill flag
    pub fn set_filled(&mut self, filled: bool) {
        self.filled = filled;
    }

    pub fn set_as_rectangle(&mut self, x: i32, y: i32, width: i32, height: i32, filled: bool) {
        self.layer = Layer { x, y, ..self.layer };
        self.set_size(width, height);
        self.shape = Shape::Rectangle;
        self.filled = filled;
    }

    pub fn set_as_rounded_rectangle(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        radius: i32,
        filled: bool,
    ) {
        self.set_as_rectangle(x, y, width, height, filled);
        self.shape = Shape::RoundedRectangle {
            radius: radius.max(0),
        };
    }

    /// Circle around an absolute centre; the box becomes `2r × 2r`
    pub fn set_as_circle(&mut self, center_x: i32, center_y: i32, radius: i32, filled: bool) {
        let radius = radius.max(0);
        self.set_as_rectangle(
            center_x - radius,
            center_y - radius,
            2 * radius,
            2 * radius,
            filled,
        );
        self.shape = Shape::Circle { radius };
    }

    /// Segment between two absolute points; the box spans their bounds
    pub fn set_as_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        let (left, top) = (x0.min(x1), y0.min(y1));
        self.set_as_rectangle(left, top, (x1 - x0).abs(), (y1 - y0).abs(), false);
        self.shape = Shape::Line {
            start: [x0 - left, y0 - top],
            end: [x1 - left, y1 - top],
        };
    }

    /// Triangle through three absolute points; the box is their bounding box
    #[allow(clippy::too_many_arguments)]
    pub fn set_as_triangle(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        filled: bool,
    ) {
        let (left, right) = (x0.min(x1).min(x2), x0.max(x1).max(x2));
        let (top, bottom) = (y0.min(y1).min(y2), y0.max(y1).max(y2));
        self.set_as_rectangle(left, top, right - left, bottom - top, filled);
        self.shape = Shape::Triangle {
            a: [x0 - left, y0 - top],
            b: [x1 - left, y1 - top],
            c: [x2 - left, y2 - top],
        };
    }

    /// Corner or circle radius, 0 for other shapes
    pub fn radius(&self) -> i32 {
        match self.shape {
            Shape::RoundedRectangle { radius } | Shape::Circle { radius } => radius,
            _ => 0,
        }
    }

    fn absolute(&self, [dx, dy]: [i32; 2]) -> (i32, i32) {
        (self.layer.x + dx, self.layer.y + dy)
    }

    /// Absolute end points of a line
    pub fn line_points(&self) -> Option<((i32, i32), (i32, i32))> {
        match self.shape {
            Shape::Line { start, end } => Some((self.absolute(start), self.absolute(end))),
            _ => None,
        }
    }

    /// Absolute corners of a triangle
    pub fn triangle_points(&self) -> Option<[(i32, i32); 3]> {
        match self.shape {
            Shape::Triangle { a, b, c } => {
                Some([self.absolute(a), self.absolute(b), self.absolute(c)])
            }
            _ => None,
        }
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self::rectangle(0, 0, 10, 10, false)
    }
}

impl Widget for Geometry {
    fn kind(&self) -> AssetKind {
        AssetKind::Geometry
    }

    fn layer(&self) -> &Layer {
        &self.layer
    }

    fn layer_mut(&mut self) -> &mut Layer {
        &mut self.layer
    }

    fn draw<S: Surface>(&mut self, surface: &mut S) {
        let Layer {
            x,
            y,
            width: w,
            height: h,
            border,
            ..
        } = self.layer;
        let on = BinaryColor::On;

        match self.shape {
            Shape::Rectangle => {
                if self.filled {
                    surface.fill_rect(x, y, w, h, on);
                } else {
                    surface.draw_rect(x, y, w, h, on);
                }
            }
            Shape::RoundedRectangle { radius } => {
                if self.filled {
                    surface.fill_round_rect(x, y, w, h, radius, on);
                } else {
                    surface.draw_round_rect(x, y, w, h, radius, on);
                }
            }
            Shape::Circle { radius } => {
                let (cx, cy) = (x + radius, y + radius);
                if self.filled {
                    surface.fill_circle(cx, cy, radius, on);
                } else {
                    surface.draw_circle(cx, cy, radius, on);
                }
                if border {
                    surface.draw_circle(cx, cy, radius + 1, on);
                }
            }
            Shape::Line { start, end } => {
                let ((x0, y0), (x1, y1)) = (self.absolute(start), self.absolute(end));
                surface.draw_line(x0, y0, x1, y1, on);
            }
            Shape::Triangle { a, b, c } => {
                let ((x0, y0), (x1, y1), (x2, y2)) =
                    (self.absolute(a), self.absolute(b), self.absolute(c));
                if self.filled {
                    surface.fill_triangle(x0, y0, x1, y1, x2, y2, on);
                } else {
                    surface.draw_triangle(x0, y0, x1, y1, x2, y2, on);
                }
            }
        }

        if border && matches!(self.shape, Shape::Rectangle | Shape::RoundedRectangle { .. }) {
            surface.draw_rect(x - 1, y - 1, w + 2, h + 2, on);
        }
    }
}
