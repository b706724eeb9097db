//! Plot chrome: content layout, grid, axes, tick marks and axis labels

use heapless::Vec;
use monoplot_surface::font::{text_width, tiny_text_width, CHAR_HEIGHT, CHAR_WIDTH, TINY_GLYPH_HEIGHT};
use monoplot_surface::{BinaryColor, Surface};

use super::mapping::{Domain, PlotArea, Viewport};
use super::ticks::{format_label, tick_offsets, Label, LabelTrack, MAX_TICKS};
use crate::asset::Layer;
use crate::config::{AxisLabelConfig, PlotConfig};

/// Margin kept on every side when labels are off
const PLAIN_MARGIN: i32 = 1;

/// Gap between labels and the content area
const LABEL_GAP: i32 = 2;

/// Tick mark length outside the content area
const TICK_LENGTH: i32 = 2;

/// Font used for axis labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelFont {
    /// Standard 6×8 cell font at a size multiplier
    Standard(u8),
    /// Compact 3×5 font at a pixel scale
    Tiny(u8),
}

impl LabelFont {
    pub fn text_width(self, chars: usize) -> i32 {
        match self {
            LabelFont::Standard(size) => text_width(chars, size),
            LabelFont::Tiny(scale) => tiny_text_width(chars, scale),
        }
    }

    pub fn height(self) -> i32 {
        match self {
            LabelFont::Standard(size) => CHAR_HEIGHT * size as i32,
            LabelFont::Tiny(scale) => TINY_GLYPH_HEIGHT * scale as i32,
        }
    }

    fn draw<S: Surface>(self, surface: &mut S, x: i32, y: i32, text: &str) {
        match self {
            LabelFont::Standard(size) => {
                let advance = CHAR_WIDTH * size as i32;
                for (i, c) in text.chars().enumerate() {
                    let cx = x + i as i32 * advance;
                    surface.draw_char(cx, y, c, BinaryColor::On, None, size);
                }
            }
            LabelFont::Tiny(scale) => surface.draw_tiny_text(x, y, text, scale, BinaryColor::On),
        }
    }
}

/// Content area plus the label font chosen for it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub area: PlotArea,
    pub font: Option<LabelFont>,
}

/// A label positioned on the surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedLabel {
    pub x: i32,
    pub y: i32,
    pub text: Label,
}

/// Reserve label margins inside a widget box
///
/// The left margin fits the widest label at the Y tick rows; the bottom
/// margin fits one label row. Compact labels are switched on automatically
/// when the resulting area is too small.
pub fn layout(layer: &Layer, config: &PlotConfig, domain: &Domain) -> Frame {
    let labels = &config.labels;
    if !labels.show {
        let area = PlotArea::new(
            layer.x + PLAIN_MARGIN,
            layer.y + PLAIN_MARGIN,
            (layer.width - 2 * PLAIN_MARGIN).max(0),
            (layer.height - 2 * PLAIN_MARGIN).max(0),
        );
        return Frame { area, font: None };
    }

    let font = if labels.use_tiny {
        LabelFont::Tiny(labels.tiny_scale)
    } else {
        LabelFont::Standard(labels.size)
    };
    let frame = reserve(layer, config, domain, font);
    if labels.auto_tiny
        && !labels.use_tiny
        && frame.area.min_side() < labels.tiny_threshold as i32
    {
        return reserve(layer, config, domain, LabelFont::Tiny(labels.tiny_scale));
    }
    frame
}

fn reserve(layer: &Layer, config: &PlotConfig, domain: &Domain, font: LabelFont) -> Frame {
    let bottom = font.height() + LABEL_GAP;
    let height = (layer.height - bottom - PLAIN_MARGIN).max(0);
    // row values depend only on the content height
    let rows = Viewport::new(PlotArea::new(0, 0, 0, height), *domain);
    let widest = tick_offsets(height, config.labels.max_ticks, config.grid_spacing)
        .iter()
        .map(|&offset| font.text_width(format_label(rows.value_at_row(offset)).chars().count()))
        .max()
        .unwrap_or(0);
    let left = widest + LABEL_GAP;
    let area = PlotArea::new(
        layer.x + left,
        layer.y + PLAIN_MARGIN,
        (layer.width - left - PLAIN_MARGIN).max(0),
        height,
    );
    Frame {
        area,
        font: Some(font),
    }
}

/// Dotted grid every `spacing` pixels across the content area
pub fn draw_grid<S: Surface>(surface: &mut S, area: &PlotArea, spacing: u8) {
    let step = spacing as usize;
    if step == 0 {
        return;
    }
    for i in (step as i32..area.width).step_by(step) {
        for j in (0..area.height).step_by(2) {
            surface.draw_pixel(area.x + i, area.y + j, BinaryColor::On);
        }
    }
    for i in (step as i32..area.height).step_by(step) {
        for j in (0..area.width).step_by(2) {
            surface.draw_pixel(area.x + j, area.y + i, BinaryColor::On);
        }
    }
}

/// Axis lines through the zero crossings that fall inside the domain
pub fn draw_axes<S: Surface>(surface: &mut S, viewport: &Viewport) {
    let area = &viewport.area;
    if viewport.domain.contains_y(0.0) {
        surface.draw_hline(area.x, viewport.map_y(0.0), area.width, BinaryColor::On);
    }
    if viewport.domain.contains_x(0.0) {
        surface.draw_vline(viewport.map_x(0.0), area.y, area.height, BinaryColor::On);
    }
}

/// Y labels, top to bottom, right-aligned against the content area
pub fn plan_y_labels(
    layer: &Layer,
    frame: &Frame,
    viewport: &Viewport,
    labels: &AxisLabelConfig,
    spacing: u8,
) -> Vec<PlacedLabel, MAX_TICKS> {
    let mut placed = Vec::new();
    let Some(font) = frame.font else {
        return placed;
    };
    let area = &viewport.area;
    let height = font.height();
    let mut track = LabelTrack::default();
    for offset in tick_offsets(area.height, labels.max_ticks, spacing) {
        let text = format_label(viewport.value_at_row(offset));
        let width = font.text_width(text.chars().count());
        let top = (area.y + offset - height / 2)
            .min(layer.bottom() - height)
            .max(layer.y);
        if track.admit(top, top + height) {
            let x = (area.x - LABEL_GAP - width).max(layer.x);
            let _ = placed.push(PlacedLabel { x, y: top, text });
        }
    }
    placed
}

/// X labels, left to right, centred under their tick and kept in the box
pub fn plan_x_labels(
    layer: &Layer,
    frame: &Frame,
    viewport: &Viewport,
    labels: &AxisLabelConfig,
    spacing: u8,
) -> Vec<PlacedLabel, MAX_TICKS> {
    let mut placed = Vec::new();
    let Some(font) = frame.font else {
        return placed;
    };
    let area = &viewport.area;
    let y = area.bottom() + LABEL_GAP;
    let mut track = LabelTrack::default();
    for offset in tick_offsets(area.width, labels.max_ticks, spacing) {
        let text = format_label(viewport.value_at_column(offset));
        let width = font.text_width(text.chars().count());
        let left = (area.x + offset - width / 2)
            .min(layer.right() - width)
            .max(layer.x);
        if track.admit(left, left + width) {
            let _ = placed.push(PlacedLabel { x: left, y, text });
        }
    }
    placed
}

/// Tick marks and labels on both axes
pub fn draw_labels<S: Surface>(
    surface: &mut S,
    layer: &Layer,
    frame: &Frame,
    viewport: &Viewport,
    config: &PlotConfig,
) {
    let Some(font) = frame.font else {
        return;
    };
    let area = &viewport.area;
    let labels = &config.labels;
    for offset in tick_offsets(area.width, labels.max_ticks, config.grid_spacing) {
        surface.draw_vline(area.x + offset, area.bottom(), TICK_LENGTH, BinaryColor::On);
    }
    for offset in tick_offsets(area.height, labels.max_ticks, config.grid_spacing) {
        surface.draw_hline(area.x - TICK_LENGTH, area.y + offset, TICK_LENGTH, BinaryColor::On);
    }

    let y_labels = plan_y_labels(layer, frame, viewport, labels, config.grid_spacing);
    let x_labels = plan_x_labels(layer, frame, viewport, labels, config.grid_spacing);
    for label in y_labels.iter().chain(x_labels.iter()) {
        font.draw(surface, label.x, label.y, &label.text);
    }
}

/// Everything except the data: border, grid, axes, ticks and labels
pub fn draw_chrome<S: Surface>(
    surface: &mut S,
    layer: &Layer,
    frame: &Frame,
    viewport: &Viewport,
    config: &PlotConfig,
) {
    if layer.border {
        surface.draw_rect(layer.x, layer.y, layer.width, layer.height, BinaryColor::On);
    }
    if config.show_grid {
        draw_grid(surface, &viewport.area, config.grid_spacing);
    }
    if config.show_axes {
        draw_axes(surface, viewport);
    }
    draw_labels(surface, layer, frame, viewport, config);
}

/// Connects consecutive plotted points, lifting at domain breaks
#[derive(Debug, Clone, Copy)]
pub struct Pen {
    last: Option<(i32, i32)>,
    max_dx: i32,
    max_dy: i32,
}

impl Pen {
    /// Create a pen that refuses to join points `max_dx`/`max_dy` or more
    /// pixels apart
    pub const fn new(max_dx: i32, max_dy: i32) -> Self {
        Self {
            last: None,
            max_dx,
            max_dy,
        }
    }

    /// Break the polyline
    pub fn lift(&mut self) {
        self.last = None;
    }

    /// Draw to (x, y): a line from the previous point when close enough,
    /// otherwise a single pixel
    pub fn stroke<S: Surface>(&mut self, surface: &mut S, x: i32, y: i32) {
        match self.last {
            Some((px, py)) if (x - px).abs() < self.max_dx && (y - py).abs() < self.max_dy => {
                surface.draw_line(px, py, x, y, BinaryColor::On);
            }
            _ => surface.draw_pixel(x, y, BinaryColor::On),
        }
        self.last = Some((x, y));
    }
}

/// Five-pixel plus mark centred on (x, y)
pub fn plus_mark<S: Surface>(surface: &mut S, x: i32, y: i32) {
    surface.draw_hline(x - 1, y, 3, BinaryColor::On);
    surface.draw_pixel(x, y - 1, BinaryColor::On);
    surface.draw_pixel(x, y + 1, BinaryColor::On);
}

#[cfg(test)]
mod tests {
    use super::*;
    use monoplot_surface::Canvas;

    fn labelled() -> PlotConfig {
        let mut config = PlotConfig::default();
        config.labels.show = true;
        config.labels.auto_tiny = false;
        config
    }

    #[test]
    fn test_plain_layout() {
        let layer = Layer::new(0, 0, 100, 50);
        let frame = layout(&layer, &PlotConfig::default(), &Domain::new(0.0, 1.0, 0.0, 1.0));
        assert_eq!(frame.area, PlotArea::new(1, 1, 98, 48));
        assert_eq!(frame.font, None);
    }

    #[test]
    fn test_label_margins() {
        let layer = Layer::new(0, 0, 128, 64);
        let domain = Domain::new(0.0, 10.0, -100.0, 100.0);
        let frame = layout(&layer, &labelled(), &domain);
        // "-100" in the standard font is 24 px wide
        assert_eq!(frame.area.x, 26);
        assert_eq!(frame.area.height, 64 - 10 - 1);
        assert_eq!(frame.font, Some(LabelFont::Standard(1)));
    }

    #[test]
    fn test_auto_tiny() {
        let layer = Layer::new(0, 0, 60, 40);
        let domain = Domain::new(0.0, 10.0, 0.0, 10.0);
        let mut config = labelled();
        config.labels.auto_tiny = true;
        let frame = layout(&layer, &config, &domain);
        assert_eq!(frame.font, Some(LabelFont::Tiny(1)));
        // widest tick label "7.4" in the compact font is 11 px wide
        assert_eq!(frame.area.x, 13);
    }

    #[test]
    fn test_labels_do_not_overlap() {
        let layer = Layer::new(0, 0, 128, 64);
        let mut config = labelled();
        config.labels.max_ticks = 10;
        let domain = Domain::new(-1000.0, 1000.0, 0.0, 1.0);
        let frame = layout(&layer, &config, &domain);
        let viewport = Viewport::new(frame.area, domain);

        let xs = plan_x_labels(&layer, &frame, &viewport, &config.labels, 10);
        assert!(xs.len() >= 2);
        assert!(xs.len() < 10);
        for pair in xs.windows(2) {
            let width = LabelFont::Standard(1).text_width(pair[0].text.len());
            assert!(pair[0].x + width < pair[1].x);
        }
        for label in xs.iter() {
            let width = LabelFont::Standard(1).text_width(label.text.len());
            assert!(label.x >= 0 && label.x + width <= 128);
        }

        let ys = plan_y_labels(&layer, &frame, &viewport, &config.labels, 10);
        for pair in ys.windows(2) {
            assert!(pair[0].y + 8 < pair[1].y);
        }
    }

    #[test]
    fn test_margin_fits_every_y_label() {
        let layer = Layer::new(40, 0, 60, 50);
        let config = labelled();
        let domain = Domain::new(-1.0, 11.0, -1.0, 11.0);
        let frame = layout(&layer, &config, &domain);
        let viewport = Viewport::new(frame.area, domain);

        let ys = plan_y_labels(&layer, &frame, &viewport, &config.labels, config.grid_spacing);
        assert!(ys.iter().any(|label| label.text.contains('.')));
        for label in ys.iter() {
            let width = LabelFont::Standard(1).text_width(label.text.chars().count());
            assert!(label.x >= layer.x);
            assert!(label.x + width <= frame.area.x);
        }

        let mut canvas = Canvas::new();
        draw_chrome(&mut canvas, &layer, &frame, &viewport, &config);
        assert_eq!(canvas.count_on_in(0, 0, 40, 64), 0);
    }

    #[test]
    fn test_axes_at_zero() {
        let mut canvas = Canvas::new();
        let viewport = Viewport::new(
            PlotArea::new(0, 0, 21, 11),
            Domain::new(-10.0, 10.0, -5.0, 5.0),
        );
        draw_axes(&mut canvas, &viewport);
        assert!(canvas.is_on(10, 0));
        assert!(canvas.is_on(10, 10));
        assert!(canvas.is_on(0, 5));
        assert!(canvas.is_on(20, 5));
        assert_eq!(canvas.count_on(), 21 + 11 - 1);
    }

    #[test]
    fn test_axes_outside_domain() {
        let mut canvas = Canvas::new();
        let viewport = Viewport::new(
            PlotArea::new(0, 0, 21, 11),
            Domain::new(1.0, 10.0, 1.0, 5.0),
        );
        draw_axes(&mut canvas, &viewport);
        assert_eq!(canvas.count_on(), 0);
    }

    #[test]
    fn test_dotted_grid() {
        let mut canvas = Canvas::new();
        draw_grid(&mut canvas, &PlotArea::new(0, 0, 20, 20), 10);
        assert!(canvas.is_on(10, 0));
        assert!(!canvas.is_on(10, 1));
        assert!(canvas.is_on(0, 10));
        assert!(!canvas.is_on(0, 0));
    }

    #[test]
    fn test_pen_breaks() {
        let mut canvas = Canvas::new();
        let mut pen = Pen::new(100, 10);
        pen.stroke(&mut canvas, 0, 0);
        pen.stroke(&mut canvas, 5, 0);
        assert_eq!(canvas.count_on(), 6);

        // too far to join
        pen.stroke(&mut canvas, 6, 20);
        assert_eq!(canvas.count_on(), 7);

        pen.lift();
        pen.stroke(&mut canvas, 8, 20);
        assert_eq!(canvas.count_on(), 8);
    }

    #[test]
    fn test_plus_mark() {
        let mut canvas = Canvas::new();
        plus_mark(&mut canvas, 10, 10);
        assert_eq!(canvas.count_on(), 5);
        assert!(canvas.is_on(9, 10) && canvas.is_on(11, 10));
        assert!(canvas.is_on(10, 9) && canvas.is_on(10, 11));
    }
}
