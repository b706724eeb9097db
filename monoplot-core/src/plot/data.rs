//! Buffered (x, y) series plot

use alloc::collections::VecDeque;

use monoplot_surface::Surface;

use super::chrome::{self, plus_mark, Pen};
use super::mapping::{padded_range, Domain, Viewport};
use super::PlotStyle;
use crate::asset::{AssetKind, Layer, Reveal, Widget};
use crate::config::PlotConfig;

/// Default series capacity
pub const DEFAULT_CAPACITY: usize = 50;

/// Plot of a rolling (x, y) series
///
/// The series holds at most `capacity` points; appending to a full series
/// drops the oldest point.
#[derive(Debug, Clone)]
pub struct DataPlot {
    layer: Layer,
    points: VecDeque<(f32, f32)>,
    capacity: usize,
    domain: Domain,
    auto_scale: bool,
    style: PlotStyle,
    config: PlotConfig,
    reveal: Reveal,
}

impl DataPlot {
    /// Create an empty plot with default options
    pub fn new(x: i32, y: i32, width: i32, height: i32, capacity: usize) -> Self {
        Self::with_config(x, y, width, height, capacity, PlotConfig::default())
    }

    pub fn with_config(
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        capacity: usize,
        config: PlotConfig,
    ) -> Self {
        Self {
            layer: Layer::new(x, y, width, height),
            points: VecDeque::with_capacity(capacity),
            capacity,
            domain: Domain::new(0.0, 100.0, 0.0, 100.0),
            auto_scale: true,
            style: PlotStyle::Lines,
            config,
            reveal: Reveal::default(),
        }
    }

    /// Append a point, evicting the oldest one when full, and restart the
    /// reveal
    pub fn add_point(&mut self, x: f32, y: f32) {
        if self.capacity == 0 {
            return;
        }
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back((x, y));
        self.reveal.reset();
    }

    /// Replace the series with pairs from `xs` and `ys`
    ///
    /// Stops at the shorter slice or at capacity, whichever comes first.
    pub fn set_data(&mut self, xs: &[f32], ys: &[f32]) {
        self.points.clear();
        self.points.extend(
            xs.iter()
                .copied()
                .zip(ys.iter().copied())
                .take(self.capacity),
        );
        self.reveal.reset();
    }

    /// Drop every point
    pub fn clear(&mut self) {
        self.points.clear();
        self.reveal.reset();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Point at `index`, oldest first
    pub fn point(&self, index: usize) -> Option<(f32, f32)> {
        self.points.get(index).copied()
    }

    /// Iterate over the series, oldest first
    pub fn points(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.points.iter().copied()
    }

    /// Fix the X range; ignored unless `min < max`. Disables auto-scaling.
    pub fn set_x_range(&mut self, min: f32, max: f32) {
        if min < max {
            self.domain.min_x = min;
            self.domain.max_x = max;
            self.auto_scale = false;
        }
    }

    /// Fix the Y range; ignored unless `min < max`. Disables auto-scaling.
    pub fn set_y_range(&mut self, min: f32, max: f32) {
        if min < max {
            self.domain.min_y = min;
            self.domain.max_y = max;
            self.auto_scale = false;
        }
    }

    pub fn x_range(&self) -> (f32, f32) {
        (self.domain.min_x, self.domain.max_x)
    }

    pub fn y_range(&self) -> (f32, f32) {
        (self.domain.min_y, self.domain.max_y)
    }

    /// Domain used by the last draw (or the fixed domain)
    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn set_auto_scale(&mut self, auto_scale: bool) {
        self.auto_scale = auto_scale;
    }

    pub fn auto_scale(&self) -> bool {
        self.auto_scale
    }

    pub fn set_style(&mut self, style: PlotStyle) {
        self.style = style;
    }

    pub fn style(&self) -> PlotStyle {
        self.style
    }

    /// Padded bounds of the finite points, or `None` if there are none
    pub fn auto_domain(&self) -> Option<Domain> {
        let mut finite = self
            .points
            .iter()
            .filter(|(x, y)| x.is_finite() && y.is_finite());
        let &(x0, y0) = finite.next()?;
        let (min_x, max_x, min_y, max_y) =
            finite.fold((x0, x0, y0, y0), |(lx, hx, ly, hy), &(x, y)| {
                (lx.min(x), hx.max(x), ly.min(y), hy.max(y))
            });
        let (min_x, max_x) = padded_range(min_x, max_x);
        let (min_y, max_y) = padded_range(min_y, max_y);
        Some(Domain::new(min_x, max_x, min_y, max_y))
    }
}

plot_options!(DataPlot);

impl Default for DataPlot {
    fn default() -> Self {
        Self::new(0, 0, 64, 32, DEFAULT_CAPACITY)
    }
}

impl Widget for DataPlot {
    fn kind(&self) -> AssetKind {
        AssetKind::DataPlot
    }

    fn layer(&self) -> &Layer {
        &self.layer
    }

    fn layer_mut(&mut self) -> &mut Layer {
        &mut self.layer
    }

    fn draw<S: Surface>(&mut self, surface: &mut S) {
        if self.points.is_empty() {
            return;
        }
        if self.auto_scale {
            if let Some(domain) = self.auto_domain() {
                self.domain = domain;
            }
        }

        let frame = chrome::layout(&self.layer, &self.config, &self.domain);
        let viewport = Viewport::new(frame.area, self.domain);
        chrome::draw_chrome(surface, &self.layer, &frame, &viewport, &self.config);

        let count = self.reveal.on_draw(self.layer.animate, self.points.len());
        if frame.area.is_empty() {
            return;
        }

        let mut pen = Pen::new(frame.area.width, frame.area.height);
        for &(x, y) in self.points.iter().take(count) {
            if !self.domain.contains(x, y) {
                pen.lift();
                continue;
            }
            let (px, py) = (viewport.map_x(x), viewport.map_y(y));
            if self.style.has_lines() {
                pen.stroke(surface, px, py);
            }
            if self.style.has_points() {
                plus_mark(surface, px, py);
            }
        }
    }

    fn animation_frame(&self) -> usize {
        self.reveal.frame()
    }

    fn reset_animation(&mut self) {
        self.reveal.reset();
    }

    fn advance_animation(&mut self) {
        self.reveal.advance(self.points.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use monoplot_surface::Canvas;

    fn fixed_plot(style: PlotStyle) -> DataPlot {
        let mut plot = DataPlot::new(0, 0, 103, 53, 10);
        plot.set_x_range(-10.0, 90.0);
        plot.set_y_range(-10.0, 40.0);
        plot.set_show_axes(false);
        plot.set_style(style);
        plot
    }

    #[test]
    fn test_defaults() {
        let plot = DataPlot::default();
        assert_eq!(plot.capacity(), DEFAULT_CAPACITY);
        assert!(plot.auto_scale());
        assert_eq!(plot.style(), PlotStyle::Lines);
        assert_eq!(plot.x_range(), (0.0, 100.0));
        assert!(plot.config().show_axes);
    }

    #[test]
    fn test_rolling_buffer() {
        let mut plot = DataPlot::new(0, 0, 64, 32, 3);
        for i in 0..4 {
            plot.add_point(i as f32, i as f32);
        }
        assert_eq!(plot.len(), 3);
        assert_eq!(plot.point(0), Some((1.0, 1.0)));
        assert_eq!(plot.point(2), Some((3.0, 3.0)));
        assert_eq!(plot.point(3), None);
    }

    #[test]
    fn test_zero_capacity() {
        let mut plot = DataPlot::new(0, 0, 64, 32, 0);
        plot.add_point(1.0, 1.0);
        assert!(plot.is_empty());
    }

    #[test]
    fn test_set_data_truncates() {
        let mut plot = DataPlot::new(0, 0, 64, 32, 3);
        plot.set_data(&[1.0, 2.0, 3.0, 4.0], &[5.0, 6.0, 7.0, 8.0]);
        assert_eq!(plot.len(), 3);
        assert_eq!(plot.point(2), Some((3.0, 7.0)));

        plot.set_data(&[1.0, 2.0], &[5.0]);
        assert_eq!(plot.len(), 1);
    }

    #[test]
    fn test_fixed_range() {
        let mut plot = DataPlot::default();
        plot.set_y_range(5.0, 5.0);
        assert!(plot.auto_scale());
        plot.set_y_range(-1.0, 1.0);
        assert!(!plot.auto_scale());
        assert_eq!(plot.y_range(), (-1.0, 1.0));
    }

    #[test]
    fn test_auto_domain_constant_series() {
        let mut plot = DataPlot::default();
        for _ in 0..5 {
            plot.add_point(7.0, 7.0);
        }
        let domain = plot.auto_domain().unwrap();
        assert!(domain.is_valid());
        assert!(domain.contains(7.0, 7.0));
    }

    #[test]
    fn test_auto_domain_skips_non_finite() {
        let mut plot = DataPlot::default();
        plot.add_point(f32::NAN, 1.0);
        assert!(plot.auto_domain().is_none());
        plot.add_point(0.0, 0.0);
        plot.add_point(10.0, 20.0);
        let domain = plot.auto_domain().unwrap();
        assert!((domain.min_x + 1.0).abs() < 1e-5);
        assert!((domain.max_y - 22.0).abs() < 1e-5);
    }

    #[test]
    fn test_empty_draws_nothing() {
        let mut canvas = Canvas::new();
        let mut plot = DataPlot::default();
        plot.set_border(true);
        plot.draw(&mut canvas);
        assert_eq!(canvas.count_on(), 0);
    }

    #[test]
    fn test_line_between_points() {
        let mut canvas = Canvas::new();
        let mut plot = fixed_plot(PlotStyle::Lines);
        plot.add_point(0.0, 0.0);
        plot.add_point(20.0, 0.0);
        plot.draw(&mut canvas);

        // content area is (1, 1, 101, 51): one pixel per unit
        let y = 41;
        assert!(canvas.is_on(11, y));
        assert!(canvas.is_on(31, y));
        assert!(canvas.is_on(21, y));
        assert_eq!(canvas.count_on(), 21);
    }

    #[test]
    fn test_out_of_domain_breaks_line() {
        let mut canvas = Canvas::new();
        let mut plot = fixed_plot(PlotStyle::Lines);
        plot.add_point(0.0, 0.0);
        plot.add_point(10.0, 100.0);
        plot.add_point(20.0, 0.0);
        plot.draw(&mut canvas);
        assert_eq!(canvas.count_on(), 2);
    }

    #[test]
    fn test_points_reveal() {
        let mut plot = fixed_plot(PlotStyle::Points);
        for i in 0..4 {
            plot.add_point(i as f32 * 20.0, 10.0);
        }
        plot.set_animate(true);
        for step in 1..=6 {
            let mut canvas = Canvas::new();
            plot.draw(&mut canvas);
            assert_eq!(canvas.count_on(), 5 * step.min(4));
        }
        assert_eq!(plot.animation_frame(), 4);

        plot.reset_animation();
        plot.advance_animation();
        assert_eq!(plot.animation_frame(), 1);
    }

    #[test]
    fn test_static_draw_keeps_frame() {
        let mut plot = fixed_plot(PlotStyle::Points);
        for i in 0..4 {
            plot.add_point(i as f32 * 20.0, 10.0);
        }
        plot.set_animate(true);
        let mut canvas = Canvas::new();
        plot.draw(&mut canvas);
        plot.set_animate(false);

        let mut canvas = Canvas::new();
        plot.draw(&mut canvas);
        assert_eq!(canvas.count_on(), 20);
        assert_eq!(plot.animation_frame(), 1);
    }

    #[test]
    fn test_add_point_restarts_reveal() {
        let mut plot = fixed_plot(PlotStyle::Points);
        plot.add_point(0.0, 10.0);
        plot.set_animate(true);
        plot.draw(&mut Canvas::new());
        assert_eq!(plot.animation_frame(), 1);

        plot.add_point(20.0, 10.0);
        assert_eq!(plot.animation_frame(), 0);

        let mut canvas = Canvas::new();
        plot.draw(&mut canvas);
        assert_eq!(canvas.count_on(), 5);
    }
}
