//! Sampled function plot

use monoplot_surface::Surface;

use super::chrome::{self, Pen};
use super::mapping::{padded_range, Domain, Viewport};
use crate::asset::{AssetKind, Layer, Reveal, Widget};
use crate::config::PlotConfig;

/// Function plotted against X
pub type PlotFn = fn(f32) -> f32;

/// Plot of `y = f(x)` sampled once per content column
///
/// Samples that are not finite or fall outside the Y range break the
/// curve. Neighbouring samples are left unjoined when the function between
/// them leaves their span (a pole or jump), or when they are the full
/// content height or more apart.
#[derive(Debug, Clone)]
pub struct FunctionPlot {
    layer: Layer,
    function: Option<PlotFn>,
    domain: Domain,
    auto_scale_y: bool,
    config: PlotConfig,
    reveal: Reveal,
}

impl FunctionPlot {
    pub fn new(x: i32, y: i32, width: i32, height: i32, function: PlotFn) -> Self {
        Self::with_config(x, y, width, height, Some(function), PlotConfig::default())
    }

    pub fn with_config(
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        function: Option<PlotFn>,
        config: PlotConfig,
    ) -> Self {
        Self {
            layer: Layer::new(x, y, width, height),
            function,
            domain: Domain::new(-10.0, 10.0, -10.0, 10.0),
            auto_scale_y: false,
            config,
            reveal: Reveal::default(),
        }
    }

    /// Replace the plotted function and restart the reveal
    pub fn set_function(&mut self, function: Option<PlotFn>) {
        self.function = function;
        self.reveal.reset();
    }

    pub fn function(&self) -> Option<PlotFn> {
        self.function
    }

    /// Set the sampled X range; ignored unless `min < max`
    pub fn set_x_range(&mut self, min: f32, max: f32) {
        if min < max {
            self.domain.min_x = min;
            self.domain.max_x = max;
        }
    }

    /// Fix the Y range; ignored unless `min < max`. Disables auto-scaling.
    pub fn set_y_range(&mut self, min: f32, max: f32) {
        if min < max {
            self.domain.min_y = min;
            self.domain.max_y = max;
            self.auto_scale_y = false;
        }
    }

    pub fn x_range(&self) -> (f32, f32) {
        (self.domain.min_x, self.domain.max_x)
    }

    pub fn y_range(&self) -> (f32, f32) {
        (self.domain.min_y, self.domain.max_y)
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn set_auto_scale_y(&mut self, auto_scale: bool) {
        self.auto_scale_y = auto_scale;
    }

    pub fn auto_scale_y(&self) -> bool {
        self.auto_scale_y
    }

    /// Padded Y bounds of `samples` evenly spaced finite samples across the
    /// X range, or `None` without a function or a finite sample
    pub fn sample_y_range(&self, samples: usize) -> Option<(f32, f32)> {
        let function = self.function?;
        if samples < 2 {
            return None;
        }
        let step = self.domain.width() / (samples - 1) as f32;
        let (lo, hi) = (0..samples)
            .map(|i| function(self.domain.min_x + step * i as f32))
            .filter(|y| y.is_finite())
            .fold(None, |range, y| match range {
                None => Some((y, y)),
                Some((lo, hi)) => Some((f32::min(lo, y), f32::max(hi, y))),
            })?;
        Some(padded_range(lo, hi))
    }

    fn content_width(&self) -> usize {
        self.plot_area().width.max(0) as usize
    }
}

plot_options!(FunctionPlot);

/// Whether `function` leaves the span of two neighbouring samples at their
/// midpoint by more than `tolerance`
fn breaks_between(function: PlotFn, a: (f32, f32), b: (f32, f32), tolerance: f32) -> bool {
    let mid = function((a.0 + b.0) / 2.0);
    !mid.is_finite() || mid < a.1.min(b.1) - tolerance || mid > a.1.max(b.1) + tolerance
}

impl Default for FunctionPlot {
    fn default() -> Self {
        Self::with_config(0, 0, 64, 32, None, PlotConfig::default())
    }
}

impl Widget for FunctionPlot {
    fn kind(&self) -> AssetKind {
        AssetKind::FunctionPlot
    }

    fn layer(&self) -> &Layer {
        &self.layer
    }

    fn layer_mut(&mut self) -> &mut Layer {
        &mut self.layer
    }

    fn draw<S: Surface>(&mut self, surface: &mut S) {
        let Some(function) = self.function else {
            return;
        };
        if self.auto_scale_y {
            if let Some((lo, hi)) = self.sample_y_range(2 * self.content_width()) {
                self.domain.min_y = lo;
                self.domain.max_y = hi;
            }
        }

        let frame = chrome::layout(&self.layer, &self.config, &self.domain);
        let viewport = Viewport::new(frame.area, self.domain);
        chrome::draw_chrome(surface, &self.layer, &frame, &viewport, &self.config);

        let area = frame.area;
        let columns = self.reveal.on_draw(self.layer.animate, area.width.max(0) as usize);
        if area.is_empty() {
            return;
        }

        let tolerance = self.domain.height() / area.height as f32;
        let mut pen = Pen::new(i32::MAX, area.height);
        let mut previous = None;
        for column in 0..columns as i32 {
            let x = viewport.value_at_column(column);
            let y = function(x);
            if !y.is_finite() || !self.domain.contains_y(y) {
                pen.lift();
                previous = None;
                continue;
            }
            if let Some((px, py)) = previous {
                if breaks_between(function, (px, py), (x, y), tolerance) {
                    pen.lift();
                }
            }
            pen.stroke(surface, area.x + column, viewport.map_y(y));
            previous = Some((x, y));
        }
    }

    fn animation_frame(&self) -> usize {
        self.reveal.frame()
    }

    fn reset_animation(&mut self) {
        self.reveal.reset();
    }

    fn advance_animation(&mut self) {
        let limit = self.content_width();
        self.reveal.advance(limit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use monoplot_surface::Canvas;

    fn flat(plot_y: f32) -> FunctionPlot {
        let mut plot = FunctionPlot::new(0, 0, 42, 22, |_| 0.0);
        plot.set_y_range(plot_y - 1.0, plot_y + 1.0);
        plot.set_show_axes(false);
        plot
    }

    #[test]
    fn test_defaults() {
        let plot = FunctionPlot::default();
        assert!(plot.function().is_none());
        assert_eq!(plot.x_range(), (-10.0, 10.0));
        assert_eq!(plot.y_range(), (-10.0, 10.0));
        assert!(!plot.auto_scale_y());
    }

    #[test]
    fn test_no_function_draws_nothing() {
        let mut canvas = Canvas::new();
        let mut plot = FunctionPlot::default();
        plot.set_border(true);
        plot.draw(&mut canvas);
        assert_eq!(canvas.count_on(), 0);
    }

    #[test]
    fn test_one_pixel_per_column() {
        let mut canvas = Canvas::new();
        let mut plot = flat(0.0);
        plot.draw(&mut canvas);
        // content area is (1, 1, 40, 20); y = 0 rounds to row 10
        assert_eq!(canvas.count_on(), 40);
        assert_eq!(canvas.count_on_in(1, 10, 40, 1), 40);
    }

    #[test]
    fn test_out_of_range_not_drawn() {
        let mut canvas = Canvas::new();
        let mut plot = flat(5.0);
        plot.draw(&mut canvas);
        assert_eq!(canvas.count_on(), 0);
    }

    #[test]
    fn test_pole_not_joined_at_default_range() {
        let mut canvas = Canvas::new();
        let mut plot = FunctionPlot::new(0, 0, 42, 22, |x| 1.0 / x);
        plot.set_show_axes(false);
        plot.draw(&mut canvas);
        // columns 20 and 21 sample x = -0.26 and x = 0.26
        assert!(canvas.is_on(20, 14));
        assert!(canvas.is_on(21, 7));
        assert_eq!(canvas.count_on_in(20, 1, 1, 10), 0);
        assert_eq!(canvas.count_on_in(21, 11, 1, 10), 0);
    }

    #[test]
    fn test_smooth_peak_stays_joined() {
        let (a, b) = (1.32, 1.82);
        let peak = ((a, libm::sinf(a)), (b, libm::sinf(b)));
        assert!(!breaks_between(libm::sinf, peak.0, peak.1, 0.1));
        assert!(breaks_between(|x| 1.0 / x, (-0.25, -4.0), (0.25, 4.0), 0.1));
        assert!(breaks_between(|x| 1.0 / x, (-0.5, -2.0), (0.1, 10.0), 0.1));
    }

    #[test]
    fn test_column_reveal() {
        let mut plot = flat(0.0);
        plot.set_animate(true);
        for step in 1..=3 {
            let mut canvas = Canvas::new();
            plot.draw(&mut canvas);
            assert_eq!(canvas.count_on(), step);
        }
        assert_eq!(plot.animation_frame(), 3);

        plot.set_function(Some(|x| x));
        assert_eq!(plot.animation_frame(), 0);

        for _ in 0..100 {
            plot.advance_animation();
        }
        assert_eq!(plot.animation_frame(), 40);
    }

    #[test]
    fn test_auto_scale_y() {
        let mut plot = FunctionPlot::new(0, 0, 42, 22, |x| x * x);
        plot.set_auto_scale_y(true);
        let mut canvas = Canvas::new();
        plot.draw(&mut canvas);

        let (lo, hi) = plot.y_range();
        assert!(lo < 0.0 && lo > -10.5);
        assert!((hi - 110.0).abs() < 0.5);
        assert!(canvas.count_on() > 0);
    }

    #[test]
    fn test_auto_scale_ignores_non_finite() {
        let mut plot = FunctionPlot::new(0, 0, 42, 22, |_| f32::NAN);
        plot.set_auto_scale_y(true);
        plot.draw(&mut Canvas::new());
        assert_eq!(plot.y_range(), (-10.0, 10.0));
    }

    #[test]
    fn test_set_y_range_disables_auto_scale() {
        let mut plot = FunctionPlot::new(0, 0, 42, 22, |x| x);
        plot.set_auto_scale_y(true);
        plot.set_y_range(3.0, 1.0);
        assert!(plot.auto_scale_y());
        plot.set_y_range(-1.0, 1.0);
        assert!(!plot.auto_scale_y());
    }
}
