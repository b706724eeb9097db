//! Property tests for storage, reveal animation and auto-scaling

use monoplot_core::plot::padded_range;
use monoplot_core::{Canvas, DataPlot, PlotStyle, Surface, Table, TextBox, Widget};
use proptest::prelude::*;

fn table_strategy() -> impl Strategy<Value = (usize, usize, usize, usize)> {
    (1usize..8, 1usize..8).prop_flat_map(|(rows, cols)| (Just(rows), Just(cols), 0..rows, 0..cols))
}

proptest! {
    #[test]
    fn cell_text_round_trips(
        (rows, cols, row, col) in table_strategy(),
        text in "[ -~]{0,48}",
    ) {
        let mut table = Table::new(0, 0, 40, 30, rows, cols);
        prop_assert!(table.set_cell(row, col, &text).is_ok());
        prop_assert_eq!(table.get_cell(row, col), text.as_str());
    }

    #[test]
    fn cells_outside_table_rejected(rows in 1usize..8, cols in 1usize..8, text in "[a-z]{1,8}") {
        let mut table = Table::new(0, 0, 40, 30, rows, cols);
        prop_assert!(table.set_cell(rows, 0, &text).is_err());
        prop_assert!(table.set_cell(0, cols, &text).is_err());
        prop_assert_eq!(table.get_cell(rows, cols), "");
    }

    #[test]
    fn data_plot_reveal_is_monotonic(count in 1usize..24, draws in 1usize..40) {
        let mut plot = DataPlot::new(0, 0, 128, 64, 32);
        plot.set_x_range(-1.0, 25.0);
        plot.set_y_range(-1.0, 25.0);
        plot.set_style(PlotStyle::Points);
        for i in 0..count {
            plot.add_point(i as f32, i as f32);
        }
        plot.set_animate(true);

        let mut lit = 0;
        for n in 1..=draws {
            let mut canvas = Canvas::new();
            plot.draw(&mut canvas);
            let frame = plot.animation_frame();
            prop_assert!(frame <= n && frame <= count);
            prop_assert_eq!(frame, n.min(count));
            prop_assert!(canvas.count_on() >= lit);
            lit = canvas.count_on();
        }
    }

    #[test]
    fn text_reveal_is_bounded(text in "[a-z ]{0,30}", draws in 1usize..40) {
        let mut text_box = TextBox::new(0, 0, 128, 64, &text);
        text_box.set_animate(true);
        let total = text.chars().count();
        let mut previous = 0;
        for n in 1..=draws {
            let mut canvas = Canvas::new();
            text_box.draw(&mut canvas);
            let frame = text_box.animation_frame();
            prop_assert!(frame >= previous);
            prop_assert!(frame <= n && frame <= total);
            previous = frame;
        }
    }

    #[test]
    fn table_reveal_is_bounded(rows in 1usize..6, draws in 1usize..12) {
        let mut table = Table::new(0, 0, 80, 64, rows, 2);
        table.set_animate(true);
        for n in 1..=draws {
            table.draw(&mut Canvas::new());
            prop_assert_eq!(table.animation_frame(), n.min(rows));
        }
    }

    #[test]
    fn constant_series_gets_valid_domain(x in -1.0e6f32..1.0e6, y in -1.0e6f32..1.0e6, repeats in 1usize..10) {
        let mut plot = DataPlot::new(0, 0, 64, 32, 16);
        for _ in 0..repeats {
            plot.add_point(x, y);
        }
        let domain = plot.auto_domain().unwrap();
        prop_assert!(domain.min_x.is_finite() && domain.max_x.is_finite());
        prop_assert!(domain.min_y.is_finite() && domain.max_y.is_finite());
        prop_assert!(domain.width() > 0.0);
        prop_assert!(domain.height() > 0.0);
        prop_assert!(domain.contains(x, y));

        // drawing with the substituted domain never panics
        let mut canvas = Canvas::new();
        plot.draw(&mut canvas);
        canvas.fill_screen(monoplot_core::BinaryColor::Off);
    }

    #[test]
    fn padded_range_always_widens(lo in -1.0e4f32..1.0e4, span in 0.0f32..1.0e4) {
        let (min, max) = padded_range(lo, lo + span);
        prop_assert!(min < max);
        prop_assert!(min <= lo && max >= lo + span);
    }
}
