//! Scenes described in TOML
#![cfg(feature = "serde")]

use monoplot_core::config::{BuiltinFunction, WidgetConfig};
use monoplot_core::{AssetKind, Canvas, PlotStyle, SceneConfig, Shape, Widget};

const DASHBOARD: &str = r#"
[[assets]]
x = 0
y = 0
width = 64
height = 32
z_index = 1
border = true

[assets.widget]
type = "function_plot"
function = "sin"
domain = { min_x = -3.0, max_x = 3.0, min_y = -1.5, max_y = 1.5 }

[assets.widget.plot]
show_grid = true
grid_spacing = 8

[[assets]]
x = 64
y = 0
width = 64
height = 32

[assets.widget]
type = "table"
rows = 2
cols = 2

[assets.widget.table]
show_headers = false

[[assets]]
x = 0
y = 32
width = 64
height = 32
animate = true

[assets.widget]
type = "data_plot"
capacity = 8
style = "lines_points"
points = [[0.0, 1.0], [1.0, 3.0], [2.0, 2.0]]

[[assets]]
x = 80
y = 40
width = 0
height = 0
z_index = -2
visible = false

[assets.widget]
type = "geometry"
filled = true
shape = { kind = "circle", radius = 6 }

[[assets]]
x = 64
y = 32
width = 64
height = 12

[assets.widget]
type = "text"
text = "hello"
style = { align = "center", size = 1 }
"#;

fn scene() -> SceneConfig {
    toml::from_str(DASHBOARD).unwrap()
}

#[test]
fn test_parse_dashboard() {
    let scene = scene();
    assert_eq!(scene.assets.len(), 5);
    assert!(scene.assets[0].border);
    assert!(!scene.assets[3].visible);
    assert!(scene.assets[1].visible);

    match &scene.assets[0].widget {
        WidgetConfig::FunctionPlot { function, plot, .. } => {
            assert_eq!(*function, BuiltinFunction::Sin);
            assert!(plot.show_grid);
            assert_eq!(plot.grid_spacing, 8);
            assert!(plot.show_axes);
        }
        other => panic!("unexpected widget {other:?}"),
    }
    match &scene.assets[3].widget {
        WidgetConfig::Geometry { shape, filled } => {
            assert_eq!(*shape, Shape::Circle { radius: 6 });
            assert!(*filled);
        }
        other => panic!("unexpected widget {other:?}"),
    }
}

#[test]
fn test_build_dashboard() {
    let (mut compositor, ids) = scene().build().unwrap();
    assert_eq!(compositor.len(), 5);

    let kinds: Vec<_> = ids
        .iter()
        .map(|&id| compositor.get(id).unwrap().kind())
        .collect();
    assert_eq!(
        kinds,
        [
            AssetKind::FunctionPlot,
            AssetKind::Table,
            AssetKind::DataPlot,
            AssetKind::Geometry,
            AssetKind::Text,
        ]
    );

    let plot = compositor.get(ids[2]).unwrap().as_data_plot().unwrap();
    assert_eq!(plot.capacity(), 8);
    assert_eq!(plot.len(), 3);
    assert_eq!(plot.style(), PlotStyle::LinesPoints);
    assert!(plot.is_animated());

    let table = compositor.get(ids[1]).unwrap().as_table().unwrap();
    assert!(!table.show_headers());

    // hidden geometry sorts first but is not drawn
    assert_eq!(compositor.draw_order()[0], ids[3]);

    let mut canvas = Canvas::new();
    compositor.render_all(&mut canvas);
    assert!(canvas.count_on_in(0, 0, 64, 32) > 0);
    // circle centre is (86, 46)
    assert!(!canvas.is_on(86, 50));
}

#[test]
fn test_empty_scene() {
    let scene: SceneConfig = toml::from_str("").unwrap();
    let (compositor, ids) = scene.build().unwrap();
    assert!(compositor.is_empty());
    assert!(ids.is_empty());
}
