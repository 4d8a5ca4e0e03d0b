// Page-level scenarios through the public API.

use grid_core::{
    Geometry, GridError, GridSpec, GridType, Margins, Orientation, PageSpec, SCREEN_DPI,
    SheetConfig, Surface, Unit, compute_geometry, hex_row_pitch, render,
};

fn px_mm() -> f64 {
    Unit::Mm.px_per_unit(SCREEN_DPI)
}

#[test]
fn test_a4_portrait_square_grid() {
    let page = PageSpec::new(210.0, 297.0, Orientation::Portrait);
    let grid = GridSpec::new(GridType::Square, 10.0, "#000000");
    let geom = compute_geometry(&page, &Margins::default(), &grid, px_mm()).unwrap();
    let Geometry::Square(segs) = geom else {
        panic!("square grid expected");
    };
    let xs: Vec<f64> = segs
        .iter()
        .filter(|s| s.start.x == s.end.x)
        .map(|s| s.start.x)
        .collect();
    assert_eq!(xs.len(), 22);
    assert_eq!(xs[0], 0.0);
    assert!(xs.windows(2).all(|w| w[1] > w[0]));
}

#[test]
fn test_a4_portrait_hex_grid() {
    let page = PageSpec::new(210.0, 297.0, Orientation::Portrait);
    let grid = GridSpec::new(GridType::Hex, 10.0, "#000000");
    let Geometry::Hex(hexes) = compute_geometry(&page, &Margins::default(), &grid, px_mm()).unwrap()
    else {
        panic!("hex grid expected");
    };
    let r = 10.0 * px_mm();
    let second_row_y = hex_row_pitch(r);
    let first = hexes.iter().find(|h| h.center.y == 0.0).unwrap();
    let second = hexes
        .iter()
        .find(|h| (h.center.y - second_row_y).abs() < 1e-9)
        .unwrap();
    assert_eq!(first.center.x, 0.0);
    assert!((second.center.x - 28.35).abs() < 0.01);
}

#[test]
fn test_margins_covering_page() {
    let page = PageSpec::new(100.0, 100.0, Orientation::Portrait);
    let grid = GridSpec::new(GridType::Hex, 10.0, "#000000");
    let geom = compute_geometry(&page, &Margins::uniform(50.0), &grid, px_mm()).unwrap();
    assert!(geom.is_empty());
}

#[test]
fn test_zero_cell_size() {
    let page = PageSpec::new(100.0, 100.0, Orientation::Portrait);
    let grid = GridSpec::new(GridType::Square, 0.0, "#000000");
    let err = compute_geometry(&page, &Margins::default(), &grid, px_mm()).unwrap_err();
    assert!(matches!(err, GridError::InvalidConfig { field: "cell size", .. }));
}

#[derive(Default)]
struct Counter {
    clears: usize,
    strokes: usize,
    moves: usize,
}

impl Surface for Counter {
    fn clear(&mut self) {
        self.clears += 1;
    }
    fn clip(&mut self, _area: &grid_core::DrawArea) {}
    fn set_stroke(&mut self, _style: &grid_core::StrokeStyle) {}
    fn begin_path(&mut self) {}
    fn move_to(&mut self, _p: grid_core::Point) {
        self.moves += 1;
    }
    fn line_to(&mut self, _p: grid_core::Point) {}
    fn close_path(&mut self) {}
    fn stroke(&mut self) {
        self.strokes += 1;
    }
}

#[test]
fn test_config_to_surface() {
    let mut cfg = SheetConfig::default();
    cfg.grid_type = GridType::Square;
    cfg.cell_size = 10.0;
    let geom = cfg.geometry().unwrap();
    let mut surface = Counter::default();
    render(&mut surface, &geom, &cfg.stroke());
    assert_eq!(surface.clears, 1);
    assert_eq!(surface.strokes, geom.len());
    assert_eq!(surface.moves, geom.len());

    cfg.grid_type = GridType::Hex;
    let geom = cfg.geometry().unwrap();
    let mut surface = Counter::default();
    render(&mut surface, &geom, &cfg.stroke());
    assert_eq!(surface.strokes, 1);
    assert_eq!(surface.moves, geom.len());
}
