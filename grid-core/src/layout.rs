use crate::error::{GridError, positive};
use crate::model::{Geometry, GridSpec, GridType, Hexagon, Margins, PageSpec, Point, Segment};

/// Slack for lines that land on the drawable boundary up to float rounding.
const BOUNDARY_EPS_PX: f64 = 1e-6;

/// Upper bound on segments or hexagons in one layout. A4 at 1 mm hex cells
/// is about 50 000; anything past the cap is rejected as too small a cell.
pub const MAX_GRID_ELEMENTS: usize = 250_000;

/// Drawable rectangle in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawArea {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl DrawArea {
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn is_degenerate(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }
}

/// Page minus margins, converted to pixels.
pub fn draw_area(page: &PageSpec, margins: &Margins, px_per_unit: f64) -> DrawArea {
    let (w, h) = page.oriented();
    DrawArea {
        left: margins.left * px_per_unit,
        top: margins.top * px_per_unit,
        right: (w - margins.right) * px_per_unit,
        bottom: (h - margins.bottom) * px_per_unit,
    }
}

/// Vertical row pitch of the hex tiling for radius `r`.
pub fn hex_row_pitch(r: f64) -> f64 {
    r * 3.0_f64.sqrt() / 2.0
}

/// Horizontal column pitch of the hex tiling for radius `r`.
pub fn hex_col_pitch(r: f64) -> f64 {
    1.5 * r
}

/// Lay out the grid described by `grid` on the page.
///
/// Non-positive cell size, page dimension or density is rejected with
/// [`GridError::InvalidConfig`]. Margins that swallow the page are not an
/// error: the result is an empty geometry.
pub fn compute_geometry(
    page: &PageSpec,
    margins: &Margins,
    grid: &GridSpec,
    px_per_unit: f64,
) -> Result<Geometry, GridError> {
    positive("px per unit", px_per_unit)?;
    page.validate()?;
    margins.validate()?;
    positive("cell size", grid.cell_size)?;

    let area = draw_area(page, margins, px_per_unit);
    if area.is_degenerate() {
        tracing::debug!(?area, "drawable area is empty");
        return Ok(Geometry::empty(grid.type_));
    }
    let step = grid.cell_size * px_per_unit;
    let estimate = estimated_len(&area, grid.type_, step);
    if estimate > MAX_GRID_ELEMENTS as f64 {
        return Err(GridError::invalid(
            "cell size",
            format!(
                "{} is too small for this page: about {estimate:.0} grid elements, at most {MAX_GRID_ELEMENTS}",
                grid.cell_size
            ),
        ));
    }
    let geom = match grid.type_ {
        GridType::Square => Geometry::Square(square_segments(&area, step)),
        GridType::Hex => Geometry::Hex(hex_cells(&area, step)),
    };
    tracing::debug!(kind = grid.type_.as_str(), count = geom.len(), "grid laid out");
    Ok(geom)
}

/// Upper bound on what the layout loops below emit for `area`.
fn estimated_len(area: &DrawArea, kind: GridType, step: f64) -> f64 {
    match kind {
        GridType::Square => area.width() / step + area.height() / step + 2.0,
        GridType::Hex => {
            (area.height() / hex_row_pitch(step) + 2.0) * (area.width() / hex_col_pitch(step) + 2.0)
        }
    }
}

fn square_segments(area: &DrawArea, spacing: f64) -> Vec<Segment> {
    let mut out = Vec::new();
    let mut k = 0u32;
    loop {
        let x = area.left + k as f64 * spacing;
        if x > area.right + BOUNDARY_EPS_PX {
            break;
        }
        out.push(Segment {
            start: Point::new(x, area.top),
            end: Point::new(x, area.bottom),
        });
        k += 1;
    }
    k = 0;
    loop {
        let y = area.top + k as f64 * spacing;
        if y > area.bottom + BOUNDARY_EPS_PX {
            break;
        }
        out.push(Segment {
            start: Point::new(area.left, y),
            end: Point::new(area.right, y),
        });
        k += 1;
    }
    out
}

fn hex_cells(area: &DrawArea, r: f64) -> Vec<Hexagon> {
    let row_pitch = hex_row_pitch(r);
    let col_pitch = hex_col_pitch(r);
    let mut out = Vec::new();
    // one extra pitch on the far edges keeps clipped hexagons visible
    let y_end = area.bottom + row_pitch;
    let x_end = area.right + col_pitch;
    let mut row = 0u32;
    loop {
        let y = area.top + row as f64 * row_pitch;
        if y >= y_end {
            break;
        }
        let offset = if row % 2 == 1 { col_pitch / 2.0 } else { 0.0 };
        let mut col = 0u32;
        loop {
            let x = area.left + offset + col as f64 * col_pitch;
            if x >= x_end {
                break;
            }
            out.push(Hexagon {
                center: Point::new(x, y),
                radius: r,
            });
            col += 1;
        }
        row += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Orientation, SCREEN_DPI, Unit};

    fn a4() -> PageSpec {
        PageSpec::new(210.0, 297.0, Orientation::Portrait)
    }

    fn px_mm() -> f64 {
        Unit::Mm.px_per_unit(SCREEN_DPI)
    }

    fn segments(g: Geometry) -> Vec<Segment> {
        match g {
            Geometry::Square(s) => s,
            Geometry::Hex(_) => panic!("expected square geometry"),
        }
    }

    fn hexagons(g: Geometry) -> Vec<Hexagon> {
        match g {
            Geometry::Hex(h) => h,
            Geometry::Square(_) => panic!("expected hex geometry"),
        }
    }

    #[test]
    fn a4_square_10mm_has_22_verticals() {
        let grid = GridSpec::new(GridType::Square, 10.0, "#000");
        let segs = segments(compute_geometry(&a4(), &Margins::default(), &grid, px_mm()).unwrap());
        let verticals = segs.iter().filter(|s| s.start.x == s.end.x).count();
        let horizontals = segs.iter().filter(|s| s.start.y == s.end.y).count();
        assert_eq!(verticals, 22);
        // 297 / 10 -> 29 full cells plus the origin line
        assert_eq!(horizontals, 30);
    }

    #[test]
    fn verticals_step_by_spacing_from_left_margin() {
        let margins = Margins {
            top: 12.0,
            right: 7.0,
            bottom: 3.0,
            left: 15.0,
        };
        let grid = GridSpec::new(GridType::Square, 8.0, "#000");
        let segs = segments(compute_geometry(&a4(), &margins, &grid, px_mm()).unwrap());
        let xs: Vec<f64> = segs
            .iter()
            .filter(|s| s.start.x == s.end.x)
            .map(|s| s.start.x)
            .collect();
        assert!((xs[0] - 15.0 * px_mm()).abs() < 1e-9);
        for w in xs.windows(2) {
            assert!((w[1] - w[0] - 8.0 * px_mm()).abs() < 1e-9);
        }
        let right = (210.0 - 7.0) * px_mm();
        assert!(*xs.last().unwrap() <= right + 1e-6);
        assert!(*xs.last().unwrap() + 8.0 * px_mm() > right);
        // verticals span the drawable height
        let first = segs[0];
        assert!((first.start.y - 12.0 * px_mm()).abs() < 1e-9);
        assert!((first.end.y - (297.0 - 3.0) * px_mm()).abs() < 1e-9);
    }

    #[test]
    fn hex_row_pitch_and_offsets() {
        let grid = GridSpec::new(GridType::Hex, 10.0, "#000");
        let hexes = hexagons(compute_geometry(&a4(), &Margins::default(), &grid, px_mm()).unwrap());
        let r = 10.0 * px_mm();
        assert!((hex_row_pitch(r) - 32.73).abs() < 0.01);
        assert!((hex_col_pitch(r) / 2.0 - 28.35).abs() < 0.01);

        let mut rows: Vec<(f64, f64)> = Vec::new();
        for h in &hexes {
            assert_eq!(h.radius, r);
            if rows.last().map(|(y, _)| *y) != Some(h.center.y) {
                rows.push((h.center.y, h.center.x));
            }
        }
        assert_eq!(rows[0], (0.0, 0.0));
        assert!((rows[1].1 - 28.35).abs() < 0.01);
        for w in rows.windows(2) {
            assert!((w[1].0 - w[0].0 - hex_row_pitch(r)).abs() < 1e-9);
            assert!(((w[1].1 - w[0].1).abs() - hex_col_pitch(r) / 2.0).abs() < 1e-9);
        }
        // rows reach one pitch past the bottom edge
        let bottom = 297.0 * px_mm();
        let last_y = rows.last().unwrap().0;
        assert!(last_y < bottom + hex_row_pitch(r));
        assert!(last_y + hex_row_pitch(r) >= bottom + hex_row_pitch(r) - 1e-9);
    }

    #[test]
    fn hex_columns_cover_right_edge() {
        let grid = GridSpec::new(GridType::Hex, 10.0, "#000");
        let hexes = hexagons(compute_geometry(&a4(), &Margins::default(), &grid, px_mm()).unwrap());
        let r = 10.0 * px_mm();
        let right = 210.0 * px_mm();
        let first_row: Vec<&Hexagon> = hexes.iter().filter(|h| h.center.y == 0.0).collect();
        let last = first_row.last().unwrap();
        assert!(last.center.x < right + hex_col_pitch(r));
        assert!(last.center.x + hex_col_pitch(r) >= right + hex_col_pitch(r) - 1e-9);
    }

    #[test]
    fn hex_rows_start_inside_margins() {
        let margins = Margins {
            top: 12.0,
            right: 7.0,
            bottom: 30.0,
            left: 15.0,
        };
        let grid = GridSpec::new(GridType::Hex, 10.0, "#000");
        let hexes = hexagons(compute_geometry(&a4(), &margins, &grid, px_mm()).unwrap());
        let r = 10.0 * px_mm();
        let (row_pitch, col_pitch) = (hex_row_pitch(r), hex_col_pitch(r));
        let area = draw_area(&a4(), &margins, px_mm());

        assert!((hexes[0].center.x - area.left).abs() < 1e-9);
        assert!((hexes[0].center.y - area.top).abs() < 1e-9);
        let row1 = hexes
            .iter()
            .find(|h| (h.center.y - (area.top + row_pitch)).abs() < 1e-9)
            .unwrap();
        assert!((row1.center.x - (area.left + col_pitch / 2.0)).abs() < 1e-9);

        let last_y = hexes.iter().map(|h| h.center.y).fold(f64::MIN, f64::max);
        assert!(last_y < area.bottom + row_pitch);
        assert!(last_y + row_pitch >= area.bottom + row_pitch - 1e-9);
        let last_x = hexes
            .iter()
            .filter(|h| (h.center.y - area.top).abs() < 1e-9)
            .map(|h| h.center.x)
            .fold(f64::MIN, f64::max);
        assert!(last_x < area.right + col_pitch);
        assert!(last_x + col_pitch >= area.right + col_pitch - 1e-9);
        assert!(hexes.iter().all(|h| h.center.x >= area.left && h.center.y >= area.top));
    }

    #[test]
    fn tiny_cells_are_rejected() {
        let grid = GridSpec::new(GridType::Hex, 0.01, "#000");
        let err = compute_geometry(&a4(), &Margins::default(), &grid, px_mm()).unwrap_err();
        assert!(matches!(err, GridError::InvalidConfig { field: "cell size", .. }));
        // 1 mm hexagons on A4 stay well under the cap
        let grid = GridSpec::new(GridType::Hex, 1.0, "#000");
        let g = compute_geometry(&a4(), &Margins::default(), &grid, px_mm()).unwrap();
        assert!(g.len() <= MAX_GRID_ELEMENTS);
        let area = draw_area(&a4(), &Margins::default(), px_mm());
        assert!(g.len() as f64 <= estimated_len(&area, GridType::Hex, px_mm()));
    }

    #[test]
    fn degenerate_area_is_empty_not_error() {
        let margins = Margins {
            left: 150.0,
            right: 60.0,
            ..Margins::default()
        };
        for t in [GridType::Square, GridType::Hex] {
            let grid = GridSpec::new(t, 10.0, "#000");
            let g = compute_geometry(&a4(), &margins, &grid, px_mm()).unwrap();
            assert!(g.is_empty());
            assert_eq!(g, Geometry::empty(t));
        }
        let grid = GridSpec::new(GridType::Square, 10.0, "#000");
        let g = compute_geometry(&a4(), &Margins::uniform(200.0), &grid, px_mm()).unwrap();
        assert!(g.is_empty());
    }

    #[test]
    fn non_positive_inputs_are_invalid() {
        let margins = Margins::default();
        for cell in [0.0, -3.0, f64::NAN] {
            let grid = GridSpec::new(GridType::Square, cell, "#000");
            assert!(matches!(
                compute_geometry(&a4(), &margins, &grid, px_mm()),
                Err(GridError::InvalidConfig { .. })
            ));
        }
        let grid = GridSpec::new(GridType::Hex, 10.0, "#000");
        let flat = PageSpec::new(0.0, 297.0, Orientation::Portrait);
        assert!(compute_geometry(&flat, &margins, &grid, px_mm()).is_err());
        assert!(compute_geometry(&a4(), &margins, &grid, 0.0).is_err());
        assert!(compute_geometry(&a4(), &Margins::uniform(-1.0), &grid, px_mm()).is_err());
    }

    #[test]
    fn layout_is_idempotent() {
        let margins = Margins::uniform(5.0);
        for t in [GridType::Square, GridType::Hex] {
            let grid = GridSpec::new(t, 7.5, "#000");
            let a = compute_geometry(&a4(), &margins, &grid, px_mm()).unwrap();
            let b = compute_geometry(&a4(), &margins, &grid, px_mm()).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn landscape_swaps_line_counts() {
        let grid = GridSpec::new(GridType::Square, 10.0, "#000");
        let page = PageSpec::new(210.0, 297.0, Orientation::Landscape);
        let segs = segments(compute_geometry(&page, &Margins::default(), &grid, px_mm()).unwrap());
        let verticals = segs.iter().filter(|s| s.start.x == s.end.x).count();
        assert_eq!(verticals, 30);
    }
}
