use crate::layout::DrawArea;
use crate::model::{Geometry, Point, StrokeStyle};

/// Minimal 2D stroke surface, shaped after a canvas 2D context.
pub trait Surface {
    /// Wipe the drawable region.
    fn clear(&mut self);
    /// Restrict later strokes to `area` until the next `clear`.
    fn clip(&mut self, area: &DrawArea);
    fn set_stroke(&mut self, style: &StrokeStyle);
    fn begin_path(&mut self);
    fn move_to(&mut self, p: Point);
    fn line_to(&mut self, p: Point);
    fn close_path(&mut self);
    fn stroke(&mut self);
}

/// Draw `geometry` onto `surface` with a uniform stroke.
///
/// Segments are stroked one by one; hexagons share a single path and
/// are stroked once.
pub fn render<S: Surface + ?Sized>(surface: &mut S, geometry: &Geometry, style: &StrokeStyle) {
    surface.clear();
    stroke_geometry(surface, geometry, style);
}

/// Like [`render`], but hexagons crossing the drawable edge are cut off
/// there instead of spilling into the margins.
pub fn render_clipped<S: Surface + ?Sized>(
    surface: &mut S,
    area: &DrawArea,
    geometry: &Geometry,
    style: &StrokeStyle,
) {
    surface.clear();
    if geometry.is_empty() {
        return;
    }
    surface.clip(area);
    stroke_geometry(surface, geometry, style);
}

fn stroke_geometry<S: Surface + ?Sized>(surface: &mut S, geometry: &Geometry, style: &StrokeStyle) {
    surface.set_stroke(style);
    match geometry {
        Geometry::Square(segments) => {
            for seg in segments {
                surface.begin_path();
                surface.move_to(seg.start);
                surface.line_to(seg.end);
                surface.stroke();
            }
        }
        Geometry::Hex(hexes) => {
            if hexes.is_empty() {
                return;
            }
            surface.begin_path();
            for hex in hexes {
                let [first, rest @ ..] = hex.vertices();
                surface.move_to(first);
                for v in rest {
                    surface.line_to(v);
                }
                surface.close_path();
            }
            surface.stroke();
        }
    }
}
