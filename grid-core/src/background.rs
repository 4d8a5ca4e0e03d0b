use crate::model::Point;

pub const MIN_SCALE: f64 = 0.05;
pub const MAX_SCALE: f64 = 20.0;

/// Placement of the reference image under (or over) the grid.
///
/// Only translation and uniform scale; the grid never reads it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BackgroundPlacement {
    pub offset: Point,
    pub scale: f64,
    drag_anchor: Option<Point>,
}

impl Default for BackgroundPlacement {
    fn default() -> Self {
        BackgroundPlacement {
            offset: Point::new(0.0, 0.0),
            scale: 1.0,
            drag_anchor: None,
        }
    }
}

impl BackgroundPlacement {
    /// A freshly loaded image sits at the page origin, unscaled.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    pub fn begin_drag(&mut self, pointer: Point) {
        self.drag_anchor = Some(Point::new(
            pointer.x - self.offset.x,
            pointer.y - self.offset.y,
        ));
    }

    /// Returns false when no drag is in progress.
    pub fn drag_to(&mut self, pointer: Point) -> bool {
        let Some(anchor) = self.drag_anchor else {
            return false;
        };
        self.offset = Point::new(pointer.x - anchor.x, pointer.y - anchor.y);
        true
    }

    pub fn end_drag(&mut self) {
        self.drag_anchor = None;
    }

    /// Scale by `factor` around `pointer` so the image point under the
    /// pointer stays put.
    pub fn zoom_at(&mut self, pointer: Point, factor: f64) {
        if !(factor.is_finite() && factor > 0.0) {
            return;
        }
        let next = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
        let k = next / self.scale;
        self.offset = Point::new(
            pointer.x - (pointer.x - self.offset.x) * k,
            pointer.y - (pointer.y - self.offset.y) * k,
        );
        self.scale = next;
    }

    /// Wheel delta (pixels, positive = scroll down) to a zoom factor.
    pub fn wheel_factor(delta_y: f64) -> f64 {
        (-delta_y * 0.0015).exp()
    }

    /// CSS `transform` value; pair with `transform-origin: 0 0`.
    pub fn css_transform(&self) -> String {
        format!(
            "translate({:.2}px, {:.2}px) scale({:.4})",
            self.offset.x, self.offset.y, self.scale
        )
    }
}
