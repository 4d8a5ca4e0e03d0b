//! Grid layout and rendering core for printable tracing sheets.
//!
//! [`compute_geometry`] turns a page, its margins and a grid description
//! into line segments or hexagons in pixel space; [`render`] strokes that
//! geometry onto any [`Surface`]. Everything else here (configuration
//! record, history, background placement) is state the UI layer owns and
//! passes in.

pub mod background;
pub mod config;
pub mod error;
pub mod history;
pub mod layout;
pub mod model;
pub mod render;
pub mod schedule;

pub use background::BackgroundPlacement;
pub use config::{STORAGE_KEY, SheetConfig};
pub use error::GridError;
pub use history::{HISTORY_LIMIT, History};
pub use layout::{
    DrawArea, MAX_GRID_ELEMENTS, compute_geometry, draw_area, hex_col_pitch, hex_row_pitch,
};
pub use model::{
    Geometry, GridSpec, GridType, Hexagon, Margins, Orientation, PagePreset, PageSpec, Point,
    SCREEN_DPI, Segment, StrokeStyle, Unit,
};
pub use render::{Surface, render, render_clipped};
pub use schedule::RedrawGate;
