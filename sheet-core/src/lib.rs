//! Drawing surfaces and page export for grid sheets.
//!
//! The grid is drawn into an SVG surface, rasterized with resvg and
//! written out as PNG, or placed as a page-filling image in a one-page PDF.

mod export;
mod svg;

pub use export::{
    DEFAULT_EXPORT_DPI, ExportError, ExportFormat, encode_png, export, page_pdf, page_png,
    page_svg, rasterize,
};
pub use svg::SvgSurface;
