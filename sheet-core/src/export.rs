use std::fmt;
use std::path::Path;

use grid_core::{GridError, SCREEN_DPI, SheetConfig, render_clipped};
use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref};
use png::{BitDepth, ColorType, Compression, Encoder, FilterType};

use crate::svg::SvgSurface;

/// Density used when no explicit value is given on the command line.
pub const DEFAULT_EXPORT_DPI: f64 = 300.0;
const PT_PER_INCH: f64 = 72.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Pdf,
    Svg,
}

impl ExportFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(ExportFormat::Png),
            "pdf" => Some(ExportFormat::Pdf),
            "svg" => Some(ExportFormat::Svg),
            _ => None,
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            ExportFormat::Png => "grid.png",
            ExportFormat::Pdf => "grid.pdf",
            ExportFormat::Svg => "grid.svg",
        }
    }
}

#[derive(Debug)]
pub enum ExportError {
    Config(GridError),
    Svg(String),
    Pixmap { width: u32, height: u32 },
    Png(png::EncodingError),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Config(e) => write!(f, "{e}"),
            ExportError::Svg(msg) => write!(f, "SVG parse error: {msg}"),
            ExportError::Pixmap { width, height } => {
                write!(f, "cannot allocate a {width}x{height} pixmap")
            }
            ExportError::Png(e) => write!(f, "PNG encoding failed: {e}"),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::Config(e) => Some(e),
            ExportError::Png(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for ExportError {
    fn from(e: GridError) -> Self {
        ExportError::Config(e)
    }
}

impl From<png::EncodingError> for ExportError {
    fn from(e: png::EncodingError) -> Self {
        ExportError::Png(e)
    }
}

/// The configured sheet as an SVG the size of the page at `dpi`, on white,
/// with the grid clipped to the drawable area.
pub fn page_svg(config: &SheetConfig, dpi: f64) -> Result<(String, u32, u32), ExportError> {
    let geom = config.geometry_at(dpi)?;
    let (w_px, h_px) = config.page_px(dpi);
    let mut style = config.stroke();
    // line width is specified at screen density
    style.width *= dpi / SCREEN_DPI;
    let mut surface = SvgSurface::new(w_px, h_px).with_background("#ffffff");
    render_clipped(&mut surface, &config.draw_area_at(dpi), &geom, &style);
    Ok((surface.finish(), w_px, h_px))
}

pub fn rasterize(svg: &str, width: u32, height: u32) -> Result<tiny_skia::Pixmap, ExportError> {
    let opt = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg, &opt).map_err(|e| ExportError::Svg(format!("{e:?}")))?;
    let mut pixmap =
        tiny_skia::Pixmap::new(width, height).ok_or(ExportError::Pixmap { width, height })?;
    let mut pm = pixmap.as_mut();
    resvg::render(&tree, tiny_skia::Transform::identity(), &mut pm);
    Ok(pixmap)
}

/// RGBA8 PNG; the same pixmap always yields the same bytes.
pub fn encode_png(pixmap: &tiny_skia::Pixmap) -> Result<Vec<u8>, ExportError> {
    let mut buf = Vec::new();
    {
        let mut enc = Encoder::new(&mut buf, pixmap.width(), pixmap.height());
        enc.set_color(ColorType::Rgba);
        enc.set_depth(BitDepth::Eight);
        enc.set_filter(FilterType::NoFilter);
        enc.set_compression(Compression::Default);
        let mut writer = enc.write_header()?;
        writer.write_image_data(pixmap.data())?;
    }
    Ok(buf)
}

pub fn page_png(config: &SheetConfig, dpi: f64) -> Result<Vec<u8>, ExportError> {
    let (svg, w, h) = page_svg(config, dpi)?;
    let pixmap = rasterize(&svg, w, h)?;
    let bytes = encode_png(&pixmap)?;
    tracing::debug!(width = w, height = h, bytes = bytes.len(), "png exported");
    Ok(bytes)
}

/// Single-page PDF with the media box of the oriented page; the grid is
/// placed as one raster image filling the page.
pub fn page_pdf(config: &SheetConfig, dpi: f64) -> Result<Vec<u8>, ExportError> {
    let (svg, w, h) = page_svg(config, dpi)?;
    let pixmap = rasterize(&svg, w, h)?;
    let rgb = rgb_over_white(&pixmap);

    let (page_w, page_h) = config.page().oriented();
    let per_inch = config.unit.per_inch();
    let w_pt = (page_w / per_inch * PT_PER_INCH) as f32;
    let h_pt = (page_h / per_inch * PT_PER_INCH) as f32;

    let catalog_id = Ref::new(1);
    let page_tree_id = Ref::new(2);
    let page_id = Ref::new(3);
    let image_id = Ref::new(4);
    let content_id = Ref::new(5);
    let image_name = Name(b"Im1");

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id).kids([page_id]).count(1);

    let mut page = pdf.page(page_id);
    page.media_box(Rect::new(0.0, 0.0, w_pt, h_pt));
    page.parent(page_tree_id);
    page.contents(content_id);
    page.resources().x_objects().pair(image_name, image_id);
    page.finish();

    let mut image = pdf.image_xobject(image_id, &rgb);
    image.width(w as i32);
    image.height(h as i32);
    image.color_space().device_rgb();
    image.bits_per_component(8);
    image.finish();

    let mut content = Content::new();
    content.save_state();
    content.transform([w_pt, 0.0, 0.0, h_pt, 0.0, 0.0]);
    content.x_object(image_name);
    content.restore_state();
    pdf.stream(content_id, &content.finish());

    let bytes = pdf.finish();
    tracing::debug!(width = w, height = h, bytes = bytes.len(), "pdf exported");
    Ok(bytes)
}

/// Flatten premultiplied RGBA onto white.
fn rgb_over_white(pixmap: &tiny_skia::Pixmap) -> Vec<u8> {
    let mut out = Vec::with_capacity(pixmap.data().len() / 4 * 3);
    for px in pixmap.data().chunks_exact(4) {
        let inv = 255 - px[3];
        out.push(px[0].saturating_add(inv));
        out.push(px[1].saturating_add(inv));
        out.push(px[2].saturating_add(inv));
    }
    out
}

pub fn export(config: &SheetConfig, format: ExportFormat, dpi: f64) -> Result<Vec<u8>, ExportError> {
    match format {
        ExportFormat::Png => page_png(config, dpi),
        ExportFormat::Pdf => page_pdf(config, dpi),
        ExportFormat::Svg => page_svg(config, dpi).map(|(svg, _, _)| svg.into_bytes()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(ExportFormat::from_path(Path::new("a/grid.PNG")), Some(ExportFormat::Png));
        assert_eq!(ExportFormat::from_path(Path::new("grid.pdf")), Some(ExportFormat::Pdf));
        assert_eq!(ExportFormat::from_path(Path::new("grid.svg")), Some(ExportFormat::Svg));
        assert_eq!(ExportFormat::from_path(Path::new("grid.jpg")), None);
        assert_eq!(ExportFormat::from_path(Path::new("grid")), None);
    }

    #[test]
    fn white_flattening() {
        let mut pm = tiny_skia::Pixmap::new(2, 1).unwrap();
        pm.data_mut()[0..4].copy_from_slice(&[0, 0, 0, 255]);
        // second pixel stays fully transparent
        assert_eq!(rgb_over_white(&pm), vec![0, 0, 0, 255, 255, 255]);
    }

    #[test]
    fn invalid_config_is_reported() {
        let mut cfg = SheetConfig::default();
        cfg.cell_size = -2.0;
        let err = page_svg(&cfg, 96.0).unwrap_err();
        assert!(matches!(err, ExportError::Config(GridError::InvalidConfig { .. })));
    }

    #[test]
    fn stroke_width_scales_with_density() {
        let cfg = SheetConfig::default();
        let (svg, w, h) = page_svg(&cfg, 192.0).unwrap();
        assert_eq!((w, h), cfg.page_px(192.0));
        assert!(svg.contains("stroke-width=\"2.00\""));
    }
}
