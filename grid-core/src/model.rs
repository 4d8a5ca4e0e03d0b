use serde::{Deserialize, Serialize};

use crate::error::{GridError, non_negative, positive};

/// Screen density the canvas is laid out at.
pub const SCREEN_DPI: f64 = 96.0;
pub const MM_PER_INCH: f64 = 25.4;

/// Basic two dimensional point in pixel space (y grows downwards).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from(v: (f64, f64)) -> Self {
        Point { x: v.0, y: v.1 }
    }
}

/// Physical unit used for page, margin and cell dimensions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Mm,
    Cm,
    In,
}

impl Unit {
    pub fn per_inch(self) -> f64 {
        match self {
            Unit::Mm => MM_PER_INCH,
            Unit::Cm => MM_PER_INCH / 10.0,
            Unit::In => 1.0,
        }
    }

    /// Pixels per unit at the given density (96 dpi => 96/25.4 px per mm).
    pub fn px_per_unit(self, dpi: f64) -> f64 {
        dpi / self.per_inch()
    }

    pub fn from_mm(self, mm: f64) -> f64 {
        match self {
            Unit::Mm => mm,
            _ => mm / MM_PER_INCH * self.per_inch(),
        }
    }

    pub fn to_mm(self, v: f64) -> f64 {
        match self {
            Unit::Mm => v,
            _ => v / self.per_inch() * MM_PER_INCH,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Unit::Mm => "mm",
            Unit::Cm => "cm",
            Unit::In => "in",
        }
    }

    pub fn parse(s: &str) -> Option<Unit> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mm" => Some(Unit::Mm),
            "cm" => Some(Unit::Cm),
            "in" | "inch" => Some(Unit::In),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        }
    }

    pub fn parse(s: &str) -> Option<Orientation> {
        match s.trim().to_ascii_lowercase().as_str() {
            "portrait" => Some(Orientation::Portrait),
            "landscape" => Some(Orientation::Landscape),
            _ => None,
        }
    }
}

/// Named paper sizes. Sizes are in millimetres, portrait.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PagePreset {
    #[default]
    A4,
    A3,
    Letter,
    Custom,
}

impl PagePreset {
    pub fn size_mm(self) -> Option<(f64, f64)> {
        match self {
            PagePreset::A4 => Some((210.0, 297.0)),
            PagePreset::A3 => Some((297.0, 420.0)),
            PagePreset::Letter => Some((215.9, 279.4)),
            PagePreset::Custom => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PagePreset::A4 => "A4",
            PagePreset::A3 => "A3",
            PagePreset::Letter => "Letter",
            PagePreset::Custom => "Custom",
        }
    }

    pub fn parse(s: &str) -> Option<PagePreset> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a4" => Some(PagePreset::A4),
            "a3" => Some(PagePreset::A3),
            "letter" => Some(PagePreset::Letter),
            "custom" => Some(PagePreset::Custom),
            _ => None,
        }
    }
}

/// Page size in physical units plus orientation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PageSpec {
    pub width: f64,
    pub height: f64,
    pub orientation: Orientation,
}

impl PageSpec {
    pub fn new(width: f64, height: f64, orientation: Orientation) -> Self {
        PageSpec {
            width,
            height,
            orientation,
        }
    }

    pub fn validate(&self) -> Result<(), GridError> {
        positive("page width", self.width)?;
        positive("page height", self.height)?;
        Ok(())
    }

    /// Width and height as laid out on screen: short side across for
    /// portrait, long side across for landscape.
    pub fn oriented(&self) -> (f64, f64) {
        let short = self.width.min(self.height);
        let long = self.width.max(self.height);
        match self.orientation {
            Orientation::Portrait => (short, long),
            Orientation::Landscape => (long, short),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    pub fn uniform(v: f64) -> Self {
        Margins {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }

    pub fn validate(&self) -> Result<(), GridError> {
        non_negative("margin top", self.top)?;
        non_negative("margin right", self.right)?;
        non_negative("margin bottom", self.bottom)?;
        non_negative("margin left", self.left)?;
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridType {
    Square,
    #[default]
    Hex,
}

impl GridType {
    pub fn as_str(self) -> &'static str {
        match self {
            GridType::Square => "square",
            GridType::Hex => "hex",
        }
    }

    pub fn parse(s: &str) -> Option<GridType> {
        match s.trim().to_ascii_lowercase().as_str() {
            "square" => Some(GridType::Square),
            "hex" | "hexagon" => Some(GridType::Hex),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    #[serde(rename = "type")]
    pub type_: GridType,
    /// Line spacing for square grids, hexagon radius for hex grids.
    pub cell_size: f64,
    pub color: String,
}

impl GridSpec {
    pub fn new(type_: GridType, cell_size: f64, color: &str) -> Self {
        GridSpec {
            type_,
            cell_size,
            color: color.to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), GridError> {
        positive("cell size", self.cell_size)?;
        if !is_hex_color(&self.color) {
            return Err(GridError::invalid(
                "color",
                format!("{:?} is not a #rgb or #rrggbb color", self.color),
            ));
        }
        Ok(())
    }
}

pub fn is_hex_color(s: &str) -> bool {
    let Some(digits) = s.strip_prefix('#') else {
        return false;
    };
    matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

/// Stroke applied uniformly to everything drawn in one render pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: String,
    pub width: f64,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        StrokeStyle {
            color: "#000000".to_string(),
            width: 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

/// Regular flat-top hexagon given by center and circumradius.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hexagon {
    pub center: Point,
    pub radius: f64,
}

impl Hexagon {
    /// Vertices at multiples of 60 degrees starting from the right-hand
    /// point; clockwise on a y-down surface.
    pub fn vertices(&self) -> [Point; 6] {
        let mut out = [self.center; 6];
        for (i, v) in out.iter_mut().enumerate() {
            let (s, c) = (i as f64 * std::f64::consts::FRAC_PI_3).sin_cos();
            v.x = self.center.x + self.radius * c;
            v.y = self.center.y + self.radius * s;
        }
        out
    }
}

/// Drawn output of the layout calculator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    Square(Vec<Segment>),
    Hex(Vec<Hexagon>),
}

impl Geometry {
    pub fn empty(type_: GridType) -> Self {
        match type_ {
            GridType::Square => Geometry::Square(Vec::new()),
            GridType::Hex => Geometry::Hex(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Geometry::Square(segs) => segs.len(),
            Geometry::Hex(hexes) => hexes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
