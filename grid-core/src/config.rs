use serde::{Deserialize, Serialize};

use crate::error::GridError;
use crate::layout::{DrawArea, compute_geometry, draw_area};
use crate::model::{
    Geometry, GridSpec, GridType, Margins, Orientation, PagePreset, PageSpec, SCREEN_DPI,
    StrokeStyle, Unit,
};

/// Key the configuration is stored under between sessions.
pub const STORAGE_KEY: &str = "gridsheet.config";

/// Flat, persisted sheet configuration owned by the UI layer.
///
/// Dimensions are in `unit`. Missing fields in stored JSON fall back to
/// the defaults, so older records keep loading after fields are added.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    pub page_size: PagePreset,
    pub orientation: Orientation,
    pub unit: Unit,
    pub width: f64,
    pub height: f64,
    pub margin_top: f64,
    pub margin_right: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
    pub grid_type: GridType,
    pub cell_size: f64,
    pub color: String,
    pub line_width: f64,
}

impl Default for SheetConfig {
    fn default() -> Self {
        SheetConfig {
            page_size: PagePreset::A4,
            orientation: Orientation::Landscape,
            unit: Unit::Mm,
            width: 210.0,
            height: 297.0,
            margin_top: 0.0,
            margin_right: 0.0,
            margin_bottom: 0.0,
            margin_left: 0.0,
            grid_type: GridType::Hex,
            cell_size: 20.0,
            color: "#000000".to_string(),
            line_width: 1.0,
        }
    }
}

impl SheetConfig {
    pub fn from_json(text: &str) -> Result<Self, GridError> {
        serde_json::from_str(text).map_err(|e| GridError::Persist(e.to_string()))
    }

    /// Stored text if it parses, defaults otherwise.
    pub fn load_or_default(stored: Option<&str>) -> Self {
        match stored {
            Some(text) => Self::from_json(text).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "falling back to default configuration");
                Self::default()
            }),
            None => Self::default(),
        }
    }

    pub fn to_json(&self) -> String {
        // plain struct of numbers, strings and unit enums: serialization cannot fail
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn set_page_size(&mut self, preset: PagePreset) {
        self.page_size = preset;
        if let Some((w, h)) = preset.size_mm() {
            self.width = self.unit.from_mm(w);
            self.height = self.unit.from_mm(h);
        }
    }

    /// Hand-entered dimensions always mean a custom page.
    pub fn set_custom_dimensions(&mut self, width: f64, height: f64) {
        self.page_size = PagePreset::Custom;
        self.width = width;
        self.height = height;
    }

    pub fn set_uniform_margin(&mut self, v: f64) {
        self.margin_top = v;
        self.margin_right = v;
        self.margin_bottom = v;
        self.margin_left = v;
    }

    /// Switch units, converting every length so the sheet looks the same.
    pub fn set_unit(&mut self, unit: Unit) {
        if unit == self.unit {
            return;
        }
        let from = self.unit;
        let conv = |v: f64| unit.from_mm(from.to_mm(v));
        self.width = conv(self.width);
        self.height = conv(self.height);
        self.margin_top = conv(self.margin_top);
        self.margin_right = conv(self.margin_right);
        self.margin_bottom = conv(self.margin_bottom);
        self.margin_left = conv(self.margin_left);
        self.cell_size = conv(self.cell_size);
        self.unit = unit;
    }

    pub fn page(&self) -> PageSpec {
        PageSpec::new(self.width, self.height, self.orientation)
    }

    pub fn margins(&self) -> Margins {
        Margins {
            top: self.margin_top,
            right: self.margin_right,
            bottom: self.margin_bottom,
            left: self.margin_left,
        }
    }

    pub fn grid(&self) -> GridSpec {
        GridSpec::new(self.grid_type, self.cell_size, &self.color)
    }

    pub fn stroke(&self) -> StrokeStyle {
        StrokeStyle {
            color: self.color.clone(),
            width: self.line_width,
        }
    }

    /// Pixels per configured unit at screen density.
    pub fn px_per_unit(&self) -> f64 {
        self.unit.px_per_unit(SCREEN_DPI)
    }

    /// Page size in whole pixels at `dpi`, oriented.
    pub fn page_px(&self, dpi: f64) -> (u32, u32) {
        let (w, h) = self.page().oriented();
        let k = self.unit.px_per_unit(dpi);
        (
            (w * k).round().max(1.0) as u32,
            (h * k).round().max(1.0) as u32,
        )
    }

    /// Page minus margins in pixels at `dpi`; not validated.
    pub fn draw_area_at(&self, dpi: f64) -> DrawArea {
        draw_area(&self.page(), &self.margins(), self.unit.px_per_unit(dpi))
    }

    pub fn validate(&self) -> Result<(), GridError> {
        self.page().validate()?;
        self.margins().validate()?;
        self.grid().validate()?;
        if !(self.line_width.is_finite() && self.line_width > 0.0) {
            return Err(GridError::invalid(
                "line width",
                format!("{} must be greater than zero", self.line_width),
            ));
        }
        Ok(())
    }

    /// Geometry at screen density.
    pub fn geometry(&self) -> Result<Geometry, GridError> {
        self.geometry_at(SCREEN_DPI)
    }

    pub fn geometry_at(&self, dpi: f64) -> Result<Geometry, GridError> {
        self.validate()?;
        compute_geometry(
            &self.page(),
            &self.margins(),
            &self.grid(),
            self.unit.px_per_unit(dpi),
        )
    }
}
