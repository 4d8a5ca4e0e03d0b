use grid_core::{History, SheetConfig};
use web_sys::Document;

use crate::constants::STATUS_ID;
use crate::utils::{fmt_len, set_field_value};

/// Push the configuration back into the form so every control agrees with it.
pub fn sync(document: &Document, config: &SheetConfig) {
    set_field_value(document, "pageSize", config.page_size.as_str());
    set_field_value(document, "orientation", config.orientation.as_str());
    set_field_value(document, "unit", config.unit.as_str());
    set_field_value(document, "pageWidth", &fmt_len(config.width));
    set_field_value(document, "pageHeight", &fmt_len(config.height));
    set_field_value(document, "marginTop", &fmt_len(config.margin_top));
    set_field_value(document, "marginRight", &fmt_len(config.margin_right));
    set_field_value(document, "marginBottom", &fmt_len(config.margin_bottom));
    set_field_value(document, "marginLeft", &fmt_len(config.margin_left));
    let all = uniform_margin(config).map(fmt_len).unwrap_or_default();
    set_field_value(document, "marginAll", &all);
    set_field_value(document, "gridType", config.grid_type.as_str());
    set_field_value(document, "cellSize", &fmt_len(config.cell_size));
    set_field_value(document, "color", &config.color);
}

pub fn sync_history(document: &Document, history: &History<SheetConfig>) {
    set_disabled(document, "undoBtn", !history.can_undo());
    set_disabled(document, "redoBtn", !history.can_redo());
}

fn set_disabled(document: &Document, id: &str, disabled: bool) {
    if let Some(el) = document.get_element_by_id(id) {
        let _ = el.toggle_attribute_with_force("disabled", disabled);
    }
}

/// Empty message clears the status line.
pub fn set_status(document: &Document, msg: &str) {
    if let Some(el) = document.get_element_by_id(STATUS_ID) {
        el.set_text_content(Some(msg));
    }
}

/// The "all margins" field only shows a value when the four sides agree.
fn uniform_margin(config: &SheetConfig) -> Option<f64> {
    let m = config.margin_top;
    (config.margin_right == m && config.margin_bottom == m && config.margin_left == m).then_some(m)
}
