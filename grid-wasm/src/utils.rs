use js_sys::{Array, Uint8Array};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, Document, HtmlElement, HtmlInputElement, HtmlSelectElement, Url};

/// Log a message to the browser console.
pub fn log(s: &str) {
    web_sys::console::log_1(&JsValue::from_str(s));
}

/// Hand `bytes` to the browser as a download named `filename`.
pub fn save_bytes_as_file(document: &Document, filename: &str, bytes: &[u8]) -> Result<(), JsValue> {
    let array = Array::new();
    array.push(&Uint8Array::from(bytes));
    let blob = Blob::new_with_u8_array_sequence(&array)?;
    let url = Url::create_object_url_with_blob(&blob)?;
    let a = document.create_element("a")?.dyn_into::<HtmlElement>()?;
    a.set_attribute("href", &url)?;
    a.set_attribute("download", filename)?;
    a.click();
    Url::revoke_object_url(&url)?;
    Ok(())
}

/// Value of the `<input>` or `<select>` with `id`.
pub fn field_value(document: &Document, id: &str) -> Option<String> {
    let el = document.get_element_by_id(id)?;
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        return Some(input.value());
    }
    el.dyn_ref::<HtmlSelectElement>().map(|sel| sel.value())
}

pub fn set_field_value(document: &Document, id: &str, value: &str) {
    let Some(el) = document.get_element_by_id(id) else {
        return;
    };
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        input.set_value(value);
    } else if let Some(sel) = el.dyn_ref::<HtmlSelectElement>() {
        sel.set_value(value);
    }
}

pub fn parse_number(label: &str, raw: &str) -> Result<f64, String> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| format!("{label}: {:?} is not a number", raw.trim()))
}

/// Length shown in a form field: up to three decimals, trailing zeros trimmed.
pub fn fmt_len(v: f64) -> String {
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lengths_are_trimmed() {
        assert_eq!(fmt_len(210.0), "210");
        assert_eq!(fmt_len(8.5), "8.5");
        assert_eq!(fmt_len(0.39370078), "0.394");
        assert_eq!(fmt_len(-0.0001), "0");
    }

    #[test]
    fn numbers_are_parsed_leniently() {
        assert_eq!(parse_number("cell size", " 12.5 "), Ok(12.5));
        assert_eq!(parse_number("cell size", "-3"), Ok(-3.0));
        let err = parse_number("cell size", "abc").unwrap_err();
        assert!(err.starts_with("cell size"));
    }
}
