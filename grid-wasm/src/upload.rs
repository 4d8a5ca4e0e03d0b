use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, FileReader, HtmlInputElement};

use crate::background::{apply_transform, background_image};
use crate::constants::BACKGROUND_INPUT_ID;
use crate::state::State;
use crate::utils::log;

// Wires up the file input that loads a reference image behind the grid.
pub fn attach_file_input(state: Rc<RefCell<State>>) -> Result<(), JsValue> {
    let doc: Document = state.borrow().document.clone();
    let Some(input) = doc.get_element_by_id(BACKGROUND_INPUT_ID) else {
        return Ok(());
    };
    let input: HtmlInputElement = input.dyn_into()?;
    let st = state.clone();
    let input_for_closure = input.clone();
    let onchange = Closure::<dyn FnMut(Event)>::wrap(Box::new(move |_e: Event| {
        let Some(file) = input_for_closure.files().and_then(|files| files.item(0)) else {
            log("No file selected");
            return;
        };
        let reader = match FileReader::new() {
            Ok(r) => r,
            Err(e) => {
                log(&format!("FileReader unavailable: {e:?}"));
                return;
            }
        };
        let st2 = st.clone();
        let reader_for_closure = reader.clone();
        let onload = Closure::<dyn FnMut(Event)>::wrap(Box::new(move |_ev: Event| {
            let url = reader_for_closure
                .result()
                .ok()
                .and_then(|v| v.as_string())
                .unwrap_or_default();
            if url.is_empty() {
                log("Selected image is empty or unreadable");
                return;
            }
            show_background(&st2, &url);
        }));
        reader.set_onload(Some(onload.as_ref().unchecked_ref()));
        if let Err(e) = reader.read_as_data_url(&file) {
            log(&format!("Failed to read file: {e:?}"));
        }
        onload.forget();
    }));
    input.set_onchange(Some(onchange.as_ref().unchecked_ref()));
    onchange.forget();
    Ok(())
}

/// A new image starts over at the page origin, unscaled.
fn show_background(state: &Rc<RefCell<State>>, data_url: &str) {
    let mut s = state.borrow_mut();
    s.background.reset();
    let Some(img) = background_image(&s) else {
        log("No #background image element");
        return;
    };
    img.set_src(data_url);
    img.set_hidden(false);
    apply_transform(&img, &s.background);
}
