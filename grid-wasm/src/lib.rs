use std::cell::RefCell;
use std::rc::Rc;

use grid_core::{
    BackgroundPlacement, GridType, History, Orientation, PagePreset, RedrawGate, SCREEN_DPI,
    SheetConfig, Unit, render_clipped,
};
use sheet_core::ExportFormat;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

mod background;
mod canvas;
mod constants;
mod form;
mod state;
mod storage;
mod upload;
mod utils;

use canvas::{CanvasSurface, init_canvas};
use constants::{PDF_EXPORT_DPI, PNG_EXPORT_DPI};
use state::State;
use utils::{log, parse_number};

/// Size the canvas to the oriented page and draw the current grid.
fn draw(state: &mut State) {
    let geom = match state.config.geometry() {
        Ok(g) => g,
        Err(e) => {
            let w = state.canvas.width() as f64;
            let h = state.canvas.height() as f64;
            state.ctx.clear_rect(0.0, 0.0, w, h);
            form::set_status(&state.document, &e.to_string());
            return;
        }
    };
    form::set_status(&state.document, "");

    let (w, h) = state.config.page_px(SCREEN_DPI);
    if state.canvas.width() != w {
        state.canvas.set_width(w);
    }
    if state.canvas.height() != h {
        state.canvas.set_height(h);
    }
    let style = state.canvas.style();
    let _ = style.set_property("width", &format!("{w}px"));
    let _ = style.set_property("height", &format!("{h}px"));

    let area = state.config.draw_area_at(SCREEN_DPI);
    let mut surface = CanvasSurface::new(&state.canvas, &state.ctx);
    render_clipped(&mut surface, &area, &geom, &state.config.stroke());
}

/// Schedule a frame unless one is already pending; the frame draws
/// whatever configuration is current when it fires.
fn request_redraw(state: &Rc<RefCell<State>>) {
    let window = {
        let mut s = state.borrow_mut();
        if !s.redraw.request() {
            return;
        }
        s.window.clone()
    };
    let st = state.clone();
    let frame = Closure::once_into_js(move |_ts: f64| {
        let mut s = st.borrow_mut();
        if s.redraw.take() {
            draw(&mut s);
        }
    });
    if let Err(e) = window.request_animation_frame(frame.unchecked_ref()) {
        log(&format!("requestAnimationFrame failed: {e:?}"));
        let mut s = state.borrow_mut();
        s.redraw.take();
        draw(&mut s);
    }
}

/// Apply one form edit to a copy of the configuration; only a real change
/// is recorded for undo.
fn commit<F>(state: &Rc<RefCell<State>>, edit: F)
where
    F: FnOnce(&mut SheetConfig) -> Result<(), String>,
{
    {
        let mut s = state.borrow_mut();
        let before = s.config.clone();
        let mut next = before.clone();
        if let Err(msg) = edit(&mut next) {
            form::set_status(&s.document, &msg);
            form::sync(&s.document, &s.config);
            return;
        }
        if next == before {
            return;
        }
        s.history.record(before);
        s.config = next;
    }
    after_change(state);
}

fn after_change(state: &Rc<RefCell<State>>) {
    {
        let s = state.borrow();
        storage::save(&s.window, &s.config);
        form::sync(&s.document, &s.config);
        form::sync_history(&s.document, &s.history);
    }
    request_redraw(state);
}

fn step_history(state: &Rc<RefCell<State>>, forward: bool) {
    {
        let mut s = state.borrow_mut();
        let current = s.config.clone();
        let restored = if forward {
            s.history.redo(current)
        } else {
            s.history.undo(current)
        };
        let Some(config) = restored else {
            return;
        };
        s.config = config;
    }
    after_change(state);
}

fn export_download(state: &State, format: ExportFormat, dpi: f64) -> Result<(), JsValue> {
    let bytes = sheet_core::export(&state.config, format, dpi)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    utils::save_bytes_as_file(&state.document, format.file_name(), &bytes)
}

fn bind_field<F>(state: &Rc<RefCell<State>>, id: &str, apply: F) -> Result<(), JsValue>
where
    F: Fn(&mut SheetConfig, &str) -> Result<(), String> + 'static,
{
    let doc = state.borrow().document.clone();
    let Some(el) = doc.get_element_by_id(id) else {
        log(&format!("Form field #{id} not found"));
        return Ok(());
    };
    let st = state.clone();
    let field = id.to_string();
    let onchange = Closure::<dyn FnMut()>::wrap(Box::new(move || {
        let doc = st.borrow().document.clone();
        let Some(value) = utils::field_value(&doc, &field) else {
            return;
        };
        commit(&st, |c| apply(c, &value));
    }));
    el.add_event_listener_with_callback("change", onchange.as_ref().unchecked_ref())?;
    onchange.forget();
    Ok(())
}

fn bind_button<F>(state: &Rc<RefCell<State>>, id: &str, handler: F) -> Result<(), JsValue>
where
    F: Fn(&Rc<RefCell<State>>) + 'static,
{
    let doc = state.borrow().document.clone();
    let Some(btn) = doc.get_element_by_id(id) else {
        log(&format!("Button #{id} not found"));
        return Ok(());
    };
    let btn: HtmlElement = btn.dyn_into()?;
    let st = state.clone();
    let onclick = Closure::<dyn FnMut()>::wrap(Box::new(move || handler(&st)));
    btn.set_onclick(Some(onclick.as_ref().unchecked_ref()));
    onclick.forget();
    Ok(())
}

fn attach_ui(state: &Rc<RefCell<State>>) -> Result<(), JsValue> {
    bind_field(state, "pageSize", |c, v| {
        let preset = PagePreset::parse(v).ok_or_else(|| format!("unknown page size {v:?}"))?;
        c.set_page_size(preset);
        Ok(())
    })?;
    bind_field(state, "orientation", |c, v| {
        c.orientation = Orientation::parse(v).ok_or_else(|| format!("unknown orientation {v:?}"))?;
        Ok(())
    })?;
    bind_field(state, "unit", |c, v| {
        let unit = Unit::parse(v).ok_or_else(|| format!("unknown unit {v:?}"))?;
        c.set_unit(unit);
        Ok(())
    })?;
    bind_field(state, "pageWidth", |c, v| {
        let w = parse_number("page width", v)?;
        c.set_custom_dimensions(w, c.height);
        Ok(())
    })?;
    bind_field(state, "pageHeight", |c, v| {
        let h = parse_number("page height", v)?;
        c.set_custom_dimensions(c.width, h);
        Ok(())
    })?;
    bind_field(state, "marginAll", |c, v| {
        c.set_uniform_margin(parse_number("margin", v)?);
        Ok(())
    })?;
    bind_field(state, "marginTop", |c, v| {
        c.margin_top = parse_number("top margin", v)?;
        Ok(())
    })?;
    bind_field(state, "marginRight", |c, v| {
        c.margin_right = parse_number("right margin", v)?;
        Ok(())
    })?;
    bind_field(state, "marginBottom", |c, v| {
        c.margin_bottom = parse_number("bottom margin", v)?;
        Ok(())
    })?;
    bind_field(state, "marginLeft", |c, v| {
        c.margin_left = parse_number("left margin", v)?;
        Ok(())
    })?;
    bind_field(state, "gridType", |c, v| {
        c.grid_type = GridType::parse(v).ok_or_else(|| format!("unknown grid type {v:?}"))?;
        Ok(())
    })?;
    bind_field(state, "cellSize", |c, v| {
        c.cell_size = parse_number("cell size", v)?;
        Ok(())
    })?;
    bind_field(state, "color", |c, v| {
        c.color = v.trim().to_string();
        Ok(())
    })?;

    bind_button(state, "undoBtn", |st| step_history(st, false))?;
    bind_button(state, "redoBtn", |st| step_history(st, true))?;
    for (id, format, dpi) in [
        ("exportPng", ExportFormat::Png, PNG_EXPORT_DPI),
        ("exportPdf", ExportFormat::Pdf, PDF_EXPORT_DPI),
    ] {
        bind_button(state, id, move |st| {
            let s = st.borrow();
            if let Err(e) = export_download(&s, format, dpi) {
                let msg = e.as_string().unwrap_or_else(|| format!("{e:?}"));
                log(&format!("Export failed: {msg}"));
                form::set_status(&s.document, &format!("Export failed: {msg}"));
            }
        })?;
    }

    upload::attach_file_input(state.clone())?;
    background::attach_background_handlers(state.clone())?;
    Ok(())
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    let (canvas, ctx) = init_canvas(&document)?;
    let config = storage::load(&window);

    let state = Rc::new(RefCell::new(State {
        window,
        document,
        canvas,
        ctx,
        config,
        history: History::default(),
        background: BackgroundPlacement::default(),
        redraw: RedrawGate::default(),
    }));

    attach_ui(&state)?;
    {
        let s = state.borrow();
        form::sync(&s.document, &s.config);
        form::sync_history(&s.document, &s.history);
    }
    draw(&mut state.borrow_mut());
    Ok(())
}
