use std::cell::RefCell;
use std::rc::Rc;

use grid_core::{BackgroundPlacement, Point};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, HtmlImageElement, MouseEvent, PointerEvent, WheelEvent};

use crate::constants::BACKGROUND_ID;
use crate::state::State;
use crate::utils::log;

pub fn background_image(state: &State) -> Option<HtmlImageElement> {
    state
        .document
        .get_element_by_id(BACKGROUND_ID)?
        .dyn_into::<HtmlImageElement>()
        .ok()
}

/// Write the placement into the element's style; the offset is relative
/// to the element's top-left corner.
pub fn apply_transform(el: &HtmlElement, placement: &BackgroundPlacement) {
    let style = el.style();
    let _ = style.set_property("transform-origin", "0 0");
    let _ = style.set_property("transform", &placement.css_transform());
}

fn client_point(e: &MouseEvent) -> Point {
    Point::new(e.client_x() as f64, e.client_y() as f64)
}

/// Pointer position relative to the container the image is positioned in.
fn container_point(el: &HtmlElement, e: &MouseEvent) -> Point {
    let p = client_point(e);
    match el.parent_element() {
        Some(parent) => {
            let rect = parent.get_bounding_client_rect();
            Point::new(p.x - rect.left(), p.y - rect.top())
        }
        None => p,
    }
}

// Drag with any pointer, zoom with the wheel around the cursor.
pub fn attach_background_handlers(state: Rc<RefCell<State>>) -> Result<(), JsValue> {
    let Some(img) = background_image(&state.borrow()) else {
        log("No #background image element; background controls disabled");
        return Ok(());
    };

    {
        let st = state.clone();
        let target = img.clone();
        let ondown = Closure::<dyn FnMut(PointerEvent)>::wrap(Box::new(move |e: PointerEvent| {
            e.prevent_default();
            let _ = target.set_pointer_capture(e.pointer_id());
            st.borrow_mut().background.begin_drag(client_point(&e));
        }));
        img.add_event_listener_with_callback("pointerdown", ondown.as_ref().unchecked_ref())?;
        ondown.forget();
    }

    {
        let st = state.clone();
        let target = img.clone();
        let onmove = Closure::<dyn FnMut(PointerEvent)>::wrap(Box::new(move |e: PointerEvent| {
            let mut s = st.borrow_mut();
            if s.background.drag_to(client_point(&e)) {
                apply_transform(&target, &s.background);
            }
        }));
        img.add_event_listener_with_callback("pointermove", onmove.as_ref().unchecked_ref())?;
        onmove.forget();
    }

    for name in ["pointerup", "pointercancel"] {
        let st = state.clone();
        let onup = Closure::<dyn FnMut(PointerEvent)>::wrap(Box::new(move |_e: PointerEvent| {
            st.borrow_mut().background.end_drag();
        }));
        img.add_event_listener_with_callback(name, onup.as_ref().unchecked_ref())?;
        onup.forget();
    }

    {
        let st = state.clone();
        let target = img.clone();
        let onwheel = Closure::<dyn FnMut(WheelEvent)>::wrap(Box::new(move |e: WheelEvent| {
            e.prevent_default();
            let pointer = container_point(&target, &e);
            let mut s = st.borrow_mut();
            s.background
                .zoom_at(pointer, BackgroundPlacement::wheel_factor(e.delta_y()));
            apply_transform(&target, &s.background);
        }));
        img.add_event_listener_with_callback("wheel", onwheel.as_ref().unchecked_ref())?;
        onwheel.forget();
    }
    Ok(())
}
