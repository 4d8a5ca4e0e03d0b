use grid_core::{BackgroundPlacement, History, RedrawGate, SheetConfig};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, Window};

/// Application state; `start` wraps it in an `Rc<RefCell<_>>` that every
/// WASM callback holds a clone of.
pub struct State {
    pub window: Window,
    pub document: Document,
    pub canvas: HtmlCanvasElement,
    pub ctx: CanvasRenderingContext2d,
    pub config: SheetConfig,
    pub history: History<SheetConfig>,
    pub background: BackgroundPlacement,
    pub redraw: RedrawGate,
}
