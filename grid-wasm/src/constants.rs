/// Id of the page canvas in the host document.
pub const CANVAS_ID: &str = "cv";
/// Id of the `<img>` holding the reference background.
pub const BACKGROUND_ID: &str = "background";
/// Id of the file input that loads the background image.
pub const BACKGROUND_INPUT_ID: &str = "bgImage";
pub const STATUS_ID: &str = "status";

/// PNG downloads match what is on screen.
pub const PNG_EXPORT_DPI: f64 = 96.0;
pub const PDF_EXPORT_DPI: f64 = 150.0;
