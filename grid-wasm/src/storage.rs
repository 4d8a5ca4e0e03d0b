use grid_core::{STORAGE_KEY, SheetConfig};
use web_sys::{Storage, Window};

use crate::utils::log;

fn local_storage(window: &Window) -> Option<Storage> {
    window.local_storage().ok().flatten()
}

/// Settings from the previous session, or defaults when there are none or
/// they no longer parse.
pub fn load(window: &Window) -> SheetConfig {
    let stored = local_storage(window).and_then(|s| s.get_item(STORAGE_KEY).ok().flatten());
    match stored {
        Some(text) => SheetConfig::from_json(&text).unwrap_or_else(|e| {
            log(&format!("Ignoring stored settings: {e}"));
            SheetConfig::default()
        }),
        None => SheetConfig::default(),
    }
}

pub fn save(window: &Window, config: &SheetConfig) {
    let Some(storage) = local_storage(window) else {
        log("localStorage unavailable; settings will not persist");
        return;
    };
    if let Err(e) = storage.set_item(STORAGE_KEY, &config.to_json()) {
        log(&format!("Failed to save settings: {e:?}"));
    }
}
