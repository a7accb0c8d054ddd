//! Browser implementations of the manager's ports.

use wasm_bindgen::{JsCast, JsValue};

pub mod console;
mod dom;
mod events;
mod fetch;
mod fonts;
mod storage;

pub use dom::DomSurface;
pub use events::bind_events;
pub use fetch::HttpCatalog;
pub use fonts::DocumentFontLoader;
pub use storage::LocalStore;

/// Turns whatever JavaScript threw into something worth logging.
pub(crate) fn describe(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    match value.dyn_ref::<js_sys::Error>() {
        Some(err) => String::from(err.message()),
        None => format!("{value:?}"),
    }
}
