use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

pub mod catalog;
pub mod config;
pub mod error;
pub mod manager;
pub mod ports;
pub mod state;
pub mod web;

#[cfg(test)]
mod testing;

pub use crate::{
    catalog::{FontCatalog, FontFamily, Variant},
    config::EditorConfig,
    error::{CatalogError, FontLoadError, StoreError},
    manager::{FontManager, FontOutcome, SessionPhase},
    state::{EditorState, FontFaceRequest, FontStyle, Selection},
};

use crate::web::{DocumentFontLoader, DomSurface, HttpCatalog, LocalStore};

type BrowserManager = FontManager<HttpCatalog, DocumentFontLoader, LocalStore, DomSurface>;

/// A text area whose font is picked from a web font catalog and whose
/// content survives reloads.
#[wasm_bindgen]
pub struct FontEditor {
    manager: Rc<BrowserManager>,
}

#[wasm_bindgen]
impl FontEditor {
    /// Finds the editor's controls on the page and wires their events.
    ///
    /// `config` is an optional object; see [`EditorConfig`] for its fields.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<FontEditor, JsValue> {
        console_error_panic_hook::set_once();

        let config: EditorConfig = if config.is_undefined() || config.is_null() {
            EditorConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        web::console::init(config.log_level);

        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsValue::from_str("no document to attach the editor to"))?;
        let surface = DomSurface::find(&document, &config)?;

        let manager = Rc::new(FontManager::new(
            HttpCatalog::new(config.catalog_url.as_str()),
            DocumentFontLoader,
            LocalStore::new(config.storage_key.as_str()),
            surface,
        ));
        web::bind_events(&manager, &document, &config)?;

        Ok(Self { manager })
    }

    /// Loads the font catalog, then restores the saved state.
    pub fn start(&self) -> js_sys::Promise {
        let manager = self.manager.clone();
        future_to_promise(async move {
            manager.start().await;
            Ok(JsValue::UNDEFINED)
        })
    }

    #[wasm_bindgen(js_name = reloadCatalog)]
    pub fn reload_catalog(&self) -> js_sys::Promise {
        let manager = self.manager.clone();
        future_to_promise(async move {
            manager.reload_catalog().await;
            Ok(JsValue::UNDEFINED)
        })
    }

    pub fn save(&self) {
        self.manager.save();
    }

    pub fn reset(&self) {
        self.manager.reset_state();
    }

    pub fn content(&self) -> String {
        self.manager.state().content
    }

    #[wasm_bindgen(js_name = pendingFontLoads)]
    pub fn pending_font_loads(&self) -> usize {
        self.manager.pending_font_loads()
    }
}
